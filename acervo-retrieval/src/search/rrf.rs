use std::cmp::Ordering;
use std::collections::BTreeMap;

/// One ranked retrieval arm entering fusion: a label for provenance,
/// a fusion weight, and ids ordered best first.
pub struct RankedArm<'a> {
    pub label: &'a str,
    pub weight: f64,
    pub ids: Vec<String>,
}

/// Weighted reciprocal-rank fusion.
///
/// score(d) = Σ over arms containing d of weight / (k + rank(d)),
/// with 1-based ranks. Output is sorted by fused score descending,
/// id ascending on ties, so fusion is deterministic regardless of
/// arm evaluation order.
pub fn fuse(arms: &[RankedArm<'_>], k: u32) -> Vec<(String, f64)> {
    let mut scores: BTreeMap<String, f64> = BTreeMap::new();
    for arm in arms {
        for (rank, id) in arm.ids.iter().enumerate() {
            let contribution = arm.weight / (f64::from(k) + rank as f64 + 1.0);
            *scores.entry(id.clone()).or_default() += contribution;
        }
    }

    let mut fused: Vec<(String, f64)> = scores.into_iter().collect();
    fused.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.0.cmp(&b.0))
    });
    fused
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn doc_in_both_arms_beats_doc_in_one() {
        let arms = [
            RankedArm {
                label: "dense",
                weight: 0.5,
                ids: ids(&["shared", "dense_only"]),
            },
            RankedArm {
                label: "lexical",
                weight: 0.5,
                ids: ids(&["shared", "lexical_only"]),
            },
        ];
        let fused = fuse(&arms, 60);
        assert_eq!(fused[0].0, "shared");
        assert!(fused[0].1 > fused[1].1);
    }

    #[test]
    fn ties_break_on_id_ascending() {
        let arms = [
            RankedArm {
                label: "dense",
                weight: 1.0,
                ids: ids(&["b"]),
            },
            RankedArm {
                label: "lexical",
                weight: 1.0,
                ids: ids(&["a"]),
            },
        ];
        let fused = fuse(&arms, 60);
        assert_eq!(fused[0].0, "a");
        assert_eq!(fused[1].0, "b");
    }

    #[test]
    fn weight_shift_reorders_single_arm_hits() {
        let dense = RankedArm {
            label: "dense",
            weight: 0.4,
            ids: ids(&["d"]),
        };
        let lexical = RankedArm {
            label: "lexical",
            weight: 0.6,
            ids: ids(&["l"]),
        };
        let fused = fuse(&[dense, lexical], 60);
        assert_eq!(fused[0].0, "l");
    }

    #[test]
    fn empty_arms_fuse_to_nothing() {
        assert!(fuse(&[], 60).is_empty());
    }
}
