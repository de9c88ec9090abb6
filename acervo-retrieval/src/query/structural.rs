use std::collections::BTreeMap;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use acervo_core::corpus::StructuralField;
use acervo_core::errors::AcervoResult;
use acervo_core::models::SearchFilter;
use acervo_core::traits::IPointStore;

/// Patterns for explicit numbered references. Each captures the number,
/// arabic or roman. The roman alternative can also match ordinary words
/// made of roman letters ("civil"); those fail roman parsing and fall
/// through to name resolution.
static NUMBERED: LazyLock<Vec<(StructuralField, Regex)>> = LazyLock::new(|| {
    [
        (StructuralField::Chapter, r"(?i)cap[ií]tulo\s+(\d+|[ivxlcdm]+)\b"),
        (StructuralField::Title, r"(?i)t[ií]tulo\s+(\d+|[ivxlcdm]+)\b"),
        (
            StructuralField::Article,
            r"(?i)art[ií]culo\s+(\d+(?:\.\d+)*|[ivxlcdm]+)\b",
        ),
        (
            StructuralField::Section,
            r"(?i)secci[oó]n\s+(\d+(?:\.\d+)*|[ivxlcdm]+)\b",
        ),
        (StructuralField::Annex, r"(?i)anexo\s+(\d+|[ivxlcdm]+)\b"),
    ]
    .into_iter()
    .map(|(field, pattern)| (field, Regex::new(pattern).expect("static pattern")))
    .collect()
});

/// "capítulo de/sobre <name>" style references, resolved against the
/// section index when the target document is known.
static NAMED: LazyLock<Vec<(StructuralField, Regex)>> = LazyLock::new(|| {
    [
        (
            StructuralField::Chapter,
            r"(?i)cap[ií]tulo\s+(?:de(?:\s+la|l)?\s+|sobre\s+)([^,.;?]+)",
        ),
        (
            StructuralField::Section,
            r"(?i)secci[oó]n\s+(?:de(?:\s+la|l)?\s+|sobre\s+)([^,.;?]+)",
        ),
    ]
    .into_iter()
    .map(|(field, pattern)| (field, Regex::new(pattern).expect("static pattern")))
    .collect()
});

/// What structural detection extracted from a query: exact-match filters
/// and the text left over once the structural phrases are stripped.
#[derive(Debug, Default)]
pub(crate) struct StructuralDetection {
    pub filters: BTreeMap<StructuralField, String>,
    pub remainder: String,
}

/// Detect structural references in `query`. Numbered references win;
/// name references need both a section index and a target document.
pub(crate) fn detect(
    query: &str,
    index: Option<&SectionIndex>,
    document_id: Option<&str>,
) -> StructuralDetection {
    let mut filters = BTreeMap::new();
    let mut working = query.to_string();

    for (field, pattern) in NUMBERED.iter() {
        let Some(captures) = pattern.captures(&working) else {
            continue;
        };
        let raw = &captures[1];
        let number = if raw.chars().all(|c| c.is_ascii_digit() || c == '.') {
            Some(raw.to_string())
        } else {
            roman_to_arabic(raw).map(|n| n.to_string())
        };
        if let Some(number) = number {
            filters.insert(*field, number);
            let span = captures.get(0).map(|m| m.range());
            if let Some(span) = span {
                working.replace_range(span, " ");
            }
        }
    }

    if let (Some(index), Some(document_id)) = (index, document_id) {
        for (field, pattern) in NAMED.iter() {
            if filters.contains_key(field) {
                continue;
            }
            let Some(captures) = pattern.captures(&working) else {
                continue;
            };
            let name = captures[1].trim();
            if let Some(number) = index.resolve(document_id, *field, name) {
                debug!(?field, name, number, "section name resolved");
                filters.insert(*field, number.to_string());
                let span = captures.get(0).map(|m| m.range());
                if let Some(span) = span {
                    working.replace_range(span, " ");
                }
            }
        }
    }

    StructuralDetection {
        filters,
        remainder: collapse_whitespace(&working),
    }
}

/// Roman numeral → arabic, subtractive notation. `None` on anything
/// that is not a well-formed numeral (so words like "civil" fall out).
pub(crate) fn roman_to_arabic(raw: &str) -> Option<u32> {
    fn value(c: char) -> Option<u32> {
        match c {
            'i' => Some(1),
            'v' => Some(5),
            'x' => Some(10),
            'l' => Some(50),
            'c' => Some(100),
            'd' => Some(500),
            'm' => Some(1000),
            _ => None,
        }
    }

    let values: Vec<u32> = raw.to_lowercase().chars().map(value).collect::<Option<_>>()?;
    if values.is_empty() {
        return None;
    }

    // Reject runs: more than three repeats, or any repeated V/L/D.
    let mut run = 1usize;
    for i in 1..values.len() {
        if values[i] == values[i - 1] {
            run += 1;
            if run > 3 || matches!(values[i], 5 | 50 | 500) {
                return None;
            }
        } else {
            run = 1;
        }
    }

    let mut result = 0u32;
    let mut i = 0usize;
    while i < values.len() {
        let v = values[i];
        if let Some(&next) = values.get(i + 1) {
            if next > v {
                // Only IV, IX, XL, XC, CD, CM are subtractive.
                let valid_pair = matches!(
                    (v, next),
                    (1, 5) | (1, 10) | (10, 50) | (10, 100) | (100, 500) | (100, 1000)
                );
                if !valid_pair {
                    return None;
                }
                result += next - v;
                i += 2;
                continue;
            }
        }
        result += v;
        i += 1;
    }
    Some(result)
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// One named section of one document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NamedSection {
    pub field: StructuralField,
    pub name: String,
    pub number: String,
}

/// Per-document map from section/chapter names to their numbers, used to
/// resolve "capítulo de ajustes de proyectos" to `chapter = 4`.
///
/// Built from the corpus at index time and persisted as JSON next to the
/// lexical model, so classification needs no store round-trips.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SectionIndex {
    documents: BTreeMap<String, Vec<NamedSection>>,
}

impl SectionIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(
        &mut self,
        document_id: impl Into<String>,
        field: StructuralField,
        name: impl Into<String>,
        number: impl Into<String>,
    ) {
        let entry = self.documents.entry(document_id.into()).or_default();
        let name = name.into();
        let number = number.into();
        if !entry
            .iter()
            .any(|s| s.field == field && s.name == name && s.number == number)
        {
            entry.push(NamedSection {
                field,
                name,
                number,
            });
        }
    }

    /// Resolve a name phrase to a section number: exact normalized match
    /// first, then containment in either direction.
    pub fn resolve(&self, document_id: &str, field: StructuralField, phrase: &str) -> Option<&str> {
        let sections = self.documents.get(document_id)?;
        let phrase = normalize(phrase);
        if phrase.is_empty() {
            return None;
        }

        let of_field = || sections.iter().filter(|s| s.field == field);
        if let Some(exact) = of_field().find(|s| normalize(&s.name) == phrase) {
            return Some(&exact.number);
        }
        of_field()
            .find(|s| {
                let name = normalize(&s.name);
                name.contains(&phrase) || phrase.contains(&name)
            })
            .map(|s| s.number.as_str())
    }

    /// Scan every chunk in the partition and index the section and
    /// chapter names its structural tags carry.
    pub fn index_store(
        &mut self,
        store: &dyn IPointStore,
        filter: &SearchFilter,
    ) -> AcervoResult<()> {
        const PAGE: usize = 256;
        let mut offset = 0usize;
        loop {
            let page = store.scroll(filter, offset, PAGE)?;
            if page.is_empty() {
                break;
            }
            offset += page.len();
            for chunk in page {
                for field in StructuralField::ALL {
                    if let (Some(name), Some(number)) =
                        (chunk.structure.name(field), chunk.structure.number(field))
                    {
                        self.insert(chunk.document_id.clone(), field, name, number);
                    }
                }
            }
        }
        Ok(())
    }

    pub fn save(&self, path: &Path) -> AcervoResult<()> {
        let json = serde_json::to_string(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn load(path: &Path) -> AcervoResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }
}

fn normalize(text: &str) -> String {
    collapse_whitespace(&text.to_lowercase())
}
