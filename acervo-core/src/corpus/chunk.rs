use serde::{Deserialize, Serialize};

/// Structural fields a query can filter on.
///
/// Filters are exact-match on the *number* value of the field; section and
/// chapter names are resolved to numbers by the classifier before filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StructuralField {
    Chapter,
    Title,
    Article,
    Section,
    Annex,
}

impl StructuralField {
    /// All variants for iteration.
    pub const ALL: [StructuralField; 5] = [
        Self::Chapter,
        Self::Title,
        Self::Article,
        Self::Section,
        Self::Annex,
    ];
}

/// Structural tags carried by a chunk: chapter/title/article/section/annex
/// numbers and (where the source document names them) display names.
///
/// All fields are optional typed fields, never an untyped map — a chunk from
/// an unstructured document simply has all of them `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StructuralTags {
    pub chapter_number: Option<String>,
    pub chapter_name: Option<String>,
    pub title_number: Option<String>,
    pub title_name: Option<String>,
    pub article_number: Option<String>,
    pub section_number: Option<String>,
    pub section_name: Option<String>,
    pub annex_number: Option<String>,
}

impl StructuralTags {
    /// The number value for a structural field, if tagged.
    pub fn number(&self, field: StructuralField) -> Option<&str> {
        match field {
            StructuralField::Chapter => self.chapter_number.as_deref(),
            StructuralField::Title => self.title_number.as_deref(),
            StructuralField::Article => self.article_number.as_deref(),
            StructuralField::Section => self.section_number.as_deref(),
            StructuralField::Annex => self.annex_number.as_deref(),
        }
    }

    /// The display name for a structural field, if the document names it.
    pub fn name(&self, field: StructuralField) -> Option<&str> {
        match field {
            StructuralField::Chapter => self.chapter_name.as_deref(),
            StructuralField::Title => self.title_name.as_deref(),
            StructuralField::Section => self.section_name.as_deref(),
            StructuralField::Article | StructuralField::Annex => None,
        }
    }
}

/// The immutable-once-indexed unit of text. Created during ingestion;
/// read-only to the retrieval engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chunk {
    /// Stable identifier.
    pub id: String,
    /// Owning document.
    pub document_id: String,
    /// Corpus partition tag. Mandatory hard filter at every search.
    pub area: String,
    /// Free-text body.
    pub text: String,
    /// Token length of `text`.
    pub token_count: usize,
    /// Previous chunk in document order, same document only.
    pub prev_id: Option<String>,
    /// Next chunk in document order, same document only.
    pub next_id: Option<String>,
    /// Structural parent (e.g. the section a paragraph belongs to).
    pub parent_id: Option<String>,
    /// Structural children.
    pub child_ids: Vec<String>,
    /// Hierarchy depth, 0–5.
    pub depth: u8,
    /// Chapter/section/article tags.
    pub structure: StructuralTags,
}

impl Chunk {
    /// Minimal constructor for a flat chunk; links and tags default empty.
    pub fn new(
        id: impl Into<String>,
        document_id: impl Into<String>,
        area: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        let text = text.into();
        // Rough token estimate (~4 chars/token) when ingestion metadata is absent.
        let token_count = text.len().div_ceil(4);
        Self {
            id: id.into(),
            document_id: document_id.into(),
            area: area.into(),
            text,
            token_count,
            prev_id: None,
            next_id: None,
            parent_id: None,
            child_ids: Vec::new(),
            depth: 0,
            structure: StructuralTags::default(),
        }
    }
}

/// Identity equality: two chunks are equal if they have the same ID.
/// The corpus is immutable during retrieval, so identity is sufficient.
impl PartialEq for Chunk {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Chunk {}
