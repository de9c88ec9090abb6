use acervo_core::corpus::Chunk;

/// Fluent builder for corpus chunks in tests.
pub struct ChunkBuilder {
    chunk: Chunk,
}

impl ChunkBuilder {
    pub fn new(id: &str, text: &str) -> Self {
        Self {
            chunk: Chunk::new(id, "acuerdo-03-2021", "regalias", text),
        }
    }

    pub fn document(mut self, id: &str) -> Self {
        self.chunk.document_id = id.to_string();
        self
    }

    pub fn area(mut self, area: &str) -> Self {
        self.chunk.area = area.to_string();
        self
    }

    pub fn prev(mut self, id: &str) -> Self {
        self.chunk.prev_id = Some(id.to_string());
        self
    }

    pub fn next(mut self, id: &str) -> Self {
        self.chunk.next_id = Some(id.to_string());
        self
    }

    pub fn parent(mut self, id: &str) -> Self {
        self.chunk.parent_id = Some(id.to_string());
        self
    }

    pub fn children(mut self, ids: &[&str]) -> Self {
        self.chunk.child_ids = ids.iter().map(|s| (*s).to_string()).collect();
        self
    }

    pub fn depth(mut self, depth: u8) -> Self {
        self.chunk.depth = depth;
        self
    }

    pub fn chapter(mut self, number: &str) -> Self {
        self.chunk.structure.chapter_number = Some(number.to_string());
        self
    }

    pub fn chapter_name(mut self, name: &str) -> Self {
        self.chunk.structure.chapter_name = Some(name.to_string());
        self
    }

    pub fn section(mut self, number: &str) -> Self {
        self.chunk.structure.section_number = Some(number.to_string());
        self
    }

    pub fn article(mut self, number: &str) -> Self {
        self.chunk.structure.article_number = Some(number.to_string());
        self
    }

    pub fn build(self) -> Chunk {
        self.chunk
    }
}

/// A small Spanish legal corpus covering the end-to-end scenarios:
/// definitions (OCAD), a structurally tagged chapter 4 on project
/// adjustments, sanctions, and two documents for comparison queries.
/// Sequence and hierarchy links are consistent within each document.
pub fn legal_corpus() -> Vec<Chunk> {
    vec![
        ChunkBuilder::new(
            "a03-c1",
            "El OCAD es el órgano colegiado de administración y decisión \
             encargado de aprobar los proyectos de inversión financiados con regalías.",
        )
        .chapter("1")
        .chapter_name("disposiciones generales")
        .next("a03-c2")
        .build(),
        ChunkBuilder::new(
            "a03-c2",
            "Los OCAD evalúan, viabilizan y priorizan los proyectos de inversión, \
             y designan la entidad ejecutora de los recursos.",
        )
        .chapter("1")
        .chapter_name("disposiciones generales")
        .prev("a03-c1")
        .next("a03-c3")
        .build(),
        ChunkBuilder::new(
            "a03-c3",
            "La secretaría técnica del OCAD verifica los requisitos de los \
             proyectos antes de someterlos a consideración.",
        )
        .chapter("1")
        .chapter_name("disposiciones generales")
        .prev("a03-c2")
        .build(),
        ChunkBuilder::new(
            "a03-c4-parent",
            "Capítulo 4. Ajustes de proyectos de inversión: reglas generales \
             para modificaciones durante la ejecución.",
        )
        .chapter("4")
        .chapter_name("ajustes de proyectos")
        .children(&["a03-c4a", "a03-c4b"])
        .build(),
        ChunkBuilder::new(
            "a03-c4a",
            "Los ajustes de proyectos que no modifiquen el alcance podrán ser \
             aprobados por la entidad ejecutora sin concepto previo.",
        )
        .chapter("4")
        .chapter_name("ajustes de proyectos")
        .parent("a03-c4-parent")
        .depth(1)
        .next("a03-c4b")
        .build(),
        ChunkBuilder::new(
            "a03-c4b",
            "Los ajustes que modifiquen el valor total del proyecto requieren \
             aprobación del OCAD correspondiente.",
        )
        .chapter("4")
        .chapter_name("ajustes de proyectos")
        .parent("a03-c4-parent")
        .depth(1)
        .prev("a03-c4a")
        .build(),
        ChunkBuilder::new(
            "a03-c5",
            "Las sanciones por incumplimiento incluyen la suspensión de giros \
             y la designación de un gestor temporal.",
        )
        .chapter("5")
        .article("25")
        .build(),
        ChunkBuilder::new(
            "a13-c1",
            "El Acuerdo 13 de 2025 actualiza el ciclo de los proyectos de \
             inversión y simplifica los requisitos de viabilización.",
        )
        .document("acuerdo-13-2025")
        .chapter("1")
        .next("a13-c2")
        .build(),
        ChunkBuilder::new(
            "a13-c2",
            "Bajo el Acuerdo 13 de 2025 los ajustes de proyectos se tramitan \
             ante la instancia que viabilizó el proyecto.",
        )
        .document("acuerdo-13-2025")
        .chapter("4")
        .prev("a13-c1")
        .next("a13-c3")
        .build(),
        ChunkBuilder::new(
            "a13-c3",
            "El Acuerdo 13 de 2025 deroga las disposiciones del Acuerdo 03 de \
             2021 que le sean contrarias.",
        )
        .document("acuerdo-13-2025")
        .chapter("7")
        .prev("a13-c2")
        .build(),
    ]
}
