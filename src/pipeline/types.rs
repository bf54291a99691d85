/// One `/predict` call after form decoding. Empty form values arrive as `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PredictRequest {
    pub text: Option<String>,
    pub source: Option<String>,
    pub image: Option<Vec<u8>>,
}

impl PredictRequest {
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Default::default()
        }
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn with_image(mut self, image: impl Into<Vec<u8>>) -> Self {
        self.image = Some(image.into());
        self
    }
}

/// Output of text acquisition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AcquiredText {
    /// `trim(text + " " + extracted)`; what gets embedded.
    pub combined: String,
    /// Space-joined OCR fragments (empty without an image).
    pub extracted: String,
}

impl AcquiredText {
    pub fn is_empty(&self) -> bool {
        self.combined.is_empty()
    }
}

/// Pipeline states, in order. No state is revisited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    Received,
    TextAcquired,
    EmptyText,
    Embedded,
    Classified,
    Fused,
}

impl Stage {
    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Received => "RECEIVED",
            Stage::TextAcquired => "TEXT_ACQUIRED",
            Stage::EmptyText => "EMPTY_TEXT",
            Stage::Embedded => "EMBEDDED",
            Stage::Classified => "CLASSIFIED",
            Stage::Fused => "FUSED",
        }
    }

    /// `EMPTY_TEXT` and `FUSED` end the pipeline.
    pub fn is_terminal(self) -> bool {
        matches!(self, Stage::EmptyText | Stage::Fused)
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
