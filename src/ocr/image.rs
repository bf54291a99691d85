use infer::MatcherType;

/// Image container formats the OCR engine accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Jpeg,
    Gif,
    Bmp,
    Tiff,
    Webp,
}

impl ImageFormat {
    /// Identifies the upload from its content. Returns `None` for non-images and for
    /// image types Tesseract cannot read (HEIF, PSD, ICO, ...).
    pub fn sniff(bytes: &[u8]) -> Option<Self> {
        let kind = infer::get(bytes).filter(|kind| kind.matcher_type() == MatcherType::Image)?;
        Self::from_mime(kind.mime_type())
    }

    pub fn from_mime(mime: &str) -> Option<Self> {
        match mime {
            "image/png" => Some(Self::Png),
            "image/jpeg" => Some(Self::Jpeg),
            "image/gif" => Some(Self::Gif),
            "image/bmp" => Some(Self::Bmp),
            "image/tiff" => Some(Self::Tiff),
            "image/webp" => Some(Self::Webp),
            _ => None,
        }
    }

    /// File suffix used for scratch files, including the dot.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => ".png",
            Self::Jpeg => ".jpg",
            Self::Gif => ".gif",
            Self::Bmp => ".bmp",
            Self::Tiff => ".tif",
            Self::Webp => ".webp",
        }
    }
}
