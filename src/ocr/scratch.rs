use std::io::{self, Write};
use std::path::Path;

use tempfile::NamedTempFile;

use super::image::ImageFormat;

const SCRATCH_PREFIX: &str = "credence-ocr-";

/// Request-scoped copy of an uploaded image on disk.
///
/// Every instance gets a unique file name, so concurrent requests never share a
/// path. The file is removed when the value is dropped, on success and error paths
/// alike.
#[derive(Debug)]
pub struct ScratchImage {
    file: NamedTempFile,
}

impl ScratchImage {
    /// Writes `bytes` to a fresh file in `dir` (or the system temp dir).
    pub fn write(dir: Option<&Path>, bytes: &[u8], format: ImageFormat) -> io::Result<Self> {
        let mut builder = tempfile::Builder::new();
        builder.prefix(SCRATCH_PREFIX).suffix(format.extension());

        let mut file = match dir {
            Some(dir) => builder.tempfile_in(dir)?,
            None => builder.tempfile()?,
        };
        file.write_all(bytes)?;
        file.flush()?;

        Ok(Self { file })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }
}
