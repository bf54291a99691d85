use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use tracing::{debug, info, instrument};

use super::error::OcrError;
use super::image::ImageFormat;
use super::scratch::ScratchImage;
use super::TextRecognizer;
use crate::constants::{DEFAULT_OCR_BINARY, DEFAULT_OCR_LANGUAGE};

#[derive(Debug, Clone)]
/// Configuration for [`TesseractRecognizer`].
pub struct TesseractConfig {
    /// Executable name or path.
    pub binary: PathBuf,
    /// Tesseract language code (`eng`).
    pub language: String,
    /// Directory for scratch images. `None` uses the system temp dir.
    pub scratch_dir: Option<PathBuf>,
}

impl Default for TesseractConfig {
    fn default() -> Self {
        Self {
            binary: PathBuf::from(DEFAULT_OCR_BINARY),
            language: DEFAULT_OCR_LANGUAGE.to_string(),
            scratch_dir: None,
        }
    }
}

impl TesseractConfig {
    pub fn new<P: Into<PathBuf>>(binary: P, language: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
            language: language.into(),
            scratch_dir: None,
        }
    }

    pub fn with_scratch_dir<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        self.scratch_dir = Some(dir.into());
        self
    }
}

/// OCR backend that shells out to the `tesseract` CLI.
#[derive(Debug)]
pub struct TesseractRecognizer {
    config: TesseractConfig,
    version: String,
}

impl TesseractRecognizer {
    /// Checks the executable and its installed languages.
    ///
    /// Fails if the binary cannot be run or the configured language is missing, so a
    /// broken OCR setup stops the process at startup instead of failing requests.
    pub fn new(config: TesseractConfig) -> Result<Self, OcrError> {
        let version_output = run(Command::new(&config.binary).arg("--version"), &config.binary)?;
        let version = first_line(&version_output).unwrap_or_else(|| "unknown".to_string());

        let langs_output = run(Command::new(&config.binary).arg("--list-langs"), &config.binary)?;
        let installed = parse_language_list(&combined_text(&langs_output));
        for language in config.language.split('+') {
            if !installed.iter().any(|l| l == language) {
                return Err(OcrError::LanguageUnavailable {
                    language: language.to_string(),
                });
            }
        }

        info!(
            binary = %config.binary.display(),
            version = %version,
            language = %config.language,
            "OCR engine ready"
        );

        Ok(Self { config, version })
    }

    /// Skips the startup check.
    #[cfg(test)]
    pub(crate) fn unchecked(config: TesseractConfig) -> Self {
        Self {
            config,
            version: "unchecked".to_string(),
        }
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn config(&self) -> &TesseractConfig {
        &self.config
    }

    fn run_on_file(&self, path: &Path) -> Result<Output, OcrError> {
        Command::new(&self.config.binary)
            .arg(path)
            .arg("stdout")
            .arg("-l")
            .arg(&self.config.language)
            // Tesseract's OpenMP pool oversubscribes under concurrent requests.
            .env("OMP_THREAD_LIMIT", "1")
            .stdin(Stdio::null())
            .output()
            .map_err(|e| OcrError::EngineUnavailable {
                binary: self.config.binary.clone(),
                reason: e.to_string(),
            })
    }
}

impl TextRecognizer for TesseractRecognizer {
    #[instrument(skip(self, image), fields(image_bytes = image.len()))]
    fn recognize(&self, image: &[u8]) -> Result<Vec<String>, OcrError> {
        if image.is_empty() {
            return Err(OcrError::EmptyImage);
        }
        let format = ImageFormat::sniff(image).ok_or(OcrError::UnsupportedFormat)?;

        let scratch = ScratchImage::write(self.config.scratch_dir.as_deref(), image, format)?;
        debug!(path = %scratch.path().display(), ?format, "Staged image for OCR");

        let output = self.run_on_file(scratch.path())?;
        drop(scratch);

        if !output.status.success() {
            return Err(OcrError::EngineFailed {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let fragments = parse_fragments(&String::from_utf8_lossy(&output.stdout));
        debug!(fragments = fragments.len(), "OCR complete");
        Ok(fragments)
    }

    fn engine_name(&self) -> &'static str {
        "tesseract"
    }
}

fn run(command: &mut Command, binary: &Path) -> Result<Output, OcrError> {
    let output = command
        .stdin(Stdio::null())
        .output()
        .map_err(|e| OcrError::EngineUnavailable {
            binary: binary.to_path_buf(),
            reason: e.to_string(),
        })?;

    if !output.status.success() {
        return Err(OcrError::EngineUnavailable {
            binary: binary.to_path_buf(),
            reason: format!(
                "{}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            ),
        });
    }

    Ok(output)
}

/// Older releases print to stderr; newer ones to stdout.
fn combined_text(output: &Output) -> String {
    let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
    text.push('\n');
    text.push_str(&String::from_utf8_lossy(&output.stderr));
    text
}

fn first_line(output: &Output) -> Option<String> {
    combined_text(output)
        .lines()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .map(str::to_string)
}

/// Parses `--list-langs` output, skipping the "List of available languages" header.
pub(crate) fn parse_language_list(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with("List of available languages"))
        .map(str::to_string)
        .collect()
}

/// One fragment per non-blank output line, in the order Tesseract emitted them.
pub(crate) fn parse_fragments(stdout: &str) -> Vec<String> {
    stdout
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}
