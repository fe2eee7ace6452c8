//! Collecting an exported chat from the file system.
//!
//! A chat export is a folder (or a loose selection of files) holding one
//! `.txt` transcript plus the media it references. [`ExportBundle`] walks
//! the given paths, picks the transcript and builds the [`FileMap`] of
//! images the renderer resolves attachments against.
//!
//! # Example
//!
//! ```rust,no_run
//! use chatview::bundle::ExportBundle;
//! use chatview::parser::TranscriptParser;
//!
//! let bundle = ExportBundle::from_dir("WhatsApp Chat with Alice")?;
//! let messages = bundle.parse(&TranscriptParser::new())?;
//! println!("{} messages, {} images", messages.len(), bundle.files.len());
//! # Ok::<(), chatview::ChatviewError>(())
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use mime_guess::mime;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::Message;
use crate::config::BundleConfig;
use crate::error::{ChatviewError, Result};
use crate::files::FileMap;
use crate::parser::TranscriptParser;

/// A located transcript together with its image attachments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportBundle {
    /// The transcript file.
    pub transcript: PathBuf,
    /// Image files by file name.
    pub files: FileMap,
}

impl ExportBundle {
    /// Collects a single exported chat folder.
    ///
    /// # Errors
    ///
    /// Returns [`ChatviewError::MissingTranscript`] if the folder holds no
    /// transcript, or [`ChatviewError::Io`] if it cannot be read.
    pub fn from_dir(root: impl AsRef<Path>) -> Result<Self> {
        Self::from_paths([root.as_ref()])
    }

    /// Collects a drop payload: any mix of files and folders.
    ///
    /// Folders are walked recursively in file-name order.
    ///
    /// # Errors
    ///
    /// Same as [`from_dir`](Self::from_dir).
    pub fn from_paths<I, P>(paths: I) -> Result<Self>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        Self::collect(paths, &BundleConfig::default())
    }

    /// Collects paths using custom file selection rules.
    ///
    /// # Errors
    ///
    /// Same as [`from_dir`](Self::from_dir).
    pub fn collect<I, P>(paths: I, config: &BundleConfig) -> Result<Self>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let roots: Vec<PathBuf> = paths.into_iter().map(|p| p.as_ref().to_path_buf()).collect();
        let mut transcript: Option<PathBuf> = None;
        let mut files = FileMap::new();

        for root in &roots {
            for entry in WalkDir::new(root).sort_by_file_name() {
                // An unusable root is fatal; anything below it is skipped
                let entry = match entry {
                    Ok(entry) => entry,
                    Err(err) if err.depth() == 0 => return Err(io::Error::from(err).into()),
                    Err(err) => {
                        warn!(error = %err, "skipping unreadable entry");
                        continue;
                    }
                };
                if !entry.file_type().is_file() {
                    continue;
                }
                let path = entry.path();
                let name = entry.file_name().to_string_lossy();

                if is_transcript(path, config) {
                    match &transcript {
                        None => transcript = Some(path.to_path_buf()),
                        Some(first) => warn!(
                            ignored = %path.display(),
                            using = %first.display(),
                            "multiple transcripts found, keeping the first"
                        ),
                    }
                } else if is_image(path, config) {
                    if let Some(previous) = files.insert(name.to_string(), path) {
                        debug!(name = %name, replaced = %previous.display(), "duplicate attachment name");
                    }
                }
            }
        }

        let transcript = transcript
            .ok_or_else(|| ChatviewError::missing_transcript(roots, &config.transcript_extension))?;

        debug!(
            transcript = %transcript.display(),
            images = files.len(),
            "collected chat export"
        );

        Ok(Self { transcript, files })
    }

    /// Reads the transcript, replacing invalid UTF-8 with U+FFFD.
    ///
    /// # Errors
    ///
    /// Returns [`ChatviewError::Io`] if the file cannot be read.
    pub fn read_transcript(&self) -> Result<String> {
        let bytes = fs::read(&self.transcript)?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Reads and parses the transcript.
    ///
    /// # Errors
    ///
    /// Returns [`ChatviewError::Io`] if the file cannot be read.
    pub fn parse(&self, parser: &TranscriptParser) -> Result<Vec<Message>> {
        parser.parse(&self.transcript)
    }
}

fn is_transcript(path: &Path, config: &BundleConfig) -> bool {
    path.extension()
        .is_some_and(|ext| ext.to_string_lossy() == config.transcript_extension)
}

/// An image by guessed MIME type, or by extension for common raster formats.
fn is_image(path: &Path, config: &BundleConfig) -> bool {
    let by_mime = mime_guess::from_path(path)
        .first()
        .is_some_and(|m| m.type_() == mime::IMAGE);
    if by_mime {
        return true;
    }

    path.extension().is_some_and(|ext| {
        let ext = ext.to_string_lossy();
        config
            .image_extensions
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(&ext))
    })
}
