//! Where component payloads come from.
//!
//! A [`ComponentSource`] hands the consumer a fully decoded component list
//! or an error. The sources here read an in-memory payload or a file;
//! transports such as HTTP would implement the same trait.

use crate::deserialize::{decode_with, DecodeError, DecodeOptions};
use crate::types::Component;
use std::borrow::Cow;
use std::path::{Path, PathBuf};

/// The sample payload shipped with the crate: one element of every kind.
pub const SAMPLE_PAYLOAD: &str = include_str!("../fixtures/sample.json");

/// Errors that can occur while fetching components.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// The payload could not be read.
    #[error("failed to read '{}': {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The payload was read but did not decode.
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

/// Supplier of the component list to render.
pub trait ComponentSource {
    /// Fetch and decode the full component list.
    fn fetch_components(&self) -> Result<Vec<Component>, SourceError>;
}

// ──────────────────────────────────────────────
// StaticSource
// ──────────────────────────────────────────────

/// A source that decodes a payload held in memory.
#[derive(Debug, Clone)]
pub struct StaticSource {
    payload: Cow<'static, str>,
    options: DecodeOptions,
}

impl StaticSource {
    pub fn new(payload: impl Into<Cow<'static, str>>) -> Self {
        StaticSource {
            payload: payload.into(),
            options: DecodeOptions::default(),
        }
    }

    /// A source serving [`SAMPLE_PAYLOAD`].
    pub fn sample() -> Self {
        StaticSource::new(SAMPLE_PAYLOAD)
    }

    pub fn with_options(mut self, options: DecodeOptions) -> Self {
        self.options = options;
        self
    }

    /// The raw payload text.
    pub fn payload(&self) -> &str {
        &self.payload
    }
}

impl ComponentSource for StaticSource {
    fn fetch_components(&self) -> Result<Vec<Component>, SourceError> {
        Ok(decode_with(&self.payload, &self.options)?)
    }
}

// ──────────────────────────────────────────────
// FileSource
// ──────────────────────────────────────────────

/// A source that reads a payload file on every fetch.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
    options: DecodeOptions,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileSource {
            path: path.into(),
            options: DecodeOptions::default(),
        }
    }

    pub fn with_options(mut self, options: DecodeOptions) -> Self {
        self.options = options;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the raw payload text without decoding it.
    pub fn read_payload(&self) -> Result<String, SourceError> {
        std::fs::read_to_string(&self.path).map_err(|source| SourceError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

impl ComponentSource for FileSource {
    fn fetch_components(&self) -> Result<Vec<Component>, SourceError> {
        let payload = self.read_payload()?;
        tracing::debug!(
            path = %self.path.display(),
            bytes = payload.len(),
            "read component payload"
        );
        Ok(decode_with(&payload, &self.options)?)
    }
}
