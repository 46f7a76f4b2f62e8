// Loader seam: the artifact interpreter is a black box behind this trait
use thiserror::Error;

/// The interpreter rejected the accumulated bytes.
#[derive(Debug, Error)]
#[error("artifact rejected: {reason}")]
pub struct LoadError {
    reason: String,
}

impl LoadError {
    pub fn new(reason: impl Into<String>) -> Self {
        LoadError {
            reason: reason.into(),
        }
    }
}

/// Consumes one complete transfer and produces an artifact, or rejects it.
///
/// Called exactly once per successful collection, with ownership of the
/// full byte sequence. The artifact format is the interpreter's business;
/// this crate never looks inside.
pub trait ArtifactLoader {
    type Artifact;

    fn load(&self, bytes: Vec<u8>) -> Result<Self::Artifact, LoadError>;
}

/// An artifact kept as raw bytes, untouched.
#[derive(Debug, PartialEq, Eq)]
pub struct RawArtifact {
    bytes: Vec<u8>,
}

impl RawArtifact {
    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

/// Loader that accepts any byte sequence as-is.
#[derive(Debug, Default)]
pub struct OpaqueLoader;

impl ArtifactLoader for OpaqueLoader {
    type Artifact = RawArtifact;

    fn load(&self, bytes: Vec<u8>) -> Result<RawArtifact, LoadError> {
        Ok(RawArtifact { bytes })
    }
}
