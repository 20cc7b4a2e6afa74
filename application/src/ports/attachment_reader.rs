//! Attachment reader port
//!
//! The boundary that turns a user-selected path into decoded text or a
//! base64 image. The attachment buffer never interprets bytes itself.

use async_trait::async_trait;
use persevan_domain::{AttachedFile, AttachedImage};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while reading an attachment
#[derive(Error, Debug)]
pub enum AttachmentError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{0} is not a text file")]
    NotText(PathBuf),

    #[error("{0} has no file name")]
    NoFileName(PathBuf),
}

/// A file decoded according to its declared media type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodedAttachment {
    File(AttachedFile),
    Image(AttachedImage),
}

impl DecodedAttachment {
    pub fn name(&self) -> &str {
        match self {
            DecodedAttachment::File(f) => &f.name,
            DecodedAttachment::Image(i) => &i.name,
        }
    }
}

/// Port for reading attachments from wherever the user selected them.
#[async_trait]
pub trait AttachmentReaderPort: Send + Sync {
    /// Read and decode one file.
    async fn read(&self, path: &Path) -> Result<DecodedAttachment, AttachmentError>;

    /// Read several files; one result per path, in input order.
    async fn read_all(&self, paths: &[PathBuf]) -> Vec<Result<DecodedAttachment, AttachmentError>> {
        let mut results = Vec::with_capacity(paths.len());
        for path in paths {
            results.push(self.read(path).await);
        }
        results
    }
}
