//! Attachment buffer: files and images waiting for the next submission.

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A text/source file selected by the user, already decoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachedFile {
    pub name: String,
    pub content: String,
}

impl AttachedFile {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }
}

/// An image selected by the user, base64-encoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachedImage {
    pub name: String,
    pub mime_type: String,
    pub data: String,
}

impl AttachedImage {
    pub fn new(
        name: impl Into<String>,
        mime_type: impl Into<String>,
        data: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            data: data.into(),
        }
    }
}

/// Which sequence of the buffer an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttachmentKind {
    File,
    Image,
}

impl fmt::Display for AttachmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttachmentKind::File => write!(f, "file"),
            AttachmentKind::Image => write!(f, "image"),
        }
    }
}

impl std::str::FromStr for AttachmentKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "file" | "f" => Ok(AttachmentKind::File),
            "image" | "img" | "i" => Ok(AttachmentKind::Image),
            _ => Err(DomainError::InvalidAttachmentKind(s.to_string())),
        }
    }
}

/// Files and images taken out of the buffer for one request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttachmentSnapshot {
    pub files: Vec<AttachedFile>,
    pub images: Vec<AttachedImage>,
}

impl AttachmentSnapshot {
    pub fn is_empty(&self) -> bool {
        self.files.is_empty() && self.images.is_empty()
    }
}

/// Ordered buffers of pending files and images.
///
/// Duplicates are allowed; two entries with the same name are distinct.
/// The buffer never inspects content bytes.
#[derive(Debug, Clone, Default)]
pub struct AttachmentBuffer {
    files: Vec<AttachedFile>,
    images: Vec<AttachedImage>,
}

impl AttachmentBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_file(&mut self, name: impl Into<String>, content: impl Into<String>) {
        self.files.push(AttachedFile::new(name, content));
    }

    pub fn add_image(
        &mut self,
        name: impl Into<String>,
        mime_type: impl Into<String>,
        data: impl Into<String>,
    ) {
        self.images.push(AttachedImage::new(name, mime_type, data));
    }

    /// Remove the entry at `index`. Out-of-range indices are a no-op.
    pub fn remove(&mut self, kind: AttachmentKind, index: usize) -> Option<String> {
        match kind {
            AttachmentKind::File if index < self.files.len() => {
                Some(self.files.remove(index).name)
            }
            AttachmentKind::Image if index < self.images.len() => {
                Some(self.images.remove(index).name)
            }
            _ => None,
        }
    }

    pub fn clear(&mut self) {
        self.files.clear();
        self.images.clear();
    }

    /// Move every entry out, leaving the buffer empty.
    pub fn take(&mut self) -> AttachmentSnapshot {
        AttachmentSnapshot {
            files: std::mem::take(&mut self.files),
            images: std::mem::take(&mut self.images),
        }
    }

    pub fn files(&self) -> &[AttachedFile] {
        &self.files
    }

    pub fn images(&self) -> &[AttachedImage] {
        &self.images
    }

    pub fn len(&self) -> usize {
        self.files.len() + self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty() && self.images.is_empty()
    }
}
