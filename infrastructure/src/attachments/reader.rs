//! [`AttachmentReaderPort`] backed by the local file system

use super::media_type::image_mime_type;
use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use futures::future::join_all;
use persevan_application::{AttachmentError, AttachmentReaderPort, DecodedAttachment};
use persevan_domain::{AttachedFile, AttachedImage};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Reads attachments from disk.
///
/// Paths with a known image extension become base64 images; everything
/// else must be valid UTF-8 and becomes a text file. Only the final path
/// component is kept as the display name.
#[derive(Debug, Clone, Default)]
pub struct LocalAttachmentReader;

impl LocalAttachmentReader {
    pub fn new() -> Self {
        Self
    }

    fn display_name(path: &Path) -> Result<String, AttachmentError> {
        path.file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or_else(|| AttachmentError::NoFileName(path.to_path_buf()))
    }
}

#[async_trait]
impl AttachmentReaderPort for LocalAttachmentReader {
    async fn read(&self, path: &Path) -> Result<DecodedAttachment, AttachmentError> {
        let name = Self::display_name(path)?;
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|source| AttachmentError::Io {
                path: path.to_path_buf(),
                source,
            })?;

        if let Some(mime_type) = image_mime_type(path) {
            debug!("Attached image {} ({}, {} bytes)", name, mime_type, bytes.len());
            let data = BASE64_STANDARD.encode(&bytes);
            return Ok(DecodedAttachment::Image(AttachedImage::new(
                name, mime_type, data,
            )));
        }

        let content =
            String::from_utf8(bytes).map_err(|_| AttachmentError::NotText(path.to_path_buf()))?;
        debug!("Attached file {} ({} bytes)", name, content.len());
        Ok(DecodedAttachment::File(AttachedFile::new(name, content)))
    }

    async fn read_all(&self, paths: &[PathBuf]) -> Vec<Result<DecodedAttachment, AttachmentError>> {
        join_all(paths.iter().map(|path| self.read(path))).await
    }
}
