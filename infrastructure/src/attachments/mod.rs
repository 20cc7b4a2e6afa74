//! Local file system attachment reader
//!
//! Turns user-selected paths into decoded text files or base64 images
//! for the attachment buffer.

mod media_type;
mod reader;

pub use media_type::image_mime_type;
pub use reader::LocalAttachmentReader;
