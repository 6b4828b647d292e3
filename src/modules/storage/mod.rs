//! Storage module for report photos
//!
//! Provides the local media directory ("media sink") that receives uploaded
//! and camera-captured images, plus the naming rules for stored files.

mod local_storage;
mod media_name;

pub use local_storage::{LocalMediaStorage, MediaStorage, StorageError};
pub use media_name::{after_image_name, before_image_name, captured_image_name, decode_data_url};
