//! Camera and photo library pickers
//!
//! Native pickers report through a callback carrying either a list of
//! assets, a cancellation flag, or an error code plus message. Here the
//! picker is an async request/response trait returning [`PickerResponse`].

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Kind of media the picker may return
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    /// Still photos
    #[default]
    Photo,
    /// Videos
    Video,
    /// Photos or videos
    Mixed,
}

/// Options for launching the camera
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CameraOptions {
    /// Media to capture
    pub media_type: MediaType,
    /// Save the capture to the device photo library
    pub save_to_photos: bool,
}

impl CameraOptions {
    /// Single photo, saved to the photo library
    pub fn photo() -> Self {
        Self {
            media_type: MediaType::Photo,
            save_to_photos: true,
        }
    }
}

/// Options for launching the photo library
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LibraryOptions {
    /// Media to select
    pub media_type: MediaType,
    /// Maximum number of items (0 means unlimited)
    pub selection_limit: u32,
}

impl LibraryOptions {
    /// Exactly one photo
    pub fn single_photo() -> Self {
        Self {
            media_type: MediaType::Photo,
            selection_limit: 1,
        }
    }
}

/// An image returned by a picker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageAsset {
    /// Local URI of the image
    pub uri: String,
    /// Original file name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    /// MIME type (e.g. "image/jpeg")
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    /// Width in pixels
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    /// Height in pixels
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    /// File size in bytes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_size: Option<u64>,
}

impl ImageAsset {
    /// Asset with only a URI
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            file_name: None,
            mime_type: None,
            width: None,
            height: None,
            file_size: None,
        }
    }
}

/// Error codes reported by native pickers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PickerErrorCode {
    /// No camera on this device
    CameraUnavailable,
    /// Permission denied by the user
    Permission,
    /// Any other failure
    Others,
}

impl std::fmt::Display for PickerErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PickerErrorCode::CameraUnavailable => write!(f, "camera_unavailable"),
            PickerErrorCode::Permission => write!(f, "permission"),
            PickerErrorCode::Others => write!(f, "others"),
        }
    }
}

/// Failure reported by a picker
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{code}: {message}")]
pub struct PickerError {
    /// Error code
    pub code: PickerErrorCode,
    /// Human-readable message
    pub message: String,
}

impl PickerError {
    /// Create a picker error
    pub fn new(code: PickerErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

/// Result of a picker invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerResponse {
    /// The user captured or selected media
    Assets(Vec<ImageAsset>),
    /// The user dismissed the picker
    Cancelled,
    /// The platform reported an error
    Failed(PickerError),
}

/// Host camera / photo library capability
#[async_trait]
pub trait ImagePicker: Send + Sync {
    /// Launch the camera
    async fn launch_camera(&self, options: CameraOptions) -> PickerResponse;

    /// Launch the photo library
    async fn launch_image_library(&self, options: LibraryOptions) -> PickerResponse;
}
