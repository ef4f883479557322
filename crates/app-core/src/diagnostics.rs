//! Photo capture for the diagnostics screen
//!
//! Two user-triggered flows: take a picture with the camera, or pick one
//! image from the photo library. The host picker result is reduced to a
//! [`CaptureOutcome`]. Nothing is done with the image beyond logging it.

use std::sync::Arc;

use app_platform::{
    CameraOptions, ImageAsset, ImagePicker, LibraryOptions, PickerError, PickerErrorCode,
    PickerResponse,
};

/// Alert title for camera failures
pub const CAMERA_ERROR_TITLE: &str = "Camera Error";

/// Alert title for photo library failures
pub const PICKER_ERROR_TITLE: &str = "ImagePicker Error";

/// A user-visible alert
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    /// Alert title
    pub title: String,
    /// Alert body
    pub message: String,
}

impl Alert {
    /// Create an alert
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
        }
    }
}

/// Which picker a capture went through
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureSource {
    /// Device camera
    Camera,
    /// Photo library
    Gallery,
}

impl CaptureSource {
    /// Alert title used for failures from this source
    pub fn error_title(&self) -> &'static str {
        match self {
            CaptureSource::Camera => CAMERA_ERROR_TITLE,
            CaptureSource::Gallery => PICKER_ERROR_TITLE,
        }
    }
}

/// Screen-level result of a capture
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureOutcome {
    /// Exactly one image was captured or selected
    Captured(ImageAsset),
    /// The user dismissed the picker
    Cancelled,
    /// The host reported an error
    Failed(Alert),
}

impl CaptureOutcome {
    /// The captured image, if any
    pub fn image(&self) -> Option<&ImageAsset> {
        match self {
            CaptureOutcome::Captured(asset) => Some(asset),
            _ => None,
        }
    }

    /// The alert to show, if any
    pub fn alert(&self) -> Option<&Alert> {
        match self {
            CaptureOutcome::Failed(alert) => Some(alert),
            _ => None,
        }
    }
}

/// Capture controller backed by the host picker
#[derive(Clone)]
pub struct DiagnosticsCapture {
    picker: Arc<dyn ImagePicker>,
}

impl std::fmt::Debug for DiagnosticsCapture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiagnosticsCapture").finish_non_exhaustive()
    }
}

impl DiagnosticsCapture {
    /// Create a controller
    pub fn new(picker: Arc<dyn ImagePicker>) -> Self {
        Self { picker }
    }

    /// Launch the camera for a single photo, saved to the library
    pub async fn take_picture(&self) -> CaptureOutcome {
        let response = self.picker.launch_camera(CameraOptions::photo()).await;
        reduce(CaptureSource::Camera, response)
    }

    /// Pick one photo from the library
    pub async fn upload_from_gallery(&self) -> CaptureOutcome {
        let response = self
            .picker
            .launch_image_library(LibraryOptions::single_photo())
            .await;
        reduce(CaptureSource::Gallery, response)
    }
}

fn reduce(source: CaptureSource, response: PickerResponse) -> CaptureOutcome {
    match response {
        PickerResponse::Cancelled => {
            tracing::debug!(?source, "User cancelled picker");
            CaptureOutcome::Cancelled
        }
        PickerResponse::Failed(error) => failed(source, error),
        PickerResponse::Assets(assets) => match assets.into_iter().next() {
            Some(asset) => {
                tracing::info!(?source, uri = %asset.uri, "Image captured");
                CaptureOutcome::Captured(asset)
            }
            None => failed(
                source,
                PickerError::new(PickerErrorCode::Others, "No image was returned"),
            ),
        },
    }
}

fn failed(source: CaptureSource, error: PickerError) -> CaptureOutcome {
    tracing::warn!(?source, code = %error.code, message = %error.message, "Picker failed");
    CaptureOutcome::Failed(Alert::new(source.error_title(), error.message))
}
