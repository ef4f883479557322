//! Host capabilities for the Plant Disease app
//!
//! This crate defines the seams between the app and the device it runs on:
//! the system appearance (light/dark) query and change notifications, and
//! the camera / photo library pickers. Each capability is a trait so the
//! platform layer can plug in its native implementation while tests and
//! headless hosts use the simulated ones provided here.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod appearance;
pub mod picker;
pub mod subscription;

pub use appearance::{AppearanceListener, AppearanceProvider, ColorScheme, SimulatedAppearance};
pub use picker::{
    CameraOptions, ImageAsset, ImagePicker, LibraryOptions, MediaType, PickerError,
    PickerErrorCode, PickerResponse,
};
pub use subscription::Subscription;
