use std::sync::Arc;

use iced::widget::image::Handle;
use image::{DynamicImage, RgbImage};

use crate::detection::model::SkinModel;
use crate::report::DetectionReport;

/// Lifecycle of the long-lived model handle
#[derive(Debug, Clone)]
pub enum ModelStatus {
    Loading,
    Ready(Arc<SkinModel>),
    Failed(String),
}

/// The photo currently under inspection
#[derive(Debug, Clone)]
pub struct LoadedImage {
    pub file_name: String,
    pub original: RgbImage,
    /// Brightness-adjusted preview shown in the left column
    pub preview: Handle,
}

/// Result of the latest detection run, already shaped for display.
///
/// Annotated frame and report are built from the same inference call and are
/// replaced together.
#[derive(Debug, Clone)]
pub struct DetectionView {
    pub annotated: Handle,
    pub report: DetectionReport,
}

#[derive(Debug)]
pub struct AppState {
    pub model: ModelStatus,
    pub source: Option<LoadedImage>,
    pub brightness: f32,
    pub confidence_threshold: f32,
    pub outcome: Option<DetectionView>,
    pub is_detecting: bool,
    pub error: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            model: ModelStatus::Loading,
            source: None,
            brightness: 1.0,
            confidence_threshold: 0.25,
            outcome: None,
            is_detecting: false,
            error: None,
        }
    }
}

/// Convert an RGB frame into a widget image handle.
pub fn rgb_handle(img: &RgbImage) -> Handle {
    let rgba = DynamicImage::ImageRgb8(img.clone()).into_rgba8();
    let (width, height) = rgba.dimensions();
    Handle::from_rgba(width, height, rgba.into_raw())
}
