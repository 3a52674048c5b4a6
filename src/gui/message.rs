use std::path::PathBuf;
use std::sync::Arc;

use crate::detection::model::SkinModel;
use crate::gui::state::DetectionView;

#[derive(Debug, Clone)]
pub enum Message {
    ModelLoaded(Result<Arc<SkinModel>, String>),
    PickImage,
    ImagePicked(Option<PathBuf>),
    BrightnessChanged(f32),
    ConfidenceChanged(f32),
    RunDetection,
    DetectionFinished(Result<DetectionView, String>),
}
