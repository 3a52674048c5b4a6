pub mod annotate;
pub mod model;
pub mod preprocessing;

use anyhow::Result;
use image::RgbImage;
use tracing::debug;

use crate::models::{Detection, DetectionOutcome};
use preprocessing::BgrImage;

/// Boundary to the pretrained detector.
///
/// Implementations own inference, confidence filtering and box merging; the
/// pipeline never post-processes what comes back.
pub trait InferenceModel {
    /// Run one forward pass. Every returned detection has
    /// `confidence >= conf_threshold`, in the model's emission order.
    fn infer(&self, image: &BgrImage, conf_threshold: f32) -> Result<Vec<Detection>>;
}

/// Detection-to-presentation pipeline for a single frame.
///
/// Stateless across runs: each call reads the current parameters, executes
/// top to bottom and hands back one [`DetectionOutcome`].
pub struct DetectionPipeline {
    /// Brightness multiplier in [0.5, 2.0]
    pub brightness: f32,
    /// Minimum score for a reported detection, in [0.1, 1.0]
    pub confidence_threshold: f32,
}

impl DetectionPipeline {
    pub fn new() -> Self {
        Self {
            brightness: 1.0,
            confidence_threshold: 0.25,
        }
    }

    pub fn with_brightness(mut self, brightness: f32) -> Self {
        self.brightness = brightness;
        self
    }

    pub fn with_confidence_threshold(mut self, threshold: f32) -> Self {
        self.confidence_threshold = threshold;
        self
    }

    /// Run brightness adjustment, channel conversion, inference and
    /// annotation over `image`.
    ///
    /// The annotated frame is drawn from the exact detection list returned,
    /// so the two can never mix across runs.
    pub fn run<M: InferenceModel>(&self, model: &M, image: &RgbImage) -> Result<DetectionOutcome> {
        debug!(
            "pipeline run: brightness {:.2}, threshold {:.2}",
            self.brightness, self.confidence_threshold
        );

        let adjusted = preprocessing::enhance_brightness(image, self.brightness);
        let bgr = BgrImage::from_rgb(&adjusted);

        let detections = model.infer(&bgr, self.confidence_threshold)?;
        let annotated = annotate::annotate(&adjusted, &detections);

        Ok(DetectionOutcome {
            detections,
            annotated,
        })
    }
}

impl Default for DetectionPipeline {
    fn default() -> Self {
        Self::new()
    }
}
