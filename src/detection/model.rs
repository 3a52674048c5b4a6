use anyhow::{Context, Result, anyhow, bail};
use image::imageops::{self, FilterType};
use rten::{Dimension, Model};
use rten_tensor::prelude::*;
use rten_tensor::{NdTensor, NdTensorView};
use std::fmt;
use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, OnceLock};
use tracing::{debug, info};

use crate::detection::InferenceModel;
use crate::detection::preprocessing::BgrImage;
use crate::models::{BoundingBox, Detection};

/// Fallback when the graph does not carry a fixed spatial input size
const DEFAULT_INPUT_SIZE: u32 = 640;

/// Overlap threshold for the model's own box merging
const IOU_THRESHOLD: f32 = 0.45;

/// Filesystem locations of the pretrained artifact and its class listing
#[derive(Debug, Clone)]
pub struct ModelPaths {
    pub model: PathBuf,
    pub labels: PathBuf,
}

impl Default for ModelPaths {
    fn default() -> Self {
        Self {
            model: PathBuf::from("best.rten"),
            labels: PathBuf::from("best.names"),
        }
    }
}

/// Pretrained skin-finding detector.
///
/// Wraps the converted model together with the id→name table that ships with
/// it. Inference, confidence filtering and box merging all live behind this
/// type; callers only see [`Detection`] values.
pub struct SkinModel {
    model: Model,
    class_names: Vec<String>,
    input_width: u32,
    input_height: u32,
}

impl fmt::Debug for SkinModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SkinModel")
            .field("input_width", &self.input_width)
            .field("input_height", &self.input_height)
            .field("classes", &self.class_names.len())
            .finish_non_exhaustive()
    }
}

impl SkinModel {
    /// Load the model and its class listing from disk.
    pub fn load(paths: &ModelPaths) -> Result<SkinModel> {
        if !paths.model.exists() {
            bail!(
                "Detection model not found. Export the trained weights to .rten and place them at:\n  {}\n\
                 (or point --model at the artifact)",
                paths.model.display()
            );
        }

        let class_names: Vec<String> = fs::read_to_string(&paths.labels)
            .with_context(|| {
                format!(
                    "failed to read the class-name listing at {}",
                    paths.labels.display()
                )
            })?
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(String::from)
            .collect();

        if class_names.is_empty() {
            bail!(
                "class-name listing {} contains no entries",
                paths.labels.display()
            );
        }

        info!("loading detection model from {}", paths.model.display());
        let model = Model::load_file(&paths.model).with_context(|| {
            format!("failed to load detection model {}", paths.model.display())
        })?;

        let input_shape = model
            .input_ids()
            .first()
            .copied()
            .and_then(|id| model.node_info(id))
            .and_then(|info| info.shape());

        let (input_height, input_width) = match input_shape.as_deref() {
            Some([_, _, Dimension::Fixed(h), Dimension::Fixed(w)]) => (*h as u32, *w as u32),
            _ => (DEFAULT_INPUT_SIZE, DEFAULT_INPUT_SIZE),
        };

        debug!(
            "model ready: {}x{} input, {} classes",
            input_width,
            input_height,
            class_names.len()
        );

        Ok(SkinModel {
            model,
            class_names,
            input_width,
            input_height,
        })
    }

    pub fn class_names(&self) -> &[String] {
        &self.class_names
    }

    /// Pack a resized BGR frame into the normalized NCHW tensor the model expects.
    fn to_input_tensor(&self, image: &BgrImage) -> NdTensor<f32, 4> {
        let resized = imageops::resize(
            image.buffer(),
            self.input_width,
            self.input_height,
            FilterType::Triangle,
        );

        let mut input =
            NdTensor::zeros([1, 3, self.input_height as usize, self.input_width as usize]);
        for (x, y, pixel) in resized.enumerate_pixels() {
            for c in 0..3 {
                input[[0, c, y as usize, x as usize]] = pixel[c] as f32 / 255.0;
            }
        }
        input
    }
}

impl InferenceModel for SkinModel {
    fn infer(&self, image: &BgrImage, conf_threshold: f32) -> Result<Vec<Detection>> {
        let (src_width, src_height) = image.dimensions();
        let input = self.to_input_tensor(image);

        debug!("running inference on {}x{} frame", src_width, src_height);
        let output = self
            .model
            .run_one(input.view().into(), None)
            .map_err(|e| anyhow!("model inference failed: {e}"))?;
        let preds: NdTensor<f32, 3> = output
            .try_into()
            .map_err(|_| anyhow!("model output was not a rank-3 float tensor"))?;

        let scale = (
            src_width as f32 / self.input_width as f32,
            src_height as f32 / self.input_height as f32,
        );
        let candidates = decode_predictions(
            preds.view(),
            &self.class_names,
            conf_threshold,
            scale,
            (src_width as f32, src_height as f32),
        );
        let detections = non_max_suppression(candidates, IOU_THRESHOLD);

        debug!("{} detections at threshold {conf_threshold}", detections.len());
        Ok(detections)
    }
}

/// Decode a `[1, 4 + classes, candidates]` prediction head.
///
/// Each candidate holds a center-format box in model-input pixels followed by
/// per-class scores. Only candidates whose best class score is at or above
/// `conf_threshold` survive; boxes are mapped back to source pixels via
/// `scale` and clamped to `bounds`.
pub fn decode_predictions(
    preds: NdTensorView<f32, 3>,
    class_names: &[String],
    conf_threshold: f32,
    scale: (f32, f32),
    bounds: (f32, f32),
) -> Vec<Detection> {
    let [_, channels, candidates] = preds.shape();
    let num_classes = channels.saturating_sub(4);
    let (scale_x, scale_y) = scale;
    let (max_x, max_y) = bounds;

    let mut detections = Vec::new();
    for i in 0..candidates {
        let mut best_class = 0usize;
        let mut best_score = 0.0f32;
        for c in 0..num_classes {
            let score = preds[[0, 4 + c, i]];
            if score > best_score {
                best_score = score;
                best_class = c;
            }
        }

        if best_score < conf_threshold {
            continue;
        }

        let cx = preds[[0, 0, i]];
        let cy = preds[[0, 1, i]];
        let w = preds[[0, 2, i]];
        let h = preds[[0, 3, i]];

        let x = ((cx - w / 2.0) * scale_x).clamp(0.0, max_x);
        let y = ((cy - h / 2.0) * scale_y).clamp(0.0, max_y);
        let right = ((cx + w / 2.0) * scale_x).clamp(0.0, max_x);
        let bottom = ((cy + h / 2.0) * scale_y).clamp(0.0, max_y);

        let class_name = class_names
            .get(best_class)
            .cloned()
            .unwrap_or_else(|| format!("class {best_class}"));

        detections.push(Detection {
            class_id: best_class,
            class_name,
            confidence: best_score,
            bbox: BoundingBox {
                x,
                y,
                width: right - x,
                height: bottom - y,
            },
        });
    }
    detections
}

/// Class-aware merging of overlapping candidate boxes, highest score first.
pub fn non_max_suppression(mut detections: Vec<Detection>, iou_threshold: f32) -> Vec<Detection> {
    detections.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));

    let mut kept = Vec::new();
    while !detections.is_empty() {
        let best = detections.remove(0);
        detections
            .retain(|det| det.class_id != best.class_id || best.bbox.iou(&det.bbox) < iou_threshold);
        kept.push(best);
    }
    kept
}

static SHARED_MODEL: OnceLock<Result<Arc<SkinModel>, String>> = OnceLock::new();

/// Process-wide handle to the pretrained model.
///
/// The first call loads the model; every later call returns the cached handle
/// or the cached, human-readable load failure. A failed load is never retried
/// within the same process.
pub fn shared_model(paths: &ModelPaths) -> Result<Arc<SkinModel>, String> {
    SHARED_MODEL
        .get_or_init(|| {
            SkinModel::load(paths)
                .map(Arc::new)
                .map_err(|e| format!("{e:#}"))
        })
        .clone()
}
