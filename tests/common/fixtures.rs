#![allow(dead_code)]

use anyhow::Result;
use image::{Rgb, RgbImage};

use skinscan::{BgrImage, BoundingBox, Detection, InferenceModel};

pub fn solid_image(width: u32, height: u32, rgb: [u8; 3]) -> RgbImage {
    RgbImage::from_pixel(width, height, Rgb(rgb))
}

/// Image with per-pixel variation, for transforms where a solid color would
/// hide channel mix-ups
pub fn patterned_image(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x * 31 % 256) as u8, (y * 17 % 256) as u8, ((x + y) * 7 % 256) as u8])
    })
}

pub fn detection(class_id: usize, class_name: &str, confidence: f32, bbox: [f32; 4]) -> Detection {
    Detection {
        class_id,
        class_name: class_name.to_string(),
        confidence,
        bbox: BoundingBox {
            x: bbox[0],
            y: bbox[1],
            width: bbox[2],
            height: bbox[3],
        },
    }
}

/// Scripted detector: reports its canned detections at or above the queried
/// threshold, mimicking the model-side confidence filter.
pub struct FakeModel {
    pub detections: Vec<Detection>,
}

impl InferenceModel for FakeModel {
    fn infer(&self, _image: &BgrImage, conf_threshold: f32) -> Result<Vec<Detection>> {
        Ok(self
            .detections
            .iter()
            .filter(|det| det.confidence >= conf_threshold)
            .cloned()
            .collect())
    }
}
