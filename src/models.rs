use image::RgbImage;

/// Axis-aligned bounding box in source-image pixel coordinates
#[derive(Debug, Clone, PartialEq)]
pub struct BoundingBox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl BoundingBox {
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn area(&self) -> f32 {
        self.width * self.height
    }

    /// Intersection-over-union with another box
    pub fn iou(&self, other: &BoundingBox) -> f32 {
        let x1 = self.x.max(other.x);
        let y1 = self.y.max(other.y);
        let x2 = self.right().min(other.right());
        let y2 = self.bottom().min(other.bottom());

        let intersection = (x2 - x1).max(0.0) * (y2 - y1).max(0.0);
        let union = self.area() + other.area() - intersection;

        if union > 0.0 {
            intersection / union
        } else {
            0.0
        }
    }
}

/// One model-reported object instance
#[derive(Debug, Clone)]
pub struct Detection {
    pub class_id: usize,
    /// Resolved through the id→name table shipped with the model
    pub class_name: String,
    /// Score in [0, 1], at or above the threshold the model was queried with
    pub confidence: f32,
    pub bbox: BoundingBox,
}

/// Everything one detection run produced.
///
/// The detections and the annotated frame always come from the same inference
/// call; replacing the outcome replaces both at once.
#[derive(Debug, Clone)]
pub struct DetectionOutcome {
    pub detections: Vec<Detection>,
    pub annotated: RgbImage,
}
