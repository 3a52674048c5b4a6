pub mod detection;
pub mod models;
pub mod report;

pub use detection::model::{ModelPaths, SkinModel, shared_model};
pub use detection::preprocessing::BgrImage;
pub use detection::{DetectionPipeline, InferenceModel};
pub use models::{BoundingBox, Detection, DetectionOutcome};
pub use report::{DetectionReport, ReportRow, build_report, format_confidence};

#[cfg(feature = "gui")]
pub mod gui;
