use crate::models::Detection;

/// One line of the detection table
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRow {
    /// 1-indexed sequence number
    pub index: usize,
    pub class_name: String,
    /// Confidence rendered as a percentage, e.g. `87.34%`
    pub confidence: String,
}

/// User-facing summary of one detection run
#[derive(Debug, Clone, PartialEq)]
pub enum DetectionReport {
    /// Nothing was found; advisory suggests parameter changes
    NoDetections { advisory: String },
    /// At least one detection; one row per detection, input order
    Detected { summary: String, rows: Vec<ReportRow> },
}

/// Render a confidence score as a percentage with two fractional digits.
pub fn format_confidence(confidence: f32) -> String {
    format!("{:.2}%", confidence * 100.0)
}

/// Map raw detections to the presentation table. Pure and total.
pub fn build_report(detections: &[Detection]) -> DetectionReport {
    if detections.is_empty() {
        return DetectionReport::NoDetections {
            advisory: "No targets detected. Try lowering the confidence threshold or adjusting \
                       the brightness."
                .to_string(),
        };
    }

    let rows = detections
        .iter()
        .enumerate()
        .map(|(i, det)| ReportRow {
            index: i + 1,
            class_name: det.class_name.clone(),
            confidence: format_confidence(det.confidence),
        })
        .collect();

    DetectionReport::Detected {
        summary: format!("Detection complete: {} target(s) found.", detections.len()),
        rows,
    }
}
