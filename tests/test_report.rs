mod common;

use common::fixtures::detection;
use skinscan::report::{DetectionReport, build_report, format_confidence};

#[test]
fn confidence_renders_two_fraction_digits() {
    assert_eq!(format_confidence(0.8734), "87.34%");
    assert_eq!(format_confidence(1.0), "100.00%");
    assert_eq!(format_confidence(0.0), "0.00%");
}

#[test]
fn empty_detections_yield_the_advisory() {
    match build_report(&[]) {
        DetectionReport::NoDetections { advisory } => {
            assert!(advisory.contains("confidence threshold"));
            assert!(advisory.contains("brightness"));
        }
        DetectionReport::Detected { .. } => panic!("expected the advisory state"),
    }
}

#[test]
fn rows_follow_input_order() {
    let detections = vec![
        detection(1, "mole", 0.9, [0.0, 0.0, 10.0, 10.0]),
        detection(0, "rash", 0.8734, [20.0, 20.0, 10.0, 10.0]),
    ];

    match build_report(&detections) {
        DetectionReport::Detected { summary, rows } => {
            assert!(summary.contains('2'));
            assert_eq!(rows.len(), 2);

            assert_eq!(rows[0].index, 1);
            assert_eq!(rows[0].class_name, "mole");
            assert_eq!(rows[0].confidence, "90.00%");

            assert_eq!(rows[1].index, 2);
            assert_eq!(rows[1].class_name, "rash");
            assert_eq!(rows[1].confidence, "87.34%");
        }
        DetectionReport::NoDetections { .. } => panic!("expected the success state"),
    }
}
