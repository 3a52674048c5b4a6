mod common;

use common::fixtures::{FakeModel, detection, solid_image};
use skinscan::report::{DetectionReport, build_report};
use skinscan::DetectionPipeline;

#[test]
fn strict_threshold_yields_advisory_and_unmarked_frame() {
    let img = solid_image(64, 64, [180, 180, 180]);
    let model = FakeModel {
        detections: vec![detection(0, "mole", 0.9, [10.0, 10.0, 30.0, 20.0])],
    };

    let outcome = DetectionPipeline::new()
        .with_confidence_threshold(1.0)
        .run(&model, &img)
        .unwrap();

    assert!(outcome.detections.is_empty());
    assert!(matches!(
        build_report(&outcome.detections),
        DetectionReport::NoDetections { .. }
    ));
    // Nothing to draw and brightness 1.0: the annotated frame is the input
    assert_eq!(outcome.annotated, img);
}

#[test]
fn threshold_filters_and_preserves_order() {
    let img = solid_image(64, 64, [128, 128, 128]);
    let model = FakeModel {
        detections: vec![
            detection(0, "mole", 0.9, [4.0, 4.0, 16.0, 16.0]),
            detection(1, "rash", 0.3, [30.0, 30.0, 16.0, 16.0]),
        ],
    };

    let both = DetectionPipeline::new()
        .with_confidence_threshold(0.25)
        .run(&model, &img)
        .unwrap();
    assert_eq!(both.detections.len(), 2);
    assert_eq!(both.detections[0].class_name, "mole");
    assert_eq!(both.detections[1].class_name, "rash");

    let one = DetectionPipeline::new()
        .with_confidence_threshold(0.5)
        .run(&model, &img)
        .unwrap();
    assert_eq!(one.detections.len(), 1);
    assert_eq!(one.detections[0].class_name, "mole");
}

#[test]
fn every_reported_detection_meets_the_threshold() {
    let img = solid_image(32, 32, [50, 50, 50]);
    let model = FakeModel {
        detections: vec![
            detection(0, "mole", 0.95, [1.0, 1.0, 8.0, 8.0]),
            detection(0, "mole", 0.5, [12.0, 12.0, 8.0, 8.0]),
            detection(1, "rash", 0.11, [22.0, 22.0, 8.0, 8.0]),
        ],
    };

    for threshold in [0.1, 0.4, 0.6, 0.96] {
        let outcome = DetectionPipeline::new()
            .with_confidence_threshold(threshold)
            .run(&model, &img)
            .unwrap();
        assert!(outcome.detections.iter().all(|d| d.confidence >= threshold));
    }
}

#[test]
fn annotated_frame_marks_each_detection() {
    let img = solid_image(64, 64, [255, 255, 255]);
    let model = FakeModel {
        detections: vec![detection(0, "mole", 0.9, [10.0, 10.0, 30.0, 20.0])],
    };

    let outcome = DetectionPipeline::new()
        .with_confidence_threshold(0.25)
        .run(&model, &img)
        .unwrap();

    assert_eq!(outcome.detections.len(), 1);
    assert_ne!(outcome.annotated, img);
    // Top-left corner of the box carries the box color (the label chip, when
    // a font is available, is filled with the same color)
    assert_eq!(outcome.annotated.get_pixel(10, 10).0, [64, 132, 244]);
}

#[test]
fn brightness_is_applied_before_annotation() {
    let img = solid_image(8, 8, [100, 100, 100]);
    let model = FakeModel { detections: vec![] };

    let outcome = DetectionPipeline::new()
        .with_brightness(2.0)
        .with_confidence_threshold(1.0)
        .run(&model, &img)
        .unwrap();

    assert_eq!(outcome.annotated.get_pixel(0, 0).0, [200, 200, 200]);
}
