//! End-to-end tests for the PNG → transfer → PNG pipeline.

mod common;

use color_transfer::{GrayImage, TransferError};
use common::fixtures::{self, SIZE};
use common::{assert_has_color, assert_rgb_png, TestDir};
use pretty_assertions::assert_eq;
use recolor::error::AppError;
use recolor::models::{AppConfig, RoleConfig, SwatchConfig, TransferConfig, TransferMode};
use recolor::services::TransferPipeline;

fn seeded_config(seed: u64) -> AppConfig {
    AppConfig {
        transfer: TransferConfig {
            seed: Some(seed),
            ..Default::default()
        },
        swatches: Vec::new(),
    }
}

fn swatch(role: RoleConfig, x1: usize, y1: usize, x2: usize, y2: usize) -> SwatchConfig {
    SwatchConfig {
        role,
        x1,
        y1,
        x2,
        y2,
        tag: None,
    }
}

#[test]
fn test_whole_image_transfer_writes_colored_png() {
    let dir = TestDir::new();
    let (source, target) = dir.standard_inputs();
    let output = dir.path("out.png");

    let pipeline = TransferPipeline::new(seeded_config(7));
    let result = pipeline
        .run(TransferMode::WholeImage, &source, &target, &output)
        .unwrap();

    assert_eq!(result.mode, TransferMode::WholeImage);
    assert!(result.result.colorized().is_none());
    let image = assert_rgb_png(&output, SIZE, SIZE);
    assert_has_color(&image);
}

#[test]
fn test_whole_image_transfer_is_reproducible_with_seed() {
    let dir = TestDir::new();
    let (source, target) = dir.standard_inputs();
    let first = dir.path("first.png");
    let second = dir.path("second.png");

    let pipeline = TransferPipeline::new(seeded_config(42));
    pipeline
        .run(TransferMode::WholeImage, &source, &target, &first)
        .unwrap();
    pipeline
        .run(TransferMode::WholeImage, &source, &target, &second)
        .unwrap();

    assert_eq!(std::fs::read(&first).unwrap(), std::fs::read(&second).unwrap());
}

#[test]
fn test_luminance_follows_target() {
    let dir = TestDir::new();
    let (source, target) = dir.standard_inputs();
    let output = dir.path("out.png");

    let result = TransferPipeline::new(seeded_config(3))
        .run(TransferMode::WholeImage, &source, &target, &output)
        .unwrap();

    let gray = fixtures::gradient_target();
    let lab = result.result.lab();
    for row in [0, SIZE / 2, SIZE - 1] {
        for col in [0, SIZE / 2, SIZE - 1] {
            let expected = f64::from(gray.get(row, col));
            let actual = lab.l().get(row, col);
            assert!(
                (actual - expected).abs() <= 1.0,
                "L at ({row}, {col}) is {actual}, expected {expected}"
            );
        }
    }
}

#[test]
fn test_swatch_transfer_marks_target_swatch_colorized() {
    let dir = TestDir::new();
    let (source, target) = dir.standard_inputs();
    let output = dir.path("out.png");

    let mut config = seeded_config(11);
    config.swatches = vec![
        swatch(RoleConfig::Source, 0, 0, SIZE / 2, SIZE),
        swatch(RoleConfig::Target, 0, 0, SIZE / 2, SIZE),
    ];

    let result = TransferPipeline::new(config)
        .run(TransferMode::SwatchGuided, &source, &target, &output)
        .unwrap();

    let mask = result.result.colorized().expect("swatch mode returns a mask");
    assert_eq!(mask.count(), SIZE / 2 * SIZE);
    assert!(mask.get(3, 3));
    assert!(!mask.get(3, SIZE - 1));

    let image = assert_rgb_png(&output, SIZE, SIZE);
    let [r, _, b] = image.get(SIZE / 2, 3);
    assert!(r > b, "expected red chroma from the red swatch, got r={r} b={b}");
    assert_has_color(&image);
}

#[test]
fn test_swatch_transfer_with_tags_pairs_by_tag() {
    let dir = TestDir::new();
    let (source, target) = dir.standard_inputs();
    let output = dir.path("out.png");

    let mut config = seeded_config(5);
    let mut blue_source = swatch(RoleConfig::Source, SIZE / 2, 0, SIZE, SIZE);
    blue_source.tag = Some("blue".to_string());
    let mut blue_target = swatch(RoleConfig::Target, 0, 0, SIZE / 2, SIZE);
    blue_target.tag = Some("blue".to_string());
    config.swatches = vec![blue_target, blue_source];

    let result = TransferPipeline::new(config)
        .run(TransferMode::SwatchGuided, &source, &target, &output)
        .unwrap();

    let image = assert_rgb_png(&output, SIZE, SIZE);
    let [r, _, b] = image.get(SIZE / 2, 3);
    assert!(b > r, "expected blue chroma from the tagged pair, got r={r} b={b}");
    assert_eq!(result.result.colorized().map(|m| m.count()), Some(SIZE / 2 * SIZE));
}

#[test]
fn test_swatch_count_mismatch_is_reported() {
    let dir = TestDir::new();
    let (source, target) = dir.standard_inputs();
    let output = dir.path("out.png");

    let mut config = seeded_config(1);
    config.swatches = vec![swatch(RoleConfig::Source, 0, 0, 8, 8)];

    let err = TransferPipeline::new(config)
        .run(TransferMode::SwatchGuided, &source, &target, &output)
        .unwrap_err();

    assert!(matches!(
        err,
        AppError::Transfer(TransferError::SwatchCountMismatch {
            sources: 1,
            targets: 0
        })
    ));
    assert!(!output.exists());
}

#[test]
fn test_swatch_mode_without_swatches_fails() {
    let dir = TestDir::new();
    let (source, target) = dir.standard_inputs();
    let output = dir.path("out.png");

    let err = TransferPipeline::new(seeded_config(1))
        .run(TransferMode::SwatchGuided, &source, &target, &output)
        .unwrap_err();

    assert!(matches!(err, AppError::Transfer(TransferError::NoSwatches)));
}

#[test]
fn test_missing_input_file() {
    let dir = TestDir::new();
    let (_, target) = dir.standard_inputs();

    let err = TransferPipeline::new(AppConfig::default())
        .run(
            TransferMode::WholeImage,
            &dir.path("nope.png"),
            &target,
            &dir.path("out.png"),
        )
        .unwrap_err();

    assert!(matches!(err, AppError::ReadFile { .. }));
    assert!(err.to_string().contains("nope.png"));
}

#[test]
fn test_gray_source_yields_gray_output() {
    let dir = TestDir::new();
    let source = dir.write_gray("source.png", &GrayImage::from_fn(SIZE, SIZE, |r, c| (r * 5 + c * 3) as u8));
    let target = dir.write_gray("target.png", &fixtures::gradient_target());
    let output = dir.path("out.png");

    TransferPipeline::new(seeded_config(9))
        .run(TransferMode::WholeImage, &source, &target, &output)
        .unwrap();

    let image = assert_rgb_png(&output, SIZE, SIZE);
    for &[r, g, b] in image.pixels() {
        let spread = r.max(g).max(b) - r.min(g).min(b);
        assert!(spread <= 2, "expected gray pixel, got {:?}", [r, g, b]);
    }
}

#[test]
fn test_color_target_is_converted_to_gray() {
    let dir = TestDir::new();
    let source = dir.write_rgb("source.png", &fixtures::two_tone_source());
    let target = dir.write_rgb("target.png", &fixtures::two_tone_source());
    let output = dir.path("out.png");

    TransferPipeline::new(seeded_config(2))
        .run(TransferMode::WholeImage, &source, &target, &output)
        .unwrap();

    assert_rgb_png(&output, SIZE, SIZE);
}
