mod common;

use std::fs;

use common::write_blank_tiff;
use panelmark::{BatchConfig, BatchRunner, ColorMode};

fn setup_input(images: &[&str], subdir: &str) -> tempfile::TempDir {
    let dir = tempfile::TempDir::new().unwrap();
    let image_dir = dir.path().join(subdir);
    fs::create_dir_all(&image_dir).unwrap();
    for name in images {
        write_blank_tiff(&image_dir.join(name), 64);
    }
    dir
}

#[test]
fn all_images_processed_once_in_ceil_n_over_b_batches() {
    let names = ["p0.tiff", "p1.tiff", "p2.tiff", "p3.tiff", "p4.tiff", "p5.tiff"];
    let input = setup_input(&names, "images");
    let output = tempfile::TempDir::new().unwrap();

    let config = BatchConfig::new(
        input.path().to_path_buf(),
        output.path().to_path_buf(),
        ColorMode::Color,
    );
    let summary = BatchRunner::new(config).run().unwrap();

    assert_eq!(summary.processed, 6);
    assert_eq!(summary.skipped, 0);
    // batch size 4: one full batch plus one partial batch
    assert_eq!(summary.batches, 2);

    for name in names {
        assert!(
            output.path().join(format!("processed_{name}")).is_file(),
            "missing output for {name}"
        );
    }
}

#[test]
fn evenly_divisible_input_has_no_partial_batch() {
    let names = ["p0.tiff", "p1.tiff", "p2.tiff", "p3.tiff"];
    let input = setup_input(&names, "images");
    let output = tempfile::TempDir::new().unwrap();

    let mut config = BatchConfig::new(
        input.path().to_path_buf(),
        output.path().to_path_buf(),
        ColorMode::Color,
    );
    config.batch_size = 2;
    let summary = BatchRunner::new(config).run().unwrap();

    assert_eq!(summary.processed, 4);
    assert_eq!(summary.batches, 2);
}

#[test]
fn undecodable_image_is_skipped_without_aborting_the_run() {
    let input = setup_input(&["a.tiff", "b.tiff", "d.tiff"], "images");
    fs::write(input.path().join("images").join("c.tiff"), b"not an image").unwrap();
    let output = tempfile::TempDir::new().unwrap();

    let mut config = BatchConfig::new(
        input.path().to_path_buf(),
        output.path().to_path_buf(),
        ColorMode::Color,
    );
    config.batch_size = 2;
    let summary = BatchRunner::new(config).run().unwrap();

    assert_eq!(summary.processed, 3);
    assert_eq!(summary.skipped, 1);
    assert!(output.path().join("processed_a.tiff").is_file());
    assert!(output.path().join("processed_d.tiff").is_file());
    assert!(!output.path().join("processed_c.tiff").exists());
}

#[test]
fn mono_mode_reads_the_mono_subdirectory() {
    let input = setup_input(&["m0.tiff", "m1.tiff"], "images_mono");
    let output = tempfile::TempDir::new().unwrap();

    let config = BatchConfig::new(
        input.path().to_path_buf(),
        output.path().to_path_buf(),
        ColorMode::Mono,
    );
    let summary = BatchRunner::new(config).run().unwrap();

    assert_eq!(summary.processed, 2);
    assert_eq!(summary.batches, 1);
    assert!(output.path().join("processed_m0.tiff").is_file());
}

#[test]
fn both_mode_covers_both_subdirectories() {
    let input = setup_input(&["c0.tiff"], "images");
    fs::create_dir_all(input.path().join("images_mono")).unwrap();
    write_blank_tiff(&input.path().join("images_mono").join("m0.tiff"), 64);
    let output = tempfile::TempDir::new().unwrap();

    let config = BatchConfig::new(
        input.path().to_path_buf(),
        output.path().to_path_buf(),
        ColorMode::Both,
    );
    let summary = BatchRunner::new(config).run().unwrap();

    assert_eq!(summary.processed, 2);
    assert_eq!(summary.batches, 2);
}

#[test]
fn side_artifacts_are_written_when_requested() {
    let input = setup_input(&["p0.tiff"], "images");
    let output = tempfile::TempDir::new().unwrap();

    let mut config = BatchConfig::new(
        input.path().to_path_buf(),
        output.path().to_path_buf(),
        ColorMode::Color,
    );
    config.save_reinforced = true;
    config.write_report = true;
    let summary = BatchRunner::new(config).run().unwrap();

    assert_eq!(summary.processed, 1);
    assert!(output.path().join("processed_p0.tiff").is_file());
    assert!(output.path().join("interestpoint_p0.tiff").is_file());

    let report = fs::read_to_string(output.path().join("p0_rects.json")).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&report).unwrap();
    assert!(parsed.is_array());
}
