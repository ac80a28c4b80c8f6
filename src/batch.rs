//! Batch orchestration: enumerate source images, process them in fixed-size
//! batches, write annotated outputs, release each batch before the next.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use image::{DynamicImage, ImageReader, RgbImage};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::annotate;
use crate::config::{BatchConfig, ColorMode, DetectorConfig};
use crate::detection::RectangleDetector;

/// Seed for the annotation color generator; fixed so runs are reproducible.
const COLOR_SEED: u64 = 12345;

/// Subdirectory naming convention for the two color modes.
const COLOR_SUBDIR: &str = "images";
const MONO_SUBDIR: &str = "images_mono";

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BatchSummary {
    /// Images fully processed and written.
    pub processed: usize,
    /// Slots abandoned by decode or write failures.
    pub skipped: usize,
    /// Batches flushed, partial final batches included.
    pub batches: usize,
}

pub struct BatchRunner {
    config: BatchConfig,
}

impl BatchRunner {
    pub fn new(config: BatchConfig) -> Self {
        Self { config }
    }

    /// Process every source image once. Per-image failures are reported and
    /// skipped; only configuration-level failures (unusable output directory)
    /// abort the run.
    pub fn run(&self) -> Result<BatchSummary> {
        fs::create_dir_all(&self.config.output_dir).with_context(|| {
            format!(
                "creating output directory {}",
                self.config.output_dir.display()
            )
        })?;

        let mut summary = BatchSummary::default();
        match self.config.mode {
            ColorMode::Color => {
                self.run_profile(DetectorConfig::color(), COLOR_SUBDIR, &mut summary)?;
            }
            ColorMode::Mono => {
                self.run_profile(DetectorConfig::mono(), MONO_SUBDIR, &mut summary)?;
            }
            ColorMode::Both => {
                self.run_profile(DetectorConfig::color(), COLOR_SUBDIR, &mut summary)?;
                self.run_profile(DetectorConfig::mono(), MONO_SUBDIR, &mut summary)?;
            }
        }
        Ok(summary)
    }

    fn run_profile(
        &self,
        profile: DetectorConfig,
        subdir: &str,
        summary: &mut BatchSummary,
    ) -> Result<()> {
        let dir = self.config.input_dir.join(subdir);
        let files = enumerate_images(&dir, &self.config.extension)?;
        if self.config.verbose {
            println!("{}: {} source file(s)", dir.display(), files.len());
        }

        let detector = RectangleDetector::new(profile).with_verbose(self.config.verbose);
        let mut rng = StdRng::seed_from_u64(COLOR_SEED);
        let mut batch: Vec<(PathBuf, RgbImage)> = Vec::with_capacity(self.config.batch_size);

        for (index, path) in files.iter().enumerate() {
            match load_image(path) {
                Ok(img) => batch.push((path.clone(), detector.prepare(&img))),
                Err(err) => {
                    eprintln!("skipping {}: {:#}", path.display(), err);
                    summary.skipped += 1;
                }
            }

            let source_exhausted = index + 1 == files.len();
            if batch.len() == self.config.batch_size || source_exhausted {
                if batch.is_empty() {
                    continue;
                }
                self.process_batch(&detector, &mut rng, &batch, summary);
                summary.batches += 1;
                // release the batch's image memory before the next batch
                batch.clear();
            }
        }

        Ok(())
    }

    fn process_batch(
        &self,
        detector: &RectangleDetector,
        rng: &mut StdRng,
        batch: &[(PathBuf, RgbImage)],
        summary: &mut BatchSummary,
    ) {
        for (path, frame) in batch {
            match self.process_image(detector, rng, path, frame) {
                Ok(count) => {
                    summary.processed += 1;
                    if self.config.verbose {
                        println!("{}: {} rectangle(s)", path.display(), count);
                    }
                }
                Err(err) => {
                    eprintln!("failed on {}: {:#}", path.display(), err);
                    summary.skipped += 1;
                }
            }
        }
    }

    fn process_image(
        &self,
        detector: &RectangleDetector,
        rng: &mut StdRng,
        path: &Path,
        frame: &RgbImage,
    ) -> Result<usize> {
        let detection = detector.detect(frame, rng);

        let mut annotated = frame.clone();
        annotate::annotate(&mut annotated, &detection.survivors, rng, true);

        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .context("source file name is not valid UTF-8")?;

        let out = self.config.output_dir.join(format!("processed_{name}"));
        annotated
            .save(&out)
            .with_context(|| format!("writing {}", out.display()))?;

        if self.config.save_reinforced {
            let out = self.config.output_dir.join(format!("interestpoint_{name}"));
            detection
                .reinforced
                .save(&out)
                .with_context(|| format!("writing {}", out.display()))?;
        }

        if self.config.write_report {
            let stem = path
                .file_stem()
                .and_then(|s| s.to_str())
                .context("source file name is not valid UTF-8")?;
            let out = self.config.output_dir.join(format!("{stem}_rects.json"));
            let json = serde_json::to_string_pretty(&annotate::report(&detection.survivors))?;
            fs::write(&out, json).with_context(|| format!("writing {}", out.display()))?;
        }

        Ok(detection.survivors.len())
    }
}

/// Source files with the configured extension, lexicographically sorted for
/// deterministic batching. A missing subdirectory is an empty source, not an
/// error.
pub fn enumerate_images(dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }
    let mut files: Vec<PathBuf> = fs::read_dir(dir)
        .with_context(|| format!("reading {}", dir.display()))?
        .filter_map(|entry| {
            let path = entry.ok()?.path();
            let ext = path.extension()?.to_str()?;
            (path.is_file() && ext.eq_ignore_ascii_case(extension)).then_some(path)
        })
        .collect();
    files.sort();
    Ok(files)
}

fn load_image(path: &Path) -> Result<DynamicImage> {
    let img = ImageReader::open(path)
        .with_context(|| format!("opening {}", path.display()))?
        .decode()
        .with_context(|| format!("decoding {}", path.display()))?;
    Ok(img)
}
