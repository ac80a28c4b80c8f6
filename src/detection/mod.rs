pub mod corners;
pub mod filter;
pub mod preprocessing;
pub mod rectangles;
pub mod reinforce;

use image::{DynamicImage, RgbImage};
use rand::rngs::StdRng;

use crate::config::DetectorConfig;
use crate::models::Detection;

/// Per-image rectangle-localization pipeline.
///
/// Each stage hands a fresh map to the next one; nothing is mutated in place
/// across stages, and nothing persists between images.
pub struct RectangleDetector {
    config: DetectorConfig,
    verbose: bool,
}

impl RectangleDetector {
    pub fn new(config: DetectorConfig) -> Self {
        Self {
            config,
            verbose: false,
        }
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// Load-time frame preparation: gamma and contrast remap (mono profile
    /// only), then black padding rows top and bottom. The returned frame is
    /// what annotation later draws on.
    pub fn prepare(&self, img: &DynamicImage) -> RgbImage {
        let mut frame = img.to_rgb8();
        if let Some(gamma) = self.config.gamma {
            frame = preprocessing::gamma_correct(&frame, gamma);
        }
        if let Some((gain, bias)) = self.config.contrast {
            frame = preprocessing::adjust_contrast(&frame, gain, bias);
        }
        preprocessing::pad_vertical(&frame, self.config.pad_fraction)
    }

    /// Run the full pipeline on a prepared frame. The random generator only
    /// picks marker intensities, never detection decisions.
    pub fn detect(&self, frame: &RgbImage, rng: &mut StdRng) -> Detection {
        let (width, height) = frame.dimensions();

        if self.verbose {
            println!("Preprocessing {}x{} frame...", width, height);
        }
        let gray = preprocessing::grayscale(frame);
        let blurred = preprocessing::apply_blur(&gray, self.config.blur_sigma);
        let edges =
            preprocessing::detect_edges(&blurred, self.config.canny_low, self.config.canny_high);

        if self.verbose {
            println!("Computing corner response...");
        }
        let response = corners::corner_response(&edges, self.config.block_size, self.config.harris_k);

        if self.verbose {
            println!("Reinforcing corner maxima...");
        }
        let reinforced = reinforce::reinforce(&edges, &response, &self.config, rng);

        let candidates = rectangles::extract_candidates(&reinforced);
        if self.verbose {
            println!("Found {} candidate rectangle(s)", candidates.len());
        }

        let survivors = filter::select(&candidates, width, height, &self.config.filter);
        if self.verbose {
            println!(
                "Kept {} rectangle(s) after classification and deduplication",
                survivors.len()
            );
        }

        Detection {
            survivors,
            reinforced,
        }
    }
}
