use std::path::PathBuf;

use clap::ValueEnum;

/// Which of the two fixed input subdirectories to process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// `images/` only.
    Color,
    /// `images_mono/` only, with gamma and contrast adjustment at load time.
    Mono,
    /// Both subdirectories, color first.
    Both,
}

/// How the per-axis near-border checks of the position test are combined.
///
/// Both combinations exist in observed behavior; the choice is configuration,
/// not a separate codepath.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeRule {
    /// Center must be near the border on both axes (corner region).
    Both,
    /// Center near the border on either axis qualifies.
    Either,
}

/// Thresholds for candidate classification and overlap deduplication.
#[derive(Debug, Clone)]
pub struct FilterConfig {
    /// Absolute-area band, exclusive on both ends.
    pub band_min: f32,
    pub band_max: f32,
    /// Lower area bound for the position test.
    pub edge_min_area: f32,
    /// Distance from an image edge within which a center counts as "near".
    pub edge_margin: f32,
    pub edge_rule: EdgeRule,
    /// Two candidates closer than this are dedup suspects.
    pub dedup_center_margin: f32,
    /// Suspects with a larger/smaller area ratio under this are the same object.
    pub dedup_area_ratio: f32,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            band_min: 300_000.0,
            band_max: 9_000_000.0,
            edge_min_area: 200_000.0,
            edge_margin: 300.0,
            edge_rule: EdgeRule::Both,
            dedup_center_margin: 300.0,
            dedup_area_ratio: 1.25,
        }
    }
}

/// All per-image pipeline parameters, passed explicitly into each stage.
#[derive(Debug, Clone)]
pub struct DetectorConfig {
    /// Fraction of the image height added as black border rows top and bottom.
    pub pad_fraction: f32,
    pub blur_sigma: f32,
    pub canny_low: f32,
    pub canny_high: f32,
    /// Gamma remap applied at load time; mono profile only.
    pub gamma: Option<f32>,
    /// Linear contrast remap `(gain, bias)` applied after gamma; mono only.
    pub contrast: Option<(f32, f32)>,
    /// Structure-tensor window side length for the corner response.
    pub block_size: u32,
    /// Harris sensitivity constant.
    pub harris_k: f32,
    /// Reinforcement fires for responses above this, on the 0-255 scale.
    pub response_threshold: i32,
    /// Half side of the square local-maximum search window.
    pub search_radius: u32,
    /// Radius of the filled disc drawn at each local maximum.
    pub disc_radius: u32,
    pub filter: FilterConfig,
}

impl DetectorConfig {
    /// Profile for color inputs.
    pub fn color() -> Self {
        Self {
            pad_fraction: 0.01,
            blur_sigma: 3.0,
            canny_low: 25.0,
            canny_high: 90.0,
            gamma: None,
            contrast: None,
            block_size: 5,
            harris_k: 0.06,
            response_threshold: 80,
            search_radius: 60,
            disc_radius: 35,
            filter: FilterConfig::default(),
        }
    }

    /// Profile for monochrome inputs: the same pipeline, plus gamma and
    /// contrast adjustment before anything else sees the frame.
    pub fn mono() -> Self {
        Self {
            gamma: Some(2.2),
            contrast: Some((1.7, 10.0)),
            ..Self::color()
        }
    }
}

/// Batch-run parameters: where to read, where to write, how many images are
/// resident at once.
#[derive(Debug, Clone)]
pub struct BatchConfig {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub mode: ColorMode,
    pub batch_size: usize,
    /// Source file extension, matched case-insensitively.
    pub extension: String,
    /// Also write the reinforced edge map as `interestpoint_<name>`.
    pub save_reinforced: bool,
    /// Also write a JSON sidecar with each survivor's corners, angle and size.
    pub write_report: bool,
    pub verbose: bool,
}

impl BatchConfig {
    pub fn new(input_dir: PathBuf, output_dir: PathBuf, mode: ColorMode) -> Self {
        Self {
            input_dir,
            output_dir,
            mode,
            batch_size: 4,
            extension: "tiff".to_string(),
            save_reinforced: false,
            write_report: false,
            verbose: false,
        }
    }
}
