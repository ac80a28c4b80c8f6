//! # panelmark
//!
//! Batch rectangle localization for photographs of physical objects.
//!
//! This library finds rectangular target regions (framed panels, chips on a
//! background) by:
//! - Building edge and corner-response maps from a prepared frame
//! - Reinforcing locally maximal corner responses into solid markers that
//!   close contours the raw edge map leaves open
//! - Fitting a minimum-area rotated rectangle to every traced contour
//! - Selecting the plausible rectangles by size/position and removing
//!   overlapping duplicates
//!
//! ## Example
//!
//! ```rust,no_run
//! use panelmark::{DetectorConfig, RectangleDetector};
//! use rand::{SeedableRng, rngs::StdRng};
//!
//! let img = image::open("photo.tiff")?;
//! let detector = RectangleDetector::new(DetectorConfig::color());
//! let frame = detector.prepare(&img);
//! let mut rng = StdRng::seed_from_u64(12345);
//! let detection = detector.detect(&frame, &mut rng);
//! println!("{} rectangle(s) found", detection.survivors.len());
//! # Ok::<(), image::ImageError>(())
//! ```

pub mod annotate;
pub mod batch;
pub mod config;
pub mod detection;
pub mod models;

pub use batch::{BatchRunner, BatchSummary};
pub use config::{BatchConfig, ColorMode, DetectorConfig, EdgeRule, FilterConfig};
pub use detection::RectangleDetector;
pub use models::{CornerResponseMap, Detection, RotatedRect};
