use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use panelmark::{BatchConfig, BatchRunner, ColorMode};

/// Invalid batch size on the command line.
const EXIT_BAD_BATCH_SIZE: u8 = 3;

#[derive(Parser)]
#[command(name = "panelmark")]
#[command(about = "Locate and annotate rectangular target regions in batches of photographs")]
struct Cli {
    /// Which images to process: color, mono, or both
    #[arg(value_enum)]
    mode: ColorMode,

    /// Directory holding the images/ and images_mono/ subdirectories
    #[arg(value_name = "INPUT_DIR")]
    input_dir: PathBuf,

    /// Directory the annotated images are written to
    #[arg(value_name = "OUTPUT_DIR")]
    output_dir: PathBuf,

    /// Number of images resident in memory at once
    #[arg(short, long, default_value_t = 4)]
    batch_size: i64,

    /// Source file extension
    #[arg(long, default_value = "tiff")]
    extension: String,

    /// Also write the reinforced edge map as interestpoint_<name>
    #[arg(long)]
    save_reinforced: bool,

    /// Also write a JSON sidecar with corner coordinates, angle and size
    #[arg(long)]
    report: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Cli::parse();

    if args.batch_size < 1 {
        eprintln!("invalid batch size: {}", args.batch_size);
        return ExitCode::from(EXIT_BAD_BATCH_SIZE);
    }

    let mut config = BatchConfig::new(args.input_dir, args.output_dir, args.mode);
    config.batch_size = args.batch_size as usize;
    config.extension = args.extension;
    config.save_reinforced = args.save_reinforced;
    config.write_report = args.report;
    config.verbose = args.verbose;

    match BatchRunner::new(config).run() {
        Ok(summary) => {
            println!(
                "processed {} image(s) in {} batch(es), {} skipped",
                summary.processed, summary.batches, summary.skipped
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
