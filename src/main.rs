use clap::Parser;
use coursetrace::{AnalysisConfig, ThresholdMethod};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "coursetrace",
    about = "Classify stacked masonry block outlines by course"
)]
struct Cli {
    /// Structure directory (one subdirectory per course, mask images inside)
    #[arg(short, long)]
    input: PathBuf,

    /// Output SVG path
    #[arg(short, long)]
    output: PathBuf,

    /// JSON report path (skipped if omitted)
    #[arg(short, long)]
    report: Option<PathBuf>,

    /// Fixed brightness threshold (0-255) for mask binarization
    #[arg(long, default_value = "254")]
    threshold: u8,

    /// Use Otsu auto-thresholding instead of the fixed threshold
    #[arg(long)]
    otsu: bool,

    /// Invert masks after thresholding
    #[arg(long)]
    invert: bool,

    /// Minimum blob area in pixels
    #[arg(long, default_value = "100")]
    min_area: f64,

    /// Outline simplification epsilon, as a fraction of perimeter
    #[arg(long, default_value = "0.01")]
    epsilon: f64,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = AnalysisConfig {
        threshold: if cli.otsu {
            ThresholdMethod::Otsu
        } else {
            ThresholdMethod::Fixed(cli.threshold)
        },
        invert: cli.invert,
        min_blob_area: cli.min_area,
        epsilon_frac: cli.epsilon,
    };

    // Header
    eprintln!();
    eprintln!("  coursetrace \u{00b7} {}", cli.input.display());
    eprintln!();

    // Pipeline (lib prints step-by-step progress to stderr)
    let analysis = coursetrace::analyze(&cli.input, &config)?;

    coursetrace::svg::write(&cli.output, &analysis.structure, &analysis.report)?;
    eprintln!("  \u{2713} {}", cli.output.display());

    if let Some(report_path) = &cli.report {
        let run = coursetrace::report::build(&analysis.structure, &analysis.report);
        coursetrace::report::write_json(report_path, &run)?;
        eprintln!("  \u{2713} {}", report_path.display());
    }

    eprintln!();

    Ok(())
}
