//! coursetrace: stacked-masonry block outlines, classified by course.
//!
//! Takes a structure of course groups (one directory per course, one
//! white-on-black mask image per layer), extracts each stone's outline,
//! and classifies every block by geometric properties: the four corner
//! points, edge angles, width relative to the course average, whether it
//! sits at a structural corner, and whether it is offloaded (no joint
//! from the course beneath falls under its span).
//!
//! # Example
//!
//! ```no_run
//! use coursetrace::{analyze, AnalysisConfig};
//! use std::path::Path;
//!
//! let config = AnalysisConfig::default();
//! let analysis = analyze(Path::new("structures/north_face"), &config)?;
//! // analysis.report.blocks holds one record per classified block
//! # Ok::<(), coursetrace::AnalyzeError>(())
//! ```

#![forbid(unsafe_code)]

mod bitmap;
mod config;
mod outline;
mod simplify;

pub mod classify;
pub mod error;
pub mod report;
pub mod structure;
pub mod svg;

// Re-export kurbo so downstream users get the same version used by
// block outlines (Vec<kurbo::Point>).
pub use kurbo;

pub use classify::{classify, BlockClassification, ClassificationReport};
pub use config::{AnalysisConfig, ThresholdMethod};
pub use error::AnalyzeError;

use std::path::Path;
use std::time::Instant;

/// The result of one analysis run: the loaded structure and everything
/// classification produced for it.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub structure: structure::Structure,
    pub report: ClassificationReport,
}

/// Full pipeline: structure directory → classified blocks.
///
/// Pipeline: mask loading and thresholding, external-outline extraction
/// with perimeter-relative simplification, then the sequential
/// course-by-course classification pass.
pub fn analyze(dir: &Path, config: &AnalysisConfig) -> Result<Analysis, AnalyzeError> {
    let t_start = Instant::now();

    // ── Load & trace ──────────────────────────────────────
    let structure = structure::load(dir, config)?;
    eprintln!(
        "  Load        {} courses, {} blocks  ({}x{} px)",
        structure.group_count(),
        structure.block_count(),
        structure.width,
        structure.height,
    );

    // ── Classify ──────────────────────────────────────────
    let report = classify::classify(&structure);
    let n_corner = report.blocks.iter().filter(|b| b.record.is_corner).count();
    let n_offloaded = report
        .blocks
        .iter()
        .filter(|b| b.record.is_offloaded)
        .count();
    let elapsed = t_start.elapsed().as_millis();
    eprintln!(
        "  Classify    {} blocks ({} corner, {} offloaded, {} skipped)  ({}ms)",
        report.blocks.len(),
        n_corner,
        n_offloaded,
        report.skipped.len(),
        elapsed,
    );
    for skip in &report.skipped {
        eprintln!(
            "  Skip        course {} block {}: {}",
            skip.course, skip.name, skip.reason
        );
    }

    Ok(Analysis { structure, report })
}
