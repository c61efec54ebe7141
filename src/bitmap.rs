use std::path::Path;

use image::{GrayImage, ImageReader};
use imageproc::contrast::otsu_level;

use crate::config::{AnalysisConfig, ThresholdMethod};
use crate::error::AnalyzeError;

/// Load a mask layer and binarize it.
///
/// Stone pixels are 255, background pixels are 0.
pub fn load_mask(path: &Path, config: &AnalysisConfig) -> Result<GrayImage, AnalyzeError> {
    let img = ImageReader::open(path)
        .map_err(|e| AnalyzeError::ImageLoad(format!("{}: {}", path.display(), e)))?
        .decode()
        .map_err(|e| AnalyzeError::ImageLoad(format!("{}: {}", path.display(), e)))?
        .into_luma8();

    let threshold = match config.threshold {
        ThresholdMethod::Fixed(t) => t,
        ThresholdMethod::Otsu => otsu_level(&img),
    };

    let mut binary =
        imageproc::contrast::threshold(&img, threshold, imageproc::contrast::ThresholdType::Binary);

    if config.invert {
        for pixel in binary.pixels_mut() {
            pixel.0[0] = 255 - pixel.0[0];
        }
    }

    // Debug: save thresholded mask
    if std::env::var("COURSETRACE_DEBUG_MASK").is_ok() {
        binary.save("debug_mask.png").ok();
        eprintln!("  Debug       saved debug_mask.png");
    }

    Ok(binary)
}
