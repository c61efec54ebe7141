/// All analysis parameters in one struct.
/// Designed to be adjustable from the CLI without touching the pipeline.
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    // -- Mask stage --
    /// Threshold method for binarizing mask layers.
    pub threshold: ThresholdMethod,
    /// If true, invert each mask after thresholding (for masks that paint
    /// stones dark on a light background).
    pub invert: bool,

    // -- Outline stage --
    /// Minimum blob area in pixels (filter speckles).
    pub min_blob_area: f64,
    /// Outline simplification epsilon, as a fraction of the outline
    /// perimeter. 0.01 keeps near-quadrilateral stones at 4-8 vertices.
    pub epsilon_frac: f64,
}

/// Threshold method for converting a grayscale mask to binary.
#[derive(Debug, Clone, Copy)]
pub enum ThresholdMethod {
    /// Fixed brightness threshold (0-255).
    Fixed(u8),
    /// Otsu's method (automatic).
    Otsu,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            // Mask layers paint stones near-white; keep only pixels above 254.
            threshold: ThresholdMethod::Fixed(254),
            invert: false,
            min_blob_area: 100.0,
            epsilon_frac: 0.01,
        }
    }
}
