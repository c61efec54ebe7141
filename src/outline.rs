use image::GrayImage;
use imageproc::contours::{find_contours, BorderType};

use crate::config::AnalysisConfig;

/// A block outline extracted from a binary mask, in pixel coordinates.
#[derive(Debug, Clone)]
pub struct RawOutline {
    /// Points in pixel coordinates (y=0 is top of image).
    pub points: Vec<(f64, f64)>,
}

/// Extract external block outlines from a binary mask.
///
/// Holes are ignored (a stone is a filled blob). Blobs smaller than
/// `min_blob_area` are dropped, and the survivors are ordered left to
/// right by bounding-box x so block ordinals follow reading order.
pub fn extract(gray: &GrayImage, config: &AnalysisConfig) -> Vec<RawOutline> {
    let ip_contours = find_contours::<i32>(gray);

    let mut result: Vec<RawOutline> = ip_contours
        .iter()
        .filter(|contour| contour.border_type == BorderType::Outer)
        .filter(|contour| contour.points.len() >= 3)
        .map(|contour| RawOutline {
            points: contour.points.iter().map(|p| (p.x as f64, p.y as f64)).collect(),
        })
        .collect();

    // Filter by minimum area
    result.retain(|outline| polygon_area(&outline.points).abs() > config.min_blob_area);

    result.sort_by(|a, b| left_edge(&a.points).total_cmp(&left_edge(&b.points)));

    result
}

/// Leftmost x of an outline (bounding-box left edge).
fn left_edge(points: &[(f64, f64)]) -> f64 {
    points.iter().map(|p| p.0).fold(f64::INFINITY, f64::min)
}

/// Signed area via shoelace formula. Positive = CCW, negative = CW.
fn polygon_area(points: &[(f64, f64)]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    (0..n)
        .map(|i| {
            let j = (i + 1) % n;
            points[i].0 * points[j].1 - points[j].0 * points[i].1
        })
        .sum::<f64>()
        / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    fn fill(img: &mut GrayImage, x0: u32, y0: u32, w: u32, h: u32) {
        for y in y0..y0 + h {
            for x in x0..x0 + w {
                img.put_pixel(x, y, Luma([255u8]));
            }
        }
    }

    #[test]
    fn blobs_sorted_left_to_right_and_speckles_dropped() {
        let mut img = GrayImage::new(40, 20);
        // Right blob first in raster order terms, left second, plus a speckle.
        fill(&mut img, 24, 4, 8, 8);
        fill(&mut img, 4, 4, 8, 8);
        img.put_pixel(18, 10, Luma([255u8]));

        let config = AnalysisConfig {
            min_blob_area: 5.0,
            ..AnalysisConfig::default()
        };
        let outlines = extract(&img, &config);

        assert_eq!(outlines.len(), 2);
        assert!(left_edge(&outlines[0].points) < left_edge(&outlines[1].points));
    }

    #[test]
    fn empty_mask_yields_no_outlines() {
        let img = GrayImage::new(16, 16);
        let outlines = extract(&img, &AnalysisConfig::default());
        assert!(outlines.is_empty());
    }
}
