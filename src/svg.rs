//! SVG output with classification attributes.
//!
//! One `<g>` per block holding a single `<path>`, ids built as
//! `{structure}_{course}_{ordinal}` so a path can be found again by its
//! course and position. The classification record is written onto the
//! path as plain attributes, and `pointer-events="all"` makes every path
//! individually selectable.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use crate::classify::{ClassificationReport, ClassifiedBlock};
use crate::error::AnalyzeError;
use crate::structure::Structure;

/// Render the classified structure as an SVG document.
pub fn render(structure: &Structure, report: &ClassificationReport) -> String {
    let mut svg = String::new();
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = structure.width,
        h = structure.height,
    );
    for block in &report.blocks {
        push_block(&mut svg, &structure.name, block);
    }
    svg.push_str("</svg>\n");
    svg
}

/// Render and write the document to `path`.
pub fn write(
    path: &Path,
    structure: &Structure,
    report: &ClassificationReport,
) -> Result<(), AnalyzeError> {
    fs::write(path, render(structure, report))?;
    Ok(())
}

fn push_block(svg: &mut String, structure_name: &str, block: &ClassifiedBlock) {
    let r = &block.record;
    let id = format!("{}_{}_{}", structure_name, r.course, r.ordinal);
    let _ = writeln!(svg, r#"  <g id="{}" pointer-events="all">"#, id);
    let _ = writeln!(
        svg,
        concat!(
            r#"    <path id="path_{id}" d="{d}" stroke="black" fill="none" pointer-events="all""#,
            r#" top_left_x="{tlx}" top_right_x="{trx}" bottom_left_x="{blx}" bottom_right_x="{brx}""#,
            r#" Width="{width}" WidthPctCrse="{pct:.2}""#,
            r#" angle_top="{at}" angle_bottom="{ab}" angle_left="{al}" angle_right="{ar}""#,
            r#" Course="{course}" IsCorner="{corner}" IsOffloaded="{offloaded}"/>"#,
        ),
        id = id,
        d = path_data(&block.outline),
        tlx = r.top_left_x,
        trx = r.top_right_x,
        blx = r.bottom_left_x,
        brx = r.bottom_right_x,
        width = r.width,
        pct = r.width_pct_course,
        at = r.angle_top,
        ab = r.angle_bottom,
        al = r.angle_left,
        ar = r.angle_right,
        course = r.course,
        corner = r.is_corner,
        offloaded = r.is_offloaded,
    );
    svg.push_str("  </g>\n");
}

/// Closed path data for an outline: `M x,y L x,y ... Z`.
fn path_data(outline: &[kurbo::Point]) -> String {
    let mut d = String::new();
    for (i, p) in outline.iter().enumerate() {
        let command = if i == 0 { 'M' } else { 'L' };
        let _ = write!(d, "{}{},{} ", command, p.x, p.y);
    }
    d.push('Z');
    d
}
