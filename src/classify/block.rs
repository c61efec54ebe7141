//! Per-block classification: combines corner recovery, edge angles, and
//! the running course state into one output record.

use kurbo::Point;
use serde::Serialize;

use super::context::ClassificationContext;
use super::corners::{self, SkipReason};

/// The classification record emitted for one block.
#[derive(Debug, Clone, Serialize)]
pub struct BlockClassification {
    pub course: u32,
    /// 1-based position within the course, in traversal order.
    pub ordinal: u32,
    pub top_left_x: f64,
    pub top_right_x: f64,
    pub bottom_left_x: f64,
    pub bottom_right_x: f64,
    /// Bottom-edge width. Negative when the corner heuristic swaps the
    /// bottom corners on a skewed outline; reported as-is.
    pub width: f64,
    /// Width as a percentage of the course's running average width at the
    /// time this block was classified.
    pub width_pct_course: f64,
    pub angle_top: i32,
    pub angle_bottom: i32,
    pub angle_left: i32,
    pub angle_right: i32,
    /// Block touches both the whole structure's extreme horizontal bound
    /// and its own course's extreme bound.
    pub is_corner: bool,
    /// Block lacks a joint from the course beneath it under its span,
    /// while that course does reach the span.
    pub is_offloaded: bool,
}

/// Classify one block and fold it into the running state.
///
/// The steps run in a fixed order: the aggregator absorbs the block
/// before the width percentage is computed (so the running average
/// includes it), the offload check reads the previous course's frozen
/// bottom row, and the corner check reads the extents after this block
/// has widened them.
pub fn classify_block(
    outline: &[Point],
    course: u32,
    ctx: &mut ClassificationContext,
) -> Result<BlockClassification, SkipReason> {
    let c = corners::estimate(outline)?;

    let min_x = c.bottom_left.x;
    let max_x = c.bottom_right.x;
    let width = max_x - min_x;

    let angle_top = corners::edge_angle(c.top_left, c.top_right).round() as i32;
    let angle_bottom = corners::edge_angle(c.bottom_left, c.bottom_right).round() as i32;
    let angle_left = corners::edge_angle(c.top_left, c.bottom_left).round() as i32;
    let angle_right = corners::edge_angle(c.top_right, c.bottom_right).round() as i32;

    let ordinal = ctx.record_block(course, &c);

    let average = ctx.average_width(course);
    let width_pct_course = if average > 0.0 {
        width / average * 100.0
    } else {
        0.0
    };

    let is_offloaded = offloaded(ctx, min_x, max_x);

    ctx.update_global_extent(min_x, max_x);
    let is_corner =
        ctx.touches_global_extent(min_x, max_x) && ctx.touches_course_extent(course, min_x, max_x);

    Ok(BlockClassification {
        course,
        ordinal,
        top_left_x: c.top_left.x,
        top_right_x: c.top_right.x,
        bottom_left_x: c.bottom_left.x,
        bottom_right_x: c.bottom_right.x,
        width,
        width_pct_course,
        angle_top,
        angle_bottom,
        angle_left,
        angle_right,
        is_corner,
        is_offloaded,
    })
}

/// Decide whether a block lacks support from the course beneath it.
///
/// A block is offloaded when the course below reaches its span but no
/// joint (interval endpoint) from that course falls within the span.
/// When nothing below overlaps the span at all (the first course, or a
/// gap in the record beneath), the block is not flagged.
fn offloaded(ctx: &ClassificationContext, min_x: f64, max_x: f64) -> bool {
    let mut is_offloaded = true;
    for (left, right) in ctx.previous_bottom_row() {
        if (min_x <= left && left <= max_x) || (min_x <= right && right <= max_x) {
            is_offloaded = false;
            break;
        }
    }

    if !ctx
        .previous_bottom_row()
        .any(|(left, right)| left <= max_x && right >= min_x)
    {
        is_offloaded = false;
    }

    is_offloaded
}
