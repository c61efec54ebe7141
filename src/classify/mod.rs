//! Course-aware block classification.
//!
//! Walks a structure's course groups in numeric order and classifies
//! every block against running state carried across courses: per-course
//! width statistics and horizontal extent, the whole-structure extent,
//! and the bottom-edge intervals of the course below. All of it is
//! ordinal: courses must be visited exactly once, in sequence, with
//! blocks fed in one canonical order.

mod block;
mod context;
mod corners;

pub use block::{classify_block, BlockClassification};
pub use context::{ClassificationContext, CourseStats};
pub use corners::{edge_angle, estimate as estimate_corners, Corners, SkipReason};

use kurbo::Point;

use crate::structure::{numeric_key, CourseGroup, Structure};

/// One successfully classified block, with the outline it came from.
#[derive(Debug, Clone)]
pub struct ClassifiedBlock {
    pub name: String,
    pub outline: Vec<Point>,
    pub record: BlockClassification,
}

/// Notice for a block that was skipped instead of classified.
#[derive(Debug, Clone)]
pub struct SkippedBlock {
    pub course: u32,
    pub name: String,
    pub reason: SkipReason,
}

/// Everything one classification run produces.
#[derive(Debug, Clone, Default)]
pub struct ClassificationReport {
    pub blocks: Vec<ClassifiedBlock>,
    pub skipped: Vec<SkippedBlock>,
}

impl ClassificationReport {
    /// Highest course number seen, classified or skipped.
    pub fn course_count(&self) -> u32 {
        self.blocks
            .iter()
            .map(|b| b.record.course)
            .chain(self.skipped.iter().map(|s| s.course))
            .max()
            .unwrap_or(0)
    }
}

/// Classify every block in the structure.
///
/// Courses take their numbers from group entry order: groups sort by the
/// numeric part of their names (non-numeric names sort as zero, ties keep
/// input order), and every group, nested subgroups included, takes the
/// next number from a counter that is never reused. Each course is closed
/// with `end_course` before the next one's first block is recorded, which
/// hands its bottom row to the offload checks one course up.
pub fn classify(structure: &Structure) -> ClassificationReport {
    let mut ctx = ClassificationContext::new();
    let mut report = ClassificationReport::default();

    let mut courses = Vec::new();
    flatten(&structure.groups, &mut courses);

    for (course, group) in courses {
        ctx.begin_course(course);
        for block in &group.blocks {
            match classify_block(&block.outline, course, &mut ctx) {
                Ok(record) => report.blocks.push(ClassifiedBlock {
                    name: block.name.clone(),
                    outline: block.outline.clone(),
                    record,
                }),
                Err(reason) => report.skipped.push(SkippedBlock {
                    course,
                    name: block.name.clone(),
                    reason,
                }),
            }
        }
        ctx.end_course(course);

        if std::env::var("COURSETRACE_DEBUG_ROWS").is_ok() {
            let row: Vec<_> = ctx.previous_bottom_row().collect();
            eprintln!("  Debug       course {} bottom row: {:?}", course, row);
        }
    }

    report
}

/// Flatten the group forest into (course number, group) pairs in
/// traversal order. Every group pushes its own entry before its
/// subgroups recurse, so numbers follow depth-first entry order.
fn flatten<'a>(groups: &'a [CourseGroup], out: &mut Vec<(u32, &'a CourseGroup)>) {
    let mut sorted: Vec<&CourseGroup> = groups.iter().collect();
    sorted.sort_by_key(|g| numeric_key(&g.name));
    for group in sorted {
        out.push((out.len() as u32 + 1, group));
        flatten(&group.subgroups, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structure::Block;

    fn rect(left: f64, right: f64, top: f64, bottom: f64) -> Vec<Point> {
        vec![
            Point::new(left, top),
            Point::new(right, top),
            Point::new(right, bottom),
            Point::new(left, bottom),
        ]
    }

    fn group(name: &str, spans: &[(f64, f64)], y: f64) -> CourseGroup {
        CourseGroup {
            name: name.to_string(),
            blocks: spans
                .iter()
                .enumerate()
                .map(|(i, &(left, right))| Block {
                    name: format!("{}_{}", name, i + 1),
                    outline: rect(left, right, y, y + 10.0),
                })
                .collect(),
            subgroups: vec![],
        }
    }

    fn structure(groups: Vec<CourseGroup>) -> Structure {
        Structure {
            name: "test".to_string(),
            groups,
            width: 200,
            height: 200,
        }
    }

    #[test]
    fn groups_are_visited_in_numeric_order() {
        // Numeric sort, not lexicographic: 2 before 10.
        let s = structure(vec![
            group("course 10", &[(0.0, 10.0)], 0.0),
            group("course 2", &[(0.0, 10.0)], 10.0),
        ]);
        let report = classify(&s);
        assert_eq!(report.blocks[0].name, "course 2_1");
        assert_eq!(report.blocks[0].record.course, 1);
        assert_eq!(report.blocks[1].name, "course 10_1");
        assert_eq!(report.blocks[1].record.course, 2);
    }

    #[test]
    fn nested_groups_take_their_own_course_number() {
        let mut parent = group("1", &[(0.0, 50.0)], 20.0);
        parent.subgroups.push(group("2", &[(0.0, 20.0)], 10.0));
        let s = structure(vec![parent, group("3", &[(0.0, 40.0)], 0.0)]);

        let report = classify(&s);
        let courses: Vec<u32> = report.blocks.iter().map(|b| b.record.course).collect();
        assert_eq!(courses, vec![1, 2, 3]);
    }

    #[test]
    fn skipped_blocks_do_not_consume_ordinals() {
        let mut g = group("1", &[(0.0, 10.0)], 0.0);
        g.blocks.insert(
            0,
            Block {
                name: "broken".to_string(),
                outline: vec![],
            },
        );
        let report = classify(&structure(vec![g]));

        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].name, "broken");
        assert_eq!(report.skipped[0].reason, SkipReason::InvalidPolygon);
        assert_eq!(report.blocks.len(), 1);
        assert_eq!(report.blocks[0].record.ordinal, 1);
    }

    #[test]
    fn bottom_row_handoff_spans_exactly_one_course() {
        // Course 1 is wide, course 2 is empty, course 3 sits where course
        // 1 was. Course 3 must see course 2's (empty) row, not course 1's.
        let s = structure(vec![
            group("1", &[(10.0, 90.0)], 20.0),
            group("2", &[], 10.0),
            group("3", &[(30.0, 50.0)], 0.0),
        ]);
        let report = classify(&s);
        let block3 = report
            .blocks
            .iter()
            .find(|b| b.record.course == 3)
            .unwrap();
        // Nothing in the (empty) course below overlaps, so not offloaded.
        assert!(!block3.record.is_offloaded);
    }
}
