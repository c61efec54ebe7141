//! Machine-readable run report.
//!
//! The JSON side of the output: every classification record keyed by
//! course and ordinal, plus a notice for each block that was skipped, so
//! callers can merge attributes or surface failures without parsing the
//! SVG back.

use std::fs;
use std::io::BufWriter;
use std::path::Path;

use serde::Serialize;

use crate::classify::{BlockClassification, ClassificationReport};
use crate::error::AnalyzeError;
use crate::structure::Structure;

/// Serializable view over one run's results.
#[derive(Debug, Serialize)]
pub struct RunReport<'a> {
    pub structure: &'a str,
    pub courses: u32,
    pub blocks: Vec<&'a BlockClassification>,
    pub skipped: Vec<SkipNotice<'a>>,
}

/// One skipped block, with a human-readable reason.
#[derive(Debug, Serialize)]
pub struct SkipNotice<'a> {
    pub course: u32,
    pub block: &'a str,
    pub reason: String,
}

/// Assemble the report view for a finished run.
pub fn build<'a>(structure: &'a Structure, report: &'a ClassificationReport) -> RunReport<'a> {
    RunReport {
        structure: &structure.name,
        courses: report.course_count(),
        blocks: report.blocks.iter().map(|b| &b.record).collect(),
        skipped: report
            .skipped
            .iter()
            .map(|s| SkipNotice {
                course: s.course,
                block: &s.name,
                reason: s.reason.to_string(),
            })
            .collect(),
    }
}

/// Write the report as pretty-printed JSON.
pub fn write_json(path: &Path, report: &RunReport<'_>) -> Result<(), AnalyzeError> {
    let file = fs::File::create(path)?;
    serde_json::to_writer_pretty(BufWriter::new(file), report)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::classify;
    use crate::structure::{Block, CourseGroup};
    use kurbo::Point;

    #[test]
    fn report_includes_records_and_skips() {
        let structure = Structure {
            name: "face".to_string(),
            groups: vec![CourseGroup {
                name: "1".to_string(),
                blocks: vec![
                    Block {
                        name: "stone".to_string(),
                        outline: vec![
                            Point::new(0.0, 0.0),
                            Point::new(10.0, 0.0),
                            Point::new(10.0, 5.0),
                            Point::new(0.0, 5.0),
                        ],
                    },
                    Block {
                        name: "broken".to_string(),
                        outline: vec![],
                    },
                ],
                subgroups: vec![],
            }],
            width: 20,
            height: 10,
        };
        let report = classify(&structure);
        let run = build(&structure, &report);

        assert_eq!(run.courses, 1);
        assert_eq!(run.blocks.len(), 1);
        assert_eq!(run.skipped.len(), 1);
        assert_eq!(run.skipped[0].block, "broken");

        let json = serde_json::to_string(&run).unwrap();
        assert!(json.contains("\"is_offloaded\":false"));
        assert!(json.contains("invalid polygon"));
    }
}
