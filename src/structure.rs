//! Input structure model: course groups of block outlines.
//!
//! Mirrors the layered-document convention the masks come from: one
//! directory per course group (named with the course number), one mask
//! image per layer, each holding one or more stone blobs. Nested
//! directories become nested groups and take their own course number
//! during traversal.

use std::fs;
use std::path::{Path, PathBuf};

use kurbo::Point;
use rayon::prelude::*;

use crate::bitmap;
use crate::config::AnalysisConfig;
use crate::error::AnalyzeError;
use crate::outline;
use crate::simplify;

/// One block's simplified outline.
#[derive(Debug, Clone)]
pub struct Block {
    /// Source layer name (plus blob index when a layer holds several
    /// stones), used for ids and skip notices.
    pub name: String,
    /// Simplified outline in document coordinates (y grows downward).
    pub outline: Vec<Point>,
}

/// One course group: a horizontal row of blocks, possibly with nested
/// subgroups.
#[derive(Debug, Clone)]
pub struct CourseGroup {
    pub name: String,
    pub blocks: Vec<Block>,
    pub subgroups: Vec<CourseGroup>,
}

/// A whole structure: the ordered forest of course groups plus the
/// document canvas size.
#[derive(Debug, Clone)]
pub struct Structure {
    pub name: String,
    pub groups: Vec<CourseGroup>,
    pub width: u32,
    pub height: u32,
}

impl Structure {
    /// Total number of course groups, nested ones included.
    pub fn group_count(&self) -> usize {
        fn count(groups: &[CourseGroup]) -> usize {
            groups.iter().map(|g| 1 + count(&g.subgroups)).sum()
        }
        count(&self.groups)
    }

    /// Total number of blocks across all groups.
    pub fn block_count(&self) -> usize {
        fn count(groups: &[CourseGroup]) -> usize {
            groups
                .iter()
                .map(|g| g.blocks.len() + count(&g.subgroups))
                .sum()
        }
        count(&self.groups)
    }
}

/// Numeric sort key for group and layer names: the digits of the name
/// concatenated ("Course 12" → 12). Names without digits sort as zero.
pub fn numeric_key(name: &str) -> u64 {
    let digits: String = name.chars().filter(|c| c.is_ascii_digit()).collect();
    digits.parse().unwrap_or(0)
}

/// Load a structure from a directory tree.
///
/// Immediate subdirectories are course groups, sorted by the numeric part
/// of their names. Inside a group, mask images are layers (same ordering)
/// and nested subdirectories recurse as nested groups. Mask decoding and
/// outline extraction run in parallel per layer; the returned structure
/// preserves the canonical order, so classification stays strictly
/// sequential.
pub fn load(dir: &Path, config: &AnalysisConfig) -> Result<Structure, AnalyzeError> {
    let name = sanitize_id(
        &dir.file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "structure".to_string()),
    );

    let (groups, (width, height)) = load_groups(dir, config)?;
    if groups.is_empty() {
        return Err(AnalyzeError::NoCourses(dir.display().to_string()));
    }

    Ok(Structure {
        name,
        groups,
        width,
        height,
    })
}

/// Load every group directory directly under `dir`, in numeric order.
fn load_groups(
    dir: &Path,
    config: &AnalysisConfig,
) -> Result<(Vec<CourseGroup>, (u32, u32)), AnalyzeError> {
    let mut subdirs: Vec<PathBuf> = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            subdirs.push(path);
        }
    }
    sort_numeric(&mut subdirs);

    let mut groups = Vec::with_capacity(subdirs.len());
    let mut dims = (0u32, 0u32);
    for subdir in &subdirs {
        let (group, group_dims) = load_group(subdir, config)?;
        groups.push(group);
        dims = (dims.0.max(group_dims.0), dims.1.max(group_dims.1));
    }
    Ok((groups, dims))
}

fn load_group(
    dir: &Path,
    config: &AnalysisConfig,
) -> Result<(CourseGroup, (u32, u32)), AnalyzeError> {
    let name = dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let mut layers: Vec<PathBuf> = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && is_mask_image(&path) {
            layers.push(path);
        }
    }
    sort_numeric(&mut layers);

    // Decode and trace layers in parallel; the collect preserves layer
    // order, so block ordering stays canonical.
    type TracedLayer = (String, Vec<Vec<Point>>, (u32, u32));
    let traced: Vec<TracedLayer> = layers
        .par_iter()
        .map(|path| -> Result<TracedLayer, AnalyzeError> {
            let mask = bitmap::load_mask(path, config)?;
            let dims = mask.dimensions();
            let outlines: Vec<Vec<Point>> = outline::extract(&mask, config)
                .iter()
                .map(|raw| {
                    simplify::approx_polygon(&raw.points, config.epsilon_frac)
                        .into_iter()
                        .map(|(x, y)| Point::new(x, y))
                        .collect()
                })
                .collect();
            let stem = path
                .file_stem()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            Ok((stem, outlines, dims))
        })
        .collect::<Result<Vec<_>, AnalyzeError>>()?;

    let mut blocks = Vec::new();
    let mut dims = (0u32, 0u32);
    for (stem, outlines, layer_dims) in traced {
        dims = (dims.0.max(layer_dims.0), dims.1.max(layer_dims.1));
        let multi = outlines.len() > 1;
        for (i, outline) in outlines.into_iter().enumerate() {
            let name = if multi {
                format!("{}_{}", stem, i + 1)
            } else {
                stem.clone()
            };
            blocks.push(Block { name, outline });
        }
    }

    let (subgroups, sub_dims) = load_groups(dir, config)?;
    dims = (dims.0.max(sub_dims.0), dims.1.max(sub_dims.1));

    Ok((
        CourseGroup {
            name,
            blocks,
            subgroups,
        },
        dims,
    ))
}

fn sort_numeric(paths: &mut [PathBuf]) {
    paths.sort_by(|a, b| {
        let ka = a.file_name().map(|n| numeric_key(&n.to_string_lossy())).unwrap_or(0);
        let kb = b.file_name().map(|n| numeric_key(&n.to_string_lossy())).unwrap_or(0);
        ka.cmp(&kb).then_with(|| a.cmp(b))
    });
}

fn is_mask_image(path: &Path) -> bool {
    matches!(
        path.extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .as_deref(),
        Some("png" | "jpg" | "jpeg" | "bmp" | "tif" | "tiff")
    )
}

/// Replace non-alphanumeric characters so a name is usable in element ids.
fn sanitize_id(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .collect()
}
