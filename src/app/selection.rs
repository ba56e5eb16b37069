// selection.rs
use crate::app::image_processing::PNG_SUFFIX;
use std::path::{Path, PathBuf};

/// Ordered, duplicate-free list of PNG files waiting to be converted.
///
/// Every mutation bumps `generation`, which the grid uses to know when its
/// cached thumbnails must be rebuilt.
#[derive(Debug, Default)]
pub struct Selection {
    paths: Vec<PathBuf>,
    generation: u64,
}

/// Why a candidate path was not added.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    NotPng(PathBuf),
    Duplicate(PathBuf),
}

#[derive(Debug, Default)]
pub struct AddReport {
    pub added: usize,
    pub rejected: Vec<Rejection>,
}

pub fn is_png(path: &Path) -> bool {
    path.to_str().map_or(false, |s| s.ends_with(PNG_SUFFIX))
}

impl Selection {
    /// Appends every PNG not already selected, keeping the order received.
    pub fn add<I>(&mut self, candidates: I) -> AddReport
    where
        I: IntoIterator<Item = PathBuf>,
    {
        let mut report = AddReport::default();
        for path in candidates {
            if !is_png(&path) {
                report.rejected.push(Rejection::NotPng(path));
            } else if self.contains(&path) {
                report.rejected.push(Rejection::Duplicate(path));
            } else {
                self.paths.push(path);
                report.added += 1;
            }
        }
        self.generation += 1;
        report
    }

    /// Removes `path` if present. The grid is rebuilt either way.
    pub fn remove(&mut self, path: &Path) -> bool {
        let position = self.paths.iter().position(|p| p == path);
        if let Some(index) = position {
            self.paths.remove(index);
        }
        self.generation += 1;
        position.is_some()
    }

    pub fn clear(&mut self) {
        self.paths.clear();
        self.generation += 1;
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.paths.iter().any(|p| p == path)
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}
