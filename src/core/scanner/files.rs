use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use glob::Pattern;
use rayon::prelude::*;
use tracing::{debug, warn};
use walkdir::WalkDir;

use super::{
    lexer::{Unterminated, scan_source},
    pattern::PatternTable,
    record::ExtractionRecord,
};

/// Check if a pattern contains glob wildcards (* or ?).
/// Patterns without wildcards are treated as literal paths.
fn is_glob_pattern(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?')
}

/// Compiled include/ignore rules, all relative to the project root.
struct FileFilter {
    includes: Vec<Pattern>,
    ignore_globs: Vec<Pattern>,
    ignore_paths: Vec<PathBuf>,
}

impl FileFilter {
    fn new(root: &Path, includes: &[String], ignores: &[String]) -> Result<Self> {
        let includes = includes
            .iter()
            .map(|p| {
                Pattern::new(p)
                    .with_context(|| format!("Invalid glob pattern in 'includes': \"{}\"", p))
            })
            .collect::<Result<Vec<_>>>()?;

        let mut ignore_globs = Vec::new();
        let mut ignore_paths = Vec::new();
        for p in ignores {
            if is_glob_pattern(p) {
                ignore_globs.push(
                    Pattern::new(p)
                        .with_context(|| format!("Invalid glob pattern in 'ignores': \"{}\"", p))?,
                );
            } else {
                ignore_paths.push(root.join(p));
            }
        }

        Ok(Self {
            includes,
            ignore_globs,
            ignore_paths,
        })
    }

    fn is_ignored_path(&self, path: &Path) -> bool {
        self.ignore_paths.iter().any(|ignored| path.starts_with(ignored))
    }

    /// A directory can be skipped when a `.../**` ignore covers everything in it.
    fn ignores_directory(&self, path: &Path, relative: &str) -> bool {
        if self.is_ignored_path(path) {
            return true;
        }
        let inside = format!("{}/_", relative);
        self.ignore_globs
            .iter()
            .any(|p| p.as_str().ends_with("/**") && p.matches(&inside))
    }

    fn accepts_file(&self, path: &Path, relative: &str) -> bool {
        if self.is_ignored_path(path) || self.ignore_globs.iter().any(|p| p.matches(relative)) {
            return false;
        }
        self.includes.iter().any(|p| p.matches(relative))
    }
}

/// Path of `path` relative to `root`, with `/` separators.
pub fn relative_path(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/")
}

/// Find all source files under `root` matching `includes` and none of `ignores`.
///
/// The result is sorted so that extraction order is stable between runs.
pub fn discover_files(root: &Path, includes: &[String], ignores: &[String]) -> Result<Vec<PathBuf>> {
    let filter = FileFilter::new(root, includes, ignores)?;

    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            if entry.depth() == 0 || !entry.file_type().is_dir() {
                return true;
            }
            let relative = relative_path(root, entry.path());
            !filter.ignores_directory(entry.path(), &relative)
        });

    let mut files = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                warn!("Cannot access path: {}", e);
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let relative = relative_path(root, entry.path());
        if filter.accepts_file(entry.path(), &relative) {
            files.push(entry.into_path());
        }
    }
    files.sort();

    debug!(count = files.len(), root = %root.display(), "discovered source files");
    Ok(files)
}

/// Extraction results for a whole project.
#[derive(Debug, Default)]
pub struct ProjectScan {
    /// Records of all files, in file order then source order.
    pub records: Vec<ExtractionRecord>,
    /// Files that ended inside an open construct.
    pub unterminated: Vec<(String, Unterminated)>,
    pub files_scanned: usize,
}

/// Read and scan `files` in parallel.
///
/// A file that cannot be read fails the whole scan; content problems never do.
pub fn scan_files(root: &Path, files: &[PathBuf], patterns: &PatternTable) -> Result<ProjectScan> {
    let outputs = files
        .par_iter()
        .map(|path| {
            let code = fs::read_to_string(path)
                .with_context(|| format!("Failed to read file: {}", path.display()))?;
            let display = relative_path(root, path);
            let output = scan_source(&code, &display, patterns);
            Ok((display, output))
        })
        .collect::<Result<Vec<_>>>()?;

    let mut scan = ProjectScan {
        files_scanned: outputs.len(),
        ..Default::default()
    };
    for (file, output) in outputs {
        scan.records.extend(output.records);
        if let Some(unterminated) = output.unterminated {
            scan.unterminated.push((file, unterminated));
        }
    }
    Ok(scan)
}
