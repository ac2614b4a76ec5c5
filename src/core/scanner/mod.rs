//! Source scanner: finds calls to translation-marking functions in raw
//! source text without parsing the host language.
//!
//! - `pattern`: the function table and its precompiled matchers
//! - `lexer`: the recursive scanner over one source text
//! - `record`: extraction records produced per call site
//! - `files`: project file discovery and parallel scanning

mod files;
mod lexer;
mod pattern;
mod record;


pub use files::{ProjectScan, discover_files, relative_path, scan_files};
pub use lexer::{OpenConstruct, ScanOutput, Unterminated, scan_source};
pub use pattern::{CompiledPattern, PatternSpec, PatternTable, default_patterns};
pub use record::{ExtractionRecord, format_reference};
