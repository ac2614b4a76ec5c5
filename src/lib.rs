//! rf-locale: translation extraction and lookup for JavaScript-family sources.
//!
//! The scanner finds calls to the translation helpers (`_`, `_n`, `_d`, ...)
//! in source files, the merge step folds them into a JSON translations file,
//! and the resolver looks texts up through a language fallback chain.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer
//! - `config`: Configuration file loading and parsing
//! - `core`: Scanner, merge step and translation resolver
//! - `issues`: Diagnostics and their report formatting
//! - `mcp`: Model Context Protocol server implementation

pub mod cli;
pub mod config;
pub mod core;
pub mod issues;
pub mod mcp;
