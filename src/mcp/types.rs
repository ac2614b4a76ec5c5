use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::core::scanner::ExtractionRecord;

// ============================================================
// Tool Parameters
// ============================================================

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetConfigParams {
    /// Absolute path of the project root
    pub project_root_path: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScanSourcesParams {
    /// Absolute path of the project root
    pub project_root_path: String,
    /// Maximum number of records to return (default 50, max 200)
    pub limit: Option<u32>,
    /// Number of records to skip
    pub offset: Option<u32>,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TranslateParams {
    /// Absolute path of the project root
    pub project_root_path: String,
    /// Language tag, e.g. "es-MX"
    pub language: String,
    /// Texts to translate; a JSON array string is read as plural forms
    pub texts: Vec<String>,
    /// Preferred domains, most specific first
    pub domains: Option<Vec<String>>,
    /// Preferred contexts, most specific first
    pub contexts: Option<Vec<String>>,
    /// Render each translation for this count, picking the plural form
    pub count: Option<i64>,
}

// ============================================================
// Config Types (get_config)
// ============================================================

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConfigDto {
    /// True if config was loaded from a file, false if using defaults
    pub from_file: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_path: Option<String>,
    pub config: Config,
}

// ============================================================
// Scan Types (scan_sources)
// ============================================================

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScanResult {
    pub files_scanned: usize,
    pub total_count: usize,
    pub error_count: usize,
    pub warning_count: usize,
    pub items: Vec<RecordItem>,
    pub pagination: Pagination,
}

/// One extracted call.
#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecordItem {
    pub function_name: String,
    pub file_path: String,
    pub line: usize,
    pub column: usize,
    pub source: Vec<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<&ExtractionRecord> for RecordItem {
    fn from(record: &ExtractionRecord) -> Self {
        Self {
            function_name: record.function_name.clone(),
            file_path: record.file.clone(),
            line: record.line,
            column: record.column,
            source: record.source.clone(),
            domain: record.domain.clone(),
            error: record.error.clone(),
        }
    }
}

// ============================================================
// Translate Types (translate)
// ============================================================

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TranslateResult {
    pub language: String,
    pub items: Vec<TranslatedItem>,
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TranslatedItem {
    pub source: String,
    pub translation: String,
    /// False when no stored translation matched and the source came back.
    pub is_translated: bool,
    /// The translation rendered for the requested count.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rendered: Option<String>,
}

// ============================================================
// Common Types
// ============================================================

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub offset: usize,
    pub limit: usize,
    pub has_more: bool,
}
