use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

fn is_false(value: &bool) -> bool {
    !*value
}

/// One source key in a translations file.
///
/// The compact form carries `domain`, `ref` and `translation`; the
/// extraction metadata fields are only written in detailed mode.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationEntry {
    #[serde(default)]
    pub domain: Option<String>,
    #[serde(rename = "ref", default)]
    pub reference: String,
    /// Human-entered translation: a string, or an array of forms for plural keys.
    #[serde(default)]
    pub translation: Option<Value>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_json: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_draft: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub used: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub n: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<usize>,
}

impl TranslationEntry {
    pub fn is_translated(&self) -> bool {
        match &self.translation {
            None | Some(Value::Null) => false,
            Some(Value::String(s)) => !s.is_empty(),
            Some(Value::Array(forms)) => !forms.is_empty(),
            Some(_) => true,
        }
    }

    /// Drop the detailed-mode fields.
    pub fn clear_details(&mut self) {
        self.used = None;
        self.function_name = None;
        self.n = None;
        self.file = None;
        self.line = None;
        self.column = None;
    }
}

pub type TranslationMap = IndexMap<String, TranslationEntry>;

/// A translations JSON file: source key to entry, in file order.
#[derive(Debug)]
pub struct TranslationsFile {
    path: PathBuf,
    pub entries: TranslationMap,
}

impl TranslationsFile {
    /// Load `path`. A missing file yields an empty store when `allow_missing`
    /// is set and is an error otherwise.
    pub fn load(path: &Path, allow_missing: bool) -> Result<Self> {
        if !path.exists() {
            if allow_missing {
                return Ok(Self {
                    path: path.to_path_buf(),
                    entries: TranslationMap::new(),
                });
            }
            bail!("Translations file not found: {}", path.display());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read translations file: {}", path.display()))?;
        let entries: TranslationMap = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse translations file: {}", path.display()))?;

        Ok(Self {
            path: path.to_path_buf(),
            entries,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn to_json(&self) -> Result<String> {
        to_pretty_json(&self.entries)
    }

    /// Write the file with 4-space indentation and a trailing newline.
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        fs::write(&self.path, self.to_json()?)
            .with_context(|| format!("Failed to write file: {}", self.path.display()))?;
        Ok(())
    }
}

/// Serialize with 4-space indentation and a trailing newline.
pub fn to_pretty_json<T: Serialize>(value: &T) -> Result<String> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value
        .serialize(&mut serializer)
        .context("Failed to serialize JSON")?;
    let mut content = String::from_utf8(buf).context("Serialized JSON is not UTF-8")?;
    content.push('\n');
    Ok(content)
}
