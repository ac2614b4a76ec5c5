use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use glob::Pattern;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::core::scanner::{PatternSpec, PatternTable, default_patterns};

pub const CONFIG_FILE_NAME: &str = ".rflocalerc.json";

/// A runtime language and the translations file it reads.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct LocaleConfig {
    /// Tag of the language to fall back to (`es` for `es-MX`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    pub file: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_includes")]
    pub includes: Vec<String>,
    #[serde(default = "default_ignores")]
    pub ignores: Vec<String>,
    #[serde(default = "default_translations_file")]
    pub translations_file: String,
    #[serde(default = "default_allow_missing_file")]
    pub allow_missing_file: bool,
    #[serde(default)]
    pub keep_unused: bool,
    #[serde(default)]
    pub detailed: bool,
    /// Replaces the built-in pattern table when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patterns: Option<BTreeMap<String, PatternSpec>>,
    #[serde(default)]
    pub locales: BTreeMap<String, LocaleConfig>,
}

fn default_includes() -> Vec<String> {
    ["**/*.js", "**/*.ts", "**/*.jsx", "**/*.tsx", "**/*.mjs", "**/*.vue"]
        .map(String::from)
        .to_vec()
}

fn default_ignores() -> Vec<String> {
    ["**/node_modules/**", "**/dist/**", "**/.git/**"]
        .map(String::from)
        .to_vec()
}

fn default_translations_file() -> String {
    "./locale/translations.json".to_string()
}

fn default_allow_missing_file() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            includes: default_includes(),
            ignores: default_ignores(),
            translations_file: default_translations_file(),
            allow_missing_file: default_allow_missing_file(),
            keep_unused: false,
            detailed: false,
            patterns: None,
            locales: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.includes {
            Pattern::new(pattern)
                .with_context(|| format!("Invalid glob pattern in 'includes': \"{}\"", pattern))?;
        }
        for pattern in &self.ignores {
            if pattern.contains('*') || pattern.contains('?') {
                Pattern::new(pattern).with_context(|| {
                    format!("Invalid glob pattern in 'ignores': \"{}\"", pattern)
                })?;
            }
        }

        if let Some(patterns) = &self.patterns {
            if patterns.is_empty() {
                bail!("'patterns' must name at least one function");
            }
            for (name, spec) in patterns {
                spec.validate(name)?;
            }
        }

        for (tag, locale) in &self.locales {
            if locale.parent.as_deref() == Some(tag.as_str()) {
                bail!("Locale \"{}\" cannot be its own parent", tag);
            }
        }

        Ok(())
    }

    /// The configured pattern table, or the built-in one.
    pub fn pattern_table(&self) -> Result<PatternTable> {
        match &self.patterns {
            Some(patterns) => PatternTable::new(patterns),
            None => PatternTable::new(&default_patterns()),
        }
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// Where the config came from, `None` when defaults are used.
    pub path: Option<PathBuf>,
}

impl ConfigLoadResult {
    pub fn from_file(&self) -> bool {
        self.path.is_some()
    }
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
            config.validate()?;
            Ok(ConfigLoadResult {
                config,
                path: Some(path),
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            path: None,
        }),
    }
}
