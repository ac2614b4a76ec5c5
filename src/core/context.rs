use std::path::{Path, PathBuf};

use anyhow::{Result, bail};
use tracing::info;

use crate::{
    config::{Config, load_config},
    core::{
        merge::{MergeOptions, MergeSummary, TranslationsFile, update_translations},
        resolver::{MemoryStore, Resolver},
        scanner::{PatternTable, ProjectScan, discover_files, scan_files},
    },
    issues::{Issue, UnterminatedIssue},
};

/// A project root with its loaded configuration.
pub struct ProjectContext {
    pub root: PathBuf,
    pub config: Config,
    /// Config file in use, `None` for defaults.
    pub config_path: Option<PathBuf>,
    patterns: PatternTable,
}

/// What `update` did to the translations file.
pub struct UpdateOutcome {
    pub files_scanned: usize,
    pub records: usize,
    pub summary: MergeSummary,
    pub total_entries: usize,
    pub path: PathBuf,
}

impl ProjectContext {
    pub fn load(root: &Path) -> Result<Self> {
        if !root.is_dir() {
            bail!("Project root is not a directory: {}", root.display());
        }
        let loaded = load_config(root)?;
        let patterns = loaded.config.pattern_table()?;
        Ok(Self {
            root: root.to_path_buf(),
            config: loaded.config,
            config_path: loaded.path,
            patterns,
        })
    }

    pub fn patterns(&self) -> &PatternTable {
        &self.patterns
    }

    pub fn translations_path(&self) -> PathBuf {
        self.root.join(&self.config.translations_file)
    }

    /// Override the translations file, relative to the project root.
    pub fn set_translations_file(&mut self, file: &str) {
        self.config.translations_file = file.to_string();
    }

    pub fn merge_options(&self) -> MergeOptions {
        MergeOptions {
            keep_unused: self.config.keep_unused,
            detailed: self.config.detailed,
        }
    }

    /// Scan every included source file.
    pub fn scan(&self) -> Result<ProjectScan> {
        let files = discover_files(&self.root, &self.config.includes, &self.config.ignores)?;
        scan_files(&self.root, &files, &self.patterns)
    }

    pub fn load_translations(&self) -> Result<TranslationsFile> {
        TranslationsFile::load(&self.translations_path(), self.config.allow_missing_file)
    }

    /// Scan, merge into the translations file and write it back.
    ///
    /// With `dry_run` the file is left untouched.
    pub fn update(&self, options: MergeOptions, dry_run: bool) -> Result<UpdateOutcome> {
        let mut file = self.load_translations()?;
        let scan = self.scan()?;

        let mut summary = update_translations(&mut file.entries, &scan.records, &options);
        summary.issues.extend(unterminated_issues(&scan));

        if !dry_run {
            file.save()?;
            info!(path = %file.path().display(), entries = file.len(), "wrote translations file");
        }

        Ok(UpdateOutcome {
            files_scanned: scan.files_scanned,
            records: scan.records.len(),
            summary,
            total_entries: file.len(),
            path: file.path().to_path_buf(),
        })
    }

    /// A resolver over the configured locales.
    pub fn resolver(&self) -> Result<Resolver<MemoryStore>> {
        let store = MemoryStore::from_locales(&self.root, &self.config.locales)?;
        Ok(Resolver::new(store))
    }
}

/// One warning per file that ended inside an open construct.
pub fn unterminated_issues(scan: &ProjectScan) -> Vec<Issue> {
    scan.unterminated
        .iter()
        .map(|(file, unterminated)| Issue::Unterminated(UnterminatedIssue::new(file, unterminated)))
        .collect()
}
