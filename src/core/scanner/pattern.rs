use std::collections::{BTreeMap, HashSet};

use anyhow::{Context, Result, bail};
use regex::Regex;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// How the arguments of one translation-marking function map onto an
/// extraction record.
///
/// `source_map[slot]` names the call argument that holds the text for that
/// slot, or `None` when the function never carries text for it (the zero
/// form of `_n`, for example).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PatternSpec {
    #[serde(default)]
    pub domain_index: Option<usize>,
    #[serde(default)]
    pub n_index: Option<usize>,
    pub source_map: Vec<Option<usize>>,
}

impl PatternSpec {
    pub fn new(source_map: Vec<Option<usize>>) -> Self {
        Self {
            domain_index: None,
            n_index: None,
            source_map,
        }
    }

    pub fn with_domain(mut self, index: usize) -> Self {
        self.domain_index = Some(index);
        self
    }

    pub fn with_n(mut self, index: usize) -> Self {
        self.n_index = Some(index);
        self
    }

    /// Minimum number of call arguments needed to fill every text slot.
    pub fn required_params(&self) -> usize {
        self.source_map
            .iter()
            .flatten()
            .map(|index| index + 1)
            .max()
            .unwrap_or(0)
    }

    pub fn validate(&self, name: &str) -> Result<()> {
        if self.source_map.iter().all(Option::is_none) {
            bail!("Pattern \"{}\" has no text slot in its sourceMap", name);
        }
        Ok(())
    }
}

/// The built-in table of translation-marking functions.
///
/// | name   | call shape                          |
/// |--------|-------------------------------------|
/// | `_`    | `_(text, ...)`                      |
/// | `_f`   | `_f(text, ...)`                     |
/// | `_d`   | `_d(domain, text, ...)`             |
/// | `_n`   | `_n(one, many, n, ...)`             |
/// | `_nn`  | `_nn(zero, one, many, n, ...)`      |
/// | `_nf`  | `_nf(one, many, n, ...)`            |
/// | `_nnf` | `_nnf(zero, one, many, n, ...)`     |
/// | `_nd`  | `_nd(domain, one, many, n, ...)`    |
/// | `_nnd` | `_nnd(domain, zero, one, many, n)`  |
pub fn default_patterns() -> BTreeMap<String, PatternSpec> {
    [
        ("_", PatternSpec::new(vec![Some(0)])),
        ("_f", PatternSpec::new(vec![Some(0)])),
        ("_d", PatternSpec::new(vec![Some(1)]).with_domain(0)),
        ("_n", PatternSpec::new(vec![None, Some(0), Some(1)]).with_n(2)),
        (
            "_nn",
            PatternSpec::new(vec![Some(0), Some(1), Some(2)]).with_n(3),
        ),
        ("_nf", PatternSpec::new(vec![None, Some(0), Some(1)]).with_n(2)),
        (
            "_nnf",
            PatternSpec::new(vec![Some(0), Some(1), Some(2)]).with_n(3),
        ),
        (
            "_nd",
            PatternSpec::new(vec![None, Some(1), Some(2)])
                .with_domain(0)
                .with_n(3),
        ),
        (
            "_nnd",
            PatternSpec::new(vec![Some(1), Some(2), Some(3)])
                .with_domain(0)
                .with_n(4),
        ),
    ]
    .into_iter()
    .map(|(name, spec)| (name.to_string(), spec))
    .collect()
}

/// A pattern with its call matcher compiled once.
#[derive(Debug)]
pub struct CompiledPattern {
    pub name: String,
    pub spec: PatternSpec,
    matcher: Regex,
}

/// Precompiled pattern table used by the scanner.
///
/// Patterns are kept longest name first so that, when one name is a prefix
/// of another, the longer call wins at a given position.
#[derive(Debug)]
pub struct PatternTable {
    patterns: Vec<CompiledPattern>,
    first_chars: HashSet<char>,
}

impl PatternTable {
    pub fn new(specs: &BTreeMap<String, PatternSpec>) -> Result<Self> {
        let mut patterns = Vec::with_capacity(specs.len());
        for (name, spec) in specs {
            if name.is_empty() {
                bail!("Pattern names must not be empty");
            }
            spec.validate(name)?;
            let matcher = Regex::new(&format!(r"^({}\s*)\(", regex::escape(name)))
                .with_context(|| format!("Failed to compile pattern \"{}\"", name))?;
            patterns.push(CompiledPattern {
                name: name.clone(),
                spec: spec.clone(),
                matcher,
            });
        }
        patterns.sort_by(|a, b| b.name.len().cmp(&a.name.len()).then(a.name.cmp(&b.name)));

        let first_chars = patterns
            .iter()
            .filter_map(|p| p.name.chars().next())
            .collect();

        Ok(Self {
            patterns,
            first_chars,
        })
    }

    pub fn with_defaults() -> Result<Self> {
        Self::new(&default_patterns())
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.patterns.iter().map(|p| p.name.as_str())
    }

    /// Whether a call could start with this character at all.
    pub(crate) fn may_start_with(&self, c: char) -> bool {
        self.first_chars.contains(&c)
    }

    /// Match a call at the start of `rest`, returning the pattern and the
    /// byte length up to and including the opening parenthesis.
    pub(crate) fn match_at(&self, rest: &str) -> Option<(&CompiledPattern, usize)> {
        self.patterns
            .iter()
            .find_map(|p| p.matcher.find(rest).map(|m| (p, m.end())))
    }
}
