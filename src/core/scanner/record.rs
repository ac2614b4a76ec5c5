use schemars::JsonSchema;
use serde::Serialize;

use super::pattern::CompiledPattern;

/// One located call to a translation-marking function.
///
/// Text slots keep the raw argument text (quotes included); turning them into
/// actual strings is the merge step's job, since an argument may turn out to
/// be an expression rather than a literal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionRecord {
    pub source: Vec<Option<String>>,
    pub domain: Option<String>,
    /// Raw plural-count expression, if the pattern has one.
    pub n: Option<String>,
    pub function_name: String,
    pub file: String,
    pub line: usize,
    pub column: usize,
    #[serde(rename = "ref")]
    pub reference: String,
    pub error: Option<String>,
    pub all_params: Vec<String>,
    pub snippet: String,
    pub params_snippet: String,
}

/// Raw data collected by the scanner at one call site.
pub(crate) struct CallSite<'a> {
    pub file: &'a str,
    pub line: usize,
    pub column: usize,
    pub all_params: Vec<String>,
    pub snippet: &'a str,
    pub params_snippet: &'a str,
}

pub fn format_reference(file: &str, line: usize, column: usize) -> String {
    format!("{} [{},{}]", file, line, column)
}

impl ExtractionRecord {
    pub(crate) fn from_call(pattern: &CompiledPattern, call: CallSite<'_>) -> Self {
        let spec = &pattern.spec;
        let params = &call.all_params;

        let source = spec
            .source_map
            .iter()
            .map(|slot| slot.and_then(|index| params.get(index).cloned()))
            .collect();

        let required = spec.required_params();
        let error = (params.len() < required).then(|| {
            format!(
                "{}() expects at least {} parameter{}, found {}",
                pattern.name,
                required,
                if required == 1 { "" } else { "s" },
                params.len()
            )
        });

        Self {
            source,
            domain: spec.domain_index.and_then(|i| params.get(i).cloned()),
            n: spec.n_index.and_then(|i| params.get(i).cloned()),
            function_name: pattern.name.clone(),
            file: call.file.to_string(),
            line: call.line,
            column: call.column,
            reference: format_reference(call.file, call.line, call.column),
            error,
            all_params: call.all_params,
            snippet: call.snippet.to_string(),
            params_snippet: call.params_snippet.to_string(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}
