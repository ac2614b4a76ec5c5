use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A translatable text: a plain string, or a group of plural forms.
///
/// Plural groups keep their slot positions (`[zero, one, many]`), so a
/// missing zero form is stored as `null`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LocaleText {
    Text(String),
    Plural(Vec<Option<String>>),
}

impl LocaleText {
    /// Build from extracted slots: two or more texts form a plural group,
    /// a single text collapses to a plain string.
    pub fn from_forms(forms: Vec<Option<String>>) -> Option<Self> {
        let present = forms.iter().filter(|f| f.is_some()).count();
        match present {
            0 => None,
            1 => forms.into_iter().flatten().next().map(LocaleText::Text),
            _ => Some(LocaleText::Plural(forms)),
        }
    }

    pub fn is_json(&self) -> bool {
        matches!(self, LocaleText::Plural(_))
    }

    /// The key under which this text is stored: the text itself, or the
    /// JSON array of forms for plural groups.
    pub fn key(&self) -> String {
        match self {
            LocaleText::Text(text) => text.clone(),
            LocaleText::Plural(forms) => forms_to_json(forms),
        }
    }

    /// Parse a stored key back, given its `isJson` flag.
    pub fn from_key(key: &str, is_json: bool) -> Result<Self, serde_json::Error> {
        if is_json {
            Ok(LocaleText::Plural(serde_json::from_str(key)?))
        } else {
            Ok(LocaleText::Text(key.to_string()))
        }
    }

    /// Encode for storage: newline-escaped text, or a JSON array.
    pub fn encode(&self) -> String {
        match self {
            LocaleText::Text(text) => escape_newlines(text),
            LocaleText::Plural(forms) => forms_to_json(forms),
        }
    }

    /// Inverse of [`LocaleText::encode`].
    pub fn decode(stored: &str, is_json: bool) -> Result<Self, serde_json::Error> {
        if is_json {
            Ok(LocaleText::Plural(serde_json::from_str(stored)?))
        } else {
            Ok(LocaleText::Text(unescape_newlines(stored)))
        }
    }

    /// Read a user-supplied text: a JSON array is a plural group, anything
    /// else is plain text.
    pub fn parse_argument(raw: &str) -> Self {
        if raw.trim_start().starts_with('[')
            && let Ok(forms) = serde_json::from_str::<Vec<Option<String>>>(raw)
        {
            return LocaleText::Plural(forms);
        }
        LocaleText::from(raw)
    }

    /// Plain text, or the JSON form of a plural group.
    pub fn display(&self) -> String {
        self.key()
    }
}

impl From<&str> for LocaleText {
    fn from(text: &str) -> Self {
        LocaleText::Text(text.to_string())
    }
}

impl From<String> for LocaleText {
    fn from(text: String) -> Self {
        LocaleText::Text(text)
    }
}

fn forms_to_json(forms: &[Option<String>]) -> String {
    Value::Array(
        forms
            .iter()
            .map(|form| form.clone().map_or(Value::Null, Value::String))
            .collect(),
    )
    .to_string()
}

/// Replace physical line breaks with the two-character sequences `\r`/`\n`.
///
/// Backslashes are doubled so that text already containing a literal `\n`,
/// such as `C:\new`, survives [`unescape_newlines`] unchanged.
pub fn escape_newlines(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\r' => out.push_str("\\r"),
            '\n' => out.push_str("\\n"),
            c => out.push(c),
        }
    }
    out
}

/// Inverse of [`escape_newlines`]. Unknown escapes are kept as written.
pub fn unescape_newlines(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('\\') => out.push('\\'),
            Some('r') => out.push('\r'),
            Some('n') => out.push('\n'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}
