//! Errors whose user-facing message is looked up through the resolver.
//!
//! Message templates live in the `errors` domain. Parameters are translated
//! too, so `"%s not found"` with `"Project"` renders as
//! `"Proyecto no encontrado"` once both strings have Spanish entries.

use thiserror::Error;
use tracing::warn;

use super::resolver::{
    BatchItem, LocaleText, Resolver, TranslateOptions, TranslationStore, format_count,
    interpolate,
};

/// Domain holding error message templates.
pub const ERRORS_DOMAIN: &str = "errors";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocaleErrorKind {
    NotFound,
    AlreadyExists,
    Forbidden,
    Unauthorized,
    /// `count` failed validations; selects the singular or plural message.
    Validation { count: usize },
    Internal,
}

impl LocaleErrorKind {
    /// HTTP status a service maps this error to.
    pub fn status_code(&self) -> u16 {
        match self {
            LocaleErrorKind::NotFound => 404,
            LocaleErrorKind::AlreadyExists => 409,
            LocaleErrorKind::Forbidden => 403,
            LocaleErrorKind::Unauthorized => 401,
            LocaleErrorKind::Validation { .. } => 400,
            LocaleErrorKind::Internal => 500,
        }
    }

    /// Source text of the message, as registered for translation.
    pub fn template(&self) -> LocaleText {
        match self {
            LocaleErrorKind::NotFound => LocaleText::from("%s not found"),
            LocaleErrorKind::AlreadyExists => LocaleText::from("%s already exists"),
            LocaleErrorKind::Forbidden => LocaleText::from("You are not allowed to %s"),
            LocaleErrorKind::Unauthorized => LocaleText::from("Authentication required"),
            LocaleErrorKind::Validation { .. } => LocaleText::Plural(vec![
                None,
                Some("There is a validation error".to_string()),
                Some("There are %s validation errors".to_string()),
            ]),
            LocaleErrorKind::Internal => LocaleText::from("Internal server error"),
        }
    }

    fn render(&self, template: &LocaleText, params: &[String]) -> String {
        let params: Vec<&str> = params.iter().map(String::as_str).collect();
        match self {
            LocaleErrorKind::Validation { count } => {
                let count = i64::try_from(*count).unwrap_or(i64::MAX);
                interpolate(&format_count(template, count), &params)
            }
            _ => match template {
                LocaleText::Text(text) => interpolate(text, &params),
                LocaleText::Plural(_) => template.display(),
            },
        }
    }
}

fn english(kind: &LocaleErrorKind, params: &[String]) -> String {
    kind.render(&kind.template(), params)
}

/// An error carrying the parameters of its message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", english(.kind, .params))]
pub struct LocaleError {
    pub kind: LocaleErrorKind,
    pub params: Vec<String>,
}

impl LocaleError {
    pub fn new(kind: LocaleErrorKind) -> Self {
        Self {
            kind,
            params: Vec::new(),
        }
    }

    pub fn with_param(mut self, param: impl Into<String>) -> Self {
        self.params.push(param.into());
        self
    }

    pub fn status_code(&self) -> u16 {
        self.kind.status_code()
    }

    /// Render the message in `language`, falling back to English text for
    /// anything without a translation.
    pub fn localized<S: TranslationStore>(&self, resolver: &mut Resolver<S>, language: &str) -> String {
        let options = TranslateOptions::default().domain(ERRORS_DOMAIN);
        let template = self.kind.template();

        let translated_template = match resolver.translate(language, &template, &options) {
            Ok(translation) => translation.text,
            Err(error) => {
                warn!(language, error = %error, "could not translate error message");
                template
            }
        };

        let items = self
            .params
            .iter()
            .map(|p| BatchItem::from(p.as_str()))
            .collect();
        let translated = resolver.translate_all(language, items, &options);
        let params: Vec<String> = self
            .params
            .iter()
            .map(|p| {
                translated
                    .get(p)
                    .map(LocaleText::display)
                    .unwrap_or_else(|| p.clone())
            })
            .collect();

        self.kind.render(&translated_template, &params)
    }
}
