use super::text::LocaleText;

/// Pick the form of `[zero, one, many]` that fits `n`.
///
/// The zero form is only used when present; a missing form falls back to
/// `many`, then `one`.
pub fn select_plural(forms: &[Option<String>], n: i64) -> Option<&str> {
    let form = |index: usize| forms.get(index).and_then(|f| f.as_deref());
    let preferred = match n {
        0 if form(0).is_some() => 0,
        1 | -1 => 1,
        _ => 2,
    };
    form(preferred).or_else(|| form(2)).or_else(|| form(1))
}

/// Replace each `%s` in `template` with the next argument, in order.
/// Placeholders without an argument are kept.
pub fn interpolate(template: &str, args: &[&str]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut args = args.iter();
    let mut rest = template;
    while let Some(index) = rest.find("%s") {
        out.push_str(&rest[..index]);
        match args.next() {
            Some(arg) => out.push_str(arg),
            None => out.push_str("%s"),
        }
        rest = &rest[index + 2..];
    }
    out.push_str(rest);
    out
}

/// Render `text` for count `n`, substituting the count for `%s`.
pub fn format_count(text: &LocaleText, n: i64) -> String {
    let count = n.to_string();
    match text {
        LocaleText::Text(text) => interpolate(text, &[count.as_str()]),
        LocaleText::Plural(forms) => {
            interpolate(select_plural(forms, n).unwrap_or_default(), &[count.as_str()])
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn forms(items: &[Option<&str>]) -> Vec<Option<String>> {
        items.iter().map(|f| f.map(str::to_string)).collect()
    }

    #[test]
    fn test_select_with_zero_form() {
        let forms = forms(&[Some("none"), Some("one"), Some("many")]);
        assert_eq!(select_plural(&forms, 0), Some("none"));
        assert_eq!(select_plural(&forms, 1), Some("one"));
        assert_eq!(select_plural(&forms, 5), Some("many"));
    }

    #[test]
    fn test_zero_without_zero_form_uses_many() {
        let forms = forms(&[None, Some("one"), Some("many")]);
        assert_eq!(select_plural(&forms, 0), Some("many"));
    }

    #[test]
    fn test_missing_many_falls_back_to_one() {
        let forms = forms(&[None, Some("one")]);
        assert_eq!(select_plural(&forms, 3), Some("one"));
        assert_eq!(select_plural(&[], 3), None);
    }

    #[test]
    fn test_interpolate() {
        assert_eq!(interpolate("%s of %s", &["1", "3"]), "1 of 3");
        assert_eq!(interpolate("%s and %s", &["a"]), "a and %s");
        assert_eq!(interpolate("plain", &["x"]), "plain");
    }

    #[test]
    fn test_format_count() {
        let text = LocaleText::Plural(forms(&[Some("no files"), Some("%s file"), Some("%s files")]));
        assert_eq!(format_count(&text, 0), "no files");
        assert_eq!(format_count(&text, 1), "1 file");
        assert_eq!(format_count(&text, 12), "12 files");
        assert_eq!(format_count(&LocaleText::from("%s items"), 2), "2 items");
    }
}
