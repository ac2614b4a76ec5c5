use anyhow::Result;
use pretty_assertions::assert_eq;

use crate::{CliTest, stdout};

const TRANSLATIONS: &str = "locale/translations.json";

#[test]
fn test_update_creates_translations_file() -> Result<()> {
    let test = CliTest::with_file(
        "src/app.js",
        r#"
const title = _('Hello');
const save = _d('ui', 'Save');
const items = _n('one item', '%s items', count);
"#,
    )?;

    let output = test.run(&["update"])?;
    assert!(output.status.success());

    let out = stdout(&output);
    assert!(out.contains("Scanned 1 source file, found 3 calls"), "{}", out);
    assert!(out.contains("added: 3, updated: 0, removed: 0"), "{}", out);
    assert!(out.contains("Wrote 3 entries to locale/translations.json"), "{}", out);

    let json = test.read_json(TRANSLATIONS)?;
    assert_eq!(json["Hello"]["ref"], "src/app.js [2,15]");
    assert_eq!(json["Save"]["domain"], "ui");
    assert_eq!(json[r#"[null,"one item","%s items"]"#]["isJson"], true);
    Ok(())
}

#[test]
fn test_update_keeps_translations_and_prunes_unused() -> Result<()> {
    let test = CliTest::with_file("app.js", "_('Hello');")?;
    test.write_file(
        TRANSLATIONS,
        r#"{
    "Hello": { "domain": null, "ref": "old.js [1,1]", "translation": "Hola" },
    "Gone": { "domain": null, "ref": "old.js [2,1]", "translation": "Ido" }
}"#,
    )?;

    let output = test.run(&["update"])?;
    assert!(output.status.success());
    assert!(stdout(&output).contains("added: 0, updated: 1, removed: 1"));

    let json = test.read_json(TRANSLATIONS)?;
    assert_eq!(json["Hello"]["translation"], "Hola");
    assert_eq!(json["Hello"]["ref"], "app.js [1,1]");
    assert!(json.get("Gone").is_none());
    Ok(())
}

#[test]
fn test_update_keep_unused_flag() -> Result<()> {
    let test = CliTest::with_file("app.js", "_('Hello');")?;
    test.write_file(
        TRANSLATIONS,
        r#"{ "Gone": { "domain": null, "ref": "old.js [2,1]", "translation": "Ido" } }"#,
    )?;

    let output = test.run(&["update", "--keep-unused"])?;
    assert!(output.status.success());
    assert!(stdout(&output).contains("unused: 1"));

    let json = test.read_json(TRANSLATIONS)?;
    assert_eq!(json["Gone"]["translation"], "Ido");
    Ok(())
}

#[test]
fn test_update_dry_run_writes_nothing() -> Result<()> {
    let test = CliTest::with_file("app.js", "_('Hello');")?;

    let output = test.run(&["update", "--dry-run"])?;
    assert!(output.status.success());
    assert!(stdout(&output).contains("Would write 1 entry to locale/translations.json"));
    assert!(!test.root().join(TRANSLATIONS).exists());
    Ok(())
}

#[test]
fn test_update_reports_extraction_errors() -> Result<()> {
    let test = CliTest::with_file("app.js", "_('Hello');\n_d('ui');\n")?;

    let output = test.run(&["update"])?;
    assert_eq!(output.status.code(), Some(1));

    let out = stdout(&output);
    assert!(out.contains("extraction-error"), "{}", out);
    assert!(out.contains("--> app.js:2:1"), "{}", out);

    // The valid call is still written.
    let json = test.read_json(TRANSLATIONS)?;
    assert!(json.get("Hello").is_some());
    Ok(())
}

#[test]
fn test_update_non_literal_is_a_hidden_warning() -> Result<()> {
    let test = CliTest::with_file("app.js", "_(label);\n")?;

    let output = test.run(&["update"])?;
    assert!(output.status.success());
    assert!(stdout(&output).contains("1 warning(s) hidden"));

    let output = test.run(&["update", "-v"])?;
    assert!(stdout(&output).contains("non-literal-source"));
    Ok(())
}

#[test]
fn test_update_respects_file_override() -> Result<()> {
    let test = CliTest::with_file("app.js", "_('Hello');")?;

    let output = test.run(&["update", "--file", "i18n/messages.json"])?;
    assert!(output.status.success());
    assert!(test.root().join("i18n/messages.json").exists());
    Ok(())
}

#[test]
fn test_update_detailed_writes_extraction_fields() -> Result<()> {
    let test = CliTest::with_file("app.js", "_('Hello');")?;

    test.run(&["update", "--detailed"])?;

    let json = test.read_json(TRANSLATIONS)?;
    assert_eq!(json["Hello"]["functionName"], "_");
    assert_eq!(json["Hello"]["line"], 1);
    Ok(())
}

#[test]
fn test_update_missing_file_not_allowed() -> Result<()> {
    let test = CliTest::with_file("app.js", "_('Hello');")?;
    test.write_file(".rflocalerc.json", r#"{ "allowMissingFile": false }"#)?;

    let output = test.run(&["update"])?;
    assert_eq!(output.status.code(), Some(2));
    Ok(())
}
