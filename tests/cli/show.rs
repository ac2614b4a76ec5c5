use anyhow::Result;

use crate::{CliTest, stdout};

const FILE: &str = r#"{
    "Save": { "domain": "ui", "ref": "a.js [1,1]", "translation": "Guardar" },
    "Cancel": { "domain": null, "ref": "a.js [2,1]", "translation": null },
    "Edit": { "domain": null, "ref": "a.js [3,1]", "translation": "Editar", "isDraft": true }
}"#;

#[test]
fn test_show_lists_entries_in_file_order() -> Result<()> {
    let test = CliTest::with_file("locale/translations.json", FILE)?;

    let output = test.run(&["show"])?;
    assert!(output.status.success());

    let out = stdout(&output);
    assert!(out.starts_with("locale/translations.json (2/3 translated)\n"), "{}", out);
    let save = out.find("Save [ui] => Guardar").unwrap();
    let cancel = out.find("Cancel => (missing)").unwrap();
    let edit = out.find("Edit => Editar (draft)").unwrap();
    assert!(save < cancel && cancel < edit);
    Ok(())
}

#[test]
fn test_show_missing_only() -> Result<()> {
    let test = CliTest::with_file("locale/translations.json", FILE)?;

    let out = stdout(&test.run(&["show", "--missing"])?);
    assert!(out.contains("Cancel => (missing)"));
    assert!(!out.contains("Save"));
    Ok(())
}

#[test]
fn test_show_without_file() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.run(&["show"])?;
    assert!(output.status.success());
    assert!(stdout(&output).contains("(0/0 translated)"));
    Ok(())
}

#[test]
fn test_show_invalid_json_is_an_error() -> Result<()> {
    let test = CliTest::with_file("locale/translations.json", "{ not json")?;

    let output = test.run(&["show"])?;
    assert_eq!(output.status.code(), Some(2));
    Ok(())
}
