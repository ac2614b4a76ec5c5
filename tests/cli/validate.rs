use std::io::Write;
use std::process::Stdio;

use anyhow::Result;
use pretty_assertions::assert_eq;

use crate::{CliTest, stdout};

const FILE: &str = r#"{
    "Save": { "domain": null, "ref": "a.js [1,1]", "translation": "Guardar" },
    "Cancel": { "domain": null, "ref": "a.js [2,1]", "translation": null }
}"#;

#[test]
fn test_validate_reports_missing_translations() -> Result<()> {
    let test = CliTest::with_file("locale/translations.json", FILE)?;

    let output = test.run(&["validate"])?;
    assert_eq!(output.status.code(), Some(1));

    let out = stdout(&output);
    assert!(out.contains("error: Cancel  missing-translation"), "{}", out);
    assert!(out.contains("--> locale/translations.json \"Cancel\""), "{}", out);
    assert!(out.contains("= note: used at a.js [2,1]"), "{}", out);
    assert!(out.contains("1 entry of 2 missing a translation"), "{}", out);
    Ok(())
}

#[test]
fn test_validate_all_translated() -> Result<()> {
    let test = CliTest::with_file(
        "locale/translations.json",
        r#"{ "Save": { "domain": null, "ref": "a.js [1,1]", "translation": "Guardar" } }"#,
    )?;

    let output = test.run(&["validate"])?;
    assert!(output.status.success());
    assert!(stdout(&output).contains("All 1 entry of locale/translations.json are translated"));
    Ok(())
}

#[test]
fn test_validate_interactive_saves_answers() -> Result<()> {
    let test = CliTest::with_file("locale/translations.json", FILE)?;

    let mut child = test
        .command()
        .args(["validate", "--interactive"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()?;
    if let Some(mut stdin) = child.stdin.take() {
        stdin.write_all(b"Cancelar\n")?;
    }
    let output = child.wait_with_output()?;

    assert!(output.status.success());
    assert!(stdout(&output).contains("Saved 1 translation to locale/translations.json"));

    let json = test.read_json("locale/translations.json")?;
    assert_eq!(json["Cancel"]["translation"], "Cancelar");
    assert_eq!(json["Save"]["translation"], "Guardar");
    Ok(())
}
