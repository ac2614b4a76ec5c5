use anyhow::Result;
use pretty_assertions::assert_eq;

use crate::{CliTest, stdout};

fn project() -> Result<CliTest> {
    let test = CliTest::new()?;
    test.write_file(
        ".rflocalerc.json",
        r#"{
    "locales": {
        "es": { "file": "locale/es.json" },
        "es-MX": { "parent": "es", "file": "locale/es-MX.json" }
    }
}"#,
    )?;
    test.write_file(
        "locale/es.json",
        r#"{
    "Save": { "domain": null, "ref": "a.js [1,1]", "translation": "Guardar" },
    "Open": { "domain": "menu", "ref": "a.js [2,1]", "translation": "Abrir archivo" },
    "Close": { "domain": null, "ref": "a.js [3,1]", "translation": "Cerrar" },
    "[null,\"one file\",\"%s files\"]": {
        "domain": null,
        "ref": "a.js [4,1]",
        "translation": [null, "un archivo", "%s archivos"],
        "isJson": true
    }
}"#,
    )?;
    test.write_file(
        "locale/es-MX.json",
        r#"{ "Close": { "domain": null, "ref": "a.js [3,1]", "translation": "Cerrar ventana" } }"#,
    )?;
    Ok(test)
}

#[test]
fn test_translate_falls_back_to_parent() -> Result<()> {
    let test = project()?;

    let output = test.run(&["translate", "-l", "es-MX", "Save", "Close", "Unknown"])?;
    assert!(output.status.success());
    insta::assert_snapshot!(stdout(&output), @r"
    Save => Guardar
    Close => Cerrar ventana
    Unknown => Unknown
    ");
    Ok(())
}

#[test]
fn test_translate_with_domain() -> Result<()> {
    let test = project()?;

    let out = stdout(&test.run(&["translate", "-l", "es", "--domain", "menu", "Open"])?);
    assert_eq!(out, "Open => Abrir archivo\n");
    Ok(())
}

#[test]
fn test_translate_plural_group() -> Result<()> {
    let test = project()?;

    let out = stdout(&test.run(&["translate", "-l", "es", r#"[null,"one file","%s files"]"#])?);
    assert_eq!(
        out,
        "[null,\"one file\",\"%s files\"] => [null,\"un archivo\",\"%s archivos\"]\n"
    );
    Ok(())
}

#[test]
fn test_translate_requires_texts() -> Result<()> {
    let test = project()?;

    let output = test.run(&["translate", "-l", "es"])?;
    assert!(!output.status.success());
    Ok(())
}

#[test]
fn test_translate_with_count_selects_plural_form() -> Result<()> {
    let test = project()?;
    let plural = r#"[null,"one file","%s files"]"#;

    let one = stdout(&test.run(&["translate", "-l", "es", "--count", "1", plural])?);
    assert_eq!(one, format!("{} => un archivo\n", plural));

    let many = stdout(&test.run(&["translate", "-l", "es-MX", "--count", "3", plural, "Save"])?);
    assert_eq!(many, format!("{} => 3 archivos\nSave => Guardar\n", plural));

    // No zero form, so zero uses the "many" form.
    let zero = stdout(&test.run(&["translate", "-l", "es", "--count", "0", plural])?);
    assert_eq!(zero, format!("{} => 0 archivos\n", plural));
    Ok(())
}
