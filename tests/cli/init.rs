use anyhow::{Context, Result};
use serde_json::Value;

use crate::{CliTest, stderr, stdout};

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.run(&["init"])?;
    assert!(output.status.success());
    assert!(stdout(&output).contains("Created .rflocalerc.json"));

    let content = test.read_file(".rflocalerc.json")?;
    let parsed: Value = serde_json::from_str(&content).context("Config should be valid JSON")?;
    assert!(parsed.get("includes").is_some());
    assert_eq!(parsed["translationsFile"], "./locale/translations.json");
    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::with_file(".rflocalerc.json", "{}")?;

    let output = test.run(&["init"])?;
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains(".rflocalerc.json already exists"));
    Ok(())
}

#[test]
fn test_init_config_is_immediately_usable() -> Result<()> {
    let test = CliTest::new()?;
    test.run(&["init"])?;
    test.write_file("src/app.js", "_('Hello');")?;

    let output = test.run(&["update"])?;
    assert!(
        output.status.success(),
        "update should work with the initialized config. stderr: {}",
        stderr(&output)
    );
    assert!(test.root().join("locale/translations.json").exists());
    Ok(())
}
