use anyhow::Result;
use pretty_assertions::assert_eq;

use crate::{CliTest, stderr, stdout};

#[test]
fn test_scaffold_creates_empty_file() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.run(&["scaffold", "modules/billing"])?;
    assert!(output.status.success());
    assert!(stdout(&output).contains("Created modules/billing/locale/translations.json"));
    assert_eq!(test.read_file("modules/billing/locale/translations.json")?, "{}\n");
    Ok(())
}

#[test]
fn test_scaffold_refuses_to_overwrite() -> Result<()> {
    let test = CliTest::with_file("m/locale/translations.json", r#"{"Save": {}}"#)?;

    let output = test.run(&["scaffold", "m"])?;
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("already exists"));
    assert_eq!(test.read_file("m/locale/translations.json")?, r#"{"Save": {}}"#);
    Ok(())
}
