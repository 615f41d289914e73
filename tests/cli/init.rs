use anyhow::{Context, Result};
use insta_cmd::assert_cmd_snapshot;
use serde_json::Value;

use crate::CliTest;

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    assert_cmd_snapshot!(test.init_command(), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Created .proptablerc.json

    ----- stderr -----
    ");

    let content = test.read_file(".proptablerc.json")?;
    let parsed: Value = serde_json::from_str(&content).context("Config should be valid JSON")?;
    assert_eq!(parsed["schema"], "./schema.json");
    assert_eq!(parsed["includes"][0], "**/*.properties");
    assert_eq!(parsed["locale"], "default");
    assert!(content.contains("\n  \""), "Config should use 2-space indentation");

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".proptablerc.json", "{}")?;

    assert_cmd_snapshot!(test.init_command(), @r"
    success: false
    exit_code: 1
    ----- stdout -----

    ----- stderr -----
    error: .proptablerc.json already exists
    ");

    assert_eq!(test.read_file(".proptablerc.json")?, "{}");

    Ok(())
}
