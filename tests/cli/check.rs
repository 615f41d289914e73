use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;

use crate::{CliTest, LABELS_SCHEMA};

const COMPLETE_LABELS: &str = "\
title=Dashboard
enabled=true
fruits=apple, pear
colors=red,blue
red=Rouge
blue=Bleu
";

#[test]
fn test_clean_file() -> Result<()> {
    let test = CliTest::with_schema(LABELS_SCHEMA)?;
    test.write_file("Labels.properties", COMPLETE_LABELS)?;

    assert_cmd_snapshot!(test.check_command(), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Checked 1 property file - no issues found

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_malformed_value_rejects_file() -> Result<()> {
    let test = CliTest::with_schema(LABELS_SCHEMA)?;
    test.write_file("Labels.properties", "title=Dashboard\nretries=many\n")?;

    assert_cmd_snapshot!(test.check_command(), @r#"
    success: false
    exit_code: 1
    ----- stdout -----
    error: "retries"  malformed-value
      --> Labels.properties:2
      = note: "many" is not a valid integer value
      = hint: the file is not loaded until this value is fixed

    ✘ 1 problems (1 error, 0 warnings)

    ----- stderr -----
    "#);

    Ok(())
}

#[test]
fn test_unresolved_keys_are_warnings() -> Result<()> {
    let test = CliTest::with_schema(LABELS_SCHEMA)?;
    test.write_file("Labels.properties", "title=Dashboard\nenabled=no\n")?;

    // greeting and retries fall back to their defaults.
    assert_cmd_snapshot!(test.check_command(), @r#"
    success: true
    exit_code: 0
    ----- stdout -----
    warning: "colors"  unresolved-key
      --> Labels.properties
      = note: no value for locale 'default' and no default in the schema

    warning: "fruits"  unresolved-key
      --> Labels.properties
      = note: no value for locale 'default' and no default in the schema

    ✘ 2 problems (0 errors, 2 warnings)

    ----- stderr -----
    "#);

    Ok(())
}

#[test]
fn test_locale_override_in_diagnostics() -> Result<()> {
    let test = CliTest::with_schema(r#"{ "title": { "type": "string" } }"#)?;
    test.write_file("Labels_fr.properties", "")?;

    let mut cmd = test.check_command();
    cmd.args(["--locale", "fr"]);

    assert_cmd_snapshot!(cmd, @r#"
    success: true
    exit_code: 0
    ----- stdout -----
    warning: "title"  unresolved-key
      --> Labels_fr.properties
      = note: no value for locale 'fr' and no default in the schema

    ✘ 1 problems (0 errors, 1 warning)

    ----- stderr -----
    "#);

    Ok(())
}

#[test]
fn test_invalid_message_pattern() -> Result<()> {
    let test = CliTest::with_schema(LABELS_SCHEMA)?;
    test.write_file(
        "Labels.properties",
        &format!("{}greeting=Hello {{name}}\n", COMPLETE_LABELS),
    )?;

    assert_cmd_snapshot!(test.check_command(), @r#"
    success: false
    exit_code: 1
    ----- stdout -----
    error: "greeting"  invalid-pattern
      --> Labels.properties:7
      = note: invalid argument index "name" at position 6
      = hint: quote literal braces with single quotes, e.g. '{'

    ✘ 1 problems (1 error, 0 warnings)

    ----- stderr -----
    "#);

    Ok(())
}

#[test]
fn test_quoted_braces_are_valid() -> Result<()> {
    let test = CliTest::with_schema(LABELS_SCHEMA)?;
    test.write_file(
        "Labels.properties",
        &format!("{}greeting=Use '{{' for a brace, {{0}}\n", COMPLETE_LABELS),
    )?;

    assert_cmd_snapshot!(test.check_command(), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Checked 1 property file - no issues found

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_escaped_comma_map_sub_keys() -> Result<()> {
    let test = CliTest::with_schema(LABELS_SCHEMA)?;
    test.write_file(
        "Labels.properties",
        "title=Dashboard\nenabled=true\nfruits=a\\,b\ncolors=dark\\,red,blue\ndark\\,red=Bordeaux\nblue=Bleu\n",
    )?;

    assert_cmd_snapshot!(test.check_command(), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Checked 1 property file - no issues found

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_syntax_error() -> Result<()> {
    let test = CliTest::with_schema(LABELS_SCHEMA)?;
    test.write_file("Labels.properties", "title=ok\nbad=\\u12G4\n")?;

    assert_cmd_snapshot!(test.check_command(), @r#"
    success: false
    exit_code: 1
    ----- stdout -----
    error: "malformed \uxxxx encoding: \u12G4"  syntax
      --> Labels.properties:2

    ✘ 1 problems (1 error, 0 warnings)

    ----- stderr -----
    warning: 1 file(s) could not be loaded (use -v for details)
    "#);

    Ok(())
}

#[test]
fn test_explicit_files_skip_discovery() -> Result<()> {
    let test = CliTest::with_schema(LABELS_SCHEMA)?;
    test.write_file("a/Labels.properties", COMPLETE_LABELS)?;
    test.write_file("b/Broken.properties", "retries=x\n")?;

    let mut cmd = test.check_command();
    cmd.arg("a/Labels.properties");

    assert_cmd_snapshot!(cmd, @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Checked 1 property file - no issues found

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_config_includes_and_ignores() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        ".proptablerc.json",
        r#"{
          "schema": "i18n/schema.json",
          "includes": ["i18n/**/*.properties"],
          "ignores": ["**/draft/**"]
      }"#,
    )?;
    test.write_file("i18n/schema.json", LABELS_SCHEMA)?;
    test.write_file("i18n/Labels.properties", COMPLETE_LABELS)?;
    test.write_file("i18n/de/Labels.properties", COMPLETE_LABELS)?;
    test.write_file("i18n/draft/Labels.properties", "retries=x\n")?;
    test.write_file("other/Labels.properties", "retries=x\n")?;

    assert_cmd_snapshot!(test.check_command(), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Checked 2 property files - no issues found

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_missing_schema_is_internal_error() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("Labels.properties", "title=x\n")?;

    insta::with_settings!({filters => vec![(r#""[^"]*/schema\.json""#, r#""[ROOT]/schema.json""#)]}, {
        assert_cmd_snapshot!(test.check_command(), @r#"
        success: false
        exit_code: 2
        ----- stdout -----

        ----- stderr -----
        Error: Failed to read schema file: "[ROOT]/schema.json": No such file or directory (os error 2)
        "#);
    });

    Ok(())
}

#[test]
fn test_help() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().arg("--help").output()?;
    let stdout = String::from_utf8(output.stdout)?;

    assert!(output.status.success());
    for command in ["check", "get", "init"] {
        assert!(stdout.contains(command));
    }

    Ok(())
}
