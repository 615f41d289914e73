use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;

use crate::{CliTest, LABELS_SCHEMA};

fn get_command(test: &CliTest, args: &[&str]) -> std::process::Command {
    let mut cmd = test.get_command();
    cmd.args(args);
    cmd
}

#[test]
fn test_get_string() -> Result<()> {
    let test = CliTest::with_schema(LABELS_SCHEMA)?;
    test.write_file("Labels.properties", "title=Dashboard\n")?;

    assert_cmd_snapshot!(get_command(&test, &["title", "--file", "Labels.properties"]), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    Dashboard

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_get_default_with_args() -> Result<()> {
    let test = CliTest::with_schema(LABELS_SCHEMA)?;
    test.write_file("Labels.properties", "")?;

    assert_cmd_snapshot!(get_command(&test, &["greeting", "World", "-f", "Labels.properties"]), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    Hello, World!

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_get_typed_values_print_as_json() -> Result<()> {
    let test = CliTest::with_schema(LABELS_SCHEMA)?;
    test.write_file(
        "Labels.properties",
        "retries=5\nfruits=apple, pear\\,plum\ncolors=red,dark\\,blue\nred=Rouge\ndark\\,blue=Marine\n",
    )?;

    assert_cmd_snapshot!(get_command(&test, &["retries", "-f", "Labels.properties"]), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    5

    ----- stderr -----
    ");

    assert_cmd_snapshot!(get_command(&test, &["fruits", "-f", "Labels.properties"]), @r#"
    success: true
    exit_code: 0
    ----- stdout -----
    ["apple","pear,plum"]

    ----- stderr -----
    "#);

    assert_cmd_snapshot!(get_command(&test, &["colors", "-f", "Labels.properties"]), @r#"
    success: true
    exit_code: 0
    ----- stdout -----
    {"dark,blue":"Marine","red":"Rouge"}

    ----- stderr -----
    "#);

    Ok(())
}

#[test]
fn test_later_files_override_earlier() -> Result<()> {
    let test = CliTest::with_schema(LABELS_SCHEMA)?;
    test.write_file("Labels.properties", "title=Dashboard\nretries=5\n")?;
    test.write_file("Labels_fr.properties", "title=Tableau de bord\n")?;

    let layered = |key| [key, "-f", "Labels.properties", "-f", "Labels_fr.properties"];

    assert_cmd_snapshot!(get_command(&test, &layered("title")), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    Tableau de bord

    ----- stderr -----
    ");

    assert_cmd_snapshot!(get_command(&test, &layered("retries")), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    5

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_get_unresolved_key() -> Result<()> {
    let test = CliTest::with_schema(LABELS_SCHEMA)?;
    test.write_file("Labels.properties", "")?;

    assert_cmd_snapshot!(
        get_command(&test, &["title", "-f", "Labels.properties", "--locale", "fr"]),
        @r"
    success: false
    exit_code: 1
    ----- stdout -----

    ----- stderr -----
    warning: unresolved key 'title' for locale 'fr'
    "
    );

    Ok(())
}

#[test]
fn test_get_args_for_non_string_is_error() -> Result<()> {
    let test = CliTest::with_schema(LABELS_SCHEMA)?;
    test.write_file("Labels.properties", "")?;

    assert_cmd_snapshot!(get_command(&test, &["retries", "x", "-f", "Labels.properties"]), @r"
    success: false
    exit_code: 2
    ----- stdout -----

    ----- stderr -----
    Error: format arguments supplied for key 'retries', which resolved to a integer value
    ");

    Ok(())
}

#[test]
fn test_get_malformed_file_is_error() -> Result<()> {
    let test = CliTest::with_schema(LABELS_SCHEMA)?;
    test.write_file("Labels.properties", "retries=lots\n")?;

    assert_cmd_snapshot!(get_command(&test, &["retries", "-f", "Labels.properties"]), @r#"
    success: false
    exit_code: 2
    ----- stdout -----

    ----- stderr -----
    Error: Failed to load "Labels.properties": malformed integer value for key 'retries': "lots" (line 1)
    "#);

    Ok(())
}
