use anyhow::Result;
use serde_json::{Value, json};

use crate::{CliTest, stderr, stdout};

#[test]
fn test_scan_reports_usage() -> Result<()> {
    let test = CliTest::with_file(
        "messages/en.json",
        r#"{"Home": {"title": "Welcome"}, "Footer": {"copy": "Copyright"}}"#,
    )?;
    test.write_file(
        "app/page.tsx",
        "export function Home() {\n  return <h1>{t(\"title\")}</h1>;\n}\n",
    )?;

    let output = test.scan_command().output()?;

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    insta::assert_snapshot!(stdout(&output), @r#"
    ✓ Home.title  app/page.tsx
        function Home() { return <h1>{t("---Welcome---")}</h1>; }
    ✘ Footer.copy  not found

    ✓ Found usage for 1 of 2 keys in 1 source file
    "#);
    Ok(())
}

#[test]
fn test_scan_writes_evidence_file() -> Result<()> {
    let test = CliTest::with_file("messages/en.json", r#"{"Nav": {"home": "Home"}}"#)?;
    test.write_file(
        "components/nav.tsx",
        "export const Nav = () => <a>{t(\"home\")}</a>;\n",
    )?;

    let output = test
        .scan_command()
        .args(["--evidence", "reports/evidence.json"])
        .output()?;

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    let evidence: Value = serde_json::from_str(&test.read_file("reports/evidence.json")?)?;
    let entry = &evidence[0];
    assert_eq!(entry["key"], json!("Nav.home"));
    assert_eq!(entry["found"], json!(true));
    assert_eq!(entry["sourceFile"], json!("components/nav.tsx"));
    Ok(())
}

#[test]
fn test_scan_respects_ignores() -> Result<()> {
    let test = CliTest::with_file(".ctxlaterc.json", r#"{"ignores": ["legacy"]}"#)?;
    test.write_file("messages/en.json", r#"{"Old": {"label": "Old"}}"#)?;
    test.write_file(
        "legacy/old.tsx",
        "function Old() { return t(\"label\"); }\n",
    )?;

    let output = test.scan_command().output()?;

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("✘ Old.label  not found"));
    Ok(())
}

#[test]
fn test_scan_fails_on_parse_error() -> Result<()> {
    let test = CliTest::with_file("messages/en.json", r#"{"A": {"b": "c"}}"#)?;
    test.write_file("app/broken.tsx", "function A( { return t(\"b\"); }\n")?;

    let output = test.scan_command().output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("broken.tsx"));
    Ok(())
}

#[test]
fn test_scan_fails_without_message_file() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.scan_command().output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).starts_with("Error: Failed to read JSON file"));
    Ok(())
}

#[test]
fn test_scan_finds_config_above_relative_source_root() -> Result<()> {
    let test = CliTest::with_file(".ctxlaterc.json", r#"{"translationFunction": "tr"}"#)?;
    test.write_file("web/messages/en.json", r#"{"Nav": {"home": "Home"}}"#)?;
    test.write_file(
        "web/components/nav.tsx",
        "export const Nav = () => <a>{tr(\"home\")}</a>;\n",
    )?;

    let output = test.scan_command().args(["--source-root", "web"]).output()?;

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("✓ Nav.home  web/components/nav.tsx"));
    Ok(())
}

#[test]
fn test_scan_fails_for_missing_source_root() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.scan_command().args(["--source-root", "nowhere"]).output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).starts_with("Error: Source root not found: nowhere"));
    Ok(())
}
