use anyhow::{Context, Result};
use serde_json::Value;

use crate::{CliTest, stderr, stdout};

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().arg("init").output()?;

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output), "✓ Created .ctxlaterc.json\n");

    let content = test.read_file(".ctxlaterc.json")?;
    let parsed: Value = serde_json::from_str(&content).context("Config should be valid JSON")?;
    assert_eq!(parsed["locale"], "zh-CN");
    assert_eq!(parsed["messagesFile"], "messages/en.json");
    assert_eq!(parsed["translationFunction"], "t");
    assert!(parsed.get("evidenceFile").is_none());
    assert!(content.contains("\n  \"locale\""), "2-space indentation");

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::with_file(".ctxlaterc.json", "{}")?;

    let output = test.command().arg("init").output()?;

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stderr(&output), "Error: .ctxlaterc.json already exists\n");
    assert_eq!(test.read_file(".ctxlaterc.json")?, "{}");

    Ok(())
}

#[test]
fn test_init_config_is_immediately_usable() -> Result<()> {
    let test = CliTest::new()?;
    test.command().arg("init").output()?;
    test.write_file("messages/en.json", r#"{"App": {"name": "Demo"}}"#)?;

    let output = test.scan_command().output()?;

    assert!(
        output.status.success(),
        "scan should work with initialized config. stderr: {}",
        stderr(&output)
    );
    Ok(())
}
