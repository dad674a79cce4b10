use anyhow::Result;

use crate::{CliTest, stderr, stdout};

fn project() -> Result<CliTest> {
    let test = CliTest::with_file("messages/en.json", r#"{"Home": {"title": "Welcome"}}"#)?;
    test.write_file(
        "app/page.tsx",
        "export function Home() {\n  return <h1>{t(\"title\")}</h1>;\n}\n",
    )?;
    Ok(test)
}

#[test]
fn test_translate_requires_api_key() -> Result<()> {
    let test = project()?;

    let output = test.translate_command().output()?;

    assert_eq!(output.status.code(), Some(2));
    assert_eq!(
        stderr(&output),
        "Error: No API key found. Set one of: CTXLATE_API_KEY, OPENROUTER_API_KEY\n"
    );
    assert!(!test.root().join("translations.json").exists());
    Ok(())
}

#[test]
fn test_translate_with_unreachable_service_writes_empty_output() -> Result<()> {
    let test = project()?;

    let output = test
        .translate_command()
        .env("CTXLATE_API_KEY", "test-key")
        .args(["--endpoint", "http://127.0.0.1:9", "--locale", "ja-JP"])
        .output()?;

    assert_eq!(output.status.code(), Some(1), "stderr: {}", stderr(&output));
    let out = stdout(&output);
    assert!(out.contains("Translating 1 key into ja-JP (1 with usage context)"));
    assert!(out.contains("✘ Home.title"));
    assert!(out.contains("= error: bare tier failed"));
    assert!(out.contains("warning: 1 of 1 key lost a tier to a generation error"));
    assert_eq!(test.read_file("translations.json")?, "{}\n");
    Ok(())
}

#[test]
fn test_translate_rejects_zero_concurrency() -> Result<()> {
    let test = project()?;

    let output = test
        .translate_command()
        .env("CTXLATE_API_KEY", "test-key")
        .args(["--max-concurrency", "0"])
        .output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("'maxConcurrency' must be at least 1"));
    Ok(())
}
