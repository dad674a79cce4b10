use anyhow::{Context, Result, bail};
use tracing::debug;

use super::super::{
    args::TranslateCommand,
    exit_status::ExitStatus,
    report::{print_record, print_translate_start, print_translate_summary},
};
use crate::{
    config::{API_KEY_ENV_VARS, Config, api_key_from_env},
    core::{
        TranslateContext,
        aggregate::{aggregate, write_evidence, write_translations},
    },
    translate::{EngineSettings, EscalationEngine, OpenAiClient},
};

/// Scan, escalate every key through the translation tiers, write the results.
///
/// Returns `Failure` when any key lost a tier; the output file still holds
/// the best translation each key reached.
pub fn translate(cmd: TranslateCommand) -> Result<ExitStatus> {
    let Some(api_key) = api_key_from_env() else {
        bail!(
            "No API key found. Set one of: {}",
            API_KEY_ENV_VARS.join(", ")
        );
    };

    let mut ctx = TranslateContext::new(&cmd.common)?;
    apply_overrides(&mut ctx.config, &cmd);
    ctx.config.validate()?;

    let config = &ctx.config;
    let client = OpenAiClient::new(&config.endpoint, api_key, &config.model)
        .context("Failed to create HTTP client")?;
    let engine = EscalationEngine::new(client, EngineSettings::from_config(config));
    debug!(
        model = %config.model,
        endpoint = %config.endpoint,
        max_concurrency = config.max_concurrency,
        "starting escalation"
    );

    print_translate_start(ctx.records.len(), ctx.found_count(), &config.locale);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;
    let records = std::mem::take(&mut ctx.records);
    let records = runtime.block_on(engine.escalate_all(records, print_record));

    let output = ctx.output_path();
    write_translations(&output, &records)?;
    if let Some(path) = ctx.evidence_path() {
        write_evidence(&path, &records)?;
    }

    let failed = records.iter().filter(|r| r.failure.is_some()).count();
    print_translate_summary(records.len(), aggregate(&records).len(), failed, &output);

    if failed > 0 {
        Ok(ExitStatus::Failure)
    } else {
        Ok(ExitStatus::Success)
    }
}

fn apply_overrides(config: &mut Config, cmd: &TranslateCommand) {
    if let Some(ref locale) = cmd.locale {
        config.locale = locale.clone();
    }
    if let Some(ref output) = cmd.output {
        config.output_file = output.to_string_lossy().to_string();
    }
    if let Some(max_concurrency) = cmd.max_concurrency {
        config.max_concurrency = max_concurrency;
    }
    if let Some(ref endpoint) = cmd.endpoint {
        config.endpoint = endpoint.clone();
    }
    if let Some(ref model) = cmd.model {
        config.model = model.clone();
    }
}
