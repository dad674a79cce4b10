//! Three-tier translation escalation.
//!
//! Each record is escalated by its own task:
//!
//! 1. bare: source text alone, always runs
//! 2. function context: source text plus the evidence snippet
//! 3. AI context: a generated UI description, then a guided translation
//!
//! Tiers 2 and 3 only run for keys with usage evidence. The first failing
//! tier stops that record; earlier tiers keep their output and sibling
//! records are unaffected. A semaphore bounds how many records talk to the
//! service at once.

use std::{sync::Arc, time::Duration};

use tokio::{
    sync::Semaphore,
    task::JoinSet,
    time::{Instant, sleep, timeout, timeout_at},
};
use tracing::{debug, warn};

use super::{
    Completion, GenerationError,
    prompt::{
        BarePrompt, ContextDescriptionPrompt, FunctionContextPrompt, GuidedPrompt, Prompt,
        PromptTemplate, TargetLocale,
    },
};
use crate::{
    config::Config,
    core::{Tier, TierFailure, TranslationRecord, locate::snippet::DELIMITER},
};

const RETRY_BASE_DELAY: Duration = Duration::from_millis(500);

#[derive(Debug, Clone)]
pub struct EngineSettings {
    pub target: Arc<TargetLocale>,
    /// Records escalated concurrently.
    pub max_concurrency: usize,
    /// Limit for one call to the service.
    pub request_timeout: Duration,
    /// Limit for the whole escalation, measured from its start.
    pub deadline: Option<Duration>,
    /// Extra attempts per call after a retryable failure.
    pub max_retries: u32,
    pub retry_base_delay: Duration,
}

impl EngineSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            target: Arc::new(TargetLocale::new(
                config.locale.clone(),
                config.preserve_terms.clone(),
            )),
            max_concurrency: config.max_concurrency.max(1),
            request_timeout: Duration::from_secs(config.request_timeout_secs),
            deadline: config.deadline_secs.map(Duration::from_secs),
            max_retries: config.max_retries,
            retry_base_delay: RETRY_BASE_DELAY,
        }
    }
}

pub struct EscalationEngine<C> {
    client: Arc<C>,
    settings: Arc<EngineSettings>,
}

impl<C: Completion + 'static> EscalationEngine<C> {
    pub fn new(client: C, settings: EngineSettings) -> Self {
        Self {
            client: Arc::new(client),
            settings: Arc::new(settings),
        }
    }

    /// Escalate a single record, annotating it if a tier fails.
    pub async fn escalate(&self, mut record: TranslationRecord) -> TranslationRecord {
        let outcome = run_tiers(self.client.as_ref(), &self.settings, &mut record).await;
        finish(&mut record, outcome);
        record
    }

    /// Escalate every record concurrently.
    ///
    /// `on_complete` sees each record as soon as its task finishes. The
    /// returned records are in input order, one per input record.
    pub async fn escalate_all<F>(
        &self,
        records: Vec<TranslationRecord>,
        mut on_complete: F,
    ) -> Vec<TranslationRecord>
    where
        F: FnMut(&TranslationRecord),
    {
        let deadline = self.settings.deadline.map(|d| Instant::now() + d);
        let semaphore = Arc::new(Semaphore::new(self.settings.max_concurrency));
        let fallback = records.clone();
        let mut slots: Vec<Option<TranslationRecord>> = (0..records.len()).map(|_| None).collect();
        let mut tasks = JoinSet::new();

        for (index, mut record) in records.into_iter().enumerate() {
            let client = Arc::clone(&self.client);
            let settings = Arc::clone(&self.settings);
            let semaphore = Arc::clone(&semaphore);

            tasks.spawn(async move {
                let work = async {
                    let Ok(_permit) = semaphore.acquire().await else {
                        return Err(TierFailure::new(record.pending_tier(), "worker gate closed"));
                    };
                    run_tiers(client.as_ref(), &settings, &mut record).await
                };
                let outcome = match deadline {
                    Some(deadline) => timeout_at(deadline, work).await,
                    None => Ok(work.await),
                };
                let outcome = outcome.unwrap_or_else(|_| {
                    Err(TierFailure::new(record.pending_tier(), "run deadline exceeded"))
                });
                finish(&mut record, outcome);
                (index, record)
            });
        }

        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((index, record)) => {
                    on_complete(&record);
                    slots[index] = Some(record);
                }
                Err(e) => warn!("Escalation task did not complete: {}", e),
            }
        }

        slots
            .into_iter()
            .zip(fallback)
            .map(|(slot, mut original)| {
                slot.unwrap_or_else(|| {
                    original.failure = Some(TierFailure::new(Tier::Bare, "worker task aborted"));
                    original
                })
            })
            .collect()
    }
}

fn finish(record: &mut TranslationRecord, outcome: Result<(), TierFailure>) {
    if let Err(failure) = outcome {
        warn!(key = %record.key, tier = %failure.tier, "{}", failure.message);
        record.failure = Some(failure);
    }
}

/// Run the applicable tiers in order, writing each output as it arrives.
async fn run_tiers<C: Completion + ?Sized>(
    client: &C,
    settings: &EngineSettings,
    record: &mut TranslationRecord,
) -> Result<(), TierFailure> {
    let target = &settings.target;

    let simple = call(
        client,
        settings,
        BarePrompt {
            target: Arc::clone(target),
            text: record.source_text.clone(),
        }
        .into(),
    )
    .await?;
    record.simple_translation = Some(simple);

    if !record.evidence.found {
        return Ok(());
    }

    let contextual = call(
        client,
        settings,
        FunctionContextPrompt {
            target: Arc::clone(target),
            text: record.source_text.clone(),
            snippet: record.evidence.context_snippet.clone(),
        }
        .into(),
    )
    .await?;
    record.contextual_translation = Some(contextual);

    let description = call(
        client,
        settings,
        ContextDescriptionPrompt {
            text: record.source_text.clone(),
            snippet: record.evidence.context_snippet.clone(),
        }
        .into(),
    )
    .await?;
    record.ai_context = Some(description.clone());

    let final_translation = call(
        client,
        settings,
        GuidedPrompt {
            target: Arc::clone(target),
            text: record.source_text.clone(),
            description,
        }
        .into(),
    )
    .await?;
    record.final_translation = Some(final_translation);

    Ok(())
}

/// One step: per-call timeout, retries with exponential backoff.
async fn call<C: Completion + ?Sized>(
    client: &C,
    settings: &EngineSettings,
    prompt: Prompt,
) -> Result<String, TierFailure> {
    let request = prompt.request();
    let mut attempt = 0;

    loop {
        let result = match timeout(settings.request_timeout, client.complete(&request)).await {
            Ok(result) => result.and_then(clean_output),
            Err(_) => Err(GenerationError::Timeout(settings.request_timeout)),
        };

        match result {
            Ok(text) => return Ok(text),
            Err(e) if attempt < settings.max_retries && e.is_retryable() => {
                let delay = settings.retry_base_delay * 2u32.saturating_pow(attempt);
                debug!(step = ?request.step, attempt, "Retrying in {:?}: {}", delay, e);
                sleep(delay).await;
                attempt += 1;
            }
            Err(e) => return Err(TierFailure::new(prompt.step().tier(), e)),
        }
    }
}

/// Trim the reply and drop delimiters the model echoed back.
fn clean_output(text: String) -> Result<String, GenerationError> {
    let trimmed = text.trim();
    let unwrapped = trimmed
        .strip_prefix(DELIMITER)
        .and_then(|rest| rest.strip_suffix(DELIMITER))
        .unwrap_or(trimmed)
        .trim();
    if unwrapped.is_empty() {
        return Err(GenerationError::EmptyResponse);
    }
    Ok(unwrapped.to_string())
}
