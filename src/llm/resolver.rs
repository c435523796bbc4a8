use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use tracing::{debug, info, warn};

use crate::config::ResolverConfig;
use crate::errors::VoiceError;
use crate::utils::{truncate_for_log, truncate_for_response};
use super::catalog::HF_FALLBACK_MODEL;
use super::huggingface::HuggingFaceProvider;
use super::local::fallback_reply;
use super::openrouter::OpenRouterProvider;
use super::provider::LLMProvider;
use super::transport::with_deadline;
use super::types::{AttemptOutcome, GenerationParams, GenerationResult, ProviderAttempt, ProviderKind};

pub const HF_UPSTREAM_ERROR: &str = "Upstream model error (Hugging Face)";

/// What happens when every candidate of a tier has failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Move on to the next tier.
    Continue,
    /// Stop and report a 502 carrying the first candidate's error.
    Surface { error: &'static str },
}

/// A group of candidates that share a provider label and failure policy.
pub struct Tier {
    pub kind: ProviderKind,
    pub candidates: Vec<Arc<dyn LLMProvider>>,
    pub policy: FailurePolicy,
    /// Whether the successful model id is reported in the result.
    pub reports_model: bool,
}

impl Tier {
    pub fn soft(kind: ProviderKind, candidates: Vec<Arc<dyn LLMProvider>>) -> Self {
        Self { kind, candidates, policy: FailurePolicy::Continue, reports_model: false }
    }

    pub fn hard(kind: ProviderKind, candidates: Vec<Arc<dyn LLMProvider>>, error: &'static str) -> Self {
        Self { kind, candidates, policy: FailurePolicy::Surface { error }, reports_model: true }
    }
}

/// Result of a resolution plus every upstream call it took to get there.
#[derive(Debug, Clone)]
pub struct Resolution {
    pub result: GenerationResult,
    pub attempts: Vec<ProviderAttempt>,
}

/// Tries each configured provider in order and returns the first reply.
///
/// OpenRouter failures are absorbed. Hugging Face gets one immediate retry
/// against `gpt2`; if that fails too the error is surfaced. With nothing
/// configured (or only a failed OpenRouter) a local placeholder reply is
/// returned. Every call runs under `attempt_timeout`.
pub struct Resolver {
    tiers: Vec<Tier>,
    attempt_timeout: Duration,
}

impl Resolver {
    pub fn new(tiers: Vec<Tier>, attempt_timeout: Duration) -> Self {
        Self { tiers, attempt_timeout }
    }

    pub fn from_config(config: &ResolverConfig, client: Client) -> Self {
        let params = GenerationParams {
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        };
        let mut tiers = Vec::new();

        if let Some(key) = &config.openrouter_key {
            let provider = OpenRouterProvider::new(
                client.clone(),
                key,
                &config.openrouter_model,
                &config.openrouter_base_url,
                params,
            );
            let provider: Arc<dyn LLMProvider> = Arc::new(provider);
            tiers.push(Tier::soft(ProviderKind::OpenRouter, vec![provider]));
        }

        if let Some(key) = &config.hf_key {
            let primary: Arc<dyn LLMProvider> = Arc::new(HuggingFaceProvider::new(
                client.clone(),
                key,
                &config.hf_model,
                &config.hf_base_url,
                params,
            ));
            let mut candidates = vec![primary];
            if config.hf_model != HF_FALLBACK_MODEL {
                let retry: Arc<dyn LLMProvider> = Arc::new(HuggingFaceProvider::new(
                    client,
                    key,
                    HF_FALLBACK_MODEL,
                    &config.hf_base_url,
                    params,
                ));
                candidates.push(retry);
            }
            tiers.push(Tier::hard(ProviderKind::HuggingFace, candidates, HF_UPSTREAM_ERROR));
        }

        Self::new(tiers, config.attempt_timeout)
    }

    /// Names of the providers that will be tried, in order.
    pub fn chain(&self) -> Vec<String> {
        self.tiers
            .iter()
            .flat_map(|t| t.candidates.iter())
            .map(|p| format!("{}:{}", p.provider_name(), p.model_name()))
            .collect()
    }

    pub async fn resolve(&self, prompt: &str) -> Result<Resolution, VoiceError> {
        let mut attempts = Vec::new();

        for tier in &self.tiers {
            let mut first_failure: Option<String> = None;

            for provider in &tier.candidates {
                let (name, model) = (provider.provider_name(), provider.model_name());
                info!(provider = name, model, "Attempting provider");

                match self.attempt(provider.as_ref(), prompt).await {
                    Ok(text) => {
                        attempts.push(ProviderAttempt {
                            provider_name: name.to_string(),
                            model_id: model.to_string(),
                            outcome: AttemptOutcome::Success(text.clone()),
                        });
                        let model = tier.reports_model.then(|| model.to_string());
                        return Ok(Resolution {
                            result: GenerationResult { text, provider: tier.kind, model, file_url: None },
                            attempts,
                        });
                    }
                    Err(e) => {
                        let detail = e.to_string();
                        warn!(provider = name, model, error = %truncate_for_log(&detail), "Provider failed");
                        attempts.push(ProviderAttempt {
                            provider_name: name.to_string(),
                            model_id: model.to_string(),
                            outcome: AttemptOutcome::Failure(truncate_for_response(&detail)),
                        });
                        first_failure.get_or_insert(detail);
                    }
                }
            }

            if let (FailurePolicy::Surface { error }, Some(detail)) = (tier.policy, first_failure) {
                return Err(VoiceError::gateway(error, truncate_for_response(&detail)));
            }
        }

        debug!("No provider produced a reply, using local fallback");
        Ok(Resolution {
            result: GenerationResult {
                text: fallback_reply(prompt),
                provider: ProviderKind::Fallback,
                model: None,
                file_url: None,
            },
            attempts,
        })
    }

    async fn attempt(&self, provider: &dyn LLMProvider, prompt: &str) -> Result<String, VoiceError> {
        let label = format!("{} ({})", provider.provider_name(), provider.model_name());
        with_deadline(&label, self.attempt_timeout, provider.complete(prompt)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicU32, Ordering};

    enum Behavior {
        Reply(&'static str),
        Fail,
        Hang,
    }

    struct FakeProvider {
        name: &'static str,
        model: &'static str,
        behavior: Behavior,
        calls: AtomicU32,
    }

    impl FakeProvider {
        fn new(name: &'static str, model: &'static str, behavior: Behavior) -> Arc<Self> {
            Arc::new(Self { name, model, behavior, calls: AtomicU32::new(0) })
        }

        fn calls(&self) -> u32 {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl LLMProvider for FakeProvider {
        async fn complete(&self, _prompt: &str) -> Result<String, VoiceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.behavior {
                Behavior::Reply(text) => Ok(text.to_string()),
                Behavior::Fail => Err(VoiceError::Upstream {
                    provider: self.name.to_string(),
                    status: 500,
                    body: format!("{} exploded", self.model),
                }),
                Behavior::Hang => {
                    tokio::time::sleep(Duration::from_secs(30)).await;
                    Ok("too late".to_string())
                }
            }
        }

        fn provider_name(&self) -> &str { self.name }
        fn model_name(&self) -> &str { self.model }
    }

    fn dynamic(provider: &Arc<FakeProvider>) -> Arc<dyn LLMProvider> {
        provider.clone()
    }

    fn timeout() -> Duration {
        Duration::from_secs(5)
    }

    #[tokio::test]
    async fn test_no_tiers_returns_fallback() {
        let resolver = Resolver::new(vec![], timeout());
        let res = resolver.resolve("Hello").await.unwrap();
        assert_eq!(res.result.provider, ProviderKind::Fallback);
        assert_eq!(res.result.text, "Fallback reply: I heard \"Hello\". (No external model configured.)");
        assert!(res.result.model.is_none());
        assert!(res.attempts.is_empty());
    }

    #[tokio::test]
    async fn test_first_success_short_circuits() {
        let or = FakeProvider::new("openrouter", "deepseek", Behavior::Reply("from openrouter"));
        let hf = FakeProvider::new("huggingface", "flan", Behavior::Reply("from hf"));
        let resolver = Resolver::new(
            vec![
                Tier::soft(ProviderKind::OpenRouter, vec![dynamic(&or)]),
                Tier::hard(ProviderKind::HuggingFace, vec![dynamic(&hf)], HF_UPSTREAM_ERROR),
            ],
            timeout(),
        );

        let res = resolver.resolve("q").await.unwrap();
        assert_eq!(res.result.provider, ProviderKind::OpenRouter);
        assert_eq!(res.result.text, "from openrouter");
        assert!(res.result.model.is_none());
        assert_eq!(or.calls(), 1);
        assert_eq!(hf.calls(), 0);
    }

    #[tokio::test]
    async fn test_empty_reply_still_counts_as_success() {
        let or = FakeProvider::new("openrouter", "deepseek", Behavior::Reply(""));
        let hf = FakeProvider::new("huggingface", "flan", Behavior::Reply("from hf"));
        let resolver = Resolver::new(
            vec![
                Tier::soft(ProviderKind::OpenRouter, vec![dynamic(&or)]),
                Tier::hard(ProviderKind::HuggingFace, vec![dynamic(&hf)], HF_UPSTREAM_ERROR),
            ],
            timeout(),
        );

        let res = resolver.resolve("q").await.unwrap();
        assert_eq!(res.result.provider, ProviderKind::OpenRouter);
        assert_eq!(res.result.text, "");
        assert_eq!(hf.calls(), 0);
    }

    #[tokio::test]
    async fn test_soft_failure_falls_through_to_fallback() {
        let or = FakeProvider::new("openrouter", "deepseek", Behavior::Fail);
        let resolver = Resolver::new(vec![Tier::soft(ProviderKind::OpenRouter, vec![dynamic(&or)])], timeout());

        let res = resolver.resolve("Hi").await.unwrap();
        assert_eq!(res.result.provider, ProviderKind::Fallback);
        assert_eq!(or.calls(), 1);
        assert_eq!(res.attempts.len(), 1);
        assert!(!res.attempts[0].succeeded());
    }

    #[tokio::test]
    async fn test_secondary_model_reported_on_retry_success() {
        let primary = FakeProvider::new("huggingface", "google/flan-t5-small", Behavior::Fail);
        let retry = FakeProvider::new("huggingface", "gpt2", Behavior::Reply("gpt2 says hi"));
        let resolver = Resolver::new(
            vec![Tier::hard(ProviderKind::HuggingFace, vec![dynamic(&primary), dynamic(&retry)], HF_UPSTREAM_ERROR)],
            timeout(),
        );

        let res = resolver.resolve("q").await.unwrap();
        assert_eq!(res.result.provider, ProviderKind::HuggingFace);
        assert_eq!(res.result.model.as_deref(), Some("gpt2"));
        assert_eq!(res.result.text, "gpt2 says hi");
        assert_eq!(primary.calls(), 1);
        assert_eq!(retry.calls(), 1);
        assert_eq!(res.attempts.len(), 2);
    }

    #[tokio::test]
    async fn test_hard_tier_exhausted_surfaces_primary_error() {
        let primary = FakeProvider::new("huggingface", "google/flan-t5-small", Behavior::Fail);
        let retry = FakeProvider::new("huggingface", "gpt2", Behavior::Fail);
        let resolver = Resolver::new(
            vec![Tier::hard(ProviderKind::HuggingFace, vec![dynamic(&primary), dynamic(&retry)], HF_UPSTREAM_ERROR)],
            timeout(),
        );

        match resolver.resolve("q").await {
            Err(VoiceError::Gateway { error, details }) => {
                assert_eq!(error, HF_UPSTREAM_ERROR);
                assert!(details.contains("google/flan-t5-small exploded"));
            }
            other => panic!("expected gateway error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_hung_provider_times_out_and_cascade_continues() {
        let or = FakeProvider::new("openrouter", "slow", Behavior::Hang);
        let hf = FakeProvider::new("huggingface", "flan", Behavior::Reply("hf answer"));
        let resolver = Resolver::new(
            vec![
                Tier::soft(ProviderKind::OpenRouter, vec![dynamic(&or)]),
                Tier::hard(ProviderKind::HuggingFace, vec![dynamic(&hf)], HF_UPSTREAM_ERROR),
            ],
            Duration::from_millis(50),
        );

        let res = resolver.resolve("q").await.unwrap();
        assert_eq!(res.result.provider, ProviderKind::HuggingFace);
        match &res.attempts[0].outcome {
            AttemptOutcome::Failure(detail) => assert!(detail.starts_with("Timeout:")),
            other => panic!("expected timeout failure, got {other:?}"),
        }
    }

    fn config() -> ResolverConfig {
        ResolverConfig::default()
    }

    #[test]
    fn test_from_config_without_keys_has_empty_chain() {
        let resolver = Resolver::from_config(&config(), Client::new());
        assert!(resolver.chain().is_empty());
    }

    #[test]
    fn test_from_config_builds_full_chain() {
        let cfg = ResolverConfig {
            openrouter_key: Some("or".into()),
            hf_key: Some("hf".into()),
            ..config()
        };
        let resolver = Resolver::from_config(&cfg, Client::new());
        assert_eq!(
            resolver.chain(),
            vec![
                "openrouter:deepseek/deepseek-chat-v3-0324:free",
                "huggingface:google/flan-t5-small",
                "huggingface:gpt2",
            ]
        );
    }

    #[test]
    fn test_from_config_gpt2_primary_has_no_retry() {
        let cfg = ResolverConfig {
            hf_key: Some("hf".into()),
            hf_model: "gpt2".into(),
            ..config()
        };
        let resolver = Resolver::from_config(&cfg, Client::new());
        assert_eq!(resolver.chain(), vec!["huggingface:gpt2"]);
    }
}
