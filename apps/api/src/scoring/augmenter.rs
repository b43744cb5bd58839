//! AI augmentation: pluggable, trait-based enrichment of a heuristic evaluation.
//!
//! Default: `OpenAiAugmenter` (one chat-completions call per request).
//! The engine holds an `Arc<dyn AugmenterProvider>` and resolves an augmenter
//! per request from the caller's credential or the configured default.
//! Every failure is recoverable; the engine falls back to heuristics.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tracing::warn;

use crate::llm_client::prompts::JSON_ONLY_SYSTEM;
use crate::llm_client::{LlmClient, LlmError};
use crate::scoring::models::{
    CompanyType, EliteCriteria, EliteEvaluation, Industry, JobContext, RoleType, Seniority,
    SkillsAnalysis,
};
use crate::scoring::prompts::build_augment_prompt;

#[derive(Debug, Error)]
pub enum AugmentError {
    #[error("augmentation unavailable: {0}")]
    Unavailable(String),

    #[error("augmentation timed out after {0:?}")]
    Timeout(Duration),

    #[error(transparent)]
    Llm(#[from] LlmError),

    #[error("malformed augmentation response: {0}")]
    Malformed(String),
}

/// What one request sends to the model.
#[derive(Debug, Clone, Copy)]
pub struct AugmentRequest<'a> {
    pub resume_text: &'a str,
    pub job_description: &'a str,
    pub collateral: Option<&'a str>,
    pub heuristic_context: &'a JobContext,
}

/// Everything the model contributes, already shape-checked.
#[derive(Debug, Clone)]
pub struct Augmentation {
    pub context: JobContext,
    pub elite_criteria: Option<EliteCriteria>,
    pub elite_evaluation: Option<EliteEvaluation>,
    pub skills: SkillsAnalysis,
}

/// Job context exactly as the model must return it. Only seniority may be
/// omitted.
#[derive(Debug, Deserialize)]
struct AiContext {
    industry: Industry,
    company_type: CompanyType,
    role_type: RoleType,
    #[serde(default)]
    seniority: Seniority,
}

impl From<AiContext> for JobContext {
    fn from(ctx: AiContext) -> Self {
        Self {
            industry: ctx.industry,
            company_type: ctx.company_type,
            role_type: ctx.role_type,
            seniority: ctx.seniority,
        }
    }
}

/// Raw model reply. `context` and `skills` are strict; the display-only
/// sections stay as JSON until conversion so a bad one can be dropped alone.
#[derive(Debug, Deserialize)]
pub struct AugmentationPayload {
    context: AiContext,
    #[serde(default)]
    elite_criteria: Option<Value>,
    #[serde(default)]
    elite_evaluation: Option<Value>,
    skills: SkillsAnalysis,
}

impl TryFrom<AugmentationPayload> for Augmentation {
    type Error = AugmentError;

    fn try_from(payload: AugmentationPayload) -> Result<Self, AugmentError> {
        if !payload.skills.match_percentage.is_finite() {
            return Err(AugmentError::Malformed(
                "match_percentage is not a finite number".to_string(),
            ));
        }
        Ok(Self {
            context: payload.context.into(),
            elite_criteria: display_section(payload.elite_criteria, "elite_criteria"),
            elite_evaluation: display_section::<EliteEvaluation>(
                payload.elite_evaluation,
                "elite_evaluation",
            )
            .map(EliteEvaluation::clamped),
            skills: payload.skills,
        })
    }
}

/// Parses an optional display-only section, dropping it with a warning when
/// its shape is wrong.
fn display_section<T: DeserializeOwned>(raw: Option<Value>, name: &str) -> Option<T> {
    match serde_json::from_value(raw?) {
        Ok(section) => Some(section),
        Err(e) => {
            warn!("Dropping malformed {name} from augmentation: {e}");
            None
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definitions
// ────────────────────────────────────────────────────────────────────────────

/// Implement this to swap the augmentation backend without touching the engine.
#[async_trait]
pub trait Augmenter: Send + Sync {
    async fn augment(&self, request: &AugmentRequest<'_>) -> Result<Augmentation, AugmentError>;
}

/// Resolves an augmenter for one request. `None` means augmentation is
/// unavailable, e.g. because no credential exists.
pub trait AugmenterProvider: Send + Sync {
    fn resolve(&self, api_key: Option<&str>) -> Option<Arc<dyn Augmenter>>;
}

// ────────────────────────────────────────────────────────────────────────────
// OpenAI backend
// ────────────────────────────────────────────────────────────────────────────

pub struct OpenAiAugmenter(pub LlmClient);

#[async_trait]
impl Augmenter for OpenAiAugmenter {
    async fn augment(&self, request: &AugmentRequest<'_>) -> Result<Augmentation, AugmentError> {
        let prompt = build_augment_prompt(
            request.resume_text,
            request.job_description,
            request.collateral,
            request.heuristic_context,
        );

        let payload: AugmentationPayload = self
            .0
            .call_json(&prompt, JSON_ONLY_SYSTEM)
            .await
            .map_err(|e| match e {
                LlmError::Parse(parse) => AugmentError::Malformed(parse.to_string()),
                other => AugmentError::Llm(other),
            })?;

        payload.try_into()
    }
}

/// Builds an `OpenAiAugmenter` per request. A per-request key overrides the
/// configured default.
pub struct OpenAiAugmenterProvider {
    default_key: Option<String>,
    base_url: String,
    timeout: Duration,
}

impl OpenAiAugmenterProvider {
    pub fn new(default_key: Option<String>, base_url: String, timeout: Duration) -> Self {
        Self {
            default_key,
            base_url,
            timeout,
        }
    }
}

impl AugmenterProvider for OpenAiAugmenterProvider {
    fn resolve(&self, api_key: Option<&str>) -> Option<Arc<dyn Augmenter>> {
        let key = api_key
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .or(self.default_key.as_deref())?;

        match LlmClient::new(key.to_string(), &self.base_url, self.timeout) {
            Ok(client) => Some(Arc::new(OpenAiAugmenter(client))),
            Err(e) => {
                warn!("Could not build LLM client, skipping augmentation: {e}");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::models::{Confidence, EliteRecommendation};

    fn provider(default_key: Option<&str>) -> OpenAiAugmenterProvider {
        OpenAiAugmenterProvider::new(
            default_key.map(str::to_string),
            "http://127.0.0.1:9/v1".to_string(),
            Duration::from_secs(1),
        )
    }

    fn parse(json: &str) -> Result<Augmentation, AugmentError> {
        serde_json::from_str::<AugmentationPayload>(json)
            .map_err(|e| AugmentError::Malformed(e.to_string()))?
            .try_into()
    }

    const SKILLS: &str = r#""skills": {"match_percentage": 90, "confidence": "high"}"#;
    const CONTEXT: &str =
        r#""context": {"industry": "tech", "company_type": "startup", "role_type": "technical"}"#;

    #[test]
    fn test_no_credential_means_unavailable() {
        assert!(provider(None).resolve(None).is_none());
        assert!(provider(None).resolve(Some("   ")).is_none());
    }

    #[test]
    fn test_request_key_or_default_resolves() {
        assert!(provider(None).resolve(Some("sk-request")).is_some());
        assert!(provider(Some("sk-default")).resolve(None).is_some());
    }

    #[test]
    fn test_augmentation_parses_expected_shape() {
        let json = r#"{
            "context": {"industry": "tech", "company_type": "startup", "role_type": "technical", "seniority": "senior"},
            "elite_criteria": null,
            "elite_evaluation": null,
            "skills": {"match_percentage": 72.5, "matched_skills": ["rust"], "confidence": "medium"}
        }"#;
        let aug = parse(json).unwrap();
        assert_eq!(aug.context.company_type, CompanyType::Startup);
        assert_eq!(aug.context.seniority, Seniority::Senior);
        assert!(aug.elite_criteria.is_none());
        assert!(aug.elite_evaluation.is_none());
        assert_eq!(aug.skills.confidence, Confidence::Medium);
    }

    #[test]
    fn test_seniority_may_be_omitted() {
        let aug = parse(&format!("{{{CONTEXT}, {SKILLS}}}")).unwrap();
        assert_eq!(aug.context.seniority, Seniority::Mid);
        assert_eq!(aug.context.role_type, RoleType::Technical);
    }

    #[test]
    fn test_empty_context_is_malformed() {
        let err = parse(&format!(r#"{{"context": {{}}, {SKILLS}}}"#)).unwrap_err();
        assert!(matches!(err, AugmentError::Malformed(_)));
    }

    #[test]
    fn test_partial_context_is_malformed() {
        let json = format!(r#"{{"context": {{"industry": "tech", "role_type": "technical"}}, {SKILLS}}}"#);
        let err = parse(&json).unwrap_err();
        assert!(matches!(err, AugmentError::Malformed(msg) if msg.contains("company_type")));
    }

    #[test]
    fn test_missing_context_or_skills_is_malformed() {
        assert!(matches!(parse(&format!("{{{SKILLS}}}")), Err(AugmentError::Malformed(_))));
        assert!(matches!(parse(&format!("{{{CONTEXT}}}")), Err(AugmentError::Malformed(_))));
    }

    #[test]
    fn test_bad_elite_criteria_is_dropped_alone() {
        let json = format!(
            r#"{{{CONTEXT}, "elite_criteria": {{"mission_critical_skills": {{"rust": "expert"}}}}, {SKILLS}}}"#
        );
        let aug = parse(&json).unwrap();
        assert!(aug.elite_criteria.is_none());
        assert_eq!(aug.context.company_type, CompanyType::Startup);
        assert_eq!(aug.skills.match_percentage, 90.0);
    }

    #[test]
    fn test_elite_evaluation_parsed_and_clamped() {
        let json = format!(
            r#"{{{CONTEXT}, "elite_evaluation": {{
                "domain_mastery": {{"score": 12, "evidence": ["distributed systems"]}},
                "overall_score": 8.5,
                "strengths": ["scale"],
                "concerns": [],
                "recommendation": "submit"
            }}, {SKILLS}}}"#
        );
        let eval = parse(&json).unwrap().elite_evaluation.unwrap();
        assert_eq!(eval.recommendation, EliteRecommendation::Submit);
        assert_eq!(eval.overall_score, 8.5);
        assert_eq!(eval.domain_mastery.map(|d| d.score), Some(10.0));
    }

    #[test]
    fn test_bad_elite_evaluation_is_dropped_alone() {
        let json = format!(r#"{{{CONTEXT}, "elite_evaluation": {{"recommendation": "maybe"}}, {SKILLS}}}"#);
        let aug = parse(&json).unwrap();
        assert!(aug.elite_evaluation.is_none());
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_an_error() {
        let augmenter = provider(Some("sk-test")).resolve(None).unwrap();
        let ctx = JobContext::default();
        let request = AugmentRequest {
            resume_text: "resume",
            job_description: "jd",
            collateral: None,
            heuristic_context: &ctx,
        };
        assert!(augmenter.augment(&request).await.is_err());
    }
}
