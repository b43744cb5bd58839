//! FitScore engine: sequences context detection, the optional AI call, the
//! category scorers, the merge and aggregation for one request.
//!
//! The engine holds only immutable configuration, so one instance is shared
//! across concurrent requests without locks.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use serde::Deserialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::scoring::aggregator::{aggregate, Enrichment, Weights, DEFAULT_WEIGHTS};
use crate::scoring::augmenter::{AugmentError, AugmentRequest, Augmentation, AugmenterProvider};
use crate::scoring::context_detector::detect_context;
use crate::scoring::models::{
    CategoryScore, ContextDetection, ContextSource, FitScoreResult, JobContext, SkillsAnalysis,
    SkillsDetail, SkillsSource,
};
use crate::scoring::resume::{ResumeProfile, YearMonth};
use crate::scoring::scorers::skills::skills_curve;
use crate::scoring::scorers::{detect_red_flags, score_all, ScoringInput};
use crate::scoring::tables::ScoringTables;

#[derive(Debug, Error)]
pub enum FitScoreError {
    #[error("{0}")]
    Validation(String),

    #[error("internal scoring error: {0}")]
    Internal(String),
}

fn default_use_gpt4() -> bool {
    true
}

/// One evaluation request.
#[derive(Debug, Clone, Deserialize)]
pub struct FitScoreInput {
    pub resume_text: String,
    pub job_description: String,
    #[serde(default)]
    pub collateral: Option<String>,
    #[serde(default = "default_use_gpt4")]
    pub use_gpt4: bool,
    #[serde(default)]
    pub openai_api_key: Option<String>,
}

impl FitScoreInput {
    fn validate(&self) -> Result<(), FitScoreError> {
        if self.resume_text.trim().is_empty() {
            return Err(FitScoreError::Validation(
                "resume_text is required and must not be empty".to_string(),
            ));
        }
        if self.job_description.trim().is_empty() {
            return Err(FitScoreError::Validation(
                "job_description is required and must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

pub struct FitScoreEngine {
    tables: Arc<ScoringTables>,
    weights: Weights,
    provider: Option<Arc<dyn AugmenterProvider>>,
    ai_timeout: Duration,
}

impl FitScoreEngine {
    pub fn new(
        tables: Arc<ScoringTables>,
        provider: Option<Arc<dyn AugmenterProvider>>,
        ai_timeout: Duration,
    ) -> Self {
        Self {
            tables,
            weights: DEFAULT_WEIGHTS,
            provider,
            ai_timeout,
        }
    }

    #[cfg(test)]
    pub fn with_weights(mut self, weights: Weights) -> Self {
        self.weights = weights;
        self
    }

    /// Evaluates one candidate against one job. Augmentation failures never
    /// surface here; only invalid input and internal faults do.
    pub async fn evaluate(&self, input: &FitScoreInput) -> Result<FitScoreResult, FitScoreError> {
        input.validate()?;

        if !self.weights.is_well_formed() {
            return Err(FitScoreError::Internal(format!(
                "category weights are malformed (sum {})",
                self.weights.sum()
            )));
        }

        info!(
            resume_chars = input.resume_text.len(),
            has_collateral = input.collateral.is_some(),
            use_gpt4 = input.use_gpt4,
            "FitScore evaluation started"
        );

        let now = Utc::now();
        let collateral = input.collateral.as_deref().filter(|c| !c.trim().is_empty());

        let heuristic = detect_context(&input.job_description, collateral, &self.tables);
        let augmentation = if input.use_gpt4 {
            self.augment(input, collateral, &heuristic).await
        } else {
            None
        };

        let (context, source) = match &augmentation {
            Some(a) => (a.context, ContextSource::Ai),
            None => (heuristic, ContextSource::Heuristic),
        };

        let resume = ResumeProfile::parse(
            &input.resume_text,
            &self.tables,
            YearMonth::from_datetime(now),
        );
        let job_description = input.job_description.to_lowercase();
        let scoring_input = ScoringInput {
            resume: &resume,
            job_description: &job_description,
            context: &context,
            tables: &self.tables,
        };

        let mut scores = score_all(&scoring_input);
        let red_flags = detect_red_flags(&scoring_input);

        let gpt4_enhanced = augmentation.is_some();
        let (smart_criteria, elite_evaluation, skills_analysis) = match augmentation {
            Some(a) => {
                scores.skills_match = merge_skills(scores.skills_match, &a.skills);
                (a.elite_criteria, a.elite_evaluation, Some(a.skills))
            }
            None => (None, None, None),
        };

        let enrichment = Enrichment {
            context: ContextDetection { context, source },
            smart_criteria,
            skills_analysis,
            elite_evaluation,
            gpt4_enhanced,
        };
        let result = aggregate(scores, red_flags, enrichment, self.weights, now);

        info!(
            total_score = result.total_score,
            submittable = result.submittable,
            gpt4_enhanced,
            "FitScore evaluated"
        );

        Ok(result)
    }

    /// Runs the single AI call under the timeout. `None` means fall back to
    /// heuristics; the reason is logged.
    async fn augment(
        &self,
        input: &FitScoreInput,
        collateral: Option<&str>,
        heuristic: &JobContext,
    ) -> Option<Augmentation> {
        let augmenter = self
            .provider
            .as_ref()
            .and_then(|p| p.resolve(input.openai_api_key.as_deref()));
        let Some(augmenter) = augmenter else {
            warn!(
                "Augmentation skipped: {}",
                AugmentError::Unavailable("no OpenAI API key configured".to_string())
            );
            return None;
        };

        let request = AugmentRequest {
            resume_text: &input.resume_text,
            job_description: &input.job_description,
            collateral,
            heuristic_context: heuristic,
        };

        let outcome = tokio::time::timeout(self.ai_timeout, augmenter.augment(&request))
            .await
            .unwrap_or(Err(AugmentError::Timeout(self.ai_timeout)));

        match outcome {
            Ok(augmentation) => Some(augmentation),
            Err(e) => {
                warn!("Augmentation failed, using heuristic results: {e}");
                None
            }
        }
    }
}

/// Replaces the heuristic skills detail with the model's analysis, scored
/// through the same curve.
fn merge_skills(
    heuristic: CategoryScore<SkillsDetail>,
    analysis: &SkillsAnalysis,
) -> CategoryScore<SkillsDetail> {
    let match_percentage = analysis.match_percentage.clamp(0.0, 100.0);
    let detail = SkillsDetail {
        match_percentage: Some(match_percentage),
        matched: analysis.matched_skills.clone(),
        missing: analysis.missing_skills.clone(),
        source: SkillsSource::Ai,
        confidence: Some(analysis.confidence),
        ..heuristic.detail
    };
    CategoryScore::new(skills_curve(match_percentage), detail)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    use crate::scoring::aggregator::Assessment;
    use crate::scoring::augmenter::{Augmenter, AugmentationPayload};
    use crate::scoring::models::{
        Category, CompanyType, Confidence, EliteCriteria, EliteDimension, EliteEvaluation,
        EliteRecommendation, FitScoreResponse, Industry, RoleType, Seniority,
    };

    const STRONG_RESUME: &str = "\
Jane Smith
Staff Software Engineer

EDUCATION:
M.S. Computer Science, Stanford University
B.S. Computer Science, MIT

EXPERIENCE:
Staff Software Engineer at Google (2021 - 2024)
- Led a team of 8 engineers building distributed systems with Python, Kubernetes and AWS
- Owned the architecture of the ads platform
Software Engineer at Google (2019 - 2021)
- Built microservices in Python and PostgreSQL

ACHIEVEMENTS:
- Open source maintainer of a popular Python library
- Conference speaker at PyCon

SKILLS:
Python, AWS, Docker, Kubernetes, Terraform, PostgreSQL, Redis, GraphQL, Microservices
";

    const WEAK_RESUME: &str = "\
Alex Doe
Developer at Acme
Jan 2024 - Apr 2024
- Fixed bugs in Python scripts
Developer at Beta
Jun 2023 - Oct 2023
- Wrote reports on AWS usage
";

    const SENIOR_JD: &str = "Senior Software Engineer for a Fortune 500 enterprise. \
Requirements: Python, AWS, Docker, Kubernetes, Terraform, PostgreSQL, Redis, GraphQL, \
microservices and React.";

    enum Behaviour {
        Succeed(Augmentation),
        Reply(&'static str),
        Fail,
        Hang,
    }

    struct StubAugmenter(Behaviour);

    #[async_trait]
    impl Augmenter for StubAugmenter {
        async fn augment(
            &self,
            _request: &AugmentRequest<'_>,
        ) -> Result<Augmentation, AugmentError> {
            match &self.0 {
                Behaviour::Succeed(a) => Ok(a.clone()),
                Behaviour::Reply(raw) => serde_json::from_str::<AugmentationPayload>(raw)
                    .map_err(|e| AugmentError::Malformed(e.to_string()))?
                    .try_into(),
                Behaviour::Fail => Err(AugmentError::Malformed("not json".to_string())),
                Behaviour::Hang => {
                    tokio::time::sleep(Duration::from_secs(3600)).await;
                    Err(AugmentError::Unavailable("unreachable".to_string()))
                }
            }
        }
    }

    struct StubProvider(Arc<dyn Augmenter>);

    impl AugmenterProvider for StubProvider {
        fn resolve(&self, _api_key: Option<&str>) -> Option<Arc<dyn Augmenter>> {
            Some(self.0.clone())
        }
    }

    fn engine(behaviour: Option<Behaviour>) -> FitScoreEngine {
        let provider = behaviour.map(|b| {
            Arc::new(StubProvider(Arc::new(StubAugmenter(b)))) as Arc<dyn AugmenterProvider>
        });
        FitScoreEngine::new(
            Arc::new(ScoringTables::default()),
            provider,
            Duration::from_secs(5),
        )
    }

    fn input(resume: &str, jd: &str, use_gpt4: bool) -> FitScoreInput {
        FitScoreInput {
            resume_text: resume.to_string(),
            job_description: jd.to_string(),
            collateral: None,
            use_gpt4,
            openai_api_key: None,
        }
    }

    fn startup_augmentation() -> Augmentation {
        Augmentation {
            context: JobContext {
                industry: Industry::Tech,
                company_type: CompanyType::Startup,
                role_type: RoleType::Technical,
                seniority: Seniority::Senior,
            },
            elite_criteria: Some(EliteCriteria {
                summary: Some("Owns large distributed systems end to end".to_string()),
                ..EliteCriteria::default()
            }),
            elite_evaluation: Some(EliteEvaluation {
                mission_critical_skills: None,
                elite_company_benchmark: None,
                expected_outcomes: None,
                domain_mastery: Some(EliteDimension {
                    score: 9.0,
                    evidence: vec!["distributed systems".to_string()],
                    ..EliteDimension::default()
                }),
                leadership: None,
                overall_score: 8.0,
                strengths: vec!["Scale".to_string()],
                concerns: Vec::new(),
                recommendation: EliteRecommendation::Submit,
            }),
            skills: SkillsAnalysis {
                match_percentage: 100.0,
                matched_skills: vec!["python".to_string()],
                missing_skills: Vec::new(),
                inferred_skills: Vec::new(),
                confidence: Confidence::High,
            },
        }
    }

    fn without_timestamp(result: FitScoreResult) -> serde_json::Value {
        let mut value = serde_json::to_value(FitScoreResponse::success(result)).unwrap();
        value.as_object_mut().unwrap().remove("timestamp");
        value
    }

    #[tokio::test]
    async fn test_strong_candidate_is_submittable() {
        let result = engine(None)
            .evaluate(&input(STRONG_RESUME, SENIOR_JD, false))
            .await
            .unwrap();

        assert_eq!(result.scores.education.value, 10.0);
        assert_eq!(result.scores.career_trajectory.value, 9.0);
        assert_eq!(result.scores.company_relevance.value, 9.0);
        assert!((result.scores.tenure_stability.value - 9.0).abs() < 1e-9);
        let pct = result.scores.skills_match.detail.match_percentage.unwrap();
        assert!((pct - 90.0).abs() < 1e-9);
        assert_eq!(result.scores.bonus_signals.value, 6.0);
        assert_eq!(result.red_flags.value, 0.0);
        assert!(result.total_score >= 8.2, "total {}", result.total_score);
        assert!(result.submittable);
        assert_eq!(result.assessment, Assessment::Strong);
    }

    #[tokio::test]
    async fn test_weak_candidate_is_rejected() {
        let result = engine(None)
            .evaluate(&input(WEAK_RESUME, SENIOR_JD, false))
            .await
            .unwrap();

        assert!(result.scores.tenure_stability.value <= 4.0);
        let pct = result.scores.skills_match.detail.match_percentage.unwrap();
        assert!((pct - 20.0).abs() < 1e-9);
        assert!(result.scores.skills_match.value < 2.0);
        assert!(!result.submittable);
        assert!(result
            .recommendations
            .iter()
            .any(|r| r.starts_with("Skills gap")));
    }

    #[tokio::test]
    async fn test_empty_resume_is_rejected_without_scores() {
        let err = engine(None)
            .evaluate(&input("   ", SENIOR_JD, false))
            .await
            .unwrap_err();
        assert!(matches!(err, FitScoreError::Validation(_)));
        assert!(err.to_string().contains("resume_text"));
    }

    #[tokio::test]
    async fn test_empty_job_description_is_rejected() {
        let err = engine(None)
            .evaluate(&input(STRONG_RESUME, "", false))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("job_description"));
    }

    #[tokio::test]
    async fn test_heuristic_path_is_idempotent() {
        let engine = engine(None);
        let request = input(STRONG_RESUME, SENIOR_JD, false);
        let first = engine.evaluate(&request).await.unwrap();
        let second = engine.evaluate(&request).await.unwrap();
        assert_eq!(without_timestamp(first), without_timestamp(second));
    }

    #[tokio::test]
    async fn test_scores_bounded_for_odd_inputs() {
        let engine = engine(None);
        for (resume, jd) in [
            ("x", "y"),
            (WEAK_RESUME, "Chief Executive Officer"),
            (STRONG_RESUME, "Registered nurse at a hospital"),
        ] {
            let result = engine.evaluate(&input(resume, jd, false)).await.unwrap();
            for category in Category::ALL {
                let v = result.scores.value(category);
                assert!((0.0..=10.0).contains(&v), "{category:?} = {v}");
            }
            assert!((0.0..=10.0).contains(&result.total_score));
            assert_eq!(result.submittable, result.total_score >= 8.2);
        }
    }

    #[tokio::test]
    async fn test_augmentation_overrides_context_and_skills() {
        let engine = engine(Some(Behaviour::Succeed(startup_augmentation())));
        let result = engine
            .evaluate(&input(STRONG_RESUME, SENIOR_JD, true))
            .await
            .unwrap();

        assert!(result.gpt4_enhanced);
        assert_eq!(result.context.source, ContextSource::Ai);
        assert_eq!(result.context.context.company_type, CompanyType::Startup);
        // Google is elite for enterprise, not startup
        assert_eq!(result.scores.company_relevance.value, 7.5);
        assert_eq!(result.scores.skills_match.value, 10.0);
        assert_eq!(result.scores.skills_match.detail.source, SkillsSource::Ai);
        assert_eq!(result.scores.skills_match.detail.confidence, Some(Confidence::High));
        assert!(result.smart_criteria.is_some());
        assert!(result.skills_analysis.is_some());
        let eval = result.elite_evaluation.as_ref().unwrap();
        assert_eq!(eval.recommendation, EliteRecommendation::Submit);
    }

    #[tokio::test]
    async fn test_elite_evaluation_is_display_only() {
        let plain = engine(Some(Behaviour::Succeed(Augmentation {
            elite_evaluation: None,
            ..startup_augmentation()
        })))
        .evaluate(&input(STRONG_RESUME, SENIOR_JD, true))
        .await
        .unwrap();
        let with_eval = engine(Some(Behaviour::Succeed(startup_augmentation())))
            .evaluate(&input(STRONG_RESUME, SENIOR_JD, true))
            .await
            .unwrap();

        assert_eq!(plain.total_score, with_eval.total_score);
        assert_eq!(plain.submittable, with_eval.submittable);
        let value = serde_json::to_value(FitScoreResponse::success(with_eval)).unwrap();
        assert_eq!(value["details"]["elite_evaluation"]["recommendation"], "submit");
    }

    #[tokio::test]
    async fn test_reply_with_empty_context_keeps_heuristic_context() {
        let reply = r#"{"context": {}, "skills": {"match_percentage": 90, "confidence": "high"}}"#;
        let heuristic = engine(None)
            .evaluate(&input(STRONG_RESUME, SENIOR_JD, false))
            .await
            .unwrap();
        let result = engine(Some(Behaviour::Reply(reply)))
            .evaluate(&input(STRONG_RESUME, SENIOR_JD, true))
            .await
            .unwrap();

        assert!(!result.gpt4_enhanced);
        assert_eq!(result.context.source, ContextSource::Heuristic);
        assert_eq!(result.context.context, heuristic.context.context);
        assert_eq!(result.context.context.company_type, CompanyType::Enterprise);
        assert_eq!(without_timestamp(result), without_timestamp(heuristic));
    }

    #[tokio::test]
    async fn test_bad_criteria_do_not_discard_context_and_skills() {
        let reply = r#"{
            "context": {"industry": "tech", "company_type": "startup", "role_type": "technical"},
            "elite_criteria": {"mission_critical_skills": {"python": "expert"}},
            "skills": {"match_percentage": 100, "confidence": "medium"}
        }"#;
        let result = engine(Some(Behaviour::Reply(reply)))
            .evaluate(&input(STRONG_RESUME, SENIOR_JD, true))
            .await
            .unwrap();
        assert!(result.gpt4_enhanced);
        assert_eq!(result.context.context.company_type, CompanyType::Startup);
        assert!(result.smart_criteria.is_none());
        assert_eq!(result.scores.skills_match.value, 10.0);
    }

    #[tokio::test]
    async fn test_out_of_range_ai_percentage_is_clamped() {
        let mut augmentation = startup_augmentation();
        augmentation.skills.match_percentage = 140.0;
        let result = engine(Some(Behaviour::Succeed(augmentation)))
            .evaluate(&input(STRONG_RESUME, SENIOR_JD, true))
            .await
            .unwrap();
        assert_eq!(result.scores.skills_match.detail.match_percentage, Some(100.0));
        assert_eq!(result.scores.skills_match.value, 10.0);
    }

    #[tokio::test]
    async fn test_failed_augmentation_falls_back() {
        let heuristic = engine(None)
            .evaluate(&input(STRONG_RESUME, SENIOR_JD, false))
            .await
            .unwrap();
        let result = engine(Some(Behaviour::Fail))
            .evaluate(&input(STRONG_RESUME, SENIOR_JD, true))
            .await
            .unwrap();

        assert!(!result.gpt4_enhanced);
        assert_eq!(result.context.source, ContextSource::Heuristic);
        assert!(result.smart_criteria.is_none());
        assert_eq!(without_timestamp(result), without_timestamp(heuristic));
    }

    #[tokio::test(start_paused = true)]
    async fn test_hanging_augmentation_times_out() {
        let result = engine(Some(Behaviour::Hang))
            .evaluate(&input(STRONG_RESUME, SENIOR_JD, true))
            .await
            .unwrap();
        assert!(!result.gpt4_enhanced);
        assert!(result.submittable);
    }

    #[tokio::test]
    async fn test_disabled_flag_skips_augmentation() {
        let result = engine(Some(Behaviour::Succeed(startup_augmentation())))
            .evaluate(&input(STRONG_RESUME, SENIOR_JD, false))
            .await
            .unwrap();
        assert!(!result.gpt4_enhanced);
        assert_eq!(result.context.context.company_type, CompanyType::Enterprise);
    }

    #[tokio::test]
    async fn test_missing_provider_is_fail_soft() {
        let result = engine(None)
            .evaluate(&input(STRONG_RESUME, SENIOR_JD, true))
            .await
            .unwrap();
        assert!(!result.gpt4_enhanced);
    }

    #[tokio::test]
    async fn test_default_weights_accept_plain_request() {
        let result = engine(None)
            .evaluate(&input("Engineer at Acme (2019 - 2023)", "Software engineer", false))
            .await
            .unwrap();
        assert_eq!(result.weights, DEFAULT_WEIGHTS);
        assert!((0.0..=9.5).contains(&result.total_score));
    }

    #[tokio::test]
    async fn test_bad_weights_are_an_internal_error() {
        let weights = Weights {
            bonus_signals: 0.5,
            ..DEFAULT_WEIGHTS
        };
        let err = engine(None)
            .with_weights(weights)
            .evaluate(&input(STRONG_RESUME, SENIOR_JD, false))
            .await
            .unwrap_err();
        assert!(matches!(err, FitScoreError::Internal(_)));
    }

    #[test]
    fn test_use_gpt4_defaults_to_true() {
        let json = r#"{"resume_text": "r", "job_description": "j"}"#;
        let parsed: FitScoreInput = serde_json::from_str(json).unwrap();
        assert!(parsed.use_gpt4);
        assert!(parsed.collateral.is_none());
    }
}
