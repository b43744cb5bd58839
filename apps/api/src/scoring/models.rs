//! Data model for a fit evaluation: job context, per-category scores, the
//! red-flag penalty, and the final result handed back to callers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::scoring::aggregator::{Assessment, Weights};

/// Upper bound of every category score and of the total.
pub const MAX_SCORE: f64 = 10.0;

// ────────────────────────────────────────────────────────────────────────────
// Job context
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Industry {
    #[serde(alias = "technology", alias = "software")]
    Tech,
    #[serde(alias = "medical")]
    Healthcare,
    #[serde(alias = "legal")]
    Law,
    #[serde(alias = "financial", alias = "accounting")]
    Finance,
    #[default]
    #[serde(other)]
    General,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompanyType {
    Startup,
    Enterprise,
    LawFirm,
    Accounting,
    Healthcare,
    Consulting,
    Financial,
    Academic,
    Government,
    NonProfit,
    #[default]
    #[serde(other)]
    General,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleType {
    Technical,
    #[serde(alias = "leadership")]
    Management,
    Sales,
    Legal,
    Accounting,
    Healthcare,
    Consulting,
    Financial,
    Academic,
    #[default]
    #[serde(other)]
    General,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Seniority {
    #[serde(alias = "junior")]
    Entry,
    Senior,
    Executive,
    #[default]
    #[serde(other)]
    Mid,
}

/// Inferred (industry, company type, role type) triple, plus the seniority
/// the opening targets. Built once per request and read by every scorer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobContext {
    #[serde(default)]
    pub industry: Industry,
    #[serde(default)]
    pub company_type: CompanyType,
    #[serde(default)]
    pub role_type: RoleType,
    #[serde(default)]
    pub seniority: Seniority,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContextSource {
    Heuristic,
    Ai,
}

#[derive(Debug, Clone, Serialize)]
pub struct ContextDetection {
    #[serde(flatten)]
    pub context: JobContext,
    pub source: ContextSource,
}

// ────────────────────────────────────────────────────────────────────────────
// Category scores
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Education,
    CareerTrajectory,
    CompanyRelevance,
    TenureStability,
    SkillsMatch,
    BonusSignals,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Education,
        Category::CareerTrajectory,
        Category::CompanyRelevance,
        Category::TenureStability,
        Category::SkillsMatch,
        Category::BonusSignals,
    ];
}

/// A bounded sub-score with its category-specific detail.
/// `value` is clamped into [0, 10] on construction.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryScore<D> {
    pub value: f64,
    pub detail: D,
}

impl<D> CategoryScore<D> {
    pub fn new(value: f64, detail: D) -> Self {
        Self {
            value: clamp_score(value),
            detail,
        }
    }
}

/// Clamps into [0, 10]; NaN collapses to 0 so a bad input can never leak out.
pub fn clamp_score(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, MAX_SCORE)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EducationTier {
    Elite,
    Strong,
    Standard,
    Unlisted,
}

#[derive(Debug, Clone, Serialize)]
pub struct EducationDetail {
    pub tier: EducationTier,
    pub institution: Option<String>,
    pub institutions: Vec<String>,
    pub graduate_degree: bool,
    pub specialty_match: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressionLevel {
    Leadership,
    Ascending,
    Strong,
    Good,
    Steady,
    Limited,
    Flat,
    Unknown,
}

#[derive(Debug, Clone, Serialize)]
pub struct PositionAssessment {
    pub title: String,
    pub company: Option<String>,
    pub score: f64,
    pub leadership: bool,
    pub scope: bool,
    pub ownership: bool,
    pub complexity: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct TrajectoryDetail {
    pub level: ProgressionLevel,
    pub positions: Vec<PositionAssessment>,
    pub leadership_roles: usize,
    pub target_seniority: Seniority,
}

#[derive(Debug, Clone, Serialize)]
pub struct CompanyMatch {
    pub company: String,
    pub relevance: f64,
    /// Elite group the employer belongs to, if any.
    pub group: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CompanyDetail {
    pub target_company_type: CompanyType,
    pub role_type: RoleType,
    pub companies: Vec<CompanyMatch>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TenurePattern {
    Elite,
    Strong,
    Good,
    Reasonable,
    SomeHopping,
    FrequentChanges,
    VeryShort,
    Unknown,
}

#[derive(Debug, Clone, Serialize)]
pub struct TenureEntry {
    pub title: String,
    pub company: Option<String>,
    /// Duration text as written in the resume.
    pub duration: Option<String>,
    pub years: Option<f64>,
    pub elite_company: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct TenureDetail {
    /// `None` when no full-time role had a parsable duration.
    pub average_tenure_years: Option<f64>,
    pub pattern: TenurePattern,
    pub positions: Vec<TenureEntry>,
    pub excluded_positions: Vec<String>,
    pub internship_count: usize,
    pub elite_company_years: f64,
    pub elite_bonus: f64,
    pub internship_bonus: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillsSource {
    Heuristic,
    Ai,
}

#[derive(Debug, Clone, Serialize)]
pub struct SkillsDetail {
    /// `None` when the job description names no recognisable skills.
    pub match_percentage: Option<f64>,
    pub required_skills: Vec<String>,
    pub candidate_skills: Vec<String>,
    pub matched: Vec<String>,
    pub missing: Vec<String>,
    pub source: SkillsSource,
    pub confidence: Option<Confidence>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalStrength {
    Exceptional,
    Strong,
    Some,
}

#[derive(Debug, Clone, Serialize)]
pub struct BonusSignal {
    pub signal: String,
    pub strength: SignalStrength,
}

#[derive(Debug, Clone, Serialize)]
pub struct BonusDetail {
    pub signals_found: Vec<BonusSignal>,
    pub raw_points: f64,
}

/// Penalty subtracted from the weighted sum; `value` lies in [0, cap].
#[derive(Debug, Clone, Default, Serialize)]
pub struct RedFlagPenalty {
    pub value: f64,
    pub reasons: Vec<String>,
}

/// The six category scores of one evaluation.
#[derive(Debug, Clone)]
pub struct CategoryScores {
    pub education: CategoryScore<EducationDetail>,
    pub career_trajectory: CategoryScore<TrajectoryDetail>,
    pub company_relevance: CategoryScore<CompanyDetail>,
    pub tenure_stability: CategoryScore<TenureDetail>,
    pub skills_match: CategoryScore<SkillsDetail>,
    pub bonus_signals: CategoryScore<BonusDetail>,
}

impl CategoryScores {
    pub fn value(&self, category: Category) -> f64 {
        match category {
            Category::Education => self.education.value,
            Category::CareerTrajectory => self.career_trajectory.value,
            Category::CompanyRelevance => self.company_relevance.value,
            Category::TenureStability => self.tenure_stability.value,
            Category::SkillsMatch => self.skills_match.value,
            Category::BonusSignals => self.bonus_signals.value,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Augmentation payloads
// ────────────────────────────────────────────────────────────────────────────

/// Qualitative hiring bar for the detected role. Display only.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EliteCriteria {
    #[serde(default)]
    pub mission_critical_skills: Vec<String>,
    #[serde(default)]
    pub elite_company_benchmarks: Vec<String>,
    #[serde(default)]
    pub expected_outcomes: Vec<String>,
    #[serde(default)]
    pub leadership_indicators: Vec<String>,
    #[serde(default)]
    pub summary: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EliteRecommendation {
    Submit,
    Consider,
    Reject,
}

/// One dimension of the model's reading of the resume against the hiring bar.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EliteDimension {
    pub score: f64,
    #[serde(default)]
    pub evidence: Vec<String>,
    #[serde(default)]
    pub gaps: Vec<String>,
    #[serde(default)]
    pub reasoning: String,
}

/// The model's own verdict against `EliteCriteria`. Display only; it never
/// feeds the total or the submit decision.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EliteEvaluation {
    #[serde(default)]
    pub mission_critical_skills: Option<EliteDimension>,
    #[serde(default)]
    pub elite_company_benchmark: Option<EliteDimension>,
    #[serde(default)]
    pub expected_outcomes: Option<EliteDimension>,
    #[serde(default)]
    pub domain_mastery: Option<EliteDimension>,
    #[serde(default)]
    pub leadership: Option<EliteDimension>,
    pub overall_score: f64,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub concerns: Vec<String>,
    pub recommendation: EliteRecommendation,
}

impl EliteEvaluation {
    /// Clamps every score into [0, 10].
    pub fn clamped(mut self) -> Self {
        self.overall_score = clamp_score(self.overall_score);
        for dimension in [
            &mut self.mission_critical_skills,
            &mut self.elite_company_benchmark,
            &mut self.expected_outcomes,
            &mut self.domain_mastery,
            &mut self.leadership,
        ]
        .into_iter()
        .flatten()
        {
            dimension.score = clamp_score(dimension.score);
        }
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InferredSkill {
    pub skill: String,
    #[serde(default)]
    pub reasoning: String,
}

/// Model-produced skills analysis. Replaces the heuristic skills detail.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillsAnalysis {
    pub match_percentage: f64,
    #[serde(default)]
    pub matched_skills: Vec<String>,
    #[serde(default)]
    pub missing_skills: Vec<String>,
    #[serde(default)]
    pub inferred_skills: Vec<InferredSkill>,
    pub confidence: Confidence,
}

// ────────────────────────────────────────────────────────────────────────────
// Result
// ────────────────────────────────────────────────────────────────────────────

/// Outcome of one successful evaluation. Built once by the aggregator and
/// never mutated afterwards.
#[derive(Debug, Clone)]
pub struct FitScoreResult {
    pub scores: CategoryScores,
    pub red_flags: RedFlagPenalty,
    pub total_score: f64,
    pub submittable: bool,
    pub assessment: Assessment,
    pub recommendations: Vec<String>,
    pub weights: Weights,
    pub context: ContextDetection,
    pub smart_criteria: Option<EliteCriteria>,
    pub skills_analysis: Option<SkillsAnalysis>,
    pub elite_evaluation: Option<EliteEvaluation>,
    pub gpt4_enhanced: bool,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FitScoreDetails {
    pub education: EducationDetail,
    pub career_trajectory: TrajectoryDetail,
    pub company_relevance: CompanyDetail,
    pub tenure_stability: TenureDetail,
    pub skills_match: SkillsDetail,
    pub bonus_signals: BonusDetail,
    pub red_flags: RedFlagPenalty,
    pub weights_used: Weights,
    pub context_detection: ContextDetection,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub smart_criteria: Option<EliteCriteria>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skills_analysis: Option<SkillsAnalysis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elite_evaluation: Option<EliteEvaluation>,
    pub gpt4_enhanced: bool,
}

/// Wire shape of a successful evaluation.
#[derive(Debug, Clone, Serialize)]
pub struct FitScoreReport {
    pub total_score: f64,
    pub submittable: bool,
    pub assessment: Assessment,
    pub education_score: f64,
    pub career_trajectory_score: f64,
    pub company_relevance_score: f64,
    pub tenure_stability_score: f64,
    pub skills_match_score: f64,
    pub bonus_signals_score: f64,
    pub red_flags_penalty: f64,
    pub recommendations: Vec<String>,
    pub details: FitScoreDetails,
    pub timestamp: DateTime<Utc>,
}

impl From<FitScoreResult> for FitScoreReport {
    fn from(result: FitScoreResult) -> Self {
        let scores = result.scores;
        Self {
            total_score: result.total_score,
            submittable: result.submittable,
            assessment: result.assessment,
            education_score: scores.education.value,
            career_trajectory_score: scores.career_trajectory.value,
            company_relevance_score: scores.company_relevance.value,
            tenure_stability_score: scores.tenure_stability.value,
            skills_match_score: scores.skills_match.value,
            bonus_signals_score: scores.bonus_signals.value,
            red_flags_penalty: result.red_flags.value,
            recommendations: result.recommendations,
            details: FitScoreDetails {
                education: scores.education.detail,
                career_trajectory: scores.career_trajectory.detail,
                company_relevance: scores.company_relevance.detail,
                tenure_stability: scores.tenure_stability.detail,
                skills_match: scores.skills_match.detail,
                bonus_signals: scores.bonus_signals.detail,
                red_flags: result.red_flags,
                weights_used: result.weights,
                context_detection: result.context,
                smart_criteria: result.smart_criteria,
                skills_analysis: result.skills_analysis,
                elite_evaluation: result.elite_evaluation,
                gpt4_enhanced: result.gpt4_enhanced,
            },
            timestamp: result.timestamp,
        }
    }
}

/// Structurally valid response for every call: only `success` and `error`
/// distinguish a failure, and a failure carries no fabricated scores.
#[derive(Debug, Clone, Serialize)]
pub struct FitScoreResponse {
    pub success: bool,
    #[serde(flatten)]
    pub report: Option<FitScoreReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FitScoreResponse {
    pub fn success(result: FitScoreResult) -> Self {
        Self {
            success: true,
            report: Some(result.into()),
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            report: None,
            error: Some(error.into()),
        }
    }
}
