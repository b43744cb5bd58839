//! Aggregation: weighted sum, red-flag penalty, submit decision and the
//! recommendation text. Assembles the final `FitScoreResult`.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::scoring::models::{
    clamp_score, Category, CategoryScores, ContextDetection, EliteCriteria, EliteEvaluation,
    FitScoreResult, RedFlagPenalty, SkillsAnalysis,
};

/// Minimum total for a candidate to be submitted.
pub const SUBMIT_THRESHOLD: f64 = 8.2;

/// Category scores below this produce targeted advice.
const WEAK_CATEGORY_THRESHOLD: f64 = 6.0;
/// Penalties at or above this produce a red-flag review line.
const RED_FLAG_REVIEW_THRESHOLD: f64 = 1.5;

const WEIGHT_SUM_TOLERANCE: f64 = 1e-9;

const SUBMIT_LINE: &str = "SUBMITTABLE CANDIDATE - Recommend to submit";
const REJECT_LINE: &str = "RECOMMENDED REJECT - Below elite hiring bar";
const RED_FLAG_LINE: &str = "Red flags detected - requires careful review";

// ────────────────────────────────────────────────────────────────────────────
// Weights
// ────────────────────────────────────────────────────────────────────────────

/// Category weights. They sum to 0.95, so a perfect profile totals 9.5 and
/// the submit threshold sits 1.3 below the ceiling.
pub const DEFAULT_WEIGHTS: Weights = Weights {
    education: 0.20,
    career_trajectory: 0.20,
    company_relevance: 0.15,
    tenure_stability: 0.15,
    skills_match: 0.20,
    bonus_signals: 0.05,
};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Weights {
    pub education: f64,
    pub career_trajectory: f64,
    pub company_relevance: f64,
    pub tenure_stability: f64,
    pub skills_match: f64,
    pub bonus_signals: f64,
}

impl Weights {
    pub fn sum(&self) -> f64 {
        self.education
            + self.career_trajectory
            + self.company_relevance
            + self.tenure_stability
            + self.skills_match
            + self.bonus_signals
    }

    /// Every weight finite and non-negative, summing to at most 1.0, so the
    /// weighted total of in-range scores stays within [0, 10].
    pub fn is_well_formed(&self) -> bool {
        let all = [
            self.education,
            self.career_trajectory,
            self.company_relevance,
            self.tenure_stability,
            self.skills_match,
            self.bonus_signals,
        ];
        all.iter().all(|w| w.is_finite() && *w >= 0.0) && self.sum() <= 1.0 + WEIGHT_SUM_TOLERANCE
    }

    pub fn of(&self, category: Category) -> f64 {
        match category {
            Category::Education => self.education,
            Category::CareerTrajectory => self.career_trajectory,
            Category::CompanyRelevance => self.company_relevance,
            Category::TenureStability => self.tenure_stability,
            Category::SkillsMatch => self.skills_match,
            Category::BonusSignals => self.bonus_signals,
        }
    }
}

impl Default for Weights {
    fn default() -> Self {
        DEFAULT_WEIGHTS
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Assessment band
// ────────────────────────────────────────────────────────────────────────────

/// Descriptive band of the total. Never drives the submit decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Assessment {
    Exceptional,
    Strong,
    Good,
    Average,
    BelowAverage,
}

impl Assessment {
    pub fn from_total(total: f64) -> Self {
        if total >= 9.0 {
            Assessment::Exceptional
        } else if total >= 8.2 {
            Assessment::Strong
        } else if total >= 7.0 {
            Assessment::Good
        } else if total >= 5.0 {
            Assessment::Average
        } else {
            Assessment::BelowAverage
        }
    }

    pub fn describe(self) -> &'static str {
        match self {
            Assessment::Exceptional => "Overall assessment: exceptional - clearly above the elite bar",
            Assessment::Strong => "Overall assessment: strong - meets the elite bar",
            Assessment::Good => "Overall assessment: good - close to the bar with notable gaps",
            Assessment::Average => "Overall assessment: average - several areas below the bar",
            Assessment::BelowAverage => "Overall assessment: below average - far from the bar",
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Aggregation
// ────────────────────────────────────────────────────────────────────────────

/// Everything the aggregator records besides scores: where the context came
/// from and what augmentation contributed.
#[derive(Debug, Clone)]
pub struct Enrichment {
    pub context: ContextDetection,
    pub smart_criteria: Option<EliteCriteria>,
    pub skills_analysis: Option<SkillsAnalysis>,
    pub elite_evaluation: Option<EliteEvaluation>,
    pub gpt4_enhanced: bool,
}

/// `clamp(Σ wᵢ·vᵢ − penalty, 0, 10)`.
pub fn weighted_total(scores: &CategoryScores, penalty: f64, weights: &Weights) -> f64 {
    let weighted: f64 = Category::ALL
        .iter()
        .map(|&c| weights.of(c) * scores.value(c))
        .sum();
    clamp_score(weighted - penalty)
}

pub fn is_submittable(total: f64) -> bool {
    total >= SUBMIT_THRESHOLD
}

/// Decision line, band line, one line per weak core category, then a
/// red-flag line when the penalty is material.
pub fn recommendations(
    submittable: bool,
    assessment: Assessment,
    scores: &CategoryScores,
    red_flags: &RedFlagPenalty,
) -> Vec<String> {
    let mut lines = vec![
        if submittable { SUBMIT_LINE } else { REJECT_LINE }.to_string(),
        assessment.describe().to_string(),
    ];

    for category in Category::ALL {
        let Some(advice) = weak_category_advice(category) else {
            continue;
        };
        if scores.value(category) < WEAK_CATEGORY_THRESHOLD {
            lines.push(advice.to_string());
        }
    }

    if red_flags.value >= RED_FLAG_REVIEW_THRESHOLD {
        lines.push(RED_FLAG_LINE.to_string());
    }

    lines
}

/// Bonus signals are additive only and never produce advice.
fn weak_category_advice(category: Category) -> Option<&'static str> {
    match category {
        Category::Education => Some("Education concerns - consider program strength and relevance"),
        Category::CareerTrajectory => Some("Career trajectory concerns - limited progression visible"),
        Category::CompanyRelevance => Some("Company relevance concerns - may not fit target environment"),
        Category::TenureStability => Some("Tenure stability concerns - frequent job changes"),
        Category::SkillsMatch => Some("Skills gap - missing critical capabilities"),
        Category::BonusSignals => None,
    }
}

/// Builds the immutable result of one evaluation.
pub fn aggregate(
    scores: CategoryScores,
    red_flags: RedFlagPenalty,
    enrichment: Enrichment,
    weights: Weights,
    timestamp: DateTime<Utc>,
) -> FitScoreResult {
    let total_score = weighted_total(&scores, red_flags.value, &weights);
    let submittable = is_submittable(total_score);
    let assessment = Assessment::from_total(total_score);
    let recommendations = recommendations(submittable, assessment, &scores, &red_flags);

    FitScoreResult {
        scores,
        red_flags,
        total_score,
        submittable,
        assessment,
        recommendations,
        weights,
        context: enrichment.context,
        smart_criteria: enrichment.smart_criteria,
        skills_analysis: enrichment.skills_analysis,
        elite_evaluation: enrichment.elite_evaluation,
        gpt4_enhanced: enrichment.gpt4_enhanced,
        timestamp,
    }
}
