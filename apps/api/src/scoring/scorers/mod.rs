//! Category scorers. Each one is a pure function of the resume, the job
//! description and the detected context; none depends on another's output.

pub mod bonus;
pub mod company;
pub mod education;
pub mod red_flags;
pub mod skills;
pub mod tenure;
pub mod trajectory;

use tracing::debug;

use crate::scoring::models::{Category, CategoryScore, CategoryScores, JobContext};
use crate::scoring::resume::ResumeProfile;
use crate::scoring::tables::ScoringTables;

pub use bonus::BonusSignalsScorer;
pub use company::CompanyRelevanceScorer;
pub use education::EducationScorer;
pub use red_flags::detect_red_flags;
pub use skills::SkillsMatchScorer;
pub use tenure::TenureStabilityScorer;
pub use trajectory::CareerTrajectoryScorer;

/// Everything a scorer may read. Borrowed for the duration of one request.
#[derive(Clone, Copy)]
pub struct ScoringInput<'a> {
    pub resume: &'a ResumeProfile,
    /// Lowercased job description.
    pub job_description: &'a str,
    pub context: &'a JobContext,
    pub tables: &'a ScoringTables,
}

/// Common contract of the six category scorers.
pub trait CategoryScorer {
    type Detail;

    const CATEGORY: Category;

    fn score(&self, input: &ScoringInput<'_>) -> CategoryScore<Self::Detail>;
}

/// Runs all six scorers. Order is irrelevant; results are keyed by category.
pub fn score_all(input: &ScoringInput<'_>) -> CategoryScores {
    CategoryScores {
        education: run(EducationScorer, input),
        career_trajectory: run(CareerTrajectoryScorer, input),
        company_relevance: run(CompanyRelevanceScorer, input),
        tenure_stability: run(TenureStabilityScorer, input),
        skills_match: run(SkillsMatchScorer, input),
        bonus_signals: run(BonusSignalsScorer, input),
    }
}

fn run<S: CategoryScorer>(scorer: S, input: &ScoringInput<'_>) -> CategoryScore<S::Detail> {
    let score = scorer.score(input);
    debug!(category = ?S::CATEGORY, value = score.value, "category scored");
    score
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::scoring::context_detector::detect_context;
    use crate::scoring::resume::YearMonth;

    pub const REFERENCE: YearMonth = YearMonth { year: 2025, month: 6 };

    /// Owns everything a `ScoringInput` borrows.
    pub struct Fixture {
        pub resume: ResumeProfile,
        pub job_description: String,
        pub context: JobContext,
        pub tables: ScoringTables,
    }

    impl Fixture {
        pub fn new(resume: &str, job_description: &str) -> Self {
            let tables = ScoringTables::default();
            Self {
                resume: ResumeProfile::parse(resume, &tables, REFERENCE),
                job_description: job_description.to_lowercase(),
                context: detect_context(job_description, None, &tables),
                tables,
            }
        }

        pub fn with_context(mut self, context: JobContext) -> Self {
            self.context = context;
            self
        }

        pub fn input(&self) -> ScoringInput<'_> {
            ScoringInput {
                resume: &self.resume,
                job_description: &self.job_description,
                context: &self.context,
                tables: &self.tables,
            }
        }
    }
}
