use crate::scoring::models::{Category, CategoryScore, EducationDetail, EducationTier};
use crate::scoring::scorers::{CategoryScorer, ScoringInput};
use crate::scoring::text::{contains_any, find_terms};

const GRADUATE_BONUS: f64 = 1.0;
const SPECIALTY_BONUS: f64 = 0.5;

impl EducationTier {
    pub fn base_score(self) -> f64 {
        match self {
            EducationTier::Elite => 9.5,
            EducationTier::Strong => 7.5,
            EducationTier::Standard => 5.0,
            EducationTier::Unlisted => 2.0,
        }
    }
}

/// Best institution tier found in the resume, plus graduate-degree and
/// industry-specialty bonuses.
pub struct EducationScorer;

impl CategoryScorer for EducationScorer {
    type Detail = EducationDetail;

    const CATEGORY: Category = Category::Education;

    fn score(&self, input: &ScoringInput<'_>) -> CategoryScore<EducationDetail> {
        let tables = &input.tables.education;
        let text = input.resume.text.as_str();

        let elite = find_terms(text, &tables.elite);
        let strong = find_terms(text, &tables.strong);

        let (tier, institution) = if let Some(first) = elite.first() {
            (EducationTier::Elite, Some(first.clone()))
        } else if let Some(first) = strong.first() {
            (EducationTier::Strong, Some(first.clone()))
        } else if contains_any(text, &tables.standard_markers) {
            (EducationTier::Standard, None)
        } else {
            (EducationTier::Unlisted, None)
        };

        let graduate_degree = contains_any(text, &tables.graduate_markers);
        let specialty_match = tables
            .specialty
            .iter()
            .filter(|s| s.industry == input.context.industry)
            .any(|s| contains_any(text, &s.institutions));

        let mut value = tier.base_score();
        if graduate_degree {
            value += GRADUATE_BONUS;
        }
        if specialty_match {
            value += SPECIALTY_BONUS;
        }

        let mut institutions = elite;
        institutions.extend(strong);

        CategoryScore::new(
            value,
            EducationDetail {
                tier,
                institution,
                institutions,
                graduate_degree,
                specialty_match,
            },
        )
    }
}
