use crate::scoring::models::{Category, CategoryScore, SkillsDetail, SkillsSource, MAX_SCORE};
use crate::scoring::scorers::{CategoryScorer, ScoringInput};
use crate::scoring::text::find_terms;

/// Score used when the job description names no recognisable skills.
const NO_REQUIREMENTS: f64 = 5.0;
const CURVE_EXPONENT: f64 = 1.5;

/// Maps a match percentage onto [0, 10]. Convex, so the last few missing
/// skills cost more than the first: 50% → 3.54, 80% → 7.16, 90% → 8.54.
pub fn skills_curve(match_percentage: f64) -> f64 {
    let fraction = if match_percentage.is_nan() {
        0.0
    } else {
        match_percentage.clamp(0.0, 100.0) / 100.0
    };
    MAX_SCORE * fraction.powf(CURVE_EXPONENT)
}

/// Share of the skills named in the job description that also appear in the
/// resume.
pub struct SkillsMatchScorer;

impl CategoryScorer for SkillsMatchScorer {
    type Detail = SkillsDetail;

    const CATEGORY: Category = Category::SkillsMatch;

    fn score(&self, input: &ScoringInput<'_>) -> CategoryScore<SkillsDetail> {
        let vocabulary = &input.tables.skills;
        let required_skills = find_terms(input.job_description, vocabulary);
        let candidate_skills = find_terms(&input.resume.text, vocabulary);

        let (matched, missing): (Vec<String>, Vec<String>) = required_skills
            .iter()
            .cloned()
            .partition(|skill| candidate_skills.contains(skill));

        let match_percentage = (!required_skills.is_empty())
            .then(|| matched.len() as f64 / required_skills.len() as f64 * 100.0);
        let value = match_percentage.map_or(NO_REQUIREMENTS, skills_curve);

        CategoryScore::new(
            value,
            SkillsDetail {
                match_percentage,
                required_skills,
                candidate_skills,
                matched,
                missing,
                source: SkillsSource::Heuristic,
                confidence: None,
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::scorers::test_support::Fixture;

    const JD: &str = "We need Python, Rust, Kubernetes, PostgreSQL and AWS experience.";

    fn score(resume: &str, jd: &str) -> CategoryScore<SkillsDetail> {
        SkillsMatchScorer.score(&Fixture::new(resume, jd).input())
    }

    #[test]
    fn test_curve_endpoints_and_shape() {
        assert_eq!(skills_curve(0.0), 0.0);
        assert_eq!(skills_curve(100.0), 10.0);
        assert!(skills_curve(50.0) < 5.0);
        assert_eq!(skills_curve(150.0), 10.0);
        assert_eq!(skills_curve(-5.0), 0.0);
        assert_eq!(skills_curve(f64::NAN), 0.0);
    }

    #[test]
    fn test_curve_is_monotonic() {
        let mut previous = skills_curve(0.0);
        for step in 1..=1000 {
            let current = skills_curve(step as f64 / 10.0);
            assert!(current >= previous, "curve decreased at {step}");
            previous = current;
        }
    }

    #[test]
    fn test_partial_match() {
        let s = score("Python and AWS, some Docker", JD);
        assert_eq!(s.detail.required_skills.len(), 5);
        assert_eq!(s.detail.matched, vec!["python", "aws"]);
        assert_eq!(s.detail.match_percentage, Some(40.0));
        assert!((s.value - skills_curve(40.0)).abs() < 1e-9);
        assert!(s.detail.missing.contains(&"rust".to_string()));
    }

    #[test]
    fn test_more_skills_never_scores_lower() {
        let resumes = [
            "No relevant skills",
            "Python",
            "Python, Rust",
            "Python, Rust, Kubernetes",
            "Python, Rust, Kubernetes, PostgreSQL",
            "Python, Rust, Kubernetes, PostgreSQL, AWS",
        ];
        let values: Vec<f64> = resumes.iter().map(|r| score(r, JD).value).collect();
        assert!(values.windows(2).all(|w| w[0] <= w[1]), "{values:?}");
        assert_eq!(values[5], 10.0);
    }

    #[test]
    fn test_no_required_skills_is_neutral() {
        let s = score("Python", "Looking for a great teammate");
        assert_eq!(s.detail.match_percentage, None);
        assert_eq!(s.value, 5.0);
    }
}
