use crate::scoring::models::{Category, CategoryScore, TenureDetail, TenureEntry, TenurePattern};
use crate::scoring::scorers::{CategoryScorer, ScoringInput};
use crate::scoring::text::contains_any;

const NO_FULL_TIME: f64 = 1.0;
const UNKNOWN_AVERAGE: f64 = 5.0;
const ELITE_BONUS_PER_YEAR: f64 = 0.1;
const ELITE_BONUS_CAP: f64 = 0.5;
const INTERNSHIP_BONUS: f64 = 0.3;
const INTERNSHIPS_FOR_BONUS: usize = 3;

/// Average-tenure thresholds in years, longest first.
const LADDER: [(f64, f64, TenurePattern); 6] = [
    (3.0, 9.5, TenurePattern::Elite),
    (2.5, 8.5, TenurePattern::Strong),
    (2.0, 7.5, TenurePattern::Good),
    (1.5, 6.5, TenurePattern::Reasonable),
    (1.0, 5.5, TenurePattern::SomeHopping),
    (0.5, 4.0, TenurePattern::FrequentChanges),
];

/// Average full-time tenure. Internships and part-time roles are excluded
/// from the average but a long run of them earns a small bonus.
pub struct TenureStabilityScorer;

impl CategoryScorer for TenureStabilityScorer {
    type Detail = TenureDetail;

    const CATEGORY: Category = Category::TenureStability;

    fn score(&self, input: &ScoringInput<'_>) -> CategoryScore<TenureDetail> {
        let tables = input.tables;
        let resume = input.resume;

        let excluded_positions: Vec<String> = resume
            .positions
            .iter()
            .filter(|p| p.is_internship)
            .map(|p| p.title.clone())
            .collect();
        let internship_count = excluded_positions.len();

        let elite: Vec<&String> = tables.elite_companies().collect();
        let positions: Vec<TenureEntry> = resume
            .full_time_positions()
            .map(|p| TenureEntry {
                title: p.title.clone(),
                company: p.company.clone(),
                duration: p.duration.clone(),
                years: p.tenure_years,
                elite_company: p
                    .company
                    .as_deref()
                    .is_some_and(|c| contains_any(&c.to_lowercase(), &elite)),
            })
            .collect();

        let dated: Vec<f64> = positions.iter().filter_map(|p| p.years).collect();
        let average_tenure_years =
            (!dated.is_empty()).then(|| dated.iter().sum::<f64>() / dated.len() as f64);

        let elite_company_years: f64 = positions
            .iter()
            .filter(|p| p.elite_company)
            .filter_map(|p| p.years)
            .sum();
        let elite_bonus = (elite_company_years * ELITE_BONUS_PER_YEAR).min(ELITE_BONUS_CAP);
        let internship_bonus = if internship_count >= INTERNSHIPS_FOR_BONUS {
            INTERNSHIP_BONUS
        } else {
            0.0
        };

        let (value, pattern) = match average_tenure_years {
            _ if positions.is_empty() => (NO_FULL_TIME, TenurePattern::Unknown),
            None => (UNKNOWN_AVERAGE, TenurePattern::Unknown),
            Some(avg) => {
                let (base, pattern) = ladder(avg);
                (base + elite_bonus + internship_bonus, pattern)
            }
        };

        CategoryScore::new(
            value,
            TenureDetail {
                average_tenure_years,
                pattern,
                positions,
                excluded_positions,
                internship_count,
                elite_company_years,
                elite_bonus,
                internship_bonus,
            },
        )
    }
}

fn ladder(average_years: f64) -> (f64, TenurePattern) {
    LADDER
        .iter()
        .find(|(min_years, _, _)| average_years >= *min_years)
        .map(|&(_, score, pattern)| (score, pattern))
        .unwrap_or((1.0, TenurePattern::VeryShort))
}
