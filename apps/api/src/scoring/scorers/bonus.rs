use crate::scoring::models::{
    BonusDetail, BonusSignal, Category, CategoryScore, SignalStrength, MAX_SCORE,
};
use crate::scoring::scorers::{CategoryScorer, ScoringInput};
use crate::scoring::text::find_terms;

impl SignalStrength {
    pub fn points(self) -> f64 {
        match self {
            SignalStrength::Exceptional => 5.0,
            SignalStrength::Strong => 3.0,
            SignalStrength::Some => 1.0,
        }
    }
}

/// Distinct positive signals outside the core categories.
pub struct BonusSignalsScorer;

impl CategoryScorer for BonusSignalsScorer {
    type Detail = BonusDetail;

    const CATEGORY: Category = Category::BonusSignals;

    fn score(&self, input: &ScoringInput<'_>) -> CategoryScore<BonusDetail> {
        let tables = &input.tables.bonus_signals;
        let text = input.resume.text.as_str();

        let signals_found: Vec<BonusSignal> = [
            (SignalStrength::Exceptional, &tables.exceptional),
            (SignalStrength::Strong, &tables.strong),
            (SignalStrength::Some, &tables.some),
        ]
        .into_iter()
        .flat_map(|(strength, terms)| {
            find_terms(text, terms)
                .into_iter()
                .map(move |signal| BonusSignal { signal, strength })
        })
        .collect();

        let raw_points: f64 = signals_found.iter().map(|s| s.strength.points()).sum();

        CategoryScore::new(
            raw_points.min(MAX_SCORE),
            BonusDetail {
                signals_found,
                raw_points,
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::scorers::test_support::Fixture;

    fn score(resume: &str) -> CategoryScore<BonusDetail> {
        BonusSignalsScorer.score(&Fixture::new(resume, "Engineer").input())
    }

    #[test]
    fn test_no_signals() {
        let s = score("Wrote code.");
        assert_eq!(s.value, 0.0);
        assert!(s.detail.signals_found.is_empty());
    }

    #[test]
    fn test_points_by_strength() {
        let s = score("Holds a patent. Regular conference speaker. Maintains a portfolio.");
        assert_eq!(s.value, 9.0);
        let names: Vec<&str> = s.detail.signals_found.iter().map(|b| b.signal.as_str()).collect();
        assert_eq!(names, vec!["patent", "speaker", "portfolio"]);
    }

    #[test]
    fn test_repeats_count_once() {
        let s = score("Open source maintainer. More open source work. Open source again.");
        assert_eq!(s.value, 3.0);
    }

    #[test]
    fn test_capped_at_maximum() {
        let s = score("Founder. Patent holder. Published author. Award winner.");
        assert_eq!(s.detail.raw_points, 20.0);
        assert_eq!(s.value, 10.0);
    }
}
