//! Negative indicators. The penalty is subtracted from the weighted sum and
//! never exceeds [`RED_FLAG_PENALTY_CAP`].

use crate::scoring::models::RedFlagPenalty;
use crate::scoring::resume::Position;
use crate::scoring::scorers::ScoringInput;
use crate::scoring::text::find_terms;

pub const RED_FLAG_PENALTY_CAP: f64 = 3.0;

const MAJOR_PENALTY: f64 = 3.0;
const MODERATE_PENALTY: f64 = 1.5;
const MINOR_PENALTY: f64 = 0.5;

const GAP_THRESHOLD_MONTHS: i64 = 12;
const GAP_PENALTY: f64 = 1.0;
const SHORT_TENURE_YEARS: f64 = 1.0;
const SHORT_TENURE_COUNT: usize = 2;
const SHORT_TENURE_PENALTY: f64 = 1.5;
const OVERLAP_THRESHOLD_MONTHS: i64 = 12;
const OVERLAP_PENALTY: f64 = 1.0;

pub fn detect_red_flags(input: &ScoringInput<'_>) -> RedFlagPenalty {
    let tables = &input.tables.red_flags;
    let text = input.resume.text.as_str();

    let mut penalty = 0.0;
    let mut reasons = Vec::new();

    for (severity, terms, points) in [
        ("Major", &tables.major, MAJOR_PENALTY),
        ("Moderate", &tables.moderate, MODERATE_PENALTY),
        ("Minor", &tables.minor, MINOR_PENALTY),
    ] {
        for term in find_terms(text, terms) {
            penalty += points;
            reasons.push(format!("{severity} red flag: {term}"));
        }
    }

    let full_time: Vec<&Position> = input.resume.full_time_positions().collect();

    for (months, position) in employment_gaps(&full_time) {
        penalty += GAP_PENALTY;
        reasons.push(format!(
            "Employment gap of {months} months before {}",
            position.title
        ));
    }

    for (months, earlier, later) in overlapping_roles(&full_time) {
        penalty += OVERLAP_PENALTY;
        reasons.push(format!(
            "Inconsistent timeline: {} and {} overlap by {months} months",
            earlier.title, later.title
        ));
    }

    let short_roles = full_time
        .iter()
        .filter(|p| p.tenure_years.is_some_and(|y| y < SHORT_TENURE_YEARS))
        .count();
    if short_roles >= SHORT_TENURE_COUNT {
        penalty += SHORT_TENURE_PENALTY;
        reasons.push(format!(
            "{short_roles} full-time roles shorter than one year"
        ));
    }

    RedFlagPenalty {
        value: penalty.min(RED_FLAG_PENALTY_CAP),
        reasons,
    }
}

/// Fully dated roles ordered by start.
fn dated_by_start<'a>(positions: &[&'a Position]) -> Vec<&'a Position> {
    let mut dated: Vec<&'a Position> = positions
        .iter()
        .copied()
        .filter(|p| p.start.is_some() && p.end.is_some())
        .collect();
    dated.sort_by_key(|p| p.start);
    dated
}

/// Gaps longer than the threshold between consecutive dated roles, paired
/// with the role that ended the gap.
fn employment_gaps<'a>(positions: &[&'a Position]) -> Vec<(i64, &'a Position)> {
    dated_by_start(positions)
        .windows(2)
        .filter_map(|pair| {
            let (earlier, later) = (pair[0], pair[1]);
            let gap = earlier.end?.months_until(later.start?);
            (gap > GAP_THRESHOLD_MONTHS).then_some((gap, later))
        })
        .collect()
}

/// Consecutive full-time roles whose dates overlap by more than the
/// threshold. A normal handover overlaps by a few months at most.
fn overlapping_roles<'a>(positions: &[&'a Position]) -> Vec<(i64, &'a Position, &'a Position)> {
    dated_by_start(positions)
        .windows(2)
        .filter_map(|pair| {
            let (earlier, later) = (pair[0], pair[1]);
            let overlap = later.start?.months_until(earlier.end?);
            (overlap > OVERLAP_THRESHOLD_MONTHS).then_some((overlap, earlier, later))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::scorers::test_support::Fixture;

    fn detect(resume: &str) -> RedFlagPenalty {
        detect_red_flags(&Fixture::new(resume, "Engineer").input())
    }

    #[test]
    fn test_clean_resume_has_no_penalty() {
        let resume = "\
Senior Engineer at Acme (2020 - 2024)
Engineer at Beta (2016 - 2020)
";
        let p = detect(resume);
        assert_eq!(p.value, 0.0);
        assert!(p.reasons.is_empty());
    }

    #[test]
    fn test_vocabulary_flags() {
        let p = detect("Terminated from previous role. Location mismatch noted.");
        assert_eq!(p.value, 2.0);
        assert_eq!(
            p.reasons,
            vec!["Moderate red flag: terminated", "Minor red flag: location mismatch"]
        );
    }

    #[test]
    fn test_gap_between_roles() {
        let resume = "\
Senior Engineer at Acme (2021 - 2024)
Engineer at Beta (2015 - 2018)
";
        let p = detect(resume);
        assert_eq!(p.value, 1.0);
        assert!(p.reasons[0].contains("36 months"), "{:?}", p.reasons);
        assert!(p.reasons[0].contains("Senior Engineer"));
    }

    #[test]
    fn test_repeated_short_tenures() {
        let resume = "\
Engineer at Acme
Jan 2024 - Apr 2024
Engineer at Beta
Jun 2023 - Oct 2023
";
        let p = detect(resume);
        assert_eq!(p.value, 1.5);
        assert!(p.reasons[0].starts_with("2 full-time roles"));
    }

    #[test]
    fn test_overlapping_full_time_roles() {
        let resume = "\
Senior Engineer at Acme
Jan 2020 - Dec 2023
Engineer at Beta
Jan 2021 - Jun 2024
";
        let p = detect(resume);
        assert_eq!(p.value, 1.0);
        assert_eq!(p.reasons.len(), 1);
        assert!(p.reasons[0].starts_with("Inconsistent timeline"), "{:?}", p.reasons);
        assert!(p.reasons[0].contains("35 months"));
    }

    #[test]
    fn test_short_handover_is_not_an_overlap() {
        let resume = "\
Senior Engineer at Acme
Mar 2021 - Present
Engineer at Beta
Jan 2017 - May 2021
";
        assert_eq!(detect(resume).value, 0.0);
    }

    #[test]
    fn test_penalty_is_capped() {
        let p = detect("Falsified records. Criminal record. Job hopping.");
        assert_eq!(p.reasons.len(), 3);
        assert_eq!(p.value, RED_FLAG_PENALTY_CAP);
    }
}
