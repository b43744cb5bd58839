use crate::scoring::models::{
    Category, CategoryScore, PositionAssessment, ProgressionLevel, TrajectoryDetail,
};
use crate::scoring::resume::Position;
use crate::scoring::scorers::{CategoryScorer, ScoringInput};
use crate::scoring::tables::TitleTables;
use crate::scoring::text::contains_any;

const LEADERSHIP_POINTS: f64 = 2.0;
const SCOPE_POINTS: f64 = 1.5;
const OWNERSHIP_POINTS: f64 = 1.0;
const COMPLEXITY_POINTS: f64 = 1.0;

impl ProgressionLevel {
    pub fn score(self) -> f64 {
        match self {
            ProgressionLevel::Leadership => 9.5,
            ProgressionLevel::Ascending => 9.0,
            ProgressionLevel::Strong => 8.0,
            ProgressionLevel::Good => 7.0,
            ProgressionLevel::Steady => 6.0,
            ProgressionLevel::Limited => 4.0,
            ProgressionLevel::Flat | ProgressionLevel::Unknown => 1.0,
        }
    }
}

/// Classifies progression across the most recent roles. Resumes list the
/// latest role first, so index 0 is the current seniority.
pub struct CareerTrajectoryScorer;

impl CategoryScorer for CareerTrajectoryScorer {
    type Detail = TrajectoryDetail;

    const CATEGORY: Category = Category::CareerTrajectory;

    fn score(&self, input: &ScoringInput<'_>) -> CategoryScore<TrajectoryDetail> {
        let titles = &input.tables.titles;
        let positions: Vec<PositionAssessment> = input
            .resume
            .positions
            .iter()
            .map(|p| assess_position(p, titles))
            .collect();

        let level = classify(&positions);
        let leadership_roles = positions.iter().filter(|p| p.leadership).count();

        CategoryScore::new(
            level.score(),
            TrajectoryDetail {
                level,
                positions,
                leadership_roles,
                target_seniority: input.context.seniority,
            },
        )
    }
}

fn title_score(title: &str, titles: &TitleTables) -> f64 {
    if contains_any(title, &titles.executive) {
        9.0
    } else if contains_any(title, &titles.senior) {
        7.0
    } else if contains_any(title, &titles.manager) {
        6.0
    } else if contains_any(title, &titles.individual) {
        5.0
    } else {
        3.0
    }
}

fn assess_position(position: &Position, titles: &TitleTables) -> PositionAssessment {
    let title = position.title.to_lowercase();
    let description = position.description.to_lowercase();

    let leadership = contains_any(&title, &titles.leadership);
    let scope = contains_any(&description, &titles.scope);
    let ownership = contains_any(&description, &titles.ownership);
    let complexity = contains_any(&description, &titles.complexity);

    let mut score = title_score(&title, titles);
    for (present, points) in [
        (leadership, LEADERSHIP_POINTS),
        (scope, SCOPE_POINTS),
        (ownership, OWNERSHIP_POINTS),
        (complexity, COMPLEXITY_POINTS),
    ] {
        if present {
            score += points;
        }
    }

    PositionAssessment {
        title: position.title.clone(),
        company: position.company.clone(),
        score,
        leadership,
        scope,
        ownership,
        complexity,
    }
}

fn classify(positions: &[PositionAssessment]) -> ProgressionLevel {
    match positions {
        [] => ProgressionLevel::Unknown,
        [only] => by_average(only.score),
        [latest, previous] => {
            if latest.score > previous.score && latest.score >= 7.5 && latest.leadership {
                ProgressionLevel::Ascending
            } else {
                by_average((latest.score + previous.score) / 2.0)
            }
        }
        [s0, s1, s2, ..] => {
            let recent = [s0, s1, s2];
            let leadership = recent.iter().filter(|p| p.leadership).count();
            let scope = recent.iter().filter(|p| p.scope).count();
            let ownership = recent.iter().filter(|p| p.ownership).count();
            let (s0, s1, s2) = (s0.score, s1.score, s2.score);

            if s0 >= 9.0 && s1 >= 8.0 && leadership >= 2 && ownership >= 2 {
                ProgressionLevel::Leadership
            } else if s0 > s1 && s1 > s2 && s0 >= 7.5 && leadership >= 1 {
                ProgressionLevel::Ascending
            } else if s0 > s2 && s0 >= 7.0 && scope >= 1 {
                ProgressionLevel::Strong
            } else if s0 >= 6.0 && ownership >= 1 {
                ProgressionLevel::Good
            } else if s0 >= 5.0 {
                ProgressionLevel::Steady
            } else if s0 >= 4.0 {
                ProgressionLevel::Limited
            } else {
                ProgressionLevel::Flat
            }
        }
    }
}

/// Used when too few roles are listed to read a direction.
fn by_average(average: f64) -> ProgressionLevel {
    if average >= 8.0 {
        ProgressionLevel::Strong
    } else if average >= 6.0 {
        ProgressionLevel::Steady
    } else {
        ProgressionLevel::Limited
    }
}
