use crate::scoring::models::{
    Category, CategoryScore, CompanyDetail, CompanyMatch, CompanyType, JobContext,
};
use crate::scoring::scorers::{CategoryScorer, ScoringInput};
use crate::scoring::tables::CompanyGroup;
use crate::scoring::text::contains_any;

const ARCHETYPE_MATCH: f64 = 9.0;
const SAME_ROLE: f64 = 7.5;
const ELITE_ELSEWHERE: f64 = 6.0;
const UNRANKED: f64 = 5.0;
const NO_HISTORY: f64 = 1.0;

/// Rates each employer against the target company archetype and averages.
pub struct CompanyRelevanceScorer;

impl CategoryScorer for CompanyRelevanceScorer {
    type Detail = CompanyDetail;

    const CATEGORY: Category = Category::CompanyRelevance;

    fn score(&self, input: &ScoringInput<'_>) -> CategoryScore<CompanyDetail> {
        let context = input.context;
        let groups = &input.tables.company_groups;

        let companies: Vec<CompanyMatch> = input
            .resume
            .positions
            .iter()
            .filter_map(|p| p.company.as_deref())
            .map(|company| rate_company(company, groups, context))
            .collect();

        let value = if input.resume.positions.is_empty() {
            NO_HISTORY
        } else if companies.is_empty() {
            UNRANKED
        } else {
            companies.iter().map(|c| c.relevance).sum::<f64>() / companies.len() as f64
        };

        CategoryScore::new(
            value,
            CompanyDetail {
                target_company_type: context.company_type,
                role_type: context.role_type,
                companies,
            },
        )
    }
}

fn rate_company(company: &str, groups: &[CompanyGroup], context: &JobContext) -> CompanyMatch {
    let lower = company.to_lowercase();
    let best = groups
        .iter()
        .filter(|g| contains_any(&lower, &g.companies))
        .map(|g| (group_relevance(g, context), g))
        .max_by(|(a, _), (b, _)| a.total_cmp(b));

    match best {
        Some((relevance, group)) => CompanyMatch {
            company: company.to_string(),
            relevance,
            group: Some(group.name.clone()),
        },
        None => CompanyMatch {
            company: company.to_string(),
            relevance: UNRANKED,
            group: None,
        },
    }
}

fn group_relevance(group: &CompanyGroup, context: &JobContext) -> f64 {
    if group.role_type != context.role_type {
        return ELITE_ELSEWHERE;
    }
    let archetype_fits = group
        .company_type
        .map_or(true, |t| context.company_type == CompanyType::General || t == context.company_type);
    if archetype_fits {
        ARCHETYPE_MATCH
    } else {
        SAME_ROLE
    }
}
