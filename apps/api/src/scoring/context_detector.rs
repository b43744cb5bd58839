//! Context detection: infers industry, company type, role type and seniority
//! from the job description. Never fails; unmatched fields stay at their
//! generic defaults.

use crate::scoring::models::{CompanyType, Industry, JobContext, RoleType, Seniority};
use crate::scoring::tables::{ScoringTables, Vocabulary};
use crate::scoring::text::contains_any;

/// Heuristic detection. The job description decides first; the optional
/// additional context only fills fields the description left generic.
pub fn detect_context(
    job_description: &str,
    collateral: Option<&str>,
    tables: &ScoringTables,
) -> JobContext {
    let jd = job_description.to_lowercase();
    let extra = collateral.map(str::to_lowercase);
    let vocab = &tables.context;

    JobContext {
        industry: pick_or(&jd, extra.as_deref(), &vocab.industry, Industry::General),
        company_type: pick_or(&jd, extra.as_deref(), &vocab.company_type, CompanyType::General),
        role_type: pick_or(&jd, extra.as_deref(), &vocab.role_type, RoleType::General),
        seniority: pick_or(&jd, extra.as_deref(), &vocab.seniority, Seniority::Mid),
    }
}

fn pick_or<T: Copy>(jd: &str, extra: Option<&str>, entries: &[Vocabulary<T>], default: T) -> T {
    first_match(jd, entries)
        .or_else(|| extra.and_then(|e| first_match(e, entries)))
        .unwrap_or(default)
}

fn first_match<T: Copy>(text: &str, entries: &[Vocabulary<T>]) -> Option<T> {
    entries
        .iter()
        .find(|entry| contains_any(text, &entry.terms))
        .map(|entry| entry.value)
}
