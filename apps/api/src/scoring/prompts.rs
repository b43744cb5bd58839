// LLM prompt constants for fit-score augmentation.
// Reuses cross-cutting fragments from llm_client::prompts.

use crate::scoring::models::JobContext;

/// Resume characters sent to the model.
const RESUME_EXCERPT_CHARS: usize = 4000;
/// Job-description characters sent to the model.
const JD_EXCERPT_CHARS: usize = 3000;
const COLLATERAL_EXCERPT_CHARS: usize = 1000;

/// Augmentation prompt template.
/// Replace: {heuristic_context}, {job_description}, {collateral}, {resume}
pub const AUGMENT_PROMPT_TEMPLATE: &str = r#"You are an elite technical recruiter. Analyse the job and the candidate below.

Return a JSON object with this EXACT schema (no extra fields):
{
  "context": {
    "industry": "tech | healthcare | law | finance | general",
    "company_type": "startup | enterprise | law_firm | accounting | healthcare | consulting | financial | academic | government | non_profit | general",
    "role_type": "technical | management | sales | legal | accounting | healthcare | consulting | financial | academic | general",
    "seniority": "entry | mid | senior | executive"
  },
  "elite_criteria": {
    "mission_critical_skills": ["skill"],
    "elite_company_benchmarks": ["company"],
    "expected_outcomes": ["outcome"],
    "leadership_indicators": ["indicator"],
    "summary": "one paragraph describing the elite hiring bar for this role"
  },
  "elite_evaluation": {
    "mission_critical_skills": {"score": 0, "evidence": ["skill shown"], "gaps": ["skill missing"], "reasoning": "text"},
    "elite_company_benchmark": {"score": 0, "evidence": ["company"], "gaps": [], "reasoning": "text"},
    "expected_outcomes": {"score": 0, "evidence": ["outcome shown"], "gaps": ["outcome missing"], "reasoning": "text"},
    "domain_mastery": {"score": 0, "evidence": ["area"], "gaps": ["area"], "reasoning": "text"},
    "leadership": {"score": 0, "evidence": ["evidence"], "gaps": [], "reasoning": "text"},
    "overall_score": 0,
    "strengths": ["strength"],
    "concerns": ["concern"],
    "recommendation": "submit | consider | reject"
  },
  "skills": {
    "match_percentage": 0,
    "matched_skills": ["skill"],
    "missing_skills": ["skill"],
    "inferred_skills": [{"skill": "skill", "reasoning": "why the resume implies it"}],
    "confidence": "high | medium | low"
  }
}

Rules:
- "context": classify the JOB, not the candidate. A keyword heuristic guessed: {heuristic_context}. Correct it where it is wrong.
- "match_percentage": 0-100, the share of the job's required skills the candidate demonstrably has. Count adjacent or implied skills only when the resume makes them evident, and list them in "inferred_skills".
- "confidence": how sure you are of the skills estimate given the resume's detail.
- "elite_criteria": what a top 1% hire for this exact role looks like. Set it to null if the job description is too vague.
- "elite_evaluation": score the candidate 0-10 against your own elite_criteria on each dimension. Set it to null when elite_criteria is null.

JOB DESCRIPTION:
{job_description}

ADDITIONAL CONTEXT:
{collateral}

RESUME:
{resume}"#;

pub fn build_augment_prompt(
    resume_text: &str,
    job_description: &str,
    collateral: Option<&str>,
    heuristic: &JobContext,
) -> String {
    // serializing a plain enum-only struct cannot fail
    let heuristic_context = serde_json::to_string(heuristic).unwrap_or_default();
    AUGMENT_PROMPT_TEMPLATE
        .replace("{heuristic_context}", &heuristic_context)
        .replace("{job_description}", excerpt(job_description, JD_EXCERPT_CHARS))
        .replace(
            "{collateral}",
            collateral
                .map(|c| excerpt(c, COLLATERAL_EXCERPT_CHARS))
                .filter(|c| !c.trim().is_empty())
                .unwrap_or("(none)"),
        )
        .replace("{resume}", excerpt(resume_text, RESUME_EXCERPT_CHARS))
}

/// First `max_chars` characters, cut on a char boundary.
fn excerpt(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
