//! Resume parsing: turns free-form resume text into dated positions.
//!
//! Parsing never fails. Anything that cannot be read is left as `None` and
//! the scorers treat it as unknown.

use std::sync::LazyLock;

use chrono::{DateTime, Datelike, Utc};
use regex::{Captures, Regex};

use crate::scoring::tables::ScoringTables;
use crate::scoring::text::{contains_any, contains_term};

/// `Jan 2020 - Mar 2022`, `2019 – Present`, `2018 to 2021`.
static DATE_RANGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(?:\b(jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*\.?\s+)?\b((?:19|20)\d{2})\s*(?:-|–|—|to)\s*(?:(?:\b(jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*\.?\s+)?((?:19|20)\d{2})\b|(present|current|now)\b)",
    )
    .unwrap()
});

/// `(3 years)`, `(2.5 yrs)`.
static PAREN_YEARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\((\d+(?:\.\d+)?)\s*(?:years?|yrs?)\)").unwrap());

/// `(6 months)`, `(4 mos)`.
static PAREN_MONTHS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\((\d+)\s*(?:months?|mos?)\)").unwrap());

static BARE_YEARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(\d+(?:\.\d+)?)\s*(?:years?|yrs?)\b").unwrap());

static BARE_MONTHS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(\d+)\s*(?:months?|mos?)\b").unwrap());

const SECTION_WORDS: &[&str] = &[
    "experience", "education", "skills", "summary", "projects", "certifications", "awards",
    "publications", "bonus", "profile", "objective", "interests", "languages", "volunteer",
    "employment", "history", "achievements",
];

const TITLE_SEPARATORS: &[&str] = &[" at ", " @ ", " | ", ", ", " — ", " – "];

/// Lines after a title searched for company and dates.
const HEADER_WINDOW: usize = 4;
/// Lines after a title searched for description bullets.
const DESCRIPTION_WINDOW: usize = 10;
const MAX_TITLE_WORDS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    pub fn from_datetime(at: DateTime<Utc>) -> Self {
        Self::new(at.year(), at.month())
    }

    fn ordinal(self) -> i64 {
        self.year as i64 * 12 + self.month as i64
    }

    /// Whole months from `self` to `later`; negative if `later` is earlier.
    pub fn months_until(self, later: YearMonth) -> i64 {
        later.ordinal() - self.ordinal()
    }
}

/// One role as read from the resume.
#[derive(Debug, Clone, PartialEq)]
pub struct Position {
    pub title: String,
    pub company: Option<String>,
    pub duration: Option<String>,
    pub description: String,
    pub tenure_years: Option<f64>,
    pub start: Option<YearMonth>,
    pub end: Option<YearMonth>,
    pub is_internship: bool,
}

/// Resume text plus the positions extracted from it.
#[derive(Debug, Clone)]
pub struct ResumeProfile {
    /// Lowercased copy of the full resume text.
    pub text: String,
    /// In order of appearance; resumes usually list the most recent first.
    pub positions: Vec<Position>,
}

impl ResumeProfile {
    pub fn parse(resume_text: &str, tables: &ScoringTables, reference: YearMonth) -> Self {
        Self {
            text: resume_text.to_lowercase(),
            positions: extract_positions(resume_text, tables, reference),
        }
    }

    /// Full-time positions, i.e. everything except internships and part-time work.
    pub fn full_time_positions(&self) -> impl Iterator<Item = &Position> {
        self.positions.iter().filter(|p| !p.is_internship)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Position extraction
// ────────────────────────────────────────────────────────────────────────────

fn extract_positions(text: &str, tables: &ScoringTables, reference: YearMonth) -> Vec<Position> {
    let lines: Vec<&str> = text.lines().map(str::trim).collect();
    let mut positions = Vec::new();

    for (i, line) in lines.iter().enumerate() {
        if !is_title_line(line, tables) {
            continue;
        }

        let (title, inline_company) = split_title_line(line);
        let mut company = inline_company;
        let mut duration = has_duration(line).then(|| line.to_string());

        for next in lines.iter().skip(i + 1).take(HEADER_WINDOW) {
            if next.is_empty() || is_bullet(next) {
                continue;
            }
            if is_section_header(next) || is_title_line(next, tables) {
                break;
            }
            if duration.is_none() && has_duration(next) {
                duration = Some(next.to_string());
            } else if company.is_none() {
                company = Some(next.to_string());
            }
        }

        if company.is_none() && duration.is_none() {
            continue;
        }

        let description = collect_description(&lines[i + 1..], tables);
        let parsed = duration
            .as_deref()
            .map(|d| parse_duration(d, reference))
            .unwrap_or_default();
        let is_internship = contains_any(&title.to_lowercase(), &tables.titles.internship);

        positions.push(Position {
            title,
            company,
            duration,
            description,
            tenure_years: parsed.years,
            start: parsed.start,
            end: parsed.end,
            is_internship,
        });
    }

    positions
}

fn is_bullet(line: &str) -> bool {
    line.starts_with('-') || line.starts_with('•') || line.starts_with('*') || line.starts_with('–')
}

fn is_section_header(line: &str) -> bool {
    let normalized = line.trim_end_matches(':').trim().to_lowercase();
    let words: Vec<&str> = normalized.split_whitespace().collect();
    !words.is_empty()
        && words.len() <= 3
        && words.iter().any(|w| SECTION_WORDS.contains(w))
}

fn is_title_line(line: &str, tables: &ScoringTables) -> bool {
    if line.is_empty() || is_bullet(line) || is_section_header(line) {
        return false;
    }
    // titles lead the line; drop the " at Company (dates)" tail before counting
    let (title, _) = split_title_line(line);
    if title.split_whitespace().count() > MAX_TITLE_WORDS {
        return false;
    }
    let lower = title.to_lowercase();
    tables.titles.title_terms().any(|t| contains_term(&lower, t))
}

/// Splits "Senior Engineer at Google (2020-2023)" into title and company.
fn split_title_line(line: &str) -> (String, Option<String>) {
    let cut = TITLE_SEPARATORS
        .iter()
        .filter_map(|sep| line.find(sep).map(|idx| (idx, sep.len())))
        .min_by_key(|(idx, _)| *idx);

    match cut {
        Some((idx, len)) => {
            let title = line[..idx].trim().to_string();
            let rest = &line[idx + len..];
            let end = rest
                .find(|c: char| c == '(' || c == '|' || c == ',' || c.is_ascii_digit())
                .unwrap_or(rest.len());
            let company = rest[..end].trim().trim_end_matches(['-', '–', '—']).trim();
            let company = (!company.is_empty()).then(|| company.to_string());
            (title, company)
        }
        None => (line.to_string(), None),
    }
}

fn collect_description(following: &[&str], tables: &ScoringTables) -> String {
    let mut bullets = Vec::new();
    for line in following.iter().take(DESCRIPTION_WINDOW) {
        if is_bullet(line) {
            bullets.push(line.trim_start_matches(['-', '•', '*', '–']).trim());
        } else if is_section_header(line) || is_title_line(line, tables) {
            break;
        }
    }
    bullets.join(" ")
}

// ────────────────────────────────────────────────────────────────────────────
// Durations
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ParsedDuration {
    pub years: Option<f64>,
    pub start: Option<YearMonth>,
    pub end: Option<YearMonth>,
}

pub fn has_duration(line: &str) -> bool {
    DATE_RANGE.is_match(line)
        || PAREN_YEARS.is_match(line)
        || PAREN_MONTHS.is_match(line)
        || BARE_YEARS.is_match(line)
        || BARE_MONTHS.is_match(line)
}

/// Reads a duration line. An explicit "(N years)" wins over a date range;
/// the range still supplies start and end for gap detection.
pub fn parse_duration(line: &str, reference: YearMonth) -> ParsedDuration {
    let (range_years, start, end) = match DATE_RANGE.captures(line) {
        Some(caps) => parse_range(&caps, reference),
        None => (None, None, None),
    };

    let explicit = capture_f64(&PAREN_YEARS, line)
        .or_else(|| capture_f64(&PAREN_MONTHS, line).map(|m| m / 12.0));

    let years = explicit
        .or(range_years)
        .or_else(|| capture_f64(&BARE_YEARS, line))
        .or_else(|| capture_f64(&BARE_MONTHS, line).map(|m| m / 12.0))
        .filter(|y| y.is_finite() && *y > 0.0);

    ParsedDuration { years, start, end }
}

fn parse_range(
    caps: &Captures<'_>,
    reference: YearMonth,
) -> (Option<f64>, Option<YearMonth>, Option<YearMonth>) {
    let Some(start_year) = caps.get(2).and_then(|m| m.as_str().parse::<i32>().ok()) else {
        return (None, None, None);
    };
    let start_month = caps.get(1).and_then(|m| month_number(m.as_str()));

    let end = if caps.get(5).is_some() {
        Some(reference)
    } else {
        caps.get(4)
            .and_then(|m| m.as_str().parse::<i32>().ok())
            .map(|year| {
                let month = caps
                    .get(3)
                    .and_then(|m| month_number(m.as_str()))
                    .or(start_month.map(|_| 12))
                    .unwrap_or(1);
                YearMonth::new(year, month)
            })
    };
    let start = YearMonth::new(start_year, start_month.unwrap_or(1));

    let years = end.map(|end| {
        let months = start.months_until(end);
        if months <= 0 {
            // same-year range without months, e.g. "2023 - 2023"
            0.5
        } else {
            months as f64 / 12.0
        }
    });

    (years, Some(start), end)
}

fn month_number(name: &str) -> Option<u32> {
    let month = match name.get(..3)?.to_lowercase().as_str() {
        "jan" => 1,
        "feb" => 2,
        "mar" => 3,
        "apr" => 4,
        "may" => 5,
        "jun" => 6,
        "jul" => 7,
        "aug" => 8,
        "sep" => 9,
        "oct" => 10,
        "nov" => 11,
        "dec" => 12,
        _ => return None,
    };
    Some(month)
}

fn capture_f64(pattern: &Regex, line: &str) -> Option<f64> {
    pattern
        .captures(line)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse::<f64>().ok())
}
