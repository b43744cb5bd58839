//! Scoring policy as data: institution tiers, elite employers, vocabularies.
//!
//! Everything here can be replaced at startup from a JSON file
//! (`SCORING_TABLES_PATH`). Missing sections keep their built-in defaults.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::scoring::models::{CompanyType, Industry, RoleType, Seniority};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringTables {
    pub education: EducationTables,
    pub company_groups: Vec<CompanyGroup>,
    pub titles: TitleTables,
    pub skills: Vec<String>,
    pub bonus_signals: SignalTables,
    pub red_flags: RedFlagTables,
    pub context: ContextVocabulary,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EducationTables {
    pub elite: Vec<String>,
    pub strong: Vec<String>,
    pub specialty: Vec<SpecialtyPrograms>,
    /// Generic markers that place a resume in the standard tier.
    pub standard_markers: Vec<String>,
    pub graduate_markers: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpecialtyPrograms {
    pub industry: Industry,
    pub institutions: Vec<String>,
}

/// A set of employers that counts as elite for one hiring archetype.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyGroup {
    pub name: String,
    pub role_type: RoleType,
    /// `None` means the group fits every company type for its role.
    #[serde(default)]
    pub company_type: Option<CompanyType>,
    pub companies: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TitleTables {
    pub executive: Vec<String>,
    pub senior: Vec<String>,
    pub manager: Vec<String>,
    pub individual: Vec<String>,
    pub internship: Vec<String>,
    pub leadership: Vec<String>,
    pub scope: Vec<String>,
    pub ownership: Vec<String>,
    pub complexity: Vec<String>,
}

impl TitleTables {
    /// Every term that marks a line as a job title.
    pub fn title_terms(&self) -> impl Iterator<Item = &String> {
        self.executive
            .iter()
            .chain(&self.senior)
            .chain(&self.manager)
            .chain(&self.individual)
            .chain(&self.internship)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SignalTables {
    pub exceptional: Vec<String>,
    pub strong: Vec<String>,
    pub some: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RedFlagTables {
    pub major: Vec<String>,
    pub moderate: Vec<String>,
    pub minor: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vocabulary<T> {
    pub value: T,
    pub terms: Vec<String>,
}

/// Ordered vocabularies for context detection; the first matching entry wins.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContextVocabulary {
    pub industry: Vec<Vocabulary<Industry>>,
    pub company_type: Vec<Vocabulary<CompanyType>>,
    pub role_type: Vec<Vocabulary<RoleType>>,
    pub seniority: Vec<Vocabulary<Seniority>>,
}

impl ScoringTables {
    /// Loads tables from a JSON file, filling absent sections from defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read scoring tables from {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("Invalid scoring tables in {}", path.display()))
    }

    /// All elite employers across groups.
    pub fn elite_companies(&self) -> impl Iterator<Item = &String> {
        self.company_groups.iter().flat_map(|g| g.companies.iter())
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn vocab<T>(value: T, terms: &[&str]) -> Vocabulary<T> {
    Vocabulary {
        value,
        terms: strings(terms),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Built-in policy
// ────────────────────────────────────────────────────────────────────────────

impl Default for ScoringTables {
    fn default() -> Self {
        Self {
            education: EducationTables::default(),
            company_groups: default_company_groups(),
            titles: TitleTables::default(),
            skills: strings(&[
                // languages
                "python", "java", "javascript", "typescript", "golang", "rust", "c++", "c#",
                "php", "ruby", "swift", "kotlin", "scala",
                // web
                "react", "vue", "angular", "node.js", "express", "django", "flask", "spring",
                "laravel", "asp.net",
                // cloud and devops
                "aws", "azure", "gcp", "docker", "kubernetes", "jenkins", "gitlab", "github",
                "terraform", "ansible",
                // databases
                "sql", "mysql", "postgresql", "mongodb", "redis", "elasticsearch", "dynamodb",
                "cassandra",
                // data and ai
                "machine learning", "ai", "data science", "tensorflow", "pytorch", "scikit-learn",
                "pandas", "numpy", "spark", "hadoop",
                // mobile and desktop
                "ios", "android", "react native", "flutter", "xamarin", "electron",
                // other
                "graphql", "rest api", "microservices", "serverless", "blockchain",
                "cybersecurity", "devops", "sre",
            ]),
            bonus_signals: SignalTables::default(),
            red_flags: RedFlagTables::default(),
            context: ContextVocabulary::default(),
        }
    }
}

impl Default for EducationTables {
    fn default() -> Self {
        Self {
            elite: strings(&[
                // US top
                "MIT", "Massachusetts Institute of Technology", "Stanford", "Harvard", "Berkeley",
                "UC Berkeley", "CMU", "Carnegie Mellon", "Caltech", "Princeton", "Yale",
                "Columbia University", "UPenn", "University of Pennsylvania", "Cornell University",
                "University of Chicago", "Northwestern University", "Johns Hopkins",
                "Brown University",
                // engineering and cs
                "University of Waterloo", "Waterloo", "Georgia Tech", "UIUC", "UT Austin",
                "UW Seattle", "Purdue", "Virginia Tech",
                // international
                "University of Oxford", "Oxford University", "University of Cambridge",
                "Cambridge University", "ETH Zurich", "University of Toronto", "IIT", "Tsinghua",
                "Peking University", "National University of Singapore", "University of Melbourne",
                "KAIST", "Technion",
                // professional schools
                "Wharton", "Kellogg School", "Chicago Booth", "Booth School", "MIT Sloan", "UCSF",
                "Mayo Clinic", "NYU Law",
            ]),
            strong: strings(&[
                "UCLA", "UCSD", "USC", "University of Michigan", "University of Wisconsin",
                "University of Washington", "University of North Carolina", "University of Virginia",
                "NYU", "Boston University", "Rice University", "Vanderbilt", "Emory University",
                "Georgetown University", "Notre Dame", "Duke University", "Dartmouth College", "William & Mary", "Boston College",
                "Texas A&M", "Penn State", "Ohio State", "Arizona State", "UC Irvine", "UC Davis",
                "Rutgers", "University of Maryland", "UC Santa Barbara", "UC Santa Cruz",
                "Northeastern University", "RIT", "WPI", "RPI", "Stevens Institute",
                "Colorado School of Mines", "McGill", "UBC", "Queen's University", "London School of Economics", "Imperial College",
                "University of Sydney", "ANU", "University of Hong Kong", "HKUST", "Sciences Po",
                "Bocconi",
            ]),
            specialty: vec![
                SpecialtyPrograms {
                    industry: Industry::Tech,
                    institutions: strings(&[
                        "MIT", "Massachusetts Institute of Technology", "Stanford", "CMU",
                        "Carnegie Mellon", "Berkeley", "Waterloo", "UIUC", "Georgia Tech",
                        "UT Austin", "UW Seattle",
                    ]),
                },
                SpecialtyPrograms {
                    industry: Industry::Finance,
                    institutions: strings(&[
                        "Wharton", "Harvard", "Stanford", "Kellogg School", "Chicago Booth",
                        "Booth School", "MIT Sloan", "Columbia Business School", "Tuck School",
                    ]),
                },
                SpecialtyPrograms {
                    industry: Industry::Healthcare,
                    institutions: strings(&[
                        "Harvard Medical", "Johns Hopkins", "UCSF", "Mayo Clinic",
                        "Stanford Medical",
                    ]),
                },
                SpecialtyPrograms {
                    industry: Industry::Law,
                    institutions: strings(&[
                        "Harvard Law", "Yale Law", "Stanford Law", "Columbia Law", "NYU Law",
                        "Chicago Law",
                    ]),
                },
            ],
            standard_markers: strings(&[
                "university", "college", "institute", "bachelor", "b.s.", "b.a.", "bsc", "degree",
            ]),
            graduate_markers: strings(&[
                "master", "masters", "master's", "m.s.", "msc", "mba", "phd", "ph.d.", "doctorate",
                "jd",
            ]),
        }
    }
}

fn default_company_groups() -> Vec<CompanyGroup> {
    vec![
        CompanyGroup {
            name: "tech_startup_elite".to_string(),
            role_type: RoleType::Technical,
            company_type: Some(CompanyType::Startup),
            companies: strings(&[
                "Stripe", "Scale AI", "Databricks", "Canva", "Airbnb", "Uber", "Palantir",
                "Snowflake", "MongoDB", "Twilio",
            ]),
        },
        CompanyGroup {
            name: "tech_enterprise_elite".to_string(),
            role_type: RoleType::Technical,
            company_type: Some(CompanyType::Enterprise),
            companies: strings(&[
                "Google", "Meta", "Facebook", "Apple", "Amazon", "Microsoft", "Netflix",
                "Salesforce", "Oracle", "SAP", "Adobe",
            ]),
        },
        CompanyGroup {
            name: "big4_accounting".to_string(),
            role_type: RoleType::Accounting,
            company_type: None,
            companies: strings(&["KPMG", "Deloitte", "EY", "Ernst & Young", "PwC"]),
        },
        CompanyGroup {
            name: "elite_law_firms".to_string(),
            role_type: RoleType::Legal,
            company_type: None,
            companies: strings(&[
                "Cravath", "Skadden", "Sullivan & Cromwell", "Wachtell", "Davis Polk",
                "Simpson Thacher",
            ]),
        },
        CompanyGroup {
            name: "elite_healthcare".to_string(),
            role_type: RoleType::Healthcare,
            company_type: None,
            companies: strings(&[
                "Mayo Clinic", "Cleveland Clinic", "Johns Hopkins", "Massachusetts General",
                "UCSF Medical Center",
            ]),
        },
    ]
}

impl Default for TitleTables {
    fn default() -> Self {
        Self {
            executive: strings(&[
                "ceo", "cto", "cfo", "coo", "vp", "vice president", "director", "head of", "chief",
            ]),
            senior: strings(&["senior", "sr", "lead", "principal", "staff"]),
            manager: strings(&["manager", "supervisor"]),
            individual: strings(&[
                "engineer", "developer", "analyst", "consultant", "scientist", "designer",
                "architect", "accountant", "attorney", "associate", "nurse", "physician",
                "programmer",
            ]),
            internship: strings(&[
                "intern", "internship", "co-op", "coop", "part-time", "parttime",
            ]),
            leadership: strings(&[
                "manager", "director", "lead", "head", "chief", "vp", "cto", "ceo", "principal",
                "staff",
            ]),
            scope: strings(&[
                "team", "budget", "revenue", "strategy", "architect", "cross-functional",
                "stakeholder", "stakeholders",
            ]),
            ownership: strings(&[
                "owned", "led", "managed", "responsible for", "delivered", "launched", "improved",
            ]),
            complexity: strings(&[
                "scalable", "distributed", "microservices", "architecture", "system design",
                "technical leadership",
            ]),
        }
    }
}

impl Default for SignalTables {
    fn default() -> Self {
        Self {
            exceptional: strings(&[
                "patent", "published", "forbes", "founder", "board", "olympic", "military",
                "ted talk", "book", "award", "media coverage",
            ]),
            strong: strings(&[
                "open source", "speaking", "speaker", "teaching", "certification", "hackathon",
                "volunteer", "side project",
            ]),
            some: strings(&["portfolio", "community", "course", "competition"]),
        }
    }
}

impl Default for RedFlagTables {
    fn default() -> Self {
        Self {
            major: strings(&[
                "falsified", "plagiarized", "criminal", "ethical violation", "diploma mill",
                "unaccredited",
            ]),
            moderate: strings(&[
                "job hopping", "employment gap", "no progression", "short tenure",
                "concerning pattern", "terminated",
            ]),
            minor: strings(&["overqualified", "location mismatch", "missing certification"]),
        }
    }
}

impl Default for ContextVocabulary {
    fn default() -> Self {
        Self {
            industry: vec![
                vocab(Industry::Tech, &["software", "engineer", "developer", "tech", "saas"]),
                vocab(Industry::Healthcare, &["healthcare", "medical", "hospital", "clinic"]),
                vocab(Industry::Law, &["law", "legal", "attorney", "lawyer"]),
                vocab(Industry::Finance, &["accounting", "cpa", "audit", "finance", "banking"]),
            ],
            company_type: vec![
                vocab(
                    CompanyType::Startup,
                    &["startup", "start-up", "seed", "series a", "series b", "series c", "early-stage"],
                ),
                vocab(
                    CompanyType::Enterprise,
                    &["enterprise", "fortune 500", "fortune", "large company", "global company"],
                ),
                vocab(CompanyType::LawFirm, &["law firm", "llp", "amlaw"]),
                vocab(CompanyType::Accounting, &["accounting firm", "big 4", "big four"]),
                vocab(CompanyType::Healthcare, &["hospital", "healthcare system", "health system"]),
                vocab(CompanyType::Consulting, &["consulting firm", "consultancy"]),
                vocab(CompanyType::Academic, &["university", "research lab"]),
                vocab(CompanyType::Government, &["government", "federal agency", "public sector"]),
                vocab(CompanyType::NonProfit, &["non-profit", "nonprofit", "ngo"]),
            ],
            role_type: vec![
                vocab(RoleType::Technical, &["software", "engineer", "developer", "programmer"]),
                vocab(RoleType::Management, &["manager", "director", "head of"]),
                vocab(RoleType::Sales, &["sales", "account executive", "business development"]),
                vocab(RoleType::Legal, &["legal", "attorney", "lawyer", "counsel"]),
                vocab(RoleType::Accounting, &["accounting", "accountant", "cpa", "audit"]),
                vocab(RoleType::Healthcare, &["healthcare", "medical", "nurse", "physician"]),
            ],
            seniority: vec![
                vocab(
                    Seniority::Executive,
                    &["vp", "vice president", "director", "head of", "chief", "cto", "ceo"],
                ),
                vocab(Seniority::Senior, &["senior", "staff", "principal", "lead", "sr"]),
                vocab(
                    Seniority::Entry,
                    &["junior", "entry level", "entry-level", "graduate", "new grad", "intern"],
                ),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let json = r#"{ "skills": ["rust", "zig"] }"#;
        let tables: ScoringTables = serde_json::from_str(json).unwrap();
        assert_eq!(tables.skills, vec!["rust", "zig"]);
        assert!(!tables.education.elite.is_empty());
        assert!(!tables.company_groups.is_empty());
    }

    #[test]
    fn test_tables_round_trip_through_json() {
        let json = serde_json::to_string(&ScoringTables::default()).unwrap();
        let tables: ScoringTables = serde_json::from_str(&json).unwrap();
        assert_eq!(tables.skills.len(), ScoringTables::default().skills.len());
        assert_eq!(tables.context.industry[0].value, Industry::Tech);
    }

    #[test]
    fn test_load_reports_missing_file() {
        let err = ScoringTables::load(Path::new("/nonexistent/tables.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to read scoring tables"));
    }

    #[test]
    fn test_elite_schools_are_not_common_words() {
        let tables = ScoringTables::default();
        for surname in ["Brown", "Rice", "Booth", "Columbia", "Sloan", "Kellogg", "Duke"] {
            assert!(
                !tables.education.elite.iter().any(|s| s == surname)
                    && !tables.education.strong.iter().any(|s| s == surname),
                "{surname} listed bare"
            );
        }
    }

    #[test]
    fn test_elite_companies_flattens_groups() {
        let tables = ScoringTables::default();
        assert!(tables.elite_companies().any(|c| c == "Google"));
        assert!(tables.elite_companies().any(|c| c == "KPMG"));
    }
}
