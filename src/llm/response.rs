//! Typed domain records rebuilt from untrusted completion replies
//!
//! The completion service is only asked, never guaranteed, to honor the
//! prompt schema. Every reply goes through field-by-field validation that
//! always yields a fully populated record: unparseable replies become empty
//! records, absent or wrong-typed fields fall back to defaults, and
//! malformed sequence elements are dropped individually. Parse failures are
//! logged at warn level so they stay visible in diagnostics.

use log::warn;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Full analysis of one uploaded resume. Replaced wholesale per upload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResumeAnalysis {
    /// Original extracted text, retained for traceability
    pub text: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub skills: Vec<String>,
    pub experience: Vec<ExperienceEntry>,
    pub education: Vec<EducationEntry>,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub score: i64,
    pub suggestions: Vec<Suggestion>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperienceEntry {
    pub title: String,
    pub company: String,
    pub duration: String,
    pub description: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EducationEntry {
    pub degree: String,
    pub institution: String,
    pub year: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Suggestion {
    pub original: String,
    pub improved: String,
    pub section: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accepted: Option<bool>,
}

/// One recommended job. A search result set replaces the prior one wholesale.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct JobMatch {
    pub title: String,
    pub company: String,
    pub location: String,
    pub description: String,
    pub requirements: Vec<String>,
    pub match_score: i64,
    pub missing_skills: Vec<String>,
    pub recommendations: Vec<String>,
}

/// Narrower second-pass analysis over an existing [`ResumeAnalysis`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImprovementAnalysis {
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub score: i64,
    pub suggestions: Vec<Suggestion>,
}

/// Build a [`ResumeAnalysis`] from a raw reply, carrying the source text
/// through unchanged. Total over all inputs.
pub fn parse_resume_analysis(raw: &str, source_text: &str) -> ResumeAnalysis {
    let value = parse_reply(raw);

    ResumeAnalysis {
        text: source_text.to_string(),
        name: str_field(&value, "name"),
        email: str_field(&value, "email"),
        phone: str_field(&value, "phone"),
        skills: str_list(&value, "skills"),
        experience: record_list(&value, "experience"),
        education: record_list(&value, "education"),
        strengths: str_list(&value, "strengths"),
        weaknesses: str_list(&value, "weaknesses"),
        score: score_field(&value, "score"),
        suggestions: record_list(&value, "suggestions"),
    }
}

/// Read the `matches` array from a raw reply; absent or unreadable yields
/// an empty sequence, never an error.
pub fn parse_job_matches(raw: &str) -> Vec<JobMatch> {
    let value = parse_reply(raw);
    let mut matches: Vec<JobMatch> = record_list(&value, "matches");
    for job in &mut matches {
        job.match_score = clamp_score(job.match_score);
    }
    matches
}

pub fn parse_improvement(raw: &str) -> ImprovementAnalysis {
    let value = parse_reply(raw);

    ImprovementAnalysis {
        strengths: str_list(&value, "strengths"),
        weaknesses: str_list(&value, "weaknesses"),
        score: score_field(&value, "score"),
        suggestions: record_list(&value, "suggestions"),
    }
}

/// Parse the raw reply into a JSON object, substituting an empty object on
/// failure. Code fences around the payload are tolerated.
fn parse_reply(raw: &str) -> Value {
    let payload = strip_code_fences(raw);
    match serde_json::from_str::<Value>(payload) {
        Ok(value @ Value::Object(_)) => value,
        Ok(_) => {
            warn!("completion reply was valid JSON but not an object, treating as empty");
            Value::Object(Map::new())
        }
        Err(e) => {
            warn!("completion reply was not valid JSON ({}), treating as empty", e);
            Value::Object(Map::new())
        }
    }
}

fn strip_code_fences(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

fn str_field(value: &Value, key: &str) -> String {
    value
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn str_list(value: &Value, key: &str) -> Vec<String> {
    value
        .get(key)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

fn record_list<T: DeserializeOwned>(value: &Value, key: &str) -> Vec<T> {
    value
        .get(key)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|item| {
                    serde_json::from_value(item.clone())
                        .map_err(|e| warn!("dropping malformed '{}' entry: {}", key, e))
                        .ok()
                })
                .collect()
        })
        .unwrap_or_default()
}

/// Scores are clamped into 0..=100; non-numeric values fall back to 0
fn score_field(value: &Value, key: &str) -> i64 {
    let raw = value
        .get(key)
        .and_then(|v| v.as_i64().or_else(|| v.as_f64().map(|f| f.round() as i64)))
        .unwrap_or(0);
    clamp_score(raw)
}

fn clamp_score(score: i64) -> i64 {
    score.clamp(0, 100)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_reply_populates_record_and_keeps_source_text() {
        let source = "Jane Doe\njane@x.com\nSkills: Go, SQL";
        let raw = r#"{"name":"Jane Doe","skills":["Go","SQL"],"score":70}"#;

        let analysis = parse_resume_analysis(raw, source);

        assert_eq!(analysis.name, "Jane Doe");
        assert_eq!(analysis.skills, vec!["Go", "SQL"]);
        assert_eq!(analysis.score, 70);
        assert_eq!(analysis.text, source);
        assert!(analysis.experience.is_empty());
    }

    #[test]
    fn test_non_json_reply_yields_empty_record() {
        let analysis = parse_resume_analysis("not json", "source text");

        assert_eq!(analysis.name, "");
        assert!(analysis.skills.is_empty());
        assert_eq!(analysis.score, 0);
        assert_eq!(analysis.text, "source text");
    }

    #[test]
    fn test_full_reply_round_trips_all_fields() {
        let raw = r#"{
            "name": "Jane Doe",
            "email": "jane@x.com",
            "phone": "555-0100",
            "skills": ["Go", "SQL"],
            "experience": [
                {"title": "Backend Engineer", "company": "Acme", "duration": "2019-2023",
                 "description": ["Built APIs", "Led migrations"]}
            ],
            "education": [
                {"degree": "BSc Computer Science", "institution": "State U", "year": "2019"}
            ],
            "strengths": ["systems design"],
            "weaknesses": ["public speaking"],
            "score": 85,
            "suggestions": [
                {"original": "did stuff", "improved": "shipped X", "section": "experience"}
            ]
        }"#;

        let analysis = parse_resume_analysis(raw, "text");

        assert_eq!(analysis.email, "jane@x.com");
        assert_eq!(analysis.experience.len(), 1);
        assert_eq!(analysis.experience[0].description.len(), 2);
        assert_eq!(analysis.education[0].year, "2019");
        assert_eq!(analysis.suggestions[0].improved, "shipped X");
        assert_eq!(analysis.suggestions[0].accepted, None);
        assert_eq!(analysis.score, 85);
    }

    #[test]
    fn test_malformed_sequence_elements_are_dropped_individually() {
        let raw = r#"{"experience":[
            {"title": "Engineer", "company": "Acme"},
            "not an object",
            {"title": "Analyst"}
        ]}"#;

        let analysis = parse_resume_analysis(raw, "text");

        assert_eq!(analysis.experience.len(), 2);
        assert_eq!(analysis.experience[0].title, "Engineer");
        assert_eq!(analysis.experience[1].title, "Analyst");
    }

    #[test]
    fn test_scores_are_clamped_and_non_numeric_defaults_to_zero() {
        assert_eq!(parse_resume_analysis(r#"{"score":250}"#, "").score, 100);
        assert_eq!(parse_resume_analysis(r#"{"score":-5}"#, "").score, 0);
        assert_eq!(parse_resume_analysis(r#"{"score":"high"}"#, "").score, 0);
        assert_eq!(parse_resume_analysis(r#"{"score":69.6}"#, "").score, 70);
    }

    #[test]
    fn test_fenced_reply_is_parsed() {
        let raw = "```json\n{\"name\":\"Jane Doe\"}\n```";
        let analysis = parse_resume_analysis(raw, "");
        assert_eq!(analysis.name, "Jane Doe");
    }

    #[test]
    fn test_empty_matches_array_yields_empty_sequence() {
        assert!(parse_job_matches(r#"{"matches":[]}"#).is_empty());
    }

    #[test]
    fn test_missing_matches_key_yields_empty_sequence() {
        assert!(parse_job_matches("{}").is_empty());
        assert!(parse_job_matches("not json").is_empty());
    }

    #[test]
    fn test_job_match_camel_case_fields() {
        let raw = r#"{"matches":[{
            "title": "Senior Software Engineer",
            "company": "Tech Corp",
            "location": "Remote",
            "description": "Backend role",
            "requirements": ["Go"],
            "matchScore": 85,
            "missingSkills": ["Kubernetes"],
            "recommendations": ["Learn Kubernetes"]
        }]}"#;

        let matches = parse_job_matches(raw);

        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].match_score, 85);
        assert_eq!(matches[0].missing_skills, vec!["Kubernetes"]);
    }

    #[test]
    fn test_job_match_scores_are_clamped() {
        let raw = r#"{"matches":[{"title":"A","matchScore":400}]}"#;
        assert_eq!(parse_job_matches(raw)[0].match_score, 100);
    }

    #[test]
    fn test_improvement_parses_directly() {
        let raw = r#"{"strengths":["clear layout"],"score":60,
                      "suggestions":[{"original":"a","improved":"b","section":"skills"}]}"#;

        let improvement = parse_improvement(raw);

        assert_eq!(improvement.strengths, vec!["clear layout"]);
        assert_eq!(improvement.score, 60);
        assert_eq!(improvement.suggestions.len(), 1);
    }

    #[test]
    fn test_non_object_json_reply_yields_empty_record() {
        let analysis = parse_resume_analysis(r#"["a","b"]"#, "text");
        assert_eq!(analysis.name, "");
        assert_eq!(analysis.text, "text");
    }

    #[test]
    fn test_saved_analysis_round_trips_through_serde() {
        let analysis = ResumeAnalysis {
            text: "raw text".to_string(),
            name: "Jane Doe".to_string(),
            skills: vec!["Go".to_string()],
            score: 70,
            ..Default::default()
        };

        let json = serde_json::to_string_pretty(&analysis).unwrap();
        let parsed: ResumeAnalysis = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, analysis);
    }
}
