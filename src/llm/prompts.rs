//! Prompt templates for the three analysis requests
//!
//! Each template embeds the payload plus a JSON schema example the model is
//! instructed to follow. The schema is a soft contract only; replies go
//! through lenient validation regardless.

use crate::error::Result;
use crate::llm::response::ResumeAnalysis;

/// A job listing rendered into the job-match prompt
#[derive(Debug, Clone)]
pub struct JobListing {
    pub title: String,
    pub company: String,
    pub location: String,
    pub description: String,
    pub requirements: Vec<String>,
}

/// Built-in catalog used until a live job board integration exists
pub fn default_job_listings() -> Vec<JobListing> {
    vec![
        JobListing {
            title: "Senior Software Engineer".to_string(),
            company: "Tech Corp".to_string(),
            location: "Remote".to_string(),
            description: "Looking for an experienced software engineer...".to_string(),
            requirements: vec![
                "React".to_string(),
                "Node.js".to_string(),
                "TypeScript".to_string(),
                "AWS".to_string(),
            ],
        },
        JobListing {
            title: "Full Stack Developer".to_string(),
            company: "StartupCo".to_string(),
            location: "New York, NY".to_string(),
            description: "Join our fast-growing team...".to_string(),
            requirements: vec![
                "React".to_string(),
                "Python".to_string(),
                "PostgreSQL".to_string(),
                "Docker".to_string(),
            ],
        },
    ]
}

#[derive(Debug, Clone)]
pub struct PromptTemplates {
    job_listings: Vec<JobListing>,
}

impl Default for PromptTemplates {
    fn default() -> Self {
        Self {
            job_listings: default_job_listings(),
        }
    }
}

impl PromptTemplates {
    pub fn with_job_listings(job_listings: Vec<JobListing>) -> Self {
        Self { job_listings }
    }

    /// Full resume analysis over extracted text, embedded verbatim
    pub fn render_resume_analysis(&self, resume_text: &str) -> String {
        RESUME_ANALYSIS_TEMPLATE.replace("{resume}", resume_text)
    }

    /// Job matching over an existing analysis and a target job title
    pub fn render_job_match(&self, analysis: &ResumeAnalysis, job_title: &str) -> String {
        let skills = analysis.skills.join(", ");
        let experience = analysis
            .experience
            .iter()
            .map(|entry| entry.title.as_str())
            .collect::<Vec<_>>()
            .join(", ");

        let listings = self
            .job_listings
            .iter()
            .map(|job| {
                format!(
                    "\nTitle: {}\nCompany: {}\nRequirements: {}\n",
                    job.title,
                    job.company,
                    job.requirements.join(", ")
                )
            })
            .collect::<Vec<_>>()
            .join("\n");

        JOB_MATCH_TEMPLATE
            .replace("{skills}", &skills)
            .replace("{experience}", &experience)
            .replace("{job_title}", job_title)
            .replace("{listings}", &listings)
    }

    /// Improvement pass over a serialized existing analysis
    pub fn render_improvement(&self, analysis: &ResumeAnalysis) -> Result<String> {
        let serialized = serde_json::to_string_pretty(analysis)?;
        Ok(IMPROVEMENT_TEMPLATE.replace("{resume}", &serialized))
    }
}

const RESUME_ANALYSIS_TEMPLATE: &str = r#"Analyze this resume and provide detailed feedback:
{resume}

Provide analysis in the following JSON format:
{
  "name": "extracted name",
  "email": "extracted email",
  "phone": "extracted phone",
  "skills": ["skill1", "skill2"],
  "experience": [
    {
      "title": "job title",
      "company": "company name",
      "duration": "duration",
      "description": ["achievement1", "achievement2"]
    }
  ],
  "education": [
    {
      "degree": "degree name",
      "institution": "school name",
      "year": "graduation year"
    }
  ],
  "strengths": ["strength1", "strength2"],
  "weaknesses": ["weakness1", "weakness2"],
  "score": 85,
  "suggestions": [
    {
      "original": "original text",
      "improved": "improved version",
      "section": "experience/skills/etc"
    }
  ]
}"#;

const JOB_MATCH_TEMPLATE: &str = r#"Given this resume summary and job requirements, provide job matching analysis:

Resume Skills: {skills}
Resume Experience: {experience}
Job Title Search: {job_title}

Job Listings:
{listings}

Provide analysis in the following JSON format:
{
  "matches": [
    {
      "title": "Job Title",
      "company": "Company Name",
      "location": "Location",
      "description": "Job Description",
      "requirements": ["req1", "req2"],
      "matchScore": 85,
      "missingSkills": ["skill1", "skill2"],
      "recommendations": ["recommendation1", "recommendation2"]
    }
  ]
}"#;

const IMPROVEMENT_TEMPLATE: &str = r#"Analyze and improve this resume:

{resume}

Provide improvements in the following JSON format:
{
  "strengths": ["strength1", "strength2"],
  "weaknesses": ["weakness1", "weakness2"],
  "score": 85,
  "suggestions": [
    {
      "original": "original text",
      "improved": "improved version",
      "section": "experience/skills/etc"
    }
  ]
}"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::response::ExperienceEntry;

    #[test]
    fn test_resume_analysis_embeds_text_verbatim() {
        let templates = PromptTemplates::default();
        let text = "Jane Doe\njane@x.com\nSkills: Go, SQL";

        let prompt = templates.render_resume_analysis(text);

        assert!(prompt.contains(text));
        assert!(prompt.contains("\"skills\": [\"skill1\", \"skill2\"]"));
        assert!(prompt.contains("\"score\": 85"));
    }

    #[test]
    fn test_job_match_embeds_summary_and_catalog() {
        let templates = PromptTemplates::default();
        let analysis = ResumeAnalysis {
            skills: vec!["Go".to_string(), "SQL".to_string()],
            experience: vec![ExperienceEntry {
                title: "Backend Engineer".to_string(),
                ..Default::default()
            }],
            ..Default::default()
        };

        let prompt = templates.render_job_match(&analysis, "Platform Engineer");

        assert!(prompt.contains("Resume Skills: Go, SQL"));
        assert!(prompt.contains("Resume Experience: Backend Engineer"));
        assert!(prompt.contains("Job Title Search: Platform Engineer"));
        assert!(prompt.contains("Title: Senior Software Engineer"));
        assert!(prompt.contains("\"matchScore\": 85"));
    }

    #[test]
    fn test_improvement_embeds_serialized_analysis() {
        let templates = PromptTemplates::default();
        let analysis = ResumeAnalysis {
            name: "Jane Doe".to_string(),
            ..Default::default()
        };

        let prompt = templates.render_improvement(&analysis).unwrap();

        assert!(prompt.contains("\"name\": \"Jane Doe\""));
        assert!(prompt.contains("Provide improvements in the following JSON format"));
    }
}
