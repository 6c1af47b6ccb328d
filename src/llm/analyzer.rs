//! Analysis orchestration over the completion service
//!
//! One request per call, no retry and no caching. Replies are untrusted and
//! go through lenient validation in [`crate::llm::response`].

use crate::config::Config;
use crate::error::Result;
use crate::llm::client::CompletionClient;
use crate::llm::prompts::PromptTemplates;
use crate::llm::response::{
    self, ImprovementAnalysis, JobMatch, ResumeAnalysis,
};
use log::debug;

pub struct ResumeAnalyzer {
    client: CompletionClient,
    templates: PromptTemplates,
}

impl ResumeAnalyzer {
    pub fn new(config: &Config, api_key: String) -> Self {
        Self {
            client: CompletionClient::new(&config.api.base_url, &config.api.model, api_key),
            templates: PromptTemplates::default(),
        }
    }

    /// Analyze extracted resume text into a typed breakdown
    pub async fn analyze_resume(&self, text: &str) -> Result<ResumeAnalysis> {
        let prompt = self.templates.render_resume_analysis(text);
        debug!("resume analysis prompt is {} chars", prompt.len());

        let raw = self.client.complete(&prompt).await?;
        Ok(response::parse_resume_analysis(&raw, text))
    }

    /// Match an analyzed resume against the job catalog for a target title
    pub async fn find_job_matches(
        &self,
        analysis: &ResumeAnalysis,
        job_title: &str,
    ) -> Result<Vec<JobMatch>> {
        let prompt = self.templates.render_job_match(analysis, job_title);
        debug!("job match prompt is {} chars", prompt.len());

        let raw = self.client.complete(&prompt).await?;
        Ok(response::parse_job_matches(&raw))
    }

    /// Request a narrower improvement pass over an existing analysis
    pub async fn improve_resume(&self, analysis: &ResumeAnalysis) -> Result<ImprovementAnalysis> {
        let prompt = self.templates.render_improvement(analysis)?;
        debug!("improvement prompt is {} chars", prompt.len());

        let raw = self.client.complete(&prompt).await?;
        Ok(response::parse_improvement(&raw))
    }
}
