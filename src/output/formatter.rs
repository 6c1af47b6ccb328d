//! Console and JSON renderers for analysis results

use crate::error::Result;
use crate::llm::response::{ImprovementAnalysis, JobMatch, ResumeAnalysis, Suggestion};
use colored::Colorize;
use serde::Serialize;
use std::fmt::Write;

/// Console renderer with optional colors
pub struct ConsoleFormatter {
    use_colors: bool,
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    fn heading(&self, text: &str) -> String {
        if self.use_colors {
            text.cyan().bold().to_string()
        } else {
            text.to_string()
        }
    }

    fn label(&self, text: &str) -> String {
        if self.use_colors {
            text.yellow().to_string()
        } else {
            text.to_string()
        }
    }

    fn score_badge(&self, score: i64) -> String {
        let badge = format!("{}/100", score);
        if !self.use_colors {
            return badge;
        }
        match score {
            80..=100 => badge.green().to_string(),
            50..=79 => badge.yellow().to_string(),
            _ => badge.red().to_string(),
        }
    }

    pub fn format_analysis(&self, analysis: &ResumeAnalysis) -> String {
        let mut out = String::new();

        let _ = writeln!(out, "{}", self.heading("📋 Resume Analysis"));
        if !analysis.name.is_empty() {
            let _ = writeln!(out, "  {} {}", self.label("Name:"), analysis.name);
        }
        if !analysis.email.is_empty() {
            let _ = writeln!(out, "  {} {}", self.label("Email:"), analysis.email);
        }
        if !analysis.phone.is_empty() {
            let _ = writeln!(out, "  {} {}", self.label("Phone:"), analysis.phone);
        }
        let _ = writeln!(out, "  {} {}", self.label("Score:"), self.score_badge(analysis.score));

        if !analysis.skills.is_empty() {
            let _ = writeln!(out, "\n{}", self.heading("🔧 Key Skills"));
            let _ = writeln!(out, "  {}", analysis.skills.join(", "));
        }

        if !analysis.experience.is_empty() {
            let _ = writeln!(out, "\n{}", self.heading("💼 Experience"));
            for entry in &analysis.experience {
                let _ = writeln!(out, "  • {} at {} ({})", entry.title, entry.company, entry.duration);
                for line in &entry.description {
                    let _ = writeln!(out, "      - {}", line);
                }
            }
        }

        if !analysis.education.is_empty() {
            let _ = writeln!(out, "\n{}", self.heading("🎓 Education"));
            for entry in &analysis.education {
                let _ = writeln!(out, "  • {}, {} ({})", entry.degree, entry.institution, entry.year);
            }
        }

        if !analysis.strengths.is_empty() {
            let _ = writeln!(out, "\n{}", self.heading("💪 Strengths"));
            for strength in &analysis.strengths {
                let _ = writeln!(out, "  • {}", strength);
            }
        }

        if !analysis.weaknesses.is_empty() {
            let _ = writeln!(out, "\n{}", self.heading("⚠️  Weaknesses"));
            for weakness in &analysis.weaknesses {
                let _ = writeln!(out, "  • {}", weakness);
            }
        }

        out.push_str(&self.format_suggestions(&analysis.suggestions));
        out
    }

    pub fn format_matches(&self, matches: &[JobMatch]) -> String {
        if matches.is_empty() {
            return "No job matches found.\n".to_string();
        }

        let mut out = String::new();
        let _ = writeln!(out, "{}", self.heading("🎯 Job Matches"));

        for job in matches {
            let _ = writeln!(
                out,
                "\n  {} at {} — {} match",
                job.title,
                job.company,
                self.score_badge(job.match_score)
            );
            if !job.location.is_empty() {
                let _ = writeln!(out, "  {} {}", self.label("Location:"), job.location);
            }
            if !job.requirements.is_empty() {
                let _ = writeln!(out, "  {} {}", self.label("Requirements:"), job.requirements.join(", "));
            }
            if !job.missing_skills.is_empty() {
                let _ = writeln!(out, "  {} {}", self.label("Missing skills:"), job.missing_skills.join(", "));
            }
            if !job.recommendations.is_empty() {
                let _ = writeln!(out, "  {}", self.label("Next steps:"));
                for rec in &job.recommendations {
                    let _ = writeln!(out, "    • {}", rec);
                }
            }
        }

        out
    }

    pub fn format_improvement(&self, improvement: &ImprovementAnalysis) -> String {
        let mut out = String::new();

        let _ = writeln!(out, "{}", self.heading("✨ Improvement Analysis"));
        let _ = writeln!(out, "  {} {}", self.label("Score:"), self.score_badge(improvement.score));

        if !improvement.strengths.is_empty() {
            let _ = writeln!(out, "\n{}", self.heading("💪 Strengths"));
            for strength in &improvement.strengths {
                let _ = writeln!(out, "  • {}", strength);
            }
        }

        if !improvement.weaknesses.is_empty() {
            let _ = writeln!(out, "\n{}", self.heading("⚠️  Weaknesses"));
            for weakness in &improvement.weaknesses {
                let _ = writeln!(out, "  • {}", weakness);
            }
        }

        out.push_str(&self.format_suggestions(&improvement.suggestions));
        out
    }

    fn format_suggestions(&self, suggestions: &[Suggestion]) -> String {
        if suggestions.is_empty() {
            return String::new();
        }

        let mut out = String::new();
        let _ = writeln!(out, "\n{}", self.heading("💡 Suggestions"));
        for suggestion in suggestions {
            let _ = writeln!(out, "  [{}]", suggestion.section);
            let _ = writeln!(out, "    {} {}", self.label("Original:"), suggestion.original);
            let _ = writeln!(out, "    {} {}", self.label("Improved:"), suggestion.improved);
        }
        out
    }
}

/// JSON renderer for scripting and downstream tooling
pub struct JsonFormatter;

impl JsonFormatter {
    pub fn format<T: Serialize>(&self, value: &T) -> Result<String> {
        Ok(serde_json::to_string_pretty(value)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::response::ExperienceEntry;

    fn sample_analysis() -> ResumeAnalysis {
        ResumeAnalysis {
            text: "raw".to_string(),
            name: "Jane Doe".to_string(),
            skills: vec!["Go".to_string(), "SQL".to_string()],
            experience: vec![ExperienceEntry {
                title: "Backend Engineer".to_string(),
                company: "Acme".to_string(),
                duration: "2019-2023".to_string(),
                description: vec!["Built APIs".to_string()],
            }],
            score: 70,
            ..Default::default()
        }
    }

    #[test]
    fn test_console_output_without_colors() {
        let formatter = ConsoleFormatter::new(false);
        let out = formatter.format_analysis(&sample_analysis());

        assert!(out.contains("Jane Doe"));
        assert!(out.contains("70/100"));
        assert!(out.contains("Go, SQL"));
        assert!(out.contains("Backend Engineer at Acme"));
    }

    #[test]
    fn test_empty_sections_are_omitted() {
        let formatter = ConsoleFormatter::new(false);
        let out = formatter.format_analysis(&ResumeAnalysis::default());

        assert!(!out.contains("Key Skills"));
        assert!(!out.contains("Strengths"));
        assert!(!out.contains("Suggestions"));
    }

    #[test]
    fn test_empty_match_list_renders_notice() {
        let formatter = ConsoleFormatter::new(false);
        assert_eq!(formatter.format_matches(&[]), "No job matches found.\n");
    }

    #[test]
    fn test_json_output_is_parseable() {
        let out = JsonFormatter.format(&sample_analysis()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["name"], "Jane Doe");
        assert_eq!(value["score"], 70);
    }
}
