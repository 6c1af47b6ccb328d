//! Session state for the currently held resume and match list
//!
//! Results are applied through request-generation tokens: every request
//! takes a fresh token, and a result is only applied when its token is
//! still the latest one issued. A slow early reply can therefore never
//! overwrite the result of a later request.

use crate::llm::response::{JobMatch, ResumeAnalysis};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestToken(u64);

#[derive(Debug, Default)]
pub struct Session {
    resume: Option<ResumeAnalysis>,
    matches: Vec<JobMatch>,
    issued: u64,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a token for a new request, invalidating all earlier tokens
    pub fn begin_request(&mut self) -> RequestToken {
        self.issued += 1;
        RequestToken(self.issued)
    }

    fn is_current(&self, token: RequestToken) -> bool {
        token.0 == self.issued
    }

    /// Install a new analysis, clearing any match list from the previous
    /// resume. Returns false when the token is stale and nothing changed.
    pub fn apply_resume(&mut self, token: RequestToken, analysis: ResumeAnalysis) -> bool {
        if !self.is_current(token) {
            return false;
        }
        self.resume = Some(analysis);
        self.matches.clear();
        true
    }

    /// Replace the match list wholesale. Returns false for stale tokens.
    pub fn apply_matches(&mut self, token: RequestToken, matches: Vec<JobMatch>) -> bool {
        if !self.is_current(token) {
            return false;
        }
        self.matches = matches;
        true
    }

    pub fn resume(&self) -> Option<&ResumeAnalysis> {
        self.resume.as_ref()
    }

    pub fn matches(&self) -> &[JobMatch] {
        &self.matches
    }

    pub fn clear(&mut self) {
        self.resume = None;
        self.matches.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analysis(name: &str) -> ResumeAnalysis {
        ResumeAnalysis {
            name: name.to_string(),
            ..Default::default()
        }
    }

    fn job(title: &str) -> JobMatch {
        JobMatch {
            title: title.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_current_token_applies() {
        let mut session = Session::new();
        let token = session.begin_request();

        assert!(session.apply_resume(token, analysis("Jane")));
        assert_eq!(session.resume().unwrap().name, "Jane");
    }

    #[test]
    fn test_stale_token_result_is_discarded() {
        let mut session = Session::new();
        let first = session.begin_request();
        let second = session.begin_request();

        // the later request finishes first
        assert!(session.apply_resume(second, analysis("Later")));
        // the slow earlier reply must not overwrite it
        assert!(!session.apply_resume(first, analysis("Earlier")));
        assert_eq!(session.resume().unwrap().name, "Later");
    }

    #[test]
    fn test_new_resume_clears_match_list() {
        let mut session = Session::new();
        let token = session.begin_request();
        session.apply_resume(token, analysis("Jane"));

        let token = session.begin_request();
        session.apply_matches(token, vec![job("Engineer")]);
        assert_eq!(session.matches().len(), 1);

        let token = session.begin_request();
        session.apply_resume(token, analysis("New Upload"));
        assert!(session.matches().is_empty());
    }

    #[test]
    fn test_match_list_is_replaced_not_accumulated() {
        let mut session = Session::new();

        let token = session.begin_request();
        session.apply_matches(token, vec![job("Engineer"), job("Analyst")]);

        let token = session.begin_request();
        session.apply_matches(token, vec![job("Architect")]);

        assert_eq!(session.matches().len(), 1);
        assert_eq!(session.matches()[0].title, "Architect");
    }

    #[test]
    fn test_clear_drops_everything() {
        let mut session = Session::new();
        let token = session.begin_request();
        session.apply_resume(token, analysis("Jane"));

        session.clear();
        assert!(session.resume().is_none());
        assert!(session.matches().is_empty());
    }
}
