use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::ScanRecord;

pub const RECALL_NOT_FOUND: &str = "Scan identifier not found.";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum ScanView {
    #[default]
    Home,
    Scanning,
    Result,
    Recall,
}

impl ScanView {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScanView::Home => "Home",
            ScanView::Scanning => "Scanning",
            ScanView::Result => "Result",
            ScanView::Recall => "Recall",
        }
    }
}

impl fmt::Display for ScanView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything the views render from. Transitions only mutate memory; the
/// controller performs the I/O around them.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LifecycleState {
    pub view: ScanView,
    pub active_scan: Option<ScanRecord>,
    pub recall_input: String,
    pub recall_error: Option<String>,
    /// Failure notice; cleared when dismissed or when the user moves on.
    pub notice: Option<String>,
    /// Bumped on every image submission.
    #[serde(skip)]
    pub generation: u64,
    /// Generation of the analysis whose completion may still transition.
    #[serde(skip)]
    pub in_flight: Option<u64>,
}

impl LifecycleState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_analyzing(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Enters `Scanning` and returns the token the completion must present.
    /// A newer call makes older tokens stale.
    pub fn begin_analysis(&mut self) -> u64 {
        self.generation = self.generation.wrapping_add(1);
        self.in_flight = Some(self.generation);
        self.notice = None;
        self.view = ScanView::Scanning;
        self.generation
    }

    pub fn is_current(&self, token: u64) -> bool {
        self.in_flight == Some(token)
    }

    pub fn finish_with_result(&mut self, record: ScanRecord) {
        self.in_flight = None;
        self.active_scan = Some(record);
        self.view = ScanView::Result;
    }

    pub fn finish_with_failure(&mut self, message: impl Into<String>) {
        self.in_flight = None;
        self.notice = Some(message.into());
        self.view = ScanView::Home;
    }

    pub fn open_recall(&mut self) {
        self.notice = None;
        self.view = ScanView::Recall;
    }

    pub fn show_recalled(&mut self, record: ScanRecord) {
        self.active_scan = Some(record);
        self.recall_input.clear();
        self.recall_error = None;
        self.notice = None;
        self.view = ScanView::Result;
    }

    pub fn recall_not_found(&mut self) {
        self.recall_error = Some(RECALL_NOT_FOUND.to_string());
    }

    pub fn cancel_recall(&mut self) {
        self.recall_input.clear();
        self.recall_error = None;
        self.view = ScanView::Home;
    }

    pub fn go_home(&mut self) {
        self.notice = None;
        self.view = ScanView::Home;
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::record;

    #[test]
    fn starts_idle_on_home() {
        let state = LifecycleState::new();
        assert_eq!(state.view, ScanView::Home);
        assert!(!state.is_analyzing());
        assert!(state.active_scan.is_none());
    }

    #[test]
    fn newer_analysis_makes_older_token_stale() {
        let mut state = LifecycleState::new();
        let first = state.begin_analysis();
        let second = state.begin_analysis();

        assert!(!state.is_current(first));
        assert!(state.is_current(second));

        state.finish_with_result(record("300"));
        assert!(!state.is_current(second));
        assert_eq!(state.view, ScanView::Result);
    }

    #[test]
    fn failure_returns_home_with_notice() {
        let mut state = LifecycleState::new();
        state.begin_analysis();
        state.finish_with_failure("boom");
        assert_eq!(state.view, ScanView::Home);
        assert_eq!(state.notice.as_deref(), Some("boom"));

        state.begin_analysis();
        assert!(state.notice.is_none());
    }

    #[test]
    fn recall_success_clears_form() {
        let mut state = LifecycleState::new();
        state.open_recall();
        state.recall_input = " 300 ".into();
        state.recall_not_found();
        assert_eq!(state.recall_error.as_deref(), Some(RECALL_NOT_FOUND));
        assert_eq!(state.view, ScanView::Recall);

        state.show_recalled(record("300"));
        assert_eq!(state.view, ScanView::Result);
        assert!(state.recall_input.is_empty());
        assert!(state.recall_error.is_none());
    }

    #[test]
    fn cancel_recall_clears_form() {
        let mut state = LifecycleState::new();
        state.open_recall();
        state.recall_input = "12".into();
        state.recall_not_found();
        state.cancel_recall();
        assert_eq!(state.view, ScanView::Home);
        assert!(state.recall_input.is_empty());
        assert!(state.recall_error.is_none());
    }

    #[test]
    fn moving_on_clears_notice() {
        let mut state = LifecycleState::new();
        state.notice = Some("storage failed".into());
        state.open_recall();
        assert!(state.notice.is_none());

        state.notice = Some("storage failed".into());
        state.show_recalled(record("300"));
        assert!(state.notice.is_none());

        state.notice = Some("storage failed".into());
        state.go_home();
        assert!(state.notice.is_none());
    }
}
