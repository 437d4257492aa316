//! Text rendering of the four views. Every function here is a pure function
//! of the lifecycle state.

pub mod home;
pub mod recall;
pub mod result;
pub mod scanning;

use crate::scan::{LifecycleState, ScanView};

pub fn render(state: &LifecycleState) -> String {
    let body = match (state.view, state.active_scan.as_ref()) {
        (ScanView::Home, _) => home::render(),
        (ScanView::Scanning, _) => scanning::render(),
        (ScanView::Result, Some(scan)) => result::render(scan),
        // A result view without a record renders like Home.
        (ScanView::Result, None) => home::render(),
        (ScanView::Recall, _) => recall::render(&state.recall_input, state.recall_error.as_deref()),
    };

    match &state.notice {
        Some(notice) => format!("! {notice}\n\n{body}"),
        None => body,
    }
}
