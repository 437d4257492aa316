use std::path::Path;

use crate::{
    models::ScanRecord,
    scan::{ScanController, RECALL_NOT_FOUND},
    AppState,
};

fn controller_from_state(state: &AppState) -> ScanController {
    state.controller.clone()
}

pub async fn scan_image(state: &AppState, path: &Path) -> Result<ScanRecord, String> {
    let controller = controller_from_state(state);
    controller.scan_file(path).await.map_err(|e| {
        // The notice is what the user sees; the cause goes to the log.
        log::debug!("scan_image failed: {e}");
        e.notice().to_string()
    })
}

/// One-shot recall: opens the form, submits `id`, and reports not-found as an
/// error string.
pub async fn recall_scan(state: &AppState, id: &str) -> Result<ScanRecord, String> {
    let controller = controller_from_state(state);
    controller.open_recall().await;
    controller
        .set_recall_input(id)
        .await
        .map_err(|e| e.to_string())?;

    match controller.submit_recall().await {
        Ok(Some(record)) => Ok(record),
        Ok(None) => Err(RECALL_NOT_FOUND.to_string()),
        Err(e) => Err(e.notice().to_string()),
    }
}

/// All stored scans, newest first.
pub async fn list_scans(state: &AppState) -> Result<Vec<ScanRecord>, String> {
    let controller = controller_from_state(state);
    let scans = controller.store().get_all().map_err(|e| e.to_string())?;

    let mut scans: Vec<ScanRecord> = scans.into_values().collect();
    scans.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then_with(|| a.id.cmp(&b.id)));
    Ok(scans)
}
