use std::{path::Path, sync::Arc};

use chrono::Utc;
use tokio::sync::{watch, Mutex};

use crate::{
    log_error, log_info, log_warn,
    media,
    models::{AnalysisResult, ScanRecord},
    store::ScanRepository,
    vision::VisionClient,
};

use super::{allocate_id, LifecycleState, ScanError, ScanView};

const ENABLE_LOGS: bool = true;

/// Drives the scan lifecycle: image in, analysis, persistence, view changes,
/// and recall by id.
///
/// Cheap to clone; clones share state. Every state change is published on a
/// watch channel so a view layer can re-render.
#[derive(Clone)]
pub struct ScanController {
    state: Arc<Mutex<LifecycleState>>,
    store: Arc<dyn ScanRepository>,
    vision: Arc<dyn VisionClient>,
    updates: Arc<watch::Sender<LifecycleState>>,
}

impl ScanController {
    pub fn new(store: Arc<dyn ScanRepository>, vision: Arc<dyn VisionClient>) -> Self {
        let (updates, _) = watch::channel(LifecycleState::new());
        Self {
            state: Arc::new(Mutex::new(LifecycleState::new())),
            store,
            vision,
            updates: Arc::new(updates),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<LifecycleState> {
        self.updates.subscribe()
    }

    pub async fn snapshot(&self) -> LifecycleState {
        self.state.lock().await.clone()
    }

    pub fn store(&self) -> &Arc<dyn ScanRepository> {
        &self.store
    }

    /// Reads `path` as the selected image, then runs [`Self::submit_image`]'s
    /// pipeline. A read failure is reported like any other scan failure.
    pub async fn scan_file(&self, path: &Path) -> Result<ScanRecord, ScanError> {
        let token = self.begin_analysis().await;
        let outcome = match media::read_as_data_url(path).await {
            Ok(data_url) => self.analyze(data_url).await,
            Err(err) => Err(err.into()),
        };
        self.finish_analysis(token, outcome).await
    }

    /// Analyzes an already-encoded `data:` URL.
    pub async fn submit_image(&self, data_url: String) -> Result<ScanRecord, ScanError> {
        let token = self.begin_analysis().await;
        let outcome = self.analyze(data_url).await;
        self.finish_analysis(token, outcome).await
    }

    pub async fn open_recall(&self) {
        self.transition(|state| {
            state.open_recall();
            Ok(())
        })
        .await
        .ok();
    }

    pub async fn set_recall_input(&self, input: impl Into<String>) -> Result<(), ScanError> {
        let input = input.into();
        self.transition(move |state| {
            require_view(state, ScanView::Recall, "edit the recall identifier")?;
            state.recall_input = input;
            Ok(())
        })
        .await
    }

    /// Looks up the current recall input. `Ok(None)` means not found; the
    /// state then stays in `Recall` with a field error.
    pub async fn submit_recall(&self) -> Result<Option<ScanRecord>, ScanError> {
        let mut state = self.state.lock().await;
        require_view(&state, ScanView::Recall, "submit a recall")?;

        let id = state.recall_input.trim().to_string();
        let found = match self.store.get_by_id(&id) {
            Ok(found) => found,
            Err(err) => {
                let err = ScanError::from(err);
                log_error!("Recall of '{}' failed: {}", id, err);
                state.notice = Some(err.notice().to_string());
                self.publish(&state);
                return Err(err);
            }
        };

        match &found {
            Some(record) => {
                log_info!("Recalled scan #{}", record.id);
                state.show_recalled(record.clone());
            }
            None => {
                log_info!("Recall of '{}' found nothing", id);
                state.recall_not_found();
            }
        }
        self.publish(&state);
        Ok(found)
    }

    pub async fn cancel_recall(&self) -> Result<(), ScanError> {
        self.transition(|state| {
            require_view(state, ScanView::Recall, "cancel a recall")?;
            state.cancel_recall();
            Ok(())
        })
        .await
    }

    pub async fn close_result(&self) -> Result<(), ScanError> {
        self.transition(|state| {
            require_view(state, ScanView::Result, "close a result")?;
            state.go_home();
            Ok(())
        })
        .await
    }

    /// Navigation to Home from any view. An outstanding scan keeps running and
    /// still transitions when it resolves.
    pub async fn go_home(&self) {
        self.transition(|state| {
            state.go_home();
            Ok(())
        })
        .await
        .ok();
    }

    pub async fn dismiss_notice(&self) {
        self.transition(|state| {
            state.dismiss_notice();
            Ok(())
        })
        .await
        .ok();
    }

    async fn transition<F>(&self, apply: F) -> Result<(), ScanError>
    where
        F: FnOnce(&mut LifecycleState) -> Result<(), ScanError>,
    {
        let mut state = self.state.lock().await;
        let from = state.view;
        apply(&mut state)?;
        if state.view != from {
            log_info!("View {} -> {}", from, state.view);
        }
        self.publish(&state);
        Ok(())
    }

    async fn begin_analysis(&self) -> u64 {
        let mut state = self.state.lock().await;
        let token = state.begin_analysis();
        log_info!("Scan {} started", token);
        self.publish(&state);
        token
    }

    async fn analyze(&self, data_url: String) -> Result<(String, AnalysisResult), ScanError> {
        let analysis = {
            let image = media::parse_data_url(&data_url)?;
            self.vision.analyze(image.payload, image.mime_type).await?
        };
        Ok((data_url, analysis))
    }

    async fn finish_analysis(
        &self,
        token: u64,
        outcome: Result<(String, AnalysisResult), ScanError>,
    ) -> Result<ScanRecord, ScanError> {
        let mut state = self.state.lock().await;
        if !state.is_current(token) {
            log_warn!("Discarding result of superseded scan {}", token);
            return Err(ScanError::Superseded);
        }

        let outcome = outcome.and_then(|(image_data, analysis)| self.persist(image_data, analysis));
        let result = match outcome {
            Ok(record) => {
                log_info!(
                    "Scan {} identified {} ({}%) as #{}",
                    token,
                    record.analysis.breed_label,
                    record.analysis.certainty,
                    record.id
                );
                state.finish_with_result(record.clone());
                Ok(record)
            }
            Err(err) => {
                log_error!("Scan {} failed: {}", token, err);
                state.finish_with_failure(err.notice());
                Err(err)
            }
        };
        self.publish(&state);
        result
    }

    fn persist(&self, image_data: String, analysis: AnalysisResult) -> Result<ScanRecord, ScanError> {
        let existing = self.store.get_all()?;
        let id = allocate_id(&mut rand::thread_rng(), |candidate| {
            existing.contains_key(candidate)
        });

        let record = ScanRecord {
            id,
            timestamp: Utc::now().timestamp_millis(),
            image_data,
            analysis,
        };
        self.store.put(record.clone())?;
        Ok(record)
    }

    fn publish(&self, state: &LifecycleState) {
        self.updates.send_replace(state.clone());
    }
}

fn require_view(
    state: &LifecycleState,
    expected: ScanView,
    action: &'static str,
) -> Result<(), ScanError> {
    if state.view == expected {
        Ok(())
    } else {
        Err(ScanError::InvalidTransition {
            from: state.view,
            action,
        })
    }
}
