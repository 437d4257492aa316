pub mod config;
pub mod error;
pub mod gemini;
pub mod mock;
pub mod response;
pub mod schema;

use async_trait::async_trait;

use crate::models::AnalysisResult;

pub use config::VisionConfig;
pub use error::VisionError;
pub use gemini::GeminiVisionClient;
pub use mock::{FailingVisionClient, MockVisionClient};

/// One-shot image analysis. No retry and no cancellation: once called, the
/// future runs to its single success or failure.
#[async_trait]
pub trait VisionClient: Send + Sync {
    async fn analyze(&self, image_base64: &str, mime_type: &str)
        -> Result<AnalysisResult, VisionError>;
}
