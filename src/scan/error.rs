use thiserror::Error;

use crate::media::MediaError;
use crate::store::StoreError;
use crate::vision::VisionError;

use super::ScanView;

#[derive(Debug, Error)]
pub enum ScanError {
    #[error(transparent)]
    InvalidImage(#[from] MediaError),

    #[error(transparent)]
    Analysis(#[from] VisionError),

    #[error(transparent)]
    Storage(#[from] StoreError),

    #[error("cannot {action} while in {from} view")]
    InvalidTransition { from: ScanView, action: &'static str },

    /// A newer submission started before this one resolved.
    #[error("scan superseded by a newer submission")]
    Superseded,
}

impl ScanError {
    /// Text of the blocking notice shown when a scan fails.
    pub fn notice(&self) -> &'static str {
        match self {
            ScanError::Analysis(VisionError::ConfigurationMissing(_)) => {
                "Failed to identify dog. Please check your API key and try again."
            }
            ScanError::Analysis(VisionError::Transport(_)) => {
                "Failed to identify dog. The analysis service could not be reached, please try again."
            }
            ScanError::Analysis(VisionError::ServiceRefused(_)) => {
                "Failed to identify dog. The analysis service declined this image."
            }
            ScanError::Analysis(VisionError::SchemaViolation(_))
            | ScanError::Analysis(VisionError::UnrecognizedValue { .. }) => {
                "Failed to identify dog. The analysis service returned an unexpected answer."
            }
            ScanError::InvalidImage(_) => {
                "Failed to identify dog. The selected file is not a readable image."
            }
            ScanError::Storage(_) => "The scan could not be saved or read from local storage.",
            ScanError::InvalidTransition { .. } | ScanError::Superseded => {
                "Failed to identify dog. Please try again."
            }
        }
    }
}
