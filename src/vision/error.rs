use thiserror::Error;

/// Classified failure of one analysis call.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum VisionError {
    /// No credential was available when the call was made.
    #[error("configuration error: {0}")]
    ConfigurationMissing(String),

    /// The request could not be sent or the service answered non-2xx.
    #[error("transport error: {0}")]
    Transport(String),

    /// The answer was not JSON or lacked required fields.
    #[error("response did not match the schema: {0}")]
    SchemaViolation(String),

    /// The service blocked the request or produced no content.
    #[error("service refused the request: {0}")]
    ServiceRefused(String),

    /// An owner-profile field held a value outside its enumeration.
    #[error("unrecognized value '{value}' for {field}")]
    UnrecognizedValue { field: String, value: String },
}
