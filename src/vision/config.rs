pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-flash-latest";
pub const DEFAULT_TEMPERATURE: f64 = 0.4;

/// Connection settings for the vision service.
#[derive(Debug, Clone)]
pub struct VisionConfig {
    /// Base URL up to and including the API version segment.
    pub endpoint: String,
    pub model: String,
    /// `None` is allowed here; the call itself reports the missing credential.
    pub api_key: Option<String>,
    pub temperature: f64,
}

impl VisionConfig {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key,
            temperature: DEFAULT_TEMPERATURE,
        }
    }

    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    #[must_use]
    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_and_builder() {
        let config = VisionConfig::new(None);
        assert_eq!(config.model, "gemini-flash-latest");
        assert_eq!(config.temperature, 0.4);
        assert!(config.api_key.is_none());

        let config = VisionConfig::new(Some("k".into()))
            .with_endpoint("http://localhost:8080/v1beta")
            .with_model("gemini-2.0-flash")
            .with_temperature(0.0);
        assert_eq!(config.endpoint, "http://localhost:8080/v1beta");
        assert_eq!(config.model, "gemini-2.0-flash");
        assert_eq!(config.temperature, 0.0);
    }
}
