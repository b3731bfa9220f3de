use serde::{Deserialize, Serialize};

/// Base URL of the remote parsing service when nothing else is configured.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080";

/// Path under which the launcher serves [`AppConfig`] to the frontend.
pub const APP_CONFIG_PATH: &str = "/app-config.json";

/// Runtime configuration handed from the launcher to the browser app.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    pub api_base_url: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
        }
    }
}

impl AppConfig {
    /// Document upload; answers with `ParsedData`.
    pub fn parse_url(&self) -> String {
        self.endpoint("/api/parse")
    }

    pub fn map_schema_url(&self) -> String {
        self.endpoint("/api/map-schema")
    }

    /// AI generation without a schema.
    pub fn generate_url(&self) -> String {
        self.endpoint("/api/parse-data")
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.api_base_url.trim_end_matches('/'), path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_tolerate_a_trailing_slash() {
        let config = AppConfig {
            api_base_url: "https://parser.example.com/".into(),
        };
        assert_eq!(config.map_schema_url(), "https://parser.example.com/api/map-schema");
        assert_eq!(AppConfig::default().parse_url(), "http://localhost:8080/api/parse");
        assert_eq!(AppConfig::default().generate_url(), "http://localhost:8080/api/parse-data");
    }

    #[test]
    fn serializes_in_camel_case() {
        let json = serde_json::to_string(&AppConfig::default()).unwrap();
        assert_eq!(json, r#"{"apiBaseUrl":"http://localhost:8080"}"#);
    }
}
