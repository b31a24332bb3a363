//! Service configuration.
//!
//! Everything is environment-driven with working local defaults, so a bare
//! `casegen-server` next to local Ollama and Qdrant instances just works.

use std::time::Duration;

use casegen_pipeline::DEFAULT_GENERATION_TIMEOUT;

/// Runtime configuration for the service.
#[derive(Debug, Clone)]
pub struct Config {
    /// Address the HTTP server binds to.
    pub bind_addr: String,

    /// Model endpoint base URL.
    pub model_base_url: String,

    /// Model to invoke.
    pub model_name: String,

    /// Per-call generation timeout.
    pub generation_timeout: Duration,

    /// Vector store base URL.
    pub vector_store_url: String,

    /// Default tracker username, overridable per request.
    pub tracker_username: String,

    /// Default tracker API token, overridable per request.
    pub tracker_api_token: String,

    /// Default tracker base URL, overridable per request.
    pub tracker_base_url: String,
}

impl Config {
    /// Load configuration from the process environment.
    pub fn from_env() -> Self {
        Self::resolve(|key| std::env::var(key).ok())
    }

    /// Build configuration from a variable lookup.
    fn resolve(var: impl Fn(&str) -> Option<String>) -> Self {
        // Inside a container the model endpoint runs on the host, not on
        // localhost.
        let in_container = var("DOCKER_CONTAINER")
            .map(|v| v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);
        let model_base_url = if in_container {
            "http://host.docker.internal:11434".to_string()
        } else {
            var("OLLAMA_API_BASE").unwrap_or_else(|| "http://localhost:11434".to_string())
        };

        let generation_timeout = var("OLLAMA_TIMEOUT")
            .and_then(|v| v.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_GENERATION_TIMEOUT);

        Self {
            bind_addr: var("BIND_ADDR").unwrap_or_else(|| "0.0.0.0:8000".to_string()),
            model_base_url,
            model_name: var("OLLAMA_MODEL").unwrap_or_else(|| "deepseek-r1:8b".to_string()),
            generation_timeout,
            vector_store_url: var("QDRANT_URL")
                .unwrap_or_else(|| "http://localhost:6333".to_string()),
            tracker_username: var("JIRA_USERNAME").unwrap_or_default(),
            tracker_api_token: var("JIRA_API_TOKEN").unwrap_or_default(),
            tracker_base_url: var("JIRA_BASE_URL").unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn resolve(vars: &[(&str, &str)]) -> Config {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::resolve(|key| map.get(key).cloned())
    }

    #[test]
    fn defaults_point_at_local_services() {
        let config = resolve(&[]);
        assert_eq!(config.model_base_url, "http://localhost:11434");
        assert_eq!(config.model_name, "deepseek-r1:8b");
        assert_eq!(config.generation_timeout, Duration::from_secs(120));
        assert_eq!(config.vector_store_url, "http://localhost:6333");
        assert_eq!(config.bind_addr, "0.0.0.0:8000");
        assert!(config.tracker_username.is_empty());
    }

    #[test]
    fn container_flag_redirects_model_endpoint() {
        let config = resolve(&[
            ("DOCKER_CONTAINER", "true"),
            ("OLLAMA_API_BASE", "http://elsewhere:11434"),
        ]);
        assert_eq!(config.model_base_url, "http://host.docker.internal:11434");
    }

    #[test]
    fn timeout_parses_seconds() {
        let config = resolve(&[("OLLAMA_TIMEOUT", "45")]);
        assert_eq!(config.generation_timeout, Duration::from_secs(45));
    }

    #[test]
    fn unparseable_timeout_falls_back_to_default() {
        let config = resolve(&[("OLLAMA_TIMEOUT", "soon")]);
        assert_eq!(config.generation_timeout, Duration::from_secs(120));
    }
}
