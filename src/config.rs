use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use anyhow::Result;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub system_config: SystemConfig,
    #[serde(default)]
    pub ollama_config: OllamaConfig,
    #[serde(default = "default_sample_prompts")]
    pub sample_prompts: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_static_dir")]
    pub static_dir: String,
}

/// Where the inference server lives and which models the UI offers
/// when none can be discovered.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OllamaConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_probe_timeout_secs")]
    pub probe_timeout_secs: u64,
    #[serde(default = "default_model")]
    pub default_model: String,
    #[serde(default = "default_fallback_models")]
    pub fallback_models: Vec<String>,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8501
}

fn default_static_dir() -> String {
    "static".to_string()
}

fn default_base_url() -> String {
    "http://localhost:11434".to_string()
}

fn default_probe_timeout_secs() -> u64 {
    5
}

fn default_model() -> String {
    "llama3.2".to_string()
}

fn default_fallback_models() -> Vec<String> {
    ["llama3.2", "llama3.1", "mistral", "codellama", "neural-chat"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_sample_prompts() -> Vec<String> {
    [
        "Explain quantum computing in simple terms",
        "Write a short story about a robot learning to paint",
        "What are the benefits of renewable energy?",
        "Create a recipe for chocolate chip cookies",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)?;

        // Determine file type by extension
        let path_lower = path.to_lowercase();
        if path_lower.ends_with(".json") {
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            let config: Config = serde_yaml::from_str(&content)?;
            Ok(config)
        }
    }

    /// Try each candidate path in order; fall back to built-in defaults
    /// when none of them exists. A file that exists but fails to parse is
    /// an error.
    pub fn discover(candidates: &[String]) -> Result<(Self, Option<String>)> {
        for path in candidates {
            if !Path::new(path).exists() {
                tracing::debug!("No config at {}", path);
                continue;
            }
            let config = Config::load(path)
                .map_err(|e| anyhow::anyhow!("Failed to load config from {}: {}", path, e))?;
            return Ok((config, Some(path.clone())));
        }
        Ok((Config::default(), None))
    }

    pub fn candidate_paths() -> Vec<String> {
        vec![
            std::env::var("CONFIG_PATH").ok(),
            Some("conf.yaml".to_string()),
            Some("conf.json".to_string()),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            system_config: SystemConfig::default(),
            ollama_config: OllamaConfig::default(),
            sample_prompts: default_sample_prompts(),
        }
    }
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            static_dir: default_static_dir(),
        }
    }
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            probe_timeout_secs: default_probe_timeout_secs(),
            default_model: default_model(),
            fallback_models: default_fallback_models(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_local_ollama() {
        let config = Config::default();
        assert_eq!(config.ollama_config.base_url, "http://localhost:11434");
        assert_eq!(config.ollama_config.probe_timeout_secs, 5);
        assert_eq!(config.ollama_config.fallback_models[0], "llama3.2");
        assert_eq!(config.ollama_config.fallback_models.len(), 5);
        assert_eq!(config.system_config.port, 8501);
    }

    #[test]
    fn default_sample_prompts_are_present() {
        let config: Config = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config.sample_prompts.len(), 4);
        assert_eq!(config.sample_prompts, Config::default().sample_prompts);
        assert_eq!(
            config.sample_prompts[0],
            "Explain quantum computing in simple terms"
        );
    }

    #[test]
    fn partial_yaml_keeps_other_defaults() {
        let yaml = "ollama_config:\n  base_url: http://gpu-box:11434\nsystem_config:\n  port: 9000\n";
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.ollama_config.base_url, "http://gpu-box:11434");
        assert_eq!(config.ollama_config.default_model, "llama3.2");
        assert_eq!(config.system_config.port, 9000);
        assert_eq!(config.system_config.host, "127.0.0.1");
    }

    #[test]
    fn example_config_matches_defaults() {
        let config = Config::load("conf.example.yaml").unwrap();
        let defaults = Config::default();
        assert_eq!(config.ollama_config.fallback_models, defaults.ollama_config.fallback_models);
        assert_eq!(config.sample_prompts, defaults.sample_prompts);
        assert_eq!(config.system_config.port, defaults.system_config.port);
    }

    #[test]
    fn discover_without_files_uses_defaults() {
        let (config, path) =
            Config::discover(&["/nonexistent/ollama-chat/conf.yaml".to_string()]).unwrap();
        assert!(path.is_none());
        assert_eq!(config.ollama_config.default_model, "llama3.2");
    }

    #[test]
    fn load_reads_json_by_extension() {
        let dir = std::env::temp_dir().join(format!("ollama-chat-{}", uuid::Uuid::new_v4()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("conf.json");
        fs::write(&path, r#"{"sample_prompts": ["hi"]}"#).unwrap();

        let config = Config::load(path.to_str().unwrap()).unwrap();
        assert_eq!(config.sample_prompts, vec!["hi".to_string()]);

        fs::remove_dir_all(&dir).unwrap();
    }
}
