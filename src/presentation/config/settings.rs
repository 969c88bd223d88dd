use config::{Config, ConfigError, File};
use serde::{Deserialize, Serialize};

use super::Environment;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub cors: CorsSettings,
    pub llm: LlmSettings,
    pub prompt: PromptSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub max_upload_mb: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsSettings {
    /// The single origin allowed to call the API, credentials included.
    pub allowed_origin: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmSettings {
    pub base_url: String,
    pub api_key: String,
    pub chat_model: String,
    pub timeout_seconds: u64,
    #[serde(default)]
    pub temperature: Option<f32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptSettings {
    pub max_input_chars: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    pub level: String,
    pub enable_json: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerSettings {
                host: "0.0.0.0".to_string(),
                port: 8000,
                max_upload_mb: 20,
            },
            cors: CorsSettings {
                allowed_origin: "http://localhost:5173".to_string(),
            },
            llm: LlmSettings {
                base_url: "http://localhost:11434/v1".to_string(),
                api_key: "ollama".to_string(),
                chat_model: "mistral".to_string(),
                timeout_seconds: 120,
                temperature: None,
            },
            prompt: PromptSettings {
                max_input_chars: 4000,
            },
            logging: LoggingSettings {
                level: "info".to_string(),
                enable_json: false,
            },
        }
    }
}

impl Settings {
    /// Defaults, then `appsettings.{environment}` if present, then `APP_*`
    /// variables (`APP_LLM__CHAT_MODEL=llama3`).
    pub fn load(environment: Environment) -> Result<Self, ConfigError> {
        let settings: Settings = Config::builder()
            .add_source(Config::try_from(&Settings::default())?)
            .add_source(File::with_name(&environment.settings_file()).required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.prompt.max_input_chars == 0 {
            return Err(ConfigError::Message(
                "prompt.max_input_chars must be greater than zero".to_string(),
            ));
        }
        if self.llm.timeout_seconds == 0 {
            return Err(ConfigError::Message(
                "llm.timeout_seconds must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.server.max_upload_mb * 1024 * 1024
    }
}
