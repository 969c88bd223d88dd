mod environment;
mod scaffold_config;
mod settings;

pub use environment::{ENVIRONMENT_VAR, Environment};
pub use scaffold_config::ScaffoldConfig;
pub use settings::{
    CorsSettings, LlmSettings, LoggingSettings, PromptSettings, ServerSettings, Settings,
};
