use std::env;
use std::str::FromStr;

use super::Environment;

const DEFAULT_PERSONA: &str = "You are the AI support assistant of a web development studio. \
The studio specializes in React, TypeScript, Node.js and modern web technologies, and offers \
website development, web applications, e-commerce stores, custom systems and technical support. \
Answer helpfully, professionally and in a friendly tone about web development, technology, or \
any question related to the studio's services.";

const DEFAULT_FALLBACK_REPLY: &str =
    "Sorry, something went wrong while processing your message.";

#[derive(Debug, Clone)]
pub struct Settings {
    pub environment: Environment,
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    pub gemini: GeminiSettings,
    pub chat: ChatSettings,
}

#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone)]
pub struct GeminiSettings {
    pub api_key: String,
    pub model: String,
    /// Overridden in tests to point at a local mock server.
    pub base_url: Option<String>,
    pub temperature: f32,
    pub top_k: u32,
    pub top_p: f32,
    pub max_output_tokens: u32,
}

#[derive(Debug, Clone)]
pub struct ChatSettings {
    /// How many prior turns are included in a completion request.
    pub context_window: usize,
    /// Balance a credit account starts with on first access.
    pub default_credits: i64,
    pub persona: String,
    pub conversation_title: String,
    pub fallback_reply: String,
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("missing required environment variable: {0}")]
    MissingVar(&'static str),
    #[error("invalid value for {name}: {value}")]
    InvalidVar { name: &'static str, value: String },
}

impl Settings {
    /// Loads configuration from the process environment. Missing provider
    /// credentials or database coordinates fail fast here rather than on
    /// the first request.
    pub fn from_env() -> Result<Self, SettingsError> {
        Ok(Self {
            environment: Self::environment_from_env()?,
            server: ServerSettings {
                host: var_or("SERVER_HOST", "0.0.0.0"),
                port: parse_or("SERVER_PORT", 3000)?,
            },
            database: DatabaseSettings {
                url: required_var("DATABASE_URL")?,
                max_connections: parse_or("DATABASE_MAX_CONNECTIONS", 5)?,
            },
            gemini: GeminiSettings {
                api_key: required_var("GEMINI_API_KEY")?,
                model: var_or("GEMINI_MODEL", "gemini-1.5-flash"),
                base_url: env::var("GEMINI_BASE_URL").ok(),
                temperature: parse_or("GEMINI_TEMPERATURE", 0.7)?,
                top_k: parse_or("GEMINI_TOP_K", 40)?,
                top_p: parse_or("GEMINI_TOP_P", 0.95)?,
                max_output_tokens: parse_or("GEMINI_MAX_OUTPUT_TOKENS", 1000)?,
            },
            chat: ChatSettings {
                context_window: parse_or("CHAT_CONTEXT_WINDOW", 10)?,
                default_credits: parse_or("CHAT_DEFAULT_CREDITS", 5)?,
                persona: var_or("CHAT_PERSONA", DEFAULT_PERSONA),
                conversation_title: var_or("CHAT_CONVERSATION_TITLE", "AI Support"),
                fallback_reply: var_or("CHAT_FALLBACK_REPLY", DEFAULT_FALLBACK_REPLY),
            },
        })
    }

    fn environment_from_env() -> Result<Environment, SettingsError> {
        let raw = var_or("APP_ENV", "local");
        Environment::try_from(raw.clone()).map_err(|_| SettingsError::InvalidVar {
            name: "APP_ENV",
            value: raw,
        })
    }
}

fn required_var(name: &'static str) -> Result<String, SettingsError> {
    env::var(name).map_err(|_| SettingsError::MissingVar(name))
}

fn var_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

fn parse_or<T: FromStr + Copy>(name: &'static str, default: T) -> Result<T, SettingsError> {
    match env::var(name) {
        Ok(value) => value.parse().map_err(|_| SettingsError::InvalidVar {
            name,
            value,
        }),
        Err(_) => Ok(default),
    }
}
