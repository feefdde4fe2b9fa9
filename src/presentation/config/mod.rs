mod environment;
mod settings;

pub use environment::Environment;
pub use settings::{
    ChatSettings, DatabaseSettings, GeminiSettings, ServerSettings, Settings, SettingsError,
};
