//! Secrets and delivery settings sourced from the environment
//!
//! A `.env` file in the working directory is loaded first when present; real
//! environment variables take precedence over it.

use crate::ConfigError;

/// SMTP relay settings
#[derive(Clone)]
pub struct SmtpSettings {
    pub server: String,
    pub port: u16,
    /// Sender identity; also used as the login user name
    pub sender: String,
    pub password: String,
}

impl std::fmt::Debug for SmtpSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpSettings")
            .field("server", &self.server)
            .field("port", &self.port)
            .field("sender", &self.sender)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl SmtpSettings {
    /// Reads `SMTP_SERVER`, `SMTP_PORT`, `EMAIL_SENDER` and `EMAIL_PASSWORD`
    pub fn from_env() -> Result<Self, ConfigError> {
        load_dotenv();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the settings from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&'static str) -> Option<String>,
    {
        let server = required(&lookup, "SMTP_SERVER")?;
        let port_raw = required(&lookup, "SMTP_PORT")?;
        let port = port_raw
            .trim()
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidEnv {
                name: "SMTP_PORT",
                value: port_raw.clone(),
            })?;

        Ok(Self {
            server,
            port,
            sender: required(&lookup, "EMAIL_SENDER")?,
            password: required(&lookup, "EMAIL_PASSWORD")?,
        })
    }
}

/// Completion endpoint credentials
#[derive(Clone)]
pub struct CompletionSettings {
    pub api_key: String,
}

impl std::fmt::Debug for CompletionSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompletionSettings")
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl CompletionSettings {
    /// Reads `MISTRAL_API_KEY`
    pub fn from_env() -> Result<Self, ConfigError> {
        load_dotenv();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&'static str) -> Option<String>,
    {
        Ok(Self {
            api_key: required(&lookup, "MISTRAL_API_KEY")?,
        })
    }
}

fn load_dotenv() {
    if let Ok(path) = dotenvy::dotenv() {
        tracing::debug!("Loaded environment from {}", path.display());
    }
}

fn required<F>(lookup: &F, name: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&'static str) -> Option<String>,
{
    lookup(name)
        .filter(|value| !value.trim().is_empty())
        .ok_or(ConfigError::MissingEnv(name))
}
