use std::path::PathBuf;

use serde::Deserialize;

use crate::prelude::*;

#[derive(Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub web: WebConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

pub trait Mergeable {
    fn merge(&self, other: &Self) -> Self;
}

impl Config {
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, human_errors::Error> {
        let path = path.into();
        let contents = std::fs::read_to_string(&path).wrap_err_as_user(
            format!("We could not read your config file '{}'.", path.display()),
            &[
                "Ensure the file exists and is readable.",
                "Check that you have the necessary permissions to read the file.",
            ],
        )?;
        Self::parse(&contents)
    }

    /// Loads the config file when present, then applies any environment overrides.
    pub fn load_or_default(path: impl Into<PathBuf>) -> Result<Self, human_errors::Error> {
        let path = path.into();
        let config = if path.exists() {
            Self::load(path)?
        } else {
            debug!("No config file found at '{}', using defaults.", path.display());
            Config::default()
        };

        Ok(config.merge(&Config::from_env()))
    }

    pub fn parse(contents: &str) -> Result<Self, human_errors::Error> {
        toml::from_str(contents).wrap_err_as_user(
            "Your configuration file could not be loaded.",
            &[
                "Ensure that the file is valid TOML.",
                "Make sure that you are using the correct configuration file format.",
            ],
        )
    }

    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        Config {
            api: ApiConfig {
                base_url: var("MEDIA_ADMIN_API_URL"),
                notifications_url: var("MEDIA_ADMIN_NOTIFICATIONS_URL"),
            },
            web: WebConfig {
                address: var("MEDIA_ADMIN_ADDRESS"),
            },
            session: SessionConfig {
                token: var("MEDIA_ADMIN_TOKEN"),
            },
            telemetry: TelemetryConfig {
                otlp_endpoint: var("MEDIA_ADMIN_OTLP_ENDPOINT"),
            },
        }
    }
}

impl Mergeable for Config {
    fn merge(&self, other: &Self) -> Self {
        Config {
            api: self.api.merge(&other.api),
            web: self.web.merge(&other.web),
            session: self.session.merge(&other.session),
            telemetry: self.telemetry.merge(&other.telemetry),
        }
    }
}

#[derive(Clone, Deserialize, Default)]
pub struct ApiConfig {
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub notifications_url: Option<String>,
}

impl ApiConfig {
    pub fn base_url(&self) -> Result<String, human_errors::Error> {
        self.base_url
            .as_deref()
            .map(|url| url.trim_end_matches('/').to_string())
            .ok_or_else(|| {
                human_errors::user(
                    "You have not configured the address of the backend API.",
                    &[
                        "Set 'api.base_url' in your config file (e.g. `https://api.example.com`).",
                        "Alternatively, set the MEDIA_ADMIN_API_URL environment variable.",
                    ],
                )
            })
    }

    /// The notifications service lives on its own host, falling back to the main API.
    pub fn notifications_url(&self) -> Result<String, human_errors::Error> {
        match self.notifications_url.as_deref() {
            Some(url) => Ok(url.trim_end_matches('/').to_string()),
            None => self.base_url(),
        }
    }
}

impl Mergeable for ApiConfig {
    fn merge(&self, other: &Self) -> Self {
        ApiConfig {
            base_url: other.base_url.clone().or_else(|| self.base_url.clone()),
            notifications_url: other
                .notifications_url
                .clone()
                .or_else(|| self.notifications_url.clone()),
        }
    }
}

#[derive(Clone, Deserialize, Default)]
pub struct WebConfig {
    #[serde(default)]
    pub address: Option<String>,
}

impl WebConfig {
    pub fn address(&self) -> &str {
        self.address.as_deref().unwrap_or("127.0.0.1:8080")
    }
}

impl Mergeable for WebConfig {
    fn merge(&self, other: &Self) -> Self {
        WebConfig {
            address: other.address.clone().or_else(|| self.address.clone()),
        }
    }
}

#[derive(Clone, Deserialize, Default)]
pub struct SessionConfig {
    /// Bearer token used by the command line; the web dashboard reads it from a cookie.
    #[serde(default)]
    pub token: Option<String>,
}

impl Mergeable for SessionConfig {
    fn merge(&self, other: &Self) -> Self {
        SessionConfig {
            token: other.token.clone().or_else(|| self.token.clone()),
        }
    }
}

#[derive(Clone, Deserialize, Default)]
pub struct TelemetryConfig {
    #[serde(default)]
    pub otlp_endpoint: Option<String>,
}

impl Mergeable for TelemetryConfig {
    fn merge(&self, other: &Self) -> Self {
        TelemetryConfig {
            otlp_endpoint: other
                .otlp_endpoint
                .clone()
                .or_else(|| self.otlp_endpoint.clone()),
        }
    }
}
