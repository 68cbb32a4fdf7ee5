use std::sync::Arc;

use crate::api::ApiClient;
use crate::config::Config;

pub trait Services {
    fn api(&self) -> Arc<ApiClient>;

    fn config(&self) -> Arc<Config>;
}

#[derive(Clone)]
pub struct ServicesContainer {
    pub api: Arc<ApiClient>,
    pub config: Arc<Config>,
}

impl ServicesContainer {
    pub fn new(config: Config) -> Result<Self, human_errors::Error> {
        let api = ApiClient::new(&config.api)?;
        Ok(Self {
            api: Arc::new(api),
            config: Arc::new(config),
        })
    }
}

#[cfg(test)]
impl ServicesContainer {
    pub fn new_mock(api_url: impl ToString) -> Self {
        let config = Config {
            api: crate::config::ApiConfig {
                base_url: Some(api_url.to_string()),
                notifications_url: None,
            },
            ..Default::default()
        };

        Self::new(config).unwrap_or_else(|e| panic!("Failed to build mock services: {e}"))
    }
}

impl Services for ServicesContainer {
    fn api(&self) -> Arc<ApiClient> {
        self.api.clone()
    }

    fn config(&self) -> Arc<Config> {
        self.config.clone()
    }
}
