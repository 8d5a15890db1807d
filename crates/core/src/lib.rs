pub mod domain;
pub mod weather;

pub mod config {
    use anyhow::Context;

    #[derive(Debug, Clone)]
    pub struct Settings {
        pub openweather_api_key: Option<String>,
        pub openweather_base_url: Option<String>,
        pub sentry_dsn: Option<String>,
    }

    impl Settings {
        pub fn from_env() -> anyhow::Result<Self> {
            Ok(Self {
                openweather_api_key: std::env::var("OPENWEATHER_API_KEY").ok(),
                openweather_base_url: std::env::var("OPENWEATHER_BASE_URL").ok(),
                sentry_dsn: std::env::var("SENTRY_DSN").ok(),
            })
        }

        pub fn require_openweather_api_key(&self) -> anyhow::Result<&str> {
            self.openweather_api_key
                .as_deref()
                .context("OPENWEATHER_API_KEY is required")
        }
    }
}
