use std::str::FromStr;

pub const DYNAMODB_ENDPOINT_ENV: &str = "SEED_DYNAMODB_ENDPOINT";
pub const LOG_FORMAT_ENV: &str = "SEED_LOG_FORMAT";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Json,
    Text,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "text" => Ok(Self::Text),
            other => Err(format!(
                "{LOG_FORMAT_ENV} must be 'json' or 'text', got '{other}'"
            )),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub dynamodb_endpoint: Option<String>,
    pub log_format: LogFormat,
}

impl RuntimeConfig {
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, String> {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let log_format = match read(LOG_FORMAT_ENV) {
            Some(value) => value.parse()?,
            None => LogFormat::default(),
        };

        Ok(Self {
            dynamodb_endpoint: read(DYNAMODB_ENDPOINT_ENV),
            log_format,
        })
    }
}
