use tracing::warn;

#[derive(Debug, Clone)]
pub struct Config {
    /// Port for the application to run on
    pub port: usize,
    /// How often the send reminders job should run
    pub send_reminders_interval_secs: u64,
    /// Settings for the external push gateway
    pub expo: ExpoConfig,
}

#[derive(Debug, Clone)]
pub struct ExpoConfig {
    /// Base url of the Expo push service. Overridable so that tests can
    /// point the client at a local stub server.
    pub base_url: String,
    /// Optional Expo access token, sent as a bearer credential
    pub access_token: Option<String>,
    /// Maximum number of messages the push service accepts per request.
    /// This is the provider's documented limit, not something this
    /// application decides.
    pub chunk_size: usize,
    /// Upper bound in millis for one push gateway request
    pub request_timeout_millis: u64,
}

fn parse_env_var<T: std::str::FromStr + std::fmt::Display>(name: &str, default: T) -> T {
    match std::env::var(name) {
        Ok(value) => match value.parse::<T>() {
            Ok(value) => value,
            Err(_) => {
                warn!(
                    "The given {}: {} is not valid, falling back to the default: {}.",
                    name, value, default
                );
                default
            }
        },
        Err(_) => default,
    }
}

impl Config {
    pub fn new() -> Self {
        let expo = ExpoConfig {
            base_url: std::env::var("EXPO_PUSH_URL")
                .unwrap_or_else(|_| "https://exp.host".to_string()),
            access_token: std::env::var("EXPO_ACCESS_TOKEN").ok(),
            chunk_size: parse_env_var("EXPO_CHUNK_SIZE", 100),
            request_timeout_millis: parse_env_var("EXPO_REQUEST_TIMEOUT_MILLIS", 30_000),
        };

        Self {
            port: parse_env_var("PORT", 5000),
            send_reminders_interval_secs: parse_env_var("SEND_REMINDERS_INTERVAL_SECS", 60),
            expo,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
