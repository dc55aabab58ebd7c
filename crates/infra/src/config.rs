use tracing::warn;

/// Runtime configuration, read from the environment once at startup
/// and passed around as plain data so tests can construct their own.
#[derive(Debug, Clone)]
pub struct Config {
    /// Port for the application to run on
    pub port: usize,
    /// Maximum number of due jobs one dispatcher run will pick up
    pub dispatch_batch_size: usize,
    /// Seconds between periodic dispatcher runs
    pub dispatch_interval_secs: u64,
    /// Total delivery attempts before a job is marked dead
    pub max_delivery_attempts: i64,
    /// First retry delay; doubles per attempt up to the max
    pub retry_base_delay_millis: i64,
    pub retry_max_delay_millis: i64,
    /// Upper bound on a single delivery provider call
    pub provider_timeout_secs: u64,
    /// Country code prefixed to national phone numbers, without `+`
    pub default_country_code: String,
    /// Base url for customer facing booking links (`${booking.url}`)
    pub portal_base_url: String,
    pub email_provider: ProviderConfig,
    pub sms_provider: ProviderConfig,
}

#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub url: String,
    pub api_key: String,
}

impl Config {
    pub fn new() -> Self {
        Self {
            port: parse_env("PORT", 5000),
            dispatch_batch_size: parse_env("DISPATCH_BATCH_SIZE", 100),
            dispatch_interval_secs: parse_env("DISPATCH_INTERVAL_SECS", 30),
            max_delivery_attempts: parse_env("MAX_DELIVERY_ATTEMPTS", 3),
            retry_base_delay_millis: parse_env("RETRY_BASE_DELAY_MILLIS", 60 * 1000),
            retry_max_delay_millis: parse_env("RETRY_MAX_DELAY_MILLIS", 60 * 60 * 1000),
            provider_timeout_secs: parse_env("PROVIDER_TIMEOUT_SECS", 10),
            default_country_code: std::env::var("DEFAULT_COUNTRY_CODE")
                .unwrap_or_else(|_| "1".into()),
            portal_base_url: std::env::var("PORTAL_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:5000".into()),
            email_provider: ProviderConfig {
                url: std::env::var("EMAIL_PROVIDER_URL")
                    .unwrap_or_else(|_| "http://localhost:5101/send".into()),
                api_key: std::env::var("EMAIL_PROVIDER_API_KEY").unwrap_or_default(),
            },
            sms_provider: ProviderConfig {
                url: std::env::var("SMS_PROVIDER_URL")
                    .unwrap_or_else(|_| "http://localhost:5102/send".into()),
                api_key: std::env::var("SMS_PROVIDER_API_KEY").unwrap_or_default(),
            },
        }
    }
}

fn parse_env<T: std::str::FromStr + std::fmt::Display>(key: &str, default: T) -> T {
    match std::env::var(key) {
        Ok(value) => match value.parse::<T>() {
            Ok(parsed) => parsed,
            Err(_) => {
                warn!(
                    "The given {}: {} is not valid, falling back to the default: {}.",
                    key, value, default
                );
                default
            }
        },
        Err(_) => default,
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
