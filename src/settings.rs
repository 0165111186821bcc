use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use dotenv::dotenv;
use std::{env, fmt, str::FromStr};

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum AppEnvironment {
    Development,
    Production,
    Testing,
}

impl FromStr for AppEnvironment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" => Ok(AppEnvironment::Development),
            "production" => Ok(AppEnvironment::Production),
            "testing" => Ok(AppEnvironment::Testing),
            _ => Err(ConfigError::Message(format!("Invalid environment: {}", s))),
        }
    }
}

#[derive(Deserialize, Clone)]
#[serde(rename_all = "snake_case")]
pub struct AppConfig {
    #[serde(default = "default_env")]
    pub env: AppEnvironment,

    #[serde(default = "default_name")]
    pub name: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_worker_count")]
    pub worker_count: usize,

    /// Base URL of the external asset store the gateway proxies.
    #[serde(default)]
    pub asset_store_url: String,

    #[serde(default)]
    pub resend_api_key: String,

    #[serde(default = "default_resend_api_url")]
    pub resend_api_url: String,

    #[serde(default = "default_contact_email")]
    pub contact_email: String,

    #[serde(default = "default_from_email")]
    pub from_email: String,

    /// Rate limiting is disabled entirely when no Redis URL is configured.
    #[serde(default)]
    pub redis_url: Option<String>,

    #[serde(default)]
    pub rate_limit_bypass_secret: Option<String>,

    #[serde(default)]
    pub email_bypass_secret: Option<String>,
}

fn default_env() -> AppEnvironment {
    AppEnvironment::Development
}
fn default_name() -> String {
    "Lornu-Web-Gateway".to_string()
}
fn default_port() -> u16 {
    8080
}
fn default_host() -> String {
    "127.0.0.1".to_string()
}
fn default_worker_count() -> usize {
    num_cpus::get()
}
fn default_resend_api_url() -> String {
    "https://api.resend.com/emails".to_string()
}
fn default_contact_email() -> String {
    "contact@lornu.ai".to_string()
}
fn default_from_email() -> String {
    "LornuAI Contact Form <noreply@lornu.ai>".to_string()
}

impl AppConfig {
    pub fn new() -> Result<Self, ConfigError> {
        dotenv().ok();

        let raw_env = env::var("APP_ENV").unwrap_or_else(|_| "development".into());
        let env_name = AppEnvironment::from_str(&raw_env)
            .map_err(|_| ConfigError::Message(format!("Invalid APP_ENV value: {}", raw_env)))?;

        let builder = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env_name.to_string().to_lowercase())).required(false))
            .add_source(Environment::with_prefix("APP").separator("_").ignore_empty(true));

        let mut config: Self = builder.build()?.try_deserialize()?;

        config.env = env_name;

        // Inject critical env values if missing
        config.asset_store_url = fill_or_env(config.asset_store_url, "APP_ASSET_STORE_URL")?;
        config.resend_api_key = fill_or_env(config.resend_api_key, "APP_RESEND_API_KEY")?;

        if config.redis_url.is_none() {
            config.redis_url = env::var("APP_REDIS_URL").ok();
        }
        if config.rate_limit_bypass_secret.is_none() {
            config.rate_limit_bypass_secret = env::var("APP_RATE_LIMIT_BYPASS_SECRET").ok();
        }
        if config.email_bypass_secret.is_none() {
            config.email_bypass_secret = env::var("APP_EMAIL_BYPASS_SECRET").ok();
        }

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if self.asset_store_url.trim().is_empty() {
            errors.push("ASSET_STORE_URL cannot be empty");
        }
        if self.resend_api_key.trim().is_empty() {
            errors.push("RESEND_API_KEY cannot be empty");
        }
        if self.contact_email.trim().is_empty() {
            errors.push("CONTACT_EMAIL cannot be empty");
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Message(errors.join(", ")))
        }
    }

    pub fn is_production(&self) -> bool {
        self.env == AppEnvironment::Production
    }
}

fn fill_or_env(current: String, env_key: &str) -> Result<String, ConfigError> {
    if current.trim().is_empty() {
        env::var(env_key).map_err(|_| ConfigError::Message(format!("{env_key} must be set")))
    } else {
        Ok(current)
    }
}

impl fmt::Display for AppEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AppEnvironment::Development => "development",
            AppEnvironment::Production => "production",
            AppEnvironment::Testing => "testing",
        };
        write!(f, "{s}")
    }
}

trait Redact {
    fn redact(&self) -> &str;
}

impl Redact for str {
    fn redact(&self) -> &str {
        if self.is_empty() {
            "[MISSING]"
        } else {
            "[REDACTED]"
        }
    }
}

impl Redact for Option<String> {
    fn redact(&self) -> &str {
        match self {
            Some(s) if !s.is_empty() => "[REDACTED]",
            _ => "[NOT_SET]",
        }
    }
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("name", &self.name)
            .field("port", &self.port)
            .field("host", &self.host)
            .field("worker_count", &self.worker_count)
            .field("asset_store_url", &self.asset_store_url)
            .field("resend_api_key", &self.resend_api_key.redact())
            .field("resend_api_url", &self.resend_api_url)
            .field("contact_email", &self.contact_email)
            .field("from_email", &self.from_email)
            .field("redis_url", &self.redis_url.as_deref().map(|_| "[REDACTED]"))
            .field("rate_limit_bypass_secret", &self.rate_limit_bypass_secret.redact())
            .field("email_bypass_secret", &self.email_bypass_secret.redact())
            .finish()
    }
}
