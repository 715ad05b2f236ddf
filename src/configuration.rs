use std::sync::Arc;

use anyhow::Context;
use lettre::transport::smtp::authentication::Credentials;
use reqwest::Url;
use secrecy::{ExposeSecret, Secret};
use serde_aux::field_attributes::deserialize_number_from_string;

use crate::delivery::{DeliveryChannel, PostmarkClient, SmtpRelay, Web3FormsClient};
use crate::domain::{ContactEmail, ValidationError};

#[derive(serde::Deserialize, Clone)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub delivery: DeliverySettings,
}

#[derive(serde::Deserialize, Clone)]
pub struct ApplicationSettings {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
    pub host: String,
    /// Shown to submitters whenever delivery fails.
    pub fallback_contact: String,
}

#[derive(serde::Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryBackend {
    Web3forms,
    Postmark,
    Smtp,
}

/// Which provider relays contact messages, plus the settings of every provider that may be
/// selected. Only the section matching `backend` has to be present.
#[derive(serde::Deserialize, Clone)]
pub struct DeliverySettings {
    pub backend: DeliveryBackend,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub timeout_milliseconds: u64,
    pub web3forms: Option<Web3FormsSettings>,
    pub postmark: Option<PostmarkSettings>,
    pub smtp: Option<SmtpSettings>,
}

#[derive(serde::Deserialize, Clone)]
pub struct Web3FormsSettings {
    pub base_url: String,
    pub access_key: Secret<String>,
}

#[derive(serde::Deserialize, Clone)]
pub struct PostmarkSettings {
    pub base_url: String,
    pub sender_email: String,
    pub recipient_email: String,
    pub authorization_token: Secret<String>,
}

#[derive(serde::Deserialize, Clone)]
pub struct SmtpSettings {
    pub host: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<Secret<String>>,
    pub sender_email: String,
    pub recipient_email: String,
}

impl DeliverySettings {
    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.timeout_milliseconds)
    }

    /// Builds the channel for the selected backend.
    pub fn channel(&self) -> Result<Arc<dyn DeliveryChannel>, anyhow::Error> {
        let channel: Arc<dyn DeliveryChannel> = match self.backend {
            DeliveryBackend::Web3forms => {
                let settings = self
                    .web3forms
                    .as_ref()
                    .context("The web3forms backend is selected but not configured")?;
                Arc::new(Web3FormsClient::new(
                    settings.base_url()?,
                    settings.access_key.clone(),
                    self.timeout(),
                )?)
            }
            DeliveryBackend::Postmark => {
                let settings = self
                    .postmark
                    .as_ref()
                    .context("The postmark backend is selected but not configured")?;
                Arc::new(PostmarkClient::new(
                    settings.base_url()?,
                    settings.sender().context("Invalid Postmark sender email")?,
                    settings
                        .recipient()
                        .context("Invalid Postmark recipient email")?,
                    settings.authorization_token.clone(),
                    self.timeout(),
                )?)
            }
            DeliveryBackend::Smtp => {
                let settings = self
                    .smtp
                    .as_ref()
                    .context("The smtp backend is selected but not configured")?;
                Arc::new(SmtpRelay::new(
                    &settings.host,
                    settings.port,
                    settings.credentials(),
                    &settings.sender().context("Invalid SMTP sender email")?,
                    &settings.recipient().context("Invalid SMTP recipient email")?,
                    self.timeout(),
                )?)
            }
        };
        Ok(channel)
    }
}

impl Web3FormsSettings {
    pub fn base_url(&self) -> Result<Url, anyhow::Error> {
        Url::parse(&self.base_url).context("Invalid Web3Forms base url")
    }
}

impl PostmarkSettings {
    pub fn base_url(&self) -> Result<Url, anyhow::Error> {
        Url::parse(&self.base_url).context("Invalid Postmark base url")
    }

    pub fn sender(&self) -> Result<ContactEmail, ValidationError> {
        ContactEmail::parse(self.sender_email.clone())
    }

    pub fn recipient(&self) -> Result<ContactEmail, ValidationError> {
        ContactEmail::parse(self.recipient_email.clone())
    }
}

impl SmtpSettings {
    pub fn sender(&self) -> Result<ContactEmail, ValidationError> {
        ContactEmail::parse(self.sender_email.clone())
    }

    pub fn recipient(&self) -> Result<ContactEmail, ValidationError> {
        ContactEmail::parse(self.recipient_email.clone())
    }

    /// `None` unless both username and password are set.
    pub fn credentials(&self) -> Option<Credentials> {
        match (&self.username, &self.password) {
            (Some(username), Some(password)) => Some(Credentials::new(
                username.clone(),
                password.expose_secret().clone(),
            )),
            _ => None,
        }
    }
}

/// Reads `configuration/base.yaml`, then the file for `APP_ENVIRONMENT`, then `APP_`-prefixed
/// environment variables (`APP_DELIVERY__WEB3FORMS__ACCESS_KEY`, ...).
pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    let base_path =
        std::env::current_dir().map_err(|e| config::ConfigError::Foreign(Box::new(e)))?;
    let configuration_directory = base_path.join("configuration");

    let environment: Environment = std::env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .map_err(config::ConfigError::Message)?;
    let environment_filename = format!("{}.yaml", environment.as_str());

    let settings = config::Config::builder()
        .add_source(config::File::from(
            configuration_directory.join("base.yaml"),
        ))
        .add_source(config::File::from(
            configuration_directory.join(environment_filename),
        ))
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    settings.try_deserialize::<Settings>()
}

pub enum Environment {
    Local,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Production => "production",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            other => Err(format!(
                "{} is not a supported environment. Use either `local` or `production`.",
                other
            )),
        }
    }
}
