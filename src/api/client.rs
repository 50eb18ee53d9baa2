//! Typed reqwest client for the users API.

use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;

use super::models::{NewUser, User, UserId, UserUpdate};

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("network error: {0}")]
    Network(String),

    #[error("request timed out")]
    Timeout,

    #[error("HTTP {status} from {url}: {message}")]
    Http {
        status: u16,
        url: String,
        message: String,
    },

    #[error("failed to decode response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            return ClientError::Timeout;
        }
        if err.is_decode() {
            return ClientError::Decode(err.to_string());
        }
        ClientError::Network(err.to_string())
    }
}

impl ClientError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
}

#[derive(Debug, Clone)]
pub struct UserClient {
    base_url: String,
    http: Client,
}

impl UserClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ClientError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(UserClient {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Non-2xx responses become `ClientError::Http` carrying the server's
    /// `message` when the body has one.
    async fn check(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let url = response.url().to_string();
        let message = response
            .json::<ErrorBody>()
            .await
            .map(|b| b.message)
            .unwrap_or_default();
        Err(ClientError::Http {
            status: status.as_u16(),
            url,
            message,
        })
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ClientError> {
        let response = Self::check(response).await?;
        Ok(response.json::<T>().await?)
    }

    /// `GET /` as loosely typed JSON.
    pub async fn index(&self) -> Result<serde_json::Value, ClientError> {
        Self::decode(self.http.get(self.url("/")).send().await?).await
    }

    pub async fn health(&self) -> Result<String, ClientError> {
        let response = Self::check(self.http.get(self.url("/api/health")).send().await?).await?;
        Ok(response.text().await?)
    }

    pub async fn list_users(&self) -> Result<Vec<User>, ClientError> {
        Self::decode(self.http.get(self.url("/api/users")).send().await?).await
    }

    pub async fn get_user(&self, id: UserId) -> Result<User, ClientError> {
        let url = self.url(&format!("/api/users/{}", id));
        Self::decode(self.http.get(url).send().await?).await
    }

    pub async fn create_user(&self, new: &NewUser) -> Result<User, ClientError> {
        let response = self.http.post(self.url("/api/users")).json(new).send().await?;
        Self::decode(response).await
    }

    pub async fn update_user(&self, id: UserId, update: &UserUpdate) -> Result<User, ClientError> {
        let url = self.url(&format!("/api/users/{}", id));
        Self::decode(self.http.put(url).json(update).send().await?).await
    }

    pub async fn delete_user(&self, id: UserId) -> Result<(), ClientError> {
        let url = self.url(&format!("/api/users/{}", id));
        Self::check(self.http.delete(url).send().await?).await?;
        Ok(())
    }
}
