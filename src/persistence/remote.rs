//! Async client for the remote key-value store
//!
//! The store exposes one resource, `{base}/state`: `GET` returns the full
//! blob and `PATCH` merges the given fields into it. The client is used to
//! mirror saves and never feeds back into a running session.

use reqwest::{Client, StatusCode};
use serde_json::Value;

use super::SaveBlob;
use crate::auth::SessionToken;
use crate::core::error::{ChronosError, Result};

pub struct RemoteStore {
    client: Client,
    state_url: String,
    token: Option<SessionToken>,
}

impl RemoteStore {
    pub fn new(base_url: &str, token: Option<SessionToken>) -> Self {
        Self {
            client: Client::new(),
            state_url: format!("{}/state", base_url.trim_end_matches('/')),
            token,
        }
    }

    /// Create a client from environment variables
    ///
    /// Required: CHRONOS_REMOTE_URL
    pub fn from_env(token: Option<SessionToken>) -> Result<Self> {
        let base = std::env::var("CHRONOS_REMOTE_URL")
            .map_err(|_| ChronosError::RemoteStore("CHRONOS_REMOTE_URL not set".into()))?;
        Ok(Self::new(&base, token))
    }

    pub fn state_url(&self) -> &str {
        &self.state_url
    }

    /// Fetch the full stored blob; `None` if the store has none yet
    pub async fn fetch_state(&self) -> Result<Option<SaveBlob>> {
        let response = self
            .authorize(self.client.get(&self.state_url))
            .send()
            .await
            .map_err(|e| ChronosError::RemoteStore(e.to_string()))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(ChronosError::RemoteStore(format!("fetch failed: {}", error_text)));
        }

        let raw = response
            .text()
            .await
            .map_err(|e| ChronosError::RemoteStore(e.to_string()))?;
        SaveBlob::from_json(&raw).map(Some)
    }

    /// Merge `fields` into the stored blob
    pub async fn merge_state(&self, fields: &Value) -> Result<()> {
        if !fields.is_object() {
            return Err(ChronosError::RemoteStore(
                "merge payload must be a JSON object".into(),
            ));
        }

        let response = self
            .authorize(self.client.patch(&self.state_url))
            .json(fields)
            .send()
            .await
            .map_err(|e| ChronosError::RemoteStore(e.to_string()))?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(ChronosError::RemoteStore(format!("merge failed: {}", error_text)));
        }
        Ok(())
    }

    /// Mirror a whole blob
    pub async fn push(&self, blob: &SaveBlob) -> Result<()> {
        self.merge_state(&serde_json::to_value(blob)?).await
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_url_joins_cleanly() {
        assert_eq!(
            RemoteStore::new("http://localhost:3000/", None).state_url(),
            "http://localhost:3000/state"
        );
        assert_eq!(
            RemoteStore::new("http://localhost:3000", None).state_url(),
            "http://localhost:3000/state"
        );
    }

    #[tokio::test]
    async fn test_merge_rejects_non_object() {
        let store = RemoteStore::new("http://localhost:9", None);
        let result = store.merge_state(&Value::from(3)).await;
        assert!(matches!(result, Err(ChronosError::RemoteStore(_))));
    }
}
