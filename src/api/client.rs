use reqwest::Client as HttpClient;
use serde_json::Value;

use crate::api::error::ApiError;
use crate::api::models::{Contact, ContactPayload};

pub struct ApiClient {
    pub http: HttpClient,
}

impl ApiClient {
    pub fn new() -> Self {
        Self {
            http: HttpClient::new(),
        }
    }

    fn collection(base_url: &str) -> String {
        format!("{}/api/persons", base_url.trim_end_matches('/'))
    }

    fn item(base_url: &str, id: &str) -> String {
        format!("{}/{}", Self::collection(base_url), id)
    }

    /// Turns a non-success response into an `ApiError`, reading the body for
    /// a server-supplied `error` message first.
    async fn check(resp: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let body = resp.json::<Value>().await.ok();
        Err(ApiError::from_response(status.as_u16(), body.as_ref()))
    }

    /// Fetch the full contact collection.
    pub async fn list(&self, base_url: &str) -> Result<Vec<Contact>, ApiError> {
        let resp = self.http.get(Self::collection(base_url)).send().await?;
        Ok(Self::check(resp).await?.json::<Vec<Contact>>().await?)
    }

    /// Create a contact; the server assigns and returns the id.
    pub async fn create(
        &self,
        base_url: &str,
        payload: &ContactPayload,
    ) -> Result<Contact, ApiError> {
        let resp = self
            .http
            .post(Self::collection(base_url))
            .json(payload)
            .send()
            .await?;
        Ok(Self::check(resp).await?.json::<Contact>().await?)
    }

    /// Replace the contact stored under `id` with the payload.
    pub async fn update(
        &self,
        base_url: &str,
        id: &str,
        payload: &ContactPayload,
    ) -> Result<Contact, ApiError> {
        let resp = self
            .http
            .put(Self::item(base_url, id))
            .json(payload)
            .send()
            .await?;
        Ok(Self::check(resp).await?.json::<Contact>().await?)
    }

    pub async fn remove(&self, base_url: &str, id: &str) -> Result<(), ApiError> {
        let resp = self.http.delete(Self::item(base_url, id)).send().await?;
        Self::check(resp).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::ApiClient;

    #[test]
    fn collection_url_tolerates_trailing_slash() {
        assert_eq!(
            ApiClient::collection("http://localhost:3001/"),
            "http://localhost:3001/api/persons"
        );
        assert_eq!(
            ApiClient::collection("http://localhost:3001"),
            "http://localhost:3001/api/persons"
        );
    }

    #[test]
    fn item_url_appends_the_id() {
        assert_eq!(
            ApiClient::item("http://localhost:3001", "42"),
            "http://localhost:3001/api/persons/42"
        );
    }
}
