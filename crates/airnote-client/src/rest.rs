//! REST implementation of the measurement store.
//!
//! Talks to a PostgREST-style backend: measurement rows live in a
//! `measurements` table reached under `/rest/v1`, photos live in an object
//! storage bucket reached under `/storage/v1`. Listing goes through
//! server-side procedures that pre-format the stored geographic point into
//! separate coordinate fields.
//!
//! # Example
//!
//! ```no_run
//! use airnote_client::{MeasurementStore, RestStore};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = RestStore::new("https://project.example.co", "anon-key")?;
//!
//! let measurements = store.list().await?;
//! println!("{} measurements recorded", measurements.len());
//! Ok(())
//! # }
//! ```

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder};
use serde::Serialize;
use serde_json::json;
use uuid::Uuid;

use airnote_types::Measurement;

use crate::error::{Error, Result};
use crate::store::MeasurementStore;

/// Default object storage bucket for measurement photos.
pub const DEFAULT_PHOTO_BUCKET: &str = "measurement-photos";

/// REST client for the measurement backend.
#[derive(Debug, Clone)]
pub struct RestStore {
    client: Client,
    base_url: String,
    api_key: String,
    bucket: String,
}

impl RestStore {
    /// Create a new store client.
    ///
    /// # Arguments
    ///
    /// * `base_url` - The base URL of the backend project
    ///   (e.g., "https://project.example.co")
    /// * `api_key` - API key sent as both `apikey` and bearer token
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidUrl`] when the URL does not use an http(s)
    /// scheme.
    pub fn new(base_url: &str, api_key: &str) -> Result<Self> {
        let base_url = Self::normalize_url(base_url)?;

        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .map_err(Error::Request)?;

        Ok(Self {
            client,
            base_url,
            api_key: api_key.to_string(),
            bucket: DEFAULT_PHOTO_BUCKET.to_string(),
        })
    }

    /// Create a store with a custom reqwest Client.
    pub fn with_client(base_url: &str, api_key: &str, client: Client) -> Result<Self> {
        let base_url = Self::normalize_url(base_url)?;

        Ok(Self {
            client,
            base_url,
            api_key: api_key.to_string(),
            bucket: DEFAULT_PHOTO_BUCKET.to_string(),
        })
    }

    /// Override the photo bucket name.
    #[must_use]
    pub fn with_bucket(mut self, bucket: impl Into<String>) -> Self {
        self.bucket = bucket.into();
        self
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn normalize_url(base_url: &str) -> Result<String> {
        // Normalize URL (remove trailing slash)
        let base_url = base_url.trim_end_matches('/').to_string();

        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(Error::InvalidUrl(format!(
                "URL must start with http:// or https://, got: {}",
                base_url
            )));
        }

        Ok(base_url)
    }

    // ======================================================================
    // Photo objects
    // ======================================================================

    /// Generate a fresh object key for an uploaded photo.
    fn new_photo_path() -> String {
        format!("public/{}.jpg", Uuid::new_v4())
    }

    /// Public URL under which an uploaded object is served.
    fn public_photo_url(&self, path: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.base_url, self.bucket, path
        )
    }

    /// Recover the object path from a public photo URL.
    ///
    /// Returns `None` when the URL does not point into this store's bucket.
    fn photo_object_path<'a>(&self, photo_url: &'a str) -> Option<&'a str> {
        let marker = format!("/storage/v1/object/public/{}/", self.bucket);
        photo_url
            .split_once(marker.as_str())
            .map(|(_, path)| path)
            .filter(|path| !path.is_empty())
    }

    /// Upload photo bytes under a fresh key and return the public URL.
    async fn upload_photo(&self, bytes: &[u8]) -> Result<String> {
        let path = Self::new_photo_path();
        let url = format!("{}/storage/v1/object/{}/{}", self.base_url, self.bucket, path);

        let response = self
            .request(Method::POST, &url)
            .header(reqwest::header::CONTENT_TYPE, "image/jpeg")
            .body(bytes.to_vec())
            .send()
            .await
            .map_err(|e| Error::NotReachable {
                url: url.clone(),
                source: e,
            })?;

        self.expect_success(response).await?;
        tracing::debug!(path = %path, "uploaded photo object");
        Ok(self.public_photo_url(&path))
    }

    /// Delete the object behind a public photo URL, tolerating failure.
    ///
    /// Failures here are logged and swallowed: a leftover object must never
    /// block the row operation that triggered the cleanup.
    async fn delete_photo_best_effort(&self, photo_url: &str) {
        let Some(path) = self.photo_object_path(photo_url) else {
            tracing::warn!(url = %photo_url, "photo URL does not match bucket, skipping delete");
            return;
        };

        let url = format!("{}/storage/v1/object/{}/{}", self.base_url, self.bucket, path);
        let outcome = async {
            let response = self.request(Method::DELETE, &url).send().await?;
            response.error_for_status().map(|_| ())
        }
        .await;

        match outcome {
            Ok(()) => tracing::debug!(path = %path, "deleted photo object"),
            Err(error) => {
                tracing::warn!(path = %path, %error, "failed to delete old photo object");
            }
        }
    }

    // ======================================================================
    // Internal HTTP helpers
    // ======================================================================

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        self.client
            .request(method, url)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    async fn rpc<T: serde::de::DeserializeOwned>(
        &self,
        procedure: &str,
        args: &serde_json::Value,
    ) -> Result<T> {
        let url = format!("{}/rest/v1/rpc/{}", self.base_url, procedure);
        let response = self
            .request(Method::POST, &url)
            .json(args)
            .send()
            .await
            .map_err(|e| Error::NotReachable {
                url: url.clone(),
                source: e,
            })?;

        self.handle_response(response).await
    }

    async fn write_row<B: Serialize>(&self, method: Method, url: &str, body: &B) -> Result<()> {
        let response = self
            .request(method, url)
            .header("Prefer", "return=minimal")
            .json(body)
            .send()
            .await
            .map_err(|e| Error::NotReachable {
                url: url.to_string(),
                source: e,
            })?;

        self.expect_success(response).await
    }

    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T> {
        let status = response.status();
        if status.is_success() {
            response.json().await.map_err(Error::Request)
        } else {
            Err(Self::api_error(status, response).await)
        }
    }

    async fn expect_success(&self, response: reqwest::Response) -> Result<()> {
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(Self::api_error(status, response).await)
        }
    }

    async fn api_error(status: reqwest::StatusCode, response: reqwest::Response) -> Error {
        let message = response
            .json::<serde_json::Value>()
            .await
            .ok()
            .and_then(|v| {
                v.get("message")
                    .or_else(|| v.get("error"))
                    .and_then(|m| m.as_str())
                    .map(String::from)
            })
            .unwrap_or_else(|| status.to_string());

        Error::Api {
            status: status.as_u16(),
            message,
        }
    }
}

#[async_trait]
impl MeasurementStore for RestStore {
    async fn list(&self) -> Result<Vec<Measurement>> {
        self.rpc("list_measurements", &json!({})).await
    }

    async fn get(&self, id: &str) -> Result<Option<Measurement>> {
        let rows: Vec<Measurement> = self.rpc("measurement_by_id", &json!({ "p_id": id })).await?;
        Ok(rows.into_iter().next())
    }

    async fn insert(&self, measurement: &Measurement, photo: Option<&[u8]>) -> Result<()> {
        let mut row = measurement.clone();
        if let Some(bytes) = photo {
            row.photo_url = Some(self.upload_photo(bytes).await?);
        }

        let url = format!("{}/rest/v1/measurements", self.base_url);
        self.write_row(Method::POST, &url, &row).await
    }

    async fn update(&self, measurement: &Measurement, photo: Option<&[u8]>) -> Result<()> {
        let id = measurement.id.as_deref().ok_or(Error::MissingId)?;

        let mut row = measurement.clone();
        if let Some(bytes) = photo {
            // The stored row is the source of truth for the photo being
            // replaced; the caller may already have dropped its reference.
            match self.get(id).await {
                Ok(Some(current)) => {
                    if let Some(old_url) = current.photo_url {
                        self.delete_photo_best_effort(&old_url).await;
                    }
                }
                Ok(None) => {}
                Err(error) => {
                    tracing::warn!(%id, %error, "could not resolve old photo before replacement");
                }
            }

            row.photo_url = Some(self.upload_photo(bytes).await?);
        }

        let url = format!("{}/rest/v1/measurements?id=eq.{}", self.base_url, id);
        self.write_row(Method::PATCH, &url, &row).await
    }

    async fn delete(&self, id: &str) -> Result<()> {
        // Resolve the photo reference before the row disappears.
        match self.get(id).await {
            Ok(Some(measurement)) => {
                if let Some(photo_url) = measurement.photo_url {
                    self.delete_photo_best_effort(&photo_url).await;
                }
            }
            Ok(None) => {}
            Err(error) => {
                tracing::warn!(%id, %error, "could not resolve photo before delete");
            }
        }

        let url = format!("{}/rest/v1/measurements?id=eq.{}", self.base_url, id);
        let response = self
            .request(Method::DELETE, &url)
            .send()
            .await
            .map_err(|e| Error::NotReachable {
                url: url.clone(),
                source: e,
            })?;

        self.expect_success(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_creation() {
        let store = RestStore::new("https://project.example.co", "key");
        assert!(store.is_ok());

        let store = store.unwrap();
        assert_eq!(store.base_url(), "https://project.example.co");
    }

    #[test]
    fn test_store_normalizes_url() {
        let store = RestStore::new("https://project.example.co/", "key").unwrap();
        assert_eq!(store.base_url(), "https://project.example.co");
    }

    #[test]
    fn test_store_rejects_invalid_url() {
        let result = RestStore::new("project.example.co", "key");
        assert!(matches!(result, Err(Error::InvalidUrl(_))));
    }

    #[test]
    fn test_new_photo_path_is_unique_jpg() {
        let a = RestStore::new_photo_path();
        let b = RestStore::new_photo_path();

        assert!(a.starts_with("public/"));
        assert!(a.ends_with(".jpg"));
        assert_ne!(a, b);
    }

    #[test]
    fn test_photo_object_path_round_trip() {
        let store = RestStore::new("https://project.example.co", "key").unwrap();

        let url = store.public_photo_url("public/abc.jpg");
        assert_eq!(
            url,
            "https://project.example.co/storage/v1/object/public/measurement-photos/public/abc.jpg"
        );
        assert_eq!(store.photo_object_path(&url), Some("public/abc.jpg"));
    }

    #[test]
    fn test_photo_object_path_rejects_foreign_urls() {
        let store = RestStore::new("https://project.example.co", "key").unwrap();

        assert_eq!(store.photo_object_path("https://elsewhere.example/pic.jpg"), None);

        let other_bucket = "https://project.example.co/storage/v1/object/public/avatars/x.jpg";
        assert_eq!(store.photo_object_path(other_bucket), None);
    }

    #[test]
    fn test_with_bucket_changes_urls() {
        let store = RestStore::new("https://project.example.co", "key")
            .unwrap()
            .with_bucket("field-photos");

        let url = store.public_photo_url("public/abc.jpg");
        assert!(url.contains("/field-photos/"));
        assert_eq!(store.photo_object_path(&url), Some("public/abc.jpg"));
    }
}
