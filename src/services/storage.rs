//! Object storage client for model images.
//!
//! Uploads go to a bucket under a collision-resistant path; what the rest
//! of the system keeps is the resulting public URL.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
    config::StorageConfig,
    error::{AppError, AppResult},
};

#[derive(Clone)]
pub struct StorageService {
    config: StorageConfig,
    client: reqwest::Client,
}

impl StorageService {
    pub fn new(config: StorageConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    /// Upload image bytes and return the public URL to persist
    pub async fn upload_image(
        &self,
        filename: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> AppResult<String> {
        let path = object_path(filename, Utc::now());
        let url = format!(
            "{}/object/{}/{}",
            self.config.endpoint.trim_end_matches('/'),
            self.config.bucket,
            path
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .header("content-type", content_type)
            // Overwrite-on-conflict: re-uploading the same path replaces it
            .header("x-upsert", "true")
            .body(bytes)
            .send()
            .await
            .map_err(|e| AppError::Storage(format!("Upload failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::Storage(format!(
                "Upload rejected with status {}",
                response.status()
            )));
        }

        Ok(self.public_url(&path))
    }

    /// Resolve a stored object path to its public URL
    pub fn public_url(&self, path: &str) -> String {
        format!(
            "{}/{}/{}",
            self.config.public_base_url.trim_end_matches('/'),
            self.config.bucket,
            path
        )
    }
}

/// Build a collision-resistant object path: millisecond timestamp plus a
/// random suffix, keeping the original file extension.
fn object_path(original_filename: &str, at: DateTime<Utc>) -> String {
    let ext = original_filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()))
        .unwrap_or_else(|| "bin".to_string());

    format!(
        "models/{}-{}.{}",
        at.timestamp_millis(),
        Uuid::new_v4().simple(),
        ext
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn object_path_keeps_extension_and_is_unique() {
        let at = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        let a = object_path("moto.JPG", at);
        let b = object_path("moto.JPG", at);
        assert!(a.starts_with(&format!("models/{}-", at.timestamp_millis())));
        assert!(a.ends_with(".jpg"));
        assert_ne!(a, b);
    }

    #[test]
    fn object_path_falls_back_for_odd_filenames() {
        let at = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        assert!(object_path("noextension", at).ends_with(".bin"));
        assert!(object_path("weird.!!", at).ends_with(".bin"));
    }

    #[test]
    fn public_url_joins_base_bucket_and_path() {
        let service = StorageService::new(StorageConfig {
            endpoint: "http://storage.local/v1".to_string(),
            bucket: "models".to_string(),
            api_key: String::new(),
            public_base_url: "http://storage.local/v1/object/public/".to_string(),
        });
        assert_eq!(
            service.public_url("models/1-abc.jpg"),
            "http://storage.local/v1/object/public/models/models/1-abc.jpg"
        );
    }
}
