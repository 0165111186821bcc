use actix_web::web::Bytes;
use async_trait::async_trait;

use crate::errors::AssetStoreError;

/// A response from the external asset store: opaque bytes plus the headers
/// worth forwarding to the client.
#[derive(Debug, Clone)]
pub struct StoredAsset {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Bytes,
}

impl StoredAsset {
    pub fn not_found() -> Self {
        StoredAsset {
            status: 404,
            headers: Vec::new(),
            body: Bytes::new(),
        }
    }

    pub fn content_type(&self) -> Option<&str> {
        self.headers
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case("content-type"))
            .map(|(_, value)| value.as_str())
    }

    pub fn set_content_type(&mut self, value: &str) {
        self.headers
            .retain(|(name, _)| !name.eq_ignore_ascii_case("content-type"));
        self.headers
            .push(("content-type".to_string(), value.to_string()));
    }
}

/// Opaque key-to-bytes lookup service holding the site's built assets.
#[async_trait]
pub trait AssetStore: Send + Sync {
    async fn fetch(&self, path: &str) -> Result<StoredAsset, AssetStoreError>;
}

pub struct HttpAssetStore {
    http: reqwest::Client,
    base_url: String,
}

impl HttpAssetStore {
    pub fn new(http: reqwest::Client, base_url: &str) -> Self {
        HttpAssetStore {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

/// Headers that describe the transfer rather than the asset; the gateway's
/// own response framing replaces them.
fn is_hop_by_hop(name: &str) -> bool {
    name.eq_ignore_ascii_case("connection")
        || name.eq_ignore_ascii_case("keep-alive")
        || name.eq_ignore_ascii_case("transfer-encoding")
        || name.eq_ignore_ascii_case("content-length")
}

#[async_trait]
impl AssetStore for HttpAssetStore {
    async fn fetch(&self, path: &str) -> Result<StoredAsset, AssetStoreError> {
        let url = format!("{}{}", self.base_url, path);
        let response = self.http.get(&url).send().await?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter(|(name, _)| !is_hop_by_hop(name.as_str()))
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = response.bytes().await?;

        Ok(StoredAsset {
            status,
            headers,
            body,
        })
    }
}
