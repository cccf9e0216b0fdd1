//! Theme store client over the Admin API.
//!
//! Each upload key becomes one `PUT themes/{id}/assets.json` call carrying
//! the file's current content. Calls within a batch run sequentially; the
//! client has no total timeout, so a hung remote stalls the batch (and with
//! it the gate's queue) rather than failing it.

use std::path::PathBuf;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;

use super::{SyncError, ThemeSync};
use crate::config::Config;
use crate::utils::path::upload_key_to_file;

pub struct ShopifyClient {
    http: reqwest::Client,
    endpoint: String,
    token: String,
    dist_root: PathBuf,
}

impl ShopifyClient {
    /// Build a client from config, resolving the Admin API token.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let token = config.store.resolve_token()?;
        let http = reqwest::Client::builder().build()?;

        Ok(Self {
            http,
            endpoint: config.store.assets_endpoint(),
            token,
            dist_root: config.dist_dir().to_path_buf(),
        })
    }

    async fn put_asset(&self, key: &str) -> Result<(), SyncError> {
        let file = upload_key_to_file(&self.dist_root, key);
        let bytes = std::fs::read(&file).map_err(|source| SyncError::Read {
            path: file.display().to_string(),
            source,
        })?;

        // Admin API asset keys carry no leading slash
        let asset_key = key.trim_start_matches('/');
        let body = serde_json::json!({
            "asset": {
                "key": asset_key,
                "attachment": BASE64.encode(&bytes),
            }
        });

        let response = self
            .http
            .put(&self.endpoint)
            .header("X-Shopify-Access-Token", &self.token)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let detail = response.text().await.unwrap_or_default();
            return Err(SyncError::Rejected {
                key: key.to_string(),
                status,
                detail,
            });
        }

        Ok(())
    }
}

impl ThemeSync for ShopifyClient {
    fn sync(
        &self,
        upload: &[String],
    ) -> impl std::future::Future<Output = Result<(), SyncError>> + Send {
        async move {
            for key in upload {
                self.put_asset(key).await?;
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_key_strips_leading_slash() {
        assert_eq!("/layout/theme.liquid".trim_start_matches('/'), "layout/theme.liquid");
    }

    #[test]
    fn test_upload_key_resolves_under_dist() {
        let file = upload_key_to_file(std::path::Path::new("/project/dist"), "/assets/theme.js");
        assert_eq!(file, PathBuf::from("/project/dist/assets/theme.js"));
    }
}
