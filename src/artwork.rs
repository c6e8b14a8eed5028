use crate::catalog::loader::is_remote;
use anyhow::{Context, Result};
use image::DynamicImage;
use reqwest::Client;

/// Loads cover art for the player card
pub struct ArtworkRenderer {
    client: Client,
}

impl ArtworkRenderer {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub async fn fetch_image(&self, url: &str) -> Result<DynamicImage> {
        let bytes = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;
        let img = image::load_from_memory(&bytes)?;
        Ok(img)
    }

    pub async fn read_image(&self, path: &str) -> Result<DynamicImage> {
        let bytes = tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read artwork: {}", path))?;
        let img = image::load_from_memory(&bytes)?;
        Ok(img)
    }

    /// Resolved image locator, either a URL or a local path
    pub async fn load(&self, locator: &str) -> Result<DynamicImage> {
        if is_remote(locator) {
            self.fetch_image(locator).await
        } else {
            self.read_image(locator).await
        }
    }
}
