//! Client module for fetching the album configuration over HTTP.
//!
//! Used when the configuration is given as a URL instead of a local file.
use anyhow::{Context, Result};
use std::io::Read;
use std::time::Duration;
use ureq::Agent;

/// Client for fetching remote configuration documents.
pub struct ConfigClient
{
    client: Agent,
}

impl ConfigClient
{
    /// Create a new configuration client.
    ///
    /// # Returns
    ///
    /// A new client with a 30 second global timeout.
    #[must_use]
    pub fn new() -> Self
    {
        let client = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(30)))
            .build();

        Self {
            client: client.into(),
        }
    }

    /// Whether `source` names a remote document rather than a file.
    #[must_use]
    pub fn is_remote(source: &str) -> bool
    {
        source.starts_with("http://") || source.starts_with("https://")
    }

    /// Fetch a document as text.
    ///
    /// # Arguments
    ///
    /// * `url` - Address of the document.
    ///
    /// # Returns
    ///
    /// The response body.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body cannot be read.
    pub fn fetch(&self, url: &str) -> Result<String>
    {
        let response = self
            .client
            .get(url)
            .call()
            .with_context(|| format!("Failed to fetch {url}"))?;

        let mut response_body = String::new();
        response
            .into_body()
            .into_reader()
            .read_to_string(&mut response_body)
            .with_context(|| format!("Failed to read response body of {url}"))?;

        Ok(response_body)
    }
}

impl Default for ConfigClient
{
    fn default() -> Self
    {
        Self::new()
    }
}
