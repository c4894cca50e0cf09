use crate::config::Config;
use crate::constants::ELIGIBLE_ITEM_TYPES;
use crate::error::Result;
use crate::types::{ItemDetail, ItemsPage, MediaItem, MediaServer};
use async_trait::async_trait;
use reqwest::StatusCode;
use tracing::{debug, instrument};

/// Reqwest-backed Emby API client.
pub struct EmbyClient {
    client: reqwest::Client,
    host: String,
    api_key: String,
    user_id: String,
}

impl EmbyClient {
    pub fn new(config: &Config) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self {
            client,
            host: config.host.clone(),
            api_key: config.api_key.clone(),
            user_id: config.user_id.clone(),
        })
    }

    fn items_url(&self) -> String {
        format!("{}emby/Users/{}/Items", self.host, self.user_id)
    }

    fn detail_url(&self, item_id: &str) -> String {
        format!("{}emby/Users/{}/Items/{}", self.host, self.user_id, item_id)
    }

    fn update_url(&self, item_id: &str) -> String {
        format!("{}emby/Items/{}", self.host, item_id)
    }
}

#[async_trait]
impl MediaServer for EmbyClient {
    #[instrument(skip(self))]
    async fn library_items(&self, library_id: &str) -> Result<Vec<MediaItem>> {
        let response = self
            .client
            .get(self.items_url())
            .query(&[
                ("ParentId", library_id),
                ("Recursive", "true"),
                ("SortBy", "DateCreated"),
                ("SortOrder", "Descending"),
                ("IncludeItemTypes", ELIGIBLE_ITEM_TYPES),
                ("api_key", &self.api_key),
            ])
            .send()
            .await?
            .error_for_status()?;

        let page: ItemsPage = response.json().await?;
        debug!("Fetched {} items for library {}", page.items.len(), library_id);
        Ok(page.items)
    }

    #[instrument(skip(self))]
    async fn item_detail(&self, item_id: &str) -> Result<Option<ItemDetail>> {
        let response = self
            .client
            .get(self.detail_url(item_id))
            .query(&[("api_key", &self.api_key)])
            .send()
            .await?;

        if response.status() != StatusCode::OK {
            debug!("Detail fetch for {} returned {}", item_id, response.status());
            return Ok(None);
        }
        Ok(Some(response.json().await?))
    }

    #[instrument(skip(self, detail))]
    async fn update_item(&self, item_id: &str, detail: &ItemDetail) -> Result<bool> {
        let response = self
            .client
            .post(self.update_url(item_id))
            .query(&[("api_key", &self.api_key)])
            .json(detail)
            .send()
            .await?;

        Ok(response.status() == StatusCode::NO_CONTENT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> Config {
        Config {
            host: "http://emby.local:8096/".to_string(),
            api_key: "key".to_string(),
            user_id: "user42".to_string(),
            user_agent: "test-agent".to_string(),
            libraries: vec![],
        }
    }

    #[test]
    fn endpoints_are_scoped_to_the_configured_host_and_user() {
        let client = EmbyClient::new(&test_config()).unwrap();

        assert_eq!(client.items_url(), "http://emby.local:8096/emby/Users/user42/Items");
        assert_eq!(
            client.detail_url("777"),
            "http://emby.local:8096/emby/Users/user42/Items/777"
        );
        assert_eq!(client.update_url("777"), "http://emby.local:8096/emby/Items/777");
    }
}
