use crate::error::Result;
use serde::Deserialize;

/// Full item detail as returned by the server. Kept opaque: only the two date
/// fields are read, only `DateCreated` is rewritten, and everything else
/// round-trips through the update call untouched.
pub type ItemDetail = serde_json::Value;

/// Item types the normalizer acts on. Anything else the server returns maps
/// to `Other` and is never processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(from = "String")]
pub enum ItemKind {
    Movie,
    Series,
    Season,
    Episode,
    #[default]
    Other,
}

impl From<String> for ItemKind {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Movie" => ItemKind::Movie,
            "Series" => ItemKind::Series,
            "Season" => ItemKind::Season,
            "Episode" => ItemKind::Episode,
            _ => ItemKind::Other,
        }
    }
}

impl ItemKind {
    pub fn is_eligible(self) -> bool {
        !matches!(self, ItemKind::Other)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ItemKind::Movie => "Movie",
            ItemKind::Series => "Series",
            ItemKind::Season => "Season",
            ItemKind::Episode => "Episode",
            ItemKind::Other => "Other",
        }
    }
}

/// One row of a library listing: just enough identity to decide whether the
/// item needs a detail fetch.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MediaItem {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "Type", default)]
    pub kind: ItemKind,
}

/// Decoded body of the Items endpoint. A response without an `Items` field
/// reads as an empty library.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ItemsPage {
    #[serde(default)]
    pub items: Vec<MediaItem>,
}

/// Remote media-server capability consumed by the normalizer.
#[async_trait::async_trait]
pub trait MediaServer: Send + Sync {
    /// List every eligible item in a library, newest created first.
    async fn library_items(&self, library_id: &str) -> Result<Vec<MediaItem>>;

    /// Fetch the full detail record for one item. `None` means the server
    /// answered with anything other than 200.
    async fn item_detail(&self, item_id: &str) -> Result<Option<ItemDetail>>;

    /// Write a full detail record back. `true` iff the server acknowledged
    /// with 204 No Content.
    async fn update_item(&self, item_id: &str, detail: &ItemDetail) -> Result<bool>;
}
