//! NFT metadata resolution through content-addressed storage.

use crate::collaborators::{ContractReader, MetadataStore};
use crate::error::{Error, Result};
use battle_engine::{Address, TokenId};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::warn;

const IPFS_SCHEME: &str = "ipfs://";

/// Token metadata JSON as uploaded at mint time.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NftMetadata {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub image: Option<String>,
}

/// A token ready to show: metadata resolved and image mapped to the gateway.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NftView {
    pub token_id: TokenId,
    pub name: String,
    pub description: String,
    pub image_url: String,
}

/// Content id of an `ipfs://` URI.
pub fn content_id(uri: &str) -> Result<&str> {
    match uri.strip_prefix(IPFS_SCHEME) {
        Some(cid) if !cid.is_empty() => Ok(cid),
        _ => Err(Error::Metadata(format!("not an ipfs uri: {uri}"))),
    }
}

/// HTTP gateway URL for an `ipfs://` URI.
pub fn gateway_url(gateway: &str, uri: &str) -> Result<String> {
    let cid = content_id(uri)?;
    Ok(format!("{}/ipfs/{cid}", gateway.trim_end_matches('/')))
}

pub fn parse_metadata(bytes: &[u8]) -> Result<NftMetadata> {
    serde_json::from_slice(bytes).map_err(|e| Error::Metadata(format!("invalid metadata json: {e}")))
}

pub struct NftCatalog<R, M> {
    reader: Arc<R>,
    store: M,
    gateway: String,
}

impl<R, M> NftCatalog<R, M>
where
    R: ContractReader,
    M: MetadataStore,
{
    pub fn new(reader: Arc<R>, store: M, gateway: impl Into<String>) -> Self {
        Self {
            reader,
            store,
            gateway: gateway.into(),
        }
    }

    /// Resolve one token.
    pub async fn view(&self, token_id: TokenId) -> Result<NftView> {
        let uri = self.reader.token_uri(token_id).await?;
        let bytes = self.store.fetch(content_id(&uri)?).await?;
        let metadata = parse_metadata(&bytes)?;
        let image = metadata
            .image
            .as_deref()
            .ok_or_else(|| Error::Metadata(format!("token {token_id} metadata has no image")))?;

        Ok(NftView {
            token_id,
            image_url: gateway_url(&self.gateway, image)?,
            name: metadata.name,
            description: metadata.description,
        })
    }

    /// Every token of `owner` whose metadata resolves, in ownership order.
    pub async fn load(&self, owner: Address) -> Result<Vec<NftView>> {
        let tokens = self.reader.tokens_of_owner(owner).await?;
        let mut views = Vec::with_capacity(tokens.len());
        for token_id in tokens {
            match self.view(token_id).await {
                Ok(view) => views.push(view),
                Err(e) => warn!(token_id, owner = %owner, error = %e, "Skipping token metadata"),
            }
        }
        Ok(views)
    }
}
