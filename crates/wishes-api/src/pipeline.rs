use anyhow::Result;
use chrono::Utc;
use serde_json::{Map, Value, json};

use wishes_store::DocumentStore;
use wishes_types::api::{CreateWishRequest, Wish};

use crate::normalize::{decode_created_at, normalize};

pub const WISH_COLLECTION: &str = "wish";

/// Knobs the two historical deployments disagreed on, surfaced as
/// configuration instead of duplicated route code.
#[derive(Debug, Clone)]
pub struct WishConfig {
    pub default_limit: usize,
    pub name_placeholder: String,
    pub default_public_only: bool,
}

impl Default for WishConfig {
    fn default() -> Self {
        Self {
            default_limit: 100,
            name_placeholder: "Someone".to_string(),
            default_public_only: true,
        }
    }
}

/// List wishes newest first. Missing parameters fall back to the config;
/// a storage failure is returned whole, never as partial results.
pub fn list(
    store: &DocumentStore,
    config: &WishConfig,
    limit: Option<u32>,
    public_only: Option<bool>,
) -> Result<Vec<Wish>> {
    let limit = limit.map(|l| l as usize).unwrap_or(config.default_limit);
    let public_only = public_only.unwrap_or(config.default_public_only);

    let mut filter = Map::new();
    if public_only {
        filter.insert("is_public".into(), Value::Bool(true));
    }

    let mut docs = store.find(WISH_COLLECTION, &filter, limit)?;

    // Newest first. `Option` orders `None` below `Some`, so documents
    // without a usable timestamp sink to the end instead of surfacing
    // as newest.
    docs.sort_by(|a, b| decode_created_at(b).cmp(&decode_created_at(a)));

    Ok(docs
        .iter()
        .map(|doc| normalize(doc, &config.name_placeholder))
        .collect())
}

/// Persist one wish and echo it back with the generated id. The same
/// instant is stamped into the stored document and the response.
pub fn create(store: &DocumentStore, req: CreateWishRequest) -> Result<Wish> {
    let created_at = Utc::now();

    let document = json!({
        "name": req.name,
        "relation": req.relation,
        "message": req.message,
        "is_public": req.is_public,
        "created_at": created_at.to_rfc3339(),
    });

    let id = store.insert(WISH_COLLECTION, &document)?;

    Ok(Wish {
        id,
        name: req.name,
        relation: req.relation,
        message: req.message,
        is_public: req.is_public,
        created_at: Some(created_at),
    })
}
