//! Typed models for index query responses.

use serde::Deserialize;

/// One asset associated with an account.
///
/// A holding with `amount == 0` means the address has opted in but does not
/// own a unit; callers distinguishing "eligible" from "owned" filter on the
/// amount.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AssetHolding {
    #[serde(rename = "asset-id")]
    pub asset_id: u64,

    pub amount: u64,

    #[serde(rename = "is-frozen", default)]
    pub is_frozen: bool,
}

/// Immutable creation parameters of an asset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AssetParams {
    /// Display name; absent when the creator set none.
    #[serde(default)]
    pub name: Option<String>,

    #[serde(rename = "unit-name", default)]
    pub unit_name: Option<String>,

    /// Metadata URI; absent when the creator set none.
    #[serde(default)]
    pub url: Option<String>,

    pub total: u64,

    pub decimals: u32,

    pub creator: String,

    #[serde(default)]
    pub manager: Option<String>,

    #[serde(default)]
    pub reserve: Option<String>,

    #[serde(default)]
    pub freeze: Option<String>,

    #[serde(default)]
    pub clawback: Option<String>,
}

/// Raw shape of `GET /v2/accounts/{address}/assets`.
#[derive(Debug, Deserialize)]
pub(crate) struct AccountAssetsResponse {
    #[serde(default)]
    pub assets: Vec<AssetHolding>,
}

/// Raw shape of `GET /v2/assets/{asset-id}`.
#[derive(Debug, Deserialize)]
pub(crate) struct AssetResponse {
    pub asset: AssetRecord,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AssetRecord {
    pub params: AssetParams,
}
