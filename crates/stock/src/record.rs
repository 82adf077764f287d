//! Stock ledger wire types.

use serde::{Deserialize, Serialize};

use stockbridge_core::{ProductId, StockRecordId};

/// One ledger row: available quantity for a product.
///
/// The ledger enforces `quantity >= 0` and at most one record per product;
/// this side treats both as collaborator guarantees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockRecord {
    pub id: StockRecordId,
    pub product_id: ProductId,
    pub quantity: i64,
}

/// Body of the ledger's upsert operation (`POST /stock`).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockUpsert {
    pub product_id: ProductId,
    pub quantity: i64,
}
