//! Host API surface used by the dashboard
//!
//! The host answers each action with pass/fail only; its body is opaque.

use crate::ClientResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use shared::{OrderId, TableId};

/// Host endpoints
pub mod paths {
    pub const TABLES: &str = "api/dashboard/tables";
    pub const ACCEPT: &str = "api/chef/accept";
    pub const DECLINE: &str = "api/chef/decline";
    pub const FOOD_PREPARED: &str = "api/chef/food_prepared";
    pub const REQUEST_BILL: &str = "api/request_bill";
    pub const VERIFY_PAYMENT: &str = "api/chef/verify_payment";
}

/// Body for order-addressed actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRequest {
    pub order_id: OrderId,
}

/// Body for table-addressed actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRequest {
    pub table_id: TableId,
}

/// Dashboard view of the host API
#[async_trait]
pub trait DashboardApi: Send + Sync {
    /// Current table list, one raw JSON object per table
    ///
    /// Elements are returned undecoded so a single malformed table is
    /// reported on its own card instead of failing the whole fetch.
    async fn fetch_tables(&self) -> ClientResult<Vec<serde_json::Value>>;

    async fn accept_order(&self, order_id: OrderId) -> ClientResult<()>;

    async fn decline_order(&self, order_id: OrderId) -> ClientResult<()>;

    async fn mark_food_prepared(&self, order_id: OrderId) -> ClientResult<()>;

    async fn generate_bill(&self, table_id: TableId) -> ClientResult<()>;

    async fn verify_payment(&self, table_id: TableId) -> ClientResult<()>;
}
