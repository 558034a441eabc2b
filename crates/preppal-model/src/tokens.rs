use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TokenBalance {
    pub user_id: Uuid,
    pub available_tokens: i64,
}

/// Returned after a balance change so clients can reconcile without a
/// second round trip.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TokenReceipt {
    pub user_id: Uuid,
    pub previous_balance: i64,
    pub amount: i64,
    pub new_balance: i64,
}
