use crate::routes::api::v0::user::error::UserError;
use crate::user::{ExtractUser, ExtractUserId};
use axum::routing::get;
use axum::{Extension, Json, Router};
use preppal_db::user;
use preppal_model::tokens::{TokenBalance, TokenReceipt};
use preppal_model::user::User;
use sea_orm::DatabaseConnection;
use serde::Deserialize;
use utoipa::ToSchema;

pub(crate) mod error;

pub(crate) fn create_router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/", get(get_user_info))
        .route("/tokens", get(get_balance).patch(adjust_balance))
        .with_state(())
}

#[utoipa::path(
    get,
    path = "/api/v0/user",
    responses(
        (status = OK, body = User, description = "returns information that is stored about the current user"),
    ),
    tag = "v0/user",
    security(
        ("token" = [])
    )
)]
pub(crate) async fn get_user_info(ExtractUser(user): ExtractUser) -> Json<User> {
    Json(user)
}

#[utoipa::path(
    get,
    path = "/api/v0/user/tokens",
    responses(
        (status = OK, body = TokenBalance, description = "current token balance of the user"),
    ),
    tag = "v0/user",
    security(
        ("token" = [])
    )
)]
pub(crate) async fn get_balance(
    ExtractUserId(user_id): ExtractUserId,
    Extension(conn): Extension<DatabaseConnection>,
) -> Result<Json<TokenBalance>, UserError> {
    let available_tokens = user::Query::get_balance(&conn, user_id)
        .await?
        .ok_or(UserError::UserNotFound)?;

    Ok(Json(TokenBalance {
        user_id,
        available_tokens,
    }))
}

#[derive(Debug, Deserialize, ToSchema)]
pub(crate) struct BalanceChange {
    /// Negative amounts are debited, positive amounts are credited.
    amount: i64,
}

#[derive(Debug, PartialEq, Eq)]
enum BalanceOp {
    Debit(i64),
    Credit(i64),
}

/// Splits a signed change into the operation and its positive magnitude.
/// Zero has no effect and `i64::MIN` has no positive counterpart, both are
/// rejected.
fn classify_change(amount: i64) -> Result<BalanceOp, UserError> {
    if amount > 0 {
        return Ok(BalanceOp::Credit(amount));
    }
    match amount.checked_neg() {
        Some(positive) if positive > 0 => Ok(BalanceOp::Debit(positive)),
        _ => Err(UserError::InvalidAmount),
    }
}

#[utoipa::path(
    patch,
    path = "/api/v0/user/tokens",
    request_body = BalanceChange,
    responses(
        (status = OK, body = TokenReceipt, description = "balance after the change"),
        (status = BAD_REQUEST, description = "Amount was zero"),
        (status = FORBIDDEN, description = "Balance is too low for the requested debit"),
    ),
    tag = "v0/user",
    security(
        ("token" = [])
    )
)]
pub(crate) async fn adjust_balance(
    ExtractUserId(user_id): ExtractUserId,
    Extension(conn): Extension<DatabaseConnection>,
    Json(change): Json<BalanceChange>,
) -> Result<Json<TokenReceipt>, UserError> {
    let debit = match classify_change(change.amount)? {
        BalanceOp::Debit(amount) => user::Mutation::debit_tokens(&conn, user_id, amount).await?,
        BalanceOp::Credit(amount) => user::Mutation::credit_tokens(&conn, user_id, amount).await?,
    };

    Ok(Json(TokenReceipt {
        user_id,
        previous_balance: debit.previous_balance,
        amount: change.amount,
        new_balance: debit.new_balance,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_splits_sign_and_magnitude() {
        assert_eq!(classify_change(-5).unwrap(), BalanceOp::Debit(5));
        assert_eq!(classify_change(7).unwrap(), BalanceOp::Credit(7));
    }

    #[test]
    fn test_classify_rejects_zero() {
        assert!(matches!(classify_change(0), Err(UserError::InvalidAmount)));
    }

    #[test]
    fn test_classify_rejects_unnegatable_minimum() {
        assert!(matches!(classify_change(i64::MIN), Err(UserError::InvalidAmount)));
    }
}
