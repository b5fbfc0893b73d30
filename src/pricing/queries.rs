//! Database queries for quotes.

use sqlx::types::Json;
use sqlx::{PgExecutor, PgPool};

use crate::error::Result;
use crate::models::Quote;

use super::models::QuoteDraft;

/// Insert a quote for an inquiry
pub async fn insert_quote<'e, E>(executor: E, inquiry_id: i32, draft: &QuoteDraft) -> Result<Quote>
where
    E: PgExecutor<'e>,
{
    let quote = sqlx::query_as::<_, Quote>(
        r#"
        INSERT INTO quotes (
            inquiry_id, delivery_fee, install_fee, monthly_rate,
            upfront_total, surcharge, ramp_config
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING
            id, inquiry_id, delivery_fee, install_fee, monthly_rate,
            upfront_total, surcharge, ramp_config, created_at
        "#,
    )
    .bind(inquiry_id)
    .bind(draft.delivery_fee)
    .bind(draft.install_fee)
    .bind(draft.monthly_rate)
    .bind(draft.upfront_total)
    .bind(draft.surcharge)
    .bind(Json(&draft.ramp_config))
    .fetch_one(executor)
    .await?;

    Ok(quote)
}

/// Quotes for an inquiry, newest first
pub async fn list_quotes_for_inquiry(pool: &PgPool, inquiry_id: i32) -> Result<Vec<Quote>> {
    let quotes = sqlx::query_as::<_, Quote>(
        r#"
        SELECT
            id, inquiry_id, delivery_fee, install_fee, monthly_rate,
            upfront_total, surcharge, ramp_config, created_at
        FROM quotes
        WHERE inquiry_id = $1
        ORDER BY created_at DESC, id DESC
        "#,
    )
    .bind(inquiry_id)
    .fetch_all(pool)
    .await?;

    Ok(quotes)
}
