//! Database queries for inquiries and rentals

use sqlx::{PgExecutor, PgPool};

use crate::error::{AppError, Result};
use crate::models::{ActiveRental, Inquiry, InquiryStatus, NewInquiry};

const INQUIRY_COLUMNS: &str = r#"
    id, name, email, phone, address, height, mobility_aid,
    picture_blob_url, status, notes, created_at, updated_at
"#;

/// Get an inquiry by id
pub async fn get_inquiry<'e, E>(executor: E, id: i32) -> Result<Inquiry>
where
    E: PgExecutor<'e>,
{
    let inquiry = sqlx::query_as::<_, Inquiry>(&format!(
        "SELECT {} FROM inquiries WHERE id = $1",
        INQUIRY_COLUMNS
    ))
    .bind(id)
    .fetch_optional(executor)
    .await?
    .ok_or(AppError::NotFound)?;

    Ok(inquiry)
}

/// List inquiries, newest first, optionally limited
pub async fn list_inquiries(pool: &PgPool, limit: Option<i64>) -> Result<Vec<Inquiry>> {
    let inquiries = sqlx::query_as::<_, Inquiry>(&format!(
        r#"
        SELECT {}
        FROM inquiries
        ORDER BY created_at DESC, id DESC
        LIMIT $1
        "#,
        INQUIRY_COLUMNS
    ))
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(inquiries)
}

/// Insert a new inquiry with status `new`
pub async fn insert_inquiry(pool: &PgPool, inquiry: &NewInquiry) -> Result<Inquiry> {
    let created = sqlx::query_as::<_, Inquiry>(&format!(
        r#"
        INSERT INTO inquiries (name, email, phone, address, height, mobility_aid, notes, status)
        VALUES ($1, $2, $3, $4, $5, $6, $7, 'new')
        RETURNING {}
        "#,
        INQUIRY_COLUMNS
    ))
    .bind(&inquiry.name)
    .bind(&inquiry.email)
    .bind(&inquiry.phone)
    .bind(&inquiry.address)
    .bind(inquiry.height)
    .bind(inquiry.mobility_aid)
    .bind(&inquiry.notes)
    .fetch_one(pool)
    .await?;

    Ok(created)
}

/// Replace an inquiry's editable fields
pub async fn update_inquiry(pool: &PgPool, id: i32, inquiry: &NewInquiry) -> Result<Inquiry> {
    let updated = sqlx::query_as::<_, Inquiry>(&format!(
        r#"
        UPDATE inquiries
        SET name = $2, email = $3, phone = $4, address = $5,
            height = $6, mobility_aid = $7, notes = $8, updated_at = NOW()
        WHERE id = $1
        RETURNING {}
        "#,
        INQUIRY_COLUMNS
    ))
    .bind(id)
    .bind(&inquiry.name)
    .bind(&inquiry.email)
    .bind(&inquiry.phone)
    .bind(&inquiry.address)
    .bind(inquiry.height)
    .bind(inquiry.mobility_aid)
    .bind(&inquiry.notes)
    .fetch_optional(pool)
    .await?
    .ok_or(AppError::NotFound)?;

    Ok(updated)
}

/// Set an inquiry's status
pub async fn update_inquiry_status<'e, E>(
    executor: E,
    id: i32,
    status: InquiryStatus,
) -> Result<Inquiry>
where
    E: PgExecutor<'e>,
{
    let updated = sqlx::query_as::<_, Inquiry>(&format!(
        r#"
        UPDATE inquiries
        SET status = $2, updated_at = NOW()
        WHERE id = $1
        RETURNING {}
        "#,
        INQUIRY_COLUMNS
    ))
    .bind(id)
    .bind(status)
    .fetch_optional(executor)
    .await?
    .ok_or(AppError::NotFound)?;

    Ok(updated)
}

/// Delete an inquiry and its quotes
pub async fn delete_inquiry(pool: &PgPool, id: i32) -> Result<Inquiry> {
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM quotes WHERE inquiry_id = $1")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    let deleted = sqlx::query_as::<_, Inquiry>(&format!(
        "DELETE FROM inquiries WHERE id = $1 RETURNING {}",
        INQUIRY_COLUMNS
    ))
    .bind(id)
    .fetch_optional(&mut *tx)
    .await?
    .ok_or(AppError::NotFound)?;

    tx.commit().await?;

    Ok(deleted)
}

/// Rentals without an end date, newest first
pub async fn list_active_rentals(pool: &PgPool) -> Result<Vec<ActiveRental>> {
    let rentals = sqlx::query_as::<_, ActiveRental>(
        r#"
        SELECT
            r.id,
            r.inquiry_id,
            r.quote_id,
            r.start_date,
            r.end_date,
            r.signature_status,
            r.notes,
            r.created_at,
            i.name as customer_name,
            i.email as customer_email
        FROM rentals r
        LEFT JOIN inquiries i ON r.inquiry_id = i.id
        WHERE r.end_date IS NULL
        ORDER BY r.created_at DESC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rentals)
}
