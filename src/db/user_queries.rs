use sqlx::PgPool;
use uuid::Uuid;
use crate::models::User;

pub async fn insert(pool: &PgPool, user: &User) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO users (id, username, password_hash, cash_cents, created_at)
         VALUES ($1, $2, $3, $4, $5)",
    )
    .bind(user.id)
    .bind(&user.username)
    .bind(&user.password_hash)
    .bind(user.cash_cents)
    .bind(user.created_at)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn fetch_one(pool: &PgPool, id: Uuid) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        "SELECT id, username, password_hash, cash_cents, created_at
         FROM users
         WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn find_by_username(pool: &PgPool, username: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        "SELECT id, username, password_hash, cash_cents, created_at
         FROM users
         WHERE username = $1",
    )
    .bind(username)
    .fetch_optional(pool)
    .await
}

/// Read the cash balance while taking the row lock that serializes
/// concurrent orders for one user.
pub async fn fetch_cash_for_update(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    id: Uuid,
) -> Result<Option<i64>, sqlx::Error> {
    let row: Option<(i64,)> =
        sqlx::query_as("SELECT cash_cents FROM users WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut **tx)
            .await?;
    Ok(row.map(|(cash,)| cash))
}

pub async fn adjust_cash(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    id: Uuid,
    delta_cents: i64,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("UPDATE users SET cash_cents = cash_cents + $1 WHERE id = $2")
        .bind(delta_cents)
        .bind(id)
        .execute(&mut **tx)
        .await?;
    Ok(result.rows_affected())
}

pub async fn update_password_hash(
    pool: &PgPool,
    id: Uuid,
    password_hash: &str,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("UPDATE users SET password_hash = $1 WHERE id = $2")
        .bind(password_hash)
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}
