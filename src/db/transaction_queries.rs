use sqlx::PgPool;
use uuid::Uuid;
use crate::models::{Holding, Transaction};

/// Append one ledger row inside the order's transaction. The seq column is
/// assigned by the database and breaks ordering ties between rows sharing an
/// execution timestamp.
pub async fn append(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    record: &Transaction,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO transactions (id, user_id, symbol, shares, price_cents, executed_at)
         VALUES ($1, $2, $3, $4, $5, $6)",
    )
    .bind(record.id)
    .bind(record.user_id)
    .bind(&record.symbol)
    .bind(record.shares)
    .bind(record.price_cents)
    .bind(record.executed_at)
    .execute(&mut **tx)
    .await?;
    Ok(())
}

/// Net shares held in one symbol: the sum of signed share counts, 0 if the
/// user never traded it. SUM(bigint) widens to numeric, hence the cast.
pub async fn net_shares<'e, E>(executor: E, user_id: Uuid, symbol: &str) -> Result<i64, sqlx::Error>
where
    E: sqlx::Executor<'e, Database = sqlx::Postgres>,
{
    let (total,): (i64,) = sqlx::query_as(
        "SELECT COALESCE(SUM(shares), 0)::BIGINT
         FROM transactions
         WHERE user_id = $1 AND symbol = $2",
    )
    .bind(user_id)
    .bind(symbol)
    .fetch_one(executor)
    .await?;
    Ok(total)
}

pub async fn active_holdings(pool: &PgPool, user_id: Uuid) -> Result<Vec<Holding>, sqlx::Error> {
    sqlx::query_as::<_, Holding>(
        "SELECT symbol, SUM(shares)::BIGINT AS shares
         FROM transactions
         WHERE user_id = $1
         GROUP BY symbol
         HAVING SUM(shares) > 0
         ORDER BY symbol",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

pub async fn fetch_history(pool: &PgPool, user_id: Uuid) -> Result<Vec<Transaction>, sqlx::Error> {
    sqlx::query_as::<_, Transaction>(
        "SELECT id, user_id, symbol, shares, price_cents, executed_at
         FROM transactions
         WHERE user_id = $1
         ORDER BY executed_at ASC, seq ASC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}
