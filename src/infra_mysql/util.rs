use crate::domain_port::StoreError;
use crate::logger::*;
use sqlx::mysql::MySqlDatabaseError;
use std::future::Future;
use std::time::Duration;

const ER_DUP_ENTRY: u16 = 1062;
const ER_NO_REFERENCED_ROW_2: u16 = 1452;
const ER_LOCK_WAIT_TIMEOUT: u16 = 1205;
const ER_LOCK_DEADLOCK: u16 = 1213;

#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub attempts: u32,
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        RetryPolicy {
            attempts: 3,
            backoff: Duration::from_millis(50),
        }
    }
}

fn mysql_error_number(err: &sqlx::Error) -> Option<u16> {
    if let sqlx::Error::Database(db) = err {
        if let Some(mysql_err) = db.try_downcast_ref::<MySqlDatabaseError>() {
            return Some(mysql_err.number());
        }
    }
    None
}

pub fn is_dup_key(err: &sqlx::Error) -> bool {
    mysql_error_number(err) == Some(ER_DUP_ENTRY)
}

pub fn is_fk_violation(err: &sqlx::Error) -> bool {
    mysql_error_number(err) == Some(ER_NO_REFERENCED_ROW_2)
}

pub fn is_transient(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Io(_) | sqlx::Error::PoolTimedOut | sqlx::Error::WorkerCrashed => true,
        sqlx::Error::Database(_) => matches!(
            mysql_error_number(err),
            Some(ER_LOCK_WAIT_TIMEOUT) | Some(ER_LOCK_DEADLOCK)
        ),
        _ => false,
    }
}

pub fn to_store_error(context: &str, err: sqlx::Error) -> StoreError {
    if is_transient(&err) {
        StoreError::Unavailable(format!("{context}: {err}"))
    } else if is_fk_violation(&err) {
        StoreError::ForeignKey(format!("{context}: {err}"))
    } else if matches!(err, sqlx::Error::ColumnDecode { .. } | sqlx::Error::Decode(_)) {
        StoreError::Corrupt(format!("{context}: {err}"))
    } else {
        StoreError::Other(format!("{context}: {err}"))
    }
}

/// Errors after which a statement is known not to have taken effect: the pool
/// never handed out a connection, or MySQL rolled the statement back.
pub fn is_rolled_back(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::PoolTimedOut => true,
        sqlx::Error::Database(_) => matches!(
            mysql_error_number(err),
            Some(ER_LOCK_WAIT_TIMEOUT) | Some(ER_LOCK_DEADLOCK)
        ),
        _ => false,
    }
}

/// Runs a read, retrying transient failures with linear backoff.
pub async fn with_retry<T, F, Fut>(
    policy: RetryPolicy,
    context: &str,
    op: F,
) -> Result<T, sqlx::Error>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, sqlx::Error>>,
{
    retry_while(policy, context, is_transient, op).await
}

/// Runs a write. Only failures that guarantee nothing was applied are
/// retried; a dropped connection may have committed, so it is surfaced.
pub async fn with_write_retry<T, F, Fut>(
    policy: RetryPolicy,
    context: &str,
    op: F,
) -> Result<T, sqlx::Error>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, sqlx::Error>>,
{
    retry_while(policy, context, is_rolled_back, op).await
}

async fn retry_while<T, F, Fut>(
    policy: RetryPolicy,
    context: &str,
    retryable: fn(&sqlx::Error) -> bool,
    mut op: F,
) -> Result<T, sqlx::Error>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, sqlx::Error>>,
{
    let mut attempt = 1;
    loop {
        match op().await {
            Err(e) if retryable(&e) && attempt < policy.attempts => {
                warn!("{context}: attempt {attempt} failed, retrying: {e}");
                tokio::time::sleep(policy.backoff * attempt).await;
                attempt += 1;
            }
            result => return result,
        }
    }
}
