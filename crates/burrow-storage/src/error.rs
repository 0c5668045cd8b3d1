use burrow_core::StorageError;

/// SQLSTATE for `unique_violation`.
const UNIQUE_VIOLATION: &str = "23505";

pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .and_then(|db| db.code())
        .is_some_and(|code| code == UNIQUE_VIOLATION)
}

pub(crate) fn map_sqlx_error(err: sqlx::Error) -> StorageError {
    let message = err.to_string();

    match err {
        sqlx::Error::Database(db) => match db.code() {
            Some(code) => from_sqlstate(&code, message),
            None => StorageError::Query(message),
        },
        sqlx::Error::PoolTimedOut => StorageError::Timeout(message),
        sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed
        | sqlx::Error::Io(_)
        | sqlx::Error::Tls(_)
        | sqlx::Error::Protocol(_)
        | sqlx::Error::Configuration(_) => StorageError::Unavailable(message),
        sqlx::Error::ColumnIndexOutOfBounds { .. }
        | sqlx::Error::ColumnNotFound(_)
        | sqlx::Error::ColumnDecode { .. }
        | sqlx::Error::TypeNotFound { .. }
        | sqlx::Error::Decode(_)
        | sqlx::Error::RowNotFound => StorageError::InvalidData(message),
        _ => StorageError::Query(message),
    }
}

/// Classifies a PostgreSQL error by its SQLSTATE code.
fn from_sqlstate(code: &str, message: String) -> StorageError {
    match code {
        // query_canceled (statement_timeout) and lock_not_available
        "57014" | "55P03" => StorageError::Timeout(message),
        // admin_shutdown, crash_shutdown, cannot_connect_now
        "57P01" | "57P02" | "57P03" => StorageError::Unavailable(message),
        // connection_exception and insufficient_resources classes
        _ if code.starts_with("08") || code.starts_with("53") => {
            StorageError::Unavailable(message)
        }
        // data_exception class
        _ if code.starts_with("22") => StorageError::InvalidData(message),
        _ => StorageError::Query(message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pool_timeout_maps_to_timeout() {
        assert!(matches!(
            map_sqlx_error(sqlx::Error::PoolTimedOut),
            StorageError::Timeout(_)
        ));
    }

    #[test]
    fn closed_pool_maps_to_unavailable() {
        assert!(matches!(
            map_sqlx_error(sqlx::Error::PoolClosed),
            StorageError::Unavailable(_)
        ));
    }

    #[test]
    fn protocol_and_configuration_map_to_unavailable() {
        assert!(matches!(
            map_sqlx_error(sqlx::Error::Protocol("unexpected message".to_string())),
            StorageError::Unavailable(_)
        ));
        assert!(matches!(
            map_sqlx_error(sqlx::Error::Configuration("bad database url".into())),
            StorageError::Unavailable(_)
        ));
    }

    #[test]
    fn missing_row_maps_to_invalid_data() {
        assert!(matches!(
            map_sqlx_error(sqlx::Error::RowNotFound),
            StorageError::InvalidData(_)
        ));
    }

    #[test]
    fn sqlstate_classes() {
        let classify = |code: &str| from_sqlstate(code, code.to_string());

        assert!(matches!(classify("57014"), StorageError::Timeout(_)));
        assert!(matches!(classify("55P03"), StorageError::Timeout(_)));
        assert!(matches!(classify("57P01"), StorageError::Unavailable(_)));
        assert!(matches!(classify("08006"), StorageError::Unavailable(_)));
        assert!(matches!(classify("53300"), StorageError::Unavailable(_)));
        assert!(matches!(classify("22021"), StorageError::InvalidData(_)));
        assert!(matches!(classify("42P01"), StorageError::Query(_)));
    }

    #[test]
    fn non_database_errors_are_not_unique_violations() {
        assert!(!is_unique_violation(&sqlx::Error::PoolClosed));
    }
}
