#[cfg(test)]
mod tests {
    use sqlstitch_core::{Statistics, StatementLog, DEFAULT_LOG_CAPACITY};
    use std::time::Duration;
    use time::OffsetDateTime;

    fn entry(sql: &str) -> StatementLog {
        StatementLog {
            sql: sql.to_owned(),
            started_at: OffsetDateTime::now_utc(),
            elapsed: Duration::from_millis(1),
            error: None,
        }
    }

    #[test]
    fn ring_never_exceeds_capacity() {
        let mut stats = Statistics::default();
        assert_eq!(stats.capacity(), DEFAULT_LOG_CAPACITY);
        for i in 1..=101 {
            stats.record(entry(&format!("SELECT {i}")));
        }
        assert_eq!(stats.len(), 100);
        let first = stats.snapshot().next().unwrap();
        assert_eq!(first.sql, "SELECT 2");
        assert_eq!(stats.last().unwrap().sql, "SELECT 101");
    }

    #[test]
    fn ring_evicts_oldest_first() {
        let mut stats = Statistics::new(2);
        stats.record(entry("a"));
        stats.record(entry("b"));
        stats.record(entry("c"));
        let kept = stats.snapshot().map(|e| e.sql.as_str()).collect::<Vec<_>>();
        assert_eq!(kept, vec!["b", "c"]);
    }

    #[test]
    fn failed_statement_keeps_error_text() {
        let mut stats = Statistics::new(4);
        let mut failed = entry("DROP TABLE nope");
        failed.error = Some("table does not exist".into());
        stats.record(failed);
        let last = stats.last().unwrap();
        assert_eq!(last.error.as_deref(), Some("table does not exist"));
        let printed = last.to_string();
        assert!(printed.contains("DROP TABLE nope"));
        assert!(printed.contains("table does not exist"));
    }
}
