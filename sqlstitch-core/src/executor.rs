use crate::{Driver, Result, RowLabeled};

/// Synchronous execution seam of the external database client.
///
/// One call fully completes or fails before returning; cancellation,
/// timeouts and retries all belong to the implementation behind this trait.
pub trait Executor {
    type Driver: Driver;

    fn driver(&self) -> &Self::Driver;

    /// Send fully rendered SQL, returning a cursor over the result rows.
    fn run(&mut self, sql: &str) -> Result<<Self::Driver as Driver>::Cursor>;

    /// Rows affected by the most recent modify statement.
    fn affected_rows(&self) -> u64;

    /// Identifier generated by the most recent insert, when the backend
    /// reports one.
    fn last_insert_id(&self) -> Option<i64>;
}

/// Forward-only reader over a result set. Dropping the cursor releases it.
pub trait Cursor {
    /// Next row, `None` once the results are exhausted.
    fn fetch_row(&mut self) -> Option<RowLabeled>;

    /// Total rows in the result set when the backend reports it.
    fn row_count(&self) -> usize;
}
