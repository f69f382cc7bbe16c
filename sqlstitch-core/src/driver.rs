use crate::{Connection, Cursor, SqlWriter};

/// Family of collaborator types making up one backend.
///
/// The engine never talks to a database library directly: a driver supplies
/// the connection, the cursor and the dialect writer whose escaping rules the
/// formatters use.
pub trait Driver {
    type Connection: Connection;
    type SqlWriter: SqlWriter;
    type Cursor: Cursor;

    /// Scheme expected at the front of connection URLs.
    const NAME: &'static str;

    fn sql_writer(&self) -> Self::SqlWriter;
}
