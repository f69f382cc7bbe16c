use crate::{
    Arguments, Connection, Context, Cursor, DEFAULT_LOG_CAPACITY, Driver, Result,
    RowLabeled, RowsAffected, Segment, SqlWriter, StatementLog, Statistics, Value, bind, scan,
};
use std::time::Instant;
use time::OffsetDateTime;

/// Scan, bind, format and assemble in one pass.
///
/// Pure: on failure nothing has been emitted and nothing was recorded. The
/// writer decides every escaping rule, so the same template renders
/// differently (and correctly) per dialect.
pub fn render(writer: &impl SqlWriter, template: &str, args: &Arguments) -> Result<String> {
    let segments = scan(template, &writer.quote_rules())?;
    let bindings = bind(&segments, args)?;
    let mut bindings = bindings.into_iter();
    let mut out = String::with_capacity(template.len() + 32 * args.len());
    let mut context = Context::default();
    for segment in &segments {
        match segment {
            Segment::Literal(text) => out.push_str(text),
            Segment::Placeholder(p) => {
                // bind produced exactly one pairing per placeholder, in order
                if let Some((_, value)) = bindings.next() {
                    writer.write_placeholder(&mut context, &mut out, p.kind, value)?;
                }
            }
        }
    }
    Ok(out)
}

/// How a [`Templater`] reports failures.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorMode {
    /// Return the error to the caller.
    #[default]
    Propagate,
    /// Log, then terminate the operation with a panic.
    Fatal,
}

/// Tuning for a [`Templater`].
#[derive(Debug, Clone, Default)]
pub struct TemplaterOptions {
    pub error_mode: ErrorMode,
    pub log_capacity: Option<usize>,
    /// Optional call-site tag attached to every reported error.
    pub caller: Option<String>,
}

/// The engine: owns a collaborator connection, renders typed-placeholder
/// templates through the driver's dialect writer, executes them and keeps a
/// bounded log of what ran.
///
/// One instance serves one logical call context at a time; wrap it in a lock
/// before sharing it across threads.
pub struct Templater<C: Connection> {
    connection: C,
    writer: <C::Driver as Driver>::SqlWriter,
    error_mode: ErrorMode,
    caller: Option<String>,
    stats: Statistics,
}

impl<C> std::fmt::Debug for Templater<C>
where
    C: Connection + std::fmt::Debug,
    <C::Driver as Driver>::SqlWriter: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Templater")
            .field("connection", &self.connection)
            .field("writer", &self.writer)
            .field("error_mode", &self.error_mode)
            .field("caller", &self.caller)
            .field("stats", &self.stats)
            .finish()
    }
}

impl<C: Connection> Templater<C> {
    pub fn new(connection: C) -> Self {
        Self::with_options(connection, TemplaterOptions::default())
    }

    pub fn with_options(connection: C, options: TemplaterOptions) -> Self {
        let writer = connection.driver().sql_writer();
        Self {
            connection,
            writer,
            error_mode: options.error_mode,
            caller: options.caller,
            stats: Statistics::new(options.log_capacity.unwrap_or(DEFAULT_LOG_CAPACITY)),
        }
    }

    /// Connect through the driver and wrap the session.
    pub fn connect(url: &str) -> Result<Self> {
        Ok(Self::new(C::connect_url(url)?))
    }

    pub fn connection(&self) -> &C {
        &self.connection
    }

    pub fn connection_mut(&mut self) -> &mut C {
        &mut self.connection
    }

    pub fn into_connection(self) -> C {
        self.connection
    }

    /// Render a template against its arguments without executing it.
    pub fn render(&self, template: &str, args: &Arguments) -> Result<String> {
        self.report(render(&self.writer, template, args))
    }

    /// Execute a modify statement, returning the affected-row metadata.
    pub fn query(&mut self, template: &str, args: &Arguments) -> Result<RowsAffected> {
        let _cursor = self.execute(template, args)?;
        Ok(RowsAffected {
            rows_affected: self.connection.affected_rows(),
            last_insert_id: self.connection.last_insert_id(),
        })
    }

    /// First column of the first row, if any row came back.
    pub fn get_one(&mut self, template: &str, args: &Arguments) -> Result<Option<Value>> {
        let mut cursor = self.execute(template, args)?;
        Ok(cursor.fetch_row().and_then(RowLabeled::into_first))
    }

    /// First row, if any.
    pub fn get_row(&mut self, template: &str, args: &Arguments) -> Result<Option<RowLabeled>> {
        let mut cursor = self.execute(template, args)?;
        Ok(cursor.fetch_row())
    }

    /// First column of every row.
    pub fn get_col(&mut self, template: &str, args: &Arguments) -> Result<Vec<Value>> {
        let mut cursor = self.execute(template, args)?;
        let mut column = Vec::with_capacity(cursor.row_count());
        while let Some(row) = cursor.fetch_row() {
            if let Some(value) = row.into_first() {
                column.push(value);
            }
        }
        Ok(column)
    }

    /// Every row, in result order.
    pub fn get_all(&mut self, template: &str, args: &Arguments) -> Result<Vec<RowLabeled>> {
        let mut cursor = self.execute(template, args)?;
        let mut rows = Vec::with_capacity(cursor.row_count());
        while let Some(row) = cursor.fetch_row() {
            rows.push(row);
        }
        Ok(rows)
    }

    /// Rows keyed by the text of their first column, insertion ordered.
    pub fn get_indexed(
        &mut self,
        template: &str,
        args: &Arguments,
    ) -> Result<Vec<(String, RowLabeled)>> {
        let mut cursor = self.execute(template, args)?;
        let mut indexed = Vec::with_capacity(cursor.row_count());
        while let Some(row) = cursor.fetch_row() {
            let key = row.first().map(key_text).unwrap_or_default();
            indexed.push((key, row));
        }
        Ok(indexed)
    }

    /// First column of every row keying its second column.
    pub fn get_indexed_col(
        &mut self,
        template: &str,
        args: &Arguments,
    ) -> Result<Vec<(String, Value)>> {
        let mut cursor = self.execute(template, args)?;
        let mut indexed = Vec::with_capacity(cursor.row_count());
        while let Some(row) = cursor.fetch_row() {
            let mut values = row.values.into_vec().into_iter();
            let key = values.next().map(|v| key_text(&v)).unwrap_or_default();
            indexed.push((key, values.next().unwrap_or(Value::Null)));
        }
        Ok(indexed)
    }

    /// Text of the most recently executed statement.
    pub fn last_query(&self) -> Option<&str> {
        self.stats.last().map(|entry| entry.sql.as_str())
    }

    pub fn statistics(&self) -> &Statistics {
        &self.stats
    }

    fn execute(
        &mut self,
        template: &str,
        args: &Arguments,
    ) -> Result<<C::Driver as Driver>::Cursor> {
        // a failed render never reaches the driver nor the statement log
        let sql = self.report(render(&self.writer, template, args))?;
        self.run_raw(sql)
    }

    fn run_raw(&mut self, sql: String) -> Result<<C::Driver as Driver>::Cursor> {
        let started_at = OffsetDateTime::now_utc();
        let clock = Instant::now();
        let outcome = self.connection.run(&sql);
        let entry = StatementLog {
            sql,
            started_at,
            elapsed: clock.elapsed(),
            error: outcome.as_ref().err().map(ToString::to_string),
        };
        log::debug!("{entry}");
        self.stats.record(entry);
        self.report(outcome)
    }

    fn report<T>(&self, outcome: Result<T>) -> Result<T> {
        match outcome {
            Ok(value) => Ok(value),
            Err(error) => {
                let error = match &self.caller {
                    Some(site) => error.located(site.clone()),
                    None => error,
                };
                log::error!("{error}");
                match self.error_mode {
                    ErrorMode::Propagate => Err(error),
                    ErrorMode::Fatal => panic!("{error}"),
                }
            }
        }
    }
}

/// Plain text form of a scalar used as an index key.
fn key_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Integer(v) => itoa::Buffer::new().format(*v).to_owned(),
        Value::Float(v) => ryu::Buffer::new().format(*v).to_owned(),
        Value::Varchar(v) | Value::Raw(v) => v.clone(),
        Value::List(..) | Value::Map(..) => String::new(),
    }
}
