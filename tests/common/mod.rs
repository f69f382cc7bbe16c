#![allow(dead_code)]

use log::LevelFilter;
use sqlstitch::{
    ConnectOptions, Connection, Cursor, Driver, Error, Executor, MySqlSqlWriter, Result,
    RowLabeled, RowNames, Value,
};
use std::{collections::VecDeque, env};

pub fn init_logs() {
    let mut logger = env_logger::builder();
    logger.is_test(true);
    if env::var("RUST_LOG").is_err() {
        logger.filter_level(LevelFilter::Warn);
    }
    let _ = logger.try_init();
}

#[derive(Clone, Copy, Default)]
pub struct MemoryDriver;

impl Driver for MemoryDriver {
    type Connection = MemoryConnection;
    type SqlWriter = MySqlSqlWriter;
    type Cursor = MemoryCursor;

    const NAME: &'static str = "memory";

    fn sql_writer(&self) -> MySqlSqlWriter {
        MySqlSqlWriter::new()
    }
}

/// Scripted stand-in for a database client: pops one prepared outcome per
/// executed statement and remembers every SQL string it received.
#[derive(Debug, Default)]
pub struct MemoryConnection {
    pub executed: Vec<String>,
    script: VecDeque<std::result::Result<Vec<RowLabeled>, String>>,
    pub affected: u64,
    pub insert_id: Option<i64>,
}

impl MemoryConnection {
    pub fn expect_rows(&mut self, rows: Vec<RowLabeled>) {
        self.script.push_back(Ok(rows));
    }

    pub fn expect_error(&mut self, message: &str) {
        self.script.push_back(Err(message.to_owned()));
    }
}

impl Executor for MemoryConnection {
    type Driver = MemoryDriver;

    fn driver(&self) -> &MemoryDriver {
        &MemoryDriver
    }

    fn run(&mut self, sql: &str) -> Result<MemoryCursor> {
        self.executed.push(sql.to_owned());
        match self.script.pop_front() {
            Some(Ok(rows)) => Ok(MemoryCursor::new(rows)),
            Some(Err(message)) => Err(Error::execution(sql, message)),
            None => Ok(MemoryCursor::new(Vec::new())),
        }
    }

    fn affected_rows(&self) -> u64 {
        self.affected
    }

    fn last_insert_id(&self) -> Option<i64> {
        self.insert_id
    }
}

impl Connection for MemoryConnection {
    fn connect(_options: &ConnectOptions) -> Result<Self> {
        Ok(Self::default())
    }
}

pub struct MemoryCursor {
    rows: VecDeque<RowLabeled>,
    total: usize,
}

impl MemoryCursor {
    fn new(rows: Vec<RowLabeled>) -> Self {
        Self {
            total: rows.len(),
            rows: rows.into(),
        }
    }
}

impl Cursor for MemoryCursor {
    fn fetch_row(&mut self) -> Option<RowLabeled> {
        self.rows.pop_front()
    }

    fn row_count(&self) -> usize {
        self.total
    }
}

pub fn labels(names: &[&str]) -> RowNames {
    names.iter().map(|n| n.to_string()).collect()
}

pub fn row(names: &RowNames, values: Vec<Value>) -> RowLabeled {
    RowLabeled::new(names.clone(), values.into_boxed_slice())
}
