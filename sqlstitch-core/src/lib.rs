mod binder;
mod connection;
mod driver;
mod error;
mod executor;
mod query;
mod sanitize;
mod scanner;
mod stats;
mod templater;
mod util;
mod value;
mod writer;

pub use binder::*;
pub use connection::*;
pub use driver::*;
pub use error::*;
pub use executor::*;
pub use query::*;
pub use sanitize::*;
pub use scanner::*;
pub use stats::*;
pub use templater::*;
pub use util::*;
pub use value::*;
pub use writer::*;

pub type Result<T> = std::result::Result<T, Error>;
