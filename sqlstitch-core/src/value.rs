/// A substitution value handed to the templater.
///
/// The closed variant set replaces runtime type inspection: every formatter
/// pattern-matches on the tag and rejects shapes it cannot represent, so a
/// value can never reach the output through a rule that was not written for it.
#[derive(Default, Debug, Clone, PartialEq)]
pub enum Value {
    #[default]
    Null,
    Integer(i64),
    Float(f64),
    Varchar(String),
    List(Vec<Value>),
    /// Key/value pairs in insertion order.
    Map(Vec<(String, Value)>),
    /// A previously rendered fragment spliced verbatim; the caller vouches
    /// for its safety.
    Raw(String),
}

impl Value {
    /// A raw fragment, exempt from escaping.
    pub fn raw(sql: impl Into<String>) -> Self {
        Value::Raw(sql.into())
    }

    /// Build a [`Value::Map`] preserving the iteration order of `pairs`.
    pub fn map<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        Value::Map(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Build a [`Value::List`] from anything convertible.
    pub fn list<V: Into<Value>>(items: impl IntoIterator<Item = V>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Variant name as it appears in diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Integer(..) => "an integer",
            Value::Float(..) => "a float",
            Value::Varchar(..) => "a string",
            Value::List(..) => "a list",
            Value::Map(..) => "a map",
            Value::Raw(..) => "a raw fragment",
        }
    }
}

macro_rules! impl_from_integer {
    ($($source:ty),+ $(,)?) => {
        $(impl From<$source> for Value {
            fn from(value: $source) -> Self {
                Value::Integer(value as i64)
            }
        })+
    };
}
impl_from_integer!(i8, i16, i32, i64, u8, u16, u32);

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Float(value as f64)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Varchar(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Varchar(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => v.into(),
            None => Value::Null,
        }
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(value: Vec<T>) -> Self {
        Value::List(value.into_iter().map(Into::into).collect())
    }
}
