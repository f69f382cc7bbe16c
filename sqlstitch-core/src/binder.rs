use crate::{Error, Placeholder, Result, Segment, Value};

/// Substitution values for one render call.
#[derive(Debug, Clone, PartialEq)]
pub enum Arguments {
    /// Consumed left to right, one value per placeholder.
    Positional(Vec<Value>),
    /// Looked up by placeholder name; one value may serve many references.
    Named(Vec<(String, Value)>),
}

impl Arguments {
    pub fn positional<V: Into<Value>>(values: impl IntoIterator<Item = V>) -> Self {
        Arguments::Positional(values.into_iter().map(Into::into).collect())
    }

    pub fn named<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        Arguments::Named(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    pub fn len(&self) -> usize {
        match self {
            Arguments::Positional(values) => values.len(),
            Arguments::Named(pairs) => pairs.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<Vec<Value>> for Arguments {
    fn from(values: Vec<Value>) -> Self {
        Arguments::Positional(values)
    }
}

/// Positional [`Arguments`], converting every element independently:
/// `params!["users", 42, vec![1, 2, 3]]`.
#[macro_export]
macro_rules! params {
    () => {
        $crate::Arguments::Positional(::std::vec::Vec::new())
    };
    ($($value:expr),+ $(,)?) => {
        $crate::Arguments::Positional(::std::vec![$($crate::Value::from($value)),+])
    };
}

/// Named [`Arguments`]: `named_params! { "id" => 42, "who" => "Bob" }`.
#[macro_export]
macro_rules! named_params {
    () => {
        $crate::Arguments::Named(::std::vec::Vec::new())
    };
    ($($name:expr => $value:expr),+ $(,)?) => {
        $crate::Arguments::Named(::std::vec![
            $((::std::string::String::from($name), $crate::Value::from($value))),+
        ])
    };
}

/// Pair every placeholder with its value, in template order.
///
/// Arity is settled before any value is formatted: a mismatch fails the whole
/// render with no partial output. In named mode values are read, not
/// consumed, so several placeholders may reference one argument; every
/// supplied argument must still be referenced at least once.
pub fn bind<'t, 'v>(
    segments: &'t [Segment<'t>],
    args: &'v Arguments,
) -> Result<Vec<(Placeholder<'t>, &'v Value)>> {
    let placeholders = segments
        .iter()
        .filter_map(|segment| match segment {
            Segment::Placeholder(p) => Some(*p),
            Segment::Literal(..) => None,
        })
        .collect::<Vec<_>>();
    match args {
        Arguments::Positional(values) => {
            if let Some((p, name)) = placeholders
                .iter()
                .find_map(|p| p.name.map(|name| (p, name)))
            {
                return Err(Error::ArityMismatch {
                    reason: format!(
                        "placeholder `{}:{}` at byte {} requires named arguments",
                        p.kind, name, p.offset
                    ),
                });
            }
            if placeholders.len() != values.len() {
                return Err(Error::ArityMismatch {
                    reason: format!(
                        "template has {} placeholders but {} values were supplied",
                        placeholders.len(),
                        values.len()
                    ),
                });
            }
            Ok(placeholders.into_iter().zip(values).collect())
        }
        Arguments::Named(pairs) => {
            for (i, (name, _)) in pairs.iter().enumerate() {
                if pairs[..i].iter().any(|(earlier, _)| earlier == name) {
                    return Err(Error::ArityMismatch {
                        reason: format!("argument `{name}` was supplied more than once"),
                    });
                }
            }
            let mut referenced = vec![false; pairs.len()];
            let mut bindings = Vec::with_capacity(placeholders.len());
            for p in placeholders {
                let Some(name) = p.name else {
                    return Err(Error::ArityMismatch {
                        reason: format!(
                            "placeholder `{}` at byte {} has no name to look up",
                            p.kind, p.offset
                        ),
                    });
                };
                let Some(i) = pairs.iter().position(|(key, _)| key == name) else {
                    return Err(Error::ArityMismatch {
                        reason: format!("no value supplied for placeholder `{name}`"),
                    });
                };
                referenced[i] = true;
                bindings.push((p, &pairs[i].1));
            }
            if let Some(i) = referenced.iter().position(|used| !used) {
                return Err(Error::ArityMismatch {
                    reason: format!("argument `{}` is not referenced by the template", pairs[i].0),
                });
            }
            Ok(bindings)
        }
    }
}
