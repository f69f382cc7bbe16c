use crate::{
    Context, Error, Fragment, PlaceholderKind, QuoteRules, Result, Value, separated_by,
};
use atoi::FromRadix10SignedChecked;

/// Dialect printer turning bound values into SQL fragments.
///
/// Default methods implement ANSI conventions (single-quoted strings with
/// doubled quotes, double-quoted identifiers); a driver overrides the
/// escaping entry points to match its server, see [`MySqlSqlWriter`]. This is
/// where the collaborator's literal-escape primitive plugs into the engine.
pub trait SqlWriter {
    /// Quoting rules the scanner honors while locating placeholders.
    fn quote_rules(&self) -> QuoteRules {
        QuoteRules::default()
    }

    /// Character wrapping identifiers.
    fn identifier_quote(&self) -> char {
        '"'
    }

    /// Escape occurrences of `search` with `replace` while copying `value`
    /// into the buffer.
    fn write_escaped(&self, out: &mut String, value: &str, search: char, replace: &str) {
        let mut position = 0;
        for (i, c) in value.char_indices() {
            if c == search {
                out.push_str(&value[position..i]);
                out.push_str(replace);
                position = i + c.len_utf8();
            }
        }
        out.push_str(&value[position..]);
    }

    /// Render the NULL literal.
    fn write_null(&self, out: &mut String) {
        out.push_str("NULL");
    }

    /// Quote an identifier, doubling the quote character inside it.
    fn write_identifier(&self, _context: &mut Context, out: &mut String, value: &str) -> Result<()> {
        if value.is_empty() {
            return Err(Error::EmptyIdentifier);
        }
        let quote = self.identifier_quote();
        let doubled: String = [quote, quote].iter().collect();
        out.push(quote);
        self.write_escaped(out, value, quote, &doubled);
        out.push(quote);
        Ok(())
    }

    /// Quote and escape a string literal.
    fn write_string_literal(&self, _context: &mut Context, out: &mut String, value: &str) {
        out.push('\'');
        self.write_escaped(out, value, '\'', "''");
        out.push('\'');
    }

    /// Render a scalar through the string rule: a quoted literal, or NULL.
    ///
    /// `kind` attributes failures to the placeholder being formatted, since
    /// the list, set and row rules all funnel their elements through here.
    fn write_value_string(
        &self,
        context: &mut Context,
        out: &mut String,
        value: &Value,
        kind: PlaceholderKind,
    ) -> Result<()> {
        match value {
            Value::Null => self.write_null(out),
            Value::Integer(v) => {
                let mut buffer = itoa::Buffer::new();
                self.write_string_literal(context, out, buffer.format(*v));
            }
            Value::Float(v) => {
                let mut buffer = ryu::Buffer::new();
                self.write_string_literal(context, out, buffer.format(*v));
            }
            Value::Varchar(v) => self.write_string_literal(context, out, v),
            other => {
                let place = match context.fragment {
                    Fragment::InList => "scalar elements",
                    Fragment::SetClause => "scalar assignment values",
                    Fragment::ValuesRow => "scalar row elements",
                    _ => "a scalar or null",
                };
                return Err(Error::InvalidFormat {
                    kind,
                    reason: format!("expects {place}, got {}", other.kind_name()),
                });
            }
        }
        Ok(())
    }

    /// Render the integer rule: unquoted base-10 text.
    ///
    /// Floats and numeric strings are truncated toward zero; magnitudes
    /// beyond the 64-bit range saturate, the precision loss is accepted.
    fn write_value_integer(&self, _context: &mut Context, out: &mut String, value: &Value) -> Result<()> {
        let mut buffer = itoa::Buffer::new();
        match value {
            Value::Null => self.write_null(out),
            Value::Integer(v) => out.push_str(buffer.format(*v)),
            Value::Float(v) => out.push_str(buffer.format(v.trunc() as i64)),
            Value::Varchar(v) => {
                let text = v.trim();
                let Some(parsed) = parse_integer_text(text) else {
                    return Err(Error::InvalidFormat {
                        kind: PlaceholderKind::Int,
                        reason: format!("cannot interpret `{v}` as a number"),
                    });
                };
                out.push_str(buffer.format(parsed));
            }
            other => {
                return Err(Error::InvalidFormat {
                    kind: PlaceholderKind::Int,
                    reason: format!("expects a number or null, got {}", other.kind_name()),
                });
            }
        }
        Ok(())
    }

    /// Render the IN-list rule: comma-joined escaped scalars, no parentheses.
    ///
    /// An empty list renders NULL, which keeps `IN ?a` well formed and never
    /// matching, where `IN ()` would not even parse.
    fn write_in_list(&self, context: &mut Context, out: &mut String, value: &Value) -> Result<()> {
        let Value::List(items) = value else {
            return Err(Error::InvalidFormat {
                kind: PlaceholderKind::InList,
                reason: format!("expects a list, got {}", value.kind_name()),
            });
        };
        if items.is_empty() {
            self.write_null(out);
            return Ok(());
        }
        let mut context = context.with_fragment(Fragment::InList);
        separated_by(
            out,
            items,
            |out, item| self.write_value_string(&mut context, out, item, PlaceholderKind::InList),
            ",",
        )
    }

    /// Render the SET rule: `identifier='value'` pairs in insertion order.
    fn write_set_clause(&self, context: &mut Context, out: &mut String, value: &Value) -> Result<()> {
        let Value::Map(pairs) = value else {
            return Err(Error::InvalidFormat {
                kind: PlaceholderKind::SetClause,
                reason: format!("expects a map, got {}", value.kind_name()),
            });
        };
        if pairs.is_empty() {
            return Err(Error::InvalidFormat {
                kind: PlaceholderKind::SetClause,
                reason: "expects at least one assignment".into(),
            });
        }
        let mut context = context.with_fragment(Fragment::SetClause);
        separated_by(
            out,
            pairs,
            |out, (key, value)| {
                self.write_identifier(&mut context, out, key)?;
                out.push('=');
                self.write_value_string(&mut context, out, value, PlaceholderKind::SetClause)
            },
            ",",
        )
    }

    /// Render the multi-row VALUES rule: `(row),(row)` groups, each row
    /// joined by the IN-list rule.
    fn write_values_rows(&self, context: &mut Context, out: &mut String, value: &Value) -> Result<()> {
        let invalid = |reason: String| Error::InvalidFormat {
            kind: PlaceholderKind::ValuesRows,
            reason,
        };
        let Value::List(rows) = value else {
            return Err(invalid(format!(
                "expects a list of rows, got {}",
                value.kind_name()
            )));
        };
        if rows.is_empty() {
            return Err(invalid("expects at least one row".into()));
        }
        let mut context = context.with_fragment(Fragment::ValuesRow);
        separated_by(
            out,
            rows,
            |out, row| {
                if !matches!(row, Value::List(..)) {
                    return Err(invalid(format!(
                        "expects every row to be a list, got {}",
                        row.kind_name()
                    )));
                }
                out.push('(');
                self.write_in_list(&mut context, out, row)?;
                out.push(')');
                Ok(())
            },
            ",",
        )
    }

    /// Render the keyed multi-row rule: a quoted column list taken from the
    /// first row, then VALUES groups with every row reordered to it.
    fn write_key_value_rows(
        &self,
        context: &mut Context,
        out: &mut String,
        value: &Value,
    ) -> Result<()> {
        let invalid = |reason: String| Error::InvalidFormat {
            kind: PlaceholderKind::KeyValueRows,
            reason,
        };
        let Value::List(rows) = value else {
            return Err(invalid(format!(
                "expects a list of keyed rows, got {}",
                value.kind_name()
            )));
        };
        let Some(Value::Map(columns)) = rows.first() else {
            return Err(invalid(match rows.first() {
                None => "expects at least one row".into(),
                Some(row) => format!("expects keyed rows, got {}", row.kind_name()),
            }));
        };
        if columns.is_empty() {
            return Err(invalid("expects at least one column".into()));
        }
        for (i, (key, _)) in columns.iter().enumerate() {
            if columns[..i].iter().any(|(earlier, _)| earlier == key) {
                return Err(invalid(format!("column `{key}` appears more than once")));
            }
        }
        out.push('(');
        let mut list_context = context.with_fragment(Fragment::ColumnList);
        separated_by(
            out,
            columns,
            |out, (key, _)| self.write_identifier(&mut list_context, out, key),
            ",",
        )?;
        out.push_str(") VALUES ");
        let mut row_context = context.with_fragment(Fragment::ValuesRow);
        separated_by(
            out,
            rows.iter().enumerate(),
            |out, (i, row)| {
                let Value::Map(pairs) = row else {
                    return Err(invalid(format!(
                        "expects keyed rows, got {} at row {i}",
                        row.kind_name()
                    )));
                };
                if pairs.len() != columns.len() {
                    return Err(Error::InconsistentRows {
                        row: i,
                        reason: format!(
                            "has {} columns where the first row has {}",
                            pairs.len(),
                            columns.len()
                        ),
                    });
                }
                out.push('(');
                separated_by(
                    out,
                    columns,
                    |out, (key, _)| {
                        let Some((_, v)) = pairs.iter().find(|(k, _)| k == key) else {
                            return Err(Error::InconsistentRows {
                                row: i,
                                reason: format!("is missing column `{key}`"),
                            });
                        };
                        self.write_value_string(
                            &mut row_context,
                            out,
                            v,
                            PlaceholderKind::KeyValueRows,
                        )
                    },
                    ",",
                )?;
                out.push(')');
                Ok(())
            },
            ",",
        )
    }

    /// Render the raw splice rule.
    fn write_parsed(&self, _context: &mut Context, out: &mut String, value: &Value) -> Result<()> {
        let Value::Raw(sql) = value else {
            return Err(Error::InvalidFormat {
                kind: PlaceholderKind::Parsed,
                reason: format!("expects a raw fragment, got {}", value.kind_name()),
            });
        };
        out.push_str(sql);
        Ok(())
    }

    /// Dispatch a bound value through the rule its placeholder declares.
    fn write_placeholder(
        &self,
        context: &mut Context,
        out: &mut String,
        kind: PlaceholderKind,
        value: &Value,
    ) -> Result<()> {
        match kind {
            PlaceholderKind::Str => self.write_value_string(context, out, value, kind),
            PlaceholderKind::Int => self.write_value_integer(context, out, value),
            PlaceholderKind::Identifier => match value {
                Value::Varchar(v) => self.write_identifier(context, out, v),
                Value::Null => Err(Error::EmptyIdentifier),
                other => Err(Error::InvalidFormat {
                    kind,
                    reason: format!("expects a string, got {}", other.kind_name()),
                }),
            },
            PlaceholderKind::InList => self.write_in_list(context, out, value),
            PlaceholderKind::SetClause => self.write_set_clause(context, out, value),
            PlaceholderKind::ValuesRows => self.write_values_rows(context, out, value),
            PlaceholderKind::KeyValueRows => self.write_key_value_rows(context, out, value),
            PlaceholderKind::Parsed => self.write_parsed(context, out, value),
        }
    }
}

fn parse_integer_text(text: &str) -> Option<i64> {
    let bytes = text.as_bytes();
    let (parsed, consumed) = i64::from_radix_10_signed_checked(bytes);
    if let Some(n) = parsed {
        if consumed == bytes.len() && bytes.iter().any(|b| b.is_ascii_digit()) {
            return Some(n);
        }
    }
    // the fractional part is dropped, matching the float rule
    fast_float::parse::<f64, _>(text).ok().map(|f| f.trunc() as i64)
}

/// ANSI-flavored writer, the fallback when a driver has no quirks to encode.
#[derive(Debug, Clone, Copy, Default)]
pub struct GenericSqlWriter;

impl GenericSqlWriter {
    pub const fn new() -> Self {
        Self {}
    }
}

impl SqlWriter for GenericSqlWriter {}

/// MySQL-flavored writer: backtick identifiers and backslash escaping, the
/// character set `mysql_real_escape_string` covers.
#[derive(Debug, Clone, Copy, Default)]
pub struct MySqlSqlWriter;

impl MySqlSqlWriter {
    pub const fn new() -> Self {
        Self {}
    }
}

impl SqlWriter for MySqlSqlWriter {
    fn quote_rules(&self) -> QuoteRules {
        QuoteRules {
            quotes: vec!['\'', '"', '`'],
            backslash_escapes: true,
        }
    }

    fn identifier_quote(&self) -> char {
        '`'
    }

    fn write_string_literal(&self, _context: &mut Context, out: &mut String, value: &str) {
        out.push('\'');
        for c in value.chars() {
            match c {
                '\'' => out.push_str("\\'"),
                '"' => out.push_str("\\\""),
                '\\' => out.push_str("\\\\"),
                '\n' => out.push_str("\\n"),
                '\r' => out.push_str("\\r"),
                '\0' => out.push_str("\\0"),
                '\x1a' => out.push_str("\\Z"),
                _ => out.push(c),
            }
        }
        out.push('\'');
    }
}
