use crate::PlaceholderKind;

/// Everything that can go wrong between a template and its final SQL string.
///
/// Rendering failures carry enough position/shape information to point at the
/// offending placeholder; [`Error::Execution`] additionally carries the fully
/// rendered statement so the failing SQL can be inspected as the server saw it.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// The template cannot be scanned, typically an unterminated quoted span.
    #[error("sqlstitch: malformed template, {reason} at byte {offset}")]
    MalformedTemplate { reason: String, offset: usize },

    /// A `?` marker followed by something outside the supported sigil set.
    #[error("sqlstitch: unknown placeholder `?{sigil}` at byte {offset}")]
    UnknownPlaceholderKind { sigil: String, offset: usize },

    /// Placeholders and supplied arguments do not reconcile.
    #[error("sqlstitch: {reason}")]
    ArityMismatch { reason: String },

    /// A value whose shape the placeholder kind cannot represent.
    #[error("sqlstitch: `{kind}` placeholder {reason}")]
    InvalidFormat {
        kind: PlaceholderKind,
        reason: String,
    },

    /// An identifier placeholder bound to an empty string or null.
    #[error("sqlstitch: `?n` placeholder requires a non-empty string")]
    EmptyIdentifier,

    /// Keyed multi-row input whose rows disagree on the column set.
    #[error("sqlstitch: row {row} {reason}")]
    InconsistentRows { row: usize, reason: String },

    /// The collaborating client refused a connection.
    #[error("sqlstitch: cannot connect: {message}")]
    Connect { message: String },

    /// The collaborating client failed to execute the rendered statement.
    #[error("sqlstitch: execution failed: {message}\nwhile running:\n{sql}")]
    Execution { message: String, sql: String },

    /// Any of the above, tagged with the call site that reached the engine.
    #[error("sqlstitch ({site}): {source}")]
    Located {
        site: String,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    pub fn execution(sql: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Execution {
            message: message.into(),
            sql: sql.into(),
        }
    }

    /// Wrap the error with a caller-supplied site string.
    ///
    /// This is the explicit alternative to call-stack introspection: callers
    /// that want "error initiated at ..." diagnostics pass the location in.
    pub fn located(self, site: impl Into<String>) -> Self {
        Error::Located {
            site: site.into(),
            source: Box::new(self),
        }
    }
}
