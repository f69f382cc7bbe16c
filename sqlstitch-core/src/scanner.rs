use crate::{Error, Result};
use std::fmt::{self, Display};

/// Kind code of a placeholder, the character following the `?` marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceholderKind {
    /// `?s`: quoted and escaped string literal.
    Str,
    /// `?i`: base-10 integer literal.
    Int,
    /// `?n`: quoted identifier.
    Identifier,
    /// `?a`: comma-joined IN list.
    InList,
    /// `?u`: comma-joined SET assignments.
    SetClause,
    /// `?m`: multi-row VALUES groups.
    ValuesRows,
    /// `?k`: column list plus VALUES rows taken from keyed rows.
    KeyValueRows,
    /// `?p`: previously rendered fragment spliced verbatim.
    Parsed,
}

impl PlaceholderKind {
    pub fn from_sigil(sigil: char) -> Option<Self> {
        Some(match sigil {
            's' => Self::Str,
            'i' => Self::Int,
            'n' => Self::Identifier,
            'a' => Self::InList,
            'u' => Self::SetClause,
            'm' => Self::ValuesRows,
            'k' => Self::KeyValueRows,
            'p' => Self::Parsed,
            _ => return None,
        })
    }

    pub fn sigil(&self) -> char {
        match self {
            Self::Str => 's',
            Self::Int => 'i',
            Self::Identifier => 'n',
            Self::InList => 'a',
            Self::SetClause => 'u',
            Self::ValuesRows => 'm',
            Self::KeyValueRows => 'k',
            Self::Parsed => 'p',
        }
    }
}

impl Display for PlaceholderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "?{}", self.sigil())
    }
}

/// A placeholder occurrence inside a template.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placeholder<'t> {
    pub kind: PlaceholderKind,
    /// Lookup key in named mode, captured from a `?s:name` form.
    pub name: Option<&'t str>,
    /// Byte offset of the `?` marker in the template.
    pub offset: usize,
}

/// One piece of a scanned template, in source order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Segment<'t> {
    Literal(&'t str),
    Placeholder(Placeholder<'t>),
}

/// Quoting rules of the active dialect, honored while scanning so a sigil
/// inside a string or identifier literal is never taken for a placeholder.
#[derive(Debug, Clone, PartialEq)]
pub struct QuoteRules {
    /// Characters that open and close a quoted span. A doubled occurrence of
    /// the active quote always stays inside the span.
    pub quotes: Vec<char>,
    /// Whether a backslash escapes the next character inside a span.
    pub backslash_escapes: bool,
}

impl Default for QuoteRules {
    fn default() -> Self {
        Self {
            quotes: vec!['\'', '"'],
            backslash_escapes: false,
        }
    }
}

/// Split a template into alternating literal and placeholder segments.
///
/// Single left-to-right pass. Every `?` outside a quoted span must begin a
/// valid sigil: passing an untyped `?` through silently would reintroduce the
/// ambiguity this layer exists to remove.
pub fn scan<'t>(template: &'t str, rules: &QuoteRules) -> Result<Vec<Segment<'t>>> {
    let mut segments = Vec::new();
    let mut literal_start = 0;
    let mut pos = 0;
    while let Some(c) = template[pos..].chars().next() {
        if rules.quotes.contains(&c) {
            let span_start = pos;
            pos += c.len_utf8();
            let mut closed = false;
            while let Some(d) = template[pos..].chars().next() {
                pos += d.len_utf8();
                if rules.backslash_escapes && d == '\\' {
                    if let Some(escaped) = template[pos..].chars().next() {
                        pos += escaped.len_utf8();
                    }
                } else if d == c {
                    if template[pos..].starts_with(c) {
                        // doubled quote, still inside the span
                        pos += c.len_utf8();
                    } else {
                        closed = true;
                        break;
                    }
                }
            }
            if !closed {
                return Err(Error::MalformedTemplate {
                    reason: format!("unterminated {c} quote"),
                    offset: span_start,
                });
            }
        } else if c == '?' {
            if literal_start < pos {
                segments.push(Segment::Literal(&template[literal_start..pos]));
            }
            let marker = pos;
            let sigil = template[pos + 1..].chars().next();
            let Some(kind) = sigil.and_then(PlaceholderKind::from_sigil) else {
                return Err(Error::UnknownPlaceholderKind {
                    sigil: sigil.map(String::from).unwrap_or_default(),
                    offset: marker,
                });
            };
            pos += 2; // the marker and the ASCII kind code
            let mut name = None;
            if let Some(tail) = template[pos..].strip_prefix(':') {
                let len = tail
                    .chars()
                    .take_while(|&c| c.is_ascii_alphanumeric() || c == '_')
                    .count();
                if len > 0 && !tail.starts_with(|c: char| c.is_ascii_digit()) {
                    name = Some(&tail[..len]);
                    pos += 1 + len;
                }
            }
            segments.push(Segment::Placeholder(Placeholder {
                kind,
                name,
                offset: marker,
            }));
            literal_start = pos;
        } else {
            pos += c.len_utf8();
        }
    }
    if literal_start < template.len() {
        segments.push(Segment::Literal(&template[literal_start..]));
    }
    Ok(segments)
}
