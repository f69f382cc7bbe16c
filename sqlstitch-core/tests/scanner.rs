#[cfg(test)]
mod tests {
    use sqlstitch_core::{
        Error, MySqlSqlWriter, Placeholder, PlaceholderKind, QuoteRules, Segment, SqlWriter, scan,
    };

    #[test]
    fn scan_positional() {
        let segments = scan("SELECT * FROM ?n WHERE id=?i", &QuoteRules::default()).unwrap();
        assert_eq!(
            segments,
            vec![
                Segment::Literal("SELECT * FROM "),
                Segment::Placeholder(Placeholder {
                    kind: PlaceholderKind::Identifier,
                    name: None,
                    offset: 14,
                }),
                Segment::Literal(" WHERE id="),
                Segment::Placeholder(Placeholder {
                    kind: PlaceholderKind::Int,
                    name: None,
                    offset: 26,
                }),
            ]
        );
    }

    #[test]
    fn scan_adjacent_placeholders() {
        let segments = scan("?s?i?p", &QuoteRules::default()).unwrap();
        assert_eq!(segments.len(), 3);
        assert!(segments.iter().all(|s| matches!(s, Segment::Placeholder(..))));
    }

    #[test]
    fn scan_skips_quoted_spans() {
        let segments = scan(
            "SELECT '?s' FROM t WHERE a=?i",
            &QuoteRules::default(),
        )
        .unwrap();
        assert_eq!(
            segments,
            vec![
                Segment::Literal("SELECT '?s' FROM t WHERE a="),
                Segment::Placeholder(Placeholder {
                    kind: PlaceholderKind::Int,
                    name: None,
                    offset: 27,
                }),
            ]
        );
    }

    #[test]
    fn scan_doubled_quote_stays_inside_span() {
        let segments = scan("SELECT 'it''s ?s here' FROM t", &QuoteRules::default()).unwrap();
        assert_eq!(segments, vec![Segment::Literal("SELECT 'it''s ?s here' FROM t")]);
    }

    #[test]
    fn scan_backslash_escape_keeps_span_open() {
        let rules = MySqlSqlWriter::new().quote_rules();
        let segments = scan(r"SELECT 'don\'t ?p' FROM t WHERE id=?i", &rules).unwrap();
        assert_eq!(
            segments,
            vec![
                Segment::Literal(r"SELECT 'don\'t ?p' FROM t WHERE id="),
                Segment::Placeholder(Placeholder {
                    kind: PlaceholderKind::Int,
                    name: None,
                    offset: 35,
                }),
            ]
        );
    }

    #[test]
    fn scan_backtick_span_needs_mysql_rules() {
        let rules = MySqlSqlWriter::new().quote_rules();
        let segments = scan("SELECT `a?b` FROM t", &rules).unwrap();
        assert_eq!(segments, vec![Segment::Literal("SELECT `a?b` FROM t")]);
        // under ANSI rules the backtick is no quote, so ?b is scanned and rejected
        let error = scan("SELECT `a?b` FROM t", &QuoteRules::default()).unwrap_err();
        assert_eq!(
            error,
            Error::UnknownPlaceholderKind {
                sigil: "b".into(),
                offset: 9,
            }
        );
    }

    #[test]
    fn scan_unterminated_quote() {
        let error = scan("SELECT 'abc FROM t", &QuoteRules::default()).unwrap_err();
        assert_eq!(
            error,
            Error::MalformedTemplate {
                reason: "unterminated ' quote".into(),
                offset: 7,
            }
        );
    }

    #[test]
    fn scan_trailing_marker() {
        let error = scan("WHERE a=?", &QuoteRules::default()).unwrap_err();
        assert_eq!(
            error,
            Error::UnknownPlaceholderKind {
                sigil: String::new(),
                offset: 8,
            }
        );
    }

    #[test]
    fn scan_named_placeholders() {
        let segments = scan("WHERE id=?i:id AND name=?s:who", &QuoteRules::default()).unwrap();
        let names = segments
            .iter()
            .filter_map(|s| match s {
                Segment::Placeholder(p) => Some(p.name),
                Segment::Literal(..) => None,
            })
            .collect::<Vec<_>>();
        assert_eq!(names, vec![Some("id"), Some("who")]);
    }

    #[test]
    fn scan_name_must_not_start_with_digit() {
        let segments = scan("LIMIT ?i:1x", &QuoteRules::default()).unwrap();
        assert_eq!(
            segments,
            vec![
                Segment::Literal("LIMIT "),
                Segment::Placeholder(Placeholder {
                    kind: PlaceholderKind::Int,
                    name: None,
                    offset: 6,
                }),
                Segment::Literal(":1x"),
            ]
        );
    }
}
