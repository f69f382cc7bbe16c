#[cfg(test)]
mod tests {
    use sqlstitch_core::Value;

    #[test]
    fn value_from_scalars() {
        assert_eq!(Value::from(42_i32), Value::Integer(42));
        assert_eq!(Value::from(7_u8), Value::Integer(7));
        assert_eq!(Value::from(-1_i64), Value::Integer(-1));
        assert_eq!(Value::from(1.5_f64), Value::Float(1.5));
        assert_eq!(Value::from("abc"), Value::Varchar("abc".into()));
        assert_eq!(Value::from(String::from("abc")), Value::Varchar("abc".into()));
    }

    #[test]
    fn value_from_option() {
        assert_eq!(Value::from(None::<i32>), Value::Null);
        assert_eq!(Value::from(Some(3)), Value::Integer(3));
        assert!(Value::Null.is_null());
        assert!(!Value::Integer(0).is_null());
    }

    #[test]
    fn value_from_vec() {
        assert_eq!(
            Value::from(vec![1, 2]),
            Value::List(vec![Value::Integer(1), Value::Integer(2)])
        );
        assert_eq!(
            Value::list(["a", "b"]),
            Value::List(vec![Value::Varchar("a".into()), Value::Varchar("b".into())])
        );
    }

    #[test]
    fn value_map_preserves_insertion_order() {
        let map = Value::map([("name", Value::from("Bob")), ("age", Value::from(5))]);
        let Value::Map(pairs) = map else {
            panic!("expected a map");
        };
        assert_eq!(pairs[0].0, "name");
        assert_eq!(pairs[1].0, "age");
    }

    #[test]
    fn value_kind_names() {
        assert_eq!(Value::Null.kind_name(), "null");
        assert_eq!(Value::raw("NOW()").kind_name(), "a raw fragment");
        assert_eq!(Value::list([1]).kind_name(), "a list");
        assert_eq!(Value::map([("a", Value::Null)]).kind_name(), "a map");
    }
}
