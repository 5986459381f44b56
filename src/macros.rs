/// Builds a [`FoamValue`](crate::FoamValue) from JSON-like literal syntax.
///
/// `null` produces the head-label marker, objects keep the order their keys
/// are written in.
///
/// ```rust
/// use serde_foam::{foam, FoamValue};
///
/// let patches = foam!([
///     { "inlet": null, "type": "patch" },
///     { "type": "wall" }
/// ]);
/// assert!(patches.is_array());
/// ```
#[macro_export]
macro_rules! foam {
    // Handle null
    (null) => {
        $crate::FoamValue::Null
    };

    // Handle true
    (true) => {
        $crate::FoamValue::Bool(true)
    };

    // Handle false
    (false) => {
        $crate::FoamValue::Bool(false)
    };

    // Handle empty array
    ([]) => {
        $crate::FoamValue::Array(vec![])
    };

    // Handle non-empty array
    ([ $($elem:tt),* $(,)? ]) => {
        $crate::FoamValue::Array(vec![$($crate::foam!($elem)),*])
    };

    // Handle empty object
    ({}) => {
        $crate::FoamValue::Object($crate::FoamMap::new())
    };

    // Handle non-empty object
    ({ $($key:literal : $value:tt),* $(,)? }) => {{
        let mut object = $crate::FoamMap::new();
        $(
            object.insert($key.to_string(), $crate::foam!($value));
        )*
        $crate::FoamValue::Object(object)
    }};

    // Any other expression goes through serde
    ($s:expr) => {{
        $crate::to_value(&$s).unwrap_or($crate::FoamValue::Null)
    }};
}

#[cfg(test)]
mod tests {
    use crate::{FoamMap, FoamValue, Number};

    #[test]
    fn test_foam_macro_primitives() {
        assert_eq!(foam!(null), FoamValue::Null);
        assert_eq!(foam!(true), FoamValue::Bool(true));
        assert_eq!(foam!(false), FoamValue::Bool(false));
        assert_eq!(foam!(42), FoamValue::Number(Number::Integer(42)));
        assert_eq!(foam!(3.5), FoamValue::Number(Number::Float(3.5)));
        assert_eq!(foam!("hello"), FoamValue::String("hello".to_string()));
    }

    #[test]
    fn test_foam_macro_negative() {
        // `-1` is two tokens, so the whole array goes through serde
        assert_eq!(
            foam!([-1, 2]),
            FoamValue::Array(vec![FoamValue::from(-1), FoamValue::from(2)])
        );
    }

    #[test]
    fn test_foam_macro_arrays() {
        assert_eq!(foam!([]), FoamValue::Array(vec![]));

        match foam!([1, 2, 3]) {
            FoamValue::Array(vec) => {
                assert_eq!(vec.len(), 3);
                assert_eq!(vec[0], FoamValue::Number(Number::Integer(1)));
                assert_eq!(vec[2], FoamValue::Number(Number::Integer(3)));
            }
            _ => panic!("Expected array"),
        }
    }

    #[test]
    fn test_foam_macro_objects() {
        assert_eq!(foam!({}), FoamValue::Object(FoamMap::new()));

        match foam!({ "type": "noSlip", "inGroups": ["wall"] }) {
            FoamValue::Object(map) => {
                let keys: Vec<_> = map.keys().cloned().collect();
                assert_eq!(keys, vec!["type", "inGroups"]);
                assert_eq!(map.get("type"), Some(&FoamValue::from("noSlip")));
            }
            _ => panic!("Expected object"),
        }
    }
}
