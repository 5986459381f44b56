use serde_foam::{foam, to_lines, FoamMap, FoamValue, Number};

#[test]
fn test_foam_macro_null() {
    let value = foam!(null);
    assert_eq!(value, FoamValue::Null);
    assert!(value.is_null());
}

#[test]
fn test_foam_macro_booleans() {
    assert_eq!(foam!(true), FoamValue::Bool(true));
    assert_eq!(foam!(false), FoamValue::Bool(false));
}

#[test]
fn test_foam_macro_numbers() {
    assert_eq!(foam!(20), FoamValue::Number(Number::Integer(20)));
    assert_eq!(foam!(0.005), FoamValue::Number(Number::Float(0.005)));
    assert_eq!(foam!(-1), FoamValue::Number(Number::Integer(-1)));
}

#[test]
fn test_foam_macro_strings() {
    assert_eq!(foam!("uniform 0"), FoamValue::String("uniform 0".to_string()));
}

#[test]
fn test_foam_macro_nested() {
    let value = foam!({
        "boundaryField": {
            "inlet": { "type": "fixedValue", "value": "uniform (1 0 0)" },
            "outlet": { "type": "zeroGradient" }
        }
    });
    let inlet = value.pointer(&["boundaryField", "inlet", "type"]).unwrap();
    assert_eq!(inlet.as_str(), Some("fixedValue"));
}

#[test]
fn test_foam_macro_head_labels() {
    let value = foam!({
        "boundary": [
            { "inlet": null, "type": "patch" },
            { "type": "wall" }
        ]
    });
    assert_eq!(
        to_lines(&value).unwrap(),
        vec!["boundary (inlet {type patch;} {type wall;});"]
    );
}

#[test]
fn test_foam_macro_expressions() {
    let n_cells = 20;
    let value = foam!(n_cells * 2);
    assert_eq!(value, FoamValue::from(40));

    let names = vec!["U", "p"];
    assert_eq!(foam!(names), foam!(["U", "p"]));
}

#[test]
fn test_foam_macro_object_order() {
    let value = foam!({ "z": 1, "a": 2, "m": 3 });
    let keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
    assert_eq!(keys, vec!["z", "a", "m"]);
    assert_eq!(foam!({}), FoamValue::Object(FoamMap::new()));
}
