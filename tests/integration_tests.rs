use serde::Serialize;
use serde_foam::{
    foam, format_key, format_value, from_json_str, from_yaml_str, render_mapping, to_lines,
    to_string, to_value, to_writer, Error, FoamValue, Number, Serializer,
};

#[derive(Serialize)]
struct Patch {
    #[serde(rename = "type")]
    kind: String,
    value: Option<String>,
}

#[derive(Serialize)]
struct FvSolution {
    solvers: Solvers,
    #[serde(rename = "PISO")]
    piso: Piso,
}

#[derive(Serialize)]
struct Solvers {
    p: Solver,
}

#[derive(Serialize)]
struct Solver {
    solver: String,
    tolerance: f64,
    #[serde(rename = "relTol")]
    rel_tol: f64,
}

#[derive(Serialize)]
struct Piso {
    #[serde(rename = "nCorrectors")]
    n_correctors: u32,
    #[serde(rename = "pRefCell")]
    p_ref_cell: u32,
}

fn cavity_u() -> FoamValue {
    foam!({
        "FoamFile": { "version": 2.0, "format": "ascii", "class": "volVectorField", "object": "U" },
        "dimensions": "[0 1 -1 0 0 0 0]",
        "internalField": "uniform (0 0 0)",
        "boundaryField": {
            "movingWall": { "type": "fixedValue", "value": "uniform (1 0 0)" },
            "fixedWalls": { "type": "noSlip" },
            "frontAndBack": { "type": "empty" }
        }
    })
}

#[test]
fn test_cavity_velocity_file() {
    let lines = render_mapping(cavity_u().as_object().unwrap()).unwrap();
    assert_eq!(
        lines,
        vec![
            "FoamFile {version 2.0; format ascii; class volVectorField; object U;}",
            "dimensions [0 1 -1 0 0 0 0];",
            "internalField uniform (0 0 0);",
            "boundaryField {movingWall {type fixedValue; value uniform (1 0 0);} fixedWalls {type noSlip;} frontAndBack {type empty;}}",
        ]
    );
}

#[test]
fn test_mixed_top_level() {
    let data = foam!({ "a": [true, false], "b": 1, "c": { "d": "e" } });
    assert_eq!(
        to_string(&data).unwrap(),
        "a (true false);\nb 1;\nc {d e;}"
    );
}

#[test]
fn test_key_quoting() {
    assert_eq!(format_key("div ( phi , U )"), "\"div(phi,U)\"");
    assert_eq!(format_key("dimensions"), "dimensions");
    assert_eq!(format_key("(U|k|epsilon)"), "\"(U|k|epsilon)\"");
    assert_eq!(format_key("wall*"), "\"wall*\"");
}

#[test]
fn test_fv_schemes_keys() {
    let schemes = foam!({
        "divSchemes": {
            "default": "none",
            "div(phi, U)": "Gauss linear",
            "div((nuEff*dev2(T(grad(U)))))": "Gauss linear"
        }
    });
    let lines = to_lines(&schemes).unwrap();
    assert_eq!(
        lines,
        vec![
            "divSchemes {default none; \"div(phi,U)\" Gauss linear; \"div((nuEff*dev2(T(grad(U)))))\" Gauss linear;}"
        ]
    );
}

#[test]
fn test_block_mesh_lists() {
    let block_mesh = foam!({
        "convertToMeters": 0.1,
        "vertices": ["(0 0 0)", "(1 0 0)", "(1 1 0)", "(0 1 0)"],
        "blocks": ["hex (0 1 2 3 4 5 6 7) (20 20 1) simpleGrading (1 1 1)"],
        "edges": [],
        "boundary": [
            { "movingWall": null, "type": "wall", "faces": ["(3 7 6 2)"] },
            { "frontAndBack": null, "type": "empty", "faces": ["(0 3 2 1)", "(4 5 6 7)"] }
        ],
        "mergePatchPairs": []
    });
    let lines = to_lines(&block_mesh).unwrap();
    assert_eq!(lines[0], "convertToMeters 0.1;");
    assert_eq!(lines[1], "vertices ((0 0 0) (1 0 0) (1 1 0) (0 1 0));");
    assert_eq!(lines[3], "edges ();");
    assert_eq!(
        lines[4],
        "boundary (movingWall {type wall; faces ((3 7 6 2));} frontAndBack {type empty; faces ((0 3 2 1) (4 5 6 7));});"
    );
    assert_eq!(lines.len(), 6);
}

#[test]
fn test_struct_input() {
    let solution = FvSolution {
        solvers: Solvers {
            p: Solver {
                solver: "PCG".to_string(),
                tolerance: 1e-6,
                rel_tol: 0.05,
            },
        },
        piso: Piso {
            n_correctors: 2,
            p_ref_cell: 0,
        },
    };
    let lines = to_lines(&solution).unwrap();
    assert_eq!(
        lines,
        vec![
            "solvers {p {solver PCG; tolerance 1e-6; relTol 0.05;}}",
            "PISO {nCorrectors 2; pRefCell 0;}",
        ]
    );
}

#[test]
fn test_struct_with_none_field_is_rejected() {
    let patch = Patch {
        kind: "zeroGradient".to_string(),
        value: None,
    };
    match to_lines(&patch).unwrap_err() {
        Error::UnsupportedValueKind { kind, path, value } => {
            assert_eq!(kind, "null");
            assert_eq!(path, "value");
            assert_eq!(value, "null");
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn test_to_value_numbers() {
    assert_eq!(to_value(&3u8).unwrap(), FoamValue::Number(Number::Integer(3)));
    assert_eq!(to_value(&0.5f32).unwrap(), FoamValue::Number(Number::Float(0.5)));
    assert_eq!(
        to_value(&u64::MAX).unwrap(),
        FoamValue::Number(Number::Float(u64::MAX as f64))
    );
}

#[test]
fn test_to_writer_appends_newline() {
    let mut buffer = Vec::new();
    to_writer(&mut buffer, &cavity_u()).unwrap();
    let text = String::from_utf8(buffer).unwrap();
    assert!(text.ends_with("frontAndBack {type empty;}}\n"));
    assert_eq!(text.matches('\n').count(), 4);
    assert!(!text.contains('\r'));
}

#[test]
fn test_yaml_and_json_render_identically() {
    let yaml = from_yaml_str(
        "dimensions: '[0 0 0 0 0 0 0]'\nboundaryField:\n  inlet: {type: zeroGradient}\nvalues: [1, 2.5, on]\n",
    )
    .unwrap();
    let json = from_json_str(
        r#"{"dimensions": "[0 0 0 0 0 0 0]", "boundaryField": {"inlet": {"type": "zeroGradient"}}, "values": [1, 2.5, "on"]}"#,
    )
    .unwrap();
    let yaml_lines = to_lines(&yaml[0]).unwrap();
    let json_lines = to_lines(&json[0]).unwrap();
    assert_eq!(yaml_lines, json_lines);
    assert_eq!(yaml_lines[2], "values (1 2.5 on);");
}

#[test]
fn test_yaml_boolean_stays_boolean() {
    let docs = from_yaml_str("runTimeModifiable: true\nwriteCompression: off\n").unwrap();
    let lines = to_lines(&docs[0]).unwrap();
    assert_eq!(lines, vec!["runTimeModifiable true;", "writeCompression off;"]);
}

#[test]
fn test_yaml_head_labels() {
    let docs = from_yaml_str(
        "boundary:\n  - movingWall:\n    type: wall\n    faces: ['(3 7 6 2)']\n  - type: empty\n",
    )
    .unwrap();
    assert_eq!(
        to_lines(&docs[0]).unwrap(),
        vec!["boundary (movingWall {type wall; faces ((3 7 6 2));} {type empty;});"]
    );
}

#[test]
fn test_errors_do_not_partially_render() {
    let data = foam!({ "a": 1, "b": [{ "x": null, "y": null }], "c": 3 });
    let err = to_string(&data).unwrap_err();
    assert!(matches!(err, Error::MalformedListElement { .. }));
    assert!(err.to_string().contains("b/0"));
}

#[test]
fn test_format_value_matches_serializer() {
    let value = foam!([{ "a": null, "b": "c" }, { "d": "e" }]);
    assert_eq!(format_value(&value).unwrap(), "(a {b c;} {d e;});");
    assert_eq!(
        Serializer::new().format_value(&value).unwrap(),
        format_value(&value).unwrap()
    );
}

#[test]
fn test_render_in_threads() {
    let data = std::sync::Arc::new(cavity_u());
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let data = data.clone();
            std::thread::spawn(move || to_lines(&*data).unwrap())
        })
        .collect();
    let expected = to_lines(&*data).unwrap();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}

#[test]
fn test_to_writer_has_no_carriage_returns() {
    let mut buffer = Vec::new();
    to_writer(&mut buffer, &foam!({ "a": "x\r\ny" })).unwrap();
    assert_eq!(String::from_utf8(buffer).unwrap(), "a x\ny;\n");
}
