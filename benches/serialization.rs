use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use serde::Serialize;
use serde_foam::{foam, from_json_str, from_yaml_str, to_lines, to_string, Case, FoamMap, FoamValue, Format};

const CAVITY: &str = include_str!("../demos/cavity.yaml");

#[derive(Serialize, Clone)]
struct Solver {
    solver: String,
    preconditioner: String,
    tolerance: f64,
    #[serde(rename = "relTol")]
    rel_tol: f64,
}

fn block_mesh(cells: usize) -> FoamValue {
    let vertices: Vec<FoamValue> = (0..cells)
        .map(|i| FoamValue::from(format!("({} {} 0)", i % 20, i / 20)))
        .collect();
    let boundary: Vec<FoamValue> = (0..cells / 10)
        .map(|i| {
            let mut patch = FoamMap::new();
            patch.insert(format!("patch{}", i), FoamValue::Null);
            patch.insert("type".to_string(), FoamValue::from("wall"));
            patch.insert("faces".to_string(), foam!(["(0 4 7 3)", "(2 6 5 1)"]));
            FoamValue::Object(patch)
        })
        .collect();
    foam!({
        "convertToMeters": 0.1,
        "vertices": vertices,
        "boundary": boundary
    })
}

fn benchmark_render_struct(c: &mut Criterion) {
    let solver = Solver {
        solver: "PCG".to_string(),
        preconditioner: "DIC".to_string(),
        tolerance: 1e-6,
        rel_tol: 0.05,
    };

    c.bench_function("render_struct", |b| b.iter(|| to_string(black_box(&solver))));
}

fn benchmark_render_cavity_files(c: &mut Criterion) {
    let case = Case::from_str(CAVITY, Format::Yaml, ".").unwrap();
    let files = case.extract_files();

    let mut group = c.benchmark_group("render_cavity");
    for (keys, file) in &files {
        let name = keys.join("/");
        let value = FoamValue::Object(file.clone());
        group.bench_with_input(BenchmarkId::from_parameter(&name), &value, |b, value| {
            b.iter(|| to_lines(black_box(value)))
        });
    }
    group.finish();
}

fn benchmark_render_block_mesh(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_block_mesh");

    for size in [10, 100, 1000].iter() {
        let value = block_mesh(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &value, |b, value| {
            b.iter(|| to_lines(black_box(value)))
        });
    }
    group.finish();
}

fn benchmark_load_case(c: &mut Criterion) {
    let mut group = c.benchmark_group("load_case");

    group.bench_function("yaml", |b| b.iter(|| from_yaml_str(black_box(CAVITY))));

    let docs = from_yaml_str(CAVITY).unwrap();
    let json = serde_json::to_string(&docs).unwrap();
    group.bench_function("json", |b| b.iter(|| from_json_str(black_box(&json))));

    group.bench_function("extract_files", |b| {
        let case = Case::from_str(CAVITY, Format::Yaml, ".").unwrap();
        b.iter(|| black_box(&case).extract_files())
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_render_struct,
    benchmark_render_cavity_files,
    benchmark_render_block_mesh,
    benchmark_load_case
);
criterion_main!(benches);
