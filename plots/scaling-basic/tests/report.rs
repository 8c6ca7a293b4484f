use std::fs;

use common::{
    config::{AxisMode, Config},
    report::{render_report, write_report},
    series::extract,
    table::MeasurementTable,
};
use scaling_basic::default_plots;

const METRICS: &str = "\
Modelo,Máscara,Processos/Threads,Tempo (s),Speedup,Eficiência
Sequencial,3x3,-,10.0,1.0,1.0
MPI,3x3,1,10.0,1.0,1.0
MPI,3x3,2,5.0,2.0,1.0
OpenMP,3x3,2,6.0,1.8,0.9
MPI,5x5,4,7.5,3.2,0.8
OpenMP,5x5,8,4.0,6.4,0.8
CUDA,5x5,64,0.1,99.0,1.5
MPI,9x9,2,1.0,1.9,0.95
";

fn generate(config: &Config) -> String {
    let table = MeasurementTable::from_path(&config.input, &config.settings).unwrap();
    let series = extract(&table, &config.settings);
    let html = render_report(config, &default_plots(), &series).unwrap();
    write_report(&config.output, &html).unwrap();
    fs::read_to_string(&config.output).unwrap()
}

fn config_in(dir: &std::path::Path) -> Config {
    let input = dir.join("performance_metrics.csv");
    fs::write(&input, METRICS).unwrap();
    Config {
        input,
        output: dir.join("out").join("performance_graphs.html"),
        ..Config::default()
    }
}

#[test]
fn six_charts_for_three_categories() {
    let dir = tempfile::tempdir().unwrap();
    let html = generate(&config_in(dir.path()));

    assert_eq!(html.matches("<canvas id=").count(), 6);
    assert_eq!(html.matches("new Chart(").count(), 6);
    for id in [
        "speedup_3x3",
        "eficiencia_3x3",
        "speedup_5x5",
        "eficiencia_5x5",
        "speedup_7x7",
        "eficiencia_7x7",
    ] {
        assert!(html.contains(&format!(r#"<canvas id="{id}"></canvas>"#)), "{id}");
    }
    assert!(html.find("speedup_3x3") < html.find("eficiencia_3x3"));
    assert!(html.find("eficiencia_3x3") < html.find("speedup_5x5"));
}

#[test]
fn skipped_rows_never_reach_the_report() {
    let dir = tempfile::tempdir().unwrap();
    let html = generate(&config_in(dir.path()));

    assert!(!html.contains("Sequencial"));
    assert!(!html.contains("CUDA"));
    assert!(!html.contains("99.0"));
    assert!(!html.contains("9x9"));
    assert!(!html.contains("0.95"));
}

#[test]
fn series_and_ideal_lines_in_output() {
    let dir = tempfile::tempdir().unwrap();
    let html = generate(&config_in(dir.path()));

    assert!(html.contains(r#""labels":[1,2]"#));
    assert!(html.contains(r#""label":"Ideal (Speedup Linear)","data":[1.0,2.0]"#));
    assert!(html.contains(r#""label":"OpenMP","data":[1.8]"#));
    // 5x5 reaches 8 workers through OpenMP
    assert!(html.contains(r#""data":[1.0,2.0,3.0,4.0,5.0,6.0,7.0,8.0]"#));
    assert!(html.contains(r#""label":"Ideal (Eficiência = 1.0)","data":[1.0,1.0,1.0,1.0]"#));
    // 7x7 has no rows at all
    assert!(html.contains(r#""labels":[],"datasets":[{"label":"Ideal (Speedup Linear)","data":[1.0]"#));
}

#[test]
fn output_is_deterministic() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path());
    let first = generate(&config);
    let second = generate(&config);
    assert_eq!(first, second);
}

#[test]
fn union_axis_fills_gaps() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = config_in(dir.path());
    config.settings.axis = AxisMode::Union;
    let html = generate(&config);

    assert!(html.contains(r#""labels":[4,8]"#));
    assert!(html.contains(r#""label":"MPI","data":[3.2,null]"#));
    assert!(html.contains(r#""label":"OpenMP","data":[null,6.4]"#));
}

#[test]
fn malformed_number_aborts_before_writing() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path());
    fs::write(
        &config.input,
        "Modelo,Máscara,Processos/Threads,Tempo (s),Speedup,Eficiência\nMPI,3x3,1,ten,1.0,1.0\n",
    )
    .unwrap();

    let err = MeasurementTable::from_path(&config.input, &config.settings).unwrap_err();
    assert!(format!("{err:#}").contains("\"ten\""));
    assert!(!config.output.exists());
}
