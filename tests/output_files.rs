//! Output writer and CLI tests against real files.

use datagen::{write_rows, DatagenSource, OutputFormat, TableSchema};
use std::fs;
use std::process::Command;
use tempfile::TempDir;

const DATAGEN_T: &str = include_str!("../demos/datagen_t.yaml");

#[test]
fn test_write_jsonl_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("rows.jsonl");

    let schema = TableSchema::from_yaml(DATAGEN_T).unwrap();
    let mut source = DatagenSource::new(schema.clone()).unwrap();
    source.open();
    let file = fs::File::create(&path).unwrap();
    let metrics = write_rows(file, &schema, source.rows().unwrap(), OutputFormat::Jsonl).unwrap();
    source.close();
    assert_eq!(metrics.rows_written, 10);

    let content = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 10);

    for line in lines {
        let object: serde_json::Value = serde_json::from_str(line).unwrap();
        let object = object.as_object().unwrap();
        let keys: Vec<&str> = object.keys().map(String::as_str).collect();
        assert_eq!(keys.len(), 19);
        assert_eq!(object["f0"].as_str().unwrap().len(), 1);
        assert!(object["f4"].is_string());
        assert!(object["f15"].is_array());
        assert!(object["f18"]["c"]["d"].is_string());
    }
}

#[test]
fn test_cli_generate_csv_with_limit() {
    let temp_dir = TempDir::new().unwrap();
    let table = temp_dir.path().join("datagen_t.yaml");
    let output = temp_dir.path().join("rows.csv");
    fs::write(&table, DATAGEN_T).unwrap();

    let status = Command::new(env!("CARGO_BIN_EXE_datagen"))
        .arg("generate")
        .arg("--table")
        .arg(&table)
        .args(["--limit", "5", "--seed", "42", "--format", "csv", "--output"])
        .arg(&output)
        .status()
        .unwrap();
    assert!(status.success());

    let mut reader = csv::Reader::from_path(&output).unwrap();
    let headers = reader.headers().unwrap().clone();
    assert_eq!(headers.len(), 19);
    assert_eq!(&headers[0], "f0");
    assert_eq!(&headers[18], "f18");
    assert_eq!(reader.records().count(), 5);
}

#[test]
fn test_cli_explain() {
    let temp_dir = TempDir::new().unwrap();
    let table = temp_dir.path().join("t.yaml");
    fs::write(
        &table,
        "name: datagen_t\ncolumns:\n  - name: f0\n    type: CHAR(1)\n",
    )
    .unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_datagen"))
        .arg("explain")
        .arg("--table")
        .arg(&table)
        .args(["--limit", "5"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(
        stdout.trim(),
        "TableSourceScan(table=[[default_catalog, default_database, datagen_t, limit=[5]]], fields=[f0])"
    );
}

#[test]
fn test_cli_rejects_bad_table() {
    let temp_dir = TempDir::new().unwrap();
    let table = temp_dir.path().join("bad.yaml");
    fs::write(
        &table,
        "name: t\ncolumns:\n  - name: a\n    type: INT\noptions:\n  rows-per-second: 10\n",
    )
    .unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_datagen"))
        .args(["generate", "--table"])
        .arg(&table)
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("rows-per-second"));
}
