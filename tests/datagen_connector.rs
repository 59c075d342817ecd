//! End-to-end tests for the datagen source: schema in, rows out, with and
//! without a pushed limit.

use chrono::{NaiveDate, Timelike};
use datagen::{push_down_limit, DatagenSource, Row, SourceError, SupportsLimitPushDown, TableSchema, Value};
use datagen_generator::GeneratorRegistry;

const DATAGEN_T: &str = include_str!("../demos/datagen_t.yaml");

fn all_types_table() -> TableSchema {
    TableSchema::from_yaml(DATAGEN_T).unwrap()
}

fn collect(source: &mut DatagenSource) -> Vec<Row> {
    source.open();
    let rows = source.rows().unwrap().collect();
    source.close();
    rows
}

fn assert_date_in_window(date: NaiveDate) {
    let first = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap();
    let last = NaiveDate::from_ymd_opt(2037, 12, 31).unwrap();
    assert!(date >= first && date <= last, "{date} outside generation window");
}

fn assert_decimal_32_2(value: &Value) {
    let decimal = value.as_decimal().unwrap();
    assert_eq!(decimal.precision, 32);
    assert_eq!(decimal.scale, 2);
    assert!(decimal.digits() <= 32);
}

#[test]
fn test_all_types_with_number_of_rows() {
    let mut source = DatagenSource::new(all_types_table()).unwrap();
    let rows = collect(&mut source);
    assert_eq!(rows.len(), 10);

    for (i, row) in rows.iter().enumerate() {
        assert_eq!(row.index, i as u64);
        assert_eq!(row.len(), 19);

        assert_eq!(row.get(0).unwrap().as_str().unwrap().chars().count(), 1);
        let f1 = row.get(1).unwrap().as_str().unwrap().chars().count();
        assert!((1..=10).contains(&f1));
        let f2 = row.get(2).unwrap().as_str().unwrap().chars().count();
        assert!((1..=100).contains(&f2));
        assert!(row.get(3).unwrap().as_bool().is_some());
        assert_decimal_32_2(row.get(4).unwrap());
        assert!(matches!(row.get(5), Some(Value::TinyInt(_))));
        assert!(matches!(row.get(6), Some(Value::SmallInt(_))));
        assert!(matches!(row.get(7), Some(Value::Int(_))));
        assert!(matches!(row.get(8), Some(Value::BigInt(_))));
        assert!(matches!(row.get(9), Some(Value::Float(v)) if v.is_finite()));
        assert!(matches!(row.get(10), Some(Value::Double(v)) if v.is_finite()));
        assert_date_in_window(row.get(11).unwrap().as_date().unwrap());
        assert_eq!(row.get(12).unwrap().as_time().unwrap().nanosecond(), 0);

        let f13 = row.get(13).unwrap().as_timestamp().unwrap();
        assert_eq!(f13.nanosecond() % 1_000_000, 0);
        assert_date_in_window(f13.date());
        let f14 = row.get(14).unwrap().as_timestamp_ltz().unwrap();
        assert_eq!(f14.nanosecond() % 1_000, 0);

        let f15 = row.get(15).unwrap().as_array().unwrap();
        assert!(f15.len() <= 3);
        assert!(f15.iter().all(|v| matches!(v, Value::Int(_))));

        let f16 = row.get(16).unwrap().as_map().unwrap();
        assert!(f16.len() <= 3);
        for (key, value) in f16 {
            assert!(key.as_str().is_some());
            assert_date_in_window(value.as_date().unwrap());
        }

        let f17 = row.get(17).unwrap().as_multiset().unwrap();
        assert!(f17.len() <= 3);
        f17.iter().for_each(assert_decimal_32_2);

        let f18 = row.get(18).unwrap().as_row().unwrap();
        assert_eq!(f18.len(), 3);
        assert_eq!(f18[0].0, "a");
        assert!(matches!(f18[0].1, Value::BigInt(_)));
        assert_eq!(f18[1].0, "b");
        assert!(f18[1].1.as_time().is_some());
        let c = f18[2].1.as_row().unwrap();
        assert_eq!(c.len(), 1);
        assert_eq!(c[0].0, "d");
        assert!(c[0].1.as_timestamp().is_some());
    }
}

#[test]
fn test_limit_push_down() {
    let schema = TableSchema::from_declared("datagen_t", &[("f0", "CHAR(1)")]).unwrap();
    let mut source = DatagenSource::new(schema).unwrap();

    assert!(source.supports_limit_push_down());
    assert!(push_down_limit(&mut source, 5));
    assert!(source.explain().contains(
        "table=[[default_catalog, default_database, datagen_t, limit=[5]]], fields=[f0]"
    ));

    let rows = collect(&mut source);
    assert_eq!(rows.len(), 5);
}

#[test]
fn test_limit_tightens_number_of_rows() {
    let mut source = DatagenSource::new(all_types_table()).unwrap();
    assert!(push_down_limit(&mut source, 5));
    assert_eq!(source.current_limit(), Some(5));
    assert!(source.explain().contains("limit=[5]"));
    assert_eq!(collect(&mut source).len(), 5);
}

#[test]
fn test_repeated_push_does_not_double_count() {
    let schema = TableSchema::from_declared("t", &[("f0", "CHAR(1)")]).unwrap();
    let mut source = DatagenSource::new(schema).unwrap();

    for _ in 0..3 {
        assert!(push_down_limit(&mut source, 5));
    }
    assert_eq!(source.current_limit(), Some(5));
    assert_eq!(collect(&mut source).len(), 5);
}

#[test]
fn test_late_push_keeps_prior_ceiling() {
    let mut source = DatagenSource::new(all_types_table()).unwrap();
    source.open();
    assert!(source.next_row().unwrap().is_some());

    assert!(!push_down_limit(&mut source, 2));
    assert!(matches!(
        source.apply_limit(2),
        Err(e) if e.current_limit == Some(10) && e.rows_emitted == 1
    ));

    let remaining = source.rows().unwrap().count();
    assert_eq!(remaining, 9);
}

#[test]
fn test_unbounded_without_rows_or_limit() {
    let schema = TableSchema::from_declared("t", &[("f0", "CHAR(1)"), ("f15", "INT ARRAY")]).unwrap();
    let mut source = DatagenSource::new(schema).unwrap();
    assert_eq!(source.current_limit(), None);

    source.open();
    assert_eq!(source.rows().unwrap().take(50_000).count(), 50_000);
    assert!(source.try_advance().unwrap());
}

#[test]
fn test_zero_rows() {
    let schema = TableSchema::from_declared("t", &[("f0", "CHAR(1)")])
        .unwrap()
        .with_option("number-of-rows", "0");
    let mut source = DatagenSource::new(schema).unwrap();
    assert!(collect(&mut source).is_empty());
}

#[test]
fn test_row_in_array_in_row() {
    let schema = TableSchema::from_declared(
        "t",
        &[("r", "ROW<xs ARRAY<ROW<y INT, z ROW<w STRING>>>, n BOOLEAN>")],
    )
    .unwrap()
    .with_option("number-of-rows", "200")
    .with_option("seed", "42");
    let mut source = DatagenSource::new(schema).unwrap();

    let mut saw_nested = false;
    for row in collect(&mut source) {
        let outer = row.get(0).unwrap().as_row().unwrap();
        assert_eq!(outer.len(), 2);
        assert_eq!(outer[0].0, "xs");
        assert_eq!(outer[1].0, "n");
        assert!(outer[1].1.as_bool().is_some());

        for element in outer[0].1.as_array().unwrap() {
            saw_nested = true;
            let inner = element.as_row().unwrap();
            assert_eq!(inner.len(), 2);
            assert!(matches!(inner[0].1, Value::Int(_)));
            let z = inner[1].1.as_row().unwrap();
            assert_eq!(z[0].0, "w");
            assert!(z[0].1.as_str().is_some());
        }
    }
    assert!(saw_nested);
}

#[test]
fn test_registry_build_is_repeatable() {
    let schema = all_types_table();
    let registry = GeneratorRegistry::default();
    let first = registry.build(&schema).unwrap();
    let second = registry.build(&schema).unwrap();

    assert_eq!(first, second);
    let shapes: Vec<String> = first.columns().iter().map(|c| c.generator.describe()).collect();
    let again: Vec<String> = second.columns().iter().map(|c| c.generator.describe()).collect();
    assert_eq!(shapes, again);
}

#[test]
fn test_seeded_sources_agree() {
    let schema = all_types_table().with_option("seed", "42");
    let mut first = DatagenSource::new(schema.clone()).unwrap();
    let mut second = DatagenSource::new(schema).unwrap();

    assert_eq!(collect(&mut first), collect(&mut second));
}

#[test]
fn test_unsupported_kind_fails_at_creation() {
    let schema = TableSchema::from_declared("t", &[("r", "ROW<a INT, b RAW('com.example.Opaque')>")])
        .unwrap();

    match DatagenSource::new(schema) {
        Err(SourceError::UnsupportedType(e)) => assert_eq!(e.path, "r.b"),
        Err(other) => panic!("Expected UnsupportedType, got {other}"),
        Ok(_) => panic!("Expected UnsupportedType, got a source"),
    }
}

#[test]
fn test_invalid_schema_fails() {
    assert!(TableSchema::from_declared("t", &[("d", "DECIMAL(2, 5)")]).is_err());
    assert!(TableSchema::from_declared("t", &[("d", "DECIMAL(39, 0)")]).is_err());
    assert!(TableSchema::from_declared("t", &[("s", "VARCHAR(0)")]).is_err());
    assert!(TableSchema::from_declared("t", &[("t", "TIME(10)")]).is_err());
    assert!(TableSchema::from_declared("t", &[("r", "ROW<a INT, a INT>")]).is_err());
    assert!(TableSchema::from_declared("t", &[("x", "INT"), ("x", "INT")]).is_err());
    assert!(TableSchema::from_declared("t", &[]).is_err());
}

#[test]
fn test_field_options_apply() {
    let schema = TableSchema::from_declared("t", &[("a", "INT"), ("s", "STRING"), ("xs", "INT ARRAY")])
        .unwrap()
        .with_option("number-of-rows", "100")
        .with_option("fields.a.min", "1")
        .with_option("fields.a.max", "6")
        .with_option("fields.s.length", "3")
        .with_option("fields.xs.length", "1");
    let mut source = DatagenSource::new(schema).unwrap();

    for row in collect(&mut source) {
        let a = row.get(0).unwrap().as_i64().unwrap();
        assert!((1..=6).contains(&a));
        assert!(row.get(1).unwrap().as_str().unwrap().len() <= 3);
        assert!(row.get(2).unwrap().as_array().unwrap().len() <= 1);
    }
}
