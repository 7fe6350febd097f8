//! End-to-end resolution against the process environment.

use envconf::{env_config, transform, ConfigError, EnvConfig, Field, Group};
use pretty_assertions::assert_eq;
use serde_json::json;

env_config! {
    struct A {
        a: Field::new("A_FOO").with_default(1),
        b: Field::new("A_BAR").required().with_transform(transform::parse::<f64>()),
        c: Field::new("A_BAZ").with_default(10).with_transform(transform::parse::<i64>()),
    }

    struct B {
        a: Field::new("B_FOO"),
    }

    struct C {
        a: A,
        b: B,
        c: Field::new("C_FOO").required(),
    }

    struct Outer {
        inner: A,
        b: Field::new("B_FOO"),
        c: Field::new("C_FOO").required(),
    }
}

const ALL_KEYS: [&str; 5] = ["A_FOO", "A_BAR", "A_BAZ", "B_FOO", "C_FOO"];

/// Runs `f` with exactly the given variables set and every other test key unset.
fn with_env<R>(vars: &[(&str, &str)], f: impl FnOnce() -> R) -> R {
    let mut kvs: Vec<(&str, Option<&str>)> = ALL_KEYS.iter().map(|key| (*key, None)).collect();
    for (key, value) in vars {
        if let Some(slot) = kvs.iter_mut().find(|(k, _)| k == key) {
            slot.1 = Some(*value);
        } else {
            kvs.push((*key, Some(*value)));
        }
    }
    temp_env::with_vars(kvs, f)
}

fn assert_missing(result: Result<envconf::Snapshot, ConfigError>, key: &str) {
    let err = result.unwrap_err();
    assert_eq!(err.missing_key(), Some(key));
    assert_eq!(
        err.to_string(),
        format!("Configuration variable \"{key}\" does not found in environment")
    );
}

#[test]
fn test_class_generation_ok() {
    assert_eq!(A::field_names(), ["a", "b", "c"]);
    assert_eq!(B::field_names(), ["a"]);
    assert_eq!(C::field_names(), ["c"]);
    assert_eq!(C::entry_names(), ["a", "b", "c"]);
}

#[test]
fn test_without_nested_configs_ok() {
    let snapshot = with_env(&[("A_BAR", "10.5")], || A.snapshot()).unwrap();
    assert_eq!(snapshot.into_value(), json!({"a": 1, "b": 10.5, "c": 10}));
}

#[test]
fn test_without_nested_configs_error() {
    assert_missing(with_env(&[], || A.snapshot()), "A_BAR");
}

#[test]
fn test_with_nested_configs_ok() {
    let snapshot = with_env(&[("A_BAR", "5"), ("C_FOO", "KEK")], || C.snapshot()).unwrap();
    assert_eq!(
        snapshot.into_value(),
        json!({
            "a": {"a": 1, "b": 5.0, "c": 10},
            "b": {"a": null},
            "c": "KEK"
        })
    );
}

#[test]
fn test_with_nested_configs_error() {
    assert_missing(with_env(&[("C_FOO", "KEK")], || C.snapshot()), "A_BAR");
}

#[test]
fn test_nested_scalar_siblings() {
    let snapshot = with_env(&[("A_BAR", "5"), ("C_FOO", "KEK")], || Outer.snapshot()).unwrap();

    assert_eq!(snapshot.keys().collect::<Vec<_>>(), ["inner", "b", "c"]);
    assert_eq!(
        serde_json::to_string(&snapshot).unwrap(),
        r#"{"inner":{"a":1,"b":5.0,"c":10},"b":null,"c":"KEK"}"#
    );
}

#[test]
fn test_environment_values_are_transformed() {
    let snapshot = with_env(&[("A_FOO", "raw"), ("A_BAR", "1.25"), ("A_BAZ", "42")], || {
        A.snapshot()
    })
    .unwrap();

    assert_eq!(snapshot.into_value(), json!({"a": "raw", "b": 1.25, "c": 42}));
}

#[test]
fn test_transform_error_surfaces_unchanged() {
    let result = with_env(&[("A_BAR", "1.0"), ("A_BAZ", "ten")], || A.snapshot());
    let err = result.unwrap_err();

    assert!(matches!(err, ConfigError::Transform(_)));
    assert_eq!(err.to_string(), "invalid digit found in string");
}

#[test]
fn test_snapshots_follow_environment_changes() {
    let first = with_env(&[("A_BAR", "1")], || A.snapshot()).unwrap();
    let second = with_env(&[("A_BAR", "2")], || A.snapshot()).unwrap();

    assert_eq!(first.get("b"), Some(&json!(1.0)));
    assert_eq!(second.get("b"), Some(&json!(2.0)));
}

#[test]
fn test_order_independent_of_environment() {
    let sparse = with_env(&[("A_BAR", "1")], || A.snapshot()).unwrap();
    let full = with_env(&[("A_FOO", "x"), ("A_BAR", "1"), ("A_BAZ", "3")], || A.snapshot()).unwrap();

    assert_eq!(sparse.keys().collect::<Vec<_>>(), ["a", "b", "c"]);
    assert_eq!(full.keys().collect::<Vec<_>>(), ["a", "b", "c"]);
}

#[test]
fn test_builder_groups_nest_declared_types() {
    let group = Group::builder()
        .with_field("name", Field::new("C_FOO").with_default("app"))
        .with_nested::<B>("extra");

    let snapshot = with_env(&[("B_FOO", "set")], || group.snapshot()).unwrap();
    assert_eq!(snapshot.into_value(), json!({"name": "app", "extra": {"a": "set"}}));
}

#[test]
fn test_typed_and_toml_output() {
    #[derive(Debug, serde::Deserialize, PartialEq)]
    struct Settings {
        a: i64,
        b: f64,
        c: i64,
    }

    let snapshot = with_env(&[("A_BAR", "0.5")], || A.snapshot()).unwrap();

    let settings: Settings = snapshot.deserialize().unwrap();
    assert_eq!(settings, Settings { a: 1, b: 0.5, c: 10 });
    assert_eq!(snapshot.to_toml_string().unwrap(), "a = 1\nb = 0.5\nc = 10\n");
}
