/// Declares configuration group types.
///
/// Each declaration becomes a unit struct implementing
/// [`EnvConfig`](crate::EnvConfig). Members are listed as
/// `name: <entry>`, where the entry is a [`Field`](crate::Field), a
/// [`Group`](crate::Group), or a value of another declared group type.
/// Declaration order is the order of the resulting snapshot.
///
/// The generated struct already derives `Debug`, `Clone`, `Copy`,
/// `Default`, `PartialEq` and `Eq`. Attributes are passed through, so
/// deriving any of those again conflicts with the generated impls.
///
/// ```no_run
/// use envconf::{env_config, transform, EnvConfig, Field};
///
/// env_config! {
///     pub struct Database {
///         host: Field::new("DB_HOST").with_default("localhost"),
///         port: Field::new("DB_PORT")
///             .with_default(5432)
///             .with_transform(transform::parse::<u16>()),
///     }
///
///     pub struct App {
///         database: Database,
///         token: Field::new("APP_TOKEN").required(),
///     }
/// }
///
/// let snapshot = App.snapshot()?;
/// # Ok::<(), envconf::ConfigError>(())
/// ```
#[macro_export]
macro_rules! env_config {
    ($(
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $($entry:ident : $value:expr),* $(,)?
        }
    )*) => {$(
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
        $vis struct $name;

        impl $crate::EnvConfig for $name {
            fn group() -> &'static $crate::Group {
                static GROUP: ::std::sync::OnceLock<$crate::Group> = ::std::sync::OnceLock::new();
                GROUP.get_or_init(|| {
                    $crate::Group::builder()
                        $(.with_entry(stringify!($entry), $value))*
                })
            }
        }
    )*};
}

#[cfg(test)]
mod tests {
    use crate::{transform, EnvConfig, Field};
    use serde_json::json;
    use std::collections::HashMap;

    crate::env_config! {
        struct Inner {
            a: Field::new("A_FOO").with_default(1),
            b: Field::new("A_BAR").required().with_transform(transform::parse::<f64>()),
        }

        /// Doc comments pass through.
        struct Outer {
            c: Field::new("C_FOO"),
            inner: Inner,
        }

        struct Empty {}
    }

    #[test]
    fn test_declared_names() {
        assert_eq!(Inner::field_names(), ["a", "b"]);
        assert_eq!(Outer::entry_names(), ["c", "inner"]);
        assert_eq!(Outer::field_names(), ["c"]);
        assert!(Empty::group().is_empty());
    }

    #[test]
    fn test_generated_derives() {
        let inner = Inner::default();
        let copy = inner;
        assert_eq!(inner, copy);
        assert_eq!(format!("{copy:?}"), "Inner");
    }

    #[test]
    fn test_group_is_shared_between_values() {
        assert!(std::ptr::eq(Inner::group(), Inner::group()));
    }

    #[test]
    fn test_snapshot_from_map() {
        let env: HashMap<String, String> = [("A_BAR".to_string(), "2.5".to_string())].into();
        let snapshot = Outer.snapshot_from(&env).unwrap();

        assert_eq!(
            snapshot.into_value(),
            json!({"c": null, "inner": {"a": 1, "b": 2.5}})
        );
    }
}
