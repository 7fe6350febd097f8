use envconf::{env_config, transform, EnvConfig, Field};
use tracing_subscriber::EnvFilter;

env_config! {
    struct AppSection {
        name: Field::new("APP_NAME").with_default("demo"),
        debug: Field::new("APP_DEBUG")
            .with_default(false)
            .with_transform(transform::parse::<bool>()),
    }

    struct DatabaseSection {
        host: Field::new("DB_HOST").with_default("localhost"),
        port: Field::new("DB_PORT")
            .with_default(5432)
            .with_transform(transform::parse::<u16>()),
        url: Field::new("DATABASE_URL").required(),
    }

    struct AppConfig {
        app: AppSection,
        database: DatabaseSection,
        features: Field::new("APP_FEATURES").with_transform(transform::list(",")),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Resolved fresh from the environment on every call
    let snapshot = AppConfig.snapshot()?;

    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    println!("{}", snapshot.to_toml_string()?);

    Ok(())
}
