//! Seed PostgreSQL with a catalog document.
//!
//! Usage: `populate-db [--config <settings.toml>] [catalog.json]`
//!
//! Without `--config` the settings come from `config/` and the environment. The
//! catalog path defaults to `catalog.path` from the settings. Every collection is
//! cleared before inserting, so the tool can be re-run safely.

use config::ConfigError;
use safari_matcher::config::Settings;
use safari_matcher::services::{apply_seed_durations, read_catalog_file, validate_catalog, PostgresClient};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};

/// Command line of the tool
#[derive(Debug, Default, PartialEq, Eq)]
struct Args {
    config: Option<PathBuf>,
    catalog: Option<PathBuf>,
}

impl Args {
    fn parse<I: IntoIterator<Item = String>>(args: I) -> Result<Self, String> {
        let mut parsed = Args::default();
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--config" | "-c" => {
                    let path = args.next().ok_or("--config needs a file path")?;
                    parsed.config = Some(PathBuf::from(path));
                }
                flag if flag.starts_with('-') => return Err(format!("unknown option '{}'", flag)),
                _ if parsed.catalog.is_some() => return Err(format!("unexpected argument '{}'", arg)),
                _ => parsed.catalog = Some(PathBuf::from(&arg)),
            }
        }

        Ok(parsed)
    }

    fn load_settings(&self) -> Result<Settings, ConfigError> {
        match &self.config {
            Some(path) => Settings::load_from(path),
            None => Settings::load(),
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenv::dotenv().ok();

    let args = match Args::parse(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{}\nUsage: populate-db [--config <settings.toml>] [catalog.json]", e);
            return ExitCode::FAILURE;
        }
    };

    let settings = match args.load_settings() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    settings.logging.init_subscriber();

    match run(args.catalog, settings).await {
        Ok(()) => {
            info!("Database population complete.");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Error populating database: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(catalog: Option<PathBuf>, settings: Settings) -> Result<(), Box<dyn std::error::Error>> {
    let path = catalog.unwrap_or_else(|| PathBuf::from(&settings.catalog.path));

    let db = settings
        .database
        .as_ref()
        .ok_or("no [database] settings; set DATABASE_URL or SAFARI__DATABASE__URL")?;

    let mut catalog = read_catalog_file(&path).await?;
    let defaulted = apply_seed_durations(&mut catalog);
    validate_catalog(&catalog)?;

    info!(
        "Read {} camps from {} ({} given default durations)",
        catalog.camps.len(),
        path.display(),
        defaulted
    );

    let client = PostgresClient::from_settings(
        &db.url,
        db.max_connections,
        db.min_connections,
        db.acquire_timeout_secs,
        db.idle_timeout_secs,
    )
    .await?;

    info!("Connected to PostgreSQL. Populating collections...");

    client.replace_catalog(&catalog).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Args, String> {
        Args::parse(args.iter().map(|a| a.to_string()))
    }

    #[test]
    fn test_parse_config_and_catalog() {
        let args = parse(&["--config", "seed.toml", "data/catalog.json"]).unwrap();

        assert_eq!(args.config, Some(PathBuf::from("seed.toml")));
        assert_eq!(args.catalog, Some(PathBuf::from("data/catalog.json")));
    }

    #[test]
    fn test_parse_rejects_bad_arguments() {
        assert!(parse(&["--config"]).is_err());
        assert!(parse(&["--verbose"]).is_err());
        assert!(parse(&["a.json", "b.json"]).is_err());
        assert_eq!(parse(&[]).unwrap(), Args::default());
    }

    #[test]
    fn test_config_flag_reads_that_file() {
        let path = std::env::temp_dir().join(format!("populate-db-{}.toml", std::process::id()));
        std::fs::write(&path, "[catalog]\npath = \"seed/catalog.json\"\n").unwrap();

        let args = parse(&["-c", path.to_str().unwrap()]).unwrap();
        let loaded = args.load_settings();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(loaded.unwrap().catalog.path, "seed/catalog.json");
    }
}
