use anyhow::Context;
use clap::Parser;
use jus_core::AppConfig;
use jus_gazette::{GazetteLoader, GazetteRegistry};
use jus_proxy::ProxyService;
use jus_scanner::{GazetteScanner, StateFilter};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// Search official gazettes for publications naming the office's attorneys.
#[derive(Debug, Parser)]
#[command(name = "jus-monitor", version, about, long_about = None)]
struct Cli {
    /// Attorney names to search for
    #[arg(required_unless_present = "list_sites")]
    names: Vec<String>,

    /// Restrict the scan to these states (repeatable, e.g. --estado SP --estado RJ)
    #[arg(short = 'e', long = "estado", value_name = "UF")]
    states: Vec<String>,

    /// Configuration file (defaults to the platform config directory)
    #[arg(short = 'c', long, env = "JUS_CONFIG")]
    config: Option<PathBuf>,

    /// Print only the publications instead of the full per-site report
    #[arg(long)]
    publications_only: bool,

    /// List the registered gazette sites and exit
    #[arg(long)]
    list_sites: bool,
}

fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,jus=debug"));

    // stdout carries the JSON report
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<AppConfig> {
    match path {
        Some(path) => {
            let mut config = AppConfig::load_from(path)
                .with_context(|| format!("loading config from {}", path.display()))?;
            config.apply_env_overrides(|key| std::env::var(key).ok());
            config.validate()?;
            Ok(config)
        }
        None => Ok(AppConfig::load_with_env()?),
    }
}

fn build_registry(config: &AppConfig) -> anyhow::Result<GazetteRegistry> {
    match &config.gazettes.definitions_dir {
        Some(dir) => {
            let loader = GazetteLoader::new(dir)
                .with_context(|| format!("opening gazette definitions in {}", dir.display()))?;
            let registry = GazetteRegistry::load_from(&loader)?;
            if registry.count() == 0 {
                anyhow::bail!("no valid gazette definitions in {}", dir.display());
            }
            Ok(registry)
        }
        None => Ok(GazetteRegistry::builtin()),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    info!("Starting jus-monitor v{}", env!("CARGO_PKG_VERSION"));

    let config = load_config(cli.config.as_ref())?;
    let registry = build_registry(&config)?;

    if cli.list_sites {
        println!("{}", serde_json::to_string_pretty(&registry.get_all())?);
        return Ok(());
    }

    let filter = StateFilter::from_codes(&cli.states)?;
    let proxy = ProxyService::with_config(&config.proxy)?;
    let scanner = GazetteScanner::new(Arc::new(registry), Arc::new(proxy))
        .with_config(config.scanning.clone());

    let report = scanner.scan(&cli.names, &filter).await?;

    let output = if cli.publications_only {
        serde_json::to_string_pretty(&report.into_publications())?
    } else {
        serde_json::to_string_pretty(&report)?
    };
    println!("{output}");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_parse_names_and_states() {
        let cli = Cli::try_parse_from([
            "jus-monitor",
            "Maria Souza",
            "João Lima",
            "--estado",
            "SP",
            "-e",
            "rj",
        ])
        .expect("parse args");

        assert_eq!(cli.names, vec!["Maria Souza", "João Lima"]);
        assert_eq!(cli.states, vec!["SP", "rj"]);
        assert!(!cli.publications_only);
    }

    #[test]
    fn test_names_required_unless_listing() {
        assert!(Cli::try_parse_from(["jus-monitor"]).is_err());

        let cli = Cli::try_parse_from(["jus-monitor", "--list-sites"]).expect("parse args");
        assert!(cli.list_sites);
        assert!(cli.names.is_empty());
    }

    #[test]
    fn test_builtin_registry_by_default() {
        let registry = build_registry(&AppConfig::default()).expect("build registry");
        assert_eq!(registry.count(), 10);
    }

    #[test]
    fn test_registry_from_definitions_dir() {
        let dir = tempfile::tempdir().expect("create temp dir");
        fs::write(
            dir.path().join("dje-to.toml"),
            r#"
[site]
id = "dje-to"
state = "TO"
label = "DJE-TO"
url = "https://wwa.tjto.jus.br/diario/pesquisa"
selector = "div.resultado"
"#,
        )
        .expect("write definition");

        let mut config = AppConfig::default();
        config.gazettes.definitions_dir = Some(dir.path().to_path_buf());

        let registry = build_registry(&config).expect("build registry");
        assert_eq!(registry.count(), 1);
        assert_eq!(registry.states()[0].as_str(), "TO");
    }

    #[test]
    fn test_empty_definitions_dir_rejected() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let mut config = AppConfig::default();
        config.gazettes.definitions_dir = Some(dir.path().to_path_buf());

        assert!(build_registry(&config).is_err());
    }

    #[test]
    fn test_load_config_from_file() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("config.toml");
        fs::write(&path, "[scanning]\nbatch_size = 2\n").expect("write config");

        let config = load_config(Some(&path)).expect("load config");
        assert_eq!(config.scanning.batch_size, 2);

        let missing = dir.path().join("missing.toml");
        assert!(load_config(Some(&missing)).is_err());
    }
}
