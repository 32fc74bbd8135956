//! CLI definition and dispatch.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::process::ExitCode;

use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::domain::chart::render_figures;
use crate::domain::dashboard::{Controls, DEFAULT_REGION, DEFAULT_TYPE};
use crate::domain::dataset::Dataset;
use crate::domain::error::DashboardError;
use crate::domain::filter::{FilterCriteria, parse_filter_date};
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::DataPort;

pub const DEFAULT_CSV_PATH: &str = "data/avocado.csv";
pub const DEFAULT_LISTEN: &str = "127.0.0.1:8050";
pub const DEFAULT_STATIC_DIR: &str = "static";

#[derive(Parser, Debug)]
#[command(name = "avocado-analytics", about = "Avocado price and volume dashboard")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the dashboard web server
    Serve {
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// CSV file, overriding [data] csv_path
        #[arg(long)]
        data: Option<PathBuf>,
    },
    /// Print the price and volume figures for one selection as JSON
    Render {
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(long)]
        data: Option<PathBuf>,
        #[arg(long)]
        region: Option<String>,
        #[arg(long = "type")]
        avocado_type: Option<String>,
        /// First date (YYYY-MM-DD); defaults to the earliest date in the data
        #[arg(long, value_parser = parse_date_arg)]
        start: Option<NaiveDate>,
        /// Last date (YYYY-MM-DD); defaults to the latest date in the data
        #[arg(long, value_parser = parse_date_arg)]
        end: Option<NaiveDate>,
    },
    /// List regions, types and the date range of the data
    Catalog {
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(long)]
        data: Option<PathBuf>,
    },
}

/// Runtime settings resolved from the config file and CLI overrides.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub csv_path: PathBuf,
    pub listen: SocketAddr,
    pub static_dir: PathBuf,
    pub default_region: String,
    pub default_type: String,
}

pub fn run(cli: Cli) -> ExitCode {
    let result = match cli.command {
        Command::Serve { config, data } => run_serve(config.as_ref(), data.as_ref()),
        Command::Render {
            config,
            data,
            region,
            avocado_type,
            start,
            end,
        } => run_render(
            config.as_ref(),
            data.as_ref(),
            region.as_deref(),
            avocado_type.as_deref(),
            start,
            end,
        ),
        Command::Catalog { config, data } => run_catalog(config.as_ref(), data.as_ref()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            (&e).into()
        }
    }
}

fn parse_date_arg(value: &str) -> Result<NaiveDate, String> {
    parse_filter_date(value).map_err(|e| format!("expected YYYY-MM-DD: {e}"))
}

/// Load the INI file at `path`, or an empty config when none was given.
pub fn load_config(path: Option<&PathBuf>) -> Result<FileConfigAdapter, DashboardError> {
    let Some(path) = path else {
        return Ok(FileConfigAdapter::empty());
    };
    log::info!("Loading config from {}", path.display());
    FileConfigAdapter::from_file(path).map_err(|e| DashboardError::ConfigParse {
        file: path.display().to_string(),
        reason: e.to_string(),
    })
}

pub fn build_settings(
    config: &dyn ConfigPort,
    data_override: Option<&PathBuf>,
) -> Result<Settings, DashboardError> {
    let csv_path = match data_override {
        Some(p) => p.clone(),
        None => PathBuf::from(config.get_string_or("data", "csv_path", DEFAULT_CSV_PATH)),
    };

    let listen_str = config.get_string_or("web", "listen", DEFAULT_LISTEN);
    let listen = listen_str
        .parse::<SocketAddr>()
        .map_err(|e| DashboardError::ConfigInvalid {
            section: "web".into(),
            key: "listen".into(),
            reason: format!("'{}': {}", listen_str, e),
        })?;

    Ok(Settings {
        csv_path,
        listen,
        static_dir: PathBuf::from(config.get_string_or("web", "static_dir", DEFAULT_STATIC_DIR)),
        default_region: config.get_string_or("dashboard", "default_region", DEFAULT_REGION),
        default_type: config.get_string_or("dashboard", "default_type", DEFAULT_TYPE),
    })
}

/// Load the dataset once; any failure is fatal for the caller.
pub fn load_dataset(port: &dyn DataPort) -> Result<Dataset, DashboardError> {
    log::info!("Loading dataset from {}", port.describe());
    let dataset = port.load()?;
    match dataset.date_bounds() {
        Some((min, max)) => log::info!("Loaded {} records ({} to {})", dataset.len(), min, max),
        None => log::warn!("Dataset {} has no records", port.describe()),
    }
    Ok(dataset)
}

fn prepare(
    config_path: Option<&PathBuf>,
    data_override: Option<&PathBuf>,
) -> Result<(Settings, Dataset), DashboardError> {
    let config = load_config(config_path)?;
    let settings = build_settings(&config, data_override)?;
    let dataset = load_dataset(&CsvAdapter::new(settings.csv_path.clone()))?;
    Ok((settings, dataset))
}

/// Criteria for a one-off render: explicit arguments win, the rest come from
/// the dashboard's initial selection.
pub fn render_criteria(
    controls: &Controls,
    region: Option<&str>,
    avocado_type: Option<&str>,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> FilterCriteria {
    let initial = controls.initial_criteria();
    FilterCriteria {
        region: region.map(str::to_string).unwrap_or(initial.region),
        avocado_type: avocado_type.map(str::to_string).unwrap_or(initial.avocado_type),
        start_date: start.unwrap_or(initial.start_date),
        end_date: end.unwrap_or(initial.end_date),
    }
}

fn run_render(
    config_path: Option<&PathBuf>,
    data_override: Option<&PathBuf>,
    region: Option<&str>,
    avocado_type: Option<&str>,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Result<(), DashboardError> {
    let (settings, dataset) = prepare(config_path, data_override)?;
    let controls = Controls::from_dataset(&dataset, &settings.default_region, &settings.default_type);
    let criteria = render_criteria(&controls, region, avocado_type, start, end);
    let figures = render_figures(&dataset, &criteria);
    let json = serde_json::to_string_pretty(&figures).map_err(std::io::Error::from)?;
    println!("{json}");
    Ok(())
}

pub fn format_catalog(dataset: &Dataset) -> String {
    let dates = match dataset.date_bounds() {
        Some((min, max)) => format!("{min} .. {max}"),
        None => "(none)".to_string(),
    };
    format!(
        "records: {}\ndates:   {}\nregions: {}\ntypes:   {}",
        dataset.len(),
        dates,
        dataset.regions().join(", "),
        dataset.types().join(", ")
    )
}

fn run_catalog(
    config_path: Option<&PathBuf>,
    data_override: Option<&PathBuf>,
) -> Result<(), DashboardError> {
    let (_, dataset) = prepare(config_path, data_override)?;
    println!("{}", format_catalog(&dataset));
    Ok(())
}

fn run_serve(
    config_path: Option<&PathBuf>,
    data_override: Option<&PathBuf>,
) -> Result<(), DashboardError> {
    #[cfg(feature = "web")]
    {
        use crate::adapters::web::{AppState, build_router};
        use std::sync::Arc;

        let (settings, dataset) = prepare(config_path, data_override)?;
        let state = AppState::new(
            Arc::new(dataset),
            &settings.default_region,
            &settings.default_type,
        );
        let router = build_router(state, settings.static_dir.clone());

        log::info!("Starting web server on {}", settings.listen);
        tokio::runtime::Runtime::new()?.block_on(async {
            let listener = tokio::net::TcpListener::bind(settings.listen).await?;
            axum::serve(listener, router).await
        })?;
        Ok(())
    }

    #[cfg(not(feature = "web"))]
    {
        let _ = (config_path, data_override);
        Err(DashboardError::ConfigInvalid {
            section: "web".into(),
            key: "listen".into(),
            reason: "built without the web feature".into(),
        })
    }
}
