use roomgraph::fetch::DEFAULT_BASE_URL;
use roomgraph::pipeline::{self, PipelineError, PlotSettings, WorkDir};
use roomgraph::regions::DEFAULT_ROOT_SLUG;
use roomgraph::render::PlotOptions;
use roomgraph::{Condition, CrawlConfig, FetchError, HttpPageSource};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug)]
enum CliError {
    Io(std::io::Error),
    Client(FetchError),
    Pipeline(PipelineError),
}

impl CliError {
    fn exit_code(&self) -> i32 {
        match self {
            CliError::Pipeline(_) => 1,
            CliError::Client(_) => 2,
            CliError::Io(_) => 3,
        }
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Client(err) => write!(f, "failed to set up HTTP client: {err}"),
            CliError::Pipeline(err) => write!(f, "{err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<FetchError> for CliError {
    fn from(value: FetchError) -> Self {
        Self::Client(value)
    }
}

impl From<PipelineError> for CliError {
    fn from(value: PipelineError) -> Self {
        Self::Pipeline(value)
    }
}

fn crawl_config() -> CrawlConfig {
    CrawlConfig {
        max_depth: None,
        pursue_impermanent: false,
        condition: Condition::Geo,
        sleep_duration: 1.0,
        verbose: 2,
        ..CrawlConfig::default()
    }
}

fn plot_settings() -> PlotSettings {
    PlotSettings {
        plot: PlotOptions {
            layout: "forceatlas2".to_string(),
            r_fraction: 0.9,
            min_component_size: 3,
            strong_gravity: true,
            max_iter: Some(1000),
            ..PlotOptions::default()
        },
        #[cfg(feature = "raster")]
        raster: Some(roomgraph::render::raster::RasterOptions::default()),
        ..PlotSettings::default()
    }
}

fn run() -> Result<(), CliError> {
    let workdir = WorkDir::new(std::env::current_dir()?);
    let config = crawl_config();
    let mut source = HttpPageSource::new(DEFAULT_BASE_URL, config.delay())?;

    let report = pipeline::run(
        &mut source,
        &workdir,
        DEFAULT_ROOT_SLUG,
        &config,
        &plot_settings(),
    )?;
    tracing::info!(
        files = report.files.len(),
        dir = %workdir.condition_dir(config.condition).display(),
        "done"
    );
    Ok(())
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(err.exit_code());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hardcoded_run_settings() {
        let config = crawl_config();
        assert_eq!(config.max_depth, None);
        assert_eq!(config.condition, Condition::Geo);
        assert!(!config.patches.is_empty());

        let settings = plot_settings();
        assert_eq!(settings.plot.layout, "forceatlas2");
        assert_eq!(settings.plot.min_component_size, 3);
        assert!(settings.plot.algorithm().is_ok());
    }

    #[test]
    fn errors_map_to_distinct_exit_codes() {
        let io = CliError::from(std::io::Error::other("disk"));
        let client = CliError::from(FetchError::NotFound {
            slug: "battleon".to_string(),
        });
        assert_eq!(io.exit_code(), 3);
        assert_eq!(client.exit_code(), 2);
        assert!(io.to_string().starts_with("I/O error"));
    }
}
