use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use statgraph::bootstrap::{ChartBootstrap, PayloadSource};
use statgraph::builder::ChartKind;
use statgraph::client::{ClientConfig, DEFAULT_ENDPOINT};
use statgraph::render;
use statgraph::request::StatsRequest;
use statgraph::{OutputFormat, RenderOptions};

#[derive(Parser, Debug)]
#[command(name = "statgraph")]
#[command(about = "Fetch a stats payload and render it as a chart", long_about = None)]
struct Args {
    /// Which chart to build
    #[arg(value_enum)]
    chart: ChartArg,

    /// Stats endpoint URL
    #[arg(long, default_value = DEFAULT_ENDPOINT)]
    url: String,

    /// Dataset frame URI sent in the request body
    #[arg(long, default_value = "titanic_input.hex")]
    uri: String,

    /// Rounding digits requested from the endpoint
    #[arg(long, default_value_t = 3)]
    digits: u32,

    /// Read a saved payload from FILE (or stdin with '-') instead of
    /// calling the endpoint
    #[arg(long, value_name = "FILE")]
    input: Option<String>,

    /// Request timeout in seconds (no timeout when unset)
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Output file (stdout when unset)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = FormatArg::Png)]
    format: FormatArg,

    #[arg(long, default_value_t = 800)]
    width: u32,

    #[arg(long, default_value_t = 600)]
    height: u32,

    /// Override the chart title
    #[arg(long)]
    title: Option<String>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ChartArg {
    /// Fixed categorical bar chart (ignores the payload)
    Demo,
    /// Model vs k-LIME prediction overlay
    Klime,
}

impl From<ChartArg> for ChartKind {
    fn from(arg: ChartArg) -> Self {
        match arg {
            ChartArg::Demo => ChartKind::StaticDemo,
            ChartArg::Klime => ChartKind::KlimeOverlay,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    Png,
    Svg,
    Html,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Png => OutputFormat::Png,
            FormatArg::Svg => OutputFormat::Svg,
            FormatArg::Html => OutputFormat::Html,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs to stderr so piped chart bytes stay clean
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let source = match args.input.as_deref() {
        Some("-") => PayloadSource::Stdin,
        Some(path) => PayloadSource::File(PathBuf::from(path)),
        None => {
            let mut config = ClientConfig::new().with_endpoint(args.url.clone());
            if let Some(secs) = args.timeout {
                config = config.with_timeout(Duration::from_secs(secs));
            }
            PayloadSource::Remote {
                config,
                request: StatsRequest::stats(args.uri.clone()).with_digits(args.digits),
            }
        }
    };

    let options = RenderOptions {
        width: args.width,
        height: args.height,
        format: args.format.into(),
    };

    let mut bootstrap = ChartBootstrap::new(source, args.chart.into()).with_options(options);
    if let Some(title) = args.title {
        bootstrap = bootstrap.with_title(title);
    }

    let bytes = bootstrap.run().await.context("Failed to produce chart")?;

    render::write_to(args.output.as_deref(), &bytes).context("Failed to write chart output")?;

    Ok(())
}
