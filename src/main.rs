use anyhow::{Context, Result};
use clap::Parser;
use topiclens::cli::{Cli, OutputFormat, Preset};
use topiclens::engine::{frequency_report, frequency_report_string};
use topiclens::video::parse_timestamp;
use topiclens::{catalog, AnalysisError, EngineConfig, TopicEngine};
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber for debug output
fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::TRACE.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }
}

fn load_config(args: &Cli) -> Result<EngineConfig> {
    if let Some(path) = &args.config {
        return EngineConfig::from_file(path);
    }
    Ok(match args.preset {
        Preset::Default => EngineConfig::default(),
        Preset::Strict => EngineConfig::strict(),
        Preset::Permissive => EngineConfig::permissive(),
    })
}

fn main() -> Result<()> {
    let args = Cli::parse();

    init_tracing(args.debug);

    let config = load_config(&args)?;
    let limits = config.category_limits;
    let mut engine = TopicEngine::new(config).context("Invalid engine configuration")?;

    if let Some(raw) = &args.as_of {
        let as_of = parse_timestamp(raw)
            .with_context(|| format!("Invalid --as-of date: {}", raw))?;
        engine = engine.with_as_of(as_of);
    }

    let videos = catalog::load_catalog(&args.catalog)?;

    let report = match engine.analyze(&videos) {
        Ok(report) => report,
        Err(AnalysisError::ChannelBaselineMissing) => {
            tracing::warn!("no positive metrics in catalog, falling back to topic frequency");
            let frequencies = frequency_report(&videos);
            match args.format {
                OutputFormat::Text => print!("{}", frequency_report_string(&frequencies)),
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&frequencies)?)
                }
            }
            return Ok(());
        }
        Err(e) => return Err(e).context("Topic analysis failed"),
    };

    let report = if args.top { report.top(&limits) } else { report };

    match args.format {
        OutputFormat::Text => print!("{}", report.to_report_string()),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    Ok(())
}
