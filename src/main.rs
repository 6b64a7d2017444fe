use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use appicon_renderer::logging::{LoggingConfig, init_logging};
use appicon_renderer::{
    BatchReport, BuiltinOnly, Error, Exporter, FontProvider, IconGenerator, IconSpec, Result,
    SizeSet, SystemFonts,
};
use clap::Parser;
use clap::builder::PossibleValuesParser;

const DEFAULT_OUT_DIR: &str = "ios/App/App/Assets.xcassets/AppIcon.appiconset";

/// Render a platform app icon set from a brand spec.
#[derive(Debug, Parser)]
#[command(name = "appicon-renderer", version)]
struct Cli {
    /// Directory the bitmaps and manifest are written to.
    #[arg(long, default_value = DEFAULT_OUT_DIR)]
    out_dir: PathBuf,

    /// JSON icon spec file; overrides --preset.
    #[arg(long, value_name = "FILE", conflicts_with = "preset")]
    spec: Option<PathBuf>,

    /// Built-in icon spec.
    #[arg(long, default_value = "brand-text", value_parser = PossibleValuesParser::new(IconSpec::PRESETS))]
    preset: String,

    /// Slot table to render.
    #[arg(long, default_value = "ios", value_parser = PossibleValuesParser::new(SizeSet::PLATFORMS))]
    platform: String,

    /// Skip writing the asset catalog manifest.
    #[arg(long)]
    no_manifest: bool,

    /// Print the icon spec as JSON and exit.
    #[arg(long)]
    print_spec: bool,

    /// Extra font file to make available, may be repeated.
    #[arg(long = "font", value_name = "FILE")]
    fonts: Vec<PathBuf>,

    /// Ignore installed fonts and draw all text with the built-in font.
    #[arg(long)]
    builtin_font: bool,

    /// Log filter in env_logger syntax (defaults to RUST_LOG, then "info").
    #[arg(long, value_name = "FILTER")]
    log: Option<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(LoggingConfig {
        filter: cli.log.clone(),
        ..LoggingConfig::default()
    });

    match run(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            log::error!("{err}");
            ExitCode::from(2)
        }
    }
}

fn load_spec(cli: &Cli) -> Result<IconSpec> {
    match &cli.spec {
        Some(path) => {
            let json = fs::read_to_string(path).map_err(|source| Error::Read {
                path: path.clone(),
                source,
            })?;
            Ok(IconSpec::from_json(&json)?)
        }
        None => IconSpec::preset(&cli.preset).ok_or_else(|| Error::UnknownPreset(cli.preset.clone())),
    }
}

fn run(cli: &Cli) -> Result<bool> {
    let spec = load_spec(cli)?;
    if cli.print_spec {
        println!("{}", spec.to_json_pretty()?);
        return Ok(true);
    }

    let mut sizes = SizeSet::platform(&cli.platform)
        .ok_or_else(|| Error::InvalidSizeSet(format!("unknown platform {:?}", cli.platform)))?;
    if cli.no_manifest {
        sizes = sizes.without_manifest();
    }

    let exporter = Exporter::new(&cli.out_dir);
    log::info!(
        "rendering {} slots for {} into {}",
        sizes.slots.len(),
        sizes.name,
        exporter.out_dir().display()
    );

    let report = if cli.builtin_font {
        generate(&spec, &BuiltinOnly, &sizes, &exporter)?
    } else {
        let mut fonts = SystemFonts::new();
        for path in &cli.fonts {
            fonts.load_font_file(path).map_err(|source| Error::Read {
                path: path.clone(),
                source,
            })?;
        }
        generate(&spec, &fonts, &sizes, &exporter)?
    };

    summarize(&report);
    Ok(report.is_success())
}

fn generate<P: FontProvider + ?Sized>(
    spec: &IconSpec,
    fonts: &P,
    sizes: &SizeSet,
    exporter: &Exporter,
) -> Result<BatchReport> {
    IconGenerator::new(spec, fonts).generate(sizes, exporter)
}

fn summarize(report: &BatchReport) {
    let failures = report.failures();
    for failure in &failures {
        log::error!("{}: {}", failure.target, failure.error);
    }

    let fallbacks = report.outcomes.iter().filter(|o| o.used_fallback_font()).count();
    if fallbacks > 0 {
        log::warn!("{fallbacks} sizes were drawn with the built-in font");
    }

    log::info!(
        "{} files written, {} failed",
        report.emitted_files().len(),
        failures.len()
    );
}
