use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use letter::compose::{compose_letters, load_text, report_to_json, SAMPLE_LETTER};
use letter::config::Config;
use letter::layout::DEFAULT_EMPHASIS_PHRASES;

fn main() -> Result<()> {
    // Load configuration first (fails on malformed values)
    let config = Config::from_env()?;

    // Initialize structured logging; stdout is reserved for the JSON report
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting letter v{}", env!("CARGO_PKG_VERSION"));

    let template = match &config.letter_path {
        Some(path) => load_text(path)
            .with_context(|| format!("Failed to read letter from {}", path.display()))?,
        None => SAMPLE_LETTER.to_string(),
    };

    let recipients_text = match &config.recipients_path {
        Some(path) => Some(
            load_text(path)
                .with_context(|| format!("Failed to read recipients from {}", path.display()))?,
        ),
        None => None,
    };

    info!(
        "Layout: {:?} {}px, wrap width {:.1}px",
        config.view.font,
        config.view.font_size_px,
        config.view.wrap_width_px()
    );

    let report = compose_letters(
        &template,
        recipients_text.as_deref(),
        &config.personalize,
        &config.view.measurer(),
        config.view.wrap_width_px(),
        DEFAULT_EMPHASIS_PHRASES,
    );
    info!("Composed {} letter(s)", report.letters.len());

    println!("{}", report_to_json(&report)?);

    Ok(())
}
