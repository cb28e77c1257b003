use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};

use crate::layout::{default_view_config, FontFamily, ViewConfig};
use crate::personalization::{AutoPersonalizeOptions, ClosingStyle, GreetingStyle};

/// Application configuration loaded from environment variables.
/// Every variable is optional; invalid values abort startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Letter template; the bundled sample when unset.
    pub letter_path: Option<PathBuf>,
    /// CSV/TSV recipients; a single empty record when unset.
    pub recipients_path: Option<PathBuf>,
    pub view: ViewConfig,
    pub personalize: AutoPersonalizeOptions,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup. `from_env` passes the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let font: FontFamily = parse_or(var("FONT_FAMILY"), "FONT_FAMILY", FontFamily::Lora)?;
        let mut view = default_view_config(font);
        view.font_size_px = parse_or(var("FONT_SIZE_PX"), "FONT_SIZE_PX", view.font_size_px)?;
        view.content_width_px =
            parse_or(var("CONTENT_WIDTH_PX"), "CONTENT_WIDTH_PX", view.content_width_px)?;
        view.wrap_width_factor =
            parse_or(var("WRAP_WIDTH_FACTOR"), "WRAP_WIDTH_FACTOR", view.wrap_width_factor)?;

        if view.font_size_px <= 0.0 || view.content_width_px <= 0.0 {
            anyhow::bail!("FONT_SIZE_PX and CONTENT_WIDTH_PX must be positive");
        }
        if !(0.0..=1.0).contains(&view.wrap_width_factor) || view.wrap_width_factor == 0.0 {
            anyhow::bail!("WRAP_WIDTH_FACTOR must be in (0, 1]");
        }

        let personalize = AutoPersonalizeOptions {
            enable_greeting: parse_or(var("ENABLE_GREETING"), "ENABLE_GREETING", false)?,
            greeting_style: parse_or(var("GREETING_STYLE"), "GREETING_STYLE", GreetingStyle::Hi)?,
            enable_closing: parse_or(var("ENABLE_CLOSING"), "ENABLE_CLOSING", false)?,
            closing_style: parse_or(var("CLOSING_STYLE"), "CLOSING_STYLE", ClosingStyle::Best)?,
            from_name: var("FROM_NAME"),
        };

        Ok(Config {
            letter_path: var("LETTER_PATH").map(PathBuf::from),
            recipients_path: var("RECIPIENTS_PATH").map(PathBuf::from),
            view,
            personalize,
            rust_log: var("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}

fn parse_or<T>(raw: Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match raw {
        Some(v) => v
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} has an invalid value '{v}'")),
        None => Ok(default),
    }
}
