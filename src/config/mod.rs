//! Configuration layer: typed settings with layered precedence (file → env → CLI).

use std::{path::PathBuf, str::FromStr};

use clap::{Args, Parser, Subcommand, ValueHint, builder::BoolishValueParser};
use config::{Config, Environment, File};
use serde::Deserialize;
use thiserror::Error;
use tracing::level_filters::LevelFilter;

use crate::application::render::DEFAULT_IMAGE_ALT;

const DEFAULT_CONFIG_BASENAME: &str = "config/default";
const LOCAL_CONFIG_BASENAME: &str = "notion-blog";
const ENV_PREFIX: &str = "NOTION_BLOG";
pub(crate) const DEFAULT_PUBLISHED_STATUS: &str = "Published";

/// Command-line arguments for the notion-blog binary.
#[derive(Debug, Parser)]
#[command(
    name = "notion-blog",
    version,
    about = "Render Notion block dumps to HTML and browse a posts database export"
)]
pub struct CliArgs {
    /// Optional path to a configuration file.
    #[arg(
        long = "config-file",
        env = "NOTION_BLOG_CONFIG_FILE",
        value_name = "PATH",
        global = true
    )]
    pub config_file: Option<PathBuf>,

    #[command(flatten)]
    pub logging: LoggingOverrides,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Render a page's block dump to HTML.
    Render(RenderArgs),
    /// List posts from a posts-database export.
    Posts(PostsArgs),
    /// List the categories of published posts.
    Categories(CategoriesArgs),
    /// Show the posts before and after one post.
    Navigate(NavigateArgs),
}

#[derive(Debug, Args, Default, Clone)]
pub struct LoggingOverrides {
    /// Override the base log level (trace|debug|info|warn|error).
    #[arg(long = "log-level", value_name = "LEVEL", global = true)]
    pub log_level: Option<String>,

    /// Toggle JSON logging.
    #[arg(
        long = "log-json",
        value_name = "BOOL",
        value_parser = BoolishValueParser::new(),
        global = true
    )]
    pub log_json: Option<bool>,
}

#[derive(Debug, Args, Default, Clone)]
pub struct RenderOverrides {
    /// Override the alt text used for images without a caption.
    #[arg(long = "default-image-alt", value_name = "TEXT")]
    pub default_image_alt: Option<String>,
}

#[derive(Debug, Args, Default, Clone)]
pub struct ContentOverrides {
    /// Override the status label that marks a post as published.
    #[arg(long = "published-status", value_name = "LABEL")]
    pub published_status: Option<String>,
}

#[derive(Debug, Args, Clone)]
pub struct RenderArgs {
    #[command(flatten)]
    pub overrides: RenderOverrides,

    /// Block dump to render (`-` reads standard input).
    #[arg(value_name = "FILE", value_hint = ValueHint::FilePath)]
    pub file: PathBuf,

    /// Write the result here instead of standard output.
    #[arg(long, short, value_name = "PATH", value_hint = ValueHint::FilePath)]
    pub output: Option<PathBuf>,

    /// Emit the HTML together with document statistics as JSON.
    #[arg(long, action = clap::ArgAction::SetTrue)]
    pub json: bool,
}

#[derive(Debug, Args, Clone)]
pub struct PostsArgs {
    #[command(flatten)]
    pub overrides: ContentOverrides,

    /// Posts-database export (`-` reads standard input).
    #[arg(value_name = "FILE", value_hint = ValueHint::FilePath)]
    pub file: PathBuf,

    /// Only posts in exactly this category.
    #[arg(long, value_name = "NAME")]
    pub category: Option<String>,

    /// Case-insensitive search over titles and tags.
    #[arg(long, short, value_name = "TEXT")]
    pub query: Option<String>,

    /// Include posts that are not published.
    #[arg(long, action = clap::ArgAction::SetTrue)]
    pub all: bool,

    /// Emit JSON instead of one line per post.
    #[arg(long, action = clap::ArgAction::SetTrue)]
    pub json: bool,
}

#[derive(Debug, Args, Clone)]
pub struct CategoriesArgs {
    #[command(flatten)]
    pub overrides: ContentOverrides,

    /// Posts-database export (`-` reads standard input).
    #[arg(value_name = "FILE", value_hint = ValueHint::FilePath)]
    pub file: PathBuf,
}

#[derive(Debug, Args, Clone)]
pub struct NavigateArgs {
    #[command(flatten)]
    pub overrides: ContentOverrides,

    /// Posts-database export (`-` reads standard input).
    #[arg(value_name = "FILE", value_hint = ValueHint::FilePath)]
    pub file: PathBuf,

    /// Page id of the post to navigate from.
    #[arg(value_name = "ID")]
    pub id: String,
}

/// Fully-resolved settings after precedence resolution and validation.
#[derive(Debug, Clone)]
pub struct Settings {
    pub logging: LoggingSettings,
    pub render: RenderSettings,
    pub content: ContentSettings,
}

#[derive(Debug, Clone)]
pub struct LoggingSettings {
    pub level: LevelFilter,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Compact,
}

#[derive(Debug, Clone)]
pub struct RenderSettings {
    pub default_image_alt: String,
}

#[derive(Debug, Clone)]
pub struct ContentSettings {
    pub published_status: String,
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to build configuration: {0}")]
    Build(#[from] config::ConfigError),
    #[error("invalid configuration for `{key}`: {reason}")]
    Invalid { key: &'static str, reason: String },
}

impl LoadError {
    fn invalid(key: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            key,
            reason: reason.into(),
        }
    }
}

/// Load settings using the configured precedence (file → environment → CLI).
pub fn load(cli: &CliArgs) -> Result<Settings, LoadError> {
    let mut builder = Config::builder()
        .add_source(File::with_name(DEFAULT_CONFIG_BASENAME).required(false))
        .add_source(File::with_name(LOCAL_CONFIG_BASENAME).required(false));

    if let Some(path) = cli.config_file.as_ref() {
        builder = builder.add_source(File::from(path.as_path()).required(true));
    }

    builder = builder.add_source(Environment::with_prefix(ENV_PREFIX).separator("__"));

    let mut raw: RawSettings = builder.build()?.try_deserialize()?;

    raw.apply_logging_overrides(&cli.logging);
    match &cli.command {
        Command::Render(args) => raw.apply_render_overrides(&args.overrides),
        Command::Posts(PostsArgs { overrides, .. })
        | Command::Categories(CategoriesArgs { overrides, .. })
        | Command::Navigate(NavigateArgs { overrides, .. }) => {
            raw.apply_content_overrides(overrides)
        }
    }

    Settings::from_raw(raw)
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawSettings {
    logging: RawLoggingSettings,
    render: RawRenderSettings,
    content: RawContentSettings,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawLoggingSettings {
    level: Option<String>,
    json: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawRenderSettings {
    default_image_alt: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawContentSettings {
    published_status: Option<String>,
}

impl RawSettings {
    fn apply_logging_overrides(&mut self, overrides: &LoggingOverrides) {
        if let Some(level) = overrides.log_level.as_ref() {
            self.logging.level = Some(level.clone());
        }
        if let Some(json) = overrides.log_json {
            self.logging.json = Some(json);
        }
    }

    fn apply_render_overrides(&mut self, overrides: &RenderOverrides) {
        if let Some(alt) = overrides.default_image_alt.as_ref() {
            self.render.default_image_alt = Some(alt.clone());
        }
    }

    fn apply_content_overrides(&mut self, overrides: &ContentOverrides) {
        if let Some(status) = overrides.published_status.as_ref() {
            self.content.published_status = Some(status.clone());
        }
    }
}

impl Settings {
    fn from_raw(raw: RawSettings) -> Result<Self, LoadError> {
        let RawSettings {
            logging,
            render,
            content,
        } = raw;

        let logging = build_logging_settings(logging)?;
        let render = build_render_settings(render)?;
        let content = build_content_settings(content)?;

        Ok(Self {
            logging,
            render,
            content,
        })
    }
}

fn build_logging_settings(logging: RawLoggingSettings) -> Result<LoggingSettings, LoadError> {
    let level = match logging.level {
        Some(level) => LevelFilter::from_str(level.as_str()).map_err(|err| {
            LoadError::invalid("logging.level", format!("failed to parse: {err}"))
        })?,
        None => LevelFilter::INFO,
    };

    let format = if logging.json.unwrap_or(false) {
        LogFormat::Json
    } else {
        LogFormat::Compact
    };

    Ok(LoggingSettings { level, format })
}

fn build_render_settings(render: RawRenderSettings) -> Result<RenderSettings, LoadError> {
    let default_image_alt = non_blank(
        render.default_image_alt,
        DEFAULT_IMAGE_ALT,
        "render.default_image_alt",
    )?;
    Ok(RenderSettings { default_image_alt })
}

fn build_content_settings(content: RawContentSettings) -> Result<ContentSettings, LoadError> {
    let published_status = non_blank(
        content.published_status,
        DEFAULT_PUBLISHED_STATUS,
        "content.published_status",
    )?;
    Ok(ContentSettings { published_status })
}

fn non_blank(
    value: Option<String>,
    default: &str,
    key: &'static str,
) -> Result<String, LoadError> {
    match value {
        None => Ok(default.to_string()),
        Some(value) if value.trim().is_empty() => {
            Err(LoadError::invalid(key, "must not be blank"))
        }
        Some(value) => Ok(value),
    }
}

/// Resolve configuration using the supplied CLI arguments, returning both for downstream use.
pub fn load_with_cli() -> Result<(CliArgs, Settings), LoadError> {
    let args = CliArgs::parse();
    let settings = load(&args)?;
    Ok((args, settings))
}
