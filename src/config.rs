use crate::error::{FcError, FcResult};
use clap::{parser::ValueSource, ArgMatches, Args, ValueEnum};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use strum_macros::{Display, EnumString};

/// Base used when nothing is configured and the client runs a development build.
pub const DEV_MODEL_BASE: &str = "http://localhost:5000";

/// Fixed upper bound on one optimization call.
pub const DEFAULT_TIMEOUT_MS: u64 = 120_000;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    ValueEnum,
    Display,
    EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum BuildMode {
    Development,
    #[default]
    Production,
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Model service base URL ("/" means same origin)
    #[arg(global = true, long, env = "FCOPT_MODEL_BASE")]
    pub model_base: Option<String>,

    #[arg(global = true, long, value_enum, default_value_t = BuildMode::Production)]
    pub mode: BuildMode,

    /// Page origin used when the base URL resolves to same-origin
    #[arg(global = true, long)]
    pub origin: Option<String>,

    #[arg(global = true, long, default_value_t = DEFAULT_TIMEOUT_MS)]
    pub timeout_ms: u64,

    #[command(flatten)]
    pub bounds: ValidationBounds,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            model_base: None,
            mode: BuildMode::Production,
            origin: None,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            bounds: ValidationBounds::default(),
        }
    }
}

/// Inclusive customer-count range. Shared by entry gating and the submit check.
#[derive(Args, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationBounds {
    #[arg(global = true, long, default_value_t = 100)]
    pub min_customers: u32,
    #[arg(global = true, long, default_value_t = 1000)]
    pub max_customers: u32,
}

impl Default for ValidationBounds {
    fn default() -> Self {
        Self {
            min_customers: 100,
            max_customers: 1000,
        }
    }
}

impl ValidationBounds {
    pub fn contains(&self, n: i64) -> bool {
        n >= i64::from(self.min_customers) && n <= i64::from(self.max_customers)
    }
}

impl ClientConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> FcResult<Self> {
        let content = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.check()?;
        Ok(config)
    }

    /// Rejects settings the session could never work with.
    pub fn check(&self) -> FcResult<()> {
        if self.timeout_ms == 0 {
            return Err(FcError::Config("timeout_ms must be positive".into()));
        }
        if self.bounds.min_customers == 0 || self.bounds.min_customers > self.bounds.max_customers
        {
            return Err(FcError::Config(format!(
                "invalid customer bounds [{}, {}]",
                self.bounds.min_customers, self.bounds.max_customers
            )));
        }
        Ok(())
    }

    /// Applies values the user actually supplied (flag or env) on top of a
    /// config loaded from file.
    pub fn merge_from_cli(&mut self, cli: &ClientConfig, matches: &ArgMatches) {
        let explicit = |id: &str| {
            matches!(
                matches.value_source(id),
                Some(ValueSource::CommandLine | ValueSource::EnvVariable)
            )
        };
        macro_rules! update_if_present {
            ($($field:ident).+, $arg_name:expr) => {
                if explicit($arg_name) {
                    self.$($field).+ = cli.$($field).+.clone();
                }
            };
        }

        update_if_present!(model_base, "model_base");
        update_if_present!(mode, "mode");
        update_if_present!(origin, "origin");
        update_if_present!(timeout_ms, "timeout_ms");
        update_if_present!(bounds.min_customers, "min_customers");
        update_if_present!(bounds.max_customers, "max_customers");
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn base_url(&self) -> BaseUrl {
        resolve_base_url(self.model_base.as_deref(), self.mode)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BaseUrl {
    SameOrigin,
    Explicit(String),
}

pub fn resolve_base_url(configured: Option<&str>, mode: BuildMode) -> BaseUrl {
    match configured {
        Some("/") => BaseUrl::SameOrigin,
        None | Some("") => match mode {
            BuildMode::Development => BaseUrl::Explicit(DEV_MODEL_BASE.to_string()),
            BuildMode::Production => BaseUrl::SameOrigin,
        },
        Some(base) => BaseUrl::Explicit(base.to_string()),
    }
}

impl BaseUrl {
    /// Builds an absolute endpoint URL. Same-origin needs the page origin.
    pub fn join(&self, origin: Option<&str>, path: &str) -> FcResult<String> {
        let base = match self {
            BaseUrl::Explicit(base) => base.as_str(),
            BaseUrl::SameOrigin => origin.filter(|o| !o.is_empty()).ok_or_else(|| {
                FcError::Config(
                    "model base resolves to same-origin but no --origin was given".into(),
                )
            })?,
        };
        Ok(format!(
            "{}/{}",
            base.trim_end_matches('/'),
            path.trim_start_matches('/')
        ))
    }
}
