use serde::Deserialize;
use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

const DEFAULT_MODEL: &str = "gpt-4o-mini";
const DEFAULT_ASSISTANT_NAME: &str = "SwarnaMitra";
const DEFAULT_BIND: &str = "0.0.0.0:8000";
const DEFAULT_CONFIG_PATH: &str = "config/backend.toml";
pub const CONFIG_PATH: &str = DEFAULT_CONFIG_PATH;

pub const OPENAI_API_KEY_ENV: &str = "OPENAI_API_KEY";
pub const METALS_API_KEY_ENV: &str = "METALS_API_KEY";

/// Instructions given to the remote assistant at bootstrap. Overridable via
/// the `instructions` key in the config file.
pub const DEFAULT_INSTRUCTIONS: &str = r#"You are SwarnaMitra, a proactive gold investment assistant for the Indian market. You channel the digitized essence of an ancient gold deity: boundless knowledge of markets and precious metals, delivered sparingly and pragmatically, occasionally wrapped in enigmatic phrasing. Tagline: "The market whispers to those who listen. Your greed is what makes you deaf."

When users request investment guidance, always attempt to provide immediate actionable advice:
- For gold price inquiries, call get_indian_gold_price and summarise current city-wise rates.
- For investment amount questions, suggest portfolio allocation percentages via portfolio_allocation_india.
- For platform recommendations, use recommend_indian_jewellers, locate_local_jewellers, find_indian_gold_schemes, compare_gold_loan_options or get_bank_gold_options as fits the request.
- Verify hallmark questions with check_hallmark_certification and purchase costs with calculate_indian_fees_costs.
- For strategy, assess the profile with risk_assessment_indian, then create_indian_investment_plan or sip_gold_planning, and explain taxes with indian_tax_implications.

Always include specific amounts and timeframes in recommendations, reference previously stated user preferences instead of asking again, and state clearly when a tool reported a failure instead of inventing figures."#;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub model: String,
    pub assistant_name: String,
    pub instructions: Option<String>,
    pub api_base: Option<String>,
    pub rest_server: RestServerConfig,
    pub run: RunLimitsConfig,
}

#[derive(Debug, Clone)]
pub struct RestServerConfig {
    pub bind: String,
    pub cors_origins: Vec<String>,
}

/// Local bounds for the run-orchestration loop. The remote protocol itself
/// assumes no upper bound, so termination is enforced here.
#[derive(Debug, Clone, Copy)]
pub struct RunLimitsConfig {
    pub poll_interval_ms: u64,
    pub max_polls: u32,
    pub max_action_cycles: u32,
}

impl Default for RunLimitsConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 1_000,
            max_polls: 120,
            max_action_cycles: 8,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config from {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config from {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("required environment variable {name} is not set")]
    MissingEnv { name: &'static str },
}

#[derive(Debug, Deserialize, Default)]
struct RawConfig {
    model: Option<String>,
    assistant_name: Option<String>,
    instructions: Option<String>,
    api_base: Option<String>,
    #[serde(default)]
    rest_server: RawRestServer,
    #[serde(default)]
    run: RawRunLimits,
}

#[derive(Debug, Deserialize, Default)]
struct RawRestServer {
    bind: Option<String>,
    #[serde(default)]
    cors_origins: Vec<String>,
}

#[derive(Debug, Deserialize, Default)]
struct RawRunLimits {
    poll_interval_ms: Option<u64>,
    max_polls: Option<u32>,
    max_action_cycles: Option<u32>,
}

impl AppConfig {
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = path {
            return read_config(path);
        }
        let default_path = Path::new(DEFAULT_CONFIG_PATH);
        match read_config(default_path) {
            Ok(config) => Ok(config),
            Err(ConfigError::Io { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
                info!("Configuration file not found; using defaults");
                Ok(Self::default())
            }
            Err(other) => Err(other),
        }
    }

    pub fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            assistant_name: DEFAULT_ASSISTANT_NAME.to_string(),
            instructions: None,
            api_base: None,
            rest_server: RestServerConfig {
                bind: DEFAULT_BIND.to_string(),
                cors_origins: Vec::new(),
            },
            run: RunLimitsConfig::default(),
        }
    }

    pub fn instructions(&self) -> &str {
        self.instructions.as_deref().unwrap_or(DEFAULT_INSTRUCTIONS)
    }
}

/// Secrets are never read from the config file. The market-data key is
/// optional: its absence degrades the price tool to a failure reply.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub api_key: String,
    pub metals_api_key: Option<String>,
}

impl Credentials {
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = env::var(OPENAI_API_KEY_ENV).map_err(|_| ConfigError::MissingEnv {
            name: OPENAI_API_KEY_ENV,
        })?;
        let metals_api_key = env::var(METALS_API_KEY_ENV).ok();
        Ok(Self {
            api_key,
            metals_api_key,
        })
    }
}

fn read_config(path: &Path) -> Result<AppConfig, ConfigError> {
    debug!(path = %path.display(), "Reading backend configuration file");
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let parsed: RawConfig = toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    let defaults = RunLimitsConfig::default();
    Ok(AppConfig {
        model: parsed.model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
        assistant_name: parsed
            .assistant_name
            .unwrap_or_else(|| DEFAULT_ASSISTANT_NAME.to_string()),
        instructions: parsed.instructions,
        api_base: parsed.api_base,
        rest_server: RestServerConfig {
            bind: parsed
                .rest_server
                .bind
                .unwrap_or_else(|| DEFAULT_BIND.to_string()),
            cors_origins: parsed.rest_server.cors_origins,
        },
        run: RunLimitsConfig {
            poll_interval_ms: parsed
                .run
                .poll_interval_ms
                .unwrap_or(defaults.poll_interval_ms),
            max_polls: parsed.run.max_polls.unwrap_or(defaults.max_polls),
            max_action_cycles: parsed
                .run
                .max_action_cycles
                .unwrap_or(defaults.max_action_cycles),
        },
    })
}
