use serde::{Deserialize, Serialize};
use std::fs;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub seed: Option<u64>,
    pub luckiness: f64,
    pub player_name: String,
    pub policy: String,
    pub adaptive: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    Default,
    File,
    Env,
}

#[derive(Debug, Clone, Copy)]
pub struct ConfigSources {
    pub seed: ValueSource,
    pub luckiness: ValueSource,
    pub player_name: ValueSource,
    pub policy: ValueSource,
    pub adaptive: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            seed: ValueSource::Default,
            luckiness: ValueSource::Default,
            player_name: ValueSource::Default,
            policy: ValueSource::Default,
            adaptive: ValueSource::Default,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigResolved {
    pub config: Config,
    pub sources: ConfigSources,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed: None,
            luckiness: 1.0,
            player_name: "You".into(),
            policy: "baseline".into(),
            adaptive: true,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Invalid(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}
impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "cannot read config file: {}", e),
            ConfigError::Parse(e) => write!(f, "cannot parse config file: {}", e),
            ConfigError::Invalid(msg) => f.write_str(msg),
        }
    }
}

pub fn load() -> Result<Config, ConfigError> {
    load_with_sources().map(|resolved| resolved.config)
}

/// Defaults, then the TOML file named by `QUARTET_CONFIG`, then `QUARTET_*` env vars.
pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    let mut cfg = Config::default();
    let mut sources = ConfigSources::default();

    if let Ok(path) = std::env::var("QUARTET_CONFIG")
        && !path.is_empty()
    {
        let s = fs::read_to_string(path)?;
        let f: FileConfig = toml::from_str(&s)?;
        if let Some(v) = f.seed {
            cfg.seed = Some(v);
            sources.seed = ValueSource::File;
        }
        if let Some(v) = f.luckiness {
            cfg.luckiness = v;
            sources.luckiness = ValueSource::File;
        }
        if let Some(v) = f.player_name {
            cfg.player_name = v;
            sources.player_name = ValueSource::File;
        }
        if let Some(v) = f.policy {
            cfg.policy = v;
            sources.policy = ValueSource::File;
        }
        if let Some(v) = f.adaptive {
            cfg.adaptive = v;
            sources.adaptive = ValueSource::File;
        }
    }

    if let Ok(seed) = std::env::var("QUARTET_SEED")
        && !seed.is_empty()
    {
        cfg.seed = Some(
            seed.parse()
                .map_err(|_| ConfigError::Invalid("Invalid seed".into()))?,
        );
        sources.seed = ValueSource::Env;
    }
    if let Ok(luck) = std::env::var("QUARTET_LUCK")
        && !luck.is_empty()
    {
        cfg.luckiness = luck
            .parse()
            .map_err(|_| ConfigError::Invalid("Invalid luckiness".into()))?;
        sources.luckiness = ValueSource::Env;
    }
    if let Ok(name) = std::env::var("QUARTET_PLAYER")
        && !name.is_empty()
    {
        cfg.player_name = name;
        sources.player_name = ValueSource::Env;
    }
    if let Ok(policy) = std::env::var("QUARTET_POLICY")
        && !policy.is_empty()
    {
        cfg.policy = policy;
        sources.policy = ValueSource::Env;
    }
    if let Ok(adap) = std::env::var("QUARTET_ADAPTIVE")
        && !adap.is_empty()
    {
        cfg.adaptive =
            parse_bool(&adap).ok_or_else(|| ConfigError::Invalid("Invalid adaptive".into()))?;
        sources.adaptive = ValueSource::Env;
    }

    validate(&cfg)?;
    Ok(ConfigResolved {
        config: cfg,
        sources,
    })
}

#[derive(Debug, Deserialize)]
struct FileConfig {
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    luckiness: Option<f64>,
    #[serde(default)]
    player_name: Option<String>,
    #[serde(default)]
    policy: Option<String>,
    #[serde(default)]
    adaptive: Option<bool>,
}

fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if !cfg.luckiness.is_finite() {
        return Err(ConfigError::Invalid(
            "Invalid configuration: luckiness must be a finite number".into(),
        ));
    }
    if cfg.player_name.trim().is_empty() {
        return Err(ConfigError::Invalid(
            "Invalid configuration: player_name must not be empty".into(),
        ));
    }
    if !quartet_ai::PLAYER_NAMES.contains(&cfg.policy.as_str()) {
        return Err(ConfigError::Invalid(format!(
            "Invalid configuration: unknown policy '{}'",
            cfg.policy
        )));
    }
    Ok(())
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" => Some(false),
        _ => None,
    }
}
