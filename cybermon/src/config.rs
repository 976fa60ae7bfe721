//! Runtime settings: built-in defaults, then `CYBERMON_*` environment
//! variables, then command-line flags.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use cybermon_sampler::EngineConfig;

pub const ENV_INTERVAL_MS: &str = "CYBERMON_INTERVAL_MS";
pub const ENV_FPS: &str = "CYBERMON_FPS";
pub const ENV_PROC_EVERY: &str = "CYBERMON_PROC_EVERY";
pub const ENV_DISK_PATH: &str = "CYBERMON_DISK_PATH";
pub const ENV_LOG: &str = "CYBERMON_LOG";

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub interval_ms: u64,
    pub fps: u32,
    pub proc_every: u64,
    pub disk_path: PathBuf,
    pub log_file: Option<PathBuf>,
    pub once: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            interval_ms: 1_000,
            fps: 4,
            proc_every: 2,
            disk_path: PathBuf::from("/"),
            log_file: None,
            once: false,
        }
    }
}

impl Settings {
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|k| std::env::var(k).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each variable.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, String> {
        let mut s = Self::default();
        if let Some(v) = lookup(ENV_INTERVAL_MS) {
            s.interval_ms = parse_positive(ENV_INTERVAL_MS, &v)?;
        }
        if let Some(v) = lookup(ENV_FPS) {
            s.fps = parse_positive(ENV_FPS, &v)?;
        }
        if let Some(v) = lookup(ENV_PROC_EVERY) {
            s.proc_every = parse_positive(ENV_PROC_EVERY, &v)?;
        }
        if let Some(v) = lookup(ENV_DISK_PATH).filter(|v| !v.is_empty()) {
            s.disk_path = PathBuf::from(v);
        }
        s.log_file = lookup(ENV_LOG).filter(|v| !v.is_empty()).map(PathBuf::from);
        Ok(s)
    }

    pub fn sample_interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis((1_000 / u64::from(self.fps.max(1))).max(1))
    }

    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            proc_refresh_every: self.proc_every,
            disk_path: self.disk_path.clone(),
            ..EngineConfig::default()
        }
    }
}

/// Parse a strictly positive number, naming `what` in the error.
pub fn parse_positive<T>(what: &str, raw: &str) -> Result<T, String>
where
    T: FromStr + PartialEq + Default,
{
    match raw.trim().parse::<T>() {
        Ok(v) if v != T::default() => Ok(v),
        Ok(_) => Err(format!("{what} must be greater than 0")),
        Err(_) => Err(format!("{what}: expected a positive number, got {raw:?}")),
    }
}
