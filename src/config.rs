use std::time::Duration;
use anyhow::{anyhow, Context, Result};
use simplelog::LevelFilter;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

// Runtime settings, read from the environment (and a `.env` file, when the binary loads one).
#[derive(Debug, Clone)]
pub struct Settings {
    pub api_base_url: String,
    pub timeout: Duration,
    pub log_level: LevelFilter,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            log_level: LevelFilter::Info,
        }
    }
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    // Builds settings from any key lookup, so tests do not have to touch the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut settings = Settings::default();

        if let Some(base) = lookup("VTU_API_BASE_URL").filter(|v| !v.trim().is_empty()) {
            let base = base.trim().trim_end_matches('/');
            url::Url::parse(base).with_context(|| format!("VTU_API_BASE_URL is not a valid URL: {}", base))?;
            settings.api_base_url = base.to_string();
        }

        if let Some(secs) = lookup("VTU_TIMEOUT_SECS") {
            let secs: u64 = secs
                .trim()
                .parse()
                .with_context(|| format!("VTU_TIMEOUT_SECS must be a whole number of seconds, got `{}`", secs))?;
            settings.timeout = Duration::from_secs(secs);
        }

        if let Some(level) = lookup("VTU_LOG") {
            settings.log_level = level
                .trim()
                .parse()
                .map_err(|_| anyhow!("VTU_LOG must be one of off, error, warn, info, debug, trace; got `{}`", level))?;
        }

        Ok(settings)
    }

    pub fn endpoint(&self) -> String {
        format!("{}/single-post", self.api_base_url)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use super::*;

    fn settings(vars: &[(&str, &str)]) -> Result<Settings> {
        let vars: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        Settings::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_without_environment() {
        let s = settings(&[]).unwrap();
        assert_eq!(s.endpoint(), "http://localhost:8080/single-post");
        assert_eq!(s.timeout, Duration::from_secs(30));
        assert_eq!(s.log_level, LevelFilter::Info);
    }

    #[test]
    fn reads_overrides() {
        let s = settings(&[
            ("VTU_API_BASE_URL", "https://results.example.com/api/"),
            ("VTU_TIMEOUT_SECS", "5"),
            ("VTU_LOG", "debug"),
        ])
        .unwrap();
        assert_eq!(s.endpoint(), "https://results.example.com/api/single-post");
        assert_eq!(s.timeout, Duration::from_secs(5));
        assert_eq!(s.log_level, LevelFilter::Debug);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(settings(&[("VTU_TIMEOUT_SECS", "soon")]).is_err());
        assert!(settings(&[("VTU_LOG", "loud")]).is_err());
        assert!(settings(&[("VTU_API_BASE_URL", "not a url")]).is_err());
    }
}
