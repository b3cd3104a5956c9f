use log::LevelFilter;

/// Build-time settings of the admin shell.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Prefix of every admin API route, without a trailing slash.
    pub api_base: String,
    pub log_level: LevelFilter,
}

impl AppConfig {
    pub fn from_build_env() -> Self {
        Self::from_values(option_env!("VERHAAL_API_BASE"), option_env!("VERHAAL_LOG_LEVEL"))
    }

    fn from_values(api_base: Option<&str>, log_level: Option<&str>) -> Self {
        let api_base = api_base
            .map(|base| base.trim().trim_end_matches('/'))
            .filter(|base| !base.is_empty())
            .unwrap_or("/api/admin")
            .to_string();
        let log_level = log_level
            .and_then(|level| level.parse().ok())
            .unwrap_or(LevelFilter::Info);
        Self {
            api_base,
            log_level,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_values(None, None)
    }
}
