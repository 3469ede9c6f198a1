use anyhow::{Context, Result};

/// Scraper behavior against the source site
pub struct ScraperSettings {
    pub base_url: &'static str,
    pub user_agent: &'static str,
    pub timeout_secs: u64,
    pub rate_limit_ms: u64,
    pub retry_attempts: u32,
    pub retry_delay_ms: u64,
    pub date_pacing_ms: u64,
}

impl Default for ScraperSettings {
    fn default() -> Self {
        Self {
            base_url: "https://www.mtggoldfish.com",
            user_agent: "PauperIngest/1.0",
            timeout_secs: 30,
            rate_limit_ms: 1000, // 1 req/sec
            retry_attempts: 2,
            retry_delay_ms: 2000,
            date_pacing_ms: 1000,
        }
    }
}

/// Supabase REST sink connection
pub struct SinkSettings {
    pub rest_url: String,
    pub api_key: String,
    pub timeout_secs: u64,
}

impl SinkSettings {
    fn from_env() -> Result<Self> {
        let base_url = std::env::var("SUPABASE_URL").context("SUPABASE_URL is not set")?;
        let api_key = std::env::var("SUPABASE_ANON_KEY").context("SUPABASE_ANON_KEY is not set")?;

        Ok(Self {
            rest_url: format!("{}/rest/v1", base_url.trim_end_matches('/')),
            api_key,
            timeout_secs: 30,
        })
    }
}

/// Date window lengths per event kind
pub struct WindowSettings {
    pub league_window_days: u32,
    pub challenge_lookback_days: u32,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            league_window_days: 7,
            challenge_lookback_days: 15,
        }
    }
}

impl WindowSettings {
    fn from_env() -> Result<Self> {
        let mut settings = Self::default();
        if let Ok(days) = std::env::var("CHALLENGE_LOOKBACK_DAYS") {
            settings.challenge_lookback_days = days
                .parse()
                .context("CHALLENGE_LOOKBACK_DAYS must be a whole number of days")?;
        }
        Ok(settings)
    }
}

pub struct AppConfig {
    pub scraper: ScraperSettings,
    pub sink: SinkSettings,
    pub windows: WindowSettings,
}

impl AppConfig {
    /// Build the run configuration once at startup. Missing sink
    /// credentials are a fatal setup error; nothing is scraped before
    /// this succeeds.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            scraper: ScraperSettings::default(),
            sink: SinkSettings::from_env()?,
            windows: WindowSettings::from_env()?,
        })
    }
}
