use clap::Parser;
use std::time::Duration;

pub const DEFAULT_LIMIT: u32 = 10;

// CLI argument structure, every flag can also come from the environment
#[derive(Parser, Debug, Clone)]
#[command(name = "metered-gateway")]
#[command(about = "HTTP fetch gateway with per-user rate limits and statistics")]
pub struct Args {
    // Port to run the server on
    #[arg(short, long, env = "PORT", default_value_t = 10000)]
    pub port: u16,

    // Successful fetches allowed per user per window.
    // Kept as a string so a malformed value falls back to the default
    #[arg(long, env = "REQUESTS_PER_MINUTE_LIMIT")]
    pub requests_per_minute_limit: Option<String>,

    // Rate limit window in seconds
    #[arg(long, default_value_t = 60)]
    pub rate_window: u64,

    // Outbound fetch timeout in seconds
    #[arg(long, default_value_t = 30)]
    pub fetch_timeout: u64,

    // How often pending window resets are swept, in seconds
    #[arg(long, default_value_t = 1)]
    pub sweep_interval: u64,

    // Evict idle counters after this many windows, 0 disables eviction
    #[arg(long, default_value_t = 10)]
    pub idle_eviction_windows: u32,
}

/// Validated runtime configuration.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub port: u16,
    pub limit: u32,
    pub rate_window: Duration,
    pub fetch_timeout: Duration,
    pub sweep_interval: Duration,
    pub idle_eviction: Option<Duration>,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            port: 10000,
            limit: DEFAULT_LIMIT,
            rate_window: Duration::from_secs(60),
            fetch_timeout: Duration::from_secs(30),
            sweep_interval: Duration::from_secs(1),
            idle_eviction: Some(Duration::from_secs(600)),
        }
    }
}

impl From<Args> for GatewayConfig {
    fn from(args: Args) -> Self {
        let rate_window = Duration::from_secs(args.rate_window.max(1));
        let idle_eviction = match args.idle_eviction_windows {
            0 => None,
            windows => Some(rate_window * windows),
        };
        Self {
            port: args.port,
            limit: parse_limit(args.requests_per_minute_limit.as_deref()),
            rate_window,
            fetch_timeout: Duration::from_secs(args.fetch_timeout.max(1)),
            sweep_interval: Duration::from_secs(args.sweep_interval.max(1)),
            idle_eviction,
        }
    }
}

/// Parses the per-minute limit. Absent, malformed or zero values fall back
/// to [`DEFAULT_LIMIT`].
pub fn parse_limit(raw: Option<&str>) -> u32 {
    let Some(raw) = raw else {
        return DEFAULT_LIMIT;
    };
    match raw.trim().parse::<u32>() {
        Ok(limit) if limit > 0 => limit,
        _ => {
            tracing::warn!(value = raw, fallback = DEFAULT_LIMIT, "invalid request limit, using default");
            DEFAULT_LIMIT
        }
    }
}
