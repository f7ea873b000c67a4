//! Invocation-scoped configuration.
//!
//! The invocation's own region and the verbosity toggle come from the host
//! environment once, here, and travel as explicit fields; nothing deeper in
//! the crate reads ambient state.

use std::time::Duration;

/// How the active-state poller paces itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollSettings {
    /// Sleep between describe attempts.
    pub interval: Duration,
    /// Maximum describe attempts before giving up with a distinct fault.
    /// `None` polls until the host cancels the invocation.
    pub max_attempts: Option<u32>,
}

impl Default for PollSettings {
    fn default() -> Self {
        PollSettings {
            interval: Duration::from_secs(5),
            max_attempts: Some(180),
        }
    }
}

/// Configuration for one invocation of the processor.
#[derive(Debug, Clone)]
pub struct HandlerConfig {
    /// Region this invocation runs in.
    pub region: String,
    pub poll: PollSettings,
    pub verbose: bool,
    /// Endpoint override for localstack-style testing.
    pub endpoint_url: Option<String>,
}

impl HandlerConfig {
    pub fn new(region: impl Into<String>) -> Self {
        HandlerConfig {
            region: region.into(),
            poll: PollSettings::default(),
            verbose: true,
            endpoint_url: None,
        }
    }

    /// Read the host environment: region from `AWS_REGION` (then
    /// `AWS_DEFAULT_REGION`), verbosity from `LOG` (on unless set to
    /// something other than `true`).
    pub fn from_env() -> Self {
        let region = std::env::var("AWS_REGION")
            .or_else(|_| std::env::var("AWS_DEFAULT_REGION"))
            .unwrap_or_else(|_| "us-east-1".to_string());
        let verbose = std::env::var("LOG").map(|v| v == "true").unwrap_or(true);

        HandlerConfig {
            verbose,
            ..HandlerConfig::new(region)
        }
    }

    pub fn with_poll(mut self, poll: PollSettings) -> Self {
        self.poll = poll;
        self
    }

    pub fn with_endpoint_url(mut self, url: impl Into<String>) -> Self {
        self.endpoint_url = Some(url.into());
        self
    }
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins when set; otherwise the config's verbosity picks the
/// default level. Safe to call more than once.
pub fn init_tracing(verbose: bool) {
    let fallback = if verbose { "info" } else { "warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(fallback));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
