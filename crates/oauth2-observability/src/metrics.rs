use prometheus::{IntCounterVec, Opts, Registry};

/// How an entry point call ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    Halt,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Continue => "continue",
            Outcome::Halt => "halt",
        }
    }
}

/// Counters for the middleware entry points, registered in their own registry.
#[derive(Clone)]
pub struct Metrics {
    pub registry: Registry,
    pub oauth2_requests_total: IntCounterVec,
    pub oauth2_errors_total: IntCounterVec,
}

impl Metrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let oauth2_requests_total = IntCounterVec::new(
            Opts::new(
                "oauth2_requests_total",
                "OAuth2 middleware calls by entry point and outcome",
            ),
            &["endpoint", "outcome"],
        )?;
        let oauth2_errors_total = IntCounterVec::new(
            Opts::new(
                "oauth2_errors_total",
                "Errors translated by the OAuth2 middleware, by entry point and error name",
            ),
            &["endpoint", "error"],
        )?;

        registry.register(Box::new(oauth2_requests_total.clone()))?;
        registry.register(Box::new(oauth2_errors_total.clone()))?;

        Ok(Self {
            registry,
            oauth2_requests_total,
            oauth2_errors_total,
        })
    }

    pub fn record(&self, endpoint: &str, outcome: Outcome) {
        self.oauth2_requests_total
            .with_label_values(&[endpoint, outcome.as_str()])
            .inc();
    }

    pub fn record_error(&self, endpoint: &str, error: &str) {
        self.oauth2_errors_total
            .with_label_values(&[endpoint, error])
            .inc();
    }
}
