use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounter, IntCounterVec, Opts, Registry, TextEncoder,
};

// ============================================================================
// Metrics Module - Prometheus metrics for observability
// ============================================================================
//
// Provides metrics for:
// - Command handling (outcome, latency)
// - Domain rule violations raised by the order aggregate
// - Voucher applications
// - Unit of work commit retries
//
// ============================================================================

pub struct Metrics {
    registry: Registry,

    // Command Metrics
    pub commands_handled: IntCounterVec,
    pub command_duration: HistogramVec,

    // Domain Metrics
    pub domain_rule_violations: IntCounterVec,
    pub voucher_applications: IntCounterVec,

    // Persistence Metrics
    pub orders_committed: IntCounter,
    pub commit_attempts_total: IntCounterVec,
    pub commit_retry_outcomes: IntCounterVec,
}

impl Metrics {
    pub fn new() -> anyhow::Result<Self> {
        let registry = Registry::new();

        let commands_handled = IntCounterVec::new(
            Opts::new("order_commands_handled_total", "Total order commands handled"),
            &["command", "outcome"],
        )?;
        registry.register(Box::new(commands_handled.clone()))?;

        let command_duration = HistogramVec::new(
            HistogramOpts::new("order_command_duration_seconds", "Order command handling duration")
                .buckets(vec![0.0005, 0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0]),
            &["command"],
        )?;
        registry.register(Box::new(command_duration.clone()))?;

        let domain_rule_violations = IntCounterVec::new(
            Opts::new("order_domain_rule_violations_total", "Order domain rule violations"),
            &["kind"],
        )?;
        registry.register(Box::new(domain_rule_violations.clone()))?;

        let voucher_applications = IntCounterVec::new(
            Opts::new("voucher_applications_total", "Voucher applications by outcome"),
            &["outcome"],
        )?;
        registry.register(Box::new(voucher_applications.clone()))?;

        let orders_committed = IntCounter::new(
            "orders_committed_total",
            "Total unit of work commits that wrote orders",
        )?;
        registry.register(Box::new(orders_committed.clone()))?;

        let commit_attempts_total = IntCounterVec::new(
            Opts::new("commit_attempts_total", "Unit of work commit attempts"),
            &["attempt"],
        )?;
        registry.register(Box::new(commit_attempts_total.clone()))?;

        let commit_retry_outcomes = IntCounterVec::new(
            Opts::new("commit_retry_outcomes_total", "Final outcome of retried commits"),
            &["outcome"],
        )?;
        registry.register(Box::new(commit_retry_outcomes.clone()))?;

        Ok(Self {
            registry,
            commands_handled,
            command_duration,
            domain_rule_violations,
            voucher_applications,
            orders_committed,
            commit_attempts_total,
            commit_retry_outcomes,
        })
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn record_command(&self, command: &str, outcome: &str, duration_secs: f64) {
        self.commands_handled.with_label_values(&[command, outcome]).inc();
        self.command_duration.with_label_values(&[command]).observe(duration_secs);
    }

    pub fn record_domain_violation(&self, kind: &str) {
        self.domain_rule_violations.with_label_values(&[kind]).inc();
    }

    pub fn record_voucher_application(&self, valid: bool) {
        let outcome = if valid { "applied" } else { "rejected" };
        self.voucher_applications.with_label_values(&[outcome]).inc();
    }

    pub fn record_commit_attempt(&self, attempt: u32) {
        self.commit_attempts_total.with_label_values(&[&attempt.to_string()]).inc();
    }

    /// `written` is false when a successful commit had nothing to flush
    pub fn record_commit_outcome(&self, success: bool, written: bool) {
        if success && written {
            self.orders_committed.inc();
        }
        let outcome = if success { "success" } else { "failure" };
        self.commit_retry_outcomes.with_label_values(&[outcome]).inc();
    }

    /// Render the registry in the Prometheus text exposition format
    pub fn render(&self) -> anyhow::Result<String> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }
}
