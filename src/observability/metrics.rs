use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounterVec, IntGauge, Opts, Registry, TextEncoder,
};

#[derive(Clone)]
pub struct Metrics {
    registry: Registry,
    pub loads_accepted_total: IntCounterVec,
    pub loads_available: IntGauge,
    pub shipments_in_progress: IntGauge,
    pub chat_requests_total: IntCounterVec,
    pub search_latency_seconds: HistogramVec,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    pub fn new() -> Self {
        let registry = Registry::new();

        let loads_accepted_total = IntCounterVec::new(
            Opts::new("loads_accepted_total", "Load acceptance attempts by outcome"),
            &["outcome"],
        )
        .expect("valid loads_accepted_total metric");

        let loads_available = IntGauge::new("loads_available", "Loads currently on the board")
            .expect("valid loads_available metric");

        let shipments_in_progress =
            IntGauge::new("shipments_in_progress", "Shipments not yet delivered")
                .expect("valid shipments_in_progress metric");

        let chat_requests_total = IntCounterVec::new(
            Opts::new("chat_requests_total", "Chat messages by detected intent"),
            &["intent"],
        )
        .expect("valid chat_requests_total metric");

        let search_latency_seconds = HistogramVec::new(
            HistogramOpts::new(
                "search_latency_seconds",
                "Latency of load search requests in seconds",
            ),
            &["surface"],
        )
        .expect("valid search_latency_seconds metric");

        registry
            .register(Box::new(loads_accepted_total.clone()))
            .expect("register loads_accepted_total");
        registry
            .register(Box::new(loads_available.clone()))
            .expect("register loads_available");
        registry
            .register(Box::new(shipments_in_progress.clone()))
            .expect("register shipments_in_progress");
        registry
            .register(Box::new(chat_requests_total.clone()))
            .expect("register chat_requests_total");
        registry
            .register(Box::new(search_latency_seconds.clone()))
            .expect("register search_latency_seconds");

        Self {
            registry,
            loads_accepted_total,
            loads_available,
            shipments_in_progress,
            chat_requests_total,
            search_latency_seconds,
        }
    }

    pub fn encode(&self) -> Result<String, String> {
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();

        TextEncoder::new()
            .encode(&metric_families, &mut buffer)
            .map_err(|err| format!("failed to encode metrics: {err}"))?;

        String::from_utf8(buffer).map_err(|err| format!("metrics are not valid utf8: {err}"))
    }
}
