use biometrics::{Collector, Counter, Moments};

pub(crate) static CLIENT_REQUESTS: Counter = Counter::new("parley.client.requests");
pub(crate) static CLIENT_REQUEST_ERRORS: Counter = Counter::new("parley.client.request_errors");
pub(crate) static CLIENT_REQUEST_DURATION: Moments =
    Moments::new("parley.client.request_duration_seconds");

pub(crate) static CHAT_TURNS: Counter = Counter::new("parley.chat.turns");
pub(crate) static CHAT_SERVICE_ERRORS: Counter = Counter::new("parley.chat.service_errors");
pub(crate) static CHAT_UNEXPECTED_ERRORS: Counter = Counter::new("parley.chat.unexpected_errors");

/// Register this crate's biometrics with the provided collector.
pub fn register_biometrics(collector: Collector) {
    collector.register_counter(&CLIENT_REQUESTS);
    collector.register_counter(&CLIENT_REQUEST_ERRORS);
    collector.register_moments(&CLIENT_REQUEST_DURATION);

    collector.register_counter(&CHAT_TURNS);
    collector.register_counter(&CHAT_SERVICE_ERRORS);
    collector.register_counter(&CHAT_UNEXPECTED_ERRORS);
}
