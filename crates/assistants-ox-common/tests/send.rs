use std::fmt;
use std::sync::{Arc, Mutex};

use assistants_ox_common::{CommonRequestError, Endpoint, HttpMethod, RequestBuilder, RequestConfig};
use serde::{Serialize, Serializer};
use tracing::field::{Field, Visit};
use tracing::span::{Attributes, Id, Record};
use tracing::{Event, Metadata, Subscriber};

/// Collects every event field as `(name, rendered value)`.
#[derive(Clone, Default)]
struct FieldRecorder(Arc<Mutex<Vec<(String, String)>>>);

impl FieldRecorder {
    fn values(&self, name: &str) -> Vec<String> {
        self.0
            .lock()
            .unwrap()
            .iter()
            .filter(|(field, _)| field == name)
            .map(|(_, value)| value.clone())
            .collect()
    }
}

impl Visit for FieldRecorder {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.0
            .lock()
            .unwrap()
            .push((field.name().to_string(), format!("{value:?}")));
    }
}

impl Subscriber for FieldRecorder {
    fn enabled(&self, _: &Metadata<'_>) -> bool {
        true
    }

    fn new_span(&self, _: &Attributes<'_>) -> Id {
        Id::from_u64(1)
    }

    fn record(&self, _: &Id, _: &Record<'_>) {}

    fn record_follows_from(&self, _: &Id, _: &Id) {}

    fn event(&self, event: &Event<'_>) {
        event.record(&mut self.clone());
    }

    fn enter(&self, _: &Id) {}

    fn exit(&self, _: &Id) {}
}

struct Unserializable;

impl Serialize for Unserializable {
    fn serialize<S: Serializer>(&self, _serializer: S) -> Result<S::Ok, S::Error> {
        Err(serde::ser::Error::custom("refusing to serialize"))
    }
}

#[tokio::test]
async fn body_serialization_failure_happens_before_sending() {
    // Nothing listens on the discard port; a send attempt would surface as Http.
    let builder = RequestBuilder::new(
        reqwest::Client::new(),
        RequestConfig::new("http://127.0.0.1:9"),
    );
    let endpoint = Endpoint::new("threads/t1/messages", HttpMethod::Post);

    let result: Result<serde_json::Value, _> =
        builder.request_json(&endpoint, Some(&Unserializable)).await;

    match result {
        Err(CommonRequestError::Serialize(e)) => {
            assert!(e.to_string().contains("refusing to serialize"));
        }
        other => panic!("expected Serialize error, got {other:?}"),
    }
}

#[tokio::test]
async fn transport_failure_is_http_error() {
    let builder = RequestBuilder::new(
        reqwest::Client::new(),
        RequestConfig::new("http://127.0.0.1:9"),
    );
    let endpoint = Endpoint::new("threads/t1/messages", HttpMethod::Get);

    let result: Result<serde_json::Value, _> = builder.request(&endpoint).await;
    assert!(matches!(result, Err(CommonRequestError::Http(_))), "{result:?}");
}

#[tokio::test]
async fn request_log_carries_method_and_full_url() {
    let recorder = FieldRecorder::default();
    let _guard = tracing::subscriber::set_default(recorder.clone());

    let builder = RequestBuilder::new(
        reqwest::Client::new(),
        RequestConfig::new("http://127.0.0.1:9/v1/"),
    );
    let endpoint = Endpoint::new("/threads/t1/messages", HttpMethod::Delete);
    let _ = builder.request::<serde_json::Value>(&endpoint).await;

    assert!(
        recorder
            .values("url")
            .contains(&"http://127.0.0.1:9/v1/threads/t1/messages".to_string()),
        "{:?}",
        recorder.values("url")
    );
    assert!(recorder.values("method").contains(&"Delete".to_string()));
}
