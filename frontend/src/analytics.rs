//! Fire-and-forget analytics. Delivery to a real collection backend is up to
//! whichever [`EventSink`] is plugged in; the page ships with [`ConsoleSink`].

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use chrono::{DateTime, Utc};
use log::info;
use serde::Serialize;
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackedEvent {
    pub name: String,
    pub data: Map<String, Value>,
    pub at: DateTime<Utc>,
}

pub trait EventSink {
    fn record(&self, event: &TrackedEvent);
}

/// Writes every event to the diagnostic log.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleSink;

impl EventSink for ConsoleSink {
    fn record(&self, event: &TrackedEvent) {
        info!("Event tracked: {} {}", event.name, Value::Object(event.data.clone()));
    }
}

/// Keeps events in memory so they can be inspected later.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: RefCell<Vec<TrackedEvent>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn names(&self) -> Vec<String> {
        self.events.borrow().iter().map(|e| e.name.clone()).collect()
    }

    pub fn named(&self, name: &str) -> Vec<TrackedEvent> {
        self.events
            .borrow()
            .iter()
            .filter(|e| e.name == name)
            .cloned()
            .collect()
    }
}

impl EventSink for RecordingSink {
    fn record(&self, event: &TrackedEvent) {
        self.events.borrow_mut().push(event.clone());
    }
}

/// Cheap cloneable handle to the configured sink.
#[derive(Clone)]
pub struct Analytics {
    sink: Rc<dyn EventSink>,
}

impl Analytics {
    pub fn new(sink: Rc<dyn EventSink>) -> Self {
        Self { sink }
    }

    pub fn console() -> Self {
        Self::new(Rc::new(ConsoleSink))
    }

    /// `data` is expected to be a JSON object; anything else is wrapped
    /// under a `value` key, and `null` means no payload.
    pub fn track_event(&self, name: &str, data: Value) {
        let data = match data {
            Value::Object(map) => map,
            Value::Null => Map::new(),
            other => {
                let mut map = Map::new();
                map.insert("value".to_string(), other);
                map
            }
        };
        self.sink.record(&TrackedEvent {
            name: name.to_string(),
            data,
            at: Utc::now(),
        });
    }
}

impl PartialEq for Analytics {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.sink, &other.sink)
    }
}

impl fmt::Debug for Analytics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Analytics").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn payload_defaults_to_empty_object() {
        let sink = Rc::new(RecordingSink::new());
        let analytics = Analytics::new(sink.clone());
        analytics.track_event("page_hidden", Value::Null);

        assert_eq!(sink.names(), vec!["page_hidden".to_string()]);
        assert!(sink.named("page_hidden")[0].data.is_empty());
    }

    #[test]
    fn object_payload_is_forwarded() {
        let sink = Rc::new(RecordingSink::new());
        let analytics = Analytics::new(sink.clone());
        analytics.track_event("scroll_depth", json!({ "depth": "25%" }));

        let event = &sink.named("scroll_depth")[0];
        assert_eq!(event.data["depth"], "25%");
    }

    #[test]
    fn scalar_payload_is_wrapped() {
        let sink = Rc::new(RecordingSink::new());
        Analytics::new(sink.clone()).track_event("ping", json!(3));
        assert_eq!(sink.named("ping")[0].data["value"], 3);
    }
}
