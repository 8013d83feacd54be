//! Page input events and a small synchronous subscription bus. The browser
//! glue translates DOM events into [`PageEvent`]s; tests inject them directly.

use crate::quiz::QuizAnswer;
use crate::scroll::ScrollMetrics;

#[derive(Debug, Clone, PartialEq)]
pub enum ClickTarget {
    Link {
        href: String,
        text: String,
        page_location: String,
    },
    FaqQuestion(usize),
    QuizAnswer(QuizAnswer),
    QuizClose,
    ExitMaybeLater,
    /// Click inside the exit overlay. `on_backdrop` is false when the
    /// click landed on the inner card.
    ExitOverlay {
        on_backdrop: bool,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum IntersectTarget {
    Reveal(String),
    LazyImage(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum PageEvent {
    /// The document is ready and the page starts up.
    Load,
    /// The window `load` event: every resource finished loading.
    LoadComplete { load_time_ms: f64 },
    Scroll(ScrollMetrics),
    /// An animation frame requested by the page has started.
    Frame,
    Click(ClickTarget),
    MouseLeave { client_y: f64 },
    KeyDown { key: String },
    VisibilityChange { hidden: bool },
    Intersect(IntersectTarget),
    Error { message: String, file: String, line: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Load,
    LoadComplete,
    Scroll,
    Frame,
    Click,
    MouseLeave,
    KeyDown,
    VisibilityChange,
    Intersect,
    Error,
}

impl EventKind {
    pub const ALL: [EventKind; 10] = [
        EventKind::Load,
        EventKind::LoadComplete,
        EventKind::Scroll,
        EventKind::Frame,
        EventKind::Click,
        EventKind::MouseLeave,
        EventKind::KeyDown,
        EventKind::VisibilityChange,
        EventKind::Intersect,
        EventKind::Error,
    ];
}

impl PageEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            PageEvent::Load => EventKind::Load,
            PageEvent::LoadComplete { .. } => EventKind::LoadComplete,
            PageEvent::Scroll(_) => EventKind::Scroll,
            PageEvent::Frame => EventKind::Frame,
            PageEvent::Click(_) => EventKind::Click,
            PageEvent::MouseLeave { .. } => EventKind::MouseLeave,
            PageEvent::KeyDown { .. } => EventKind::KeyDown,
            PageEvent::VisibilityChange { .. } => EventKind::VisibilityChange,
            PageEvent::Intersect(_) => EventKind::Intersect,
            PageEvent::Error { .. } => EventKind::Error,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

pub type Handler = Box<dyn FnMut(&PageEvent)>;

pub trait EventSource {
    fn subscribe(&mut self, kind: EventKind, handler: Handler) -> SubscriptionId;

    fn unsubscribe(&mut self, id: SubscriptionId) -> bool;
}

/// Synchronous dispatcher. Handlers run in subscription order and to
/// completion before `dispatch` returns.
#[derive(Default)]
pub struct EventBus {
    handlers: Vec<(SubscriptionId, EventKind, Handler)>,
    next_id: u64,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of handlers that saw the event.
    pub fn dispatch(&mut self, event: &PageEvent) -> usize {
        let kind = event.kind();
        let mut delivered = 0;
        for (_, _, handler) in self.handlers.iter_mut().filter(|(_, k, _)| *k == kind) {
            handler(event);
            delivered += 1;
        }
        delivered
    }
}

impl EventSource for EventBus {
    fn subscribe(&mut self, kind: EventKind, handler: Handler) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.handlers.push((id, kind, handler));
        id
    }

    fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.handlers.len();
        self.handlers.retain(|(sub, _, _)| *sub != id);
        self.handlers.len() != before
    }
}
