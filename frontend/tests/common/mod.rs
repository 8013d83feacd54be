#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use landing::analytics::{Analytics, RecordingSink};
use landing::events::{ClickTarget, EventBus, PageEvent};
use landing::scroll::ScrollMetrics;
use landing::error::LandingResult;
use landing::storage::{Flag, FlagStore, MemoryStore};
use landing::timers::ManualClock;
use landing::view::{Effect, PageView};
use landing::{LandingConfig, PageController, PageLayout};

pub const LAYOUT: PageLayout = PageLayout {
    faq_panels: 4,
    testimonials: 3,
};

/// Flag store whose contents stay reachable after the page takes it, so a
/// test can change flags mid-session.
#[derive(Clone, Default)]
pub struct SharedStore(Rc<RefCell<MemoryStore>>);

impl SharedStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `flag` the way another tab on the same device would.
    pub fn set_elsewhere(&self, flag: Flag) {
        self.0.borrow_mut().set_flag(flag).unwrap();
    }

    pub fn flag(&self, flag: Flag) -> bool {
        self.0.borrow().is_flag_set(flag)
    }
}

impl FlagStore for SharedStore {
    fn get(&self, key: &str) -> Option<String> {
        self.0.borrow().get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> LandingResult<()> {
        self.0.borrow_mut().set(key, value)
    }
}

/// A page wired to a synthetic event bus, a hand-driven clock and an
/// in-memory analytics sink.
pub struct Harness {
    pub clock: Rc<ManualClock>,
    pub sink: Rc<RecordingSink>,
    pub bus: EventBus,
    pub controller: Rc<RefCell<PageController>>,
    pub view: PageView,
    pub effects: Vec<Effect>,
}

impl Harness {
    pub fn new(config: LandingConfig) -> Self {
        Self::with_store(config, MemoryStore::new())
    }

    pub fn with_store(config: LandingConfig, store: impl FlagStore + 'static) -> Self {
        let clock = Rc::new(ManualClock::new());
        let sink = Rc::new(RecordingSink::new());
        let controller = Rc::new(RefCell::new(PageController::new(
            config,
            LAYOUT,
            clock.clone(),
            Box::new(store),
            Analytics::new(sink.clone()),
            fastrand::Rng::with_seed(1234),
        )));
        let mut bus = EventBus::new();
        PageController::attach(&controller, &mut bus);

        Self {
            clock,
            sink,
            bus,
            controller,
            view: PageView::default(),
            effects: Vec::new(),
        }
    }

    pub fn loaded(config: LandingConfig) -> Self {
        let mut harness = Self::new(config);
        harness.emit(PageEvent::Load);
        harness
    }

    fn collect(&mut self) {
        let drained = self.controller.borrow_mut().drain_effects();
        for effect in drained {
            self.view.apply(effect.clone());
            self.effects.push(effect);
        }
    }

    pub fn emit(&mut self, event: PageEvent) {
        self.bus.dispatch(&event);
        self.collect();
    }

    pub fn click(&mut self, target: ClickTarget) {
        self.emit(PageEvent::Click(target));
    }

    /// Moves the clock forward and fires every timer that became due.
    pub fn advance(&mut self, ms: u64) {
        self.clock.advance(ms);
        self.controller.borrow_mut().run_due();
        self.collect();
    }

    pub fn scroll(&mut self, scroll_y: f64, document_height: f64, viewport_height: f64) {
        self.emit(PageEvent::Scroll(ScrollMetrics::new(
            scroll_y,
            document_height,
            viewport_height,
        )));
    }

    /// Scroll followed by the animation frame the page asked for.
    pub fn scroll_and_paint(&mut self, scroll_y: f64, document_height: f64, viewport_height: f64) {
        self.scroll(scroll_y, document_height, viewport_height);
        self.emit(PageEvent::Frame);
    }

    pub fn take_effects(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.effects)
    }

    pub fn depths(&self) -> Vec<String> {
        self.sink
            .named("scroll_depth")
            .iter()
            .map(|e| e.data["depth"].as_str().unwrap_or_default().to_string())
            .collect()
    }
}
