//! The page controller owns every component's state, reacts to
//! [`PageEvent`]s and its own timers, and emits [`Effect`]s for the host
//! to render.

use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, info, warn};
use serde_json::{json, Value};

use crate::accordion::Accordion;
use crate::analytics::Analytics;
use crate::config::LandingConfig;
use crate::counter::{CounterPhase, VanityCounter};
use crate::events::{ClickTarget, EventKind, EventSource, IntersectTarget, PageEvent, SubscriptionId};
use crate::exit_intent::{Dismissal, ExitIntent};
use crate::navigation::{anchor_target, is_tracked_cta};
use crate::particles::generate_particles;
use crate::quiz::{LeadQuiz, QuizAnswer};
use crate::rate_limit::{Admission, RateLimiter};
use crate::scroll::{ScrollController, ScrollMetrics};
use crate::storage::FlagStore;
use crate::testimonials::TestimonialRotator;
use crate::timers::{Clock, Millis, TimerQueue};
use crate::reveal::RevealTracker;
use crate::view::Effect;

/// Sizes of the fixed element sets the page renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLayout {
    pub faq_panels: usize,
    pub testimonials: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Task {
    CounterStart,
    CounterTick,
    CounterDrift,
    QuizPrompt,
    ExitIntentDelay,
    RotateTestimonials,
    RevealLoaded,
    ScrollTrailing,
}

pub struct PageController {
    config: LandingConfig,
    layout: PageLayout,
    clock: Rc<dyn Clock>,
    store: Box<dyn FlagStore>,
    analytics: Analytics,
    rng: fastrand::Rng,
    timers: TimerQueue<Task>,
    scroll: ScrollController,
    limiter: RateLimiter,
    latest_scroll: Option<ScrollMetrics>,
    counter: VanityCounter,
    accordion: Accordion<usize>,
    quiz: LeadQuiz,
    exit: ExitIntent,
    testimonials: TestimonialRotator,
    reveal: RevealTracker,
    effects: Vec<Effect>,
    started: bool,
    load_time_reported: bool,
}

impl PageController {
    pub fn new(
        mut config: LandingConfig,
        layout: PageLayout,
        clock: Rc<dyn Clock>,
        store: Box<dyn FlagStore>,
        analytics: Analytics,
        rng: fastrand::Rng,
    ) -> Self {
        config.normalize();
        Self {
            scroll: ScrollController::new(config.backfill_milestones),
            limiter: RateLimiter::new(config.scroll_policy),
            counter: VanityCounter::new(config.counter_target, config.counter_ramp_steps),
            testimonials: TestimonialRotator::new(layout.testimonials),
            config,
            layout,
            clock,
            store,
            analytics,
            rng,
            timers: TimerQueue::new(),
            latest_scroll: None,
            accordion: Accordion::new(),
            quiz: LeadQuiz::new(),
            exit: ExitIntent::new(),
            reveal: RevealTracker::new(),
            effects: Vec::new(),
            started: false,
            load_time_reported: false,
        }
    }

    /// Subscribes the controller to every event kind of `source`.
    pub fn attach(this: &Rc<RefCell<Self>>, source: &mut dyn EventSource) -> Vec<SubscriptionId> {
        EventKind::ALL
            .iter()
            .map(|&kind| {
                let controller = Rc::clone(this);
                source.subscribe(
                    kind,
                    Box::new(move |event: &PageEvent| controller.borrow_mut().handle(event)),
                )
            })
            .collect()
    }

    pub fn config(&self) -> &LandingConfig {
        &self.config
    }

    pub fn next_deadline(&self) -> Option<Millis> {
        self.timers.next_deadline()
    }

    pub fn drain_effects(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.effects)
    }

    pub fn handle(&mut self, event: &PageEvent) {
        self.run_due();
        let now = self.clock.now_ms();

        match event {
            PageEvent::Load => self.on_load(now),
            PageEvent::LoadComplete { load_time_ms } => {
                if !std::mem::replace(&mut self.load_time_reported, true) {
                    self.analytics
                        .track_event("page_load_time", json!({ "load_time": load_time_ms }));
                }
            }
            PageEvent::Scroll(metrics) => self.on_scroll(now, *metrics),
            PageEvent::Frame => {
                if self.limiter.on_frame() {
                    self.flush_scroll();
                }
            }
            PageEvent::Click(target) => self.on_click(target),
            PageEvent::MouseLeave { client_y } => {
                if self.exit.on_pointer_leave(*client_y) {
                    debug!("Exit intent detected, waiting {}ms", self.config.exit_intent_delay_ms);
                    self.timers
                        .schedule_at(now + self.config.exit_intent_delay_ms, Task::ExitIntentDelay);
                }
            }
            PageEvent::KeyDown { key } => {
                if key == "Escape" {
                    self.on_escape();
                }
            }
            PageEvent::VisibilityChange { hidden } => {
                let name = if *hidden { "page_hidden" } else { "page_visible" };
                self.analytics.track_event(name, Value::Null);
            }
            PageEvent::Intersect(IntersectTarget::Reveal(key)) => {
                if self.reveal.reveal(key) {
                    self.effects.push(Effect::Reveal(key.clone()));
                }
            }
            PageEvent::Intersect(IntersectTarget::LazyImage(key)) => {
                if self.reveal.load_image(key) {
                    self.effects.push(Effect::LoadImage(key.clone()));
                }
            }
            PageEvent::Error { message, file, line } => {
                self.analytics.track_event(
                    "javascript_error",
                    json!({
                        "error_message": message,
                        "error_file": file,
                        "error_line": line,
                    }),
                );
            }
        }
    }

    /// Runs every timer due at the current clock time.
    pub fn run_due(&mut self) {
        let now = self.clock.now_ms();
        while let Some((at, task)) = self.timers.pop_due(now) {
            self.run_task(at, task);
        }
    }

    fn on_load(&mut self, now: Millis) {
        if self.started {
            return;
        }
        self.started = true;
        info!("Initializing landing page");

        let particles = generate_particles(&mut self.rng, self.config.particle_count);
        self.effects.push(Effect::SpawnParticles(particles));
        if let Some(index) = self.testimonials.highlighted() {
            self.effects.push(Effect::HighlightTestimonial(index));
            self.timers
                .schedule_at(now + self.config.testimonial_period_ms, Task::RotateTestimonials);
        }
        self.effects.push(Effect::BodyLoaded);

        self.timers
            .schedule_at(now + self.config.counter_start_delay_ms, Task::CounterStart);
        self.timers
            .schedule_at(now + self.config.quiz_delay_ms, Task::QuizPrompt);
        self.timers
            .schedule_at(now + self.config.reveal_delay_ms, Task::RevealLoaded);
    }

    fn on_scroll(&mut self, now: Millis, metrics: ScrollMetrics) {
        self.latest_scroll = Some(metrics);
        match self.limiter.admit(now) {
            Admission::RunNow => self.flush_scroll(),
            Admission::RequestFrame => self.effects.push(Effect::RequestFrame),
            Admission::ScheduleAt(at) => self.timers.schedule_at(at, Task::ScrollTrailing),
            Admission::Coalesced => {}
        }
    }

    fn flush_scroll(&mut self) {
        let Some(metrics) = self.latest_scroll else {
            return;
        };
        let update = self.scroll.apply(metrics);

        self.effects.push(Effect::SetProgress(update.progress_percent));
        if let Some(visible) = update.cta_visible {
            self.effects.push(Effect::SetCtaVisible(visible));
        }
        if let Some(text) = update.elapsed_text {
            self.effects.push(Effect::SetElapsedText(text));
        }
        for milestone in update.milestones {
            self.analytics
                .track_event("scroll_depth", json!({ "depth": milestone.label() }));
        }
    }

    fn on_click(&mut self, target: &ClickTarget) {
        match target {
            ClickTarget::Link { href, text, page_location } => {
                if is_tracked_cta(href, &self.config.cta_link_pattern) {
                    self.analytics.track_event(
                        "cta_click",
                        json!({
                            "button_text": text.trim(),
                            "page_location": page_location,
                        }),
                    );
                }
                if let Some(id) = anchor_target(href) {
                    self.effects.push(Effect::ScrollToAnchor(id.to_string()));
                }
            }
            ClickTarget::FaqQuestion(panel) => {
                if *panel >= self.layout.faq_panels {
                    warn!("Ignoring click on unknown FAQ panel {}", panel);
                    return;
                }
                let open = self.accordion.toggle(*panel);
                self.effects.push(Effect::SetAccordion(open));
            }
            ClickTarget::QuizAnswer(answer) => self.answer_quiz(*answer),
            ClickTarget::QuizClose => self.close_quiz("close_button"),
            ClickTarget::ExitMaybeLater => self.dismiss_exit(Dismissal::MaybeLater),
            ClickTarget::ExitOverlay { on_backdrop } => {
                if *on_backdrop {
                    self.dismiss_exit(Dismissal::Backdrop);
                }
            }
        }
    }

    fn on_escape(&mut self) {
        self.close_quiz("escape");
        self.dismiss_exit(Dismissal::Escape);
    }

    fn answer_quiz(&mut self, answer: QuizAnswer) {
        if !self.quiz.is_visible() || self.quiz.selected().is_some() {
            return;
        }
        let result = match self.quiz.select(answer, self.store.as_mut()) {
            Ok(result) => result,
            Err(e) => {
                warn!("Could not persist quiz completion: {}", e);
                answer.result()
            }
        };
        self.effects.push(Effect::ShowQuizResult(answer));
        self.analytics.track_event(
            "quiz_completed",
            json!({ "answer": answer.id(), "style": result.style }),
        );
    }

    fn close_quiz(&mut self, via: &str) {
        if self.quiz.close() {
            self.effects.push(Effect::HideQuiz);
            self.analytics.track_event(
                "quiz_closed",
                json!({ "via": via, "completed": self.quiz.selected().is_some() }),
            );
        }
    }

    fn dismiss_exit(&mut self, via: Dismissal) {
        if self.exit.dismiss() {
            self.effects.push(Effect::RemoveExitOverlay);
            self.analytics
                .track_event("exit_intent_dismissed", json!({ "via": via.as_str() }));
        }
    }

    fn run_task(&mut self, at: Millis, task: Task) {
        match task {
            Task::CounterStart => {
                self.timers
                    .schedule_at(at + self.config.counter_tick_ms, Task::CounterTick);
            }
            Task::CounterTick => {
                if let Some(value) = self.counter.tick() {
                    self.effects.push(Effect::SetCounter(value));
                }
                if self.counter.phase() == CounterPhase::SteadyDrift {
                    debug!("Counter reached {}, drifting", self.counter.target());
                    self.timers
                        .schedule_at(at + self.config.counter_drift_interval_ms, Task::CounterDrift);
                } else {
                    self.timers
                        .schedule_at(at + self.config.counter_tick_ms, Task::CounterTick);
                }
            }
            Task::CounterDrift => {
                let step = self.config.counter_drift_min..=self.config.counter_drift_max;
                if let Some(value) = self.counter.drift(&mut self.rng, step) {
                    self.effects.push(Effect::SetCounter(value));
                }
                self.timers
                    .schedule_at(at + self.config.counter_drift_interval_ms, Task::CounterDrift);
            }
            Task::QuizPrompt => {
                if self.quiz.on_prompt_timer(self.store.as_ref()) {
                    info!("Showing lead quiz");
                    self.effects.push(Effect::ShowQuiz);
                    self.analytics.track_event("quiz_shown", Value::Null);
                }
            }
            Task::ExitIntentDelay => match self.exit.on_delay_elapsed(self.store.as_mut()) {
                Ok(true) => {
                    info!("Showing exit intent popup");
                    self.effects.push(Effect::ShowExitOverlay);
                    self.analytics.track_event("exit_intent_shown", Value::Null);
                }
                Ok(false) => debug!("Exit intent popup already shown on this device"),
                Err(e) => warn!("Skipping exit intent popup: {}", e),
            },
            Task::RotateTestimonials => {
                if let Some(index) = self.testimonials.rotate() {
                    self.effects.push(Effect::HighlightTestimonial(index));
                    self.timers
                        .schedule_at(at + self.config.testimonial_period_ms, Task::RotateTestimonials);
                }
            }
            Task::RevealLoaded => {
                if self.reveal.mark_loaded() {
                    self.effects.push(Effect::RevealLoaded);
                }
            }
            Task::ScrollTrailing => {
                if self.limiter.on_deadline(at) {
                    self.flush_scroll();
                }
            }
        }
    }
}
