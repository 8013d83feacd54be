//! Browser glue: turns DOM events into [`PageEvent`]s, drives the
//! controller's timers with gloo, and hands effects to the Yew view.

use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use log::{debug, warn};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::js_sys;
use web_sys::{
    Element, ErrorEvent, Event, EventTarget, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, KeyboardEvent, MouseEvent, ScrollBehavior, ScrollIntoViewOptions,
    ScrollLogicalPosition,
};
use yew::prelude::*;

use crate::analytics::Analytics;
use crate::config::LandingConfig;
use crate::error::{LandingError, LandingResult};
use crate::events::{ClickTarget, EventBus, EventSource, IntersectTarget, PageEvent, SubscriptionId};
use crate::navigation::anchor_target;
use crate::page::{PageController, PageLayout};
use crate::reveal::{LAZY_KEY_ATTR, REVEAL_KEY_ATTR, REVEAL_ROOT_MARGIN, REVEAL_THRESHOLD};
use crate::scroll::ScrollMetrics;
use crate::storage::open_flag_store;
use crate::timers::{Clock, Millis, PerformanceClock};
use crate::view::{Effect, PageView};

impl Reducible for PageView {
    type Action = Vec<Effect>;

    fn reduce(self: Rc<Self>, effects: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        for effect in effects {
            next.apply(effect);
        }
        next.into()
    }
}

/// Shared handle the components use to feed events into the page.
#[derive(Clone)]
pub struct PageHandle {
    bus: Rc<RefCell<EventBus>>,
    controller: Rc<RefCell<PageController>>,
    clock: Rc<dyn Clock>,
    view: UseReducerDispatcher<PageView>,
    timer: Rc<RefCell<Option<Timeout>>>,
    subscriptions: Rc<Vec<SubscriptionId>>,
}

impl PartialEq for PageHandle {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.controller, &other.controller)
    }
}

impl PageHandle {
    pub fn new(config: LandingConfig, layout: PageLayout, view: UseReducerDispatcher<PageView>) -> Self {
        let clock: Rc<dyn Clock> = Rc::new(PerformanceClock);
        let controller = Rc::new(RefCell::new(PageController::new(
            config,
            layout,
            Rc::clone(&clock),
            open_flag_store(),
            Analytics::console(),
            fastrand::Rng::new(),
        )));

        let mut bus = EventBus::new();
        let subscriptions = PageController::attach(&controller, &mut bus);
        debug!("Page controller subscribed to {} event kinds", subscriptions.len());

        Self {
            bus: Rc::new(RefCell::new(bus)),
            controller,
            clock,
            view,
            timer: Rc::new(RefCell::new(None)),
            subscriptions: Rc::new(subscriptions),
        }
    }

    /// Unsubscribes the controller and cancels its pending timeout.
    pub fn detach(&self) {
        if let Ok(mut bus) = self.bus.try_borrow_mut() {
            for id in self.subscriptions.iter() {
                bus.unsubscribe(*id);
            }
        }
        drop(self.timer.replace(None));
    }

    pub fn config(&self) -> LandingConfig {
        self.controller.borrow().config().clone()
    }

    pub fn emit(&self, event: PageEvent) {
        match self.bus.try_borrow_mut() {
            Ok(mut bus) => {
                bus.dispatch(&event);
            }
            Err(_) => {
                warn!("Dropping re-entrant {:?} event", event.kind());
                return;
            }
        }
        self.pump();
    }

    pub fn click(&self, target: ClickTarget) {
        self.emit(PageEvent::Click(target));
    }

    /// Runs due timers, applies pending effects and re-arms the timeout
    /// for the next deadline.
    pub fn pump(&self) {
        let (effects, deadline) = {
            let mut controller = self.controller.borrow_mut();
            controller.run_due();
            (controller.drain_effects(), controller.next_deadline())
        };

        let (imperative, renderable): (Vec<Effect>, Vec<Effect>) =
            effects.into_iter().partition(Effect::is_imperative);
        for effect in imperative {
            match effect {
                Effect::RequestFrame => self.request_frame(),
                Effect::ScrollToAnchor(id) => scroll_to_anchor(&id),
                other => warn!("Unhandled imperative effect {:?}", other),
            }
        }
        if !renderable.is_empty() {
            self.view.dispatch(renderable);
        }
        self.schedule(deadline);
    }

    fn schedule(&self, deadline: Option<Millis>) {
        let next = deadline.map(|at| {
            let delay = at.saturating_sub(self.clock.now_ms()).min(u32::MAX as u64) as u32;
            let handle = self.clone();
            Timeout::new(delay, move || handle.pump())
        });
        let previous = self.timer.replace(next);
        drop(previous);
    }

    fn request_frame(&self) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let handle = self.clone();
        let callback = Closure::once_into_js(move || handle.emit(PageEvent::Frame));
        if let Err(e) = window.request_animation_frame(callback.unchecked_ref()) {
            warn!("requestAnimationFrame failed: {:?}", e);
        }
    }
}

/// Removes its DOM listener when dropped.
pub struct Listener {
    target: EventTarget,
    kind: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
    pub fn new<F>(target: &EventTarget, kind: &'static str, f: F) -> LandingResult<Self>
    where
        F: FnMut(Event) + 'static,
    {
        let callback = Closure::wrap(Box::new(f) as Box<dyn FnMut(Event)>);
        target.add_event_listener_with_callback(kind, callback.as_ref().unchecked_ref())?;
        Ok(Self {
            target: target.clone(),
            kind,
            callback,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.kind, self.callback.as_ref().unchecked_ref());
    }
}

pub fn read_scroll_metrics() -> Option<ScrollMetrics> {
    let window = web_sys::window()?;
    let document_height = window.document()?.document_element()?.scroll_height() as f64;
    let viewport_height = window.inner_height().ok()?.as_f64()?;
    let scroll_y = window.scroll_y().ok()?;
    Some(ScrollMetrics::new(scroll_y, document_height, viewport_height))
}

/// Milliseconds from navigation start to the end of the window `load`
/// event, once the document has finished loading.
fn navigation_load_time() -> Option<f64> {
    let timing = web_sys::window()?.performance()?.timing();
    let elapsed = timing.load_event_end() - timing.navigation_start();
    (elapsed > 0.0).then_some(elapsed)
}

/// Reports the page load time. When the window has already loaded it is
/// read from navigation timing; otherwise a `load` listener reports it.
pub fn watch_load_complete(handle: &PageHandle) -> LandingResult<Option<Listener>> {
    let window = web_sys::window().ok_or_else(|| LandingError::MissingElement("window".into()))?;
    let document = window
        .document()
        .ok_or_else(|| LandingError::MissingElement("document".into()))?;

    if document.ready_state() == "complete" {
        let load_time_ms = navigation_load_time()
            .or_else(|| window.performance().map(|p| p.now()))
            .unwrap_or_default();
        handle.emit(PageEvent::LoadComplete { load_time_ms });
        return Ok(None);
    }

    let h = handle.clone();
    let listener = Listener::new(&window, "load", move |_| {
        let load_time_ms = web_sys::window()
            .and_then(|w| w.performance())
            .map(|p| p.now())
            .unwrap_or_default();
        h.emit(PageEvent::LoadComplete { load_time_ms });
    })?;
    Ok(Some(listener))
}

/// Counter text grouped the way the reader's locale groups thousands.
#[cfg(target_arch = "wasm32")]
pub fn format_count(value: u64) -> String {
    let locale = web_sys::window()
        .and_then(|w| w.navigator().language())
        .unwrap_or_else(|| "en-US".to_string());
    js_sys::Number::from(value as f64).to_locale_string(&locale).into()
}

#[cfg(not(target_arch = "wasm32"))]
pub fn format_count(value: u64) -> String {
    crate::counter::format_grouped(value)
}

fn link_click(event: &Event) -> Option<ClickTarget> {
    let anchor = event
        .target()?
        .dyn_into::<Element>()
        .ok()?
        .closest("a")
        .ok()
        .flatten()?;
    let href = anchor.get_attribute("href")?;
    if anchor_target(&href).is_some() {
        event.prevent_default();
    }
    let page_location = web_sys::window()
        .and_then(|w| w.location().href().ok())
        .unwrap_or_default();
    Some(ClickTarget::Link {
        href,
        text: anchor.text_content().unwrap_or_default(),
        page_location,
    })
}

/// Registers every page-level listener. Dropping the result unregisters them.
pub fn install_listeners(handle: &PageHandle) -> LandingResult<Vec<Listener>> {
    let window = web_sys::window().ok_or_else(|| LandingError::MissingElement("window".into()))?;
    let document = window
        .document()
        .ok_or_else(|| LandingError::MissingElement("document".into()))?;
    let root = document
        .document_element()
        .ok_or_else(|| LandingError::MissingElement("documentElement".into()))?;

    let mut listeners = Vec::new();

    let h = handle.clone();
    listeners.push(Listener::new(&window, "scroll", move |_| {
        if let Some(metrics) = read_scroll_metrics() {
            h.emit(PageEvent::Scroll(metrics));
        }
    })?);

    let h = handle.clone();
    listeners.push(Listener::new(&document, "click", move |e| {
        if let Some(target) = link_click(&e) {
            h.click(target);
        }
    })?);

    let h = handle.clone();
    listeners.push(Listener::new(&root, "mouseleave", move |e| {
        if let Some(e) = e.dyn_ref::<MouseEvent>() {
            h.emit(PageEvent::MouseLeave {
                client_y: e.client_y() as f64,
            });
        }
    })?);

    let h = handle.clone();
    listeners.push(Listener::new(&document, "keydown", move |e| {
        if let Some(e) = e.dyn_ref::<KeyboardEvent>() {
            h.emit(PageEvent::KeyDown { key: e.key() });
        }
    })?);

    let h = handle.clone();
    let doc = document.clone();
    listeners.push(Listener::new(&document, "visibilitychange", move |_| {
        h.emit(PageEvent::VisibilityChange { hidden: doc.hidden() });
    })?);

    let h = handle.clone();
    listeners.push(Listener::new(&window, "error", move |e| {
        if let Some(e) = e.dyn_ref::<ErrorEvent>() {
            h.emit(PageEvent::Error {
                message: e.message(),
                file: e.filename(),
                line: e.lineno(),
            });
        }
    })?);

    Ok(listeners)
}

/// Disconnects its IntersectionObserver when dropped.
pub struct Observer {
    observer: IntersectionObserver,
    _callback: Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>,
}

impl Drop for Observer {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

fn observe_all<F>(selector: &str, init: &IntersectionObserverInit, mut on_enter: F) -> LandingResult<Observer>
where
    F: FnMut(&Element, &IntersectionObserver) + 'static,
{
    let callback = Closure::wrap(Box::new(move |entries: js_sys::Array, observer: IntersectionObserver| {
        for entry in entries.iter() {
            let entry: IntersectionObserverEntry = entry.unchecked_into();
            if entry.is_intersecting() {
                on_enter(&entry.target(), &observer);
            }
        }
    }) as Box<dyn FnMut(js_sys::Array, IntersectionObserver)>);

    let observer = IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), init)?;
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| LandingError::MissingElement("document".into()))?;
    let nodes = document.query_selector_all(selector)?;
    for i in 0..nodes.length() {
        if let Some(element) = nodes.item(i).and_then(|n| n.dyn_into::<Element>().ok()) {
            observer.observe(&element);
        }
    }

    Ok(Observer {
        observer,
        _callback: callback,
    })
}

/// Watches fade-in elements and lazy images.
pub fn observe_reveals(handle: &PageHandle) -> LandingResult<Vec<Observer>> {
    let reveal_init = IntersectionObserverInit::new();
    reveal_init.set_threshold(&JsValue::from_f64(REVEAL_THRESHOLD));
    reveal_init.set_root_margin(REVEAL_ROOT_MARGIN);

    let h = handle.clone();
    let reveals = observe_all(&format!("[{}]", REVEAL_KEY_ATTR), &reveal_init, move |el, _| {
        if let Some(key) = el.get_attribute(REVEAL_KEY_ATTR) {
            h.emit(PageEvent::Intersect(IntersectTarget::Reveal(key)));
        }
    })?;

    let h = handle.clone();
    let images = observe_all(
        &format!("img[{}]", LAZY_KEY_ATTR),
        &IntersectionObserverInit::new(),
        move |el, observer| {
            observer.unobserve(el);
            if let Some(key) = el.get_attribute(LAZY_KEY_ATTR) {
                h.emit(PageEvent::Intersect(IntersectTarget::LazyImage(key)));
            }
        },
    )?;

    Ok(vec![reveals, images])
}

/// Smooth-scrolls to the element with `id`. Missing targets are ignored.
pub fn scroll_to_anchor(id: &str) {
    let Some(element) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|doc| doc.get_element_by_id(id))
    else {
        debug!("No anchor target #{}", id);
        return;
    };
    let options = ScrollIntoViewOptions::new();
    options.set_behavior(ScrollBehavior::Smooth);
    options.set_block(ScrollLogicalPosition::Start);
    element.scroll_into_view_with_scroll_into_view_options(&options);
}

/// Registers the caching service worker. The outcome is only logged.
pub fn register_service_worker(path: &str) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let navigator = window.navigator();
    let supported = js_sys::Reflect::has(&navigator, &JsValue::from_str("serviceWorker")).unwrap_or(false);
    if !supported {
        debug!("Service workers not supported");
        return;
    }

    let promise = navigator.service_worker().register(path);
    spawn_local(async move {
        match JsFuture::from(promise).await {
            Ok(_) => gloo_console::log!("Service Worker registered"),
            Err(_) => gloo_console::log!("Service Worker registration failed"),
        }
    });
}
