use log::{error, info, warn};
use yew::prelude::*;

use crate::config::LandingConfig;
use crate::events::PageEvent;
use crate::pages::landing::{page_layout, Landing};
use crate::view::PageView;
use crate::web::{
    install_listeners, observe_reveals, read_scroll_metrics, register_service_worker,
    watch_load_complete, PageHandle,
};

#[function_component(App)]
pub fn app() -> Html {
    let view = use_reducer(PageView::default);
    let handle = {
        let dispatcher = view.dispatcher();
        use_state(move || PageHandle::new(LandingConfig::from_document(), page_layout(), dispatcher))
    };

    // Wire the page once, after the first render so observed elements exist
    {
        let handle = (*handle).clone();
        use_effect_with_deps(
            move |_| {
                let listeners = install_listeners(&handle).unwrap_or_else(|e| {
                    error!("Failed to install page listeners: {}", e);
                    Vec::new()
                });
                let observers = observe_reveals(&handle).unwrap_or_else(|e| {
                    error!("Failed to observe reveal elements: {}", e);
                    Vec::new()
                });

                handle.emit(PageEvent::Load);
                if let Some(metrics) = read_scroll_metrics() {
                    handle.emit(PageEvent::Scroll(metrics));
                }
                let load_listener = watch_load_complete(&handle).unwrap_or_else(|e| {
                    error!("Failed to watch window load: {}", e);
                    None
                });
                if let Some(path) = handle.config().service_worker_path {
                    register_service_worker(&path);
                }
                info!("Landing page ready");

                move || {
                    drop(load_listener);
                    drop(observers);
                    drop(listeners);
                    handle.detach();
                }
            },
            (),
        );
    }

    {
        let loaded = view.body_loaded;
        use_effect_with_deps(
            move |loaded| {
                if *loaded {
                    if let Some(body) = web_sys::window()
                        .and_then(|w| w.document())
                        .and_then(|doc| doc.body())
                    {
                        if let Err(e) = body.class_list().add_1("loaded") {
                            warn!("Could not mark body as loaded: {:?}", e);
                        }
                    }
                }
                || ()
            },
            loaded,
        );
    }

    html! {
        <ContextProvider<PageHandle> context={(*handle).clone()}>
            <Landing view={(*view).clone()} />
        </ContextProvider<PageHandle>>
    }
}
