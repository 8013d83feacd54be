use yew::prelude::*;
use web_sys::{Element, MouseEvent};

use crate::events::ClickTarget;
use crate::web::PageHandle;

/// Exit-intent overlay. Its markup and styling only exist while it is shown.
#[function_component(ExitPopup)]
pub fn exit_popup() -> Html {
    let handle = use_context::<PageHandle>();
    let overlay_ref = use_node_ref();

    // Yew delegates listeners to the app root, so compare against the node itself
    let on_overlay = {
        let handle = handle.clone();
        let overlay_ref = overlay_ref.clone();
        Callback::from(move |e: MouseEvent| {
            let on_backdrop = match (e.target_dyn_into::<Element>(), overlay_ref.cast::<Element>()) {
                (Some(target), Some(overlay)) => target == overlay,
                _ => false,
            };
            if let Some(handle) = &handle {
                handle.click(ClickTarget::ExitOverlay { on_backdrop });
            }
        })
    };

    let maybe_later = Callback::from(move |e: MouseEvent| {
        e.prevent_default();
        e.stop_propagation();
        if let Some(handle) = &handle {
            handle.click(ClickTarget::ExitMaybeLater);
        }
    });

    html! {
        <div class="exit-intent-overlay" ref={overlay_ref} onclick={on_overlay}>
            <div class="exit-intent-card">
                <h2>{"Wait! Your first video is on us"}</h2>
                <p>{"Create a complete video from a single prompt. No credit card, no editing skills."}</p>
                <a class="exit-intent-cta" href="https://invideo.sjv.io/exit-offer">{"Claim my free video"}</a>
                <button class="exit-intent-later" onclick={maybe_later}>{"Maybe later"}</button>
            </div>
            <style>
                {r#"
                .exit-intent-overlay {
                    position: fixed;
                    inset: 0;
                    background: rgba(5, 5, 20, 0.85);
                    display: flex;
                    align-items: center;
                    justify-content: center;
                    z-index: 1000;
                    animation: exitFadeIn 0.3s ease;
                }

                .exit-intent-card {
                    background: #12122a;
                    border: 1px solid #00f0ff;
                    border-radius: 16px;
                    padding: 2.5rem;
                    max-width: 440px;
                    text-align: center;
                    color: #ffffff;
                    box-shadow: 0 0 40px rgba(0, 240, 255, 0.3);
                }

                .exit-intent-cta {
                    display: inline-block;
                    margin-top: 1.5rem;
                    padding: 0.9rem 2rem;
                    border-radius: 999px;
                    background: linear-gradient(90deg, #00f0ff, #ff2a6d);
                    color: #05051a;
                    font-weight: 700;
                    text-decoration: none;
                }

                .exit-intent-later {
                    display: block;
                    margin: 1rem auto 0;
                    background: none;
                    border: none;
                    color: #9a9ab8;
                    cursor: pointer;
                    text-decoration: underline;
                }

                @keyframes exitFadeIn {
                    from { opacity: 0; }
                    to { opacity: 1; }
                }
                "#}
            </style>
        </div>
    }
}
