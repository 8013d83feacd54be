use yew::prelude::*;

use crate::components::exit_popup::ExitPopup;
use crate::components::faq::{faq_reveal_key, Faq, FAQ_ITEMS};
use crate::components::floating_cta::{FloatingCta, ProgressBar};
use crate::components::quiz_modal::QuizModal;
use crate::page::PageLayout;
use crate::testimonials::CardTransform;
use crate::view::PageView;
use crate::web::format_count;

const SIGNUP_URL: &str = "https://invideo.sjv.io/landing";
const PLACEHOLDER_IMG: &str = "data:image/gif;base64,R0lGODlhAQABAAAAACH5BAEKAAEALAAAAAABAAEAAAICTAEAOw==";

const FEATURES: [(&str, &str); 4] = [
    ("Prompt to video", "Type an idea and get a fully edited video with scenes, captions and music."),
    ("AI voiceovers", "Realistic voices in dozens of languages, or clone your own."),
    ("16M+ stock assets", "Licensed footage, images and tracks ready for every scene."),
    ("One-click resize", "Turn a YouTube video into Shorts, Reels and TikToks instantly."),
];

const POWER_CARDS: [(&str, &str); 3] = [
    ("⚡", "Ten times faster than traditional editing"),
    ("🌍", "Publish in 50+ languages without re-recording"),
    ("🎯", "Templates tuned for ads, explainers and social"),
];

pub const TESTIMONIALS: [(&str, &str, &str); 3] = [
    (
        "I went from one video a week to one a day. The AI script is a genuine time saver.",
        "Maya R.",
        "YouTube educator",
    ),
    (
        "Our product ads used to take an agency two weeks. Now it's an afternoon.",
        "Daniel K.",
        "E-commerce founder",
    ),
    (
        "Captions, music, resizing, all done for me. I just hit publish.",
        "Priya S.",
        "Content creator",
    ),
];

/// Sizes of the element sets rendered below.
pub fn page_layout() -> PageLayout {
    PageLayout {
        faq_panels: FAQ_ITEMS.len(),
        testimonials: TESTIMONIALS.len(),
    }
}

#[derive(Properties, PartialEq)]
pub struct LandingProps {
    pub view: PageView,
}

#[function_component(Landing)]
pub fn landing(props: &LandingProps) -> Html {
    let view = &props.view;

    let faq_reveal: Vec<&'static str> = (0..FAQ_ITEMS.len())
        .map(|i| view.reveal_class(&faq_reveal_key(i)))
        .collect();

    let showcase_loaded = view.loaded_images.contains("showcase");

    html! {
        <div class="landing-page">
            <ProgressBar percent={view.progress_percent} />

            <div id="particles" class="particles">
                {
                    for view.particles.iter().map(|p| html! {
                        <div class="particle" style={p.style_attr()}></div>
                    })
                }
            </div>

            <header class="hero">
                <h1>{"Turn any idea into a video in minutes"}</h1>
                <p class="hero-subtitle">
                    {"The AI video editor that writes, edits and voices your videos for you."}
                </p>
                <div class="hero-stats">
                    <div class="stat">
                        <span id="videoCounter" class="stat-value">{format_count(view.counter)}</span>
                        <span class="stat-label">{"videos created this week"}</span>
                    </div>
                    <div class="stat">
                        <span id="timeSaved" class="stat-value">{&view.elapsed_text}</span>
                        <span class="stat-label">{"editing time you just saved"}</span>
                    </div>
                </div>
                <div class="hero-actions">
                    <a class="cta-button" href={SIGNUP_URL}>{"Start creating for free"}</a>
                    <a class="secondary-link" href="#features">{"See how it works"}</a>
                </div>
            </header>

            <section id="features" class="features-section">
                <h2>{"Everything you need, nothing you don't"}</h2>
                <div class="feature-grid">
                    {
                        for FEATURES.iter().enumerate().map(|(i, (title, text))| {
                            let key = format!("feature-{}", i);
                            let reveal = view.reveal_class(&key);
                            html! {
                                <div class={classes!("feature-item", reveal)} data-reveal={key}>
                                    <h3>{*title}</h3>
                                    <p>{*text}</p>
                                </div>
                            }
                        })
                    }
                </div>
                <img
                    class="showcase-image"
                    alt="Editor preview"
                    data-lazy="showcase"
                    data-src={(!showcase_loaded).then(|| AttrValue::from("/assets/editor-preview.webp"))}
                    src={if showcase_loaded { "/assets/editor-preview.webp" } else { PLACEHOLDER_IMG }}
                />
            </section>

            <section class="power-section">
                {
                    for POWER_CARDS.iter().enumerate().map(|(i, (icon, text))| {
                        let key = format!("power-{}", i);
                        let reveal = view.reveal_class(&key);
                        html! {
                            <div class={classes!("power-card", reveal)} data-reveal={key}>
                                <span class="power-icon">{*icon}</span>
                                <p>{*text}</p>
                            </div>
                        }
                    })
                }
            </section>

            <section id="testimonials" class="testimonials-section">
                <h2>{"Creators love it"}</h2>
                <div class="testimonial-grid">
                    {
                        for TESTIMONIALS.iter().enumerate().map(|(i, (quote, name, role))| {
                            let key = format!("testimonial-{}", i);
                            let reveal = view.reveal_class(&key);
                            let transform = CardTransform::for_card(i, view.highlighted_testimonial);
                            html! {
                                <div
                                    class={classes!("testimonial-card", reveal)}
                                    data-reveal={key}
                                    style={transform.style()}
                                >
                                    <p class="testimonial-quote">{format!("“{}”", quote)}</p>
                                    <p class="testimonial-author">{*name}<span>{format!(" · {}", role)}</span></p>
                                </div>
                            }
                        })
                    }
                </div>
            </section>

            <Faq open={view.open_faq} reveal_classes={faq_reveal} />

            <section class="final-cta">
                <h2>{"Your next video is one prompt away"}</h2>
                <a class="cta-button" href={SIGNUP_URL}>{"Try it free"}</a>
                <a class="secondary-link" href="#faq">{"Still have questions?"}</a>
            </section>

            <FloatingCta visible={view.cta_visible} href={SIGNUP_URL} />
            <QuizModal state={view.quiz} />
            {
                if view.exit_overlay {
                    html! { <ExitPopup /> }
                } else {
                    html! {}
                }
            }
        </div>
    }
}
