use yew::prelude::*;
use web_sys::MouseEvent;
use yew::{Children, Properties};

use crate::events::ClickTarget;
use crate::web::PageHandle;

pub const FAQ_ITEMS: [(&str, &str); 5] = [
    (
        "Do I need any video editing experience?",
        "None at all. Describe the video you want in plain words and the editor assembles scenes, voiceover and music for you. You can still fine-tune every cut if you want to.",
    ),
    (
        "Can I use the videos commercially?",
        "Yes. Every paid plan includes a commercial license for the stock media and music used in your exports.",
    ),
    (
        "How long does it take to make a video?",
        "Most short videos are ready in a few minutes. Longer explainers with custom voiceover usually take under fifteen.",
    ),
    (
        "Which languages are supported?",
        "Scripts, subtitles and AI voiceovers are available in more than 50 languages, with natural-sounding voices for each.",
    ),
    (
        "Is there a free plan?",
        "Yes. You can start for free and only upgrade when you need watermark-free exports or more AI minutes.",
    ),
];

#[derive(Properties, PartialEq)]
struct FaqItemProps {
    index: usize,
    question: String,
    open: bool,
    reveal_class: &'static str,
    children: Children,
}

#[function_component(FaqItem)]
fn faq_item(props: &FaqItemProps) -> Html {
    let handle = use_context::<PageHandle>();

    let toggle = {
        let index = props.index;
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            if let Some(handle) = &handle {
                handle.click(ClickTarget::FaqQuestion(index));
            }
        })
    };

    html! {
        <div
            class={classes!("faq-item", props.reveal_class, props.open.then(|| "active"))}
            data-reveal={faq_reveal_key(props.index)}
        >
            <button class="faq-question" onclick={toggle}>
                <span class="question-text">{&props.question}</span>
                <span class="toggle-icon">{if props.open { "−" } else { "+" }}</span>
            </button>
            <div class="faq-answer">
                { for props.children.iter() }
            </div>
        </div>
    }
}

pub fn faq_reveal_key(index: usize) -> String {
    format!("faq-{}", index)
}

#[derive(Properties, PartialEq)]
pub struct FaqProps {
    pub open: Option<usize>,
    /// Fade-in class per item, indexed like [`FAQ_ITEMS`].
    pub reveal_classes: Vec<&'static str>,
}

/// Single-open accordion; which panel is open is owned by the page controller.
#[function_component(Faq)]
pub fn faq(props: &FaqProps) -> Html {
    html! {
        <section id="faq" class="faq-section">
            <h2>{"Frequently Asked Questions"}</h2>
            {
                for FAQ_ITEMS.iter().enumerate().map(|(index, (question, answer))| html! {
                    <FaqItem
                        key={index}
                        index={index}
                        question={question.to_string()}
                        open={props.open == Some(index)}
                        reveal_class={props.reveal_classes.get(index).copied().unwrap_or("loading")}
                    >
                        <p>{*answer}</p>
                    </FaqItem>
                })
            }
        </section>
    }
}
