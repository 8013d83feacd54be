use yew::prelude::*;
use web_sys::MouseEvent;

use crate::events::ClickTarget;
use crate::quiz::QuizAnswer;
use crate::view::QuizView;
use crate::web::PageHandle;

#[derive(Properties, PartialEq)]
pub struct QuizModalProps {
    pub state: QuizView,
}

#[function_component(QuizModal)]
pub fn quiz_modal(props: &QuizModalProps) -> Html {
    let handle = use_context::<PageHandle>();

    let click = {
        let handle = handle.clone();
        move |target: ClickTarget| {
            let handle = handle.clone();
            Callback::from(move |e: MouseEvent| {
                e.prevent_default();
                if let Some(handle) = &handle {
                    handle.click(target.clone());
                }
            })
        }
    };

    let body = match props.state {
        QuizView::Hidden => return html! {},
        QuizView::Open => html! {
            <>
                <h3>{"What kind of videos do you want to make?"}</h3>
                <div class="quiz-options">
                    {
                        for QuizAnswer::ALL.iter().map(|answer| html! {
                            <button
                                class="quiz-option"
                                data-answer={answer.id()}
                                onclick={click(ClickTarget::QuizAnswer(*answer))}
                            >
                                {answer.label()}
                            </button>
                        })
                    }
                </div>
            </>
        },
        QuizView::Answered(answer) => {
            let result = answer.result();
            html! {
                <div class="quiz-result">
                    <p class="quiz-result-label">{"Your creator style:"}</p>
                    <h3>{result.style}</h3>
                    <p>{result.description}</p>
                    <a class="cta-button" href="https://invideo.sjv.io/landing">{"Start creating for free"}</a>
                </div>
            }
        }
    };

    html! {
        <div id="quizModal" class="quiz-modal visible">
            <div class="quiz-content">
                <button class="quiz-close" aria-label="Close" onclick={click(ClickTarget::QuizClose)}>
                    {"×"}
                </button>
                { body }
            </div>
        </div>
    }
}
