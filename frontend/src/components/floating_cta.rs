use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct FloatingCtaProps {
    pub visible: bool,
    pub href: AttrValue,
}

#[function_component(FloatingCta)]
pub fn floating_cta(props: &FloatingCtaProps) -> Html {
    html! {
        <a
            id="floatingCta"
            class={classes!("floating-cta", props.visible.then(|| "visible"))}
            href={props.href.clone()}
        >
            {"🎬 Create your video free"}
        </a>
    }
}

#[derive(Properties, PartialEq)]
pub struct ProgressBarProps {
    pub percent: f64,
}

#[function_component(ProgressBar)]
pub fn progress_bar(props: &ProgressBarProps) -> Html {
    html! {
        <div class="progress-container">
            <div
                id="progressBar"
                class="progress-bar"
                style={format!("width: {:.2}%;", props.percent)}
            ></div>
        </div>
    }
}
