use std::collections::HashSet;

use crate::particles::ParticleStyle;
use crate::quiz::QuizAnswer;

/// DOM mutation requested by the page controller.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    BodyLoaded,
    SpawnParticles(Vec<ParticleStyle>),
    SetProgress(f64),
    SetCtaVisible(bool),
    SetElapsedText(String),
    SetCounter(u64),
    SetAccordion(Option<usize>),
    ShowQuiz,
    HideQuiz,
    ShowQuizResult(QuizAnswer),
    ShowExitOverlay,
    RemoveExitOverlay,
    HighlightTestimonial(usize),
    RevealLoaded,
    Reveal(String),
    LoadImage(String),
    ScrollToAnchor(String),
    RequestFrame,
}

impl Effect {
    /// Effects the host performs imperatively instead of rendering.
    pub fn is_imperative(&self) -> bool {
        matches!(self, Effect::ScrollToAnchor(_) | Effect::RequestFrame)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizView {
    Hidden,
    Open,
    Answered(QuizAnswer),
}

/// Everything the landing page renders from controller state.
#[derive(Debug, Clone, PartialEq)]
pub struct PageView {
    pub body_loaded: bool,
    pub particles: Vec<ParticleStyle>,
    pub progress_percent: f64,
    pub cta_visible: bool,
    pub elapsed_text: String,
    pub counter: u64,
    pub open_faq: Option<usize>,
    pub quiz: QuizView,
    pub exit_overlay: bool,
    pub highlighted_testimonial: Option<usize>,
    pub reveal_loaded: bool,
    pub revealed: HashSet<String>,
    pub loaded_images: HashSet<String>,
}

impl Default for PageView {
    fn default() -> Self {
        Self {
            body_loaded: false,
            particles: Vec::new(),
            progress_percent: 0.0,
            cta_visible: false,
            elapsed_text: "0m 0s".to_string(),
            counter: 0,
            open_faq: None,
            quiz: QuizView::Hidden,
            exit_overlay: false,
            highlighted_testimonial: None,
            reveal_loaded: false,
            revealed: HashSet::new(),
            loaded_images: HashSet::new(),
        }
    }
}

impl PageView {
    pub fn apply(&mut self, effect: Effect) {
        match effect {
            Effect::BodyLoaded => self.body_loaded = true,
            Effect::SpawnParticles(particles) => self.particles = particles,
            Effect::SetProgress(percent) => self.progress_percent = percent,
            Effect::SetCtaVisible(visible) => self.cta_visible = visible,
            Effect::SetElapsedText(text) => self.elapsed_text = text,
            Effect::SetCounter(value) => self.counter = value,
            Effect::SetAccordion(open) => self.open_faq = open,
            Effect::ShowQuiz => self.quiz = QuizView::Open,
            Effect::HideQuiz => self.quiz = QuizView::Hidden,
            Effect::ShowQuizResult(answer) => self.quiz = QuizView::Answered(answer),
            Effect::ShowExitOverlay => self.exit_overlay = true,
            Effect::RemoveExitOverlay => self.exit_overlay = false,
            Effect::HighlightTestimonial(index) => self.highlighted_testimonial = Some(index),
            Effect::RevealLoaded => self.reveal_loaded = true,
            Effect::Reveal(key) => {
                self.revealed.insert(key);
            }
            Effect::LoadImage(key) => {
                self.loaded_images.insert(key);
            }
            Effect::ScrollToAnchor(_) | Effect::RequestFrame => {}
        }
    }

    /// Class list of a fade-in element.
    pub fn reveal_class(&self, key: &str) -> &'static str {
        match (self.revealed.contains(key), self.reveal_loaded) {
            (true, true) => "loading loaded fade-in-up",
            (true, false) => "loading fade-in-up",
            (false, true) => "loading loaded",
            (false, false) => "loading",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_blank() {
        let view = PageView::default();
        assert_eq!(view.elapsed_text, "0m 0s");
        assert_eq!(view.counter, 0);
        assert_eq!(view.quiz, QuizView::Hidden);
    }

    #[test]
    fn applies_effects() {
        let mut view = PageView::default();
        view.apply(Effect::SetProgress(42.0));
        view.apply(Effect::SetCounter(259_654));
        view.apply(Effect::ShowExitOverlay);
        view.apply(Effect::ShowQuizResult(QuizAnswer::Social));
        view.apply(Effect::Reveal("feature-1".into()));
        view.apply(Effect::RevealLoaded);

        assert_eq!(view.progress_percent, 42.0);
        assert_eq!(view.counter, 259_654);
        assert!(view.exit_overlay);
        assert_eq!(view.quiz, QuizView::Answered(QuizAnswer::Social));
        assert_eq!(view.reveal_class("feature-1"), "loading loaded fade-in-up");
        assert_eq!(view.reveal_class("feature-2"), "loading loaded");
    }

    #[test]
    fn imperative_effects_do_not_touch_view() {
        let mut view = PageView::default();
        view.apply(Effect::ScrollToAnchor("faq".into()));
        view.apply(Effect::RequestFrame);
        assert_eq!(view, PageView::default());
        assert!(Effect::RequestFrame.is_imperative());
        assert!(!Effect::ShowQuiz.is_imperative());
    }
}
