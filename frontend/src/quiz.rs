//! Lead-capture quiz: one question, four answers, a creator "style" result.

use crate::error::LandingResult;
use crate::storage::{Flag, FlagStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuizAnswer {
    Educational,
    Social,
    Business,
    Personal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizResult {
    pub style: &'static str,
    pub description: &'static str,
}

const RESULTS: [(QuizAnswer, QuizResult); 4] = [
    (
        QuizAnswer::Educational,
        QuizResult {
            style: "The Explainer",
            description: "You turn complex ideas into short, clear lessons. Script-to-video templates with an AI voiceover will save you hours per episode.",
        },
    ),
    (
        QuizAnswer::Social,
        QuizResult {
            style: "The Trend Surfer",
            description: "Speed is everything for you. Vertical templates and auto-captions let you publish while the trend is still hot.",
        },
    ),
    (
        QuizAnswer::Business,
        QuizResult {
            style: "The Brand Builder",
            description: "Consistency sells. Brand kits and reusable scenes keep every product video on-message without a production team.",
        },
    ),
    (
        QuizAnswer::Personal,
        QuizResult {
            style: "The Storyteller",
            description: "Your footage has a story to tell. Automatic editing and music matching turn raw clips into something worth sharing.",
        },
    ),
];

impl QuizAnswer {
    pub const ALL: [QuizAnswer; 4] = [
        QuizAnswer::Educational,
        QuizAnswer::Social,
        QuizAnswer::Business,
        QuizAnswer::Personal,
    ];

    pub fn id(self) -> &'static str {
        match self {
            QuizAnswer::Educational => "educational",
            QuizAnswer::Social => "social",
            QuizAnswer::Business => "business",
            QuizAnswer::Personal => "personal",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            QuizAnswer::Educational => "Teaching and explainers",
            QuizAnswer::Social => "Social media shorts",
            QuizAnswer::Business => "Ads and product videos",
            QuizAnswer::Personal => "Family and travel memories",
        }
    }

    pub fn result(self) -> QuizResult {
        RESULTS
            .iter()
            .find(|(answer, _)| *answer == self)
            .map(|(_, result)| *result)
            .unwrap_or(RESULTS[0].1)
    }
}

#[derive(Debug, Clone, Default)]
pub struct LeadQuiz {
    visible: bool,
    selected: Option<QuizAnswer>,
}

impl LeadQuiz {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn selected(&self) -> Option<QuizAnswer> {
        self.selected
    }

    /// Called when the prompt timer fires. The completion flag is read now,
    /// not at page load, so a completion in between suppresses the modal.
    pub fn on_prompt_timer(&mut self, store: &dyn FlagStore) -> bool {
        if self.visible || store.is_flag_set(Flag::QuizCompleted) {
            return false;
        }
        self.visible = true;
        true
    }

    /// Records the answer and marks the quiz completed for good.
    pub fn select(&mut self, answer: QuizAnswer, store: &mut dyn FlagStore) -> LandingResult<QuizResult> {
        self.selected = Some(answer);
        store.set_flag(Flag::QuizCompleted)?;
        Ok(answer.result())
    }

    /// Dismisses without completing. Returns true if the modal was open.
    pub fn close(&mut self) -> bool {
        std::mem::replace(&mut self.visible, false)
    }
}
