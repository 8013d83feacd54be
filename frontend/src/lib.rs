pub mod accordion;
pub mod analytics;
pub mod app;
pub mod config;
pub mod counter;
pub mod error;
pub mod events;
pub mod exit_intent;
pub mod navigation;
pub mod page;
pub mod particles;
pub mod quiz;
pub mod rate_limit;
pub mod reveal;
pub mod scroll;
pub mod storage;
pub mod testimonials;
pub mod timers;
pub mod view;
pub mod web;

pub mod components {
    pub mod exit_popup;
    pub mod faq;
    pub mod floating_cta;
    pub mod quiz_modal;
}

pub mod pages {
    pub mod landing;
}

pub use config::LandingConfig;
pub use error::{LandingError, LandingResult};
pub use page::{PageController, PageLayout};
