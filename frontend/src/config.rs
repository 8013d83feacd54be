use log::Level;
use serde::Deserialize;

use crate::error::LandingResult;
use crate::rate_limit::ScrollPolicy;

#[cfg(debug_assertions)]
pub fn log_level() -> Level {
    Level::Debug // Verbose when running locally
}

#[cfg(not(debug_assertions))]
pub fn log_level() -> Level {
    Level::Info
}

/// Id of the optional inline JSON block that overrides the defaults.
pub const CONFIG_ELEMENT_ID: &str = "landing-config";

/// Every tunable of the page. Missing fields fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LandingConfig {
    pub particle_count: usize,
    pub counter_target: u64,
    pub counter_start_delay_ms: u64,
    pub counter_tick_ms: u64,
    pub counter_ramp_steps: u32,
    pub counter_drift_interval_ms: u64,
    pub counter_drift_min: u64,
    pub counter_drift_max: u64,
    pub quiz_delay_ms: u64,
    pub exit_intent_delay_ms: u64,
    pub testimonial_period_ms: u64,
    pub reveal_delay_ms: u64,
    pub scroll_policy: ScrollPolicy,
    /// Emit every milestone bracket crossed by a single jump instead of
    /// only the highest one.
    pub backfill_milestones: bool,
    pub cta_link_pattern: String,
    pub service_worker_path: Option<String>,
}

impl Default for LandingConfig {
    fn default() -> Self {
        Self {
            particle_count: 50,
            counter_target: 259_654,
            counter_start_delay_ms: 300,
            counter_tick_ms: 20,
            counter_ramp_steps: 75,
            counter_drift_interval_ms: 3_000,
            counter_drift_min: 2,
            counter_drift_max: 6,
            quiz_delay_ms: 30_000,
            exit_intent_delay_ms: 1_000,
            testimonial_period_ms: 5_000,
            reveal_delay_ms: 100,
            scroll_policy: ScrollPolicy::FrameAligned,
            backfill_milestones: true,
            cta_link_pattern: "invideo.sjv.io".to_string(),
            service_worker_path: Some("/service-worker.js".to_string()),
        }
    }
}

impl LandingConfig {
    pub fn from_json(raw: &str) -> LandingResult<Self> {
        let mut config: LandingConfig = serde_json::from_str(raw)?;
        config.normalize();
        Ok(config)
    }

    /// Reads the inline config block, falling back to the defaults when it
    /// is absent or malformed.
    pub fn from_document() -> Self {
        let raw = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|doc| doc.get_element_by_id(CONFIG_ELEMENT_ID))
            .and_then(|el| el.text_content());

        match raw {
            Some(raw) => Self::from_json(&raw).unwrap_or_else(|e| {
                log::warn!("Ignoring landing config: {}", e);
                Self::default()
            }),
            None => Self::default(),
        }
    }

    // A zero-length interval would spin the timer queue forever.
    pub(crate) fn normalize(&mut self) {
        self.counter_tick_ms = self.counter_tick_ms.max(1);
        self.counter_ramp_steps = self.counter_ramp_steps.max(1);
        self.counter_drift_interval_ms = self.counter_drift_interval_ms.max(1);
        self.testimonial_period_ms = self.testimonial_period_ms.max(1);
        if self.counter_drift_max < self.counter_drift_min {
            std::mem::swap(&mut self.counter_drift_min, &mut self.counter_drift_max);
        }
        if let ScrollPolicy::Throttle { interval_ms } = &mut self.scroll_policy {
            *interval_ms = (*interval_ms).max(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_page_constants() {
        let config = LandingConfig::default();
        assert_eq!(config.particle_count, 50);
        assert_eq!(config.counter_target, 259_654);
        assert_eq!(config.quiz_delay_ms, 30_000);
        assert_eq!(config.scroll_policy, ScrollPolicy::FrameAligned);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = LandingConfig::from_json(r#"{"quiz_delay_ms": 5000}"#).unwrap();
        assert_eq!(config.quiz_delay_ms, 5_000);
        assert_eq!(config.testimonial_period_ms, 5_000);
        assert_eq!(config.cta_link_pattern, "invideo.sjv.io");
    }

    #[test]
    fn throttle_policy_parses() {
        let config = LandingConfig::from_json(
            r#"{"scroll_policy": {"throttle": {"interval_ms": 0}}, "backfill_milestones": false}"#,
        )
        .unwrap();
        assert_eq!(config.scroll_policy, ScrollPolicy::Throttle { interval_ms: 1 });
        assert!(!config.backfill_milestones);
    }

    #[test]
    fn inverted_drift_range_is_swapped() {
        let config =
            LandingConfig::from_json(r#"{"counter_drift_min": 9, "counter_drift_max": 3}"#).unwrap();
        assert_eq!((config.counter_drift_min, config.counter_drift_max), (3, 9));
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(LandingConfig::from_json("{not json").is_err());
    }
}
