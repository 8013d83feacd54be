//! Scroll-derived page state: progress bar, floating CTA, the "time saved"
//! readout and scroll-depth milestones.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollMetrics {
    pub scroll_y: f64,
    pub document_height: f64,
    pub viewport_height: f64,
}

impl ScrollMetrics {
    pub fn new(scroll_y: f64, document_height: f64, viewport_height: f64) -> Self {
        Self {
            scroll_y,
            document_height,
            viewport_height,
        }
    }

    /// Scrolled share of the page in `[0, 100]`. A page that cannot scroll
    /// reads as 0%.
    pub fn percent(&self) -> f64 {
        let scrollable = self.document_height - self.viewport_height;
        if !(scrollable > 0.0) || !self.scroll_y.is_finite() {
            return 0.0;
        }
        (self.scroll_y / scrollable * 100.0).clamp(0.0, 100.0)
    }

    /// The CTA shows once the reader is past half of the document.
    /// Exactly half is still hidden.
    pub fn cta_visible(&self) -> bool {
        self.scroll_y > self.document_height * 0.5
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Elapsed {
    pub minutes: u32,
    pub seconds: u32,
}

impl Elapsed {
    pub fn from_percent(percent: f64) -> Self {
        let percent = percent.clamp(0.0, 100.0);
        Self {
            minutes: (percent * 0.15).floor() as u32,
            seconds: ((percent * 9.0) % 60.0).floor() as u32,
        }
    }
}

impl fmt::Display for Elapsed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}m {}s", self.minutes, self.seconds)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Milestone {
    Quarter,
    Half,
    ThreeQuarters,
    Ninety,
}

impl Milestone {
    pub const ALL: [Milestone; 4] = [
        Milestone::Quarter,
        Milestone::Half,
        Milestone::ThreeQuarters,
        Milestone::Ninety,
    ];

    pub fn threshold(self) -> u32 {
        match self {
            Milestone::Quarter => 25,
            Milestone::Half => 50,
            Milestone::ThreeQuarters => 75,
            Milestone::Ninety => 90,
        }
    }

    /// Bracket containing a whole-number depth, if any.
    pub fn bracket_for(depth: u32) -> Option<Milestone> {
        Milestone::ALL
            .iter()
            .rev()
            .copied()
            .find(|m| depth >= m.threshold())
    }

    pub fn label(self) -> String {
        format!("{}%", self.threshold())
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScrollState {
    pub progress_percent: f64,
    pub cta_visible: bool,
    pub elapsed: Elapsed,
    /// Highest bracket reported so far. Never decreases.
    pub max_milestone: Option<Milestone>,
}

/// Outputs of one scroll update. `None` means nothing to write.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScrollUpdate {
    pub progress_percent: f64,
    pub cta_visible: Option<bool>,
    pub elapsed_text: Option<String>,
    pub milestones: Vec<Milestone>,
}

#[derive(Debug, Clone, Default)]
pub struct ScrollController {
    state: ScrollState,
    backfill: bool,
}

impl ScrollController {
    pub fn new(backfill_milestones: bool) -> Self {
        Self {
            state: ScrollState::default(),
            backfill: backfill_milestones,
        }
    }

    pub fn apply(&mut self, metrics: ScrollMetrics) -> ScrollUpdate {
        let percent = metrics.percent();
        self.state.progress_percent = percent;

        let cta_visible = metrics.cta_visible();
        let cta_changed = (cta_visible != self.state.cta_visible).then(|| {
            self.state.cta_visible = cta_visible;
            cta_visible
        });

        let elapsed = Elapsed::from_percent(percent);
        let elapsed_text = (elapsed != self.state.elapsed).then(|| {
            self.state.elapsed = elapsed;
            elapsed.to_string()
        });

        ScrollUpdate {
            progress_percent: percent,
            cta_visible: cta_changed,
            elapsed_text,
            milestones: self.advance_milestones(percent.round() as u32),
        }
    }

    fn advance_milestones(&mut self, depth: u32) -> Vec<Milestone> {
        let Some(reached) = Milestone::bracket_for(depth) else {
            return Vec::new();
        };
        if self.state.max_milestone.is_some_and(|seen| reached <= seen) {
            return Vec::new();
        }

        let crossed = if self.backfill {
            Milestone::ALL
                .iter()
                .copied()
                .filter(|m| *m <= reached && self.state.max_milestone.map_or(true, |seen| *m > seen))
                .collect()
        } else {
            vec![reached]
        };
        self.state.max_milestone = Some(reached);
        crossed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn worked_example() {
        let mut controller = ScrollController::new(true);
        let update = controller.apply(ScrollMetrics::new(500.0, 2000.0, 1000.0));

        assert_eq!(update.progress_percent, 50.0);
        assert_eq!(update.cta_visible, None);
        assert_eq!(update.elapsed_text.as_deref(), Some("7m 30s"));
        assert!(!controller.state.cta_visible);
    }

    #[rstest]
    #[case(0.0, 2000.0, 1000.0, 0.0)]
    #[case(1000.0, 2000.0, 1000.0, 100.0)]
    #[case(1500.0, 2000.0, 1000.0, 100.0)]
    #[case(-40.0, 2000.0, 1000.0, 0.0)]
    #[case(300.0, 1000.0, 1000.0, 0.0)]
    #[case(300.0, 800.0, 1000.0, 0.0)]
    #[case(f64::NAN, 2000.0, 1000.0, 0.0)]
    fn percent_is_guarded(
        #[case] y: f64,
        #[case] doc: f64,
        #[case] viewport: f64,
        #[case] expected: f64,
    ) {
        assert_eq!(ScrollMetrics::new(y, doc, viewport).percent(), expected);
    }

    #[rstest]
    #[case(999.0, false)]
    #[case(1000.0, false)]
    #[case(1001.0, true)]
    fn cta_threshold(#[case] y: f64, #[case] visible: bool) {
        assert_eq!(ScrollMetrics::new(y, 2000.0, 800.0).cta_visible(), visible);
    }

    #[test]
    fn cta_reports_only_changes() {
        let mut controller = ScrollController::new(true);
        assert_eq!(controller.apply(ScrollMetrics::new(1200.0, 2000.0, 500.0)).cta_visible, Some(true));
        assert_eq!(controller.apply(ScrollMetrics::new(1300.0, 2000.0, 500.0)).cta_visible, None);
        assert_eq!(controller.apply(ScrollMetrics::new(100.0, 2000.0, 500.0)).cta_visible, Some(false));
    }

    #[test]
    fn elapsed_text_written_only_on_change() {
        let mut controller = ScrollController::new(true);
        let metrics = ScrollMetrics::new(500.0, 2000.0, 1000.0);
        assert!(controller.apply(metrics).elapsed_text.is_some());
        assert!(controller.apply(metrics).elapsed_text.is_none());
    }

    #[test]
    fn elapsed_at_top_matches_initial_state() {
        let mut controller = ScrollController::new(true);
        let update = controller.apply(ScrollMetrics::new(0.0, 2000.0, 1000.0));
        assert_eq!(update.elapsed_text, None);
        assert_eq!(Elapsed::from_percent(100.0).to_string(), "15m 0s");
    }

    #[rstest]
    #[case(24, None)]
    #[case(25, Some(Milestone::Quarter))]
    #[case(74, Some(Milestone::Half))]
    #[case(89, Some(Milestone::ThreeQuarters))]
    #[case(100, Some(Milestone::Ninety))]
    fn brackets(#[case] depth: u32, #[case] expected: Option<Milestone>) {
        assert_eq!(Milestone::bracket_for(depth), expected);
    }

    fn at(controller: &mut ScrollController, percent: f64) -> Vec<Milestone> {
        controller
            .apply(ScrollMetrics::new(percent * 10.0, 2000.0, 1000.0))
            .milestones
    }

    #[test]
    fn milestones_fire_once_per_bracket() {
        let mut controller = ScrollController::new(true);
        assert_eq!(at(&mut controller, 26.0), vec![Milestone::Quarter]);
        assert!(at(&mut controller, 30.0).is_empty());
        assert!(at(&mut controller, 10.0).is_empty());
        assert!(at(&mut controller, 27.0).is_empty());
        assert_eq!(at(&mut controller, 55.0), vec![Milestone::Half]);
        assert!(at(&mut controller, 26.0).is_empty());
    }

    #[test]
    fn backfill_reports_skipped_brackets_in_order() {
        let mut controller = ScrollController::new(true);
        assert_eq!(at(&mut controller, 30.0), vec![Milestone::Quarter]);
        assert_eq!(
            at(&mut controller, 95.0),
            vec![Milestone::Half, Milestone::ThreeQuarters, Milestone::Ninety]
        );
        assert_eq!(controller.state.max_milestone, Some(Milestone::Ninety));
    }

    #[test]
    fn watermark_mode_skips_brackets() {
        let mut controller = ScrollController::new(false);
        assert_eq!(at(&mut controller, 95.0), vec![Milestone::Ninety]);
        assert!(at(&mut controller, 50.0).is_empty());
    }

    #[test]
    fn milestone_label() {
        assert_eq!(Milestone::ThreeQuarters.label(), "75%");
    }
}
