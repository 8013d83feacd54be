use crate::error::LandingResult;
use crate::storage::{Flag, FlagStore};

/// How the exit overlay was closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dismissal {
    MaybeLater,
    Backdrop,
    Escape,
}

impl Dismissal {
    pub fn as_str(self) -> &'static str {
        match self {
            Dismissal::MaybeLater => "maybe_later",
            Dismissal::Backdrop => "backdrop",
            Dismissal::Escape => "escape",
        }
    }
}

/// Exit-intent popup. Arms once per page load; shown at most once per device.
#[derive(Debug, Clone, Default)]
pub struct ExitIntent {
    triggered: bool,
    visible: bool,
}

impl ExitIntent {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pointer left the document. Only the first exit across the top edge
    /// counts; returns true when the delay timer should start.
    pub fn on_pointer_leave(&mut self, client_y: f64) -> bool {
        if self.triggered || client_y > 0.0 {
            return false;
        }
        self.triggered = true;
        true
    }

    /// Delay elapsed. Shows the overlay unless it was shown on this device
    /// before, and records that it has been shown.
    pub fn on_delay_elapsed(&mut self, store: &mut dyn FlagStore) -> LandingResult<bool> {
        if store.is_flag_set(Flag::ExitIntentShown) {
            return Ok(false);
        }
        store.set_flag(Flag::ExitIntentShown)?;
        self.visible = true;
        Ok(true)
    }

    /// Returns true if an overlay was actually removed.
    pub fn dismiss(&mut self) -> bool {
        std::mem::replace(&mut self.visible, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn only_top_edge_exit_triggers() {
        let mut exit = ExitIntent::new();
        assert!(!exit.on_pointer_leave(120.0));
        assert!(exit.on_pointer_leave(0.0));
    }

    #[test]
    fn triggers_once_per_load() {
        let mut exit = ExitIntent::new();
        assert!(exit.on_pointer_leave(-3.0));
        assert!(!exit.on_pointer_leave(-3.0));
    }

    #[test]
    fn shown_once_per_device() {
        let mut store = MemoryStore::new();
        let mut exit = ExitIntent::new();
        exit.on_pointer_leave(0.0);
        assert!(exit.on_delay_elapsed(&mut store).unwrap());
        assert!(store.is_flag_set(Flag::ExitIntentShown));

        let mut next_visit = ExitIntent::new();
        next_visit.on_pointer_leave(0.0);
        assert!(!next_visit.on_delay_elapsed(&mut store).unwrap());
        assert!(!next_visit.dismiss());
    }

    #[test]
    fn dismiss_removes_overlay_once() {
        let mut store = MemoryStore::new();
        let mut exit = ExitIntent::new();
        exit.on_pointer_leave(0.0);
        exit.on_delay_elapsed(&mut store).unwrap();
        assert!(exit.dismiss());
        assert!(!exit.dismiss());
    }
}
