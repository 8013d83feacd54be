/// Single-open accordion over a fixed set of panels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Accordion<P> {
    open: Option<P>,
}

impl<P> Default for Accordion<P> {
    fn default() -> Self {
        Self { open: None }
    }
}

impl<P: Copy + Eq> Accordion<P> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open_panel(&self) -> Option<P> {
        self.open
    }

    pub fn is_open(&self, panel: P) -> bool {
        self.open == Some(panel)
    }

    /// Clicking the open panel closes it; clicking any other panel closes
    /// the open one and opens the clicked one. Returns the new open panel.
    pub fn toggle(&mut self, panel: P) -> Option<P> {
        self.open = if self.is_open(panel) { None } else { Some(panel) };
        self.open
    }
}
