/// Depth counter behind the loading indicator.
///
/// Transitions can overlap (a slow campus load followed by a world click), so
/// the indicator stays visible until every outstanding load has settled.
/// `settle` saturates: settling an idle latch is harmless.
#[derive(Debug, Default)]
pub struct LoadingLatch {
    depth: u32,
}

impl LoadingLatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&mut self) {
        self.depth = self.depth.saturating_add(1);
    }

    pub fn settle(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    pub fn is_visible(&self) -> bool {
        self.depth > 0
    }
}
