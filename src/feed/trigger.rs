use crate::feed::paginator::FeedSnapshot;

/// Opaque handle for the row under observation
///
/// The embedding layer decides what a row id means (a DOM node key, a
/// list index, a movie id); the trigger only compares them.
pub type SentinelId = u64;

/// Edge-triggered "last row became visible" signal source
///
/// Observes exactly one sentinel at a time. A load-more request fires
/// once per transition into visibility, never continuously while the
/// sentinel stays visible. Attaching a different sentinel re-arms the
/// trigger; reporting visibility for anything but the current sentinel
/// is ignored.
#[derive(Debug, Default)]
pub struct SentinelTrigger {
    sentinel: Option<SentinelId>,
    visible: bool,
}

impl SentinelTrigger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the current last row. A new row starts unobserved; the
    /// embedder reports its first visibility via `visibility_changed`.
    /// Re-attaching the same row keeps the current visibility state so a
    /// continuously visible sentinel does not re-fire.
    pub fn attach(&mut self, row: SentinelId) {
        if self.sentinel == Some(row) {
            return;
        }
        self.sentinel = Some(row);
        self.visible = false;
    }

    pub fn detach(&mut self) {
        self.sentinel = None;
        self.visible = false;
    }

    pub fn sentinel(&self) -> Option<SentinelId> {
        self.sentinel
    }

    /// Report a visibility change for a row.
    ///
    /// Returns true exactly when load-more should fire: the current
    /// sentinel transitioned from hidden to visible, no fetch is in
    /// flight, and more items remain. A rising edge consumed while a
    /// fetch is in flight is absorbed, not deferred; only leaving and
    /// re-entering visibility (or a sentinel change) can fire again.
    pub fn visibility_changed(
        &mut self,
        row: SentinelId,
        visible: bool,
        snapshot: &FeedSnapshot,
    ) -> bool {
        if self.sentinel != Some(row) {
            return false;
        }

        let rising_edge = visible && !self.visible;
        self.visible = visible;

        rising_edge && !snapshot.loading && snapshot.has_more
    }
}
