//! Scroll position capture and restore around a rebuild.
//!
//! The engine never owns pixel state. Hosts implement [`ScrollHost`] and the
//! engine wraps each scoped rebuild in a [`ScrollGuard`], which restores the
//! captured position (or jumps to a requested row) when it is dropped.

/// Opaque scroll position reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollPosition {
    /// Index of the first visible row
    pub first_visible_row: usize,
    /// Host-specific offset of that row (pixels, cells, ...)
    pub offset: i32,
}

/// A list widget whose scroll position survives rebuilds.
pub trait ScrollHost {
    /// Read the current position.
    fn capture(&self) -> ScrollPosition;

    /// Put back a previously captured position.
    fn restore(&mut self, position: ScrollPosition);

    /// Bring a row into view instead of restoring.
    fn jump_to(&mut self, row: usize);
}

/// Restores the host's scroll position when dropped.
pub struct ScrollGuard<'a, H: ScrollHost> {
    host: &'a mut H,
    saved: ScrollPosition,
    jump: Option<usize>,
}

impl<'a, H: ScrollHost> ScrollGuard<'a, H> {
    /// Capture the host's position now.
    pub fn capture(host: &'a mut H) -> Self {
        let saved = host.capture();
        Self {
            host,
            saved,
            jump: None,
        }
    }

    /// Jump to `row` on drop instead of restoring.
    pub fn jump_to(&mut self, row: usize) {
        self.jump = Some(row);
    }

    pub fn saved(&self) -> ScrollPosition {
        self.saved
    }
}

impl<H: ScrollHost> Drop for ScrollGuard<'_, H> {
    fn drop(&mut self) {
        match self.jump {
            Some(row) => self.host.jump_to(row),
            None => self.host.restore(self.saved),
        }
    }
}
