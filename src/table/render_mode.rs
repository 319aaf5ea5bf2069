//! Responsive layout selection.
//!
//! The layout is a pure function of the viewport width: at or below the
//! breakpoint rows are shown as stacked cards, above it as a table. Switching
//! layout never touches sort, filter or selection state.

use serde::{Deserialize, Serialize};

/// Default compact-mode breakpoint in logical pixels.
pub const DEFAULT_BREAKPOINT: u32 = 768;

/// How rows are laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    /// One row per record, one column per descriptor.
    Tabular,
    /// One stacked `label: value` block per record.
    Compact,
}

impl RenderMode {
    /// Picks the layout for `width`: compact when `width <= breakpoint`.
    #[must_use]
    pub const fn for_width(width: u32, breakpoint: u32) -> Self {
        if width <= breakpoint {
            Self::Compact
        } else {
            Self::Tabular
        }
    }
}

/// The externally driven viewport signal.
///
/// The host updates the width on every resize; the table derives its
/// [`RenderMode`] from it on demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub breakpoint: u32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1024,
            breakpoint: DEFAULT_BREAKPOINT,
        }
    }
}

impl Viewport {
    #[must_use]
    pub const fn new(width: u32, breakpoint: u32) -> Self {
        Self { width, breakpoint }
    }

    /// Updates the width. Returns `true` if the render mode flipped.
    pub fn resize(&mut self, width: u32) -> bool {
        let before = self.mode();
        self.width = width;
        let after = self.mode();
        if before != after {
            tracing::debug!(width, mode = ?after, "render mode changed");
        }
        before != after
    }

    #[must_use]
    pub const fn mode(&self) -> RenderMode {
        RenderMode::for_width(self.width, self.breakpoint)
    }
}
