//! Redraw gate for mostly static screens.

/// Decides whether a frame needs rendering.
///
/// Animated screens always render. Static screens (menu, pause, game over)
/// render when the session revision changes, and otherwise at most once per
/// interval so terminal resizes and banners still settle.
#[derive(Debug, Clone)]
pub struct RedrawGate {
    min_static_interval_ms: u64,
    last_render_ms: u64,
    last_revision: u64,
    has_rendered: bool,
}

impl RedrawGate {
    pub const DEFAULT_INTERVAL_MS: u64 = 250;

    pub fn new(min_static_interval_ms: u64) -> Self {
        Self {
            min_static_interval_ms,
            last_render_ms: 0,
            last_revision: 0,
            has_rendered: false,
        }
    }

    /// Force the next call to render.
    pub fn invalidate(&mut self) {
        self.has_rendered = false;
    }

    pub fn should_render(&mut self, now_ms: u64, revision: u64, animating: bool) -> bool {
        let render = !self.has_rendered
            || animating
            || revision != self.last_revision
            || now_ms.saturating_sub(self.last_render_ms) >= self.min_static_interval_ms;
        if render {
            self.has_rendered = true;
            self.last_render_ms = now_ms;
            self.last_revision = revision;
        }
        render
    }
}

impl Default for RedrawGate {
    fn default() -> Self {
        Self::new(Self::DEFAULT_INTERVAL_MS)
    }
}
