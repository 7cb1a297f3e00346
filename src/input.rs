use crate::core::Vec2;

/// One frame's worth of host input. The original page read these from
/// module-level globals mutated by event listeners; here they are explicit
/// and clamped on ingestion so scene code never sees out-of-range values.
#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize)]
pub struct InputSample {
    /// Page scroll progress, 0 at the top, 1 at the bottom.
    pub scroll_progress: f64,
    /// Pointer position normalized to the page, both axes in 0..1.
    pub pointer: Vec2,
}

impl Default for InputSample {
    fn default() -> Self {
        Self {
            scroll_progress: 0.0,
            pointer: Vec2::new(0.5, 0.5),
        }
    }
}

impl InputSample {
    pub fn clamped(self) -> Self {
        Self {
            scroll_progress: if self.scroll_progress.is_finite() {
                self.scroll_progress.clamp(0.0, 1.0)
            } else {
                0.0
            },
            pointer: Vec2::new(clamp_unit(self.pointer.x), clamp_unit(self.pointer.y)),
        }
    }

    /// Pointer mapped to normalized device coordinates, both axes in -1..1.
    pub fn pointer_ndc(self) -> Vec2 {
        Vec2::new(
            (self.pointer.x - 0.5) * 2.0,
            (self.pointer.y - 0.5) * 2.0,
        )
    }
}

fn clamp_unit(v: f64) -> f64 {
    if v.is_finite() { v.clamp(0.0, 1.0) } else { 0.5 }
}
