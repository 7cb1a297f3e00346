use crate::{
    core::{Point, Rgba8Premul, Vec2, Viewport},
    rng::FrameRng,
    scene::{REFERENCE_FPS, SceneCtx, SceneModel},
    surface::PixelSurface,
};

use super::amber;

/// The problem-section scene: drifting amber stars that glitch at random,
/// over a trailing wash, with occasional horizontal noise lines. The jitter
/// stands in for unreliable data.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct StarfieldParams {
    pub star_count: usize,
    /// Per-frame probability that a star glitches (jumps and re-rolls opacity).
    pub glitch_probability: f64,
    /// Per-frame probability of a horizontal noise line.
    pub noise_line_probability: f64,
}

impl Default for StarfieldParams {
    fn default() -> Self {
        Self {
            star_count: 100,
            glitch_probability: 0.05,
            noise_line_probability: 0.1,
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Star {
    /// Normalized position; wraps vertically.
    pub pos: Vec2,
    pub size: f64,
    pub speed: f64,
    pub opacity: f64,
}

pub struct StarfieldScene {
    params: StarfieldParams,
}

impl StarfieldScene {
    pub fn new(params: StarfieldParams) -> Self {
        Self { params }
    }
}

impl SceneModel for StarfieldScene {
    type Entity = Star;

    fn spawn(&mut self, rng: &mut FrameRng, _viewport: Viewport) -> Vec<Star> {
        (0..self.params.star_count)
            .map(|_| Star {
                pos: Vec2::new(rng.next_f64(), rng.next_f64()),
                size: rng.next_f64() * 2.0 + 0.5,
                speed: rng.next_f64() * 0.5 + 0.1,
                opacity: rng.next_f64(),
            })
            .collect()
    }

    fn update(&mut self, entities: &mut [Star], ctx: &mut SceneCtx) {
        let step = ctx.dt * REFERENCE_FPS;
        for star in entities.iter_mut() {
            if ctx.rng.chance(self.params.glitch_probability) {
                star.opacity = ctx.rng.next_f64();
                star.pos.x += (ctx.rng.next_f64() - 0.5) * 0.1;
            }
            star.pos.y += star.speed * 0.001 * step;
            if star.pos.y > 1.0 {
                star.pos.y = 0.0;
            }
        }
    }

    fn paint(&self, entities: &[Star], ctx: &mut SceneCtx, surface: &mut PixelSurface) {
        surface.fade(Rgba8Premul::from_straight_rgba(18, 18, 26, 26));

        let w = f64::from(ctx.viewport.width);
        let h = f64::from(ctx.viewport.height);

        for star in entities {
            let radius = star.size * (1.0 + (ctx.phase * star.speed).sin() * 0.3);
            let hue = 35.0 + (ctx.phase + star.pos.x * 10.0).sin() * 20.0;
            let color = Rgba8Premul::hsla(hue, 0.8, 0.6, star.opacity * 0.5);
            surface.fill_circle(
                Point::new(star.pos.x * w, star.pos.y * h),
                radius,
                color,
            );
        }

        if ctx.rng.chance(self.params.noise_line_probability) {
            let y = ctx.rng.next_f64() * h;
            let jitter = (ctx.rng.next_f64() - 0.5) * 20.0;
            surface.stroke_line(
                Point::new(0.0, y),
                Point::new(w, y + jitter),
                1.0,
                amber(0.1),
            );
        }
    }
}
