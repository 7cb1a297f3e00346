use crate::{
    core::{Point, Rgba8Premul, Vec2, Viewport},
    rng::FrameRng,
    scene::{REFERENCE_FPS, SceneCtx, SceneModel},
    surface::PixelSurface,
};

use super::{cyan, slate};

/// The gameplay preview: a night map of glowing venues and an avatar that
/// chases the pointer across it.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct VenueMapParams {
    pub venue_count: usize,
    /// Fraction of the avatar-to-pointer gap closed per frame.
    pub avatar_chase: f64,
    /// Background grid cell size in pixels.
    pub grid_step: f64,
}

impl Default for VenueMapParams {
    fn default() -> Self {
        Self {
            venue_count: 15,
            avatar_chase: 0.05,
            grid_step: 40.0,
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Venue {
    /// Normalized position, kept away from the edges.
    pub pos: Vec2,
    /// Footprint in pixels.
    pub size: f64,
    pub energy: f64,
    pub hue_deg: f64,
}

pub struct VenueMapScene {
    params: VenueMapParams,
    avatar: Vec2,
}

impl VenueMapScene {
    pub fn new(params: VenueMapParams) -> Self {
        Self {
            params,
            avatar: Vec2::new(0.5, 0.5),
        }
    }

    pub fn avatar(&self) -> Vec2 {
        self.avatar
    }
}

impl SceneModel for VenueMapScene {
    type Entity = Venue;

    fn phase_rate(&self) -> f64 {
        0.02
    }

    fn spawn(&mut self, rng: &mut FrameRng, _viewport: Viewport) -> Vec<Venue> {
        (0..self.params.venue_count)
            .map(|_| Venue {
                pos: Vec2::new(rng.in_range(0.1, 0.9), rng.in_range(0.1, 0.9)),
                size: rng.in_range(10.0, 25.0),
                energy: rng.next_f64(),
                hue_deg: if rng.chance(0.5) { 280.0 } else { 180.0 },
            })
            .collect()
    }

    fn update(&mut self, _entities: &mut [Venue], ctx: &mut SceneCtx) {
        let chase = (self.params.avatar_chase * ctx.dt * REFERENCE_FPS).min(1.0);
        self.avatar += (ctx.input.pointer - self.avatar) * chase;
    }

    fn paint(&self, entities: &[Venue], ctx: &mut SceneCtx, surface: &mut PixelSurface) {
        surface.fill(Rgba8Premul::opaque(26, 26, 37));

        let w = f64::from(ctx.viewport.width);
        let h = f64::from(ctx.viewport.height);

        // Background street grid.
        let grid_color = slate(0.1);
        let mut x = 0.0;
        while x < w {
            surface.stroke_line(Point::new(x, 0.0), Point::new(x, h), 1.0, grid_color);
            x += self.params.grid_step;
        }
        let mut y = 0.0;
        while y < h {
            surface.stroke_line(Point::new(0.0, y), Point::new(w, y), 1.0, grid_color);
            y += self.params.grid_step;
        }

        for (i, venue) in entities.iter().enumerate() {
            let p = Point::new(venue.pos.x * w, venue.pos.y * h);
            let pulse = (ctx.phase * 2.0 + i as f64).sin() * 0.3 + 0.7;

            surface.radial_glow(
                p,
                venue.size * 2.0,
                Rgba8Premul::hsla(venue.hue_deg, 0.8, 0.5, 0.4 * venue.energy * pulse),
            );
            surface.fill_rect(
                Point::new(p.x - venue.size / 2.0, p.y - venue.size / 2.0),
                venue.size,
                venue.size,
                Rgba8Premul::hsla(venue.hue_deg, 0.8, 0.6, 0.8 * pulse),
            );
        }

        // Avatar with glow, core, and a heading tick toward the pointer.
        let a = Point::new(self.avatar.x * w, self.avatar.y * h);
        surface.radial_glow(a, 30.0, cyan(0.6));
        surface.fill_circle(a, 8.0, cyan(1.0));

        let gap = ctx.input.pointer - self.avatar;
        let angle = gap.y.atan2(gap.x);
        let tip = Point::new(a.x + angle.cos() * 20.0, a.y + angle.sin() * 20.0);
        surface.stroke_line(a, tip, 2.0, cyan(1.0));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        core::FrameIndex,
        input::InputSample,
        scene::{AnimatedScene, SceneInstance},
    };

    fn mounted() -> SceneInstance<VenueMapScene> {
        SceneInstance::mounted(
            "gameplay-canvas",
            21,
            VenueMapScene::new(VenueMapParams::default()),
            Viewport::new(80, 50),
        )
        .unwrap()
    }

    #[test]
    fn venues_spawn_inside_margins() {
        let scene = mounted();
        assert_eq!(scene.entity_count(), 15);
        for venue in scene.entities() {
            assert!((0.1..0.9).contains(&venue.pos.x));
            assert!((0.1..0.9).contains(&venue.pos.y));
            assert!((10.0..25.0).contains(&venue.size));
            assert!(venue.hue_deg == 280.0 || venue.hue_deg == 180.0);
        }
    }

    #[test]
    fn avatar_converges_on_pointer() {
        let mut scene = mounted();
        let input = InputSample {
            scroll_progress: 0.0,
            pointer: Vec2::new(0.9, 0.2),
        };
        for f in 0..240 {
            scene.advance(FrameIndex(f), 1.0 / 60.0, input);
        }
        let avatar = scene.model().avatar();
        assert!((avatar.x - 0.9).abs() < 0.01);
        assert!((avatar.y - 0.2).abs() < 0.01);
    }

    #[test]
    fn background_is_opaque() {
        let mut scene = mounted();
        scene.advance(FrameIndex(0), 1.0 / 60.0, InputSample::default());
        assert!(scene.frame().data().chunks_exact(4).all(|px| px[3] == 255));
    }
}
