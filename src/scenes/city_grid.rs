use std::f64::consts::TAU;

use crate::{
    core::{Point, Rgba8Premul, Vec2, Viewport},
    ease::Ease,
    rng::FrameRng,
    scene::{REFERENCE_FPS, SceneCtx, SceneModel},
    surface::PixelSurface,
};

use super::violet;

/// The hero scene: a pulsing grid of venue nodes over a ground plane,
/// seen from a slowly dollying camera with pointer parallax.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CityGridParams {
    pub grid_size: u32,
    pub spacing: f64,
    /// Probability that a grid cell spawns a node.
    pub node_probability: f64,
    /// Pairs closer than `spacing * link_distance_factor` are link candidates.
    pub link_distance_factor: f64,
    /// Probability that a candidate pair keeps its link.
    pub link_probability: f64,
}

impl Default for CityGridParams {
    fn default() -> Self {
        Self {
            grid_size: 20,
            spacing: 3.0,
            node_probability: 0.3,
            link_distance_factor: 2.0,
            link_probability: 0.5,
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct CityNode {
    pub base: Vec3,
    pub intensity: f64,
    pub hue_deg: f64,
    pub lightness: f64,
    pub pulse_speed: f64,
    pub pulse_offset: f64,
    // Transient per-frame state.
    pub y: f64,
    pub radius_scale: f64,
    pub alpha: f64,
}

pub struct CityGridScene {
    params: CityGridParams,
    links: Vec<(usize, usize)>,
    camera: Camera,
    parallax: Vec2,
    elapsed: f64,
}

const CAMERA_REST: Vec3 = Vec3::new(0.0, 25.0, 35.0);
const CAMERA_INTRO: Vec3 = Vec3::new(0.0, 40.0, 60.0);
const INTRO_DELAY: f64 = 0.2;
const INTRO_DURATION: f64 = 2.5;
const NODE_WORLD_RADIUS: f64 = 0.15;

impl CityGridScene {
    pub fn new(params: CityGridParams) -> Self {
        Self {
            params,
            links: Vec::new(),
            camera: Camera::new(CAMERA_INTRO, 60.0),
            parallax: Vec2::ZERO,
            elapsed: 0.0,
        }
    }

    pub fn link_count(&self) -> usize {
        self.links.len()
    }
}

impl SceneModel for CityGridScene {
    type Entity = CityNode;

    fn spawn(&mut self, rng: &mut FrameRng, _viewport: Viewport) -> Vec<CityNode> {
        let half = i64::from(self.params.grid_size) / 2;
        let spacing = self.params.spacing;

        let mut nodes = Vec::new();
        for gx in -half..half {
            for gz in -half..half {
                if !rng.chance(self.params.node_probability) {
                    continue;
                }
                let intensity = rng.next_f64();
                let base = Vec3::new(
                    gx as f64 * spacing + (rng.next_f64() - 0.5) * spacing * 0.5,
                    rng.next_f64() * 0.5,
                    gz as f64 * spacing + (rng.next_f64() - 0.5) * spacing * 0.5,
                );
                nodes.push(CityNode {
                    base,
                    intensity,
                    hue_deg: 270.0 + rng.next_f64() * 54.0,
                    lightness: 0.5 + intensity * 0.3,
                    pulse_speed: 0.5 + rng.next_f64() * 2.0,
                    pulse_offset: rng.next_f64() * TAU,
                    y: base.y,
                    radius_scale: 1.0,
                    alpha: 0.6,
                });
            }
        }

        let link_dist = spacing * self.params.link_distance_factor;
        self.links.clear();
        for i in 0..nodes.len() {
            for j in (i + 1)..nodes.len() {
                if nodes[i].base.distance(nodes[j].base) < link_dist
                    && rng.chance(self.params.link_probability)
                {
                    self.links.push((i, j));
                }
            }
        }

        nodes
    }

    fn update(&mut self, entities: &mut [CityNode], ctx: &mut SceneCtx) {
        self.elapsed += ctx.dt;

        for node in entities.iter_mut() {
            let pulse = (ctx.phase * node.pulse_speed + node.pulse_offset).sin();
            node.y = node.base.y + pulse * 0.3;
            node.radius_scale = 1.0 + pulse * 0.2 * node.intensity;
            node.alpha = (0.6 + pulse * 0.4 * node.intensity).clamp(0.0, 1.0);
        }

        // Intro dolly from the far position down to the rest position.
        let t = ((self.elapsed - INTRO_DELAY) / INTRO_DURATION).clamp(0.0, 1.0);
        let dolly = Vec3::lerp(CAMERA_INTRO, CAMERA_REST, Ease::OutQuad.apply(t));

        // Pointer parallax chases the target a fixed fraction per frame.
        let ndc = ctx.input.pointer_ndc();
        let target = Vec2::new(ndc.x * 5.0, ndc.y * 3.0);
        let chase = (0.02 * ctx.dt * REFERENCE_FPS).min(1.0);
        self.parallax += (target - self.parallax) * chase;

        self.camera.position = Vec3::new(
            dolly.x + self.parallax.x,
            dolly.y + self.parallax.y,
            dolly.z,
        );
    }

    fn paint(&self, entities: &[CityNode], ctx: &mut SceneCtx, surface: &mut PixelSurface) {
        surface.fill(Rgba8Premul::opaque(10, 10, 15));

        self.paint_ground_grid(ctx.viewport, surface);

        let link_color = violet(0.15);
        for &(i, j) in &self.links {
            let a = entities[i];
            let b = entities[j];
            let pa = self.camera.project(a.base.with_y(a.y), ctx.viewport);
            let pb = self.camera.project(b.base.with_y(b.y), ctx.viewport);
            if let (Some(pa), Some(pb)) = (pa, pb) {
                surface.stroke_line(pa.screen, pb.screen, 1.0, link_color);
            }
        }

        for node in entities {
            let Some(proj) = self.camera.project(node.base.with_y(node.y), ctx.viewport) else {
                continue;
            };
            let radius = NODE_WORLD_RADIUS * node.radius_scale * proj.scale;
            let color = Rgba8Premul::hsla(node.hue_deg, 0.8, node.lightness, node.alpha);
            surface.fill_circle(proj.screen, radius, color);
        }
    }
}

impl CityGridScene {
    fn paint_ground_grid(&self, viewport: Viewport, surface: &mut PixelSurface) {
        const EXTENT: f64 = 50.0;
        const STEP: f64 = 2.0;
        let color = Rgba8Premul::from_straight_rgba(26, 26, 37, 77);

        let mut v = -EXTENT;
        while v <= EXTENT {
            let x0 = self.camera.project(Vec3::new(v, -0.5, -EXTENT), viewport);
            let x1 = self.camera.project(Vec3::new(v, -0.5, EXTENT), viewport);
            if let (Some(a), Some(b)) = (x0, x1) {
                surface.stroke_line(a.screen, b.screen, 1.0, color);
            }
            let z0 = self.camera.project(Vec3::new(-EXTENT, -0.5, v), viewport);
            let z1 = self.camera.project(Vec3::new(EXTENT, -0.5, v), viewport);
            if let (Some(a), Some(b)) = (z0, z1) {
                surface.stroke_line(a.screen, b.screen, 1.0, color);
            }
            v += STEP;
        }
    }
}

/// Minimal 3D vector; the city grid is the only scene that needs one.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn with_y(self, y: f64) -> Self {
        Self { y, ..self }
    }

    pub fn distance(self, other: Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }

    pub fn lerp(a: Self, b: Self, t: f64) -> Self {
        Self::new(
            a.x + (b.x - a.x) * t,
            a.y + (b.y - a.y) * t,
            a.z + (b.z - a.z) * t,
        )
    }

    fn sub(self, o: Self) -> Self {
        Self::new(self.x - o.x, self.y - o.y, self.z - o.z)
    }

    fn dot(self, o: Self) -> f64 {
        self.x * o.x + self.y * o.y + self.z * o.z
    }

    fn cross(self, o: Self) -> Self {
        Self::new(
            self.y * o.z - self.z * o.y,
            self.z * o.x - self.x * o.z,
            self.x * o.y - self.y * o.x,
        )
    }

    fn normalized(self) -> Self {
        let len = self.dot(self).sqrt();
        if len <= f64::EPSILON {
            return Self::new(0.0, 0.0, 1.0);
        }
        Self::new(self.x / len, self.y / len, self.z / len)
    }
}

#[derive(Clone, Copy, Debug)]
struct Projected {
    screen: Point,
    /// Pixels per world unit at this depth; scales node radii.
    scale: f64,
}

/// Perspective camera pinned to look at the world origin.
#[derive(Clone, Copy, Debug)]
struct Camera {
    position: Vec3,
    fov_deg: f64,
}

const NEAR_PLANE: f64 = 0.1;

impl Camera {
    fn new(position: Vec3, fov_deg: f64) -> Self {
        Self { position, fov_deg }
    }

    fn project(&self, world: Vec3, viewport: Viewport) -> Option<Projected> {
        let forward = Vec3::new(0.0, 0.0, 0.0).sub(self.position).normalized();
        let right = forward.cross(Vec3::new(0.0, 1.0, 0.0)).normalized();
        let up = right.cross(forward);

        let rel = world.sub(self.position);
        let depth = rel.dot(forward);
        if depth <= NEAR_PLANE {
            return None;
        }

        let focal = (f64::from(viewport.height) / 2.0) / (self.fov_deg.to_radians() / 2.0).tan();
        let scale = focal / depth;
        let sx = f64::from(viewport.width) / 2.0 + rel.dot(right) * scale;
        let sy = f64::from(viewport.height) / 2.0 - rel.dot(up) * scale;
        if !sx.is_finite() || !sy.is_finite() {
            return None;
        }

        Some(Projected {
            screen: Point::new(sx, sy),
            scale,
        })
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

    fn mounted() -> SceneInstance<CityGridScene> {
        SceneInstance::mounted(
            "hero-canvas",
            11,
            CityGridScene::new(CityGridParams::default()),
            Viewport::new(96, 54),
        )
        .unwrap()
    }

    #[test]
    fn spawn_count_tracks_probability() {
        let scene = mounted();
        // 400 cells at p=0.3; allow a generous band around the mean.
        let n = scene.entity_count();
        assert!((60..=180).contains(&n), "unexpected node count {n}");
        assert!(scene.model().link_count() > 0);
    }

    #[test]
    fn nodes_stay_near_their_base_height() {
        let mut scene = mounted();
        for f in 0..120 {
            scene.advance(FrameIndex(f), 1.0 / 60.0, InputSample::default());
        }
        for node in scene.entities() {
            assert!((node.y - node.base.y).abs() <= 0.3 + 1e-9);
            assert!((0.0..=1.0).contains(&node.alpha));
        }
    }

    #[test]
    fn camera_projects_origin_to_mid_screen() {
        let cam = Camera::new(CAMERA_REST, 60.0);
        let p = cam.project(Vec3::new(0.0, 0.0, 0.0), Viewport::new(100, 100)).unwrap();
        assert!((p.screen.x - 50.0).abs() < 1e-9);
    }

    #[test]
    fn points_behind_camera_do_not_project() {
        let cam = Camera::new(CAMERA_REST, 60.0);
        // Continue past the origin along the view direction, behind the camera.
        let behind = Vec3::new(0.0, 50.0, 70.0);
        assert!(cam.project(behind, Viewport::new(100, 100)).is_none());
    }

    #[test]
    fn paints_nonempty_frame() {
        let mut scene = mounted();
        scene.advance(FrameIndex(0), 1.0 / 60.0, InputSample::default());
        assert!(scene.frame().data().iter().any(|&b| b != 0));
    }
}
