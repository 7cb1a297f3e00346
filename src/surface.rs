use crate::{
    composite::over,
    core::{Point, Rgba8Premul, Viewport},
    error::{NiteglowError, NiteglowResult},
};

/// One mount's drawing target: an owned premultiplied RGBA8 buffer.
///
/// All paint operations clip to the buffer, blend with source-over, and
/// treat degenerate geometry (zero radius, empty rect, non-finite points)
/// as a no-op. Nothing here allocates per frame; the buffer only changes
/// size through `resize`.
#[derive(Clone, Debug)]
pub struct PixelSurface {
    viewport: Viewport,
    data: Vec<u8>,
}

impl PixelSurface {
    pub fn new(viewport: Viewport) -> NiteglowResult<Self> {
        let len = buffer_len(viewport)?;
        Ok(Self {
            viewport,
            data: vec![0u8; len],
        })
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn width(&self) -> u32 {
        self.viewport.width
    }

    pub fn height(&self) -> u32 {
        self.viewport.height
    }

    /// Premultiplied RGBA8 bytes, row-major.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Reallocate for a new mount size. Contents reset to transparent.
    pub fn resize(&mut self, viewport: Viewport) -> NiteglowResult<()> {
        let len = buffer_len(viewport)?;
        self.viewport = viewport;
        self.data.clear();
        self.data.resize(len, 0);
        Ok(())
    }

    /// Opaque (or translucent) clear: every pixel becomes `color`.
    pub fn fill(&mut self, color: Rgba8Premul) {
        let px = color.to_array();
        for chunk in self.data.chunks_exact_mut(4) {
            chunk.copy_from_slice(&px);
        }
    }

    /// Translucent wash over the whole surface; the trail effect the glitch
    /// and drift scenes use instead of a clear.
    pub fn fade(&mut self, color: Rgba8Premul) {
        for chunk in self.data.chunks_exact_mut(4) {
            let dst = Rgba8Premul {
                r: chunk[0],
                g: chunk[1],
                b: chunk[2],
                a: chunk[3],
            };
            chunk.copy_from_slice(&over(dst, color).to_array());
        }
    }

    pub fn blend_px(&mut self, x: i64, y: i64, color: Rgba8Premul) {
        if x < 0 || y < 0 || x >= i64::from(self.viewport.width) || y >= i64::from(self.viewport.height)
        {
            return;
        }
        let idx = ((y as usize) * (self.viewport.width as usize) + (x as usize)) * 4;
        let chunk = &mut self.data[idx..idx + 4];
        let dst = Rgba8Premul {
            r: chunk[0],
            g: chunk[1],
            b: chunk[2],
            a: chunk[3],
        };
        chunk.copy_from_slice(&over(dst, color).to_array());
    }

    /// Solid disc with a one-pixel soft edge.
    pub fn fill_circle(&mut self, center: Point, radius: f64, color: Rgba8Premul) {
        if !center.x.is_finite() || !center.y.is_finite() || !(radius > 0.0) {
            return;
        }
        let (x0, x1, y0, y1) = match self.clip_box(center, radius + 1.0) {
            Some(b) => b,
            None => return,
        };
        for y in y0..=y1 {
            for x in x0..=x1 {
                let dx = (x as f64 + 0.5) - center.x;
                let dy = (y as f64 + 0.5) - center.y;
                let dist = (dx * dx + dy * dy).sqrt();
                let coverage = (radius - dist + 0.5).clamp(0.0, 1.0);
                if coverage > 0.0 {
                    self.blend_px(x, y, color.with_alpha_scaled(coverage));
                }
            }
        }
    }

    /// Radial glow: full alpha at the center falling linearly to zero at
    /// the rim, like a canvas radial gradient.
    pub fn radial_glow(&mut self, center: Point, radius: f64, color: Rgba8Premul) {
        if !center.x.is_finite() || !center.y.is_finite() || !(radius > 0.0) {
            return;
        }
        let (x0, x1, y0, y1) = match self.clip_box(center, radius) {
            Some(b) => b,
            None => return,
        };
        for y in y0..=y1 {
            for x in x0..=x1 {
                let dx = (x as f64 + 0.5) - center.x;
                let dy = (y as f64 + 0.5) - center.y;
                let dist = (dx * dx + dy * dy).sqrt();
                if dist >= radius {
                    continue;
                }
                let falloff = 1.0 - dist / radius;
                self.blend_px(x, y, color.with_alpha_scaled(falloff));
            }
        }
    }

    /// Axis-aligned filled rect; `origin` is the top-left corner.
    pub fn fill_rect(&mut self, origin: Point, w: f64, h: f64, color: Rgba8Premul) {
        if !origin.x.is_finite() || !origin.y.is_finite() || !(w > 0.0) || !(h > 0.0) {
            return;
        }
        let x0 = origin.x.floor().max(0.0) as i64;
        let y0 = origin.y.floor().max(0.0) as i64;
        let x1 = ((origin.x + w).ceil() as i64).min(i64::from(self.viewport.width)) - 1;
        let y1 = ((origin.y + h).ceil() as i64).min(i64::from(self.viewport.height)) - 1;
        for y in y0..=y1 {
            for x in x0..=x1 {
                self.blend_px(x, y, color);
            }
        }
    }

    /// Stroked segment with round caps and a one-pixel soft edge.
    pub fn stroke_line(&mut self, a: Point, b: Point, width: f64, color: Rgba8Premul) {
        if !a.x.is_finite() || !a.y.is_finite() || !b.x.is_finite() || !b.y.is_finite() {
            return;
        }
        if !(width > 0.0) {
            return;
        }
        let half = width / 2.0;
        let pad = half + 1.0;

        let min_x = (a.x.min(b.x) - pad).floor().max(0.0) as i64;
        let max_x = ((a.x.max(b.x) + pad).ceil() as i64).min(i64::from(self.viewport.width)) - 1;
        let min_y = (a.y.min(b.y) - pad).floor().max(0.0) as i64;
        let max_y = ((a.y.max(b.y) + pad).ceil() as i64).min(i64::from(self.viewport.height)) - 1;
        if min_x > max_x || min_y > max_y {
            return;
        }

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let p = Point::new(x as f64 + 0.5, y as f64 + 0.5);
                let dist = segment_distance(p, a, b);
                let coverage = (half - dist + 0.5).clamp(0.0, 1.0);
                if coverage > 0.0 {
                    self.blend_px(x, y, color.with_alpha_scaled(coverage));
                }
            }
        }
    }

    fn clip_box(&self, center: Point, radius: f64) -> Option<(i64, i64, i64, i64)> {
        let x0 = (center.x - radius).floor().max(0.0) as i64;
        let y0 = (center.y - radius).floor().max(0.0) as i64;
        let x1 = ((center.x + radius).ceil() as i64).min(i64::from(self.viewport.width)) - 1;
        let y1 = ((center.y + radius).ceil() as i64).min(i64::from(self.viewport.height)) - 1;
        if x0 > x1 || y0 > y1 {
            return None;
        }
        Some((x0, x1, y0, y1))
    }
}

fn buffer_len(viewport: Viewport) -> NiteglowResult<usize> {
    viewport
        .pixel_count()
        .checked_mul(4)
        .ok_or_else(|| NiteglowError::render("surface buffer size overflow"))
}

fn segment_distance(p: Point, a: Point, b: Point) -> f64 {
    let ab = b - a;
    let len2 = ab.x * ab.x + ab.y * ab.y;
    if len2 <= f64::EPSILON {
        return p.distance(a);
    }
    let ap = p - a;
    let t = ((ap.x * ab.x + ap.y * ab.y) / len2).clamp(0.0, 1.0);
    p.distance(Point::new(a.x + ab.x * t, a.y + ab.y * t))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alpha_sum(s: &PixelSurface) -> u64 {
        s.data().chunks_exact(4).map(|px| u64::from(px[3])).sum()
    }

    #[test]
    fn new_surface_is_transparent() {
        let s = PixelSurface::new(Viewport::new(8, 4)).unwrap();
        assert_eq!(s.data().len(), 8 * 4 * 4);
        assert_eq!(alpha_sum(&s), 0);
    }

    #[test]
    fn resize_reallocates_to_new_bounds() {
        let mut s = PixelSurface::new(Viewport::new(8, 4)).unwrap();
        s.fill(Rgba8Premul::opaque(1, 2, 3));
        s.resize(Viewport::new(3, 5)).unwrap();
        assert_eq!(s.width(), 3);
        assert_eq!(s.height(), 5);
        assert_eq!(s.data().len(), 3 * 5 * 4);
        assert_eq!(alpha_sum(&s), 0);
    }

    #[test]
    fn fill_sets_every_pixel() {
        let mut s = PixelSurface::new(Viewport::new(4, 4)).unwrap();
        s.fill(Rgba8Premul::opaque(9, 9, 9));
        assert!(s.data().chunks_exact(4).all(|px| px == [9, 9, 9, 255]));
    }

    #[test]
    fn fade_moves_toward_wash_color() {
        let mut s = PixelSurface::new(Viewport::new(2, 2)).unwrap();
        s.fill(Rgba8Premul::opaque(255, 255, 255));
        s.fade(Rgba8Premul::from_straight_rgba(0, 0, 0, 128));
        let px = &s.data()[..4];
        assert!(px[0] < 255);
        assert_eq!(px[3], 255);
    }

    #[test]
    fn circle_paints_inside_not_outside() {
        let mut s = PixelSurface::new(Viewport::new(16, 16)).unwrap();
        s.fill_circle(Point::new(8.0, 8.0), 3.0, Rgba8Premul::opaque(255, 0, 0));
        let px = |x: usize, y: usize| &s.data()[(y * 16 + x) * 4..(y * 16 + x) * 4 + 4];
        assert_eq!(px(8, 8)[3], 255);
        assert_eq!(px(0, 0)[3], 0);
    }

    #[test]
    fn offscreen_geometry_is_a_noop() {
        let mut s = PixelSurface::new(Viewport::new(8, 8)).unwrap();
        s.fill_circle(Point::new(-100.0, -100.0), 5.0, Rgba8Premul::opaque(255, 0, 0));
        s.stroke_line(
            Point::new(-50.0, -50.0),
            Point::new(-10.0, -10.0),
            2.0,
            Rgba8Premul::opaque(255, 0, 0),
        );
        s.fill_rect(Point::new(100.0, 100.0), 5.0, 5.0, Rgba8Premul::opaque(255, 0, 0));
        assert_eq!(alpha_sum(&s), 0);
    }

    #[test]
    fn degenerate_shapes_are_noops() {
        let mut s = PixelSurface::new(Viewport::new(8, 8)).unwrap();
        s.fill_circle(Point::new(4.0, 4.0), 0.0, Rgba8Premul::opaque(255, 0, 0));
        s.fill_rect(Point::new(1.0, 1.0), 0.0, 4.0, Rgba8Premul::opaque(255, 0, 0));
        s.stroke_line(
            Point::new(f64::NAN, 0.0),
            Point::new(4.0, 4.0),
            1.0,
            Rgba8Premul::opaque(255, 0, 0),
        );
        assert_eq!(alpha_sum(&s), 0);
    }

    #[test]
    fn line_covers_its_midpoint() {
        let mut s = PixelSurface::new(Viewport::new(16, 16)).unwrap();
        s.stroke_line(
            Point::new(1.0, 8.0),
            Point::new(15.0, 8.0),
            2.0,
            Rgba8Premul::opaque(0, 255, 0),
        );
        let idx = (8usize * 16 + 8) * 4;
        assert!(s.data()[idx + 3] > 0);
    }
}
