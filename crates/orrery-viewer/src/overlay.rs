//! Screen-space overlay: the planet detail panel and the loading spinner.
//!
//! Geometry is laid out in physical pixels (origin top-left, y down) and
//! converted to NDC for [`orrery_render::OverlayPipeline`]. Panel sizes are
//! given in logical pixels and multiplied by the window's scale factor. Text
//! is described by [`TextLabel`]s and drawn by [`crate::text::TextLayer`].

use glam::Vec2;
use orrery_catalog::Planet;
use orrery_render::{OverlayVertex, ndc_from_cursor};

pub const PANEL_WIDTH: f32 = 400.0;
pub const PANEL_HEIGHT: f32 = 120.0;
/// Side of the close box in the panel's top-right corner.
pub const CLOSE_BOX_SIZE: f32 = 24.0;
const CLOSE_BOX_MARGIN: f32 = 8.0;
const HEADER_HEIGHT: f32 = 40.0;
const TEXT_INSET: f32 = 12.0;
const TITLE_SIZE: f32 = 22.0;
const BODY_SIZE: f32 = 17.0;
const BODY_LINE_HEIGHT: f32 = 26.0;
const TITLE_COLOR: [u8; 3] = [255, 255, 255];
const BODY_COLOR: [u8; 3] = [200, 212, 235];

const PANEL_COLOR: [f32; 4] = [0.05, 0.07, 0.12, 0.88];
const HEADER_COLOR: [f32; 4] = [0.16, 0.24, 0.42, 0.95];
const CLOSE_BOX_COLOR: [f32; 4] = [0.72, 0.18, 0.18, 1.0];
const CLOSE_MARK_COLOR: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
const SPINNER_COLOR: [f32; 3] = [0.85, 0.9, 1.0];

const SPINNER_INNER_RADIUS: f32 = 18.0;
const SPINNER_OUTER_RADIUS: f32 = 26.0;
const SPINNER_SEGMENTS: usize = 24;
/// Radians per second.
const SPINNER_SPEED: f32 = 4.0;
/// The arc covers three quarters of the circle.
const SPINNER_SWEEP: f32 = std::f32::consts::TAU * 0.75;

fn orbital_period_text(planet: &Planet) -> String {
    planet
        .orbital_period
        .map_or_else(|| "unknown".to_string(), |p| format!("{p} Earth days"))
}

fn gravity_text(planet: &Planet) -> String {
    planet
        .gravity
        .map_or_else(|| "unknown".to_string(), |g| format!("{g} m/s²"))
}

/// Detail line for a planet; absent attributes read "unknown".
pub fn detail_text(planet: &Planet) -> String {
    format!(
        "{} — Orbital Period: {} — Gravity: {}",
        planet.name,
        orbital_period_text(planet),
        gravity_text(planet),
    )
}

/// A run of text placed in physical pixels, top-left anchored.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLabel {
    pub text: String,
    pub position: Vec2,
    /// Font size in physical pixels.
    pub size: f32,
    /// Wrap width in physical pixels.
    pub max_width: f32,
    pub color: [u8; 3],
}

/// Axis-aligned rectangle in physical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl PixelRect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Edges are inclusive.
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }

    fn corners(&self) -> [Vec2; 4] {
        let (x0, y0) = (self.x, self.y);
        let (x1, y1) = (self.x + self.width, self.y + self.height);
        [
            Vec2::new(x0, y0),
            Vec2::new(x1, y0),
            Vec2::new(x1, y1),
            Vec2::new(x0, y1),
        ]
    }
}

/// Where a click landed relative to the open detail panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayClick {
    Close,
    Inside,
    Outside,
}

/// The detail panel for one planet, centered in the window.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailPanel {
    pub bounds: PixelRect,
    pub close_box: PixelRect,
    labels: Vec<TextLabel>,
    scale: f32,
    width: u32,
    height: u32,
}

impl DetailPanel {
    /// Lay out the panel for `planet` in a `width`x`height` window with the
    /// given scale factor.
    pub fn centered(planet: &Planet, width: u32, height: u32, scale: f32) -> Self {
        let scale = if scale.is_finite() && scale > 0.0 { scale } else { 1.0 };
        let (panel_width, panel_height) = (PANEL_WIDTH * scale, PANEL_HEIGHT * scale);
        let close_size = CLOSE_BOX_SIZE * scale;
        let margin = CLOSE_BOX_MARGIN * scale;

        let bounds = PixelRect::new(
            (width as f32 - panel_width) * 0.5,
            (height as f32 - panel_height) * 0.5,
            panel_width,
            panel_height,
        );
        let close_box = PixelRect::new(
            bounds.x + bounds.width - margin - close_size,
            bounds.y + margin,
            close_size,
            close_size,
        );
        let labels = panel_labels(planet, bounds, close_box, scale);
        Self {
            bounds,
            close_box,
            labels,
            scale,
            width,
            height,
        }
    }

    /// Name in the header, then orbital period and gravity in the body.
    pub fn labels(&self) -> &[TextLabel] {
        &self.labels
    }

    pub fn hit(&self, position: Vec2) -> OverlayClick {
        if self.close_box.contains(position) {
            OverlayClick::Close
        } else if self.bounds.contains(position) {
            OverlayClick::Inside
        } else {
            OverlayClick::Outside
        }
    }

    /// Panel background, header bar and the close box with its cross.
    pub fn vertices(&self) -> Vec<OverlayVertex> {
        let header = PixelRect::new(
            self.bounds.x,
            self.bounds.y,
            self.bounds.width,
            HEADER_HEIGHT * self.scale,
        );
        let mut vertices = Vec::with_capacity(30);
        self.push_rect(&mut vertices, self.bounds, PANEL_COLOR);
        self.push_rect(&mut vertices, header, HEADER_COLOR);
        self.push_rect(&mut vertices, self.close_box, CLOSE_BOX_COLOR);

        let mark = inset(self.close_box, 6.0 * self.scale);
        let [top_left, top_right, bottom_right, bottom_left] = mark.corners();
        let thickness = 2.0 * self.scale;
        self.push_segment(&mut vertices, top_left, bottom_right, thickness, CLOSE_MARK_COLOR);
        self.push_segment(&mut vertices, top_right, bottom_left, thickness, CLOSE_MARK_COLOR);
        vertices
    }

    fn push_rect(&self, out: &mut Vec<OverlayVertex>, rect: PixelRect, color: [f32; 4]) {
        push_quad(out, rect.corners(), color, self.width, self.height);
    }

    fn push_segment(
        &self,
        out: &mut Vec<OverlayVertex>,
        from: Vec2,
        to: Vec2,
        thickness: f32,
        color: [f32; 4],
    ) {
        let normal = (to - from).perp().normalize_or_zero() * (thickness * 0.5);
        push_quad(
            out,
            [from + normal, to + normal, to - normal, from - normal],
            color,
            self.width,
            self.height,
        );
    }
}

fn panel_labels(
    planet: &Planet,
    bounds: PixelRect,
    close_box: PixelRect,
    scale: f32,
) -> Vec<TextLabel> {
    let padding = TEXT_INSET * scale;
    let left = bounds.x + padding;
    let title_top = bounds.y + (HEADER_HEIGHT - TITLE_SIZE) * 0.5 * scale;
    let body_top = bounds.y + (HEADER_HEIGHT + 8.0) * scale;
    let body_width = (bounds.width - 2.0 * padding).max(0.0);

    let body = |row: usize, text: String| TextLabel {
        text,
        position: Vec2::new(left, body_top + row as f32 * BODY_LINE_HEIGHT * scale),
        size: BODY_SIZE * scale,
        max_width: body_width,
        color: BODY_COLOR,
    };
    vec![
        TextLabel {
            text: planet.name.clone(),
            position: Vec2::new(left, title_top),
            size: TITLE_SIZE * scale,
            max_width: (close_box.x - left - padding).max(0.0),
            color: TITLE_COLOR,
        },
        body(0, format!("Orbital Period: {}", orbital_period_text(planet))),
        body(1, format!("Gravity: {}", gravity_text(planet))),
    ]
}

fn inset(rect: PixelRect, amount: f32) -> PixelRect {
    PixelRect::new(
        rect.x + amount,
        rect.y + amount,
        (rect.width - 2.0 * amount).max(0.0),
        (rect.height - 2.0 * amount).max(0.0),
    )
}

/// Two triangles for a quad given in winding order.
fn push_quad(
    out: &mut Vec<OverlayVertex>,
    corners: [Vec2; 4],
    color: [f32; 4],
    width: u32,
    height: u32,
) {
    let [a, b, c, d] = corners.map(|p| OverlayVertex {
        position: ndc_from_cursor(f64::from(p.x), f64::from(p.y), width, height).to_array(),
        color,
    });
    out.extend_from_slice(&[a, b, c, a, c, d]);
}

/// Rotating arc in the middle of the window, fading toward its tail.
pub fn spinner_vertices(elapsed_seconds: f64, width: u32, height: u32) -> Vec<OverlayVertex> {
    let center = Vec2::new(width as f32 * 0.5, height as f32 * 0.5);
    let start = (elapsed_seconds as f32 * SPINNER_SPEED) % std::f32::consts::TAU;
    let step = SPINNER_SWEEP / SPINNER_SEGMENTS as f32;

    let mut vertices = Vec::with_capacity(SPINNER_SEGMENTS * 6);
    for segment in 0..SPINNER_SEGMENTS {
        let a0 = start + step * segment as f32;
        let a1 = a0 + step;
        let dir0 = Vec2::from_angle(a0);
        let dir1 = Vec2::from_angle(a1);
        let alpha = 0.15 + 0.85 * (segment + 1) as f32 / SPINNER_SEGMENTS as f32;
        let [r, g, b] = SPINNER_COLOR;
        push_quad(
            &mut vertices,
            [
                center + dir0 * SPINNER_INNER_RADIUS,
                center + dir0 * SPINNER_OUTER_RADIUS,
                center + dir1 * SPINNER_OUTER_RADIUS,
                center + dir1 * SPINNER_INNER_RADIUS,
            ],
            [r, g, b, alpha],
            width,
            height,
        );
    }
    vertices
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_text_known_values() {
        let venus = Planet::new(2, "Venus", 225.0, 8.87);
        assert_eq!(
            detail_text(&venus),
            "Venus — Orbital Period: 225 Earth days — Gravity: 8.87 m/s²"
        );
    }

    #[test]
    fn test_detail_text_unknown_values() {
        let planet = Planet::with_unknown_attributes(9, "Planet X");
        assert_eq!(
            detail_text(&planet),
            "Planet X — Orbital Period: unknown — Gravity: unknown"
        );
    }

    fn venus() -> Planet {
        Planet::new(2, "Venus", 225.0, 8.87)
    }

    fn label_texts(panel: &DetailPanel) -> Vec<&str> {
        panel.labels().iter().map(|l| l.text.as_str()).collect()
    }

    #[test]
    fn test_panel_centered() {
        let panel = DetailPanel::centered(&venus(), 1280, 720, 1.0);
        assert_eq!(panel.bounds, PixelRect::new(440.0, 300.0, 400.0, 120.0));
        assert_eq!(panel.close_box.x + panel.close_box.width, 832.0);
        assert_eq!(panel.close_box.y, 308.0);
    }

    #[test]
    fn test_panel_scales_with_scale_factor() {
        let panel = DetailPanel::centered(&venus(), 2560, 1440, 2.0);
        assert_eq!(panel.bounds, PixelRect::new(880.0, 600.0, 800.0, 240.0));
        assert_eq!(panel.close_box.width, 2.0 * CLOSE_BOX_SIZE);
        assert_eq!(panel.close_box.x + panel.close_box.width, 1664.0);
        assert_eq!(panel.close_box.y, 616.0);
        assert_eq!(panel.labels()[0].size, 2.0 * TITLE_SIZE);

        // A click on the scaled close box closes; the unscaled spot is inside.
        assert_eq!(panel.hit(Vec2::new(1640.0, 640.0)), OverlayClick::Close);
        assert_eq!(panel.hit(Vec2::new(1240.0, 700.0)), OverlayClick::Inside);
    }

    #[test]
    fn test_invalid_scale_falls_back_to_one() {
        let panel = DetailPanel::centered(&venus(), 1280, 720, 0.0);
        assert_eq!(panel.bounds.width, PANEL_WIDTH);
    }

    #[test]
    fn test_panel_text_follows_planet() {
        let mars = Planet::new(4, "Mars", 687.0, 3.72);
        let venus_panel = DetailPanel::centered(&venus(), 1280, 720, 1.0);
        let mars_panel = DetailPanel::centered(&mars, 1280, 720, 1.0);
        assert_eq!(
            label_texts(&venus_panel),
            [
                "Venus",
                "Orbital Period: 225 Earth days",
                "Gravity: 8.87 m/s²"
            ]
        );
        assert_eq!(
            label_texts(&mars_panel),
            [
                "Mars",
                "Orbital Period: 687 Earth days",
                "Gravity: 3.72 m/s²"
            ]
        );
        assert_eq!(venus_panel.vertices(), mars_panel.vertices());
    }

    #[test]
    fn test_panel_text_unknown_values() {
        let planet = Planet::with_unknown_attributes(9, "Planet X");
        let panel = DetailPanel::centered(&planet, 1280, 720, 1.0);
        assert_eq!(
            label_texts(&panel),
            [
                "Planet X",
                "Orbital Period: unknown",
                "Gravity: unknown"
            ]
        );
    }

    #[test]
    fn test_labels_inside_panel() {
        let panel = DetailPanel::centered(&venus(), 1280, 720, 1.5);
        for label in panel.labels() {
            assert!(panel.bounds.contains(label.position));
            let bottom = label.position + Vec2::new(label.max_width, label.size);
            assert!(panel.bounds.contains(bottom), "{label:?}");
        }
        // The name stays clear of the close box.
        let title = &panel.labels()[0];
        assert!(title.position.x + title.max_width < panel.close_box.x);
    }

    #[test]
    fn test_hit_regions() {
        let panel = DetailPanel::centered(&venus(), 1280, 720, 1.0);
        assert_eq!(panel.hit(Vec2::new(820.0, 320.0)), OverlayClick::Close);
        assert_eq!(panel.hit(Vec2::new(640.0, 360.0)), OverlayClick::Inside);
        assert_eq!(panel.hit(Vec2::new(100.0, 100.0)), OverlayClick::Outside);
        assert_eq!(panel.hit(Vec2::new(640.0, 421.0)), OverlayClick::Outside);
    }

    #[test]
    fn test_panel_vertices_inside_ndc() {
        let vertices = DetailPanel::centered(&venus(), 1280, 720, 1.0).vertices();
        assert_eq!(vertices.len(), 5 * 6);
        for v in &vertices {
            assert!(v.position[0].abs() <= 1.0 && v.position[1].abs() <= 1.0);
        }
        // Background first so the header and close box draw over it.
        assert_eq!(vertices[0].color, PANEL_COLOR);
        let [x, y] = vertices[0].position;
        assert!((x - (-0.3125)).abs() < 1e-6);
        assert!((y - (1.0 - 300.0 / 360.0)).abs() < 1e-6);
    }

    #[test]
    fn test_spinner_ring_around_center() {
        let vertices = spinner_vertices(0.0, 800, 600);
        assert_eq!(vertices.len(), SPINNER_SEGMENTS * 6);
        for v in &vertices {
            let px = Vec2::new((v.position[0] + 1.0) * 400.0, (1.0 - v.position[1]) * 300.0);
            let r = px.distance(Vec2::new(400.0, 300.0));
            assert!((SPINNER_INNER_RADIUS - 1e-2..=SPINNER_OUTER_RADIUS + 1e-2).contains(&r));
        }
    }

    #[test]
    fn test_spinner_rotates() {
        let a = spinner_vertices(0.0, 800, 600);
        let b = spinner_vertices(0.5, 800, 600);
        assert_ne!(a[0].position, b[0].position);
    }
}
