//! Full-viewport particle field: drifting points joined by faint lines, with a
//! weak pull towards the cursor.
//!
//! The simulation is independent of the browser. Each frame is drawn through
//! a [`Surface`], so the canvas glue lives in the frontend and tests record
//! draw calls instead.
//!
//! Connections are checked for every pair of particles, O(n²) per frame. The
//! particle count is bounded only by the viewport area divided by
//! `area_per_particle`, so very large surfaces get proportionally slower.

use rand::Rng;
use std::fmt;

pub const DEFAULT_AREA_PER_PARTICLE: f64 = 15_000.0;
pub const MAX_SPEED: f64 = 1.0;
pub const LINK_DISTANCE: f64 = 150.0;
pub const LINK_BASE_OPACITY: f64 = 0.1;
pub const CURSOR_LINK_DISTANCE: f64 = 200.0;
pub const CURSOR_LINK_BASE_OPACITY: f64 = 0.15;
pub const CURSOR_ATTRACTION_RADIUS: f64 = 300.0;
pub const CURSOR_ATTRACTION_STRENGTH: f64 = 0.01;
pub const LINE_WIDTH: f64 = 0.5;
/// Above this many particles a regeneration is reported as dense.
pub const DENSE_FIELD_THRESHOLD: usize = 400;

const INITIAL_SPEED_SPREAD: f64 = 0.5;
const RADIUS_RANGE: (f64, f64) = (1.0, 3.0);
const OPACITY_RANGE: (f64, f64) = (0.2, 0.7);

pub const PARTICLE_HUE: Hsla = Hsla::new(265.0, 89.0, 66.0, 1.0);
pub const CURSOR_LINK_HUE: Hsla = Hsla::new(185.0, 100.0, 50.0, 1.0);

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hsla {
    pub hue: f64,
    pub saturation: f64,
    pub lightness: f64,
    pub alpha: f64,
}

impl Hsla {
    pub const fn new(hue: f64, saturation: f64, lightness: f64, alpha: f64) -> Self {
        Self {
            hue,
            saturation,
            lightness,
            alpha,
        }
    }

    pub fn with_alpha(self, alpha: f64) -> Self {
        Self { alpha, ..self }
    }
}

impl fmt::Display for Hsla {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "hsla({}, {}%, {}%, {})",
            self.hue, self.saturation, self.lightness, self.alpha
        )
    }
}

/// Drawing operations the field needs from its host.
pub trait Surface {
    fn clear(&mut self, width: f64, height: f64);
    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Hsla);
    fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), width: f64, color: Hsla);
}

#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub radius: f64,
    pub opacity: f64,
}

impl Particle {
    fn random(rng: &mut impl Rng, width: f64, height: f64) -> Self {
        Self {
            x: rng.gen::<f64>() * width,
            y: rng.gen::<f64>() * height,
            vx: (rng.gen::<f64>() - 0.5) * INITIAL_SPEED_SPREAD,
            vy: (rng.gen::<f64>() - 0.5) * INITIAL_SPEED_SPREAD,
            radius: rng.gen_range(RADIUS_RANGE.0..RADIUS_RANGE.1),
            opacity: rng.gen_range(OPACITY_RANGE.0..OPACITY_RANGE.1),
        }
    }

    pub fn speed(&self) -> f64 {
        self.vx.hypot(self.vy)
    }

    /// One integration step inside a `width` x `height` box.
    pub fn step(&mut self, width: f64, height: f64, cursor: Option<(f64, f64)>) {
        self.x += self.vx;
        self.y += self.vy;

        // Elastic reflection: point the velocity back inside the box.
        if self.x < 0.0 {
            self.vx = self.vx.abs();
        } else if self.x > width {
            self.vx = -self.vx.abs();
        }
        if self.y < 0.0 {
            self.vy = self.vy.abs();
        } else if self.y > height {
            self.vy = -self.vy.abs();
        }

        if let Some((cursor_x, cursor_y)) = cursor {
            let dx = cursor_x - self.x;
            let dy = cursor_y - self.y;
            let distance = dx.hypot(dy);
            if distance > 0.0 && distance < CURSOR_ATTRACTION_RADIUS {
                self.vx += dx / distance * CURSOR_ATTRACTION_STRENGTH;
                self.vy += dy / distance * CURSOR_ATTRACTION_STRENGTH;
            }
        }

        let speed = self.speed();
        if speed > MAX_SPEED {
            self.vx = self.vx / speed * MAX_SPEED;
            self.vy = self.vy / speed * MAX_SPEED;
        }
    }
}

/// Opacity of a link between two points `distance` apart, or `None` when they
/// are too far apart to be joined.
pub fn link_opacity(distance: f64, reach: f64, base_opacity: f64) -> Option<f64> {
    (distance < reach).then(|| base_opacity * (1.0 - distance / reach))
}

/// Number of particles for a surface of the given size.
pub fn particle_count(width: f64, height: f64, area_per_particle: f64) -> usize {
    if width <= 0.0 || height <= 0.0 || area_per_particle <= 0.0 {
        return 0;
    }
    (width * height / area_per_particle).floor() as usize
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldState {
    Uninitialized,
    Running,
    Stopped,
}

#[derive(Clone, Debug)]
pub struct ParticleField {
    state: FieldState,
    width: f64,
    height: f64,
    area_per_particle: f64,
    cursor: Option<(f64, f64)>,
    particles: Vec<Particle>,
}

impl Default for ParticleField {
    fn default() -> Self {
        Self::new(DEFAULT_AREA_PER_PARTICLE)
    }
}

impl ParticleField {
    pub fn new(area_per_particle: f64) -> Self {
        Self {
            state: FieldState::Uninitialized,
            width: 0.0,
            height: 0.0,
            area_per_particle,
            cursor: None,
            particles: Vec::new(),
        }
    }

    pub fn state(&self) -> FieldState {
        self.state
    }

    pub fn extent(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn cursor(&self) -> Option<(f64, f64)> {
        self.cursor
    }

    /// Discards every particle and seeds a fresh generation sized for the
    /// new extent. The first resize starts the field. Returns the new count.
    pub fn resize(&mut self, width: f64, height: f64, rng: &mut impl Rng) -> usize {
        if self.state == FieldState::Stopped {
            return 0;
        }

        let (width, height) = (width.max(0.0), height.max(0.0));
        let count = particle_count(width, height, self.area_per_particle);
        self.width = width;
        self.height = height;
        self.particles = (0..count)
            .map(|_| Particle::random(rng, width, height))
            .collect();
        self.state = FieldState::Running;
        count
    }

    pub fn pointer_moved(&mut self, x: f64, y: f64) {
        if self.state != FieldState::Stopped {
            self.cursor = Some((x, y));
        }
    }

    pub fn stop(&mut self) {
        self.state = FieldState::Stopped;
        self.particles.clear();
    }

    /// Advances and draws one frame. Does nothing unless the field is running.
    pub fn frame(&mut self, surface: &mut impl Surface) -> bool {
        if self.state != FieldState::Running {
            return false;
        }

        surface.clear(self.width, self.height);

        for particle in &mut self.particles {
            particle.step(self.width, self.height, self.cursor);
            surface.fill_circle(
                particle.x,
                particle.y,
                particle.radius,
                PARTICLE_HUE.with_alpha(particle.opacity),
            );
        }

        self.draw_links(surface);
        true
    }

    fn draw_links(&self, surface: &mut impl Surface) {
        for (index, particle) in self.particles.iter().enumerate() {
            for other in &self.particles[index + 1..] {
                let distance = (particle.x - other.x).hypot(particle.y - other.y);
                if let Some(alpha) = link_opacity(distance, LINK_DISTANCE, LINK_BASE_OPACITY) {
                    surface.stroke_line(
                        (particle.x, particle.y),
                        (other.x, other.y),
                        LINE_WIDTH,
                        PARTICLE_HUE.with_alpha(alpha),
                    );
                }
            }

            let Some(cursor) = self.cursor else {
                continue;
            };
            let distance = (particle.x - cursor.0).hypot(particle.y - cursor.1);
            if let Some(alpha) =
                link_opacity(distance, CURSOR_LINK_DISTANCE, CURSOR_LINK_BASE_OPACITY)
            {
                surface.stroke_line(
                    (particle.x, particle.y),
                    cursor,
                    LINE_WIDTH,
                    CURSOR_LINK_HUE.with_alpha(alpha),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[derive(Debug, PartialEq)]
    enum DrawCall {
        Clear,
        Circle(Hsla),
        Line((f64, f64), (f64, f64), Hsla),
    }

    #[derive(Default)]
    struct RecordingSurface {
        calls: Vec<DrawCall>,
    }

    impl RecordingSurface {
        fn lines(&self) -> Vec<&DrawCall> {
            self.calls
                .iter()
                .filter(|call| matches!(call, DrawCall::Line(..)))
                .collect()
        }
    }

    impl Surface for RecordingSurface {
        fn clear(&mut self, _width: f64, _height: f64) {
            self.calls.push(DrawCall::Clear);
        }

        fn fill_circle(&mut self, _x: f64, _y: f64, _radius: f64, color: Hsla) {
            self.calls.push(DrawCall::Circle(color));
        }

        fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), _width: f64, color: Hsla) {
            self.calls.push(DrawCall::Line(from, to, color));
        }
    }

    fn particle(x: f64, y: f64, vx: f64, vy: f64) -> Particle {
        Particle {
            x,
            y,
            vx,
            vy,
            radius: 2.0,
            opacity: 0.5,
        }
    }

    fn running_field(particles: Vec<Particle>) -> ParticleField {
        let mut field = ParticleField::default();
        field.resize(1_000.0, 1_000.0, &mut StdRng::seed_from_u64(1));
        field.particles = particles;
        field
    }

    #[test]
    fn resize_uses_area_density_rule() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut field = ParticleField::default();

        assert_eq!(field.resize(1_280.0, 720.0, &mut rng), 61);
        assert_eq!(field.particles().len(), 61);
        assert_eq!(field.state(), FieldState::Running);

        assert_eq!(field.resize(100.0, 100.0, &mut rng), 0);
        assert!(field.particles().is_empty());
    }

    #[test]
    fn resize_discards_previous_generation() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut field = ParticleField::default();
        field.resize(1_920.0, 1_080.0, &mut rng);
        let before = field.particles().to_vec();

        field.resize(1_920.0, 1_080.0, &mut rng);
        assert_eq!(field.particles().len(), before.len());
        assert_ne!(field.particles(), before.as_slice());
    }

    #[test]
    fn generated_particles_respect_ranges() {
        let mut field = ParticleField::default();
        field.resize(1_500.0, 900.0, &mut StdRng::seed_from_u64(11));

        for particle in field.particles() {
            assert!((0.0..1_500.0).contains(&particle.x));
            assert!((0.0..900.0).contains(&particle.y));
            assert!(particle.vx.abs() <= 0.25 && particle.vy.abs() <= 0.25);
            assert!((1.0..3.0).contains(&particle.radius));
            assert!((0.2..0.7).contains(&particle.opacity));
        }
    }

    #[test]
    fn crossing_a_boundary_flips_velocity() {
        let mut right = particle(999.8, 500.0, 0.5, 0.1);
        right.step(1_000.0, 1_000.0, None);
        assert_eq!(right.vx, -0.5);
        assert_eq!(right.vy, 0.1);

        let mut top = particle(500.0, 0.2, 0.0, -0.4);
        top.step(1_000.0, 1_000.0, None);
        assert_eq!(top.vy, 0.4);
        assert!(top.speed() <= MAX_SPEED);
    }

    #[test]
    fn particle_outside_keeps_heading_inward() {
        let mut stray = particle(1_010.0, 500.0, -0.5, 0.0);
        stray.step(1_000.0, 1_000.0, None);
        assert_eq!(stray.vx, -0.5);
    }

    #[test]
    fn speed_is_clamped_after_attraction() {
        let mut fast = particle(100.0, 100.0, 1.0, 0.0);
        fast.step(1_000.0, 1_000.0, Some((200.0, 100.0)));
        assert!((fast.speed() - MAX_SPEED).abs() < 1e-12);
        assert!(fast.vx > 0.0);
    }

    #[test]
    fn cursor_attraction_only_within_radius() {
        let mut near = particle(100.0, 100.0, 0.0, 0.0);
        near.step(1_000.0, 1_000.0, Some((100.0, 200.0)));
        assert!((near.vy - CURSOR_ATTRACTION_STRENGTH).abs() < 1e-12);
        assert_eq!(near.vx, 0.0);

        let mut far = particle(100.0, 100.0, 0.0, 0.0);
        far.step(1_000.0, 1_000.0, Some((100.0, 400.0)));
        assert_eq!(far.vy, 0.0);
    }

    #[test]
    fn particle_on_cursor_is_not_disturbed() {
        let mut centred = particle(100.0, 100.0, 0.0, 0.0);
        centred.step(1_000.0, 1_000.0, Some((100.0, 100.0)));
        assert_eq!((centred.vx, centred.vy), (0.0, 0.0));
    }

    #[test]
    fn link_opacity_fades_linearly() {
        assert_eq!(link_opacity(0.0, 150.0, 0.1), Some(0.1));
        let half = link_opacity(75.0, 150.0, 0.1).expect("within reach");
        assert!((half - 0.05).abs() < 1e-12);
        assert_eq!(link_opacity(150.0, 150.0, 0.1), None);
        assert_eq!(link_opacity(151.0, 150.0, 0.1), None);
    }

    #[test]
    fn frame_links_close_pairs_only() {
        let mut field = running_field(vec![
            particle(100.0, 100.0, 0.0, 0.0),
            particle(200.0, 100.0, 0.0, 0.0),
            particle(600.0, 600.0, 0.0, 0.0),
        ]);
        let mut surface = RecordingSurface::default();

        assert!(field.frame(&mut surface));

        assert_eq!(surface.calls[0], DrawCall::Clear);
        let lines = surface.lines();
        assert_eq!(lines.len(), 1);
        let DrawCall::Line(from, to, color) = lines[0] else {
            unreachable!();
        };
        assert_eq!((*from, *to), ((100.0, 100.0), (200.0, 100.0)));
        assert!((color.alpha - 0.1 * (1.0 - 100.0 / 150.0)).abs() < 1e-12);
        assert_eq!(color.hue, PARTICLE_HUE.hue);
    }

    #[test]
    fn cursor_links_use_distinct_color() {
        let mut field = running_field(vec![particle(500.0, 500.0, 0.0, 0.0)]);
        field.pointer_moved(500.0, 600.0);
        let mut surface = RecordingSurface::default();

        field.frame(&mut surface);

        let lines = surface.lines();
        assert_eq!(lines.len(), 1);
        let DrawCall::Line(_, to, color) = lines[0] else {
            unreachable!();
        };
        assert_eq!(*to, (500.0, 600.0));
        assert_eq!(color.hue, CURSOR_LINK_HUE.hue);
    }

    #[test]
    fn no_cursor_links_before_pointer_moves() {
        let mut field = running_field(vec![particle(5.0, 5.0, 0.0, 0.0)]);
        let mut surface = RecordingSurface::default();
        field.frame(&mut surface);
        assert!(surface.lines().is_empty());
    }

    #[test]
    fn lifecycle_uninitialized_running_stopped() {
        let mut field = ParticleField::default();
        let mut surface = RecordingSurface::default();
        assert_eq!(field.state(), FieldState::Uninitialized);
        assert!(!field.frame(&mut surface));

        field.resize(800.0, 600.0, &mut StdRng::seed_from_u64(5));
        assert!(field.frame(&mut surface));

        field.stop();
        assert_eq!(field.state(), FieldState::Stopped);
        surface.calls.clear();
        assert!(!field.frame(&mut surface));
        assert!(surface.calls.is_empty());
        assert_eq!(field.resize(800.0, 600.0, &mut StdRng::seed_from_u64(5)), 0);
        assert_eq!(field.state(), FieldState::Stopped);
    }

    #[test]
    fn count_is_conserved_across_frames() {
        let mut field = ParticleField::default();
        field.resize(640.0, 480.0, &mut StdRng::seed_from_u64(9));
        field.pointer_moved(320.0, 240.0);
        let count = field.particles().len();
        let mut surface = RecordingSurface::default();

        for _ in 0..500 {
            field.frame(&mut surface);
            surface.calls.clear();
        }

        assert_eq!(field.particles().len(), count);
        assert!(field.particles().iter().all(|p| p.speed() <= MAX_SPEED + 1e-12));
    }

    #[test]
    fn hsla_formats_as_css() {
        assert_eq!(
            PARTICLE_HUE.with_alpha(0.5).to_string(),
            "hsla(265, 89%, 66%, 0.5)"
        );
    }
}
