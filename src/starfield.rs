//! Shooting-star background: the simulation, without any drawing.

use std::f64::consts::PI;

/// RGB triplets, formatted to drop straight into `rgba(...)`.
pub const PALETTE: [&str; 5] = [
    "53, 208, 255",
    "182, 255, 92",
    "159, 110, 255",
    "255, 214, 112",
    "255, 255, 255",
];

const MIN_STARS: usize = 60;
const MAX_STARS: usize = 120;
const TWINKLE_STEP: f64 = 0.008;
const OFFSCREEN_MARGIN: f64 = 150.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Star {
    pub x: f64,
    pub y: f64,
    pub length: f64,
    pub speed: f64,
    pub size: f64,
    pub opacity: f64,
    pub twinkle: f64,
    pub color: &'static str,
}

impl Star {
    fn spawn(width: f64, height: f64, rng: &mut impl FnMut() -> f64) -> Self {
        Star {
            x: between(rng, 0.0, width),
            y: between(rng, -height, height),
            length: between(rng, 60.0, 160.0),
            speed: between(rng, 0.25, 0.9),
            size: between(rng, 0.7, 1.4),
            opacity: between(rng, 0.18, 0.55),
            twinkle: between(rng, 0.0, PI * 2.0),
            color: pick_color(rng),
        }
    }

    /// Opacity at the current twinkle phase.
    pub fn glow(&self) -> f64 {
        (self.opacity + self.twinkle.sin() * 0.15).clamp(0.1, 0.8)
    }

    /// End of the trail, up and to the left of the head.
    pub fn tail(&self) -> (f64, f64) {
        (self.x - self.length, self.y - self.length * 0.7)
    }
}

pub struct Starfield {
    width: f64,
    height: f64,
    stars: Vec<Star>,
}

impl Starfield {
    pub fn new(width: f64, height: f64, rng: &mut impl FnMut() -> f64) -> Self {
        let mut field = Starfield {
            width,
            height,
            stars: Vec::new(),
        };
        field.resize(width, height, rng);
        field
    }

    pub fn star_count(width: f64) -> usize {
        ((width / 12.0).floor().max(0.0) as usize).clamp(MIN_STARS, MAX_STARS)
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    #[cfg(test)]
    pub(crate) fn stars(&self) -> &[Star] {
        &self.stars
    }

    /// Regenerates every star for the new canvas size.
    pub fn resize(&mut self, width: f64, height: f64, rng: &mut impl FnMut() -> f64) {
        self.width = width;
        self.height = height;
        self.stars = (0..Self::star_count(width))
            .map(|_| Star::spawn(width, height, rng))
            .collect();
    }

    /// Advances one frame. `draw` sees each star at its pre-move position
    /// together with its glow for this frame.
    pub fn step(&mut self, rng: &mut impl FnMut() -> f64, mut draw: impl FnMut(&Star, f64)) {
        let (width, height) = (self.width, self.height);
        for star in &mut self.stars {
            star.twinkle += TWINKLE_STEP;
            draw(star, star.glow());

            star.x += star.speed * 0.8;
            star.y += star.speed * 1.05;

            if star.y > height + OFFSCREEN_MARGIN || star.x > width + OFFSCREEN_MARGIN {
                star.x = between(rng, -200.0, width * 0.4);
                star.y = between(rng, -200.0, 0.0);
                star.color = pick_color(rng);
            }
        }
    }
}

fn between(rng: &mut impl FnMut() -> f64, min: f64, max: f64) -> f64 {
    rng() * (max - min) + min
}

fn pick_color(rng: &mut impl FnMut() -> f64) -> &'static str {
    let index = (rng() * PALETTE.len() as f64).floor() as usize;
    PALETTE[index.min(PALETTE.len() - 1)]
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Deterministic stand-in for `Math.random`.
    fn lcg(seed: u64) -> impl FnMut() -> f64 {
        let mut state = seed;
        move || {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            (state >> 11) as f64 / (1u64 << 53) as f64
        }
    }

    #[test]
    fn star_count_follows_width_within_bounds() {
        assert_eq!(Starfield::star_count(320.0), 60);
        assert_eq!(Starfield::star_count(1080.0), 90);
        assert_eq!(Starfield::star_count(2560.0), 120);
        assert_eq!(Starfield::star_count(0.0), 60);
    }

    #[test]
    fn spawned_stars_stay_in_their_ranges() {
        let mut rng = lcg(7);
        let field = Starfield::new(1280.0, 720.0, &mut rng);

        assert_eq!(field.stars().len(), 106);
        for star in field.stars() {
            assert!((0.0..1280.0).contains(&star.x));
            assert!((-720.0..720.0).contains(&star.y));
            assert!((60.0..160.0).contains(&star.length));
            assert!((0.25..0.9).contains(&star.speed));
            assert!(PALETTE.contains(&star.color));
        }
    }

    #[test]
    fn glow_is_clamped() {
        let mut star = Star::spawn(100.0, 100.0, &mut lcg(1));
        star.opacity = 0.75;
        star.twinkle = PI / 2.0;
        assert_eq!(star.glow(), 0.8);

        star.opacity = 0.0;
        star.twinkle = -PI / 2.0;
        assert_eq!(star.glow(), 0.1);
    }

    #[test]
    fn step_draws_every_star_then_moves_it() {
        let mut rng = lcg(3);
        let mut field = Starfield::new(800.0, 600.0, &mut rng);
        let before: Vec<(f64, f64)> = field.stars().iter().map(|star| (star.x, star.y)).collect();

        let mut drawn = Vec::new();
        field.step(&mut rng, |star, glow| {
            assert!((0.1..=0.8).contains(&glow));
            drawn.push((star.x, star.y));
        });

        assert_eq!(drawn, before);
        let first = &field.stars()[0];
        assert!((first.x - (before[0].0 + first.speed * 0.8)).abs() < 1e-9);
    }

    #[test]
    fn stars_leaving_the_canvas_respawn_top_left() {
        let mut rng = lcg(11);
        let mut field = Starfield::new(1000.0, 500.0, &mut rng);
        field.stars[0].y = 500.0 + OFFSCREEN_MARGIN + 10.0;

        field.step(&mut rng, |_, _| {});

        let star = &field.stars()[0];
        assert!((-200.0..400.0).contains(&star.x), "x = {}", star.x);
        assert!((-200.0..0.0).contains(&star.y), "y = {}", star.y);
    }
}
