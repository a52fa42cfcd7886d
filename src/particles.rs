use crate::utils;
use macroquad::prelude::{Color, Vec2, draw_rectangle};
use rand::Rng;
use rand::rngs::ThreadRng;

const CONFETTI_COLORS: [Color; 5] = [
    Color::new(0.98, 0.80, 0.08, 1.0),
    Color::new(0.94, 0.27, 0.27, 1.0),
    Color::new(0.13, 0.77, 0.37, 1.0),
    Color::new(0.23, 0.51, 0.96, 1.0),
    Color::new(1.0, 1.0, 1.0, 1.0),
];
const CONFETTI_GRAVITY: f32 = 240.0; // px/s^2

// Represents a single particle
#[derive(Debug, Clone)]
struct Particle {
    position: Vec2,
    prev_position: Vec2,
    velocity: Vec2,
    gravity: f32,
    color: Color,
    size: f32,
    lifetime: f32, // Time remaining in seconds
    initial_lifetime: f32,
}

impl Particle {
    fn new(position: Vec2, velocity: Vec2, color: Color, size: f32, lifetime: f32) -> Self {
        Particle {
            position,
            prev_position: position,
            velocity,
            gravity: 0.0,
            color,
            size,
            lifetime,
            initial_lifetime: lifetime,
        }
    }

    fn update(&mut self, dt: f32) {
        self.velocity.y += self.gravity * dt;
        self.position += self.velocity * dt;
        self.lifetime -= dt;

        let fade_factor = (self.lifetime / self.initial_lifetime).max(0.0);
        self.color.a = fade_factor;
    }

    fn is_alive(&self) -> bool {
        self.lifetime > 0.0
    }
}

// Hit sparks and the victory confetti
#[derive(Debug)]
pub struct ParticleSystem {
    particles: Vec<Particle>,
    rng: ThreadRng,
}

impl ParticleSystem {
    pub fn new() -> Self {
        ParticleSystem {
            particles: Vec::new(),
            rng: rand::thread_rng(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }

    /// Should be called BEFORE simulation updates for the step.
    pub fn update_prev_state(&mut self) {
        for p in self.particles.iter_mut() {
            p.prev_position = p.position;
        }
    }

    // Short radial burst where a hit connected
    pub fn spawn_hit_spark(&mut self, position: Vec2, base_color: Color, count: usize) {
        for _ in 0..count {
            let angle = self.rng.r#gen::<f32>() * std::f32::consts::TAU;
            let speed = 60.0 + self.rng.r#gen::<f32>() * 180.0;
            let velocity = Vec2::new(angle.cos() * speed, angle.sin() * speed);
            let lifetime = 0.2 + self.rng.r#gen::<f32>() * 0.2;
            self.particles
                .push(Particle::new(position, velocity, base_color, 3.0, lifetime));
        }
    }

    /// Upward cone of falling confetti, fired once when the player wins.
    pub fn spawn_confetti(&mut self, origin: Vec2, count: usize, spread_degrees: f32) {
        let spread = spread_degrees.to_radians();
        let up = -std::f32::consts::FRAC_PI_2;
        for i in 0..count {
            let angle = up + (self.rng.r#gen::<f32>() - 0.5) * spread;
            let speed = 250.0 + self.rng.r#gen::<f32>() * 250.0;
            let velocity = Vec2::new(angle.cos() * speed, angle.sin() * speed);
            let color = CONFETTI_COLORS[i % CONFETTI_COLORS.len()];
            let lifetime = 1.5 + self.rng.r#gen::<f32>() * 1.0;
            let mut particle = Particle::new(origin, velocity, color, 5.0, lifetime);
            particle.gravity = CONFETTI_GRAVITY;
            self.particles.push(particle);
        }
    }

    pub fn update(&mut self, dt: f32) {
        self.particles.retain_mut(|p| {
            p.update(dt);
            p.is_alive()
        });
    }

    // Draw all particles, interpolating between simulation steps
    pub fn draw(&self, origin: Vec2, alpha: f32) {
        for particle in &self.particles {
            let x = utils::lerp(particle.prev_position.x, particle.position.x, alpha);
            let y = utils::lerp(particle.prev_position.y, particle.position.y, alpha);
            let half = particle.size / 2.0;
            draw_rectangle(
                origin.x + x - half,
                origin.y + y - half,
                particle.size,
                particle.size,
                particle.color,
            );
        }
    }
}

impl Default for ParticleSystem {
    fn default() -> Self {
        Self::new()
    }
}
