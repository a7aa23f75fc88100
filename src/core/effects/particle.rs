//=========================================================================
// Particle System
//=========================================================================
//
// Emitters spawn short-lived particles; particles integrate their
// velocity every update and are culled once their lifetime runs out.
//
// Flow:
//   update(dt) → emit() → integrate + age → cull dead → drop spent emitters
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::Duration;

use log::warn;

//=== Internal Dependencies ===============================================

use crate::core::geometry::{Color, Position2D, Rect2D};
use crate::core::services::VideoService;

//=== Constants ===========================================================

const DEFAULT_MAX_PARTICLES: usize = 1024;

//=== Particle ============================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub position: Position2D,
    /// Pixels per second.
    pub velocity: Position2D,
    pub size: f32,
    pub color: Color,
    pub lifetime: Duration,
    pub age: Duration,
}

impl Particle {
    pub fn is_alive(&self) -> bool {
        self.age < self.lifetime
    }

    /// Color with alpha scaled by the remaining share of the lifetime.
    pub fn current_color(&self) -> Color {
        if self.lifetime.is_zero() {
            return self.color.with_alpha(0.0);
        }
        let remaining = 1.0 - (self.age.as_secs_f32() / self.lifetime.as_secs_f32()).min(1.0);
        self.color.with_alpha(self.color.a * remaining)
    }

    fn integrate(&mut self, elapsed: Duration) {
        let secs = elapsed.as_secs_f32();
        self.position.x += self.velocity.x * secs;
        self.position.y += self.velocity.y * secs;
        self.age += elapsed;
    }
}

//=== Emitter =============================================================

/// Spawns particles at a fixed rate around `origin`.
///
/// Spawned velocities fan out across `spread` in a fixed five-step
/// pattern so emission stays deterministic.
#[derive(Debug, Clone, PartialEq)]
pub struct Emitter {
    pub origin: Position2D,
    pub velocity: Position2D,
    pub spread: Position2D,
    /// Particles per second.
    pub rate: f32,
    pub particle_lifetime: Duration,
    pub particle_size: f32,
    pub color: Color,
    /// `None` emits until the owning system is cleared.
    pub remaining: Option<Duration>,
    carry: f32,
    spawned: u32,
}

impl Emitter {
    pub fn new(origin: Position2D, rate: f32, particle_lifetime: Duration) -> Self {
        Self {
            origin,
            velocity: Position2D::default(),
            spread: Position2D::default(),
            rate,
            particle_lifetime,
            particle_size: 2.0,
            color: Color::WHITE,
            remaining: None,
            carry: 0.0,
            spawned: 0,
        }
    }

    pub fn with_velocity(mut self, velocity: Position2D, spread: Position2D) -> Self {
        self.velocity = velocity;
        self.spread = spread;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_size(mut self, size: f32) -> Self {
        self.particle_size = size;
        self
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.remaining = Some(duration);
        self
    }

    pub fn is_spent(&self) -> bool {
        matches!(self.remaining, Some(remaining) if remaining.is_zero())
    }

    fn emit(&mut self, elapsed: Duration, out: &mut Vec<Particle>, capacity: usize) {
        let active = match self.remaining {
            Some(remaining) => elapsed.min(remaining),
            None => elapsed,
        };
        if let Some(remaining) = self.remaining.as_mut() {
            *remaining = remaining.saturating_sub(elapsed);
        }

        self.carry += self.rate * active.as_secs_f32();
        while self.carry >= 1.0 {
            self.carry -= 1.0;
            if out.len() >= capacity {
                continue;
            }

            let step = (self.spawned % 5) as f32 / 2.0 - 1.0;
            self.spawned = self.spawned.wrapping_add(1);
            out.push(Particle {
                position: self.origin,
                velocity: Position2D::new(
                    self.velocity.x + self.spread.x * step,
                    self.velocity.y + self.spread.y * step,
                ),
                size: self.particle_size,
                color: self.color,
                lifetime: self.particle_lifetime,
                age: Duration::ZERO,
            });
        }
    }
}

//=== ParticleSystem ======================================================

#[derive(Debug)]
pub struct ParticleSystem {
    emitters: Vec<Emitter>,
    particles: Vec<Particle>,
    max_particles: usize,
}

impl ParticleSystem {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_MAX_PARTICLES)
    }

    pub fn with_capacity(max_particles: usize) -> Self {
        Self {
            emitters: Vec::new(),
            particles: Vec::with_capacity(max_particles.min(DEFAULT_MAX_PARTICLES)),
            max_particles,
        }
    }

    //--- Spawning ---------------------------------------------------------

    pub fn add_emitter(&mut self, emitter: Emitter) {
        self.emitters.push(emitter);
    }

    /// Adds one particle directly. Returns false when the system is full.
    pub fn spawn(&mut self, particle: Particle) -> bool {
        if self.particles.len() >= self.max_particles {
            warn!(target: "effects", "Particle cap of {} reached, particle dropped", self.max_particles);
            return false;
        }
        self.particles.push(particle);
        true
    }

    //--- Update Loop ------------------------------------------------------

    pub fn update(&mut self, elapsed: Duration) {
        for particle in &mut self.particles {
            particle.integrate(elapsed);
        }
        self.particles.retain(Particle::is_alive);

        for emitter in &mut self.emitters {
            emitter.emit(elapsed, &mut self.particles, self.max_particles);
        }
        self.emitters.retain(|emitter| !emitter.is_spent());
    }

    /// Draws each particle as a square centered on its position.
    pub fn draw(&self, video: &mut dyn VideoService) {
        for particle in &self.particles {
            let half = particle.size / 2.0;
            let rect = Rect2D::new(
                particle.position.x - half,
                particle.position.x + half,
                particle.position.y - half,
                particle.position.y + half,
            );
            video.draw_rect(rect, particle.current_color());
        }
    }

    //--- Queries ----------------------------------------------------------

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    pub fn emitter_count(&self) -> usize {
        self.emitters.len()
    }

    pub fn clear(&mut self) {
        self.emitters.clear();
        self.particles.clear();
    }
}

impl Default for ParticleSystem {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
