//! Decorative effects driven by wall-clock time rather than scroll.
//!
//! These are the one exemption from "state is a function of progress": a
//! section starts its effects on mount, ticks them from an interval, and
//! tears the scheduler down on cleanup. Times are milliseconds.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{easing::Ease, props::lerp};

pub type TaskId = u64;

/// Slow zoom in and back out, repeating forever.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KenBurns {
    pub low: f64,
    pub high: f64,
    pub period_ms: f64,
    pub ease: Ease,
}

impl Default for KenBurns {
    fn default() -> Self {
        Self {
            low: 1.05,
            high: 1.15,
            period_ms: 24_000.0,
            ease: Ease::SineInOut,
        }
    }
}

impl KenBurns {
    /// Scale `elapsed` ms into the loop: keyframes `[low, high, low]`, each
    /// half eased separately.
    pub fn scale_at(&self, elapsed: f64) -> f64 {
        if self.period_ms <= 0.0 {
            return self.low;
        }
        let phase = elapsed.max(0.0).rem_euclid(self.period_ms) / self.period_ms;
        if phase < 0.5 {
            lerp(self.low, self.high, self.ease.apply(phase * 2.0))
        } else {
            lerp(self.high, self.low, self.ease.apply((phase - 0.5) * 2.0))
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticleConfig {
    pub burst: usize,
    pub burst_spacing_ms: f64,
    pub interval_ms: f64,
    pub min_life_ms: f64,
    pub max_life_ms: f64,
    /// Distance past the top of the section a particle travels, in pixels.
    pub overshoot: f64,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            burst: 25,
            burst_spacing_ms: 300.0,
            interval_ms: 1500.0,
            min_life_ms: 15_000.0,
            max_life_ms: 30_000.0,
            overshoot: 120.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Particle {
    id: u64,
    left: f64,
    born: f64,
    life: f64,
}

/// Where one particle is right now.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParticleSample {
    pub id: u64,
    /// Horizontal position, percent of the section width.
    pub left: f64,
    /// 0 at spawn, 1 when the particle leaves.
    pub progress: f64,
}

impl ParticleSample {
    /// Inline style for a particle rising through a section `height` px tall.
    pub fn to_css(&self, height: f64, overshoot: f64) -> String {
        format!(
            "left:{:.3}%;top:{:.1}px;opacity:{:.3};transform:translateY({:.1}px);",
            self.left,
            height + 10.0,
            self.progress,
            -(height + overshoot) * self.progress
        )
    }
}

/// Particles rising through a section: an initial burst, then a steady
/// trickle. Each particle fades in as it rises and is dropped when its life
/// runs out.
pub struct ParticleField {
    config: ParticleConfig,
    random: Box<dyn FnMut() -> f64>,
    particles: Vec<Particle>,
    burst_spawned: usize,
    next_interval: f64,
    next_id: u64,
}

impl fmt::Debug for ParticleField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParticleField")
            .field("config", &self.config)
            .field("particles", &self.particles.len())
            .finish()
    }
}

impl ParticleField {
    /// `random` must return values in [0, 1).
    pub fn new(config: ParticleConfig, random: impl FnMut() -> f64 + 'static) -> Self {
        Self {
            next_interval: config.interval_ms,
            config,
            random: Box::new(random),
            particles: Vec::new(),
            burst_spawned: 0,
            next_id: 0,
        }
    }

    pub fn config(&self) -> &ParticleConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    fn spawn(&mut self, born: f64) {
        let left = (self.random)().clamp(0.0, 1.0) * 100.0;
        let span = (self.config.max_life_ms - self.config.min_life_ms).max(0.0);
        let life = self.config.min_life_ms + (self.random)().clamp(0.0, 1.0) * span;
        self.particles.push(Particle {
            id: self.next_id,
            left,
            born,
            life,
        });
        self.next_id += 1;
    }

    /// Catch up on spawns due by `elapsed`, prune expired particles and
    /// sample the survivors.
    pub fn advance(&mut self, elapsed: f64) -> Vec<ParticleSample> {
        while self.burst_spawned < self.config.burst {
            let due = self.burst_spawned as f64 * self.config.burst_spacing_ms;
            if due > elapsed {
                break;
            }
            self.spawn(due);
            self.burst_spawned += 1;
        }
        if self.config.interval_ms > 0.0 {
            while self.next_interval <= elapsed {
                self.spawn(self.next_interval);
                self.next_interval += self.config.interval_ms;
            }
        }

        self.particles.retain(|p| elapsed - p.born < p.life);
        self.particles
            .iter()
            .map(|p| ParticleSample {
                id: p.id,
                left: p.left,
                progress: ((elapsed - p.born) / p.life).clamp(0.0, 1.0),
            })
            .collect()
    }
}

pub enum AmbientEffect {
    KenBurns(KenBurns),
    Particles(ParticleField),
}

impl From<KenBurns> for AmbientEffect {
    fn from(effect: KenBurns) -> Self {
        AmbientEffect::KenBurns(effect)
    }
}

impl From<ParticleField> for AmbientEffect {
    fn from(effect: ParticleField) -> Self {
        AmbientEffect::Particles(effect)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AmbientUpdate {
    Scale { task: TaskId, scale: f64 },
    Particles { task: TaskId, particles: Vec<ParticleSample> },
}

struct Task {
    id: TaskId,
    started: f64,
    effect: AmbientEffect,
}

/// The ambient effects owned by one section.
#[derive(Default)]
pub struct AmbientScheduler {
    tasks: Vec<Task>,
    next_id: TaskId,
    torn_down: bool,
}

impl fmt::Debug for AmbientScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AmbientScheduler")
            .field("tasks", &self.tasks.len())
            .field("torn_down", &self.torn_down)
            .finish()
    }
}

impl AmbientScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self, effect: impl Into<AmbientEffect>, now: f64) -> TaskId {
        let id = self.next_id;
        self.next_id += 1;
        if self.torn_down {
            log::debug!("ambient task {id} started after teardown; ignoring");
            return id;
        }
        self.tasks.push(Task {
            id,
            started: now,
            effect: effect.into(),
        });
        id
    }

    pub fn stop(&mut self, id: TaskId) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        before != self.tasks.len()
    }

    /// Cancel everything. Later ticks and starts are no-ops.
    pub fn teardown(&mut self) {
        if !self.tasks.is_empty() {
            log::debug!("tearing down {} ambient tasks", self.tasks.len());
        }
        self.tasks.clear();
        self.torn_down = true;
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn tick(&mut self, now: f64) -> Vec<AmbientUpdate> {
        if self.torn_down {
            return Vec::new();
        }
        self.tasks
            .iter_mut()
            .map(|task| {
                let elapsed = now - task.started;
                match &mut task.effect {
                    AmbientEffect::KenBurns(kb) => AmbientUpdate::Scale {
                        task: task.id,
                        scale: kb.scale_at(elapsed),
                    },
                    AmbientEffect::Particles(field) => AmbientUpdate::Particles {
                        task: task.id,
                        particles: field.advance(elapsed),
                    },
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed(value: f64) -> impl FnMut() -> f64 {
        move || value
    }

    #[test]
    fn test_ken_burns_keyframes() {
        let kb = KenBurns::default();
        assert_eq!(kb.scale_at(0.0), 1.05);
        assert!((kb.scale_at(12_000.0) - 1.15).abs() < 1e-9);
        assert!((kb.scale_at(24_000.0) - 1.05).abs() < 1e-9);
        assert!((kb.scale_at(6_000.0) - 1.10).abs() < 1e-9);
        // repeats
        assert!((kb.scale_at(30_000.0) - kb.scale_at(6_000.0)).abs() < 1e-9);
        for step in 0..=48 {
            let s = kb.scale_at(step as f64 * 500.0);
            assert!((1.05 - 1e-9..=1.15 + 1e-9).contains(&s));
        }
    }

    #[test]
    fn test_particle_burst_then_trickle() {
        let mut field = ParticleField::new(ParticleConfig::default(), fixed(0.5));
        assert_eq!(field.advance(0.0).len(), 1);
        assert_eq!(field.advance(1000.0).len(), 4);
        // burst of 25 done at 7200ms, plus interval spawns at 1500..=7500
        let at = field.advance(7500.0);
        assert_eq!(at.len(), 25 + 5);
        assert!(at.iter().all(|p| p.left == 50.0));
    }

    #[test]
    fn test_particles_expire() {
        let config = ParticleConfig {
            burst: 1,
            interval_ms: 0.0,
            ..Default::default()
        };
        // life = 15s + 0.0 * 15s
        let mut field = ParticleField::new(config, fixed(0.0));
        let first = field.advance(0.0);
        assert_eq!(first[0].progress, 0.0);
        let mid = field.advance(7_500.0);
        assert!((mid[0].progress - 0.5).abs() < 1e-9);
        assert!(field.advance(15_000.0).is_empty());
        assert!(field.is_empty());
    }

    #[test]
    fn test_particle_css() {
        let sample = ParticleSample {
            id: 0,
            left: 25.0,
            progress: 0.5,
        };
        assert_eq!(
            sample.to_css(400.0, 120.0),
            "left:25.000%;top:410.0px;opacity:0.500;transform:translateY(-260.0px);"
        );
    }

    #[test]
    fn test_scheduler_ticks_each_task() {
        let mut scheduler = AmbientScheduler::new();
        let kb = scheduler.start(KenBurns::default(), 1_000.0);
        let particles = scheduler.start(
            ParticleField::new(ParticleConfig::default(), fixed(0.3)),
            1_000.0,
        );
        let updates = scheduler.tick(13_000.0);
        assert_eq!(updates.len(), 2);
        assert!(matches!(
            updates[0],
            AmbientUpdate::Scale { task, scale } if task == kb && (scale - 1.15).abs() < 1e-9
        ));
        assert!(matches!(
            &updates[1],
            AmbientUpdate::Particles { task, particles: p } if *task == particles && !p.is_empty()
        ));

        assert!(scheduler.stop(kb));
        assert!(!scheduler.stop(kb));
        assert_eq!(scheduler.tick(14_000.0).len(), 1);
    }

    #[test]
    fn test_no_updates_after_teardown() {
        let mut scheduler = AmbientScheduler::new();
        scheduler.start(KenBurns::default(), 0.0);
        scheduler.start(
            ParticleField::new(ParticleConfig::default(), fixed(0.9)),
            0.0,
        );
        assert_eq!(scheduler.tick(100.0).len(), 2);

        scheduler.teardown();
        assert!(scheduler.is_empty());
        assert!(scheduler.tick(200.0).is_empty());

        scheduler.start(KenBurns::default(), 300.0);
        assert!(scheduler.tick(400.0).is_empty());
        assert!(scheduler.is_torn_down());
    }
}
