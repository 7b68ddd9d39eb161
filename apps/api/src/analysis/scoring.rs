//! Résumé quality score.
//!
//! score = clamp(min(30 + 3 × skills, 70) + level bonus + jitter, 0, 100), jitter ∈ [-5, 5].
//! The jitter comes from an injectable `ScoreJitter` so tests can pin it.

use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::analysis::experience::ExperienceLevel;

pub const BASE_SCORE: i32 = 30;
pub const POINTS_PER_SKILL: i32 = 3;
pub const SKILL_SCORE_CAP: i32 = 70;
pub const MAX_JITTER: i32 = 5;
pub const MATCH_CONFIDENCE_CAP: u8 = 95;

/// Source of the symmetric score jitter. Shared across requests, hence `&self`.
pub trait ScoreJitter: Send + Sync {
    /// A value in `[-MAX_JITTER, MAX_JITTER]`; anything outside is clamped by the scorer.
    fn sample(&self) -> i32;
}

/// Production jitter from the thread-local RNG.
pub struct ThreadRngJitter;

impl ScoreJitter for ThreadRngJitter {
    fn sample(&self) -> i32 {
        rand::thread_rng().gen_range(-MAX_JITTER..=MAX_JITTER)
    }
}

/// Reproducible jitter sequence from a fixed seed.
pub struct SeededJitter(Mutex<StdRng>);

impl SeededJitter {
    pub fn new(seed: u64) -> Self {
        Self(Mutex::new(StdRng::seed_from_u64(seed)))
    }
}

impl ScoreJitter for SeededJitter {
    fn sample(&self) -> i32 {
        match self.0.lock() {
            Ok(mut rng) => rng.gen_range(-MAX_JITTER..=MAX_JITTER),
            Err(poisoned) => poisoned
                .into_inner()
                .gen_range(-MAX_JITTER..=MAX_JITTER),
        }
    }
}

/// Always the same jitter.
#[cfg(test)]
pub struct FixedJitter(pub i32);

#[cfg(test)]
impl ScoreJitter for FixedJitter {
    fn sample(&self) -> i32 {
        self.0
    }
}

/// Deterministic part of the score: skill contribution plus level bonus.
pub fn base_score(skill_count: usize, level: ExperienceLevel) -> i32 {
    let skill_points = i32::try_from(skill_count)
        .unwrap_or(i32::MAX)
        .saturating_mul(POINTS_PER_SKILL)
        .saturating_add(BASE_SCORE)
        .min(SKILL_SCORE_CAP);
    skill_points + level.score_bonus()
}

pub fn calculate_score(skill_count: usize, level: ExperienceLevel, jitter: i32) -> u8 {
    let jitter = jitter.clamp(-MAX_JITTER, MAX_JITTER);
    (base_score(skill_count, level) + jitter).clamp(0, 100) as u8
}

/// Never above 95; reachable scores top out at 90, so this is always ≥ score.
pub fn match_confidence(score: u8) -> u8 {
    score.saturating_add(5).min(MATCH_CONFIDENCE_CAP)
}
