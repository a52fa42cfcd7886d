use crate::config;
use crate::fighter::{Fighter, FighterState};
use crate::types::Side;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Start,
    Playing,
    GameOver,
}

/// Phase, countdown and result of the current round.
///
/// The one-second clock only ever touches `elapsed`/`pending_seconds`; the
/// simulation folds those into `timer` at the top of its next step.
#[derive(Debug, Clone)]
pub struct Round {
    pub phase: Phase,
    pub timer: u32,
    pub winner: Option<Side>,
    elapsed: f32,
    pending_seconds: u32,
}

impl Round {
    pub fn new() -> Self {
        Round {
            phase: Phase::Start,
            timer: config::ROUND_SECONDS,
            winner: None,
            elapsed: 0.0,
            pending_seconds: 0,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.phase == Phase::Playing
    }

    pub fn begin(&mut self) {
        self.phase = Phase::Playing;
        self.timer = config::ROUND_SECONDS;
        self.winner = None;
        self.elapsed = 0.0;
        self.pending_seconds = 0;
        crate::debug_round!("Round started, {} seconds on the clock", self.timer);
    }

    /// Wall-clock tick. Whole seconds are queued for the next simulation step.
    pub fn tick_clock(&mut self, dt: f32) {
        if !self.is_playing() {
            return;
        }
        self.elapsed += dt;
        while self.elapsed >= 1.0 {
            self.elapsed -= 1.0;
            self.pending_seconds += 1;
        }
    }

    /// Applies queued seconds to the countdown, floored at zero.
    pub fn merge_clock(&mut self) {
        if self.pending_seconds == 0 {
            return;
        }
        if self.is_playing() {
            self.timer = self.timer.saturating_sub(self.pending_seconds);
            crate::debug_round!("Timer {}", self.timer);
        }
        self.pending_seconds = 0;
    }

    /// Decides the round from the state after this frame's movement and combat.
    ///
    /// KO on the player is checked first. On time-out the player must have
    /// strictly more hp; an even split goes to the CPU.
    pub fn check_winner(&self, player: &Fighter, cpu: &Fighter) -> Option<Side> {
        if !self.is_playing() {
            return None;
        }
        if player.hp <= 0 {
            Some(Side::Cpu)
        } else if cpu.hp <= 0 {
            Some(Side::Player)
        } else if self.timer == 0 {
            if player.hp > cpu.hp {
                Some(Side::Player)
            } else {
                Some(Side::Cpu)
            }
        } else {
            None
        }
    }

    /// Ends the round and poses both fighters.
    pub fn finish(&mut self, winner: Side, player: &mut Fighter, cpu: &mut Fighter) {
        self.phase = Phase::GameOver;
        self.winner = Some(winner);
        let (won, lost) = match winner {
            Side::Player => (player, cpu),
            Side::Cpu => (cpu, player),
        };
        won.state = FighterState::Win;
        lost.state = FighterState::Dead;
        log::info!(
            "Round over: {} wins ({} hp vs {} hp, {}s left)",
            winner.label(),
            won.hp,
            lost.hp,
            self.timer
        );
    }
}

impl Default for Round {
    fn default() -> Self {
        Self::new()
    }
}
