use crate::arena::{Arena, fit_viewport};
use crate::combat::{self, HitEvent, HitKind};
use crate::config;
use crate::cpu;
use crate::error::GameError;
use crate::fighter::Fighter;
use crate::input::{Button, FrameInput, InputState, VirtualControls, poll_frame_input};
use crate::particles::ParticleSystem;
use crate::render::{Renderer, Scene};
use crate::round::{Phase, Round};
use crate::score::{ScoreRecord, ScoreSink, submit_quietly};
use crate::types::*;
use log::{info, warn};
use macroquad::prelude::{Color, Vec2, get_frame_time, next_frame, screen_height, screen_width};
use rand::SeedableRng;
use rand::rngs::StdRng;

const SPARK_MELEE: Color = Color::new(1.0, 0.85, 0.3, 1.0);
const SPARK_PROJECTILE: Color = Color::new(0.4, 0.65, 1.0, 1.0);
const MAX_FRAME_TIME: f32 = 0.25; // Longer stalls are not replayed step by step

/// The Game struct owns every piece of simulation state.
///
/// All mutation funnels through `update_simulation`; the one-second clock only
/// queues seconds on `round`, which the next step merges.
pub struct Game {
    pub arena: Arena,
    pub player: Fighter,
    pub cpu: Fighter,
    pub input: InputState,
    pub round: Round,
    pub particle_system: ParticleSystem,
    pub controls: VirtualControls,
    rng: StdRng,
    score_sink: Box<dyn ScoreSink>,
    player_name: String,
    pointer_held: InputState,
    time_accumulator: f32,
    step_duration: f32,
}

impl Game {
    /// Create a game sized for the given window, waiting on the START screen.
    pub fn new(
        window_width: f32,
        window_height: f32,
        seed: Option<u64>,
        player_name: String,
        score_sink: Box<dyn ScoreSink>,
    ) -> Result<Self, GameError> {
        let (width, height) = fit_viewport(window_width, window_height)?;
        let arena = Arena::new(width, height);
        info!("Stage {}x{}, ground at y={}", width, height, arena.ground_y);

        let player = Fighter::new(
            Side::Player,
            arena.start_mark(config::INITIAL_PLAYER_X),
            Facing::Right,
        );
        let cpu = Fighter::new(Side::Cpu, arena.cpu_start(), Facing::Left);

        let rng = match seed {
            Some(seed) => {
                info!("CPU seeded with {}", seed);
                StdRng::seed_from_u64(seed)
            }
            None => StdRng::from_entropy(),
        };

        Ok(Game {
            controls: VirtualControls::layout(width, height),
            arena,
            player,
            cpu,
            input: InputState::new(),
            round: Round::new(),
            particle_system: ParticleSystem::new(),
            rng,
            score_sink,
            player_name,
            pointer_held: InputState::new(),
            time_accumulator: 0.0,
            step_duration: 1.0 / config::FRAME_RATE as f32,
        })
    }

    /// Starts (or restarts) a round from a clean slate.
    pub fn restart(&mut self) {
        let player_start = self.arena.player_start();
        let cpu_start = self.arena.cpu_start();
        self.player.reset(player_start, Facing::Right);
        self.cpu.reset(cpu_start, Facing::Left);
        self.arena.clear_projectiles();
        self.input.clear();
        self.pointer_held.clear();
        self.particle_system.clear();
        self.time_accumulator = 0.0;
        self.round.begin();
        info!("FIGHT!");
    }

    /// Refits the stage to a new window size and puts both fighters back on their marks.
    ///
    /// Returns `Ok(false)` when the capped viewport did not change.
    pub fn resize(&mut self, window_width: f32, window_height: f32) -> Result<bool, GameError> {
        let (width, height) = fit_viewport(window_width, window_height)?;
        if width == self.arena.width && height == self.arena.height {
            return Ok(false);
        }
        self.arena.resize(width, height);
        self.controls = VirtualControls::layout(width, height);

        self.player.position = self.arena.player_start();
        self.cpu.position = self.arena.cpu_start();
        self.player.vy = 0.0;
        self.cpu.vy = 0.0;
        self.player.update_prev_state();
        self.cpu.update_prev_state();
        info!("Stage resized to {}x{}", width, height);
        Ok(true)
    }

    /// Applies one rendered frame's worth of input events.
    pub fn handle_input(&mut self, frame: &FrameInput) {
        for &(button, pressed) in &frame.key_events {
            self.input.set(button, pressed);
        }

        // On-screen buttons behave like keys: only edges are written
        let held = if self.round.is_playing() {
            self.controls.held(&frame.pointers)
        } else {
            InputState::new()
        };
        for button in Button::ALL {
            let now = held.get(button);
            if now != self.pointer_held.get(button) {
                self.input.set(button, now);
            }
        }
        self.pointer_held = held;

        if frame.confirm && !self.round.is_playing() {
            self.restart();
        }
    }

    /// Player score plus the completion bonus, as shown on the win screen.
    pub fn final_score(&self) -> u32 {
        self.player.score + config::COMPLETION_BONUS
    }

    pub fn fighter(&self, side: Side) -> &Fighter {
        match side {
            Side::Player => &self.player,
            Side::Cpu => &self.cpu,
        }
    }

    /// Advances the simulation by one fixed step.
    ///
    /// Returns the hits confirmed during the step, in resolution order.
    pub fn update_simulation(&mut self) -> Vec<HitEvent> {
        self.round.merge_clock();
        self.particle_system.update_prev_state();

        let mut hits = Vec::new();
        if self.round.is_playing() {
            self.player.update_prev_state();
            self.cpu.update_prev_state();

            let mut commands: Vec<ArenaCommand> = Vec::new();

            // Phase 1: movement, player first
            let cpu_x = self.cpu.position.x;
            self.player
                .step(&mut self.input, cpu_x, &self.arena, &mut commands);

            let mut cpu_input = cpu::decide(&self.cpu, &self.player, &mut self.rng);
            let player_x = self.player.position.x;
            self.cpu
                .step(&mut cpu_input, player_x, &self.arena, &mut commands);

            // Phase 2: projectiles
            for command in commands.drain(..) {
                self.arena.apply_command(command);
            }
            self.arena.update_projectiles();

            // Phase 3: combat
            hits.extend(combat::resolve_melee_exchange(&mut self.player, &mut self.cpu));
            hits.extend(combat::resolve_projectiles(
                &mut self.arena,
                &mut self.player,
                &mut self.cpu,
            ));
            for hit in &hits {
                self.report_hit(hit);
            }

            // Phase 4: round
            if let Some(winner) = self.round.check_winner(&self.player, &self.cpu) {
                self.end_round(winner);
            }
        }

        self.particle_system.update(self.step_duration);
        hits
    }

    fn report_hit(&mut self, hit: &HitEvent) {
        info!(
            "{} hit {} with {:?} for {} ({} hp left)",
            hit.attacker.label(),
            hit.victim.label(),
            hit.kind,
            hit.damage,
            self.fighter(hit.victim).hp
        );
        let color = match hit.kind {
            HitKind::Melee => SPARK_MELEE,
            HitKind::Projectile => SPARK_PROJECTILE,
        };
        self.particle_system
            .spawn_hit_spark(Vec2::new(hit.position.x, hit.position.y), color, 12);
    }

    fn end_round(&mut self, winner: Side) {
        self.round.finish(winner, &mut self.player, &mut self.cpu);
        if winner == Side::Player {
            let origin = Vec2::new(self.arena.width / 2.0, self.arena.height * 0.6);
            self.particle_system.spawn_confetti(origin, 100, 60.0);
            let record = ScoreRecord {
                name: self.player_name.clone(),
                score: self.final_score(),
            };
            submit_quietly(self.score_sink.as_mut(), record);
        }
    }

    /// Run the main game loop using the provided renderer
    pub async fn run(&mut self, renderer: &mut Renderer) -> Result<(), GameError> {
        info!("Starting main loop...");
        let mut window = (screen_width(), screen_height());
        if let Err(e) = self.resize(window.0, window.1) {
            warn!("{}", e);
        }

        while !Renderer::window_should_close() {
            let current = (screen_width(), screen_height());
            if current != window {
                window = current;
                if let Err(e) = self.resize(current.0, current.1) {
                    warn!("{}; keeping the previous stage size", e);
                }
            }
            let origin = Vec2::new(
                ((window.0 - self.arena.width) / 2.0).max(0.0),
                ((window.1 - self.arena.height) / 2.0).max(0.0),
            );

            let mut frame = poll_frame_input();
            for p in frame.pointers.iter_mut() {
                p.x -= origin.x;
                p.y -= origin.y;
            }
            self.handle_input(&frame);

            // Time accumulation; the countdown runs on wall time, not steps
            let frame_time = get_frame_time();
            self.round.tick_clock(frame_time);
            self.time_accumulator += frame_time.min(MAX_FRAME_TIME);

            while self.time_accumulator >= self.step_duration {
                self.time_accumulator -= self.step_duration;
                let hits = self.update_simulation();
                if !hits.is_empty() {
                    crate::debug_round!("{} hit(s) this step", hits.len());
                }
            }

            let alpha = (self.time_accumulator / self.step_duration).clamp(0.0, 1.0);
            renderer.draw_frame(&self.scene(alpha), origin);
            next_frame().await;
        }

        info!("Exiting Street Canvas.");
        Ok(())
    }

    /// Read-only view handed to the renderer.
    pub fn scene(&self, alpha: f32) -> Scene<'_> {
        Scene {
            arena: &self.arena,
            player: &self.player,
            cpu: &self.cpu,
            round: &self.round,
            particles: &self.particle_system,
            controls: &self.controls,
            final_score: self.final_score(),
            alpha,
        }
    }

    pub fn phase(&self) -> Phase {
        self.round.phase
    }
}
