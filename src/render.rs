use crate::arena::Arena;
use crate::config::{ATTACK_BOX_HEIGHT, ATTACK_BOX_WIDTH, PROJECTILE_RADIUS};
use crate::fighter::{Fighter, FighterState};
use crate::input::VirtualControls;
use crate::particles::ParticleSystem;
use crate::round::{Phase, Round};
use crate::types::*;
use crate::utils;
use macroquad::prelude::*;

// Palette
const SKY_TOP: u32 = 0x3b82f6;
const SKY_HORIZON: u32 = 0x93c5fd;
const WATER_TOP: u32 = 0x1e3a8a;
const WATER_DEEP: u32 = 0x172554;
const DOCK: u32 = 0x57534e;
const BOLLARD: u32 = 0xd1d5db;
const PANTS: u32 = 0x1f2937;
const SKIN: u32 = 0xfdba74;
const PLAYER_GI: u32 = 0x22c55e;
const CPU_GI: u32 = 0xef4444;
const KO_GI: u32 = 0x333333;
const ENERGY: u32 = 0x3b82f6;
const TIMER_YELLOW: u32 = 0xfacc15;

const HORIZON: f32 = 0.6; // Fraction of the canvas height where water starts
const SKY_BANDS: usize = 12;
const HIT_FLASH_PERIOD: f64 = 0.05;

fn hex(rgb: u32) -> Color {
    Color::from_hex(rgb)
}

fn faded_color(mut color: Color, alpha: f32) -> Color {
    color.a *= alpha;
    color
}

fn mix(a: Color, b: Color, t: f32) -> Color {
    Color::new(
        utils::lerp(a.r, b.r, t),
        utils::lerp(a.g, b.g, t),
        utils::lerp(a.b, b.b, t),
        utils::lerp(a.a, b.a, t),
    )
}

// Helper function to calculate health bar gradient color
fn get_health_gradient_color(ratio: f32) -> Color {
    if ratio > 0.5 {
        let t = (ratio - 0.5) * 2.0;
        Color::new(1.0 - t, 1.0, 0.0, 1.0) // Green to yellow
    } else {
        let t = ratio * 2.0;
        Color::new(1.0, t, 0.0, 1.0) // Yellow to red
    }
}

/// Everything the renderer may look at for one frame. Read-only.
pub struct Scene<'a> {
    pub arena: &'a Arena,
    pub player: &'a Fighter,
    pub cpu: &'a Fighter,
    pub round: &'a Round,
    pub particles: &'a ParticleSystem,
    pub controls: &'a VirtualControls,
    pub final_score: u32,
    pub alpha: f32, // Interpolation factor between the last two simulation steps
}

// Handles rendering the simulation state using macroquad
pub struct Renderer {
    origin: Vec2, // Top-left of the canvas inside the window
}

impl Renderer {
    pub fn new() -> Self {
        Renderer { origin: Vec2::ZERO }
    }

    fn rect(&self, x: f32, y: f32, w: f32, h: f32, color: Color) {
        draw_rectangle(self.origin.x + x, self.origin.y + y, w, h, color);
    }

    fn text(&self, text: &str, x: f32, y: f32, size: f32, color: Color) {
        draw_text(text, self.origin.x + x, self.origin.y + y, size, color);
    }

    fn centered_text(&self, text: &str, center_x: f32, y: f32, size: f32, color: Color) {
        let dims = measure_text(text, None, size as u16, 1.0);
        self.text(text, center_x - dims.width / 2.0, y, size, color);
    }

    pub fn draw_frame(&mut self, scene: &Scene, origin: Vec2) {
        self.origin = origin;
        clear_background(BLACK);

        let arena = scene.arena;
        self.draw_background(arena);
        self.draw_fighter(scene.player, scene.alpha);
        self.draw_fighter(scene.cpu, scene.alpha);
        self.draw_projectiles(arena, scene.alpha);

        if !scene.particles.is_empty() {
            scene.particles.draw(self.origin, scene.alpha);
        }

        self.draw_hud(scene);

        match scene.round.phase {
            Phase::Start => self.draw_start_screen(arena),
            Phase::Playing => self.draw_controls(scene.controls),
            Phase::GameOver => self.draw_game_over(scene),
        }
    }

    fn draw_background(&self, arena: &Arena) {
        let horizon = arena.height * HORIZON;
        let band = horizon / SKY_BANDS as f32;
        for i in 0..SKY_BANDS {
            let t = i as f32 / (SKY_BANDS - 1) as f32;
            self.rect(0.0, i as f32 * band, arena.width, band + 1.0, mix(hex(SKY_TOP), hex(SKY_HORIZON), t));
        }
        let water_h = arena.height - horizon;
        self.rect(0.0, horizon, arena.width, water_h / 2.0, hex(WATER_TOP));
        self.rect(0.0, horizon + water_h / 2.0, arena.width, water_h / 2.0, hex(WATER_DEEP));

        // Dock floor under the fighters' feet
        let floor_y = arena.ground_y + crate::config::FIGHTER_HEIGHT;
        self.rect(0.0, floor_y, arena.width, (arena.height - floor_y).max(0.0), hex(DOCK));

        let spacing = arena.width / 6.0;
        let mut x = 30.0;
        while x < arena.width {
            self.rect(x, arena.ground_y + 40.0, 15.0, 20.0, hex(BOLLARD));
            x += spacing;
        }
    }

    // Part of a sprite in fighter-local space: origin at the feet, +x toward the facing side
    fn part(&self, feet: Vec2, facing: Facing, lx: f32, ly: f32, w: f32, h: f32, color: Color) {
        let x = match facing {
            Facing::Right => feet.x + lx,
            Facing::Left => feet.x - lx - w,
        };
        self.rect(x, feet.y + ly, w, h, color);
    }

    fn draw_fighter(&self, fighter: &Fighter, alpha: f32) {
        let pos = utils::lerp_point(fighter.prev_position, fighter.position, alpha);
        let feet = vec2(pos.x + fighter.width / 2.0, pos.y + fighter.height);
        let facing = fighter.facing;

        let blink = fighter.state == FighterState::Hit
            && ((get_time() / HIT_FLASH_PERIOD) as i64) % 2 == 0;
        let fade = if blink { 0.5 } else { 1.0 };
        let c = |rgb: u32| faded_color(hex(rgb), fade);

        let gi = match (fighter.state, fighter.side) {
            (FighterState::Dead, _) => KO_GI,
            (_, Side::Player) => PLAYER_GI,
            (_, Side::Cpu) => CPU_GI,
        };

        // Legs
        match fighter.state {
            FighterState::Jump => {
                self.part(feet, facing, -12.0, -35.0, 8.0, 35.0, c(PANTS));
                self.part(feet, facing, 4.0, -25.0, 8.0, 25.0, c(PANTS));
            }
            FighterState::Walk => {
                let stride = ((get_time() * 10.0).sin() * 8.0) as f32;
                self.part(feet, facing, -12.0 - stride, -35.0, 8.0, 35.0, c(PANTS));
                self.part(feet, facing, 4.0 + stride, -35.0, 8.0, 35.0, c(PANTS));
            }
            FighterState::AttackKick => {
                self.part(feet, facing, -12.0, -35.0, 8.0, 35.0, c(PANTS));
                self.part(feet, facing, 4.0, -50.0, 30.0, 8.0, c(SKIN));
            }
            FighterState::Dead => {}
            _ => {
                self.part(feet, facing, -12.0, -35.0, 8.0, 35.0, c(PANTS));
                self.part(feet, facing, 4.0, -35.0, 8.0, 35.0, c(PANTS));
            }
        }

        if fighter.state == FighterState::Dead {
            // Lying flat
            self.part(feet, facing, -30.0, -8.0, 60.0, 15.0, c(gi));
            return;
        }

        // Torso, arms
        self.part(feet, facing, -16.0, -65.0, 32.0, 35.0, c(gi));
        if fighter.state == FighterState::AttackPunch {
            self.part(feet, facing, 8.0, -60.0, 30.0, 8.0, c(SKIN));
        } else {
            self.part(feet, facing, 0.0, -55.0, 20.0, 8.0, c(SKIN));
            self.part(feet, facing, -16.0, -55.0, 8.0, 20.0, c(SKIN));
        }

        // Head, headband, eye
        let band = match fighter.side {
            Side::Player => WHITE,
            Side::Cpu => BLACK,
        };
        self.part(feet, facing, -10.0, -85.0, 20.0, 16.0, c(SKIN));
        self.part(feet, facing, -11.0, -87.0, 22.0, 5.0, faded_color(band, fade));
        self.part(feet, facing, 2.0, -80.0, 3.0, 3.0, faded_color(BLACK, fade));

        // Strike zone outline while the window is open
        if fighter.is_attacking {
            let lx = fighter.width / 2.0;
            let x = match facing {
                Facing::Right => feet.x + lx,
                Facing::Left => feet.x - lx - ATTACK_BOX_WIDTH,
            };
            draw_rectangle_lines(
                self.origin.x + x,
                self.origin.y + pos.y + fighter.height / 3.0,
                ATTACK_BOX_WIDTH,
                ATTACK_BOX_HEIGHT,
                1.0,
                faded_color(WHITE, 0.25),
            );
        }
    }

    fn draw_projectiles(&self, arena: &Arena, alpha: f32) {
        for p in &arena.projectiles {
            let pos = utils::lerp_point(p.prev_position, p.position, alpha);
            // Trail
            self.rect(pos.x - p.vx * 2.0, pos.y - 8.0, 16.0, 16.0, faded_color(hex(ENERGY), 0.5));
            draw_circle(self.origin.x + pos.x, self.origin.y + pos.y, PROJECTILE_RADIUS, hex(ENERGY));
        }
    }

    fn draw_health_bar(&self, fighter: &Fighter, x: f32, y: f32, w: f32, label: &str, right_aligned: bool) {
        let h = 14.0;
        let ratio = fighter.hp_ratio();
        self.rect(x - 2.0, y - 2.0, w + 4.0, h + 4.0, faded_color(BLACK, 0.6));
        self.rect(x, y, w, h, DARKGRAY);
        let fill = w * ratio;
        // The CPU bar drains toward the centre from the right edge
        let fill_x = if right_aligned { x + w - fill } else { x };
        self.rect(fill_x, y, fill, h, get_health_gradient_color(ratio));

        let dims = measure_text(label, None, 16, 1.0);
        let label_x = if right_aligned { x + w - dims.width } else { x };
        self.text(label, label_x, y + h + 16.0, 16.0, WHITE);
    }

    fn draw_hud(&self, scene: &Scene) {
        let width = scene.arena.width;
        let bar_w = (width * 0.35).min(260.0);
        let margin = 12.0;
        self.draw_health_bar(scene.player, margin, margin, bar_w, "PLAYER", false);
        self.draw_health_bar(scene.cpu, width - margin - bar_w, margin, bar_w, "CPU", true);

        let timer = scene.round.timer.to_string();
        self.centered_text(&timer, width / 2.0, margin + 26.0, 36.0, hex(TIMER_YELLOW));
        self.centered_text("TIME", width / 2.0, margin + 42.0, 14.0, faded_color(WHITE, 0.5));
    }

    fn draw_controls(&self, controls: &VirtualControls) {
        for (button, rect) in controls.buttons() {
            let c = rect.center();
            let radius = rect.w / 2.0;
            draw_circle(self.origin.x + c.x, self.origin.y + c.y, radius, faded_color(DARKGRAY, 0.5));
            let size = if button.label().len() > 1 { 12.0 } else { 24.0 };
            self.centered_text(button.label(), c.x, c.y + size / 3.0, size, faded_color(WHITE, 0.8));
        }
    }

    fn draw_start_screen(&self, arena: &Arena) {
        self.rect(0.0, 0.0, arena.width, arena.height, faded_color(BLACK, 0.9));
        let cx = arena.width / 2.0;
        let top = arena.height * 0.3;
        self.centered_text("STREET", cx, top, 56.0, hex(TIMER_YELLOW));
        self.centered_text("CANVAS II", cx, top + 52.0, 56.0, RED);
        self.centered_text("PRESS ENTER OR TAP TO FIGHT!", cx, top + 100.0, 22.0, WHITE);

        let lines = [
            "Left/Right (A/D): Move",
            "Up/W/Space: Jump",
            "J: Punch   K: Kick   U: Special",
        ];
        for (i, line) in lines.iter().enumerate() {
            self.centered_text(line, cx, top + 140.0 + i as f32 * 20.0, 18.0, faded_color(WHITE, 0.7));
        }
    }

    fn draw_game_over(&self, scene: &Scene) {
        let arena = scene.arena;
        self.rect(0.0, 0.0, arena.width, arena.height, faded_color(BLACK, 0.5));
        let cx = arena.width / 2.0;
        let cy = arena.height * 0.4;
        match scene.round.winner {
            Some(Side::Player) => {
                self.centered_text("YOU WIN!", cx, cy, 64.0, hex(TIMER_YELLOW));
                let score = format!("SCORE: {}", scene.final_score);
                self.centered_text(&score, cx, cy + 44.0, 28.0, WHITE);
            }
            _ => {
                self.centered_text("YOU LOSE", cx, cy, 64.0, GRAY);
                self.centered_text("TRY AGAIN?", cx, cy + 44.0, 28.0, WHITE);
            }
        }
        self.centered_text("ENTER / TAP: REMATCH    ESC: QUIT", cx, cy + 84.0, 18.0, LIGHTGRAY);
    }

    pub fn window_should_close() -> bool {
        is_key_down(KeyCode::Escape) || is_quit_requested()
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}
