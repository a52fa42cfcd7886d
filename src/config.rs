//! Configuration constants for the fighting game.

// Viewport
pub const MAX_VIEWPORT_WIDTH: f32 = 800.0; // Canvas never grows past this
pub const MAX_VIEWPORT_HEIGHT: f32 = 450.0;
pub const DEFAULT_WINDOW_WIDTH: i32 = 800;
pub const DEFAULT_WINDOW_HEIGHT: i32 = 450;
pub const GROUND_OFFSET: f32 = 70.0; // ground_y = height - GROUND_OFFSET
pub const FRAME_RATE: u32 = 60; // Fixed simulation steps per second

// Fighter body and movement (pixels, pixels/frame)
pub const FIGHTER_WIDTH: f32 = 40.0;
pub const FIGHTER_HEIGHT: f32 = 70.0;
pub const MAX_HP: i32 = 100;
pub const GRAVITY: f32 = 0.8;
pub const JUMP_FORCE: f32 = -15.0;
pub const WALK_SPEED: f32 = 5.0;
pub const GROUND_TOLERANCE: f32 = 1.0; // "at/near ground" slack for jumps and attacks

// Starting layout
pub const INITIAL_PLAYER_X: f32 = 100.0; // Before the first round starts
pub const PLAYER_START_X: f32 = 50.0;
pub const CPU_START_INSET: f32 = 100.0; // CPU starts at width - inset

// Attack windows (frames)
pub const PUNCH_FRAMES: u32 = 20;
pub const KICK_FRAMES: u32 = 25;
pub const SPECIAL_FRAMES: u32 = 30;
pub const HIT_COOLDOWN: u32 = 30;

// Melee
pub const ATTACK_BOX_WIDTH: f32 = 35.0;
pub const ATTACK_BOX_HEIGHT: f32 = 20.0; // Drawn only; vertical reach uses MELEE_VERTICAL_TOLERANCE
pub const MELEE_VERTICAL_TOLERANCE: f32 = 50.0;
pub const MELEE_DAMAGE: i32 = 5;
pub const MELEE_KNOCKBACK: f32 = 10.0;
pub const MELEE_SCORE: u32 = 100;

// Projectiles
pub const PROJECTILE_SPEED: f32 = 8.0;
pub const PROJECTILE_Y_OFFSET: f32 = 25.0;
pub const PROJECTILE_DAMAGE: i32 = 10;
pub const PROJECTILE_KNOCKBACK: f32 = 5.0;
pub const PROJECTILE_SCORE: u32 = 200; // Awarded to the player only
pub const PROJECTILE_RADIUS: f32 = 12.0; // Drawn only; hits test the centre point

// CPU heuristic
pub const CPU_APPROACH_DISTANCE: f32 = 50.0;
pub const CPU_ATTACK_CHANCE: f64 = 0.05;
pub const CPU_JUMP_CHANCE: f64 = 0.005;
pub const CPU_SPECIAL_DISTANCE: f32 = 150.0;
pub const CPU_SPECIAL_CHANCE: f64 = 0.01;

// Round rules
pub const ROUND_SECONDS: u32 = 99;
pub const COMPLETION_BONUS: u32 = 1000;
pub const DEFAULT_PLAYER_NAME: &str = "PLAYER 1";
