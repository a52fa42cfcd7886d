use crate::arena::Arena;
use crate::config;
use crate::input::InputState;
use crate::types::*;

// Animation/state tag; exactly one is active at a time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FighterState {
    Idle,
    Walk,
    Jump,
    AttackPunch,
    AttackKick,
    Hit,
    Dead,
    Win,
}

impl FighterState {
    // Terminal states freeze the fighter until the next restart
    pub fn is_final(self) -> bool {
        matches!(self, FighterState::Dead | FighterState::Win)
    }
}

// Represents one combatant
#[derive(Debug, Clone)]
pub struct Fighter {
    pub side: Side,
    pub position: Point, // Top-left corner
    pub prev_position: Point,
    pub vx: f32,
    pub vy: f32,
    pub width: f32,
    pub height: f32,
    pub hp: i32,
    pub max_hp: i32,
    pub facing: Facing,
    pub state: FighterState,
    pub hit_cooldown: u32,
    pub attack_frame: u32,
    pub is_attacking: bool,
    pub score: u32,
}

impl Fighter {
    pub fn new(side: Side, position: Point, facing: Facing) -> Self {
        Fighter {
            side,
            position,
            prev_position: position,
            vx: 0.0,
            vy: 0.0,
            width: config::FIGHTER_WIDTH,
            height: config::FIGHTER_HEIGHT,
            hp: config::MAX_HP,
            max_hp: config::MAX_HP,
            facing,
            state: FighterState::Idle,
            hit_cooldown: 0,
            attack_frame: 0,
            is_attacking: false,
            score: 0,
        }
    }

    /// Restores a fresh fighter at `position`, keeping nothing from the last round.
    pub fn reset(&mut self, position: Point, facing: Facing) {
        *self = Fighter::new(self.side, position, facing);
    }

    pub fn update_prev_state(&mut self) {
        self.prev_position = self.position;
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.position.x, self.position.y, self.width, self.height)
    }

    pub fn is_grounded(&self, arena: &Arena) -> bool {
        self.position.y >= arena.ground_y - config::GROUND_TOLERANCE
    }

    pub fn is_hittable(&self) -> bool {
        self.hit_cooldown == 0
    }

    pub fn hp_ratio(&self) -> f32 {
        (self.hp.max(0) as f32 / self.max_hp as f32).min(1.0)
    }

    // Where a special attack's projectile starts: leading edge, fixed drop from the top
    fn projectile_origin(&self) -> Point {
        let x = match self.facing {
            Facing::Right => self.position.x + self.width,
            Facing::Left => self.position.x,
        };
        Point::new(x, self.position.y + config::PROJECTILE_Y_OFFSET)
    }

    fn start_attack(&mut self, state: FighterState, frames: u32) {
        self.state = state;
        self.is_attacking = true;
        self.attack_frame = frames;
        self.vx = 0.0;
    }

    /// Applies a confirmed hit: damage, stun, knockback.
    pub fn take_hit(&mut self, damage: i32, knockback: f32) {
        self.hp -= damage;
        self.hit_cooldown = config::HIT_COOLDOWN;
        self.state = FighterState::Hit;
        self.vx = knockback;
    }

    /// Advances this fighter by one frame.
    ///
    /// `input.special` is consumed when it fires so a held press does not re-trigger.
    /// Any projectile spawned is pushed onto `commands` for the arena to pick up.
    pub fn step(
        &mut self,
        input: &mut InputState,
        opponent_x: f32,
        arena: &Arena,
        commands: &mut Vec<ArenaCommand>,
    ) {
        if self.state.is_final() {
            return;
        }

        // Cooldowns
        if self.hit_cooldown > 0 {
            self.hit_cooldown -= 1;
            if self.hit_cooldown == 0 && self.state == FighterState::Hit {
                self.state = if self.is_grounded(arena) {
                    FighterState::Idle
                } else {
                    FighterState::Jump
                };
                crate::debug_physics!(self.side, "Recovered from hit stun into {:?}", self.state);
            }
        }

        // Movement
        if self.state != FighterState::Hit && !self.is_attacking {
            self.vx = if input.left {
                -config::WALK_SPEED
            } else if input.right {
                config::WALK_SPEED
            } else {
                0.0
            };

            if input.up && self.is_grounded(arena) {
                self.vy = config::JUMP_FORCE;
                self.state = FighterState::Jump;
                crate::debug_physics!(self.side, "Jump from y={:.1}", self.position.y);
            }
        }

        // Attacks start only from the ground
        if self.is_grounded(arena) && self.state != FighterState::Hit && !self.is_attacking {
            if input.punch {
                self.start_attack(FighterState::AttackPunch, config::PUNCH_FRAMES);
                crate::debug_physics!(self.side, "Punch");
            } else if input.kick {
                self.start_attack(FighterState::AttackKick, config::KICK_FRAMES);
                crate::debug_physics!(self.side, "Kick");
            } else if input.special {
                let projectile = Projectile::new(self.projectile_origin(), self.facing, self.side);
                commands.push(ArenaCommand::SpawnProjectile(projectile));
                // Reuses the punch pose
                self.start_attack(FighterState::AttackPunch, config::SPECIAL_FRAMES);
                input.special = false;
                crate::debug_physics!(self.side, "Special fired toward {:?}", self.facing);
            }
        }

        // Attack window countdown
        if self.is_attacking {
            self.attack_frame = self.attack_frame.saturating_sub(1);
            if self.attack_frame == 0 {
                self.is_attacking = false;
                self.state = FighterState::Idle;
            }
        }

        // Integrate
        self.vy += config::GRAVITY;
        self.position.x += self.vx;
        self.position.y += self.vy;

        // Ground
        if self.position.y > arena.ground_y {
            self.position.y = arena.ground_y;
            self.vy = 0.0;
            if !self.is_attacking && self.state != FighterState::Hit {
                self.state = if self.vx.abs() > 0.0 {
                    FighterState::Walk
                } else {
                    FighterState::Idle
                };
            }
        }

        // Walls
        self.position.x = arena.clamp_x(self.position.x, self.width);

        self.facing = Facing::toward(self.position.x, opponent_x);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    fn arena() -> Arena {
        Arena::new(800.0, 450.0)
    }

    fn grounded(side: Side, x: f32, arena: &Arena) -> Fighter {
        Fighter::new(side, Point::new(x, arena.ground_y), Facing::Right)
    }

    fn step_n(f: &mut Fighter, input: &mut InputState, opponent_x: f32, arena: &Arena, n: usize) -> Vec<ArenaCommand> {
        let mut commands = Vec::new();
        for _ in 0..n {
            f.step(input, opponent_x, arena, &mut commands);
        }
        commands
    }

    #[test]
    fn test_walk_right_and_left() {
        let arena = arena();
        let mut f = grounded(Side::Player, 100.0, &arena);
        let mut input = InputState { right: true, ..Default::default() };
        step_n(&mut f, &mut input, 500.0, &arena, 1);
        assert_approx_eq!(f.position.x, 105.0);
        assert_eq!(f.state, FighterState::Walk);
        assert_approx_eq!(f.position.y, arena.ground_y);

        // Left wins when both are held
        let mut input = InputState { left: true, right: true, ..Default::default() };
        step_n(&mut f, &mut input, 500.0, &arena, 1);
        assert_approx_eq!(f.position.x, 100.0);

        let mut idle = InputState::new();
        step_n(&mut f, &mut idle, 500.0, &arena, 1);
        assert_eq!(f.vx, 0.0);
        assert_eq!(f.state, FighterState::Idle);
    }

    #[test]
    fn test_jump_and_land() {
        let arena = arena();
        let mut f = grounded(Side::Player, 100.0, &arena);
        let mut input = InputState { up: true, ..Default::default() };
        step_n(&mut f, &mut input, 500.0, &arena, 1);
        assert_eq!(f.state, FighterState::Jump);
        assert!(f.position.y < arena.ground_y);

        // Holding up mid-air does not re-jump
        let vy_before = f.vy;
        step_n(&mut f, &mut input, 500.0, &arena, 1);
        assert_approx_eq!(f.vy, vy_before + config::GRAVITY);

        let mut idle = InputState::new();
        step_n(&mut f, &mut idle, 500.0, &arena, 60);
        assert_approx_eq!(f.position.y, arena.ground_y);
        assert_eq!(f.vy, 0.0);
        assert_eq!(f.state, FighterState::Idle);
    }

    #[test]
    fn test_cannot_attack_in_the_air() {
        let arena = arena();
        let mut f = grounded(Side::Player, 100.0, &arena);
        let mut input = InputState { up: true, ..Default::default() };
        step_n(&mut f, &mut input, 500.0, &arena, 1);
        let mut punch = InputState { punch: true, ..Default::default() };
        step_n(&mut f, &mut punch, 500.0, &arena, 1);
        assert!(!f.is_attacking);
        assert_eq!(f.state, FighterState::Jump);
    }

    #[test]
    fn test_punch_window_runs_its_full_duration() {
        let arena = arena();
        let mut f = grounded(Side::Player, 100.0, &arena);
        let mut input = InputState { punch: true, right: true, ..Default::default() };
        step_n(&mut f, &mut input, 500.0, &arena, 1);
        assert!(f.is_attacking);
        assert_eq!(f.state, FighterState::AttackPunch);
        assert_eq!(f.vx, 0.0, "Attacking roots the fighter");

        // Kick pressed mid-punch cannot start a second attack
        let mut kick = InputState { kick: true, ..Default::default() };
        step_n(&mut f, &mut kick, 500.0, &arena, 1);
        assert_eq!(f.state, FighterState::AttackPunch);
        assert_eq!(f.attack_frame, config::PUNCH_FRAMES - 2);

        let mut idle = InputState::new();
        step_n(&mut f, &mut idle, 500.0, &arena, (config::PUNCH_FRAMES - 3) as usize);
        assert!(f.is_attacking, "Still one frame left");
        step_n(&mut f, &mut idle, 500.0, &arena, 1);
        assert!(!f.is_attacking);
        assert_eq!(f.state, FighterState::Idle);
        assert_approx_eq!(f.position.x, 100.0);
    }

    #[test]
    fn test_kick_lasts_longer_than_punch() {
        let arena = arena();
        let mut f = grounded(Side::Player, 100.0, &arena);
        let mut input = InputState { kick: true, ..Default::default() };
        step_n(&mut f, &mut input, 500.0, &arena, 1);
        assert_eq!(f.state, FighterState::AttackKick);
        assert_eq!(f.attack_frame, config::KICK_FRAMES - 1);
    }

    #[test]
    fn test_special_spawns_projectile_once() {
        let arena = arena();
        let mut f = grounded(Side::Cpu, 300.0, &arena);
        let mut input = InputState { special: true, ..Default::default() };
        let commands = step_n(&mut f, &mut input, 100.0, &arena, 1);
        assert!(!input.special, "Special is consumed when it fires");
        assert_eq!(commands.len(), 1);
        let ArenaCommand::SpawnProjectile(p) = commands[0];
        assert_eq!(p.owner, Side::Cpu);
        assert_eq!(p.vx, config::PROJECTILE_SPEED, "Facing was right when it fired");
        assert_approx_eq!(p.position.x, 340.0);
        assert_approx_eq!(p.position.y, arena.ground_y + config::PROJECTILE_Y_OFFSET);
        assert_eq!(f.state, FighterState::AttackPunch);
        assert_eq!(f.attack_frame, config::SPECIAL_FRAMES - 1);
        // Facing updated toward the opponent at the end of the step
        assert_eq!(f.facing, Facing::Left);

        let mut again = InputState { special: true, ..Default::default() };
        let commands = step_n(&mut f, &mut again, 100.0, &arena, 5);
        assert!(commands.is_empty(), "No re-trigger while the window is open");
    }

    #[test]
    fn test_horizontal_clamp() {
        let arena = arena();
        let mut f = grounded(Side::Player, 2.0, &arena);
        let mut left = InputState { left: true, ..Default::default() };
        step_n(&mut f, &mut left, 500.0, &arena, 10);
        assert_eq!(f.position.x, 0.0);

        let mut right = InputState { right: true, ..Default::default() };
        step_n(&mut f, &mut right, 0.0, &arena, 400);
        assert_approx_eq!(f.position.x, arena.width - f.width);
    }

    #[test]
    fn test_hit_stun_blocks_input_and_recovers() {
        let arena = arena();
        let mut f = grounded(Side::Player, 300.0, &arena);
        f.take_hit(config::MELEE_DAMAGE, -config::MELEE_KNOCKBACK);
        assert_eq!(f.hp, config::MAX_HP - config::MELEE_DAMAGE);
        assert!(!f.is_hittable());

        let mut input = InputState { right: true, punch: true, ..Default::default() };
        step_n(&mut f, &mut input, 500.0, &arena, 1);
        assert_eq!(f.state, FighterState::Hit);
        assert!(!f.is_attacking);
        assert_approx_eq!(f.vx, -config::MELEE_KNOCKBACK);

        step_n(&mut f, &mut InputState::new(), 500.0, &arena, (config::HIT_COOLDOWN - 2) as usize);
        assert_eq!(f.hit_cooldown, 1);
        assert_eq!(f.state, FighterState::Hit);
        step_n(&mut f, &mut InputState::new(), 500.0, &arena, 1);
        assert!(f.is_hittable());
        assert_eq!(f.state, FighterState::Idle);
    }

    #[test]
    fn test_hit_stun_recovers_airborne_into_jump() {
        let arena = arena();
        let mut f = grounded(Side::Player, 300.0, &arena);
        let mut up = InputState { up: true, ..Default::default() };
        step_n(&mut f, &mut up, 500.0, &arena, 1);
        f.take_hit(config::MELEE_DAMAGE, config::MELEE_KNOCKBACK);

        let mut idle = InputState::new();
        step_n(&mut f, &mut idle, 500.0, &arena, config::HIT_COOLDOWN as usize);
        assert!(f.is_hittable());
        assert!(f.position.y < arena.ground_y - 50.0, "Still high in the air");
        assert_eq!(f.state, FighterState::Jump);

        step_n(&mut f, &mut idle, 500.0, &arena, 20);
        assert_approx_eq!(f.position.y, arena.ground_y);
        assert_eq!(f.state, FighterState::Idle);
    }

    #[test]
    fn test_final_states_are_frozen() {
        let arena = arena();
        let mut f = grounded(Side::Player, 300.0, &arena);
        f.state = FighterState::Dead;
        f.hit_cooldown = 5;
        let mut input = InputState { right: true, ..Default::default() };
        step_n(&mut f, &mut input, 500.0, &arena, 3);
        assert_eq!(f.position.x, 300.0);
        assert_eq!(f.hit_cooldown, 5);
    }
}
