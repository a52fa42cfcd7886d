use crate::config;

/// A point in canvas pixels (origin top-left, y grows downward).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Point { x, y }
    }
}

/// Axis-aligned box given by its top-left corner and size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Rect { x, y, w, h }
    }

    // Strict on every edge: a point on the border is outside
    pub fn contains_strict(&self, p: Point) -> bool {
        p.x > self.x && p.x < self.x + self.w && p.y > self.y && p.y < self.y + self.h
    }

    /// Inclusive test against the largest circle centred in the rect.
    pub fn inscribed_circle_contains(&self, p: Point) -> bool {
        let c = self.center();
        let r = self.w.min(self.h) / 2.0;
        let (dx, dy) = (p.x - c.x, p.y - c.y);
        dx * dx + dy * dy <= r * r
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }
}

/// Which of the two fighters something belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Player,
    Cpu,
}

impl Side {
    pub fn label(self) -> &'static str {
        match self {
            Side::Player => "PLAYER",
            Side::Cpu => "CPU",
        }
    }
}

/// Horizontal facing; the discriminant doubles as the sign used for knockback and projectiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facing {
    Left = -1,
    Right = 1,
}

impl Facing {
    pub fn sign(self) -> f32 {
        self as i32 as f32
    }

    /// Facing toward `target_x` from `own_x`. Equal positions face left.
    pub fn toward(own_x: f32, target_x: f32) -> Facing {
        if own_x < target_x {
            Facing::Right
        } else {
            Facing::Left
        }
    }
}

/// An energy ball launched by a special attack.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projectile {
    pub position: Point,
    pub prev_position: Point, // For render interpolation
    pub vx: f32,
    pub owner: Side,
    pub active: bool,
}

impl Projectile {
    pub fn new(position: Point, facing: Facing, owner: Side) -> Self {
        Projectile {
            position,
            prev_position: position,
            vx: config::PROJECTILE_SPEED * facing.sign(),
            owner,
            active: true,
        }
    }
}

/// Side effects a fighter step asks the arena/game to carry out.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ArenaCommand {
    SpawnProjectile(Projectile),
}
