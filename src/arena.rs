use crate::config::*;
use crate::error::GameError;
use crate::types::*;

/// Computes the canvas size for a window: each axis capped independently.
pub fn fit_viewport(window_width: f32, window_height: f32) -> Result<(f32, f32), GameError> {
    let width = window_width.min(MAX_VIEWPORT_WIDTH);
    let height = window_height.min(MAX_VIEWPORT_HEIGHT);
    // Need room for a fighter standing on the ground line
    if !(width >= FIGHTER_WIDTH && height > GROUND_OFFSET) {
        return Err(GameError::InvalidViewport {
            width: window_width,
            height: window_height,
        });
    }
    Ok((width, height))
}

// The stage: canvas bounds, ground line and every live projectile
#[derive(Debug)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
    pub ground_y: f32, // y of a grounded fighter's top edge
    pub projectiles: Vec<Projectile>,
}

impl Arena {
    pub fn new(width: f32, height: f32) -> Self {
        Arena {
            width,
            height,
            ground_y: height - GROUND_OFFSET,
            projectiles: Vec::new(),
        }
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
        self.ground_y = height - GROUND_OFFSET;
    }

    /// Keeps a body of `body_width` fully on screen.
    pub fn clamp_x(&self, x: f32, body_width: f32) -> f32 {
        x.max(0.0).min(self.width - body_width)
    }

    /// A grounded start mark at `x`, pulled back on stage for narrow canvases.
    pub fn start_mark(&self, x: f32) -> Point {
        Point::new(self.clamp_x(x, FIGHTER_WIDTH), self.ground_y)
    }

    pub fn player_start(&self) -> Point {
        self.start_mark(PLAYER_START_X)
    }

    pub fn cpu_start(&self) -> Point {
        self.start_mark(self.width - CPU_START_INSET)
    }

    pub fn spawn_projectile(&mut self, projectile: Projectile) {
        crate::debug_combat!(
            projectile.owner,
            "Spawning projectile at ({:.1}, {:.1}) vx {:.1}",
            projectile.position.x,
            projectile.position.y,
            projectile.vx
        );
        self.projectiles.push(projectile);
    }

    pub fn apply_command(&mut self, command: ArenaCommand) {
        match command {
            ArenaCommand::SpawnProjectile(projectile) => self.spawn_projectile(projectile),
        }
    }

    // Moves every projectile one frame and drops the ones that left the canvas
    pub fn update_projectiles(&mut self) {
        let width = self.width;
        for projectile in self.projectiles.iter_mut() {
            projectile.prev_position = projectile.position;
            projectile.position.x += projectile.vx;
            if projectile.position.x < 0.0 || projectile.position.x > width {
                crate::debug_combat!(
                    projectile.owner,
                    "Projectile left the stage at x={:.1}",
                    projectile.position.x
                );
                projectile.active = false;
            }
        }
        self.remove_inactive_projectiles();
    }

    pub fn remove_inactive_projectiles(&mut self) {
        self.projectiles.retain(|p| p.active);
    }

    pub fn clear_projectiles(&mut self) {
        self.projectiles.clear();
    }
}

impl Default for Arena {
    fn default() -> Self {
        Self::new(MAX_VIEWPORT_WIDTH, MAX_VIEWPORT_HEIGHT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn test_viewport_is_capped() {
        assert_eq!(fit_viewport(1920.0, 1080.0).unwrap(), (800.0, 450.0));
        assert_eq!(fit_viewport(640.0, 360.0).unwrap(), (640.0, 360.0));
        assert_eq!(fit_viewport(1024.0, 300.0).unwrap(), (800.0, 300.0));
        assert!(fit_viewport(20.0, 450.0).is_err());
        assert!(fit_viewport(800.0, 0.0).is_err());
    }

    #[test]
    fn test_ground_follows_height() {
        let mut arena = Arena::new(800.0, 450.0);
        assert_approx_eq!(arena.ground_y, 380.0);
        arena.resize(600.0, 300.0);
        assert_approx_eq!(arena.ground_y, 230.0);
        assert_approx_eq!(arena.cpu_start().x, 500.0);
        assert_approx_eq!(arena.player_start().x, PLAYER_START_X);
    }

    #[test]
    fn test_start_marks_stay_on_a_narrow_stage() {
        let arena = Arena::new(60.0, 450.0);
        let max_x = arena.width - FIGHTER_WIDTH;
        assert_approx_eq!(arena.player_start().x, max_x);
        assert_approx_eq!(arena.cpu_start().x, 0.0);
        assert_approx_eq!(arena.start_mark(INITIAL_PLAYER_X).x, max_x);
        assert_approx_eq!(arena.cpu_start().y, arena.ground_y);
    }

    #[test]
    fn test_projectile_movement() {
        let mut arena = Arena::default();
        arena.spawn_projectile(Projectile::new(Point::new(400.0, 300.0), Facing::Right, Side::Player));
        arena.update_projectiles();
        assert_eq!(arena.projectiles.len(), 1);
        assert_approx_eq!(arena.projectiles[0].position.x, 408.0);
        assert_approx_eq!(arena.projectiles[0].prev_position.x, 400.0);
        assert_approx_eq!(arena.projectiles[0].position.y, 300.0);
    }

    #[test]
    fn test_projectile_leaves_left_edge_within_13_frames() {
        let mut arena = Arena::default();
        arena.spawn_projectile(Projectile::new(Point::new(100.0, 300.0), Facing::Left, Side::Cpu));
        for frame in 1..=12 {
            arena.update_projectiles();
            assert_eq!(arena.projectiles.len(), 1, "Still live after frame {}", frame);
        }
        assert_approx_eq!(arena.projectiles[0].position.x, 4.0);
        arena.update_projectiles();
        assert!(
            arena.projectiles.is_empty(),
            "Projectile should be removed after crossing x=0"
        );
    }

    #[test]
    fn test_projectile_boundary_right() {
        let mut arena = Arena::new(800.0, 450.0);
        arena.spawn_projectile(Projectile::new(Point::new(795.0, 300.0), Facing::Right, Side::Player));
        arena.update_projectiles();
        assert!(arena.projectiles.is_empty());
    }

    #[test]
    fn test_clamp_x() {
        let arena = Arena::new(800.0, 450.0);
        assert_eq!(arena.clamp_x(-3.0, 40.0), 0.0);
        assert_eq!(arena.clamp_x(790.0, 40.0), 760.0);
        assert_eq!(arena.clamp_x(200.0, 40.0), 200.0);
    }
}
