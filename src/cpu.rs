use crate::config;
use crate::fighter::{Fighter, FighterState};
use crate::input::InputState;
use rand::Rng;

/// Decides the CPU's buttons for this frame.
///
/// Every roll is an independent per-frame trial, so one frame can carry
/// e.g. both a jump and a punch. Nothing is mutated here; the result is fed
/// to the regular physics step.
pub fn decide<R: Rng>(cpu: &Fighter, target: &Fighter, rng: &mut R) -> InputState {
    let mut input = InputState::new();
    if cpu.state.is_final() || cpu.state == FighterState::Hit || cpu.is_attacking {
        return input;
    }

    let distance = (target.position.x - cpu.position.x).abs();

    if distance > config::CPU_APPROACH_DISTANCE {
        if cpu.position.x < target.position.x {
            input.right = true;
        } else {
            input.left = true;
        }
    } else if rng.gen_bool(config::CPU_ATTACK_CHANCE) {
        if rng.gen_bool(0.5) {
            input.punch = true;
        } else {
            input.kick = true;
        }
    }

    if rng.gen_bool(config::CPU_JUMP_CHANCE) {
        input.up = true;
    }

    if distance > config::CPU_SPECIAL_DISTANCE && rng.gen_bool(config::CPU_SPECIAL_CHANCE) {
        input.special = true;
    }

    if input.any() {
        crate::debug_cpu!(cpu.side, "dist {:.1} -> {:?}", distance, input);
    }
    input
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Facing, Point, Side};
    use rand::rngs::mock::StepRng;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn fighters(cpu_x: f32, player_x: f32) -> (Fighter, Fighter) {
        (
            Fighter::new(Side::Cpu, Point::new(cpu_x, 380.0), Facing::Left),
            Fighter::new(Side::Player, Point::new(player_x, 380.0), Facing::Right),
        )
    }

    // gen_bool(p) succeeds when the drawn u64 falls under p * 2^64
    fn always_fires() -> StepRng {
        StepRng::new(0, 0)
    }

    fn never_fires() -> StepRng {
        StepRng::new(u64::MAX, 0)
    }

    #[test]
    fn test_walks_toward_target() {
        let (cpu, player) = fighters(600.0, 100.0);
        let input = decide(&cpu, &player, &mut never_fires());
        assert!(input.left && !input.right);
        assert!(!input.punch && !input.kick && !input.up && !input.special);

        let (cpu, player) = fighters(100.0, 600.0);
        let input = decide(&cpu, &player, &mut never_fires());
        assert!(input.right && !input.left);
    }

    #[test]
    fn test_attacks_only_when_close() {
        let (cpu, player) = fighters(130.0, 100.0);
        let input = decide(&cpu, &player, &mut always_fires());
        assert!(!input.left && !input.right, "Close enough to stop walking");
        assert!(input.punch ^ input.kick, "Exactly one of punch or kick");
        assert!(input.up, "Jump roll is independent");
        assert!(!input.special, "Special needs distance");

        let input = decide(&cpu, &player, &mut never_fires());
        assert!(!input.any());
    }

    #[test]
    fn test_special_only_at_range() {
        let (cpu, player) = fighters(400.0, 100.0);
        let input = decide(&cpu, &player, &mut always_fires());
        assert!(input.left && input.special && input.up);
        assert!(!input.punch && !input.kick);

        let (cpu, player) = fighters(200.0, 100.0);
        let input = decide(&cpu, &player, &mut always_fires());
        assert!(!input.special, "Too close for a special");
    }

    #[test]
    fn test_idle_while_busy() {
        let (mut cpu, player) = fighters(600.0, 100.0);
        cpu.state = FighterState::Hit;
        assert!(!decide(&cpu, &player, &mut always_fires()).any());

        cpu.state = FighterState::AttackKick;
        cpu.is_attacking = true;
        assert!(!decide(&cpu, &player, &mut always_fires()).any());

        cpu.is_attacking = false;
        cpu.state = FighterState::Dead;
        assert!(!decide(&cpu, &player, &mut always_fires()).any());
    }

    #[test]
    fn test_attack_rate_is_roughly_five_percent() {
        let (cpu, player) = fighters(120.0, 100.0);
        let mut rng = StdRng::seed_from_u64(7);
        let trials = 20_000;
        let attacks = (0..trials)
            .filter(|_| {
                let input = decide(&cpu, &player, &mut rng);
                input.punch || input.kick
            })
            .count();
        let rate = attacks as f64 / trials as f64;
        assert!((0.04..0.06).contains(&rate), "Attack rate {} out of range", rate);
    }
}
