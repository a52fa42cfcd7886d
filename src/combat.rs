//! Melee and projectile hit resolution.
//!
//! Both resolvers only act on victims whose hit cooldown has run out, so a
//! fighter can never take two hits inside one grace period.

use crate::arena::Arena;
use crate::config;
use crate::fighter::Fighter;
use crate::types::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitKind {
    Melee,
    Projectile,
}

/// A confirmed hit, reported for logging and presentation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitEvent {
    pub kind: HitKind,
    pub attacker: Side,
    pub victim: Side,
    pub damage: i32,
    pub position: Point,
}

/// The strike zone in front of an attacker, `range` wide.
pub fn melee_hitbox(attacker: &Fighter, range: f32) -> (f32, f32) {
    let left = match attacker.facing {
        Facing::Right => attacker.position.x + attacker.width,
        Facing::Left => attacker.position.x - range,
    };
    (left, left + range)
}

/// Tests one attacker against one victim and applies the hit if it lands.
pub fn resolve_melee(attacker: &mut Fighter, victim: &mut Fighter) -> Option<HitEvent> {
    if !attacker.is_attacking || !victim.is_hittable() {
        return None;
    }

    let (hit_left, hit_right) = melee_hitbox(attacker, config::ATTACK_BOX_WIDTH);
    let overlaps = hit_left < victim.position.x + victim.width && hit_right > victim.position.x;
    let aligned = (attacker.position.y - victim.position.y).abs() < config::MELEE_VERTICAL_TOLERANCE;
    if !(overlaps && aligned) {
        return None;
    }

    victim.take_hit(config::MELEE_DAMAGE, attacker.facing.sign() * config::MELEE_KNOCKBACK);
    attacker.score += config::MELEE_SCORE;
    crate::debug_combat!(
        attacker.side,
        "Melee hit on {} ({} hp left, score {})",
        victim.side.label(),
        victim.hp,
        attacker.score
    );

    let contact_x = match attacker.facing {
        Facing::Right => hit_left,
        Facing::Left => hit_right,
    };
    Some(HitEvent {
        kind: HitKind::Melee,
        attacker: attacker.side,
        victim: victim.side,
        damage: config::MELEE_DAMAGE,
        position: Point::new(contact_x, attacker.position.y + attacker.height / 3.0),
    })
}

/// Checks both fighters' attack windows. Either, both, or neither may land.
pub fn resolve_melee_exchange(player: &mut Fighter, cpu: &mut Fighter) -> Vec<HitEvent> {
    let mut hits = Vec::new();
    if let Some(hit) = resolve_melee(player, cpu) {
        hits.push(hit);
    }
    if let Some(hit) = resolve_melee(cpu, player) {
        hits.push(hit);
    }
    hits
}

/// Tests every live projectile against the fighter that did not fire it.
/// Projectiles that connect are deactivated and then dropped from the arena.
pub fn resolve_projectiles(arena: &mut Arena, player: &mut Fighter, cpu: &mut Fighter) -> Vec<HitEvent> {
    let mut hits = Vec::new();

    for projectile in arena.projectiles.iter_mut().filter(|p| p.active) {
        let target = match projectile.owner {
            Side::Player => &mut *cpu,
            Side::Cpu => &mut *player,
        };
        if !target.is_hittable() || !target.bounds().contains_strict(projectile.position) {
            continue;
        }

        let direction = if projectile.vx > 0.0 { 1.0 } else { -1.0 };
        target.take_hit(config::PROJECTILE_DAMAGE, direction * config::PROJECTILE_KNOCKBACK);
        projectile.active = false;
        let victim = target.side;
        let victim_hp = target.hp;

        if projectile.owner == Side::Player {
            player.score += config::PROJECTILE_SCORE;
        }
        crate::debug_combat!(
            projectile.owner,
            "Projectile hit on {} ({} hp left)",
            victim.label(),
            victim_hp
        );

        hits.push(HitEvent {
            kind: HitKind::Projectile,
            attacker: projectile.owner,
            victim,
            damage: config::PROJECTILE_DAMAGE,
            position: projectile.position,
        });
    }

    arena.remove_inactive_projectiles();
    hits
}
