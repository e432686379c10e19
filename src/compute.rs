/// Pure game-logic functions.
///
/// Every public function takes an immutable reference to the current
/// `GameSession` and returns a brand-new `GameSession`.  The simulation is
/// fully deterministic — no RNG, no clock; the driver owns all timing.

use crate::entities::{Enemy, GameSession, Phase, Player, Projectile, Rect};

// ── Playfield geometry ───────────────────────────────────────────────────────

/// Logical playfield dimensions; the renderer projects these onto the
/// terminal, the simulation never leaves this coordinate space.
pub const FIELD_WIDTH: i32 = 800;
pub const FIELD_HEIGHT: i32 = 600;

/// Rightmost x the player and the enemy sweep may reach (field width minus
/// one 40-px sprite).
pub const SWEEP_MAX_X: i32 = 760;

pub const PLAYER_SPEED: i32 = 5;
pub const PLAYER_START_X: i32 = 400;
pub const PLAYER_START_Y: i32 = 500;

pub const ENEMY_SIZE: i32 = 40;
pub const ENEMY_SPEED: i32 = 5;
pub const ENEMY_SPIN_STEP: f32 = 0.1;

/// The opening formation: 3 rows of 8, anchored at (50, 50) with 80-column
/// and 50-row spacing.
pub const GRID_ROWS: i32 = 3;
pub const GRID_COLS: i32 = 8;
pub const GRID_ORIGIN_X: i32 = 50;
pub const GRID_ORIGIN_Y: i32 = 50;
pub const GRID_COL_STEP: i32 = 80;
pub const GRID_ROW_STEP: i32 = 50;

pub const PROJECTILE_SPEED: i32 = 10;
/// Shots are a narrow strip offset into the sprite, not the full cell.
pub const PROJECTILE_OFFSET_X: i32 = 18;
pub const PROJECTILE_WIDTH: i32 = 4;
pub const PROJECTILE_HEIGHT: i32 = 10;

pub const POINTS_PER_HIT: u32 = 10;
pub const ROUND_SECONDS: i32 = 30;

// ── Bounding boxes ───────────────────────────────────────────────────────────

pub fn projectile_bounds(projectile: &Projectile) -> Rect {
    Rect {
        x: projectile.x + PROJECTILE_OFFSET_X,
        y: projectile.y,
        w: PROJECTILE_WIDTH,
        h: PROJECTILE_HEIGHT,
    }
}

pub fn enemy_bounds(enemy: &Enemy) -> Rect {
    Rect {
        x: enemy.x,
        y: enemy.y,
        w: ENEMY_SIZE,
        h: ENEMY_SIZE,
    }
}

/// Strict overlap — rectangles that merely share an edge do not intersect.
pub fn intersects(a: &Rect, b: &Rect) -> bool {
    a.x < b.x + b.w && b.x < a.x + a.w && a.y < b.y + b.h && b.y < a.y + a.h
}

// ── Constructors ─────────────────────────────────────────────────────────────

/// A fresh session sitting at the menu, before any round has been played.
pub fn new_session() -> GameSession {
    GameSession {
        phase: Phase::Menu,
        player: Player {
            x: PLAYER_START_X,
            y: PLAYER_START_Y,
            dx: 0,
        },
        enemies: Vec::new(),
        projectiles: Vec::new(),
        score: 0,
        time_left: ROUND_SECONDS,
        frame: 0,
    }
}

// ── Session state machine ────────────────────────────────────────────────────

/// Confirm input from the menu: reset every counter, rebuild the enemy
/// formation and begin playing.  A no-op in any other phase.
pub fn start_game(state: &GameSession) -> GameSession {
    if state.phase != Phase::Menu {
        return state.clone();
    }

    let mut enemies = Vec::with_capacity((GRID_ROWS * GRID_COLS) as usize);
    for row in 0..GRID_ROWS {
        for col in 0..GRID_COLS {
            enemies.push(Enemy {
                x: GRID_ORIGIN_X + col * GRID_COL_STEP,
                y: GRID_ORIGIN_Y + row * GRID_ROW_STEP,
                dx: ENEMY_SPEED,
                rotation: 0.0,
            });
        }
    }

    GameSession {
        phase: Phase::Playing,
        player: Player {
            x: PLAYER_START_X,
            y: PLAYER_START_Y,
            dx: 0,
        },
        enemies,
        projectiles: Vec::new(),
        score: 0,
        time_left: ROUND_SECONDS,
        frame: 0,
    }
}

/// Cancel input from an end screen.  A no-op in any other phase; the entity
/// collections are left as they are and reset on the next start.
pub fn return_to_menu(state: &GameSession) -> GameSession {
    match state.phase {
        Phase::Won | Phase::Lost => GameSession {
            phase: Phase::Menu,
            ..state.clone()
        },
        _ => state.clone(),
    }
}

// ── Input-driven state transitions (pure) ───────────────────────────────────

/// Directional press/release events translate to a velocity: −5, +5 or 0.
/// The velocity is applied on the next tick, not here.
pub fn set_player_velocity(state: &GameSession, dx: i32) -> GameSession {
    if state.phase != Phase::Playing {
        return state.clone();
    }
    GameSession {
        player: Player {
            dx,
            ..state.player.clone()
        },
        ..state.clone()
    }
}

/// Fire input: spawn a shot at the player's current position.
pub fn fire_projectile(state: &GameSession) -> GameSession {
    if state.phase != Phase::Playing {
        return state.clone();
    }
    let mut projectiles = state.projectiles.clone();
    projectiles.push(Projectile {
        x: state.player.x,
        y: state.player.y,
    });
    GameSession {
        projectiles,
        ..state.clone()
    }
}

// ── Per-tick simulation step ─────────────────────────────────────────────────

/// Advance the simulation by one frame.  Only meaningful while playing; the
/// driver skips it in every other phase, and it guards itself as well.
pub fn tick(state: &GameSession) -> GameSession {
    if state.phase != Phase::Playing {
        return state.clone();
    }
    let frame = state.frame + 1;

    // ── 1. Player drifts at its current velocity, clamped to the field ──────
    let player = Player {
        x: (state.player.x + state.player.dx).max(0).min(SWEEP_MAX_X),
        ..state.player.clone()
    };

    // ── 2+3. Cull shots that left the top of the field, move the rest up ────
    let projectiles: Vec<Projectile> = state
        .projectiles
        .iter()
        .filter(|p| p.y >= 0)
        .map(|p| Projectile {
            y: p.y - PROJECTILE_SPEED,
            ..p.clone()
        })
        .collect();

    // ── 4. Shots vs. enemies ────────────────────────────────────────────────
    let (projectiles, enemies, score_gain) = resolve_collisions(&projectiles, &state.enemies);

    // ── 5. Enemy sweep: advance, bounce off either edge, spin ───────────────
    let enemies: Vec<Enemy> = enemies
        .iter()
        .map(|e| {
            let x = e.x + e.dx;
            let dx = if x < 0 || x > SWEEP_MAX_X { -e.dx } else { e.dx };
            Enemy {
                x,
                dx,
                rotation: e.rotation + ENEMY_SPIN_STEP,
                ..e.clone()
            }
        })
        .collect();

    // ── 6. Clearing the formation wins on this very tick ────────────────────
    let phase = if enemies.is_empty() {
        Phase::Won
    } else {
        Phase::Playing
    };

    GameSession {
        phase,
        player,
        enemies,
        projectiles,
        score: state.score + score_gain,
        frame,
        ..state.clone()
    }
}

/// All-pairs bounding-box scan with deferred batch removal.
///
/// Every intersecting (projectile, enemy) pair scores, even when one party
/// appears in several pairs on the same tick; removal still happens once per
/// entity after the scan.  A shot crossing two enemies therefore scores 20
/// and kills both, and an enemy grazed by two shots scores 20 but dies once.
fn resolve_collisions(
    projectiles: &[Projectile],
    enemies: &[Enemy],
) -> (Vec<Projectile>, Vec<Enemy>, u32) {
    let mut spent_shots: Vec<usize> = Vec::new();
    let mut hit_enemies: Vec<usize> = Vec::new();
    let mut score_gain: u32 = 0;

    for (pi, projectile) in projectiles.iter().enumerate() {
        let shot = projectile_bounds(projectile);
        for (ei, enemy) in enemies.iter().enumerate() {
            if intersects(&shot, &enemy_bounds(enemy)) {
                if !spent_shots.contains(&pi) {
                    spent_shots.push(pi);
                }
                if !hit_enemies.contains(&ei) {
                    hit_enemies.push(ei);
                }
                score_gain += POINTS_PER_HIT;
            }
        }
    }

    let projectiles: Vec<Projectile> = projectiles
        .iter()
        .enumerate()
        .filter(|(i, _)| !spent_shots.contains(i))
        .map(|(_, p)| p.clone())
        .collect();

    let enemies: Vec<Enemy> = enemies
        .iter()
        .enumerate()
        .filter(|(i, _)| !hit_enemies.contains(i))
        .map(|(_, e)| e.clone())
        .collect();

    (projectiles, enemies, score_gain)
}

// ── Countdown clock ──────────────────────────────────────────────────────────

/// One firing of the 1 Hz countdown.  The clock runs in every phase but only
/// acts while a round is being played; at zero the round is lost and the
/// driver stops ticking the simulation.
pub fn countdown_tick(state: &GameSession) -> GameSession {
    if state.phase != Phase::Playing {
        return state.clone();
    }
    let time_left = state.time_left - 1;
    let phase = if time_left <= 0 {
        Phase::Lost
    } else {
        Phase::Playing
    };
    GameSession {
        time_left,
        phase,
        ..state.clone()
    }
}
