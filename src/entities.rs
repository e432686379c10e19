/// All game entity types — pure data, no logic.

/// The phase a session is in.  Starts at `Menu`; `Playing` is the only
/// phase in which the simulation advances.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Menu,
    Playing,
    Won,
    Lost,
}

/// Axis-aligned bounding box used for approximate collision tests.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

// ── Player, enemies, projectiles ──────────────────────────────────────────────

/// The player ship.  `dx` is the current horizontal velocity, set by
/// directional press events and cleared on release.
#[derive(Clone, Debug)]
pub struct Player {
    pub x: i32,
    pub y: i32,
    pub dx: i32,
}

/// A sweeping enemy.  `dx` flips sign whenever the enemy leaves the sweep
/// range, producing the bouncing side-to-side motion.  `rotation` accumulates
/// every tick; only the renderer looks at it.
#[derive(Clone, Debug)]
pub struct Enemy {
    pub x: i32,
    pub y: i32,
    pub dx: i32,
    pub rotation: f32,
}

/// A player shot travelling straight up.
#[derive(Clone, Debug)]
pub struct Projectile {
    pub x: i32,
    pub y: i32,
}

// ── Master session state ──────────────────────────────────────────────────────

/// The entire session state.  Cloneable so pure update functions can
/// return a new copy without mutating the original.  The driver loop holds
/// the single owned instance; the display layer only reads it.
#[derive(Clone, Debug)]
pub struct GameSession {
    pub phase: Phase,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub projectiles: Vec<Projectile>,
    pub score: u32,
    /// Seconds remaining on the countdown clock.
    pub time_left: i32,
    pub frame: u64,
}
