use humble_galaga::entities::*;

#[test]
fn phase_eq_and_copy() {
    // Phase derives PartialEq + Copy — comparisons and copies must work
    assert_eq!(Phase::Menu, Phase::Menu);
    assert_ne!(Phase::Menu, Phase::Playing);
    assert_ne!(Phase::Won, Phase::Lost);

    let p = Phase::Playing;
    let q = p; // copy, not move
    assert_eq!(p, q);
}

#[test]
fn rect_is_plain_value() {
    let a = Rect { x: 1, y: 2, w: 3, h: 4 };
    let b = a;
    assert_eq!(a, b);
    assert_ne!(a, Rect { x: 0, y: 2, w: 3, h: 4 });
}

#[test]
fn session_clone_is_independent() {
    let original = GameSession {
        phase: Phase::Playing,
        player: Player { x: 400, y: 500, dx: 0 },
        enemies: Vec::new(),
        projectiles: Vec::new(),
        score: 0,
        time_left: 30,
        frame: 0,
    };
    let mut cloned = original.clone();

    // Mutating the clone must not affect the original
    cloned.player.x = 99;
    cloned.score = 999;
    cloned.enemies.push(Enemy { x: 5, y: 5, dx: 5, rotation: 0.0 });
    cloned.projectiles.push(Projectile { x: 1, y: 1 });

    assert_eq!(original.player.x, 400);
    assert_eq!(original.score, 0);
    assert!(original.enemies.is_empty());
    assert!(original.projectiles.is_empty());
}
