mod display;

use std::collections::HashMap;
use std::io::{stdout, BufWriter, Write};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
        KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal,
    ExecutableCommand,
};
use rand::thread_rng;

use humble_galaga::compute::{
    countdown_tick, fire_projectile, new_session, return_to_menu, set_player_velocity,
    start_game, tick, PLAYER_SPEED,
};
use humble_galaga::entities::Phase;

const FRAME: Duration = Duration::from_millis(33); // ≈30 Hz simulation tick
const COUNTDOWN: Duration = Duration::from_secs(1); // 1 Hz round clock

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames.  Covers terminals that don't emit key-release events:
/// the OS key-repeat rate is ≥ 15 Hz, so a window of 4 frames (≈133 ms) is
/// always refreshed before expiry.
const HOLD_WINDOW: u64 = 4;

/// Returns true if `key` was seen within the last `HOLD_WINDOW` frames.
fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64) -> bool {
    key_frame
        .get(key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

// ── Driver loop ───────────────────────────────────────────────────────────────

/// One thread, two logical timers: the ~30 Hz simulation tick rides the frame
/// cadence and the 1 Hz countdown fires whenever a whole second has elapsed
/// on the monotonic clock.  Both run between input handling and rendering,
/// so each is atomic with respect to the other and no locks are needed.
///
/// Input model: directional keys set a velocity while held and clear it on
/// release.  Terminals with keyboard-enhancement report releases directly;
/// classic terminals only send repeated presses, so held state is
/// reconstructed from a `key_frame` map that records the frame each key was
/// last seen and expires entries after `HOLD_WINDOW` frames of silence.
fn run<W: Write>(out: &mut W, rx: &mpsc::Receiver<Event>) -> std::io::Result<()> {
    let (width, height) = terminal::size()?;
    let stars = display::Starfield::scatter(&mut thread_rng(), width, height);

    let mut state = new_session();
    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut frame: u64 = 0;
    let mut next_countdown = Instant::now() + COUNTDOWN;

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(Event::Key(KeyEvent { code, kind, modifiers, .. })) = rx.try_recv() {
            match kind {
                // Press: record key + handle one-shot actions
                KeyEventKind::Press => {
                    key_frame.insert(code.clone(), frame);
                    match code {
                        KeyCode::Char('q') | KeyCode::Char('Q') => return Ok(()),
                        KeyCode::Char('c')
                            if modifiers.contains(KeyModifiers::CONTROL) =>
                        {
                            return Ok(());
                        }
                        // Confirm — starts a round from the menu only
                        KeyCode::Enter => state = start_game(&state),
                        // Cancel — back to the menu from an end screen;
                        // from the menu itself it quits
                        KeyCode::Esc => match state.phase {
                            Phase::Won | Phase::Lost => state = return_to_menu(&state),
                            Phase::Menu => return Ok(()),
                            Phase::Playing => {}
                        },
                        KeyCode::Char(' ') => state = fire_projectile(&state),
                        _ => {}
                    }
                }
                // Repeat: refresh timestamp so the key stays "held".  The
                // trigger re-fires too — the original acted on every
                // auto-repeated key event.
                KeyEventKind::Repeat => {
                    key_frame.insert(code.clone(), frame);
                    if code == KeyCode::Char(' ') {
                        state = fire_projectile(&state);
                    }
                }
                // Release: remove key immediately (keyboard-enhancement path)
                KeyEventKind::Release => {
                    key_frame.remove(&code);
                }
            }
        }

        // ── Held directional keys translate to a velocity ─────────────────────
        if state.phase == Phase::Playing {
            let left = is_held(&key_frame, &KeyCode::Left, frame);
            let right = is_held(&key_frame, &KeyCode::Right, frame);
            let dx = match (left, right) {
                (true, false) => -PLAYER_SPEED,
                (false, true) => PLAYER_SPEED,
                _ => 0,
            };
            if state.player.dx != dx {
                state = set_player_velocity(&state, dx);
            }
        }

        // ── Simulation tick, skipped entirely outside a round ─────────────────
        if state.phase == Phase::Playing {
            state = tick(&state);
        }

        // ── 1 Hz countdown off the same monotonic clock.  It fires in every
        //    phase; countdown_tick itself only acts while playing. ───────────
        while Instant::now() >= next_countdown {
            state = countdown_tick(&state);
            next_countdown += COUNTDOWN;
        }

        display::render(out, &state, &stars)?;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            thread::sleep(FRAME - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> std::io::Result<()> {
    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Ghostty / kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the driver loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        loop {
            match event::read() {
                Ok(ev) => {
                    if tx.send(ev).is_err() {
                        break; // receiver dropped → program exiting
                    }
                }
                Err(_) => break,
            }
        }
    });

    let result = run(&mut out, &rx);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}
