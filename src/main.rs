use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::sync::mpsc;
use std::thread;

use crossterm::{
    cursor,
    event::{self, Event, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    terminal, ExecutableCommand,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

use qship::clock::FrameClock;
use qship::display::TerminalSurface;
use qship::input::KeyTracker;
use qship::present::{self, Audio, LogAudio};
use qship::seed::{fetch_session_seed, SessionSeed, SimulatedDevice};
use qship::{Flow, GameConfig, GameError, Session};

fn init_logging(config: &GameConfig) -> Result<(), GameError> {
    let file = File::create(&config.log_file).map_err(|source| GameError::Log {
        path: config.log_file.clone(),
        source,
    })?;
    // The terminal is in raw mode on the alternate screen, so never stderr
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.log_filter.as_str()),
    )
    .target(env_logger::Target::Pipe(Box::new(file)))
    .init();
    Ok(())
}

// ── Game loop ─────────────────────────────────────────────────────────────────

fn run<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    config: GameConfig,
    seed: SessionSeed,
    keyboard_enhanced: bool,
) -> Result<(), GameError> {
    let mut surface = TerminalSurface::new(out, &config, &seed.cosmetic_id)?;
    let mut audio = LogAudio::default();
    let mut keys = KeyTracker::new(keyboard_enhanced);
    let mut clock = FrameClock::new(config.frame_period());
    let mut session = Session::new(config, seed, StdRng::from_entropy());

    if session.take_music_start() {
        audio.start_music();
    }

    loop {
        let now_ms = clock.tick();
        let input = keys.poll(rx, clock.frame());

        let flow = session.step(&input, now_ms);
        for event in session.drain_events() {
            audio.play(event);
        }
        present::render(&mut surface, &session)?;

        if flow == Flow::Quit {
            log::info!("quit requested after {} frames", clock.frame());
            return Ok(());
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<(), GameError> {
    let config = GameConfig::load()?;
    init_logging(&config)?;

    let seed = fetch_session_seed(&mut SimulatedDevice::new(StdRng::from_entropy()));

    let mut out = BufWriter::new(stdout());
    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(_) => break,
        }
    });

    let result = run(&mut out, &rx, config, seed, keyboard_enhanced);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    if let Err(e) = &result {
        log::error!("{e}");
    }
    result
}
