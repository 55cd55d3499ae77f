//! Terminal runner (default binary).
//!
//! Loads the run history, builds a game fed by it and drives the game from
//! crossterm input and a fixed-rate drop clock.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event};

use run_tetris::activity::{load_activities, run_sequence, Activity};
use run_tetris::config::{parse_args, Invocation, RunConfig, USAGE};
use run_tetris::core::{GameState, Sequencer};
use run_tetris::input::{handle_key_event, is_press, should_quit};
use run_tetris::logging;
use run_tetris::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use run_tetris::types::TICK_MS;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = match parse_args(&args, RunConfig::from_env())? {
        Invocation::Help => {
            println!("{}", USAGE);
            return Ok(());
        }
        Invocation::Play(config) => config,
    };

    if let Some(path) = &config.log_path {
        logging::init(path, config.log_level)?;
    }

    let game = build_game(&config)?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, game);

    // Always try to restore terminal state.
    let _ = term.exit();
    log::logger().flush();
    result
}

fn build_game(config: &RunConfig) -> Result<GameState<Activity>> {
    let requests = match &config.activities {
        Some(path) => run_sequence(&load_activities(path)?),
        None => Vec::new(),
    };
    if requests.is_empty() {
        log::info!("no runs loaded, using random pieces: seed={}", config.seed);
    } else {
        log::info!("piece sizes from runs: count={}", requests.len());
    }
    Ok(GameState::new(Sequencer::with_requests(requests, config.seed)))
}

fn run(term: &mut TerminalRenderer, mut game: GameState<Activity>) -> Result<()> {
    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);

    let tick_duration = Duration::from_millis(u64::from(TICK_MS));
    let mut last_tick = Instant::now();

    loop {
        // Render.
        let fallback = view.preferred_viewport();
        let (w, h) = crossterm::terminal::size().unwrap_or((fallback.width, fallback.height));
        view.render_into(&game.snapshot(), Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        // A hard-dropped piece has now been shown where it landed.
        if game.run_pending() {
            report_lock(&mut game);
            continue;
        }

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if is_press(&key) => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if let Some(action) = handle_key_event(key) {
                        log::trace!("input: {}", action.as_str());
                        game.apply_action(action);
                        report_lock(&mut game);
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        // Leave a scheduled lock for the next frame.
        if game.lock_pending() {
            continue;
        }

        // Tick.
        let elapsed = last_tick.elapsed();
        if elapsed >= tick_duration {
            last_tick = Instant::now();
            let ms = u32::try_from(elapsed.as_millis()).unwrap_or(u32::MAX);
            game.advance(ms);
            report_lock(&mut game);
        }
    }
}

fn report_lock(game: &mut GameState<Activity>) {
    let Some(event) = game.take_last_event() else {
        return;
    };
    if event.game_over {
        log::info!(
            "final: episode={} pieces={} score={} lines={} level={}",
            game.episode_id(),
            game.piece_id(),
            game.score(),
            game.lines(),
            game.level()
        );
        return;
    }
    if event.level_up {
        log::debug!("gravity now {}ms per row", game.drop_interval_ms());
    }
    if let Some(run) = game.token() {
        log::debug!("next run: name={:?} km={:.2}", run.name, run.distance / 1000.0);
    }
}
