//! TideSweepers entry point
//!
//! Headless demo driver: runs the fixed-tick simulation with a small
//! autopilot and prints the radio feed. Graphical frontends sit on the
//! `Rasterizer`/`GameInput` boundary instead of this loop.
//!
//! Usage: tidesweepers [--seed N] [--frames N] [--dump-state]

use glam::Vec2;

use tidesweepers::config::{LitterTable, SpeciesTable};
use tidesweepers::consts::*;
use tidesweepers::render::TextureId;
use tidesweepers::{Game, GameInput, GameOutcome};

struct Args {
    seed: u64,
    frames: u32,
    dump_state: bool,
}

fn parse_args() -> Args {
    let mut args = Args {
        seed: 42,
        frames: 20_000,
        dump_state: false,
    };
    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--seed" => {
                if let Some(v) = iter.next().and_then(|v| v.parse().ok()) {
                    args.seed = v;
                }
            }
            "--frames" => {
                if let Some(v) = iter.next().and_then(|v| v.parse().ok()) {
                    args.frames = v;
                }
            }
            "--dump-state" => args.dump_state = true,
            other => {
                eprintln!("unknown argument: {other}");
                std::process::exit(2);
            }
        }
    }
    args
}

/// Steer toward the nearest active litter; pulse when wildlife gets close.
fn autopilot(game: &Game) -> GameInput {
    let sub = game.submarine.center();

    let mut input = GameInput::default();
    input.calm = game
        .level
        .enemy_items()
        .iter()
        .filter(|e| e.active && !e.calmed)
        .any(|e| e.center().distance(sub) < 120.0);

    let target: Option<Vec2> = game
        .level
        .litter_items()
        .iter()
        .filter(|item| item.active && item.pos.x > 0.0)
        .map(|item| item.rect().center())
        .min_by(|a, b| {
            a.distance(sub)
                .partial_cmp(&b.distance(sub))
                .unwrap_or(std::cmp::Ordering::Equal)
        });

    if let Some(target) = target {
        input.dx = (target.x - sub.x).signum() as i32;
        input.dy = (target.y - sub.y).signum() as i32;
    }
    input
}

fn main() {
    env_logger::init();
    let args = parse_args();

    let mut game = Game::new(
        SpeciesTable::defaults(),
        LitterTable::defaults(),
        TextureId(99),
        args.seed,
    );
    game.set_oil_texture(TextureId(100));

    println!("TideSweepers demo (seed {}, up to {} frames)", args.seed, args.frames);

    let mut outcome = GameOutcome::Playing;
    let mut frame = 0;
    while frame < args.frames {
        let input = autopilot(&game);
        outcome = game.advance(&input);

        while let Some(msg) = game.outbox.pop() {
            println!("[{:>6}] {:?}: {}", frame, msg.style, msg.text);
        }
        if let Some(banner) = game.story.banner() {
            if banner.visible && frame % FRAME_RATE as u32 == 0 {
                println!("[{frame:>6}] === {} ===", banner.text);
            }
        }

        if outcome != GameOutcome::Playing {
            break;
        }
        frame += 1;
    }

    println!(
        "finished after {frame} frames: {outcome:?}, level {}, score {}, {} lives left",
        game.scoreboard.level(),
        game.scoreboard.score(),
        game.lives,
    );

    if args.dump_state {
        match serde_json::to_string_pretty(&game.level) {
            Ok(json) => println!("{json}"),
            Err(err) => eprintln!("state dump failed: {err}"),
        }
    }
}
