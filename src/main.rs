#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![cfg_attr(coverage_nightly, coverage(off))]

//! Headless driver: plays the room from line commands on stdin.
//!
//! ```text
//! tap <x> <y>     quick touch at a screen point
//! look <x> <y>    long press at a screen point
//! wait <seconds>  let frames run
//! stop            halt the player
//! reset           wipe saved progress
//! state           print the current frame snapshot
//! quit
//! ```

use std::io::{self, BufRead, Write};

use anyhow::{anyhow, bail, Context, Result};
use glam::Vec2;
use pointclick::{config::Config, constants::LOOP_TIME, events::GameCommand, game::Game, logging};
use tracing::{info, warn};

/// How long a "look" press is held, in seconds.
const LOOK_HOLD: f64 = 0.5;
/// How long a "tap" press is held, in seconds.
const TAP_HOLD: f64 = 0.05;

struct Driver {
    game: Game,
    clock: f64,
    next_touch: u64,
}

impl Driver {
    fn new(game: Game) -> Self {
        Self {
            game,
            clock: 0.0,
            next_touch: 0,
        }
    }

    /// Advances one frame; returns true once the game asked to exit.
    fn frame(&mut self) -> bool {
        let dt = LOOP_TIME.as_secs_f32();
        self.clock += LOOP_TIME.as_secs_f64();
        self.game.tick(dt)
    }

    fn run_for(&mut self, seconds: f64) -> bool {
        let frames = (seconds / LOOP_TIME.as_secs_f64()).ceil().max(1.0) as u64;
        (0..frames).any(|_| self.frame())
    }

    fn press(&mut self, point: Vec2, hold: f64) -> bool {
        let id = self.next_touch;
        self.next_touch += 1;

        self.game.touch_down(id, self.clock);
        self.game.touch_up(id, self.clock + hold, point);
        self.clock += hold;
        self.frame()
    }

    fn print_state(&mut self, out: &mut impl Write) -> Result<()> {
        let snapshot = self.game.snapshot()?;
        let items: Vec<&str> = snapshot.slots.iter().flatten().map(|slot| slot.item_id).collect();
        writeln!(
            out,
            "player=({:.1},{:.1}) facing={} motion={} animation={} frame={} camera=({:.1},{:.1}) items=[{}] selected={:?} door_unlocked={} key_found={} locked={} caption={:?}",
            snapshot.player_position.x,
            snapshot.player_position.y,
            snapshot.facing.as_ref(),
            snapshot.motion.as_ref(),
            snapshot.animation.as_ref(),
            snapshot.frame.as_deref().unwrap_or("-"),
            snapshot.camera.x,
            snapshot.camera.y,
            items.join(","),
            snapshot.selected_slot,
            snapshot.door_unlocked,
            snapshot.key_found,
            snapshot.interaction_locked,
            snapshot.caption.as_deref().unwrap_or(""),
        )?;
        Ok(())
    }

    /// Runs one command line; returns true when the session should end.
    fn execute(&mut self, line: &str, out: &mut impl Write) -> Result<bool> {
        let mut words = line.split_whitespace();
        let Some(command) = words.next() else {
            return Ok(false);
        };
        let args: Vec<&str> = words.collect();

        let exit = match command {
            "tap" => {
                let point = parse_point(&args)?;
                self.press(point, TAP_HOLD)
            }
            "look" => {
                let point = parse_point(&args)?;
                self.press(point, LOOK_HOLD)
            }
            "wait" => {
                let seconds: f64 = single_arg(&args)?.parse().context("wait expects seconds")?;
                self.run_for(seconds)
            }
            "stop" => {
                self.game.command(GameCommand::StopPlayer);
                self.frame()
            }
            "reset" => {
                self.game.command(GameCommand::ResetProgress);
                self.frame()
            }
            "state" => {
                self.print_state(out)?;
                false
            }
            "quit" | "exit" => {
                self.game.command(GameCommand::Exit);
                self.frame()
            }
            other => bail!("Unknown command: {other}"),
        };
        Ok(exit)
    }
}

fn single_arg<'a>(args: &[&'a str]) -> Result<&'a str> {
    match args {
        [value] => Ok(*value),
        _ => Err(anyhow!("Expected exactly one argument, got {}", args.len())),
    }
}

fn parse_point(args: &[&str]) -> Result<Vec2> {
    match args {
        [x, y] => Ok(Vec2::new(
            x.parse().context("Invalid x coordinate")?,
            y.parse().context("Invalid y coordinate")?,
        )),
        _ => bail!("Expected <x> <y>, got {} arguments", args.len()),
    }
}

pub fn main() -> Result<()> {
    logging::setup_logging();

    let config = Config::load().context("Failed to load configuration")?;
    info!(save_path = %config.save_path.display(), "Starting room");

    let game = Game::new(&config).context("Failed to build the room")?;
    let mut driver = Driver::new(game);
    // Let the welcome caption and initial inventory settle.
    driver.frame();

    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    for line in stdin.lock().lines() {
        let line = line.context("Failed to read command")?;
        match driver.execute(line.trim(), &mut stdout) {
            Ok(true) => break,
            Ok(false) => {}
            Err(e) => warn!(command = line.trim(), error = %e, "Command rejected"),
        }
        stdout.flush()?;
    }

    info!("Exiting");
    Ok(())
}
