//! # Starship Shell
//!
//! Line-oriented terminal front end for the starship narratives. The shell
//! only translates typed input into session calls and renders the views the
//! session hands back; every rule lives in `narrative_core` and `game_rules`.

mod config;
mod error;
mod input;
mod render;

use anyhow::Context;
use clap::Parser;
use narrative_core::{Session, Story, StoryKind, View};
use std::io::{self, BufRead};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use config::ShellConfig;
use error::ShellError;
use input::Command;
use render::Renderer;

const DEFAULT_FILTER: &str = "starship_shell=info,narrative_core=warn,game_rules=warn";

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let config = ShellConfig::parse();
    let rules = config.load_rules().context("loading combat rules")?;
    let story = Arc::new(Story::build(config.story, &rules));
    story.validate().context("story graph is inconsistent")?;

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut out = Renderer::new(io::stdout(), config.json);

    let captain = match &config.captain {
        Some(name) => Some(name.clone()),
        None if config.json || !asks_for_captain(config.story) => None,
        None => {
            out.prompt("Enter your name, Captain:")?;
            lines.next().transpose()?
        }
    };

    let mut session = Session::start(story, captain, config.roller())?;
    info!(story = %config.story, seed = ?config.seed, "shell started");

    play(&mut session, &config, &mut lines, &mut out)?;

    info!(session = %session.id(), outcome = ?session.outcome(), "shell finished");
    Ok(())
}

/// Only The Lost Sector addresses the player by name.
fn asks_for_captain(story: StoryKind) -> bool {
    story == StoryKind::LostSector
}

/// Drive the session until the player quits or declines another run.
fn play<W: io::Write>(
    session: &mut Session,
    config: &ShellConfig,
    lines: &mut impl Iterator<Item = io::Result<String>>,
    out: &mut Renderer<W>,
) -> anyhow::Result<()> {
    let mut view = session.describe()?;

    loop {
        out.view(&view)?;

        view = match &view {
            View::Scene(scene) => match read(lines, out, |line| input::parse_choice(line, scene))? {
                Some(choice) => session.choose(&choice)?,
                None => return Ok(()),
            },
            View::Combat(combat) => match read(lines, out, |line| input::parse_action(line, combat))? {
                Some(action) => session.act(action)?,
                None => return Ok(()),
            },
            View::Ending(_) => {
                out.prompt("\nPlay again? (y/n)")?;
                match lines.next().transpose()? {
                    Some(answer) if input::parse_yes(&answer) => {
                        *session = session.restart(config.roller())?;
                        info!(session = %session.id(), "restarted");
                        session.describe()?
                    }
                    _ => return Ok(()),
                }
            }
        };
    }
}

/// Prompt until a line parses. `None` means the player quit or input ended.
fn read<T, W: io::Write>(
    lines: &mut impl Iterator<Item = io::Result<String>>,
    out: &mut Renderer<W>,
    parse: impl Fn(&str) -> Result<Command<T>, ShellError>,
) -> anyhow::Result<Option<T>> {
    loop {
        out.prompt(">")?;
        let Some(line) = lines.next().transpose()? else {
            return Ok(None);
        };

        match parse(&line) {
            Ok(Command::Pick(value)) => return Ok(Some(value)),
            Ok(Command::Quit) => return Ok(None),
            Err(ShellError::InvalidInput(message)) => {
                warn!(input = %line.trim(), "rejected input");
                out.notice(&message)?;
            }
            Err(err) => return Err(err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_rules::MaxRoller;
    use narrative_core::EndingId;

    fn scripted(input: &[&str]) -> impl Iterator<Item = io::Result<String>> {
        input
            .iter()
            .map(|s| Ok(s.to_string()))
            .collect::<Vec<_>>()
            .into_iter()
    }

    fn run(kind: StoryKind, input: &[&str]) -> (Session, String) {
        let story = Arc::new(Story::with_defaults(kind));
        let mut session = Session::start(story, None, Box::new(MaxRoller::new())).unwrap();
        let config = ShellConfig {
            story: kind,
            seed: Some(1),
            ..ShellConfig::default()
        };
        let mut out = Renderer::new(Vec::new(), false);

        play(&mut session, &config, &mut scripted(input), &mut out).unwrap();
        (session, String::from_utf8(out.into_inner()).unwrap())
    }

    #[test]
    fn test_play_to_ending() {
        let (session, text) = run(StoryKind::LostSector, &["2", "2"]);

        assert_eq!(session.outcome(), Some(EndingId::OneThatGotAway));
        assert!(text.contains("Play again?"));
    }

    #[test]
    fn test_invalid_input_reprompts() {
        let (session, text) = run(StoryKind::Abyss, &["x", "f", "l"]);

        assert!(text.contains("'x' is not an option"));
        assert!(session.is_over());
    }

    #[test]
    fn test_quit_mid_story() {
        let (session, _) = run(StoryKind::Abyss, &["q"]);
        assert!(!session.is_over());
    }

    #[test]
    fn test_captain_prompt_per_story() {
        assert!(asks_for_captain(StoryKind::LostSector));
        assert!(!asks_for_captain(StoryKind::Abyss));
    }

    #[test]
    fn test_play_again_restarts() {
        let (session, _) = run(StoryKind::LostSector, &["2", "2", "y"]);
        assert!(!session.is_over());
        assert_eq!(session.player().hp(), 100);
    }
}
