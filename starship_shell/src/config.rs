//! Shell settings from command-line arguments and environment variables.

use clap::Parser;
use game_rules::{DamageRoller, RandRoller, RulesFile};
use narrative_core::StoryKind;
use std::path::PathBuf;

use crate::error::Result;

/// Play a starship text adventure in the terminal.
#[derive(Debug, Clone, PartialEq, Eq, Parser)]
#[command(name = "starship", version)]
pub struct ShellConfig {
    /// Narrative to play: lost-sector or abyss
    #[arg(env = "STARSHIP_STORY", default_value = "lost-sector")]
    pub story: StoryKind,

    /// Captain's name; asked for interactively when omitted
    #[arg(long, env = "STARSHIP_CAPTAIN")]
    pub captain: Option<String>,

    /// Fixed RNG seed for reproducible runs
    #[arg(long, env = "STARSHIP_SEED")]
    pub seed: Option<u64>,

    /// TOML file overriding the combat presets
    #[arg(long = "rules", env = "STARSHIP_RULES")]
    pub rules_path: Option<PathBuf>,

    /// Emit views as JSON lines instead of text
    #[arg(long)]
    pub json: bool,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            story: StoryKind::LostSector,
            captain: None,
            seed: None,
            rules_path: None,
            json: false,
        }
    }
}

impl ShellConfig {
    /// Load the rules file, or the built-in presets when none is configured.
    pub fn load_rules(&self) -> Result<RulesFile> {
        match &self.rules_path {
            Some(path) => {
                let source = std::fs::read_to_string(path)?;
                Ok(RulesFile::from_toml_str(&source)?)
            }
            None => Ok(RulesFile::default()),
        }
    }

    /// A fresh roller; seeded when a seed is configured.
    pub fn roller(&self) -> Box<dyn DamageRoller> {
        match self.seed {
            Some(seed) => Box::new(RandRoller::seeded(seed)),
            None => Box::new(RandRoller::from_entropy()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ShellError;
    use clap::error::ErrorKind;
    use std::io::Write;

    fn parse(args: &[&str]) -> std::result::Result<ShellConfig, clap::Error> {
        ShellConfig::try_parse_from(std::iter::once("starship").chain(args.iter().copied()))
    }

    #[test]
    fn test_arguments() {
        let config = parse(&["abyss", "--captain", "Vega", "--seed=42", "--json"]).unwrap();

        assert_eq!(config.story, StoryKind::Abyss);
        assert_eq!(config.captain.as_deref(), Some("Vega"));
        assert_eq!(config.seed, Some(42));
        assert!(config.json);
    }

    // The only test touching STARSHIP_* variables, so parallel tests never see them.
    #[test]
    fn test_environment_fallback_and_precedence() {
        let config = parse(&[]).unwrap();
        assert_eq!(config, ShellConfig::default());

        std::env::set_var("STARSHIP_STORY", "abyss");
        std::env::set_var("STARSHIP_SEED", "7");
        let from_env = parse(&[]);
        let overridden = parse(&["lost-sector", "--seed", "9"]);
        std::env::remove_var("STARSHIP_STORY");
        std::env::remove_var("STARSHIP_SEED");

        let from_env = from_env.unwrap();
        assert_eq!(from_env.story, StoryKind::Abyss);
        assert_eq!(from_env.seed, Some(7));

        let overridden = overridden.unwrap();
        assert_eq!(overridden.story, StoryKind::LostSector);
        assert_eq!(overridden.seed, Some(9));
    }

    #[test]
    fn test_bad_arguments() {
        assert_eq!(
            parse(&["--seed", "many"]).unwrap_err().kind(),
            ErrorKind::ValueValidation
        );
        assert_eq!(
            parse(&["--captain"]).unwrap_err().kind(),
            ErrorKind::InvalidValue
        );
        assert_eq!(
            parse(&["--warp"]).unwrap_err().kind(),
            ErrorKind::UnknownArgument
        );
        assert_eq!(
            parse(&["nebula"]).unwrap_err().kind(),
            ErrorKind::ValueValidation
        );
        assert_eq!(parse(&["--help"]).unwrap_err().kind(), ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_missing_rules_file_uses_presets() {
        let rules = ShellConfig::default().load_rules().unwrap();
        assert_eq!(rules, RulesFile::default());
    }

    #[test]
    fn test_load_rules_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
            [abyss]
            enemy_hp = 60
            attack = {{ min = 12, max = 20 }}
            enemy_attack = {{ min = 5, max = 15 }}
            heal_amount = 30
            "#
        )
        .unwrap();

        let config = parse(&["--rules", file.path().to_str().unwrap()]).unwrap();
        let rules = config.load_rules().unwrap();

        assert_eq!(rules.abyss_rules().enemy_hp, 60);
        assert!(rules.abyss_rules().escape.is_none());
        assert_eq!(rules.lost_sector_rules(), game_rules::CombatRules::lost_sector());
    }

    #[test]
    fn test_load_rules_reports_bad_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[lost_sector\nenemy_hp = ").unwrap();

        let config = ShellConfig {
            rules_path: Some(file.path().to_path_buf()),
            ..ShellConfig::default()
        };
        assert!(matches!(config.load_rules(), Err(ShellError::Rules(_))));

        let missing = ShellConfig {
            rules_path: Some(file.path().with_extension("absent")),
            ..ShellConfig::default()
        };
        assert!(matches!(missing.load_rules(), Err(ShellError::Io(_))));
    }
}
