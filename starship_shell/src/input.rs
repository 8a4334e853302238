//! Turning typed lines into choices and combat actions.

use game_rules::CombatAction;
use narrative_core::{ChoiceId, CombatView, SceneView};

use crate::error::{Result, ShellError};

/// What the player asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command<T> {
    Pick(T),
    Quit,
}

fn is_quit(input: &str) -> bool {
    matches!(input.to_ascii_lowercase().as_str(), "q" | "quit" | "exit")
}

/// Match a line against the choices a scene offers, ignoring case.
pub fn parse_choice(line: &str, view: &SceneView) -> Result<Command<ChoiceId>> {
    let input = line.trim();
    if is_quit(input) {
        return Ok(Command::Quit);
    }

    view.choices
        .iter()
        .find(|choice| choice.id.as_str().eq_ignore_ascii_case(input))
        .map(|choice| Command::Pick(choice.id.clone()))
        .ok_or_else(|| invalid(input, view.choices.iter().map(|c| c.id.as_str())))
}

/// Match a line against the combat menu, ignoring case.
pub fn parse_action(line: &str, view: &CombatView) -> Result<Command<CombatAction>> {
    let input = line.trim();
    if is_quit(input) {
        return Ok(Command::Quit);
    }

    view.actions
        .iter()
        .find(|option| option.key.as_str().eq_ignore_ascii_case(input))
        .map(|option| Command::Pick(option.action))
        .ok_or_else(|| invalid(input, view.actions.iter().map(|o| o.key.as_str())))
}

/// Yes unless the answer starts with something other than `y`.
pub fn parse_yes(line: &str) -> bool {
    line.trim().to_ascii_lowercase().starts_with('y')
}

fn invalid<'a>(input: &str, keys: impl Iterator<Item = &'a str>) -> ShellError {
    let keys: Vec<_> = keys.collect();
    if input.is_empty() {
        ShellError::InvalidInput(format!("Please enter one of: {}", keys.join(", ")))
    } else {
        ShellError::InvalidInput(format!(
            "'{input}' is not an option. Please enter one of: {}",
            keys.join(", ")
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_rules::MaxRoller;
    use narrative_core::{Session, Story, StoryKind, View};
    use std::sync::Arc;

    fn session(kind: StoryKind) -> Session {
        let story = Arc::new(Story::with_defaults(kind));
        Session::start(story, None, Box::new(MaxRoller::new())).unwrap()
    }

    #[test]
    fn test_parse_choice_ignores_case_and_space() {
        let view = session(StoryKind::Abyss).describe_current().unwrap();
        assert_eq!(
            parse_choice(" f \n", &view).unwrap(),
            Command::Pick(ChoiceId::from("F"))
        );
        assert_eq!(parse_choice("quit", &view).unwrap(), Command::Quit);
    }

    #[test]
    fn test_parse_choice_rejects_unknown() {
        let view = session(StoryKind::LostSector).describe_current().unwrap();
        let err = parse_choice("9", &view).unwrap_err();
        assert!(matches!(err, ShellError::InvalidInput(_)));
        assert!(err.to_string().contains("1, 2, 3"));
        assert!(parse_choice("", &view).is_err());
    }

    #[test]
    fn test_parse_action() {
        let mut session = session(StoryKind::Abyss);
        let View::Combat(view) = session.choose(&ChoiceId::from("R")).unwrap() else {
            panic!("expected combat");
        };

        assert_eq!(
            parse_action("r", &view).unwrap(),
            Command::Pick(CombatAction::Escape)
        );
        assert!(parse_action("D", &view).is_err());
    }

    #[test]
    fn test_parse_yes() {
        assert!(parse_yes("Y"));
        assert!(parse_yes("yes"));
        assert!(!parse_yes("n"));
        assert!(!parse_yes(""));
    }
}
