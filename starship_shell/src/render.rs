//! Plain-text and JSON-lines rendering of session views.

use game_rules::{CombatEvent, CombatOutcome, RoundReport};
use narrative_core::{CombatView, EndingView, PlayerSnapshot, SceneView, View};
use std::io::{self, Write};

const RULE: &str = "==================================================";

/// Writes views to a terminal-like sink.
pub struct Renderer<W: Write> {
    out: W,
    json: bool,
}

impl<W: Write> Renderer<W> {
    pub fn new(out: W, json: bool) -> Self {
        Self { out, json }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn view(&mut self, view: &View) -> io::Result<()> {
        if self.json {
            serde_json::to_writer(&mut self.out, view)?;
            writeln!(self.out)?;
            return self.out.flush();
        }

        match view {
            View::Scene(scene) => self.scene(scene)?,
            View::Combat(combat) => self.combat(combat)?,
            View::Ending(ending) => self.ending(ending)?,
        }
        self.out.flush()
    }

    /// A line outside any view, such as an input error or a question.
    pub fn notice(&mut self, line: &str) -> io::Result<()> {
        if self.json {
            serde_json::to_writer(&mut self.out, &serde_json::json!({ "notice": line }))?;
            writeln!(self.out)?;
        } else {
            writeln!(self.out, "{line}")?;
        }
        self.out.flush()
    }

    pub fn prompt(&mut self, text: &str) -> io::Result<()> {
        if !self.json {
            write!(self.out, "{text} ")?;
        }
        self.out.flush()
    }

    fn scene(&mut self, view: &SceneView) -> io::Result<()> {
        self.aftermath(view.last_round.as_ref(), &view.narration)?;

        if let Some(title) = &view.title {
            writeln!(self.out, "\n{RULE}\n{title}\n{RULE}")?;
        }
        for beat in &view.beats {
            writeln!(self.out, "{beat}")?;
        }
        self.status(&view.player)?;

        if let Some(prompt) = &view.prompt {
            writeln!(self.out, "\n{prompt}")?;
        }
        for choice in &view.choices {
            writeln!(self.out, "{}. {}", choice.id, choice.label)?;
        }
        Ok(())
    }

    fn combat(&mut self, view: &CombatView) -> io::Result<()> {
        for line in &view.narration {
            writeln!(self.out, "{line}")?;
        }
        if let Some(report) = &view.last_round {
            self.round(report)?;
        } else {
            writeln!(self.out, "\n--- COMBAT: {} ---", view.enemy.to_uppercase())?;
        }

        writeln!(
            self.out,
            "\nYour HP: {}/{} | {} HP: {}/{}",
            view.player.hp, view.player.max_hp, view.enemy, view.enemy_hp, view.enemy_max_hp
        )?;
        for option in &view.actions {
            writeln!(self.out, "{}. {}", option.key, option.label)?;
        }
        Ok(())
    }

    fn ending(&mut self, view: &EndingView) -> io::Result<()> {
        self.aftermath(view.last_round.as_ref(), &view.narration)?;

        writeln!(self.out, "\n{RULE}\n{}\n{RULE}", view.title)?;
        for line in &view.lines {
            writeln!(self.out, "{line}")?;
        }
        self.status(&view.player)?;
        writeln!(
            self.out,
            "\n{}",
            if view.success { "MISSION COMPLETE" } else { "GAME OVER" }
        )
    }

    fn aftermath(&mut self, report: Option<&RoundReport>, narration: &[String]) -> io::Result<()> {
        if let Some(report) = report {
            self.round(report)?;
            if let Some(line) = outcome_line(report.outcome) {
                writeln!(self.out, "{line}")?;
            }
        }
        for line in narration {
            writeln!(self.out, "{line}")?;
        }
        Ok(())
    }

    fn round(&mut self, report: &RoundReport) -> io::Result<()> {
        writeln!(self.out, "\n-- Round {} --", report.round)?;
        for event in &report.events {
            writeln!(self.out, "{}", event_line(event))?;
        }
        Ok(())
    }

    fn status(&mut self, player: &PlayerSnapshot) -> io::Result<()> {
        let captain = match &player.captain {
            Some(name) => format!("Captain {name}"),
            None => "Captain".to_string(),
        };
        writeln!(
            self.out,
            "\n[{captain} | HP: {}/{} | Energy: {}]",
            player.hp, player.max_hp, player.energy
        )?;
        if !player.inventory.is_empty() {
            writeln!(self.out, "Inventory: {}", player.inventory.join(", "))?;
        }
        if !player.crew.is_empty() {
            writeln!(self.out, "Crew: {}", player.crew.join(", "))?;
        }
        if player.keycard {
            writeln!(self.out, "Keycard: Blue")?;
        }
        Ok(())
    }
}

fn event_line(event: &CombatEvent) -> String {
    match event {
        CombatEvent::PlayerStruck { damage, enemy_hp } => {
            format!("You deal {damage} damage! (enemy HP: {enemy_hp})")
        }
        CombatEvent::PlayerHealed { amount, restored } if restored < amount => {
            format!("You repair {restored} HP (already near full strength).")
        }
        CombatEvent::PlayerHealed { restored, .. } => format!("You repair {restored} HP."),
        CombatEvent::PlayerDefended => "You brace for impact.".to_string(),
        CombatEvent::EnemyStruck {
            damage,
            reduced: true,
            player_hp,
        } => format!("The enemy hits your shields for {damage} damage. (HP: {player_hp})"),
        CombatEvent::EnemyStruck {
            damage, player_hp, ..
        } => format!("The enemy hits you for {damage} damage! (HP: {player_hp})"),
        CombatEvent::EscapeFailed { roll } => {
            format!("You try to run, but the way is blocked. (rolled {roll})")
        }
        CombatEvent::Escaped {
            roll,
            penalty,
            player_hp,
        } => format!("You got away, taking {penalty} damage on the way out. (rolled {roll}, HP: {player_hp})"),
    }
}

fn outcome_line(outcome: CombatOutcome) -> Option<&'static str> {
    match outcome {
        CombatOutcome::Victory => Some("The enemy is destroyed!"),
        CombatOutcome::Defeat => Some("You have been defeated."),
        CombatOutcome::Escaped => Some("You escaped the fight."),
        CombatOutcome::Ongoing => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_rules::{CombatAction, MaxRoller};
    use narrative_core::{ChoiceId, Session, Story, StoryKind};
    use std::sync::Arc;

    fn render(view: &View, json: bool) -> String {
        let mut renderer = Renderer::new(Vec::new(), json);
        renderer.view(view).unwrap();
        String::from_utf8(renderer.into_inner()).unwrap()
    }

    fn session(kind: StoryKind) -> Session {
        let story = Arc::new(Story::with_defaults(kind));
        Session::start(story, Some("Vega".into()), Box::new(MaxRoller::new())).unwrap()
    }

    #[test]
    fn test_scene_text() {
        let view = session(StoryKind::LostSector).describe().unwrap();
        let text = render(&view, false);

        assert!(text.contains("Captain Vega | HP: 100/100 | Energy: 50"));
        assert!(text.contains("1. "));
        assert!(text.contains("3. "));
    }

    #[test]
    fn test_combat_round_text() {
        let mut session = session(StoryKind::LostSector);
        session.choose(&ChoiceId::from("1")).unwrap();
        session.choose(&ChoiceId::from("2")).unwrap();
        let view = session.act(CombatAction::Attack).unwrap();
        let text = render(&view, false);

        assert!(text.contains("-- Round 1 --"));
        assert!(text.contains("You deal 30 damage! (enemy HP: 20)"));
        assert!(text.contains("The enemy hits you for 25 damage! (HP: 75)"));
    }

    #[test]
    fn test_json_lines() {
        let view = session(StoryKind::Abyss).describe().unwrap();
        let line = render(&view, true);

        assert_eq!(line.lines().count(), 1);
        let value: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(value["view"], "scene");
        assert_eq!(value["player"]["hp"], 100);
    }

    #[test]
    fn test_notice_json() {
        let mut renderer = Renderer::new(Vec::new(), true);
        renderer.notice("try again").unwrap();
        let out = String::from_utf8(renderer.into_inner()).unwrap();
        assert_eq!(out.trim(), r#"{"notice":"try again"}"#);
    }

    #[test]
    fn test_event_lines() {
        assert_eq!(
            event_line(&CombatEvent::PlayerHealed { amount: 25, restored: 10 }),
            "You repair 10 HP (already near full strength)."
        );
        assert_eq!(
            event_line(&CombatEvent::EscapeFailed { roll: 3 }),
            "You try to run, but the way is blocked. (rolled 3)"
        );
    }
}
