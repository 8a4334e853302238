//! Ending Resolver - terminal scenes and their closing text.

use serde::{Deserialize, Serialize};

/// Every ending across both stories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndingId {
    // The Lost Sector
    Explorer,
    Scientist,
    Diplomat,
    CautiousCommander,
    OneThatGotAway,
    EndlessSearch,

    // Protocol Abyss
    MissionSuccess,
    MissionSuccessBarely,

    GameOver,
}

/// Placeholder replaced with the captain's form of address.
pub const CAPTAIN: &str = "{captain}";
/// Placeholder replaced with the game-over reason.
pub const REASON: &str = "{reason}";

/// Fixed payload for a terminal scene.
#[derive(Debug, Clone)]
pub struct Ending {
    pub id: EndingId,
    pub title: String,
    lines: Vec<String>,
    pub success: bool,
}

impl Ending {
    pub fn new(id: EndingId, title: impl Into<String>, success: bool) -> Self {
        Self {
            id,
            title: title.into(),
            lines: Vec::new(),
            success,
        }
    }

    /// Add a closing line. May contain `{captain}` and `{reason}`.
    pub fn line(mut self, line: impl Into<String>) -> Self {
        self.lines.push(line.into());
        self
    }

    /// Closing lines with placeholders filled in.
    pub fn render(&self, captain: Option<&str>, reason: Option<&str>) -> Vec<String> {
        let address = match captain {
            Some(name) => format!("Captain {name}"),
            None => "Captain".to_string(),
        };
        self.lines
            .iter()
            .map(|line| {
                line.replace(CAPTAIN, &address)
                    .replace(REASON, reason.unwrap_or_default())
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_with_captain() {
        let ending = Ending::new(EndingId::Explorer, "THE EXPLORER", true)
            .line("You step through the gateway.")
            .line("{captain}, your journey has just begun...");

        let lines = ending.render(Some("Vega"), None);
        assert_eq!(lines[1], "Captain Vega, your journey has just begun...");

        let lines = ending.render(None, None);
        assert_eq!(lines[1], "Captain, your journey has just begun...");
    }

    #[test]
    fn test_render_reason() {
        let ending = Ending::new(EndingId::GameOver, "GAME OVER", false).line("{reason}");
        let lines = ending.render(None, Some("The droid overwhelmed you..."));
        assert_eq!(lines, vec!["The droid overwhelmed you...".to_string()]);
        assert!(!ending.success);
    }
}
