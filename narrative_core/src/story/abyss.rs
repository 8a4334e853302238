//! Protocol: Abyss - a hub-and-spoke escape from a failing ship.

use game_rules::{items, Capability, CombatAction, CombatRules, SURVIVAL_THRESHOLD};

use super::{Story, StoryKind};
use crate::encounter::{Aftermath, Encounter, EncounterId};
use crate::ending::{Ending, EndingId};
use crate::scene::{Choice, Destination, Effect, Guard, Scene, SceneId};

const VITALS_CEASED: &str = "Vital signs ceased. Mission Failed.";

pub(super) fn build(rules: CombatRules) -> Story {
    Story::new(StoryKind::Abyss, "PROTOCOL: ABYSS", SceneId::CentralHub)
        .prologue_line("INITIALIZING PROTOCOL: ABYSS...")
        .prologue_line("You wake up. The air is cold.")
        .prologue_line("The siren is blaring: 'CRITICAL FAILURE. EVACUATE.'")
        .fatal_reason(VITALS_CEASED)
        .add_scene(central_hub())
        .add_scene(bridge())
        .add_scene(armory())
        .add_scene(escape_pods())
        .add_encounter(void_crawler(rules))
        .add_ending(
            Ending::new(EndingId::MissionSuccess, "MISSION SUCCESS", true)
                .line("Pod launched. Trajectory stable. You are going home."),
        )
        .add_ending(
            Ending::new(EndingId::MissionSuccessBarely, "MISSION SUCCESS (Barely)", true)
                .line("By some miracle, you found a trade route. You survived."),
        )
        .add_ending(Ending::new(EndingId::GameOver, "GAME OVER", false).line("{reason}"))
}

fn central_hub() -> Scene {
    Scene::new(SceneId::CentralHub)
        .titled("--- CENTRAL HUB ---")
        .beat("You stand in the flickering light of the central corridor.")
        .beat("To the LEFT is the Bridge (Control).")
        .beat("To the RIGHT is the Armory (Danger detected).")
        .beat("FORWARD leads to Escape Pods.")
        .prompt("Choose an action:")
        .choice(Choice::new("L", "Go to Bridge", Destination::Scene(SceneId::Bridge)))
        .choice(
            Choice::new(
                "R",
                "Go to Armory",
                Destination::Combat(EncounterId::VoidCrawler),
            )
            .narrate("--- SECTOR 4: ARMORY ---")
            .narrate("It's dark. Something is moving in the shadows."),
        )
        .choice(Choice::new(
            "F",
            "Go to Escape Pods",
            Destination::Scene(SceneId::EscapePods),
        ))
        .choice(Choice::new(
            "I",
            "Check Inventory/Status",
            Destination::Scene(SceneId::CentralHub),
        ))
}

fn bridge() -> Scene {
    let keycard = Guard::Has(Capability::BlueKeycard);
    let chip = Guard::has_item(items::NAVIGATION_CHIP);

    Scene::new(SceneId::Bridge)
        .titled("--- SECTOR 1: THE BRIDGE ---")
        .beat("The Captain's chair is empty. A console blinks amber.")
        .beat_if(keycard.clone(), "You use the keycard to unlock the secure safe.")
        .beat_if(
            Guard::All(vec![keycard.clone(), Guard::Not(Box::new(chip.clone()))]),
            "Acquired: Navigation Chip",
        )
        .beat_if(
            Guard::All(vec![keycard.clone(), chip]),
            "Empty. You already looted this.",
        )
        .beat_if(
            Guard::lacks(Capability::BlueKeycard),
            "There is a secure safe here. It requires a BLUE KEYCARD.",
        )
        .on_enter(Effect::when(keycard, Effect::add_item(items::NAVIGATION_CHIP)))
        .prompt("Choose an action:")
        .choice(Choice::new("B", "Back to Hub", Destination::Scene(SceneId::CentralHub)))
}

fn armory() -> Scene {
    Scene::new(SceneId::Armory)
        .titled("--- SECTOR 4: ARMORY ---")
        .beat("The shadows are still.")
        .prompt("Choose an action:")
        .choice(Choice::new("B", "Back to Hub", Destination::Scene(SceneId::CentralHub)))
}

fn escape_pods() -> Scene {
    let navigation = Guard::Has(Capability::Navigation);
    let lost = Guard::lacks(Capability::Navigation);

    Scene::new(SceneId::EscapePods)
        .titled("--- SECTOR 9: ESCAPE PODS ---")
        .beat("You reach the escape pods. One is active.")
        .beat_if(
            navigation.clone(),
            "You insert the Navigation Chip. The pod coordinates lock onto Earth.",
        )
        .beat_if(lost.clone(), "WARNING: Navigation Drive Missing.")
        .beat_if(
            lost.clone(),
            "Launching now will result in random hyperspace trajectory.",
        )
        .prompt("Choose an action:")
        .choice(
            Choice::new("L", "Launch Pod", Destination::Ending(EndingId::MissionSuccess))
                .when(navigation),
        )
        .choice(
            Choice::new(
                "L",
                "Launch Anyway (50% Survival Chance)",
                Destination::gamble(
                    SURVIVAL_THRESHOLD,
                    Destination::Ending(EndingId::MissionSuccessBarely),
                    Destination::game_over("The pod drifts into a black hole. No signal remains."),
                ),
            )
            .when(lost.clone()),
        )
        .choice(
            Choice::new(
                "R",
                "Return to search ship",
                Destination::Scene(SceneId::CentralHub),
            )
            .when(lost),
        )
}

fn void_crawler(rules: CombatRules) -> Encounter {
    let heal = format!("Heal (+{} HP)", rules.heal_amount);

    Encounter::new(
        EncounterId::VoidCrawler,
        "Void Crawler",
        rules,
        Aftermath::new(Destination::Scene(SceneId::Armory))
            .narrate("Target eliminated.")
            .narrate("Acquired: Alien Sludge (Trophy)")
            .narrate("Searching the room, you find a corpse clutching a pass.")
            .narrate("Acquired: BLUE KEYCARD")
            .effect(Effect::add_item(items::ALIEN_SLUDGE))
            .effect(Effect::GrantKeycard),
        VITALS_CEASED,
    )
    .intro("!!! ALERT: VOID CRAWLER DETECTED !!!")
    .action("A", CombatAction::Attack, "Attack with Plasma Wrench")
    .action("D", CombatAction::Defend, "Brace behind a crate")
    .action("H", CombatAction::Heal, heal)
    .action("R", CombatAction::Escape, "Run Away")
    .on_escape(
        Aftermath::new(Destination::Scene(SceneId::Armory))
            .narrate("You scrambled into the vent! You escaped, but took damage doing so."),
    )
}
