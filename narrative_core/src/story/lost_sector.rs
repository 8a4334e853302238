//! Starship Odyssey: The Lost Sector.

use game_rules::{crew, items, Capability, CombatAction, CombatRules};

use super::{Story, StoryKind};
use crate::encounter::{Aftermath, Encounter, EncounterId};
use crate::ending::{Ending, EndingId};
use crate::scene::{Choice, Destination, Effect, Guard, Scene, SceneId};

const BANNER: &str = "==================================================";

pub(super) fn build(rules: CombatRules) -> Story {
    Story::new(
        StoryKind::LostSector,
        "STARSHIP ODYSSEY: The Lost Sector",
        SceneId::DistressSignal,
    )
    .prologue_line(BANNER)
    .prologue_line("STARSHIP ODYSSEY: The Lost Sector")
    .prologue_line(BANNER)
    .prologue_line("Year 2347. Humanity has reached the stars...")
    .prologue_line("Your ship, the USS Wanderer, has detected a mysterious signal")
    .prologue_line("from Sector X-9, a region marked as 'Lost' on all star charts.")
    .fatal_reason("Your ship could not withstand the punishment...")
    .add_scene(distress_signal())
    .add_scene(investigate_ship())
    .add_scene(probe_scan())
    .add_scene(alien_encounter())
    .add_scene(ancient_artifact())
    .add_scene(signal_source())
    .add_scene(gateway())
    .add_encounter(security_droid(rules))
    .add_ending(
        Ending::new(EndingId::Explorer, "ENDING: THE EXPLORER", true)
            .line("You step through the gateway. Light surrounds you...")
            .line("On the other side, a new galaxy awaits.")
            .line("Your name will be remembered as the first to traverse the Lost Sector.")
            .line("{captain}, your journey has just begun..."),
    )
    .add_ending(
        Ending::new(EndingId::Scientist, "ENDING: THE SCIENTIST", true)
            .line("You collect invaluable data and return home.")
            .line("Your discoveries advance human understanding by centuries.")
            .line("The gateway remains, waiting for humanity to be ready.")
            .line("{captain}, you have enlightened humanity!"),
    )
    .add_ending(
        Ending::new(EndingId::Diplomat, "ENDING: THE DIPLOMAT", true)
            .line("You call for humanity to witness this moment together.")
            .line("The gateway becomes a symbol of unity and exploration.")
            .line("A new era of cooperation begins among the stars.")
            .line("{captain}, you have united humanity!"),
    )
    .add_ending(
        Ending::new(EndingId::CautiousCommander, "ENDING: THE CAUTIOUS COMMANDER", true)
            .line("You play it safe. The artifact is studied by experts.")
            .line("Your career is stable, but you'll always wonder...")
            .line("What mysteries lay beyond that signal?")
            .line("{captain}, you survived, but at what cost?"),
    )
    .add_ending(
        Ending::new(EndingId::OneThatGotAway, "ENDING: THE ONE THAT GOT AWAY", true)
            .line("The signal vanishes before you can investigate.")
            .line("The mystery of Sector X-9 remains unsolved.")
            .line("Perhaps some secrets are meant to stay hidden...")
            .line("{captain}, the stars keep their secrets."),
    )
    .add_ending(
        Ending::new(EndingId::EndlessSearch, "ENDING: THE ENDLESS SEARCH", true)
            .line("Without the key, you cannot enter.")
            .line("You dedicate your life to finding another way in...")
            .line("The gateway taunts you with possibilities.")
            .line("{captain}, your quest continues..."),
    )
    .add_ending(
        Ending::new(EndingId::GameOver, "GAME OVER", false)
            .line("{reason}")
            .line("{captain} fell in the line of duty.")
            .line("The stars remember the brave..."),
    )
}

fn distress_signal() -> Scene {
    Scene::new(SceneId::DistressSignal)
        .beat("Your sensors pick up a distress signal from a nearby ship.")
        .beat("Scans reveal it's damaged but might contain survivors... or danger.")
        .prompt("What do you do?")
        .choice(Choice::new(
            "1",
            "Dock with the ship and investigate",
            Destination::Scene(SceneId::InvestigateShip),
        ))
        .choice(Choice::new(
            "2",
            "Send a probe to scan first",
            Destination::Scene(SceneId::ProbeScan),
        ))
        .choice(
            Choice::new(
                "3",
                "Ignore it and continue to the signal source",
                Destination::Scene(SceneId::AlienEncounter),
            )
            .narrate("You continue toward the main signal. Your crew looks uneasy.")
            .narrate("Suddenly, your ship shudders - you're caught in a tractor beam!")
            .narrate("An alien vessel appears. They're scanning you...")
            .effect(Effect::Damage(20)),
        )
}

fn investigate_ship() -> Scene {
    Scene::new(SceneId::InvestigateShip)
        .beat("You dock with the damaged vessel. The airlock hisses open...")
        .beat("Inside, emergency lights flicker. You hear movement ahead.")
        .prompt("What do you do?")
        .choice(
            Choice::new(
                "1",
                "Call out to identify yourself",
                Destination::Scene(SceneId::AncientArtifact),
            )
            .narrate("A figure emerges - it's Dr. Sarah Chen, a xenobiologist!")
            .narrate("'Thank the stars! Our ship was attacked by unknown hostiles.'")
            .effect(Effect::add_crew(crew::DR_CHEN))
            .effect(Effect::Energy(10)),
        )
        .choice(
            Choice::new(
                "2",
                "Proceed cautiously with weapon drawn",
                Destination::Combat(EncounterId::SecurityDroid),
            )
            .narrate("You round a corner and face a malfunctioning security droid!"),
        )
        .choice(
            Choice::new(
                "3",
                "Check the ship's computer first",
                Destination::Scene(SceneId::AncientArtifact),
            )
            .narrate("You access the computer. Logs show they found something...")
            .narrate("An artifact of unknown origin. It's still aboard!")
            .effect(Effect::add_item(items::ANCIENT_MAP)),
        )
}

fn probe_scan() -> Scene {
    Scene::new(SceneId::ProbeScan)
        .beat("You launch a probe. Scans reveal organic life signs...")
        .beat("And something else - an energy signature unlike anything known.")
        .on_enter(Effect::Energy(-5))
        .prompt("What do you do?")
        .choice(Choice::new(
            "1",
            "Dock with the ship now that you know more",
            Destination::Scene(SceneId::InvestigateShip),
        ))
        .choice(
            Choice::new(
                "2",
                "Call for backup from the nearest station",
                Destination::Ending(EndingId::OneThatGotAway),
            )
            .narrate("Backup is 6 hours away. You wait safely...")
            .narrate("But the mysterious signal suddenly vanishes!"),
        )
        .choice(Choice::new(
            "3",
            "Proceed directly to the main signal source",
            Destination::Scene(SceneId::SignalSource),
        ))
}

fn alien_encounter() -> Scene {
    Scene::new(SceneId::AlienEncounter)
        .beat("A voice speaks in perfect English:")
        .beat("'We are the Keepers. You have found what was lost.'")
        .prompt("How do you respond?")
        .choice(
            Choice::new(
                "1",
                "'We come in peace' (Diplomatic)",
                Destination::Scene(SceneId::Gateway),
            )
            .narrate("'Your peaceful nature is noted. We will guide you.'")
            .effect(Effect::add_crew(crew::KEEPER_GUIDE)),
        )
        .choice(
            Choice::new(
                "2",
                "'Release us immediately!' (Aggressive)",
                Destination::Scene(SceneId::AlienEncounter),
            )
            .narrate("'Hostility detected. Initiating defensive protocols.'")
            .narrate("Your ship takes damage before you can apologize!")
            .effect(Effect::Damage(30)),
        )
        .choice(
            Choice::new(
                "3",
                "'What is this place?' (Curious)",
                Destination::Scene(SceneId::Gateway),
            )
            .narrate("'This is the Gateway to the Lost Worlds. You may enter.'"),
        )
}

fn ancient_artifact() -> Scene {
    Scene::new(SceneId::AncientArtifact)
        .beat("You discover the ship's cargo bay. Inside...")
        .beat("A crystalline artifact pulses with otherworldly energy!")
        .prompt("What do you do?")
        .choice(
            Choice::new("1", "Take the artifact", Destination::Scene(SceneId::Gateway))
                .narrate("As you touch it, visions flood your mind!")
                .narrate("You see the location of an ancient alien gateway...")
                .effect(Effect::add_item(items::CRYSTALLINE_ARTIFACT)),
        )
        .choice(
            Choice::new(
                "2",
                "Leave it and report your findings",
                Destination::Ending(EndingId::CautiousCommander),
            )
            .narrate("You report to command. They send a science team."),
        )
        .choice(
            Choice::new(
                "3",
                "Study it first with your scanner",
                Destination::Scene(SceneId::SignalSource),
            )
            .narrate("Scans reveal it's a key of some kind...")
            .narrate("The main signal source - it's a lock mechanism!")
            .effect(Effect::add_item(items::CRYSTALLINE_KEY)),
        )
}

fn signal_source() -> Scene {
    let keyed = Guard::Has(Capability::StationKey);

    Scene::new(SceneId::SignalSource)
        .beat("You arrive at the signal source - a massive space station!")
        .beat("It's older than human civilization itself.")
        .beat_if(keyed.clone(), "Your artifact resonates with the station!")
        .beat_if(
            Guard::lacks(Capability::StationKey),
            "The station's doors remain sealed. You need a key...",
        )
        .choice(Choice::new(
            "1",
            "Continue",
            Destination::branch(
                keyed,
                Destination::Scene(SceneId::Gateway),
                Destination::Ending(EndingId::EndlessSearch),
            ),
        ))
}

fn gateway() -> Scene {
    Scene::new(SceneId::Gateway)
        .beat("The gateway activates! It can transport you to:")
        .beat("Ancient worlds, untouched by time...")
        .prompt("What is your decision?")
        .choice(Choice::new(
            "1",
            "Enter the gateway (The Unknown)",
            Destination::Ending(EndingId::Explorer),
        ))
        .choice(Choice::new(
            "2",
            "Take readings and return home (Scientific Caution)",
            Destination::Ending(EndingId::Scientist),
        ))
        .choice(Choice::new(
            "3",
            "Invite humanity to explore together (Diplomatic)",
            Destination::Ending(EndingId::Diplomat),
        ))
}

fn security_droid(rules: CombatRules) -> Encounter {
    let attack = format!("Attack ({} damage)", rules.attack);
    let heal = format!("Use med-kit (Heal {} HP)", rules.heal_amount);

    Encounter::new(
        EncounterId::SecurityDroid,
        "Security Droid",
        rules,
        Aftermath::new(Destination::Scene(SceneId::AncientArtifact))
            .narrate("Droid defeated!")
            .narrate("You find a power cell in the wreckage.")
            .effect(Effect::add_item(items::POWER_CELL)),
        "The droid overwhelmed you...",
    )
    .intro("COMBAT INITIATED!")
    .intro("The droid's weapons charge up!")
    .action("1", CombatAction::Attack, attack)
    .action("2", CombatAction::Defend, "Defend (Reduce incoming damage)")
    .action("3", CombatAction::Heal, heal)
    .action("4", CombatAction::Escape, "Fall back to the airlock")
    .on_escape(
        Aftermath::new(Destination::Scene(SceneId::AncientArtifact))
            .narrate("You slip past the droid and into the cargo hold."),
    )
}
