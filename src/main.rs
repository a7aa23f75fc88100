//=========================================================================
// Stratum Demo
//=========================================================================
//
// Title screen → skill graph menu, to exercise the mode stack end to end.
//
//   Enter on the title   push SkillGraphMode (fade out / fade in)
//   Escape on the title  pop the title, emptying the stack (exit)
//
// Logging: RUST_LOG overrides the default `info` filter.
//
//=========================================================================

use log::{error, info};
use stratum_engine::prelude::*;

//=== Title Mode ==========================================================

struct TitleMode;

impl GameMode for TitleMode {
    fn mode_type(&self) -> ModeType {
        ModeType::BOOT
    }

    fn update(&mut self, context: &mut ModeContext<'_>) {
        if context.input.cancel_press() {
            info!("Leaving title screen");
            context.commands.pop(true, false);
            return;
        }

        if !context.input.confirm_press() {
            return;
        }

        match demo_graph() {
            Ok(graph) => {
                let window = SkillGraphWindow::new(graph, demo_party(), demo_inventory());
                context.commands.push(SkillGraphMode::new(window), true, true);
            }
            Err(e) => error!("Demo skill graph is invalid: {}", e),
        }
    }

    fn draw(&mut self, video: &mut dyn VideoService) {
        video.draw_text("Stratum", Position2D::new(440.0, 300.0));
        video.draw_text("Enter: skills   Escape: quit", Position2D::new(360.0, 360.0));
    }

    fn reset(&mut self, context: &mut ModeContext<'_>) {
        context.play_owned_sound("title_theme");
    }
}

//=== Demo Data ===========================================================

fn demo_graph() -> Result<SkillGraph, stratum_engine::skill_graph::SkillGraphError> {
    SkillGraph::new(vec![
        SkillNode::new(0, Position2D::new(0.0, 0.0), "data/skills/origin.png", 0).with_children([1, 2, 3]),
        SkillNode::new(1, Position2D::new(120.0, 0.0), "data/skills/strength.png", 40).with_children([4]),
        SkillNode::new(2, Position2D::new(0.0, -120.0), "data/skills/magic.png", 40).with_children([5]),
        SkillNode::new(3, Position2D::new(-120.0, 60.0), "data/skills/agility.png", 30),
        SkillNode::new(4, Position2D::new(240.0, 0.0), "data/skills/vigor.png", 80).with_item(1001, 1),
        SkillNode::new(5, Position2D::new(0.0, -240.0), "data/skills/wisdom.png", 80),
    ])
}

fn demo_party() -> Party {
    let mut party = Party::new();
    for (name, icon) in [("Bronann", "data/faces/bronann.png"), ("Kalya", "data/faces/kalya.png")] {
        if let Err(e) = party.add(SkillCharacter::new(name, icon, 0).with_experience(150)) {
            error!("Could not add {}: {}", name, e);
        }
    }
    party
}

fn demo_inventory() -> Inventory {
    let mut inventory = Inventory::new();
    inventory.add(1001, 1);
    inventory
}

//=== Entry Point =========================================================

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    EngineBuilder::new()
        .with_window_title("Stratum Demo")
        .build()
        .init(|modes| {
            modes.push(TitleMode, false, true);
        })
        .run();
}
