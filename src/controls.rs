//! Keyboard shortcuts and the egui control panel.
//!
//! Both only emit [`WindmillCommand`] messages; the windmill systems apply
//! them next frame.

use bevy::prelude::*;
use bevy_egui::{EguiPrimaryContextPass, egui};

use crate::GameState;
use crate::windmill::{ActiveWindmill, WindmillCommand};

/// Key bindings for the three windmill requests.
pub const SHORTCUTS: [(KeyCode, WindmillCommand); 3] = [
    (KeyCode::KeyO, WindmillCommand::ToggleOverlay),
    (KeyCode::KeyM, WindmillCommand::ToggleMesh),
    (KeyCode::KeyB, WindmillCommand::StartBuilding),
];

/// Keyboard shortcuts plus the "Windmill" panel.
pub struct ControlsPlugin;

impl Plugin for ControlsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            keyboard_shortcuts.run_if(in_state(GameState::Running)),
        )
        .add_systems(EguiPrimaryContextPass, control_panel);
    }
}

/// Writes a [`WindmillCommand`] for every bound key pressed this frame.
pub fn keyboard_shortcuts(
    keys: Res<ButtonInput<KeyCode>>,
    mut requests: MessageWriter<WindmillCommand>,
) {
    for (key, command) in SHORTCUTS {
        if keys.just_pressed(key) {
            requests.write(command);
        }
    }
}

/// Draws the control window: build state, display and shader mode, and one
/// button per request.
pub fn control_panel(
    mut egui_ctx: Query<&mut bevy_egui::EguiContext>,
    windmill: Option<Res<ActiveWindmill>>,
    mut requests: MessageWriter<WindmillCommand>,
) {
    let Some(windmill) = windmill else {
        return;
    };
    let Ok(mut ctx) = egui_ctx.single_mut() else {
        return;
    };

    egui::Window::new("Windmill")
        .resizable(false)
        .show(ctx.get_mut(), |ui| {
            ui.label(format!("Build: {}", windmill.timeline()));
            if windmill.is_building() {
                ui.label(format!(
                    "Next step in {:.2}s",
                    windmill.sequencer().stage_remaining()
                ));
            }
            ui.label(format!("Mesh: {:?}", windmill.display_mode()));
            ui.label(format!("Shader: {}", windmill.shader_mode().shader_name()));
            ui.separator();
            ui.horizontal(|ui| {
                if ui.button("Overlay (O)").clicked() {
                    requests.write(WindmillCommand::ToggleOverlay);
                }
                if ui.button("Mesh (M)").clicked() {
                    requests.write(WindmillCommand::ToggleMesh);
                }
                if ui.button("Build (B)").clicked() {
                    requests.write(WindmillCommand::StartBuilding);
                }
            });
        });
}

#[cfg(test)]
mod tests {
    use bevy::ecs::message::Messages;

    use super::*;

    fn pressed(keys: &[KeyCode]) -> Vec<WindmillCommand> {
        let mut app = App::new();
        app.init_resource::<ButtonInput<KeyCode>>()
            .add_message::<WindmillCommand>()
            .add_systems(Update, keyboard_shortcuts);
        {
            let mut input = app.world_mut().resource_mut::<ButtonInput<KeyCode>>();
            for key in keys {
                input.press(*key);
            }
        }
        app.update();

        let messages = app.world().resource::<Messages<WindmillCommand>>();
        let mut cursor = messages.get_cursor();
        cursor.read(messages).copied().collect()
    }

    #[test]
    fn each_key_maps_to_its_command() {
        assert_eq!(
            pressed(&[KeyCode::KeyO]),
            vec![WindmillCommand::ToggleOverlay]
        );
        assert_eq!(pressed(&[KeyCode::KeyM]), vec![WindmillCommand::ToggleMesh]);
        assert_eq!(
            pressed(&[KeyCode::KeyB]),
            vec![WindmillCommand::StartBuilding]
        );
    }

    #[test]
    fn unbound_keys_are_ignored() {
        assert!(pressed(&[KeyCode::KeyX, KeyCode::Space]).is_empty());
    }

    #[test]
    fn simultaneous_keys_keep_binding_order() {
        assert_eq!(
            pressed(&[KeyCode::KeyB, KeyCode::KeyO]),
            vec![WindmillCommand::ToggleOverlay, WindmillCommand::StartBuilding]
        );
    }
}
