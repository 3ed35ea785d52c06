//! Windmill Build viewer binary.

use bevy::app::AppExit;
use bevy::prelude::*;
use bevy_inspector_egui::quick::WorldInspectorPlugin;
use windmill_build::GameState;
use windmill_build::controls::ControlsPlugin;
use windmill_build::visuals::{VisualsConfig, VisualsPlugin};
use windmill_build::windmill::{WindmillConfig, WindmillPlugin};

#[cfg(feature = "native")]
use bevy::pbr::wireframe::{WireframeConfig, WireframePlugin};
#[cfg(feature = "native")]
use bevy::remote::{RemotePlugin, http::RemoteHttpPlugin};
#[cfg(feature = "native")]
use bevy::render::{
    RenderPlugin,
    settings::{WgpuFeatures, WgpuSettings},
};
#[cfg(feature = "native")]
use clap::Parser;

fn main() {
    let config = load_config();
    #[cfg(feature = "native")]
    let edge_color = config.wireframe_color;
    let mut app = App::new();

    let plugins = DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Windmill Build".into(),
            ..default()
        }),
        ..default()
    });
    // Line polygon mode backs the wireframe overlay.
    #[cfg(feature = "native")]
    let plugins = plugins.set(RenderPlugin {
        render_creation: WgpuSettings {
            features: WgpuFeatures::POLYGON_MODE_LINE,
            ..default()
        }
        .into(),
        ..default()
    });

    app.add_plugins(plugins)
        .register_type::<GameState>()
        .init_state::<GameState>()
        .add_plugins(bevy_egui::EguiPlugin::default())
        .add_plugins(WindmillPlugin(config))
        .add_plugins(VisualsPlugin(VisualsConfig::default()))
        .add_plugins(ControlsPlugin)
        .add_systems(Update, exit_on_esc)
        .add_systems(Update, toggle_inspector)
        .add_plugins(WorldInspectorPlugin::new().run_if(in_state(GameState::Debugging)));

    #[cfg(feature = "native")]
    app.add_plugins(WireframePlugin::default())
        .insert_resource(WireframeConfig {
            global: false,
            default_color: edge_color,
        })
        .add_plugins(RemotePlugin::default())
        .add_plugins(RemoteHttpPlugin::default());

    app.run();
}

#[cfg(feature = "native")]
fn load_config() -> WindmillConfig {
    let mut config = WindmillConfig::default();
    windmill_build::cli::Cli::parse().apply(&mut config);
    config
}

#[cfg(not(feature = "native"))]
fn load_config() -> WindmillConfig {
    WindmillConfig::default()
}

fn toggle_inspector(
    keys: Res<ButtonInput<KeyCode>>,
    state: Res<State<GameState>>,
    mut next: ResMut<NextState<GameState>>,
) {
    if keys.just_pressed(KeyCode::Tab) {
        next.set(match state.get() {
            GameState::Running => GameState::Debugging,
            GameState::Debugging => GameState::Running,
        });
    }
}

fn exit_on_esc(keys: Res<ButtonInput<KeyCode>>, mut exit: MessageWriter<AppExit>) {
    if keys.just_pressed(KeyCode::Escape) {
        exit.write(AppExit::Success);
    }
}
