//! Command-line overrides for [`WindmillConfig`].

use clap::Parser;

use crate::windmill::WindmillConfig;

/// Staged windmill construction viewer.
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "windmill-build")]
#[command(about = "Staged windmill construction viewer", long_about = None)]
pub struct Cli {
    /// Seconds the model stays hidden before the reveal starts
    #[arg(long)]
    pub pre_reveal_delay: Option<f32>,
    /// Seconds to reveal the whole body
    #[arg(long)]
    pub body_duration: Option<f32>,
    /// Seconds to reveal the whole blade assembly
    #[arg(long)]
    pub blades_duration: Option<f32>,
    /// Body slot revealed at each step, e.g. `3,4,1,2,0`
    #[arg(long, value_delimiter = ',')]
    pub body_order: Option<Vec<usize>>,
    /// Number of sails on the hub
    #[arg(long)]
    pub sails: Option<usize>,
    /// Blade spin in degrees per second
    #[arg(long)]
    pub rotation_speed: Option<f32>,
    /// Start a build as soon as the windmill appears
    #[arg(long)]
    pub build_on_start: bool,
}

impl Cli {
    /// Writes every flag that was given into `cfg`.
    pub fn apply(&self, cfg: &mut WindmillConfig) {
        if let Some(seconds) = self.pre_reveal_delay {
            cfg.timing.pre_reveal_delay = seconds;
        }
        if let Some(seconds) = self.body_duration {
            cfg.timing.body_reveal_duration = seconds;
        }
        if let Some(seconds) = self.blades_duration {
            cfg.timing.blades_reveal_duration = seconds;
        }
        if let Some(order) = &self.body_order {
            cfg.body_reveal_order = order.clone();
        }
        if let Some(sails) = self.sails {
            cfg.sail_count = sails;
        }
        if let Some(speed) = self.rotation_speed {
            cfg.rotation_speed = speed;
        }
        cfg.auto_build |= self.build_on_start;
    }
}
