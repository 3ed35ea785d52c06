use std::fmt;

use super::MeshGroup;

/// Configuration errors surfaced by the build core.
///
/// All of these are fatal: running on with a fallback would desynchronise the
/// staged reveal from the model.
#[derive(Debug, Clone, PartialEq)]
pub enum BuildError {
    /// A configured reveal order repeats an index or skips one.
    RevealOrderNotPermutation {
        /// The offending order.
        order: Vec<usize>,
    },
    /// A reveal order doesn't cover exactly the group's submesh slots.
    RevealOrderLength {
        /// Group the order was configured for.
        group: MeshGroup,
        /// Length of the configured order.
        order_len: usize,
        /// Slots the renderer actually has.
        slot_count: usize,
    },
    /// The rendering backend has no shader under this name.
    MissingShader(&'static str),
    /// A stage duration is negative or not finite.
    InvalidDuration {
        /// Which stage the duration belongs to.
        stage: &'static str,
        /// The rejected value.
        seconds: f32,
    },
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RevealOrderNotPermutation { order } => {
                write!(f, "reveal order {order:?} is not a permutation")
            }
            Self::RevealOrderLength {
                group,
                order_len,
                slot_count,
            } => write!(
                f,
                "reveal order for {group} has {order_len} entries but the mesh has {slot_count} slots"
            ),
            Self::MissingShader(name) => write!(f, "shader `{name}` not found"),
            Self::InvalidDuration { stage, seconds } => {
                write!(f, "{stage} duration must be finite and >= 0, got {seconds}")
            }
        }
    }
}

impl std::error::Error for BuildError {}
