//! Decoration states and their colors.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Colors cycled through by [`DecorationState::Auxiliary`] ids.
pub const AUXILIARY_PALETTE: [&str; 8] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#17becf",
];

/// Palette color of an auxiliary id.
pub fn palette_color(id: u32) -> &'static str {
    AUXILIARY_PALETTE[id as usize % AUXILIARY_PALETTE.len()]
}

/// Visual state an algorithm assigns to a vertex or edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DecorationState {
    /// Untouched.
    #[default]
    Default,
    /// Part of the result.
    Selected,
    /// Rejected, or not drawn at all for Euclidean edges.
    Disabled,
    /// Currently under examination.
    Considering,
    /// Member of the group with this id (e.g. a biconnected component).
    Auxiliary(u32),
}

impl DecorationState {
    /// Display color of the state.
    pub fn color(&self) -> &'static str {
        match self {
            DecorationState::Default => "#333333",
            DecorationState::Selected => "#27ae60",
            DecorationState::Disabled => "#c8c8c8",
            DecorationState::Considering => "#e67e22",
            DecorationState::Auxiliary(id) => palette_color(*id),
        }
    }

    /// Whether this is [`DecorationState::Default`].
    pub fn is_default(&self) -> bool {
        *self == DecorationState::Default
    }
}

impl fmt::Display for DecorationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecorationState::Default => write!(f, "default"),
            DecorationState::Selected => write!(f, "selected"),
            DecorationState::Disabled => write!(f, "disabled"),
            DecorationState::Considering => write!(f, "considering"),
            DecorationState::Auxiliary(id) => write!(f, "auxiliary({id})"),
        }
    }
}
