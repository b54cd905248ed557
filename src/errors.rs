use core::fmt;

use thiserror::Error;

use crate::resources::{FontId, NineSliceId, TextureId};

/// The per-frame passes, in the order a host must run them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pass {
    Build,
    Reindex,
    Layout,
    HitTest,
    Emit,
}

impl fmt::Display for Pass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Pass::Build => "build",
            Pass::Reindex => "reindex",
            Pass::Layout => "layout",
            Pass::HitTest => "hit-test",
            Pass::Emit => "emit",
        })
    }
}

/// Where the current frame is in its pipeline. Each pass moves the frame
/// one step forward; `clear` returns it to `Building`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FramePhase {
    #[default]
    Building,
    Reindexed,
    Resolved,
    HitTested,
    Emitted,
}

impl fmt::Display for FramePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FramePhase::Building => "building",
            FramePhase::Reindexed => "reindexed",
            FramePhase::Resolved => "resolved",
            FramePhase::HitTested => "hit-tested",
            FramePhase::Emitted => "emitted",
        })
    }
}

/// Structural and resource-reference violations. Capacity limits are not
/// errors: see [`CapacityWarnings`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum UiError {
    #[error("`end` was called with no open element")]
    UnbalancedEnd,

    #[error("frame ended with {open} element(s) still open")]
    UnclosedElements { open: usize },

    #[error("a second root element was opened; a frame has exactly one root")]
    MultipleRoots,

    #[error("the {pass} pass cannot run while the frame is {phase}")]
    PassOutOfOrder { pass: Pass, phase: FramePhase },

    #[error("font {0} is not in the resource table")]
    UnknownFont(FontId),

    #[error("nine-slice {0} is not in the resource table")]
    UnknownNineSlice(NineSliceId),

    #[error("texture {0} is not in the resource table")]
    UnknownTexture(TextureId),
}

/// Capacity limits hit during the current frame. Each flag flips once, which
/// is also when the matching warning is logged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CapacityWarnings {
    pub max_elements_exceeded: bool,
    pub arena_capacity_exceeded: bool,
}

impl CapacityWarnings {
    pub fn any(&self) -> bool {
        self.max_elements_exceeded || self.arena_capacity_exceeded
    }
}
