//! A single import for building frames.
//!
//! ```rust
//! use ply_anchor::prelude::*;
//! ```

// Core types
pub use crate::config::UiConfig;
pub use crate::engine::{FrameStats, UiContext};
pub use crate::errors::{CapacityWarnings, UiError};
pub use crate::id::Id;
pub use crate::input::PointerInput;

// Element configuration
pub use crate::elements::{ContainerConfig, ImageConfig, TexCoordMode};
pub use crate::layout::{anchor, Layout, Sizing};
pub use crate::text::TextConfig;

// Resources
pub use crate::batch::{Quad, QuadBatch, TexCoords, TexQuad};
pub use crate::font::{Font, PackedGlyph};
pub use crate::resources::{Atlas, FontId, NineSlice, NineSliceId, Resources, TextureId};

// Values
pub use crate::color::Color;
pub use crate::math::{BoundingBox, Dimensions, Vector2};

// Macros
pub use crate::{fit, fixed, percent};

// Alignment, globbed
pub use crate::align::AlignX::{self, *};
pub use crate::align::AlignY::{self, *};
