//! Host-provided lookup tables, keyed by small integer ids handed out at
//! initialization.

use core::fmt;

use crate::batch::TexQuad;
use crate::errors::UiError;
use crate::font::Font;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

macro_rules! resource_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
        #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
        pub struct $name(pub u16);

        impl From<u16> for $name {
            fn from(value: u16) -> Self {
                Self(value)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

resource_id!(
    /// Index into [`Resources::fonts`].
    FontId
);
resource_id!(
    /// Index into [`Resources::nine_slices`].
    NineSliceId
);
resource_id!(
    /// Index into [`Resources::atlases`].
    TextureId
);

/// A bordered region of an atlas that stretches without distorting its border.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NineSlice {
    /// Texture slot holding the source art.
    pub texture: u32,
    /// Side length of the source art, in its own pixels.
    pub total_size: f32,
    /// Border thickness, in the same pixels.
    pub border_size: f32,
    /// Where the source art sits in the texture.
    pub quad: TexQuad,
}

impl NineSlice {
    /// Border thickness as a fraction of the source art.
    pub fn border_normalized(&self) -> f32 {
        if self.total_size <= 0.0 {
            0.0
        } else {
            self.border_size / self.total_size
        }
    }
}

/// A texture addressed as a grid of equally sized cells.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Atlas {
    pub texture: u32,
    pub rows: u32,
    pub columns: u32,
}

impl Atlas {
    /// A texture used as a single image.
    pub fn single(texture: u32) -> Self {
        Self {
            texture,
            rows: 1,
            columns: 1,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct Resources {
    pub fonts: Vec<Font>,
    pub nine_slices: Vec<NineSlice>,
    pub atlases: Vec<Atlas>,
}

impl Resources {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_font(&mut self, font: Font) -> FontId {
        self.fonts.push(font);
        FontId((self.fonts.len() - 1) as u16)
    }

    pub fn add_nine_slice(&mut self, nine_slice: NineSlice) -> NineSliceId {
        self.nine_slices.push(nine_slice);
        NineSliceId((self.nine_slices.len() - 1) as u16)
    }

    pub fn add_atlas(&mut self, atlas: Atlas) -> TextureId {
        self.atlases.push(atlas);
        TextureId((self.atlases.len() - 1) as u16)
    }

    pub fn font(&self, id: FontId) -> Result<&Font, UiError> {
        self.fonts.get(id.0 as usize).ok_or(UiError::UnknownFont(id))
    }

    pub fn nine_slice(&self, id: NineSliceId) -> Result<&NineSlice, UiError> {
        self.nine_slices
            .get(id.0 as usize)
            .ok_or(UiError::UnknownNineSlice(id))
    }

    pub fn atlas(&self, id: TextureId) -> Result<&Atlas, UiError> {
        self.atlases
            .get(id.0 as usize)
            .ok_or(UiError::UnknownTexture(id))
    }
}
