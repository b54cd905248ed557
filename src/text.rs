use crate::align::{AlignX, AlignY};
use crate::color::Color;
use crate::id::Id;
use crate::layout::Layout;
use crate::resources::{FontId, NineSliceId};

/// Measured extent of a text element, in design units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TextMetrics {
    /// Widest line.
    pub width: f32,
    /// `lines * line_height`.
    pub height: f32,
    pub lines: u32,
}

/// Configuration settings for text elements.
///
/// Text is never wrapped; lines break only at `'\n'`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextConfig {
    pub id: Id,
    /// Only `anchor` and `offset` are used; the size comes from measurement.
    pub layout: Layout,
    pub font: FontId,
    pub color: Color,
    /// Font units to design units.
    pub scale: f32,
    pub align_x: AlignX,
    pub align_y: AlignY,
    /// Outline offset in design units. `0.0` draws no outline.
    pub outline: f32,
    pub outline_color: Color,
    /// Draw a nine-slice box behind the text.
    pub background: bool,
    pub background_slice: NineSliceId,
    pub background_color: Color,
    pub blocks_cursor: bool,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            id: Id::NONE,
            layout: Layout::default(),
            font: FontId(0),
            color: Color::WHITE,
            scale: 1.0,
            align_x: AlignX::Left,
            align_y: AlignY::Bottom,
            outline: 0.0,
            outline_color: Color::BLACK,
            background: false,
            background_slice: NineSliceId(0),
            background_color: Color::WHITE,
            blocks_cursor: false,
        }
    }
}

impl TextConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn id(&mut self, id: impl Into<Id>) -> &mut Self {
        self.id = id.into();
        self
    }

    /// Edits the layout in place.
    #[inline]
    pub fn layout(&mut self, f: impl FnOnce(&mut Layout) -> &mut Layout) -> &mut Self {
        f(&mut self.layout);
        self
    }

    /// Shorthand for placing the text's anchor.
    #[inline]
    pub fn anchor(&mut self, x: f32, y: f32) -> &mut Self {
        self.layout.anchor(x, y);
        self
    }

    #[inline]
    pub fn offset(&mut self, x: f32, y: f32) -> &mut Self {
        self.layout.offset(x, y);
        self
    }

    #[inline]
    pub fn font(&mut self, font: FontId) -> &mut Self {
        self.font = font;
        self
    }

    #[inline]
    pub fn color(&mut self, color: impl Into<Color>) -> &mut Self {
        self.color = color.into();
        self
    }

    #[inline]
    pub fn scale(&mut self, scale: f32) -> &mut Self {
        self.scale = scale;
        self
    }

    #[inline]
    pub fn align(&mut self, x: AlignX, y: AlignY) -> &mut Self {
        self.align_x = x;
        self.align_y = y;
        self
    }

    #[inline]
    pub fn outline(&mut self, offset: f32, color: impl Into<Color>) -> &mut Self {
        self.outline = offset;
        self.outline_color = color.into();
        self
    }

    /// Draws `slice` tinted with `color` behind the text when `enabled`.
    #[inline]
    pub fn background(&mut self, enabled: bool, slice: NineSliceId, color: impl Into<Color>) -> &mut Self {
        self.background = enabled;
        self.background_slice = slice;
        self.background_color = color.into();
        self
    }

    #[inline]
    pub fn blocks_cursor(&mut self) -> &mut Self {
        self.blocks_cursor = true;
        self
    }
}
