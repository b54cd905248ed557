//! Pre-baked font metrics.
//!
//! Rasterizing and packing glyphs happens outside the engine. What arrives
//! here is the packed-glyph table of one atlas: per glyph, its rectangle in
//! the atlas, its placement deltas relative to the pen, and its advance.
//! Glyph-space coordinates are y-down (baseline at `y = 0`, ascenders
//! negative), which is how packers emit them.

use crate::math::{Dimensions, Vector2};
use crate::text::TextMetrics;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

const DEFAULT_FIRST_CHAR: u32 = 32;
const DEFAULT_TAB_ADVANCE: f32 = 6.0;
const DEFAULT_SPACE_ADVANCE: f32 = 3.0;

/// One glyph in the atlas.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PackedGlyph {
    /// Atlas rectangle in pixels, y-down.
    pub x0: u16,
    pub y0: u16,
    pub x1: u16,
    pub y1: u16,
    /// Top-left of the glyph relative to the pen.
    pub xoff: f32,
    pub yoff: f32,
    /// Bottom-right of the glyph relative to the pen.
    pub xoff2: f32,
    pub yoff2: f32,
    pub xadvance: f32,
}

/// A glyph placed at a pen position: screen rect in glyph space plus its
/// normalized atlas coordinates (`t` grows downwards).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GlyphQuad {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
    pub s0: f32,
    pub t0: f32,
    pub s1: f32,
    pub t1: f32,
}

/// How a character moves the pen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GlyphStep<'a> {
    Newline,
    /// Fixed advance with nothing drawn (space, tab).
    Advance(f32),
    Glyph(&'a PackedGlyph),
    /// Outside the baked range; skipped.
    Missing,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Font {
    /// Texture slot the atlas lives in.
    pub texture: u32,
    pub atlas_size: Dimensions,
    pub line_height: f32,
    /// Code point of `glyphs[0]`.
    pub first_char: u32,
    pub glyphs: Vec<PackedGlyph>,
    pub space_advance: f32,
    pub tab_advance: f32,
}

impl Font {
    pub fn new(texture: u32, atlas_size: Dimensions, line_height: f32, glyphs: Vec<PackedGlyph>) -> Self {
        Self {
            texture,
            atlas_size,
            line_height,
            first_char: DEFAULT_FIRST_CHAR,
            glyphs,
            space_advance: DEFAULT_SPACE_ADVANCE,
            tab_advance: DEFAULT_TAB_ADVANCE,
        }
    }

    /// Builds the table of a fixed-cell bitmap font: `count` glyphs starting
    /// at `first_char`, laid out left to right, top to bottom in `cell`-sized
    /// cells, each advancing by the cell width and sitting on the baseline.
    pub fn monospaced_grid(
        texture: u32,
        atlas_size: Dimensions,
        cell: Dimensions,
        first_char: u32,
        count: u32,
    ) -> Self {
        let columns = ((atlas_size.width / cell.width) as u32).max(1);
        let glyphs = (0..count)
            .map(|i| {
                let x0 = (i % columns) as f32 * cell.width;
                let y0 = (i / columns) as f32 * cell.height;
                PackedGlyph {
                    x0: x0 as u16,
                    y0: y0 as u16,
                    x1: (x0 + cell.width) as u16,
                    y1: (y0 + cell.height) as u16,
                    xoff: 0.0,
                    yoff: -cell.height,
                    xoff2: cell.width,
                    yoff2: 0.0,
                    xadvance: cell.width,
                }
            })
            .collect();
        let mut font = Self::new(texture, atlas_size, cell.height, glyphs);
        font.first_char = first_char;
        font
    }

    pub fn glyph(&self, c: char) -> Option<&PackedGlyph> {
        let index = (c as u32).checked_sub(self.first_char)?;
        self.glyphs.get(index as usize)
    }

    pub fn step(&self, c: char) -> GlyphStep<'_> {
        match c {
            '\n' => GlyphStep::Newline,
            '\t' => GlyphStep::Advance(self.tab_advance),
            ' ' => GlyphStep::Advance(self.space_advance),
            _ => self.glyph(c).map_or(GlyphStep::Missing, GlyphStep::Glyph),
        }
    }

    /// Places `glyph` at `pen` (glyph space, y-down) snapped to whole units,
    /// then advances the pen.
    pub fn aligned_quad(&self, glyph: &PackedGlyph, pen: &mut Vector2) -> GlyphQuad {
        let ipw = 1.0 / self.atlas_size.width;
        let iph = 1.0 / self.atlas_size.height;
        let x = (pen.x + glyph.xoff + 0.5).floor();
        let y = (pen.y + glyph.yoff + 0.5).floor();
        let quad = GlyphQuad {
            x0: x,
            y0: y,
            x1: x + glyph.xoff2 - glyph.xoff,
            y1: y + glyph.yoff2 - glyph.yoff,
            s0: glyph.x0 as f32 * ipw,
            t0: glyph.y0 as f32 * iph,
            s1: glyph.x1 as f32 * ipw,
            t1: glyph.y1 as f32 * iph,
        };
        pen.x += glyph.xadvance;
        quad
    }

    /// Measures `text` without wrapping: width of the widest line and
    /// `lines * line_height`, both multiplied by `scale`.
    pub fn measure(&self, text: &str, scale: f32) -> TextMetrics {
        let mut lines = 1_u32;
        let mut line_width = 0.0_f32;
        let mut widest = 0.0_f32;
        for c in text.chars() {
            match self.step(c) {
                GlyphStep::Newline => {
                    widest = widest.max(line_width);
                    line_width = 0.0;
                    lines += 1;
                }
                GlyphStep::Advance(advance) => line_width += advance,
                GlyphStep::Glyph(glyph) => line_width += glyph.xadvance,
                GlyphStep::Missing => {}
            }
        }
        widest = widest.max(line_width);
        TextMetrics {
            width: widest * scale,
            height: lines as f32 * self.line_height * scale,
            lines,
        }
    }
}
