//! The quad batch: the complete contract between the engine and whatever
//! draws its output.

use crate::color::Color;
use crate::math::{BoundingBox, Dimensions, Vector2};
use crate::resources::{Atlas, NineSlice};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

const RECT_BUFFER_CAPACITY: usize = 2048;
const RECT_MAX_SORT_ORDER: f32 = 128.0;

/// A normalized texture region, v-up.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TexQuad {
    pub min: Vector2,
    pub max: Vector2,
}

impl TexQuad {
    pub const UNIT: TexQuad = TexQuad::new(Vector2::ZERO, Vector2::new(1.0, 1.0));

    pub const fn new(min: Vector2, max: Vector2) -> Self {
        Self { min, max }
    }

    /// Cell `(row, column)` of `atlas`, rows counted from the top.
    pub fn atlas_cell(atlas: &Atlas, row: u32, column: u32) -> Self {
        let rows = atlas.rows.max(1) as f32;
        let columns = atlas.columns.max(1) as f32;
        let cell = Vector2::new(1.0 / columns, 1.0 / rows);
        let min = Vector2::new(column as f32 * cell.x, 1.0 - (row as f32 + 1.0) * cell.y);
        Self::new(min, min + cell)
    }

    /// Cell number `index` of `atlas`, counted left to right, top to bottom.
    pub fn atlas_index(atlas: &Atlas, index: u32) -> Self {
        let columns = atlas.columns.max(1);
        Self::atlas_cell(atlas, index / columns, index % columns)
    }
}

/// Texture coordinates for the four corners of a quad.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TexCoords {
    pub bottom_left: Vector2,
    pub bottom_right: Vector2,
    pub top_left: Vector2,
    pub top_right: Vector2,
}

impl Default for TexCoords {
    fn default() -> Self {
        Self::UNIT
    }
}

impl TexCoords {
    pub const UNIT: TexCoords = TexCoords {
        bottom_left: Vector2::new(0.0, 0.0),
        bottom_right: Vector2::new(1.0, 0.0),
        top_left: Vector2::new(0.0, 1.0),
        top_right: Vector2::new(1.0, 1.0),
    };

    pub fn from_quad(quad: TexQuad) -> Self {
        Self {
            bottom_left: quad.min,
            bottom_right: Vector2::new(quad.max.x, quad.min.y),
            top_left: Vector2::new(quad.min.x, quad.max.y),
            top_right: quad.max,
        }
    }

    fn map(self, f: impl Fn(Vector2) -> Vector2) -> Self {
        Self {
            bottom_left: f(self.bottom_left),
            bottom_right: f(self.bottom_right),
            top_left: f(self.top_left),
            top_right: f(self.top_right),
        }
    }

    pub fn scale(self, factor: f32) -> Self {
        self.map(|v| v * factor)
    }

    pub fn offset(self, by: Vector2) -> Self {
        self.map(|v| v + by)
    }

    /// Re-expresses unit-space coordinates inside `quad`.
    pub fn map_to_quad(self, quad: &TexQuad) -> Self {
        let scale = quad.max - quad.min;
        self.map(|v| v.scale(scale) + quad.min)
    }
}

/// One drawable rectangle. Its vertices are placed relative to `pivot`
/// (normalized, `(0, 0)` = bottom-left) at `pos`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quad {
    pub pos: Vector2,
    pub size: Dimensions,
    pub pivot: Vector2,
    pub color: Color,
    pub sort_order: f32,
    pub texture: u32,
    pub tex_coords: TexCoords,
}

impl Default for Quad {
    fn default() -> Self {
        Self {
            pos: Vector2::ZERO,
            size: Dimensions::ZERO,
            pivot: Vector2::ZERO,
            color: Color::WHITE,
            sort_order: 0.0,
            texture: 0,
            tex_coords: TexCoords::UNIT,
        }
    }
}

impl Quad {
    pub fn bounds(&self) -> BoundingBox {
        BoundingBox::from_pivot(self.pos, self.size, self.pivot)
    }

    /// Bottom-left, bottom-right, top-left, top-right.
    pub fn corners(&self) -> [Vector2; 4] {
        let bb = self.bounds();
        [
            Vector2::new(bb.x, bb.y),
            Vector2::new(bb.x + bb.width, bb.y),
            Vector2::new(bb.x, bb.y + bb.height),
            Vector2::new(bb.x + bb.width, bb.y + bb.height),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[repr(C)]
pub struct Vertex {
    pub pos: Vector2,
    pub color: Color,
    pub tex_coord: Vector2,
    pub sort_order: f32,
    pub texture: u32,
}

/// Append-only list of quads for one frame, with a fixed capacity.
#[derive(Debug, Clone)]
pub struct QuadBatch {
    quads: Vec<Quad>,
    capacity: usize,
    sort_order_range: f32,
    dropped: usize,
}

impl Default for QuadBatch {
    fn default() -> Self {
        Self::new(RECT_BUFFER_CAPACITY)
    }
}

impl QuadBatch {
    pub fn new(capacity: usize) -> Self {
        Self {
            quads: Vec::with_capacity(capacity),
            capacity,
            sort_order_range: RECT_MAX_SORT_ORDER,
            dropped: 0,
        }
    }

    /// Sort orders are clamped to `-range..=range`.
    pub fn with_sort_order_range(mut self, range: f32) -> Self {
        self.sort_order_range = range.abs();
        self
    }

    pub fn clamp_sort_order(&self, sort_order: f32) -> f32 {
        sort_order.clamp(-self.sort_order_range, self.sort_order_range)
    }

    /// Appends `quad` with its sort order clamped. Past capacity the quad is
    /// dropped; the first drop per reset logs a warning. Returns whether the
    /// quad was kept.
    pub fn push(&mut self, mut quad: Quad) -> bool {
        if self.quads.len() >= self.capacity {
            if self.dropped == 0 {
                tracing::warn!(capacity = self.capacity, "quad batch full, dropping quads");
            }
            self.dropped += 1;
            return false;
        }
        quad.sort_order = self.clamp_sort_order(quad.sort_order);
        self.quads.push(quad);
        true
    }

    /// Appends `quad` with its texture coordinates mapped into `region`.
    pub fn push_mapped(&mut self, mut quad: Quad, region: &TexQuad) -> bool {
        quad.tex_coords = quad.tex_coords.map_to_quad(region);
        self.push(quad)
    }

    /// Appends the eight border quads of `slice` around a box centered on
    /// `center`, plus the center quad when `fill_center` is set. `border` is
    /// the on-screen border thickness; it shrinks to fit small boxes.
    #[allow(clippy::too_many_arguments)]
    pub fn push_nine_slice(
        &mut self,
        slice: &NineSlice,
        center: Vector2,
        size: Dimensions,
        border: f32,
        color: Color,
        sort_order: f32,
        fill_center: bool,
    ) {
        let border = border.min(size.min_side() * 0.5).max(0.0);
        let half = Vector2::from(size) * 0.5;
        let bs = slice.border_normalized();
        let inner = 1.0 - bs;
        let mut quad = Quad {
            pos: center - half,
            size: Dimensions::new(border, border),
            pivot: Vector2::new(0.0, 0.0),
            color,
            sort_order,
            texture: slice.texture,
            tex_coords: TexCoords::UNIT.scale(bs),
        };

        // Corners: bottom-left, bottom-right, top-right, top-left.
        self.push_mapped(quad, &slice.quad);
        quad.pos = quad.pos + Vector2::new(size.width, 0.0);
        quad.pivot = Vector2::new(1.0, 0.0);
        quad.tex_coords = quad.tex_coords.offset(Vector2::new(inner, 0.0));
        self.push_mapped(quad, &slice.quad);
        quad.pos = quad.pos + Vector2::new(0.0, size.height);
        quad.pivot = Vector2::new(1.0, 1.0);
        quad.tex_coords = quad.tex_coords.offset(Vector2::new(0.0, inner));
        self.push_mapped(quad, &slice.quad);
        quad.pos = quad.pos - Vector2::new(size.width, 0.0);
        quad.pivot = Vector2::new(0.0, 1.0);
        quad.tex_coords = quad.tex_coords.offset(Vector2::new(-inner, 0.0));
        self.push_mapped(quad, &slice.quad);

        // Bottom and top edges.
        quad.pos = center - Vector2::new(0.0, half.y);
        quad.pivot = Vector2::new(0.5, 0.0);
        quad.size = Dimensions::new(size.width - border * 2.0, border);
        quad.tex_coords = TexCoords::from_quad(TexQuad::new(Vector2::new(bs, 0.0), Vector2::new(inner, bs)));
        self.push_mapped(quad, &slice.quad);
        quad.pos = center + Vector2::new(0.0, half.y);
        quad.pivot = Vector2::new(0.5, 1.0);
        quad.tex_coords = quad.tex_coords.offset(Vector2::new(0.0, inner));
        self.push_mapped(quad, &slice.quad);

        // Left and right edges.
        quad.pos = center - Vector2::new(half.x, 0.0);
        quad.pivot = Vector2::new(0.0, 0.5);
        quad.size = Dimensions::new(border, size.height - border * 2.0);
        quad.tex_coords = TexCoords::from_quad(TexQuad::new(Vector2::new(0.0, bs), Vector2::new(bs, inner)));
        self.push_mapped(quad, &slice.quad);
        quad.pos = center + Vector2::new(half.x, 0.0);
        quad.pivot = Vector2::new(1.0, 0.5);
        quad.tex_coords = quad.tex_coords.offset(Vector2::new(inner, 0.0));
        self.push_mapped(quad, &slice.quad);

        if fill_center {
            quad.pos = center;
            quad.pivot = Vector2::CENTER;
            quad.size = Dimensions::new(size.width - border * 2.0, size.height - border * 2.0);
            quad.tex_coords = TexCoords::from_quad(TexQuad::new(Vector2::splat(bs), Vector2::splat(inner)));
            self.push_mapped(quad, &slice.quad);
        }
    }

    pub fn quads(&self) -> &[Quad] {
        &self.quads
    }

    pub fn len(&self) -> usize {
        self.quads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quads.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Quads dropped since the last reset.
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    pub fn reset(&mut self) {
        self.quads.clear();
        self.dropped = 0;
    }

    /// Two triangles per quad: bottom-left, bottom-right, top-left, then
    /// top-left, top-right, bottom-right.
    pub fn vertices(&self) -> impl Iterator<Item = Vertex> + '_ {
        self.quads.iter().flat_map(|quad| {
            let [bl, br, tl, tr] = quad.corners();
            let tc = quad.tex_coords;
            let vertex = |pos, tex_coord| Vertex {
                pos,
                color: quad.color,
                tex_coord,
                sort_order: quad.sort_order,
                texture: quad.texture,
            };
            [
                vertex(bl, tc.bottom_left),
                vertex(br, tc.bottom_right),
                vertex(tl, tc.top_left),
                vertex(tl, tc.top_left),
                vertex(tr, tc.top_right),
                vertex(br, tc.bottom_right),
            ]
        })
    }
}
