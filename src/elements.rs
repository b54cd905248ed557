use crate::batch::TexQuad;
use crate::color::Color;
use crate::id::Id;
use crate::layout::Layout;
use crate::math::Vector2;
use crate::resources::{NineSliceId, TextureId};

/// Configuration of a container: a box that holds children and, unless
/// hidden, draws a nine-slice background.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContainerConfig {
    pub id: Id,
    pub layout: Layout,
    /// Background tint.
    pub color: Color,
    pub nine_slice: NineSliceId,
    /// Skip drawing the background. Children still draw.
    pub hidden: bool,
    /// Take part in hit-testing.
    pub blocks_cursor: bool,
    /// Added to the sort order of this container and its whole subtree.
    pub sort_order_override: f32,
    /// Draw the center quad of the nine-slice.
    pub fill_center: bool,
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self {
            id: Id::NONE,
            layout: Layout::default(),
            color: Color::WHITE,
            nine_slice: NineSliceId(0),
            hidden: false,
            blocks_cursor: false,
            sort_order_override: 0.0,
            fill_center: true,
        }
    }
}

impl ContainerConfig {
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

    #[inline]
    pub fn color(&mut self, color: impl Into<Color>) -> &mut Self {
        self.color = color.into();
        self
    }

    #[inline]
    pub fn nine_slice(&mut self, slice: NineSliceId) -> &mut Self {
        self.nine_slice = slice;
        self
    }

    #[inline]
    pub fn hidden(&mut self, hidden: bool) -> &mut Self {
        self.hidden = hidden;
        self
    }

    #[inline]
    pub fn blocks_cursor(&mut self) -> &mut Self {
        self.blocks_cursor = true;
        self
    }

    #[inline]
    pub fn sort_order_override(&mut self, sort_order: f32) -> &mut Self {
        self.sort_order_override = sort_order;
        self
    }

    #[inline]
    pub fn fill_center(&mut self, fill: bool) -> &mut Self {
        self.fill_center = fill;
        self
    }
}

/// How an image picks its texture coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum TexCoordMode {
    /// The whole texture.
    #[default]
    Full,
    /// Atlas cell by index, counted left to right, top to bottom.
    Index(u32),
    /// Atlas cell by row (from the top) and column.
    Cell { row: u32, column: u32 },
    /// An explicit region in normalized, v-up coordinates.
    Quad(TexQuad),
}

/// Configuration of an image: one textured quad.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageConfig {
    pub id: Id,
    pub layout: Layout,
    /// Tint.
    pub color: Color,
    /// Point of the quad placed on the resolved position.
    pub pivot: Vector2,
    pub texture: TextureId,
    pub coords: TexCoordMode,
    pub blocks_cursor: bool,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            id: Id::NONE,
            layout: Layout::default(),
            color: Color::WHITE,
            pivot: Vector2::CENTER,
            texture: TextureId(0),
            coords: TexCoordMode::Full,
            blocks_cursor: false,
        }
    }
}

impl ImageConfig {
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

    #[inline]
    pub fn color(&mut self, color: impl Into<Color>) -> &mut Self {
        self.color = color.into();
        self
    }

    #[inline]
    pub fn pivot(&mut self, x: f32, y: f32) -> &mut Self {
        self.pivot = Vector2::new(x, y);
        self
    }

    #[inline]
    pub fn texture(&mut self, texture: TextureId, coords: TexCoordMode) -> &mut Self {
        self.texture = texture;
        self.coords = coords;
        self
    }

    #[inline]
    pub fn blocks_cursor(&mut self) -> &mut Self {
        self.blocks_cursor = true;
        self
    }
}
