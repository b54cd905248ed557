//! Turns the resolved tree into quads.
//!
//! Every element draws at `depth + overrides`, where `overrides` is the sum
//! of `sort_order_override` along its container ancestors (its own
//! included), clamped to the configured range.

use crate::batch::{Quad, QuadBatch, TexCoords, TexQuad};
use crate::color::Color;
use crate::elements::{ContainerConfig, ImageConfig, TexCoordMode};
use crate::engine::{text_of, Element, ElementKind, UiContext};
use crate::errors::{FramePhase, Pass, UiError};
use crate::font::{Font, GlyphStep};
use crate::math::{Dimensions, Vector2};
use crate::resolve::RenderSquare;
use crate::resources::Resources;
use crate::text::TextConfig;

impl UiContext {
    /// Appends the frame's quads to `batch`. Runs once per frame, after
    /// hit-testing.
    pub fn emit(&mut self, batch: &mut QuadBatch) -> Result<(), UiError> {
        self.expect_phase(Pass::Emit, FramePhase::HitTested)?;
        let start = batch.len();
        let range = self.config.sort_order_range.abs();

        let mut stack: Vec<(usize, f32)> = Vec::new();
        if !self.elements.is_empty() {
            stack.push((0, 0.0));
        }
        while let Some((index, inherited)) = stack.pop() {
            let element = &self.elements[index];
            let accumulated = match &element.kind {
                ElementKind::Container(config) => inherited + config.sort_order_override,
                _ => inherited,
            };
            let sort_order = (element.depth as f32 + accumulated).clamp(-range, range);

            let painter = Painter {
                resources: &self.resources,
                square: &self.render_square,
                batch: &mut *batch,
                sort_order,
                range,
            };
            match &element.kind {
                ElementKind::Container(config) => painter.container(element, config)?,
                ElementKind::Text { source, config } => {
                    painter.text(element, text_of(&self.arena, source), config)?
                }
                ElementKind::Image(config) => painter.image(element, config)?,
            }

            for child in element.children().rev() {
                stack.push((child, accumulated));
            }
        }

        self.stats.quads = batch.len() - start;
        self.phase = FramePhase::Emitted;
        tracing::debug!(
            quads = self.stats.quads,
            dropped = batch.dropped(),
            "emitted frame"
        );
        Ok(())
    }
}

/// Draws one element into the batch.
struct Painter<'a> {
    resources: &'a Resources,
    square: &'a RenderSquare,
    batch: &'a mut QuadBatch,
    sort_order: f32,
    range: f32,
}

impl Painter<'_> {
    /// Sort order for extras drawn just below the element itself.
    fn below(&self) -> f32 {
        (self.sort_order - 1.0).clamp(-self.range, self.range)
    }

    fn container(self, element: &Element, config: &ContainerConfig) -> Result<(), UiError> {
        if config.hidden {
            return Ok(());
        }
        let slice = self.resources.nine_slice(config.nine_slice)?;
        let border = slice.border_size * self.square.scale;
        self.batch.push_nine_slice(
            slice,
            element.pixel_box().center(),
            element.size,
            border,
            config.color,
            self.sort_order,
            config.fill_center,
        );
        Ok(())
    }

    fn text(self, element: &Element, text: &str, config: &TextConfig) -> Result<(), UiError> {
        let font = self.resources.font(config.font)?;
        let scale = config.scale * self.square.scale;

        if config.background {
            let slice = self.resources.nine_slice(config.background_slice)?;
            let border = slice.border_size * self.square.scale;
            let size = Dimensions::new(element.size.width + border * 2.0, element.size.height + border * 2.0);
            self.batch.push_nine_slice(
                slice,
                element.pixel_box().center(),
                size,
                border,
                config.background_color,
                self.below(),
                true,
            );
        }

        // First baseline sits one line below the top of the block.
        let origin = Vector2::new(
            element.position.x,
            element.position.y + element.size.height - font.line_height * scale,
        );
        push_glyphs(self.batch, font, text, origin, scale, config.color, self.sort_order);

        if config.outline != 0.0 {
            let offset = config.outline * self.square.scale;
            let below = self.below();
            for delta in [
                Vector2::new(offset, 0.0),
                Vector2::new(-offset, 0.0),
                Vector2::new(0.0, offset),
                Vector2::new(0.0, -offset),
            ] {
                push_glyphs(
                    self.batch,
                    font,
                    text,
                    origin + delta,
                    scale,
                    config.outline_color,
                    below,
                );
            }
        }
        Ok(())
    }

    fn image(self, element: &Element, config: &ImageConfig) -> Result<(), UiError> {
        let atlas = self.resources.atlas(config.texture)?;
        let region = match config.coords {
            TexCoordMode::Full => TexQuad::UNIT,
            TexCoordMode::Index(index) => TexQuad::atlas_index(atlas, index),
            TexCoordMode::Cell { row, column } => TexQuad::atlas_cell(atlas, row, column),
            TexCoordMode::Quad(quad) => quad,
        };
        self.batch.push(Quad {
            pos: element.position,
            size: element.size,
            pivot: config.pivot,
            color: config.color,
            sort_order: self.sort_order,
            texture: atlas.texture,
            tex_coords: TexCoords::from_quad(region),
        });
        Ok(())
    }
}

/// Lays out `text` with its first baseline starting at `origin` (pixels,
/// y up), one quad per glyph.
fn push_glyphs(
    batch: &mut QuadBatch,
    font: &Font,
    text: &str,
    origin: Vector2,
    scale: f32,
    color: Color,
    sort_order: f32,
) {
    let mut pen = Vector2::ZERO;
    for c in text.chars() {
        let glyph = match font.step(c) {
            GlyphStep::Newline => {
                pen.x = 0.0;
                pen.y += font.line_height;
                continue;
            }
            GlyphStep::Advance(advance) => {
                pen.x += advance;
                continue;
            }
            GlyphStep::Missing => {
                tracing::debug!(character = ?c, "no glyph, skipping");
                continue;
            }
            GlyphStep::Glyph(glyph) => glyph,
        };

        let q = font.aligned_quad(glyph, &mut pen);
        let x0 = origin.x + q.x0 * scale;
        let x1 = origin.x + q.x1 * scale;
        // Glyph space is y-down.
        let bottom = origin.y - q.y1 * scale;
        let top = origin.y - q.y0 * scale;
        batch.push(Quad {
            pos: Vector2::new(x0, bottom),
            size: Dimensions::new((x1 - x0).abs(), (top - bottom).abs()),
            pivot: Vector2::ZERO,
            color,
            sort_order,
            texture: font.texture,
            tex_coords: TexCoords {
                bottom_left: Vector2::new(q.s0, 1.0 - q.t1),
                bottom_right: Vector2::new(q.s1, 1.0 - q.t1),
                top_left: Vector2::new(q.s0, 1.0 - q.t0),
                top_right: Vector2::new(q.s1, 1.0 - q.t0),
            },
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::align::{AlignX, AlignY};
    use crate::engine::tests::test_context;
    use crate::id::Id;
    use crate::input::PointerInput;
    use crate::math::BoundingBox;
    use crate::resources::TextureId;

    fn emit_frame(ui: &mut UiContext) -> QuadBatch {
        let mut batch = QuadBatch::default();
        ui.set_viewport(Dimensions::new(1000.0, 1000.0));
        ui.set_pointer(PointerInput::default());
        ui.reindex().unwrap();
        ui.resolve_layout().unwrap();
        ui.hit_test().unwrap();
        ui.emit(&mut batch).unwrap();
        batch
    }

    #[test]
    fn hidden_containers_draw_nothing_but_their_children_do() {
        let mut ui = test_context(16);
        ui.container(
            |c| c.hidden(true).layout(|l| l.size(1000.0, 1000.0)),
            |ui| ui.container(|c| c.layout(|l| l.size(100.0, 100.0)).fill_center(false), |_| Ok(())),
        )
        .unwrap();
        let batch = emit_frame(&mut ui);
        assert_eq!(batch.len(), 8);
        assert!(batch.quads().iter().all(|q| q.sort_order == 1.0 && q.texture == 1));
        assert_eq!(ui.stats().quads, 8);
    }

    #[test]
    fn text_draws_one_quad_per_glyph_inside_its_box() {
        let mut ui = test_context(16);
        ui.container(
            |c| c.hidden(true).layout(|l| l.size(1000.0, 1000.0)),
            |ui| ui.text("A B\n\tC", |t| t.id("label").align(AlignX::CenterX, AlignY::Top)),
        )
        .unwrap();
        let batch = emit_frame(&mut ui);
        assert_eq!(batch.len(), 3);

        let text_box = ui.element_box(Id::new("label")).unwrap();
        assert_eq!(text_box.height, 16.0);
        for quad in batch.quads() {
            let bb = quad.bounds();
            assert!(bb.x >= text_box.x && bb.x + bb.width <= text_box.x + text_box.width);
            assert!(bb.y >= text_box.y && bb.y + bb.height <= text_box.y + text_box.height);
            assert_eq!(quad.size, Dimensions::new(8.0, 8.0));
        }
        // 'A' starts the top line, 'C' starts the second after a tab.
        assert_eq!(batch.quads()[0].pos, Vector2::new(text_box.x, text_box.y + 8.0));
        assert_eq!(batch.quads()[2].pos, Vector2::new(text_box.x + 6.0, text_box.y));
        // Texture v is flipped to v-up.
        let a = batch.quads()[0].tex_coords;
        assert!(a.top_left.y > a.bottom_left.y);
    }

    #[test]
    fn outline_and_background() {
        let mut ui = test_context(16);
        ui.container(
            |c| c.hidden(true).layout(|l| l.size(1000.0, 1000.0)),
            |ui| {
                ui.text("OK", |t| {
                    t.outline(2.0, Color::BLUE)
                        .background(true, Default::default(), Color::GRAY)
                })
            },
        )
        .unwrap();
        let batch = emit_frame(&mut ui);
        // 9 background quads, 2 glyphs, 4 outline copies of 2 glyphs.
        assert_eq!(batch.len(), 9 + 2 + 8);

        let quads = batch.quads();
        assert!(quads[..9].iter().all(|q| q.color == Color::GRAY && q.sort_order == 0.0));
        assert!(quads[9..11].iter().all(|q| q.color == Color::WHITE && q.sort_order == 1.0));
        assert!(quads[11..].iter().all(|q| q.color == Color::BLUE && q.sort_order == 0.0));
        assert_eq!(quads[11].pos.x, quads[9].pos.x + 2.0);
        assert_eq!(quads[13].pos.x, quads[9].pos.x - 2.0);
    }

    #[test]
    fn image_coordinate_modes() {
        let mut ui = test_context(16);
        let quad = TexQuad::new(Vector2::new(0.1, 0.2), Vector2::new(0.3, 0.4));
        ui.container(
            |c| c.hidden(true).layout(|l| l.size(1000.0, 1000.0)),
            |ui| {
                for coords in [
                    TexCoordMode::Full,
                    TexCoordMode::Index(5),
                    TexCoordMode::Cell { row: 0, column: 3 },
                    TexCoordMode::Quad(quad),
                ] {
                    ui.image(|i| {
                        i.texture(TextureId(0), coords)
                            .pivot(0.0, 0.0)
                            .layout(|l| l.size(64.0, 32.0))
                    })?;
                }
                Ok(())
            },
        )
        .unwrap();
        let batch = emit_frame(&mut ui);
        let coords: Vec<_> = batch.quads().iter().map(|q| q.tex_coords).collect();
        assert_eq!(coords[0], TexCoords::UNIT);
        assert_eq!(coords[1].bottom_left, Vector2::new(0.25, 0.5));
        assert_eq!(coords[2].top_right, Vector2::new(1.0, 1.0));
        assert_eq!(coords[3], TexCoords::from_quad(quad));

        let image = batch.quads()[0];
        assert_eq!(image.texture, 2);
        assert_eq!(image.bounds(), BoundingBox::new(500.0, 500.0, 64.0, 32.0));
    }

    #[test]
    fn overrides_accumulate_and_clamp() {
        let mut config = crate::config::UiConfig::new();
        config.sort_order_range(12.0);
        let mut ui = UiContext::new(config, crate::engine::tests::test_resources());
        ui.container(
            |c| c.hidden(true).sort_order_override(5.0).layout(|l| l.size(1000.0, 1000.0)),
            |ui| {
                ui.container(
                    |c| c.hidden(true).sort_order_override(3.0).layout(|l| l.size(100.0, 100.0)),
                    |ui| {
                        ui.image(|i| i.layout(|l| l.size(10.0, 10.0)))?;
                        ui.container(
                            |c| c.sort_order_override(4.0).layout(|l| l.size(50.0, 50.0)),
                            |_| Ok(()),
                        )
                    },
                )?;
                ui.image(|i| i.layout(|l| l.size(10.0, 10.0)))
            },
        )
        .unwrap();
        let batch = emit_frame(&mut ui);
        let orders: Vec<f32> = batch.quads().iter().map(|q| q.sort_order).collect();
        assert_eq!(orders.len(), 11);
        // Inner image: 2 + 5 + 3.
        assert_eq!(orders[0], 10.0);
        // Inner nine-slice: 2 + 5 + 3 + 4, clamped.
        assert!(orders[1..10].iter().all(|&o| o == 12.0));
        // Outer image: 1 + 5.
        assert_eq!(orders[10], 6.0);
    }

    #[test]
    fn text_extras_stay_inside_the_sort_range() {
        let mut config = crate::config::UiConfig::new();
        config.sort_order_range(4.0);
        let mut ui = UiContext::new(config, crate::engine::tests::test_resources());
        ui.container(
            |c| c.hidden(true).sort_order_override(-50.0).layout(|l| l.size(1000.0, 1000.0)),
            |ui| {
                ui.text("A", |t| {
                    t.outline(1.0, Color::BLUE)
                        .background(true, Default::default(), Color::GRAY)
                })
            },
        )
        .unwrap();
        let batch = emit_frame(&mut ui);
        // 9 background quads, 1 glyph, 4 outline copies.
        assert_eq!(batch.len(), 14);
        assert!(batch.quads().iter().all(|q| q.sort_order == -4.0));
    }

    #[test]
    fn emit_before_hit_test_is_out_of_order() {
        let mut ui = test_context(16);
        ui.reindex().unwrap();
        ui.resolve_layout().unwrap();
        assert_eq!(
            ui.emit(&mut QuadBatch::default()),
            Err(UiError::PassOutOfOrder {
                pass: Pass::Emit,
                phase: FramePhase::Resolved
            })
        );
    }
}
