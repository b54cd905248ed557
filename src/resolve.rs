//! Layout resolution: design-space boxes, projected to viewport pixels.
//!
//! Design space is a square of `design_size` units with its origin at the
//! bottom-left, y up. The root's implicit parent is that whole square. A
//! child's reference point lands on `parent.position + lerp(-0.5, 0.5,
//! anchor) * parent.size + offset`.

use crate::engine::{text_of, Element, ElementKind, UiContext};
use crate::errors::{FramePhase, Pass, UiError};
use crate::layout::Sizing;
use crate::math::{lerp, Dimensions, Vector2};
use crate::text::TextMetrics;

/// Maps design space onto the viewport: the design square is scaled to fit
/// the viewport's shorter side and centered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderSquare {
    /// Pixel position of the design origin.
    pub origin: Vector2,
    /// Pixels per design unit.
    pub scale: f32,
    /// Side of the projected square in pixels.
    pub size: f32,
}

impl RenderSquare {
    pub const fn identity() -> Self {
        Self {
            origin: Vector2::ZERO,
            scale: 1.0,
            size: 0.0,
        }
    }

    pub fn fit(viewport: Dimensions, design_size: f32) -> Self {
        if design_size <= 0.0 {
            return Self::identity();
        }
        let size = viewport.min_side().max(0.0);
        let scale = size / design_size;
        let center = Vector2::from(viewport) * 0.5;
        Self {
            origin: center - Vector2::splat(design_size * 0.5 * scale),
            scale,
            size,
        }
    }

    pub fn project(&self, point: Vector2) -> Vector2 {
        self.origin + point * self.scale
    }

    pub fn project_size(&self, size: Dimensions) -> Dimensions {
        size * self.scale
    }
}

/// Parent box in design units.
#[derive(Debug, Clone, Copy)]
struct ParentBox {
    position: Vector2,
    size: Dimensions,
}

/// `Fit` for a container: the largest fixed extent among its children.
fn fit_extent(elements: &[Element], parent: &Element, axis: fn(&Element) -> Sizing) -> f32 {
    if parent.child_count == 0 {
        return 0.0;
    }
    elements[parent.children()]
        .iter()
        .filter_map(|child| axis(child).fixed_value())
        .fold(0.0, f32::max)
}

impl UiContext {
    /// Computes every element's box in design units and viewport pixels.
    /// Runs once per frame, after `reindex`.
    pub fn resolve_layout(&mut self) -> Result<(), UiError> {
        self.expect_phase(Pass::Layout, FramePhase::Reindexed)?;
        let design_size = self.config.design_size;
        self.render_square = RenderSquare::fit(self.viewport, design_size);
        self.element_map.clear();

        if !self.elements.is_empty() {
            let square = ParentBox {
                position: Vector2::splat(design_size * 0.5),
                size: Dimensions::new(design_size, design_size),
            };
            self.resolve_element(0, square)?;
        }

        // Breadth-first order puts every parent before its children.
        for index in 0..self.elements.len() {
            let parent = &self.elements[index];
            let parent_box = ParentBox {
                position: parent.design_position,
                size: parent.design_size,
            };
            for child in parent.children() {
                self.resolve_element(child, parent_box)?;
            }
        }

        for element in &self.elements {
            let id = element.id();
            if !id.is_none() {
                self.element_map.insert(id, element.index);
            }
        }

        self.phase = FramePhase::Resolved;
        tracing::trace!(
            scale = self.render_square.scale,
            elements = self.elements.len(),
            "layout resolved"
        );
        Ok(())
    }

    fn resolve_element(&mut self, index: usize, parent: ParentBox) -> Result<(), UiError> {
        let element = &self.elements[index];
        let layout = *element.layout();

        let mut metrics = TextMetrics::default();
        let size = match &element.kind {
            ElementKind::Container(_) => {
                let width = layout
                    .width
                    .resolve(parent.size.width)
                    .unwrap_or_else(|| fit_extent(&self.elements, element, |e| e.layout().width));
                let height = layout
                    .height
                    .resolve(parent.size.height)
                    .unwrap_or_else(|| fit_extent(&self.elements, element, |e| e.layout().height));
                Dimensions::new(width, height)
            }
            ElementKind::Text { source, config } => {
                let font = self.resources.font(config.font)?;
                metrics = font.measure(text_of(&self.arena, source), config.scale);
                Dimensions::new(metrics.width, metrics.height)
            }
            ElementKind::Image(_) => Dimensions::new(
                layout.width.resolve(parent.size.width).unwrap_or(0.0),
                layout.height.resolve(parent.size.height).unwrap_or(0.0),
            ),
        };

        let anchor = Vector2::new(lerp(-0.5, 0.5, layout.anchor.x), lerp(-0.5, 0.5, layout.anchor.y));
        let design_position = parent.position + anchor.scale(Vector2::from(parent.size)) + layout.offset;
        let mut position = self.render_square.project(design_position);
        let pixel_size = self.render_square.project_size(size);

        if let ElementKind::Text { config, .. } = &element.kind {
            position.x -= config.align_x.fraction() * pixel_size.width;
            position.y -= config.align_y.fraction() * pixel_size.height;
        }

        let element = &mut self.elements[index];
        element.design_position = design_position;
        element.design_size = size;
        element.position = position;
        element.size = pixel_size;
        element.text_metrics = metrics;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::align::{AlignX, AlignY};
    use crate::engine::tests::test_context;
    use crate::id::Id;
    use crate::layout::anchor;
    use crate::math::BoundingBox;

    fn assert_near(actual: Vector2, expected: Vector2) {
        assert!(
            (actual.x - expected.x).abs() < 1e-3 && (actual.y - expected.y).abs() < 1e-3,
            "{actual:?} != {expected:?}"
        );
    }

    fn viewport() -> Dimensions {
        Dimensions::new(800.0, 600.0)
    }

    #[test]
    fn render_square_fits_the_shorter_side() {
        let square = RenderSquare::fit(viewport(), 1000.0);
        assert_eq!(square.scale, 0.6);
        assert_eq!(square.origin, Vector2::new(100.0, 0.0));
        assert_eq!(square.project(Vector2::new(500.0, 500.0)), Vector2::new(400.0, 300.0));
    }

    fn build_scenario(ui: &mut crate::engine::UiContext) {
        ui.container(
            |c| c.id("root").layout(|l| l.size(1000.0, 1000.0)),
            |ui| {
                ui.container(
                    |c| c.id("panel").blocks_cursor().layout(|l| l.anchored(anchor::CENTER).size(200.0, 100.0)),
                    |ui| ui.text("OK", |t| t.id("label").align(AlignX::CenterX, AlignY::CenterY)),
                )
            },
        )
        .unwrap();
    }

    #[test]
    fn centered_container_lands_on_the_viewport_center() {
        let mut ui = test_context(16);
        build_scenario(&mut ui);
        ui.set_viewport(viewport());
        ui.reindex().unwrap();
        ui.resolve_layout().unwrap();

        let panel = ui.elements()[1];
        assert_near(panel.position, Vector2::new(400.0, 300.0));
        assert_near(Vector2::from(panel.size), Vector2::new(120.0, 60.0));

        // "OK" measures 16x8 font units.
        let label = ui.elements()[2];
        assert_eq!(label.text_metrics.lines, 1);
        assert_eq!(label.design_size, Dimensions::new(16.0, 8.0));
        assert_near(label.pixel_box().center(), Vector2::new(400.0, 300.0));
        assert_eq!(ui.element_box(Id::new("label")), Some(label.pixel_box()));
    }

    #[test]
    fn corner_anchors_touch_parent_corners() {
        let mut ui = test_context(16);
        ui.container(
            |c| c.layout(|l| l.size(1000.0, 1000.0)),
            |ui| {
                ui.container(|c| c.id("bl").layout(|l| l.anchored(anchor::BOTTOM_LEFT).size(100.0, 50.0)), |_| Ok(()))?;
                ui.container(|c| c.id("tr").layout(|l| l.anchored(anchor::TOP_RIGHT).size(100.0, 50.0).offset(-50.0, -25.0)), |_| Ok(()))
            },
        )
        .unwrap();
        ui.set_viewport(Dimensions::new(1000.0, 1000.0));
        ui.reindex().unwrap();
        ui.resolve_layout().unwrap();

        // With no offset the reference point sits on the corner.
        assert_eq!(ui.elements()[1].design_position, Vector2::new(0.0, 0.0));
        // Offsetting by half the size puts the child's own corner on it.
        let tr = ui.element_box(Id::new("tr")).unwrap();
        assert_eq!(tr, BoundingBox::new(900.0, 950.0, 100.0, 50.0));
        assert_eq!((tr.x + tr.width, tr.y + tr.height), (1000.0, 1000.0));
    }

    #[test]
    fn percent_and_fit_sizes() {
        let mut ui = test_context(16);
        ui.container(
            |c| c.layout(|l| l.size(crate::percent!(0.5), crate::fit!())),
            |ui| {
                ui.container(|c| c.layout(|l| l.size(10.0, 40.0)), |_| Ok(()))?;
                ui.container(|c| c.layout(|l| l.size(30.0, crate::percent!(1.0))), |_| Ok(()))
            },
        )
        .unwrap();
        ui.set_viewport(Dimensions::new(1000.0, 1000.0));
        ui.reindex().unwrap();
        ui.resolve_layout().unwrap();

        let elements = ui.elements();
        assert_eq!(elements[0].design_size, Dimensions::new(500.0, 40.0));
        // Percent of the fitted parent.
        assert_eq!(elements[2].design_size, Dimensions::new(30.0, 40.0));
    }

    #[test]
    fn text_alignment_moves_the_block() {
        let mut ui = test_context(16);
        ui.container(
            |c| c.layout(|l| l.size(1000.0, 1000.0)),
            |ui| {
                ui.text("AB", |t| t.id("left"))?;
                ui.text("AB", |t| t.id("right").align(AlignX::Right, AlignY::Top).scale(2.0))
            },
        )
        .unwrap();
        ui.set_viewport(Dimensions::new(1000.0, 1000.0));
        ui.reindex().unwrap();
        ui.resolve_layout().unwrap();

        let left = ui.element_box(Id::new("left")).unwrap();
        assert_eq!(left, BoundingBox::new(500.0, 500.0, 16.0, 8.0));
        let right = ui.element_box(Id::new("right")).unwrap();
        assert_eq!(right, BoundingBox::new(468.0, 484.0, 32.0, 16.0));
    }

    #[test]
    fn layout_is_deterministic() {
        let run = || {
            let mut ui = test_context(16);
            build_scenario(&mut ui);
            ui.set_viewport(Dimensions::new(1366.0, 768.0));
            ui.reindex().unwrap();
            ui.resolve_layout().unwrap();
            ui.elements()
                .iter()
                .map(|e| (e.position.x.to_bits(), e.position.y.to_bits(), e.size.width.to_bits(), e.size.height.to_bits()))
                .collect::<Vec<_>>()
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn layout_before_reindex_is_out_of_order() {
        let mut ui = test_context(16);
        assert_eq!(
            ui.resolve_layout(),
            Err(UiError::PassOutOfOrder {
                pass: Pass::Layout,
                phase: FramePhase::Building
            })
        );
    }
}
