use crate::engine::UiContext;
use crate::errors::{FramePhase, Pass, UiError};
use crate::id::Id;
use crate::math::Vector2;

/// One frame of primary-pointer state, in viewport pixels (y up).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerInput {
    pub position: Vector2,
    /// The button went down since the last frame.
    pub pressed: bool,
    /// The button went up since the last frame.
    pub released: bool,
}

impl PointerInput {
    pub fn at(x: f32, y: f32) -> Self {
        Self {
            position: Vector2::new(x, y),
            ..Default::default()
        }
    }

    pub fn press(mut self) -> Self {
        self.pressed = true;
        self
    }

    pub fn release(mut self) -> Self {
        self.released = true;
        self
    }
}

impl UiContext {
    /// Finds the deepest cursor-blocking element under the pointer and
    /// updates the hover, down and clicked ids. Among equally deep hits the
    /// one drawn first (pre-order) wins. Runs once per frame, after layout.
    pub fn hit_test(&mut self) -> Result<(), UiError> {
        self.expect_phase(Pass::HitTest, FramePhase::Resolved)?;
        let position = self.pointer.position;

        let mut winner: Option<usize> = None;
        let mut stack: Vec<usize> = Vec::new();
        if !self.elements.is_empty() {
            stack.push(0);
        }
        while let Some(index) = stack.pop() {
            let element = &self.elements[index];
            if element.blocks_cursor()
                && element.pixel_box().contains(position)
                && winner.map_or(true, |best| element.depth > self.elements[best].depth)
            {
                winner = Some(index);
            }
            stack.extend(element.children().rev());
        }

        self.hover_id = winner.map_or(Id::NONE, |index| self.elements[index].id());
        self.clicked_id = Id::NONE;
        if self.pointer.pressed {
            self.down_id = self.hover_id;
        }
        if self.pointer.released {
            if !self.down_id.is_none() && self.down_id == self.hover_id {
                self.clicked_id = self.down_id;
                tracing::debug!(id = %self.clicked_id, "clicked");
            }
            self.down_id = Id::NONE;
        }
        self.pointer.pressed = false;
        self.pointer.released = false;

        self.phase = FramePhase::HitTested;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::align::{AlignX, AlignY};
    use crate::engine::tests::test_context;
    use crate::math::Dimensions;

    fn run_to_hit_test(ui: &mut UiContext, pointer: PointerInput) {
        ui.set_viewport(Dimensions::new(1000.0, 1000.0));
        ui.set_pointer(pointer);
        ui.reindex().unwrap();
        ui.resolve_layout().unwrap();
        ui.hit_test().unwrap();
    }

    /// Two overlapping boxes: `shallow` is a direct child of the root and
    /// `deep` sits one level further down, built before or after `shallow`.
    fn build_overlap(ui: &mut UiContext, deep_first: bool) {
        ui.container(
            |c| c.layout(|l| l.size(1000.0, 1000.0)),
            |ui| {
                let deep = |ui: &mut UiContext| {
                    ui.container(|c| c.layout(|l| l.size(100.0, 100.0)), |ui| {
                        ui.container(|c| c.id("deep").blocks_cursor().layout(|l| l.size(50.0, 50.0)), |_| Ok(()))
                    })
                };
                let shallow = |ui: &mut UiContext| {
                    ui.container(|c| c.id("shallow").blocks_cursor().layout(|l| l.size(300.0, 300.0)), |_| Ok(()))
                };
                if deep_first {
                    deep(ui)?;
                    shallow(ui)
                } else {
                    shallow(ui)?;
                    deep(ui)
                }
            },
        )
        .unwrap();
    }

    #[test]
    fn deepest_box_wins_regardless_of_order() {
        for deep_first in [false, true] {
            let mut ui = test_context(16);
            build_overlap(&mut ui, deep_first);
            run_to_hit_test(&mut ui, PointerInput::at(500.0, 500.0));
            assert_eq!(ui.hover_id(), Id::new("deep"));
        }
    }

    #[test]
    fn shallower_box_outside_the_deep_one() {
        let mut ui = test_context(16);
        build_overlap(&mut ui, true);
        run_to_hit_test(&mut ui, PointerInput::at(600.0, 600.0));
        assert_eq!(ui.hover_id(), Id::new("shallow"));
    }

    #[test]
    fn equal_depth_goes_to_the_first_built() {
        let mut ui = test_context(16);
        ui.container(
            |c| c.layout(|l| l.size(1000.0, 1000.0)),
            |ui| {
                ui.container(|c| c.id("first").blocks_cursor().layout(|l| l.size(100.0, 100.0)), |_| Ok(()))?;
                ui.container(|c| c.id("second").blocks_cursor().layout(|l| l.size(100.0, 100.0)), |_| Ok(()))
            },
        )
        .unwrap();
        run_to_hit_test(&mut ui, PointerInput::at(500.0, 500.0));
        assert_eq!(ui.hover_id(), Id::new("first"));
    }

    #[test]
    fn non_blocking_elements_are_ignored() {
        let mut ui = test_context(16);
        ui.container(|c| c.id("root").layout(|l| l.size(1000.0, 1000.0)), |_| Ok(())).unwrap();
        run_to_hit_test(&mut ui, PointerInput::at(500.0, 500.0));
        assert_eq!(ui.hover_id(), Id::NONE);
    }

    #[test]
    fn box_edges_are_inclusive() {
        let mut ui = test_context(16);
        build_overlap(&mut ui, false);
        // `shallow` spans 350..=650.
        run_to_hit_test(&mut ui, PointerInput::at(650.0, 350.0));
        assert_eq!(ui.hover_id(), Id::new("shallow"));
    }

    #[test]
    fn press_then_release_on_the_same_element_clicks() {
        let mut ui = test_context(16);
        let frame = |ui: &mut UiContext, pointer: PointerInput| {
            build_overlap(ui, false);
            run_to_hit_test(ui, pointer);
            let ids = (ui.hover_id(), ui.down_id(), ui.clicked());
            ui.clear().unwrap();
            ids
        };

        let on_deep = PointerInput::at(500.0, 500.0);
        assert_eq!(frame(&mut ui, on_deep.press()), (Id::new("deep"), Id::new("deep"), Id::NONE));
        // Held across a frame.
        assert_eq!(frame(&mut ui, on_deep), (Id::new("deep"), Id::new("deep"), Id::NONE));
        assert_eq!(frame(&mut ui, on_deep.release()), (Id::new("deep"), Id::NONE, Id::new("deep")));
        // The click lasts one frame.
        assert_eq!(frame(&mut ui, on_deep).2, Id::NONE);
    }

    #[test]
    fn release_elsewhere_does_not_click() {
        let mut ui = test_context(16);
        build_overlap(&mut ui, false);
        run_to_hit_test(&mut ui, PointerInput::at(500.0, 500.0).press());
        ui.clear().unwrap();

        build_overlap(&mut ui, false);
        run_to_hit_test(&mut ui, PointerInput::at(600.0, 600.0).release());
        assert_eq!(ui.clicked(), Id::NONE);
        assert_eq!(ui.down_id(), Id::NONE);
    }

    #[test]
    fn end_to_end_hover_on_centered_panel() {
        let mut ui = test_context(16);
        ui.container(
            |c| c.id("root").layout(|l| l.size(1000.0, 1000.0)),
            |ui| {
                ui.container(
                    |c| c.id("panel").blocks_cursor().layout(|l| l.size(200.0, 100.0)),
                    |ui| ui.text_literal("OK", |t| t.align(crate::align::AlignX::CenterX, crate::align::AlignY::CenterY)),
                )
            },
        )
        .unwrap();
        ui.set_viewport(Dimensions::new(800.0, 600.0));
        ui.set_pointer(PointerInput::at(400.0, 300.0));
        ui.reindex().unwrap();
        ui.resolve_layout().unwrap();
        ui.hit_test().unwrap();
        assert_eq!(ui.hover_id(), Id::new("panel"));
    }

    #[test]
    fn image_hit_box_uses_its_pivot() {
        let build = |ui: &mut UiContext| {
            ui.container(
                |c| c.layout(|l| l.size(1000.0, 1000.0)),
                |ui| ui.image(|i| i.id("img").blocks_cursor().pivot(0.0, 0.0).layout(|l| l.size(100.0, 100.0))),
            )
            .unwrap();
        };
        // Bottom-left pivot: the box spans (500, 500) to (600, 600).
        let mut ui = test_context(16);
        build(&mut ui);
        run_to_hit_test(&mut ui, PointerInput::at(550.0, 550.0));
        assert_eq!(ui.hover_id(), Id::new("img"));

        ui.clear().unwrap();
        build(&mut ui);
        run_to_hit_test(&mut ui, PointerInput::at(450.0, 450.0));
        assert_eq!(ui.hover_id(), Id::NONE);
    }

    #[test]
    fn text_blocks_cursor_over_its_aligned_block() {
        let build = |ui: &mut UiContext| {
            ui.container(
                |c| c.layout(|l| l.size(1000.0, 1000.0)),
                |ui| ui.text_literal("OK", |t| t.id("label").blocks_cursor().align(AlignX::CenterX, AlignY::CenterY)),
            )
            .unwrap();
        };
        // Two 8x8 cells centered on (500, 500).
        let mut ui = test_context(16);
        build(&mut ui);
        run_to_hit_test(&mut ui, PointerInput::at(500.0, 500.0).press());
        assert!(ui.hovered(Id::new("label")));
        assert!(ui.pressed(Id::new("label")));
        assert!(!ui.hovered(Id::NONE));

        ui.clear().unwrap();
        build(&mut ui);
        run_to_hit_test(&mut ui, PointerInput::at(520.0, 500.0));
        assert!(!ui.hovered(Id::new("label")));
    }
}
