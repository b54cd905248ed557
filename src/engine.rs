//! The UI context: per-frame element tree, construction stack, and the
//! interaction state that survives from one frame to the next.
//!
//! A frame is built with [`UiContext::begin`]/[`UiContext::end`] (or the
//! [`UiContext::container`], [`UiContext::text`] and [`UiContext::image`]
//! wrappers), then driven through `reindex`, `resolve_layout`, `hit_test`,
//! `emit` and `clear`, in that order. [`UiContext::finish_frame`] runs the
//! whole sequence.

use core::fmt;
use core::ops::Range;

use rustc_hash::FxHashMap;

use crate::arena::{ArenaSpan, StringArena};
use crate::batch::QuadBatch;
use crate::config::UiConfig;
use crate::elements::{ContainerConfig, ImageConfig};
use crate::errors::{CapacityWarnings, FramePhase, Pass, UiError};
use crate::id::Id;
use crate::input::PointerInput;
use crate::layout::Layout;
use crate::math::{BoundingBox, Dimensions, Vector2};
use crate::resolve::RenderSquare;
use crate::resources::Resources;
use crate::text::{TextConfig, TextMetrics};

// ============================================================================
// Elements
// ============================================================================

/// Where a text element's string lives.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TextSource {
    Static(&'static str),
    /// Copied into the frame's string arena.
    Arena(ArenaSpan),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ElementKind {
    Container(ContainerConfig),
    Text { source: TextSource, config: TextConfig },
    Image(ImageConfig),
}

/// A node of the per-frame tree.
///
/// `first_child`/`child_count` point into construction order while the
/// frame is being built and into the breadth-first order after `reindex`.
/// Only the latter is read by the passes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Element {
    /// Slot in the element array.
    pub index: usize,
    /// Distance from the root.
    pub depth: u32,
    pub kind: ElementKind,
    pub first_child: usize,
    pub child_count: usize,
    /// Reference point in design units.
    pub design_position: Vector2,
    pub design_size: Dimensions,
    /// Reference point in viewport pixels, after alignment for text.
    pub position: Vector2,
    pub size: Dimensions,
    /// Filled in for text during layout.
    pub text_metrics: TextMetrics,
}

impl Element {
    pub(crate) fn new(index: usize, depth: u32, kind: ElementKind) -> Self {
        Self {
            index,
            depth,
            kind,
            first_child: 0,
            child_count: 0,
            design_position: Vector2::ZERO,
            design_size: Dimensions::ZERO,
            position: Vector2::ZERO,
            size: Dimensions::ZERO,
            text_metrics: TextMetrics::default(),
        }
    }

    pub fn id(&self) -> Id {
        match &self.kind {
            ElementKind::Container(config) => config.id,
            ElementKind::Text { config, .. } => config.id,
            ElementKind::Image(config) => config.id,
        }
    }

    pub fn layout(&self) -> &Layout {
        match &self.kind {
            ElementKind::Container(config) => &config.layout,
            ElementKind::Text { config, .. } => &config.layout,
            ElementKind::Image(config) => &config.layout,
        }
    }

    pub fn blocks_cursor(&self) -> bool {
        match &self.kind {
            ElementKind::Container(config) => config.blocks_cursor,
            ElementKind::Text { config, .. } => config.blocks_cursor,
            ElementKind::Image(config) => config.blocks_cursor,
        }
    }

    /// The point of the element's box that `position` refers to. Containers
    /// are centered on it; text has been aligned so it is the bottom-left of
    /// the text block.
    pub fn pivot(&self) -> Vector2 {
        match &self.kind {
            ElementKind::Container(_) => Vector2::CENTER,
            ElementKind::Text { .. } => Vector2::ZERO,
            ElementKind::Image(config) => config.pivot,
        }
    }

    pub fn children(&self) -> Range<usize> {
        self.first_child..self.first_child + self.child_count
    }

    /// Resolved box in viewport pixels.
    pub fn pixel_box(&self) -> BoundingBox {
        BoundingBox::from_pivot(self.position, self.size, self.pivot())
    }
}

pub(crate) fn text_of<'a>(arena: &'a StringArena, source: &TextSource) -> &'a str {
    match source {
        TextSource::Static(text) => text,
        TextSource::Arena(span) => arena.get(*span),
    }
}

// ============================================================================
// Frame statistics
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Elements kept this frame.
    pub elements: usize,
    /// `begin` calls dropped because the element array was full, including
    /// everything opened beneath a dropped element.
    pub dropped_elements: usize,
    /// 1-based ordinal of the first dropped `begin` call.
    pub first_dropped_call: Option<usize>,
    /// Quads appended by `emit`.
    pub quads: usize,
}

impl fmt::Display for FrameStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} elements ({} dropped), {} quads",
            self.elements, self.dropped_elements, self.quads
        )
    }
}

// ============================================================================
// UiContext
// ============================================================================

pub struct UiContext {
    pub(crate) config: UiConfig,
    pub(crate) resources: Resources,

    pub(crate) elements: Vec<Element>,
    pub(crate) reindex_buffer: Vec<Element>,
    pub(crate) depth_counts: Vec<usize>,
    pub(crate) reindex_slots: Vec<usize>,
    open_element_stack: Vec<usize>,
    /// Open `begin` calls that were dropped for capacity.
    dropped_depth: usize,
    /// A root was opened this frame, kept or dropped.
    root_opened: bool,
    begin_calls: usize,
    pub(crate) arena: StringArena,

    pub(crate) phase: FramePhase,
    pub(crate) warnings: CapacityWarnings,
    pub(crate) stats: FrameStats,
    pub(crate) element_map: FxHashMap<Id, usize>,

    pub(crate) viewport: Dimensions,
    pub(crate) render_square: RenderSquare,

    pub(crate) pointer: PointerInput,
    pub(crate) hover_id: Id,
    pub(crate) down_id: Id,
    pub(crate) clicked_id: Id,
}

impl UiContext {
    pub fn new(config: UiConfig, resources: Resources) -> Self {
        let max_elements = config.max_elements;
        Self {
            arena: StringArena::with_capacity(config.arena_capacity),
            render_square: RenderSquare::identity(),
            config,
            resources,
            elements: Vec::with_capacity(max_elements),
            reindex_buffer: Vec::with_capacity(max_elements),
            depth_counts: Vec::new(),
            reindex_slots: Vec::with_capacity(max_elements),
            open_element_stack: Vec::new(),
            dropped_depth: 0,
            root_opened: false,
            begin_calls: 0,
            phase: FramePhase::Building,
            warnings: CapacityWarnings::default(),
            stats: FrameStats::default(),
            element_map: FxHashMap::default(),
            viewport: Dimensions::ZERO,
            pointer: PointerInput::default(),
            hover_id: Id::NONE,
            down_id: Id::NONE,
            clicked_id: Id::NONE,
        }
    }

    pub fn config(&self) -> &UiConfig {
        &self.config
    }

    pub fn resources(&self) -> &Resources {
        &self.resources
    }

    pub fn set_resources(&mut self, resources: Resources) {
        self.resources = resources;
    }

    /// Pixel size of the render target. Read by `resolve_layout`.
    pub fn set_viewport(&mut self, viewport: Dimensions) {
        self.viewport = viewport;
    }

    /// Pointer state for this frame. Read by `hit_test`, which consumes the
    /// press and release latches.
    pub fn set_pointer(&mut self, pointer: PointerInput) {
        self.pointer = pointer;
    }

    pub fn phase(&self) -> FramePhase {
        self.phase
    }

    pub fn warnings(&self) -> CapacityWarnings {
        self.warnings
    }

    pub fn stats(&self) -> FrameStats {
        self.stats
    }

    /// The current frame's elements, in construction order until `reindex`
    /// and breadth-first order after.
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// The string of a text element; empty for other kinds.
    pub fn text_of(&self, element: &Element) -> &str {
        match &element.kind {
            ElementKind::Text { source, .. } => text_of(&self.arena, source),
            _ => "",
        }
    }

    /// Number of elements currently open, dropped ones included.
    pub fn open_elements(&self) -> usize {
        self.open_element_stack.len() + self.dropped_depth
    }

    pub(crate) fn expect_phase(&self, pass: Pass, phase: FramePhase) -> Result<(), UiError> {
        if self.phase == phase {
            Ok(())
        } else {
            Err(UiError::PassOutOfOrder {
                pass,
                phase: self.phase,
            })
        }
    }

    // ========================================================================
    // Tree building
    // ========================================================================

    /// Decides whether the next `begin` gets a slot. A dropped call still
    /// opens a level so its `end` balances.
    fn admit(&mut self) -> Result<bool, UiError> {
        if self.dropped_depth == 0 && self.open_element_stack.is_empty() {
            if self.root_opened {
                return Err(UiError::MultipleRoots);
            }
            self.root_opened = true;
        }
        self.begin_calls += 1;
        if self.dropped_depth > 0 || self.elements.len() >= self.config.max_elements {
            if !self.warnings.max_elements_exceeded {
                self.warnings.max_elements_exceeded = true;
                self.stats.first_dropped_call = Some(self.begin_calls);
                tracing::warn!(
                    max_elements = self.config.max_elements,
                    call = self.begin_calls,
                    "element capacity reached, dropping elements for the rest of the frame"
                );
            }
            self.dropped_depth += 1;
            self.stats.dropped_elements += 1;
            return Ok(false);
        }
        Ok(true)
    }

    fn push_element(&mut self, kind: ElementKind) {
        let index = self.elements.len();
        let depth = match self.open_element_stack.last() {
            Some(&parent_index) => {
                let parent = &mut self.elements[parent_index];
                if parent.child_count == 0 {
                    parent.first_child = index;
                }
                parent.child_count += 1;
                parent.depth + 1
            }
            None => 0,
        };
        self.elements.push(Element::new(index, depth, kind));
        self.open_element_stack.push(index);
    }

    /// Opens a container as a child of the open element, or as the root.
    pub fn begin(&mut self, config: &ContainerConfig) -> Result<(), UiError> {
        self.expect_phase(Pass::Build, FramePhase::Building)?;
        if !config.hidden {
            self.resources.nine_slice(config.nine_slice)?;
        }
        if self.admit()? {
            self.push_element(ElementKind::Container(*config));
        }
        Ok(())
    }

    /// Closes the open element.
    pub fn end(&mut self) -> Result<(), UiError> {
        self.expect_phase(Pass::Build, FramePhase::Building)?;
        if self.dropped_depth > 0 {
            self.dropped_depth -= 1;
            return Ok(());
        }
        self.open_element_stack
            .pop()
            .map(|_| ())
            .ok_or(UiError::UnbalancedEnd)
    }

    /// Opens a container, runs `children`, and closes it again even when a
    /// child fails. Returns the first error.
    pub fn container(
        &mut self,
        configure: impl FnOnce(&mut ContainerConfig) -> &mut ContainerConfig,
        children: impl FnOnce(&mut Self) -> Result<(), UiError>,
    ) -> Result<(), UiError> {
        let mut config = ContainerConfig::default();
        configure(&mut config);
        self.begin(&config)?;
        let built = children(self);
        let closed = self.end();
        built.and(closed)
    }

    /// Adds a text leaf, copying `text` into the frame arena.
    pub fn text(
        &mut self,
        text: &str,
        configure: impl FnOnce(&mut TextConfig) -> &mut TextConfig,
    ) -> Result<(), UiError> {
        let mut config = TextConfig::default();
        configure(&mut config);
        self.push_text(text, &config)
    }

    /// Adds a text leaf that borrows `text` for the program's lifetime.
    pub fn text_literal(
        &mut self,
        text: &'static str,
        configure: impl FnOnce(&mut TextConfig) -> &mut TextConfig,
    ) -> Result<(), UiError> {
        let mut config = TextConfig::default();
        configure(&mut config);
        self.push_text_source(&config, |_| TextSource::Static(text))
    }

    /// Adds a text leaf formatted straight into the frame arena.
    ///
    /// ```ignore
    /// ui.text_fmt(format_args!("Gold: {}", gold), |t| t.anchor(0.0, 1.0))?;
    /// ```
    pub fn text_fmt(
        &mut self,
        args: fmt::Arguments<'_>,
        configure: impl FnOnce(&mut TextConfig) -> &mut TextConfig,
    ) -> Result<(), UiError> {
        let mut config = TextConfig::default();
        configure(&mut config);
        self.push_text_source(&config, |ui| match ui.arena.alloc_fmt(args) {
            Some(span) => TextSource::Arena(span),
            None => ui.arena_exhausted(),
        })
    }

    pub fn push_text(&mut self, text: &str, config: &TextConfig) -> Result<(), UiError> {
        self.push_text_source(config, |ui| match ui.arena.alloc_str(text) {
            Some(span) => TextSource::Arena(span),
            None => ui.arena_exhausted(),
        })
    }

    fn push_text_source(
        &mut self,
        config: &TextConfig,
        store: impl FnOnce(&mut Self) -> TextSource,
    ) -> Result<(), UiError> {
        self.expect_phase(Pass::Build, FramePhase::Building)?;
        self.resources.font(config.font)?;
        if config.background {
            self.resources.nine_slice(config.background_slice)?;
        }
        if self.admit()? {
            let source = store(self);
            self.push_element(ElementKind::Text {
                source,
                config: *config,
            });
        }
        self.end()
    }

    fn arena_exhausted(&mut self) -> TextSource {
        if !self.warnings.arena_capacity_exceeded {
            self.warnings.arena_capacity_exceeded = true;
            tracing::warn!(
                capacity = self.arena.capacity(),
                "string arena exhausted, storing empty text for the rest of the frame"
            );
        }
        TextSource::Static("")
    }

    pub fn image(&mut self, configure: impl FnOnce(&mut ImageConfig) -> &mut ImageConfig) -> Result<(), UiError> {
        let mut config = ImageConfig::default();
        configure(&mut config);
        self.push_image(&config)
    }

    pub fn push_image(&mut self, config: &ImageConfig) -> Result<(), UiError> {
        self.expect_phase(Pass::Build, FramePhase::Building)?;
        self.resources.atlas(config.texture)?;
        if self.admit()? {
            self.push_element(ElementKind::Image(*config));
        }
        self.end()
    }

    // ========================================================================
    // Frame read-back
    // ========================================================================

    /// Id of the deepest cursor-blocking element under the pointer, or
    /// [`Id::NONE`].
    pub fn hover_id(&self) -> Id {
        self.hover_id
    }

    /// Id that was hovered when the pointer was last pressed, until the
    /// matching release.
    pub fn down_id(&self) -> Id {
        self.down_id
    }

    /// Id that received a press and a release this frame, or [`Id::NONE`].
    pub fn clicked(&self) -> Id {
        self.clicked_id
    }

    pub fn hovered(&self, id: Id) -> bool {
        !id.is_none() && self.hover_id == id
    }

    pub fn pressed(&self, id: Id) -> bool {
        !id.is_none() && self.down_id == id
    }

    /// Resolved pixel box of the element with `id`, once layout has run this
    /// frame.
    pub fn element_box(&self, id: Id) -> Option<BoundingBox> {
        let index = *self.element_map.get(&id)?;
        self.elements.get(index).map(Element::pixel_box)
    }

    pub fn render_square(&self) -> RenderSquare {
        self.render_square
    }

    // ========================================================================
    // Frame lifecycle
    // ========================================================================

    /// Runs reindex, layout, hit-test and emit, then clears the tree.
    pub fn finish_frame(&mut self, batch: &mut QuadBatch) -> Result<FrameStats, UiError> {
        let result = self.run_passes(batch);
        let stats = self.stats;
        let cleared = self.clear();
        result.and(cleared).map(|_| stats)
    }

    fn run_passes(&mut self, batch: &mut QuadBatch) -> Result<(), UiError> {
        self.reindex()?;
        self.resolve_layout()?;
        self.hit_test()?;
        self.emit(batch)
    }

    /// Resets the tree and arena for the next frame. Hover and down ids
    /// survive. Always resets; reports elements left open.
    pub fn clear(&mut self) -> Result<(), UiError> {
        let open = self.open_elements();
        tracing::trace!(elements = self.elements.len(), open, "clearing frame");
        self.elements.clear();
        self.open_element_stack.clear();
        self.dropped_depth = 0;
        self.root_opened = false;
        self.begin_calls = 0;
        self.arena.reset();
        self.element_map.clear();
        self.warnings = CapacityWarnings::default();
        self.stats = FrameStats::default();
        self.phase = FramePhase::Building;
        if open > 0 {
            return Err(UiError::UnclosedElements { open });
        }
        Ok(())
    }
}

impl fmt::Debug for UiContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UiContext")
            .field("phase", &self.phase)
            .field("elements", &self.elements.len())
            .field("open", &self.open_elements())
            .field("hover_id", &self.hover_id)
            .field("down_id", &self.down_id)
            .finish_non_exhaustive()
    }
}
