//! Layout and interaction engine for immediate-mode UIs.
//!
//! Each frame the host describes its UI as a tree of containers, text and
//! images, then drives the tree through a fixed pipeline: breadth-first
//! reindexing, layout in a virtual design square, hit-testing against the
//! pointer, and emission of textured quads into a [`QuadBatch`].
//!
//! ```rust
//! use ply_anchor::prelude::*;
//!
//! let mut resources = Resources::new();
//! resources.add_font(Font::monospaced_grid(
//!     0,
//!     Dimensions::new(128.0, 128.0),
//!     Dimensions::new(8.0, 8.0),
//!     32,
//!     96,
//! ));
//! resources.add_nine_slice(NineSlice {
//!     texture: 1,
//!     total_size: 16.0,
//!     border_size: 4.0,
//!     quad: TexQuad::UNIT,
//! });
//!
//! let mut ui = UiContext::new(UiConfig::default(), resources);
//! let mut batch = QuadBatch::default();
//!
//! ui.set_viewport(Dimensions::new(800.0, 600.0));
//! ui.set_pointer(PointerInput::at(400.0, 300.0));
//! ui.container(
//!     |c| c.hidden(true).layout(|l| l.size(1000.0, 1000.0)),
//!     |ui| {
//!         ui.container(
//!             |c| c.id("play").blocks_cursor().layout(|l| l.size(200.0, 100.0)),
//!             |ui| ui.text("Play", |t| t.align(CenterX, CenterY)),
//!         )
//!     },
//! )?;
//! let stats = ui.finish_frame(&mut batch)?;
//!
//! assert_eq!(ui.hover_id(), Id::new("play"));
//! assert_eq!(stats.elements, 3);
//! # Ok::<(), UiError>(())
//! ```

pub mod align;
pub mod arena;
pub mod batch;
pub mod color;
pub mod config;
pub mod elements;
pub mod emit;
pub mod engine;
pub mod errors;
pub mod font;
pub mod id;
pub mod input;
pub mod layout;
pub mod math;
pub mod prelude;
pub mod reindex;
pub mod renderer;
pub mod resolve;
pub mod resources;
pub mod text;

pub use batch::{Quad, QuadBatch};
pub use color::Color;
pub use config::UiConfig;
pub use engine::{Element, ElementKind, FrameStats, UiContext};
pub use errors::UiError;
pub use id::Id;
pub use input::PointerInput;
