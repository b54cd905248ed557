use crate::math::{Dimensions, Vector2};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Named anchor points on a parent box. `(0, 0)` is the bottom-left corner.
pub mod anchor {
    use crate::math::Vector2;

    pub const CENTER: Vector2 = Vector2::new(0.5, 0.5);
    pub const BOTTOM_LEFT: Vector2 = Vector2::new(0.0, 0.0);
    pub const BOTTOM: Vector2 = Vector2::new(0.5, 0.0);
    pub const BOTTOM_RIGHT: Vector2 = Vector2::new(1.0, 0.0);
    pub const LEFT: Vector2 = Vector2::new(0.0, 0.5);
    pub const RIGHT: Vector2 = Vector2::new(1.0, 0.5);
    pub const TOP_LEFT: Vector2 = Vector2::new(0.0, 1.0);
    pub const TOP: Vector2 = Vector2::new(0.5, 1.0);
    pub const TOP_RIGHT: Vector2 = Vector2::new(1.0, 1.0);
}

/// How one axis of an element's size is determined.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Sizing {
    /// A fixed extent in design units.
    Fixed(f32),
    /// A fraction of the parent's extent. Value should be between `0.0` and `1.0`.
    Percent(f32),
    /// Driven by content: measured text, or the largest fixed child of a
    /// container.
    Fit,
}

impl Default for Sizing {
    fn default() -> Self {
        Sizing::Fixed(0.0)
    }
}

impl Sizing {
    /// Extent of this axis given the parent's extent. `Fit` yields `None`
    /// because it depends on content the caller has to supply.
    pub fn resolve(self, parent_extent: f32) -> Option<f32> {
        match self {
            Sizing::Fixed(value) => Some(value),
            Sizing::Percent(percent) => Some(percent * parent_extent),
            Sizing::Fit => None,
        }
    }

    pub fn fixed_value(self) -> Option<f32> {
        match self {
            Sizing::Fixed(value) => Some(value),
            _ => None,
        }
    }
}

impl From<f32> for Sizing {
    fn from(value: f32) -> Self {
        Sizing::Fixed(value)
    }
}

/// Where an element sits inside its parent and how large it is.
///
/// The element's reference point lands on `anchor` (normalized on the
/// parent's box), then moves by `offset` design units.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Layout {
    pub anchor: Vector2,
    pub offset: Vector2,
    pub width: Sizing,
    pub height: Sizing,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            anchor: anchor::CENTER,
            offset: Vector2::ZERO,
            width: Sizing::default(),
            height: Sizing::default(),
        }
    }
}

impl Layout {
    #[inline]
    pub fn anchor(&mut self, x: f32, y: f32) -> &mut Self {
        self.anchor = Vector2::new(x, y);
        self
    }

    #[inline]
    pub fn anchored(&mut self, anchor: Vector2) -> &mut Self {
        self.anchor = anchor;
        self
    }

    #[inline]
    pub fn offset(&mut self, x: f32, y: f32) -> &mut Self {
        self.offset = Vector2::new(x, y);
        self
    }

    /// Sets both axes at once.
    #[inline]
    pub fn size(&mut self, width: impl Into<Sizing>, height: impl Into<Sizing>) -> &mut Self {
        self.width = width.into();
        self.height = height.into();
        self
    }

    #[inline]
    pub fn width(&mut self, width: impl Into<Sizing>) -> &mut Self {
        self.width = width.into();
        self
    }

    #[inline]
    pub fn height(&mut self, height: impl Into<Sizing>) -> &mut Self {
        self.height = height.into();
        self
    }

    /// Explicit fixed size, if both axes are fixed.
    pub fn fixed_size(&self) -> Option<Dimensions> {
        Some(Dimensions::new(
            self.width.fixed_value()?,
            self.height.fixed_value()?,
        ))
    }
}

/// Shorthand macro for [`Sizing::Fixed`].
#[macro_export]
macro_rules! fixed {
    ($val:expr) => {
        $crate::layout::Sizing::Fixed($val)
    };
}

/// Shorthand macro for [`Sizing::Percent`].
/// The value has to be in range `0.0..=1.0`.
#[macro_export]
macro_rules! percent {
    ($percent:expr) => {{
        const _: () = assert!(
            $percent >= 0.0 && $percent <= 1.0,
            "Percent value must be between 0.0 and 1.0 inclusive!"
        );
        $crate::layout::Sizing::Percent($percent)
    }};
}

/// Shorthand macro for [`Sizing::Fit`].
#[macro_export]
macro_rules! fit {
    () => {
        $crate::layout::Sizing::Fit
    };
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn fixed_macro() {
        let value = fixed!(123.0);
        assert!(matches!(value, Sizing::Fixed(123.0)));
    }

    #[test]
    fn percent_macro() {
        let value = percent!(0.5);
        assert!(matches!(value, Sizing::Percent(0.5)));
        assert_eq!(value.resolve(300.0), Some(150.0));
    }

    #[test]
    fn fit_needs_content() {
        assert_eq!(fit!().resolve(300.0), None);
    }

    #[test]
    fn builder_sets_fields() {
        let mut layout = Layout::default();
        layout.anchor(0.0, 1.0).offset(5.0, -5.0).size(200.0, percent!(0.25));
        assert_eq!(layout.anchor, anchor::TOP_LEFT);
        assert_eq!(layout.offset, Vector2::new(5.0, -5.0));
        assert_eq!(layout.width, Sizing::Fixed(200.0));
        assert_eq!(layout.fixed_size(), None);
    }
}
