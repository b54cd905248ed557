/// Horizontal text alignment relative to the text's anchor point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum AlignX {
    /// Text starts at the anchor and runs to the right.
    #[default]
    Left,
    CenterX,
    /// Text ends at the anchor.
    Right,
}

impl AlignX {
    /// Fraction of the measured width subtracted from the anchor.
    pub const fn fraction(self) -> f32 {
        match self {
            AlignX::Left => 0.0,
            AlignX::CenterX => 0.5,
            AlignX::Right => 1.0,
        }
    }
}

/// Vertical text alignment relative to the text's anchor point (y-up).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum AlignY {
    /// The bottom of the text block sits on the anchor.
    #[default]
    Bottom,
    CenterY,
    /// The top of the text block sits on the anchor.
    Top,
}

impl AlignY {
    /// Fraction of the measured height subtracted from the anchor.
    pub const fn fraction(self) -> f32 {
        match self {
            AlignY::Bottom => 0.0,
            AlignY::CenterY => 0.5,
            AlignY::Top => 1.0,
        }
    }
}
