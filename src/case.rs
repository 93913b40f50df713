//! Marching squares cell case encoding and the fixed exit-direction table.
//!
//! Each grid cell is classified into one of 16 cases from the below-cutoff
//! state of its four corner samples. The tracer walks cell to cell using the
//! exit direction each non-trivial, non-saddle case defines.

/// Direction to move to the next cell when following a contour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Move {
    /// column++ (+x)
    Right,
    /// row++ (+y)
    Down,
    /// column-- (-x)
    Left,
    /// row-- (-y)
    Up,
}

/// One of the 16 marching squares cell configurations.
///
/// Variants are named for the set of corners that lie *below* the cutoff.
/// The packed bit encoding is `tl(8) | tr(4) | br(2) | bl(1)`: note the
/// bottom-right/bottom-left bit order. The tracer's exit table depends on
/// this exact encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum CellCase {
    /// 0b0000: no corner below the cutoff, no line
    Empty = 0,
    /// 0b0001: bottom-left only
    BottomLeft = 1,
    /// 0b0010: bottom-right only
    BottomRight = 2,
    /// 0b0011: bottom edge pair
    Bottom = 3,
    /// 0b0100: top-right only
    TopRight = 4,
    /// 0b0101: top-right and bottom-left (ambiguous saddle)
    SaddleRising = 5,
    /// 0b0110: right edge pair
    Right = 6,
    /// 0b0111: all but top-left
    NotTopLeft = 7,
    /// 0b1000: top-left only
    TopLeft = 8,
    /// 0b1001: left edge pair
    Left = 9,
    /// 0b1010: top-left and bottom-right (ambiguous saddle)
    SaddleFalling = 10,
    /// 0b1011: all but top-right
    NotTopRight = 11,
    /// 0b1100: top edge pair
    Top = 12,
    /// 0b1101: all but bottom-right
    NotBottomRight = 13,
    /// 0b1110: all but bottom-left
    NotBottomLeft = 14,
    /// 0b1111: every corner below the cutoff, no line
    Full = 15,
}

impl CellCase {
    /// Build a case from the below-cutoff state of the four corners.
    pub fn from_corners(tl: bool, tr: bool, br: bool, bl: bool) -> Self {
        let mut bits = 0u8;
        if tl {
            bits |= 8;
        }
        if tr {
            bits |= 4;
        }
        if br {
            bits |= 2;
        }
        if bl {
            bits |= 1;
        }
        Self::from_bits(bits)
    }

    /// Build a case from its packed 4-bit value. Only the low nibble is read.
    pub fn from_bits(bits: u8) -> Self {
        match bits & 0x0f {
            0 => CellCase::Empty,
            1 => CellCase::BottomLeft,
            2 => CellCase::BottomRight,
            3 => CellCase::Bottom,
            4 => CellCase::TopRight,
            5 => CellCase::SaddleRising,
            6 => CellCase::Right,
            7 => CellCase::NotTopLeft,
            8 => CellCase::TopLeft,
            9 => CellCase::Left,
            10 => CellCase::SaddleFalling,
            11 => CellCase::NotTopRight,
            12 => CellCase::Top,
            13 => CellCase::NotBottomRight,
            14 => CellCase::NotBottomLeft,
            _ => CellCase::Full,
        }
    }

    /// The packed 4-bit value of this case.
    pub fn bits(self) -> u8 {
        self as u8
    }

    /// True for the two cases that carry no contour line at all.
    pub fn is_trivial(self) -> bool {
        matches!(self, CellCase::Empty | CellCase::Full)
    }

    /// True for the two diagonally ambiguous saddle cases.
    pub fn is_saddle(self) -> bool {
        matches!(self, CellCase::SaddleRising | CellCase::SaddleFalling)
    }

    /// Fixed exit direction for this case.
    ///
    /// Exactly one exit per non-trivial, non-saddle case; the entry side is
    /// implicitly the opposite of the previous exit, which keeps the filled
    /// area on the tracer's left. Trivial and saddle cases return `None`;
    /// saddles are resolved from the entry direction by the tracer.
    pub fn exit_move(self) -> Option<Move> {
        match self {
            CellCase::BottomLeft => Some(Move::Left),
            CellCase::BottomRight => Some(Move::Down),
            CellCase::Bottom => Some(Move::Left),
            CellCase::TopRight => Some(Move::Right),
            CellCase::Right => Some(Move::Down),
            CellCase::NotTopLeft => Some(Move::Left),
            CellCase::TopLeft => Some(Move::Up),
            CellCase::Left => Some(Move::Up),
            CellCase::NotTopRight => Some(Move::Up),
            CellCase::Top => Some(Move::Right),
            CellCase::NotBottomRight => Some(Move::Right),
            CellCase::NotBottomLeft => Some(Move::Down),
            CellCase::Empty
            | CellCase::Full
            | CellCase::SaddleRising
            | CellCase::SaddleFalling => None,
        }
    }
}
