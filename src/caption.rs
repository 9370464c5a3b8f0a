//! Caption slots, justification, and font sizes.
//!
//! The caption area holds six fixed slots: three columns (left, middle,
//! right), each with two stacked rows. A slot's column decides its
//! justification; the row decides its vertical order.

use num_traits::Float;

/// Horizontal caption column.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Column {
    Left,
    Middle,
    Right,
}

impl Column {
    /// Columns from left to right.
    pub const ALL: [Column; 3] = [Column::Left, Column::Middle, Column::Right];

    /// Text justification used for blocks in this column.
    pub const fn justification(self) -> Justification {
        match self {
            Column::Left => Justification::Left,
            Column::Middle => Justification::Center,
            Column::Right => Justification::Right,
        }
    }

    /// Array index, left to right.
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Line within a caption column.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Row {
    /// Upper line, usually the larger font.
    First,
    /// Lower line.
    Second,
}

impl Row {
    /// Rows from top to bottom.
    pub const ALL: [Row; 2] = [Row::First, Row::Second];

    /// Array index, top to bottom.
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Horizontal text justification inside a caption block.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Justification {
    Left,
    Center,
    Right,
}

/// One of the six caption positions.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Slot {
    pub column: Column,
    pub row: Row,
}

impl Slot {
    pub const L1: Slot = Slot::new(Column::Left, Row::First);
    pub const L2: Slot = Slot::new(Column::Left, Row::Second);
    pub const M1: Slot = Slot::new(Column::Middle, Row::First);
    pub const M2: Slot = Slot::new(Column::Middle, Row::Second);
    pub const R1: Slot = Slot::new(Column::Right, Row::First);
    pub const R2: Slot = Slot::new(Column::Right, Row::Second);

    /// All slots in parameter order: l1, l2, m1, m2, r1, r2.
    pub const ALL: [Slot; 6] = [
        Slot::L1,
        Slot::L2,
        Slot::M1,
        Slot::M2,
        Slot::R1,
        Slot::R2,
    ];

    pub const fn new(column: Column, row: Row) -> Self {
        Self { column, row }
    }

    /// Position in [`Slot::ALL`].
    pub const fn index(self) -> usize {
        self.column.index() * 2 + self.row.index()
    }

    /// Two-character key suffix, e.g. `"m1"`.
    pub const fn suffix(self) -> &'static str {
        match (self.column, self.row) {
            (Column::Left, Row::First) => "l1",
            (Column::Left, Row::Second) => "l2",
            (Column::Middle, Row::First) => "m1",
            (Column::Middle, Row::Second) => "m2",
            (Column::Right, Row::First) => "r1",
            (Column::Right, Row::Second) => "r2",
        }
    }

    /// Parse a `"l1"`..`"r2"` suffix (case-insensitive).
    pub fn from_suffix(s: &str) -> Option<Self> {
        let b = s.as_bytes();
        if b.len() != 2 {
            return None;
        }
        let column = match b[0].to_ascii_lowercase() {
            b'l' => Column::Left,
            b'm' => Column::Middle,
            b'r' => Column::Right,
            _ => return None,
        };
        let row = match b[1] {
            b'1' => Row::First,
            b'2' => Row::Second,
            _ => return None,
        };
        Some(Self::new(column, row))
    }

    pub const fn justification(self) -> Justification {
        self.column.justification()
    }
}

impl core::fmt::Display for Slot {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.suffix())
    }
}

/// Length unit a font size is expressed in.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Unit {
    Pixel,
    /// 1/72 inch.
    #[default]
    Point,
    Inch,
    Millimeter,
    /// 1/6 inch.
    Pica,
}

impl Unit {
    /// Units per inch. `None` for pixels, which don't depend on resolution.
    pub const fn per_inch(self) -> Option<f64> {
        match self {
            Unit::Pixel => None,
            Unit::Point => Some(72.0),
            Unit::Inch => Some(1.0),
            Unit::Millimeter => Some(25.4),
            Unit::Pica => Some(6.0),
        }
    }

    /// Short symbol, as accepted by the argument parser.
    pub const fn abbreviation(self) -> &'static str {
        match self {
            Unit::Pixel => "px",
            Unit::Point => "pt",
            Unit::Inch => "in",
            Unit::Millimeter => "mm",
            Unit::Pica => "pc",
        }
    }

    /// Parse a unit symbol or name (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        let eq = |names: &[&str]| names.iter().any(|n| s.eq_ignore_ascii_case(n));
        if eq(&["px", "pixel", "pixels"]) {
            Some(Unit::Pixel)
        } else if eq(&["pt", "point", "points"]) {
            Some(Unit::Point)
        } else if eq(&["in", "inch", "inches"]) {
            Some(Unit::Inch)
        } else if eq(&["mm", "millimeter", "millimeters", "millimetre", "millimetres"]) {
            Some(Unit::Millimeter)
        } else if eq(&["pc", "pica", "picas"]) {
            Some(Unit::Pica)
        } else {
            None
        }
    }
}

/// Resolution assumed when the host does not report one.
pub const DEFAULT_RESOLUTION: f64 = 72.0;

/// Font size with its unit.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct FontSize {
    pub value: u32,
    pub unit: Unit,
}

impl FontSize {
    pub const fn new(value: u32, unit: Unit) -> Self {
        Self { value, unit }
    }

    pub const fn points(value: u32) -> Self {
        Self::new(value, Unit::Point)
    }

    pub const fn pixels(value: u32) -> Self {
        Self::new(value, Unit::Pixel)
    }

    /// Size in pixels at `resolution` dots per inch, rounded, at least 1.
    ///
    /// A non-positive resolution falls back to [`DEFAULT_RESOLUTION`].
    pub fn to_pixels(&self, resolution: f64) -> u32 {
        let dpi = if resolution > 0.0 {
            resolution
        } else {
            DEFAULT_RESOLUTION
        };
        let px = match self.unit.per_inch() {
            None => self.value as f64,
            Some(per_inch) => self.value as f64 * dpi / per_inch,
        };
        let rounded = Float::round(px);
        if rounded < 1.0 { 1 } else { rounded as u32 }
    }
}
