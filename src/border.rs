//! Border and caption layout computation.
//!
//! Computes the final canvas size and the placement of every caption block
//! from the original image dimensions, the inner and outer border widths, and
//! the measured size of each caption block. Pure geometry — no pixel
//! operations, no allocations, `no_std` compatible.
//!
//! ```text
//!     ┌───────────────────────────────┐  ─┐
//!     │ outer                         │   │ Bo
//!     │  ┌─────────────────────────┐  │  ─┤
//!     │  │ inner                   │  │   │ Bi
//!     │  │  ┌───────────────────┐  │  │  ─┘
//!     │  │  │                   │  │  │
//!     │  │  │      image W×H    │  │  │
//!     │  │  │                   │  │  │
//!     │  │  └───────────────────┘  │  │
//!     │  └─────────────────────────┘  │  ── text_top = H + Bi + Bo (image space)
//!     │     l1       m1        r1     │
//!     │     l2       m2        r2     │  ── text_bottom
//!     │                               │
//!     └───────────────────────────────┘
//! ```
//!
//! Coordinates come in two spaces. *Image space* has its origin at the
//! original image's top-left corner; caption offsets are reported there.
//! *Canvas space* has its origin at the final canvas's top-left corner and is
//! image space shifted by `Bi + Bo` on both axes.
//!
//! # Example
//!
//! ```
//! use infoborder::{BorderWidths, CaptionBlocks, Size, Slot};
//!
//! let mut blocks = CaptionBlocks::uniform(Size::new(500, 30), Size::new(300, 20));
//! blocks.set(Slot::M1, Size::new(801, 40));
//!
//! let layout = BorderWidths::new(4, 20).layout(4000, 3000, &blocks).unwrap();
//!
//! // Middle blocks center on floor(W/2) using their own width.
//! assert_eq!(layout.block(Slot::M1).x, 2000 - 400);
//! // Right blocks end flush with the image's right edge.
//! assert_eq!(layout.block(Slot::R2).right(), 4000);
//! // The tallest column drives the canvas height.
//! assert_eq!(layout.text_bottom, 3024 + 40 + 20 + 20);
//! ```

use crate::caption::{Column, Row, Slot};
use crate::geometry::{Offset, Rect, Size};

/// Smallest border width the argument schema allows.
pub const MIN_BORDER_WIDTH: u32 = 1;
/// Largest border width the argument schema allows.
pub const MAX_BORDER_WIDTH: u32 = 100;

/// Inner and outer border widths in pixels.
///
/// The argument schema keeps both in `1..=100`; the layout does not
/// re-check that range.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct BorderWidths {
    /// Ring immediately around the image.
    pub inner: u32,
    /// Ring around the inner border and the caption area. Also the gap
    /// between the two caption rows.
    pub outer: u32,
}

impl BorderWidths {
    pub const fn new(inner: u32, outer: u32) -> Self {
        Self { inner, outer }
    }

    /// Both rings together: the distance from a canvas edge to the image.
    pub const fn total(&self) -> u32 {
        self.inner + self.outer
    }

    /// Compute the layout for an image of the given dimensions.
    pub fn layout(
        &self,
        image_w: u32,
        image_h: u32,
        blocks: &CaptionBlocks,
    ) -> Result<BorderLayout, LayoutError> {
        BorderLayout::compute(image_w, image_h, *self, blocks)
    }
}

/// Measured size of each caption block, indexed by [`Slot`].
///
/// The host produces these by rendering each caption with its font and size.
/// Empty text still yields a block with the font's line height, so a row
/// never collapses.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct CaptionBlocks {
    sizes: [Size; 6],
}

impl CaptionBlocks {
    /// Build from a function of each slot.
    pub fn from_fn(mut f: impl FnMut(Slot) -> Size) -> Self {
        let mut sizes = [Size::default(); 6];
        for slot in Slot::ALL {
            sizes[slot.index()] = f(slot);
        }
        Self { sizes }
    }

    /// Every column gets `first` for row 1 and `second` for row 2.
    pub fn uniform(first: Size, second: Size) -> Self {
        Self::from_fn(|slot| match slot.row {
            Row::First => first,
            Row::Second => second,
        })
    }

    pub fn get(&self, slot: Slot) -> Size {
        self.sizes[slot.index()]
    }

    pub fn set(&mut self, slot: Slot, size: Size) {
        self.sizes[slot.index()] = size;
    }
}

/// Placement of one caption column, in image space.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ColumnLayout {
    pub column: Column,
    /// Row 1 and row 2 blocks.
    pub rows: [Rect; 2],
}

impl ColumnLayout {
    /// One past the lowest pixel of row 2.
    pub fn bottom(&self) -> i32 {
        self.rows[Row::Second.index()].bottom()
    }
}

/// A canvas resize: new size, and where the old content lands inside it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct CanvasResize {
    pub size: Size,
    pub offset: Offset,
}

/// Computed border layout.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct BorderLayout {
    /// Original image dimensions.
    pub image: Size,
    pub widths: BorderWidths,
    /// Top of the caption rows, image space. Always `H + Bi + Bo`.
    pub text_top: u32,
    /// Lowest caption pixel + 1 across all columns, image space.
    pub text_bottom: u32,
    /// Left, middle, right.
    pub columns: [ColumnLayout; 3],
    /// Final canvas dimensions.
    pub canvas: Size,
}

impl BorderLayout {
    /// Compute the layout. See the module docs for the geometry.
    pub fn compute(
        image_w: u32,
        image_h: u32,
        widths: BorderWidths,
        blocks: &CaptionBlocks,
    ) -> Result<Self, LayoutError> {
        if Size::new(image_w, image_h).is_empty() {
            return Err(LayoutError::ZeroImageDimension);
        }

        let text_top = checked(&[image_h, widths.inner, widths.outer])?;
        let image_right = i64::from(checked(&[image_w])?);
        let middle = image_right / 2;

        let mut columns = [ColumnLayout {
            column: Column::Left,
            rows: [Rect::default(); 2],
        }; 3];
        let mut text_bottom = text_top;

        for column in Column::ALL {
            let first = blocks.get(Slot::new(column, Row::First));
            let second = blocks.get(Slot::new(column, Row::Second));

            // Row 2 sits one outer width below row 1, whatever row 1's height.
            let second_top = checked(&[text_top, first.height, widths.outer])?;
            let bottom = checked(&[second_top, second.height])?;
            text_bottom = text_bottom.max(bottom);

            // Both edges of a block must fit in i32.
            let x = |w: u32| -> Result<i32, LayoutError> {
                let w = i64::from(checked(&[w])?);
                let left = match column {
                    Column::Left => 0,
                    Column::Middle => middle - w / 2,
                    Column::Right => image_right - w,
                };
                i32::try_from(left + w).map_err(|_| LayoutError::DimensionOverflow)?;
                i32::try_from(left).map_err(|_| LayoutError::DimensionOverflow)
            };

            columns[column.index()] = ColumnLayout {
                column,
                rows: [
                    Rect::new(x(first.width)?, text_top as i32, first.width, first.height),
                    Rect::new(
                        x(second.width)?,
                        second_top as i32,
                        second.width,
                        second.height,
                    ),
                ],
            };
        }

        let pad = 2 * widths.total();
        let canvas = Size::new(
            checked(&[image_w, pad])?,
            checked(&[text_bottom, pad])?,
        );

        Ok(Self {
            image: Size::new(image_w, image_h),
            widths,
            text_top,
            text_bottom,
            columns,
            canvas,
        })
    }

    /// Caption block for `slot`, image space.
    pub fn block(&self, slot: Slot) -> Rect {
        self.columns[slot.column.index()].rows[slot.row.index()]
    }

    /// Caption block for `slot`, canvas space.
    pub fn block_on_canvas(&self, slot: Slot) -> Rect {
        let d = self.widths.total() as i32;
        self.block(slot).translate(d, d)
    }

    /// Where the original image lands on the canvas.
    pub fn image_on_canvas(&self) -> Rect {
        let d = self.widths.total() as i32;
        Rect::new(d, d, self.image.width, self.image.height)
    }

    /// Inner border fill region, canvas space. Image plus `Bi` on every side.
    pub fn inner_fill(&self) -> Rect {
        Rect::at(
            Offset::new(self.widths.outer as i32, self.widths.outer as i32),
            self.image.inset_by(self.widths.inner),
        )
    }

    /// Outer border fill region: the whole canvas.
    pub fn outer_fill(&self) -> Rect {
        Rect::at(Offset::default(), self.canvas)
    }

    /// The two canvas resizes a host performs, in order.
    ///
    /// The first grows the image by the inner width on every side; the second
    /// grows that by the outer width and extends the bottom to hold the
    /// captions.
    pub fn resizes(&self) -> [CanvasResize; 2] {
        let inner = self.widths.inner as i32;
        let outer = self.widths.outer as i32;
        [
            CanvasResize {
                size: self.image.inset_by(self.widths.inner),
                offset: Offset::new(inner, inner),
            },
            CanvasResize {
                size: self.canvas,
                offset: Offset::new(outer, outer),
            },
        ]
    }
}

/// Layout computation error.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LayoutError {
    /// Image has zero width or height.
    ZeroImageDimension,
    /// A coordinate does not fit the signed 32-bit pixel space.
    DimensionOverflow,
}

impl core::fmt::Display for LayoutError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::ZeroImageDimension => f.write_str("image has zero width or height"),
            Self::DimensionOverflow => f.write_str("layout exceeds the addressable canvas size"),
        }
    }
}

impl core::error::Error for LayoutError {}

/// Sum that must stay addressable as an `i32` coordinate.
fn checked(terms: &[u32]) -> Result<u32, LayoutError> {
    let mut sum: u32 = 0;
    for &t in terms {
        sum = sum.checked_add(t).ok_or(LayoutError::DimensionOverflow)?;
    }
    if sum > i32::MAX as u32 {
        return Err(LayoutError::DimensionOverflow);
    }
    Ok(sum)
}
