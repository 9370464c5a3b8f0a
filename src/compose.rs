//! Compositing order for a computed border layout.
//!
//! The border is built from layers stacked back to front: the outer fill
//! covering the whole canvas, the inner fill around the image, then each
//! caption block. Those eight layers fold into one border layer. The original
//! image stays above it, unmerged.
//!
//! Each step carries its own color, so executing a plan never depends on any
//! ambient "current color" in the host.

use crate::border::BorderLayout;
use crate::caption::Slot;
use crate::geometry::{Color, Rect, Size};

/// Order in which caption layers merge onto the border, first to last.
///
/// Later entries end up on top where blocks overlap.
pub const MERGE_ORDER: [Slot; 6] = [Slot::R2, Slot::R1, Slot::M2, Slot::M1, Slot::L2, Slot::L1];

/// Colors of everything the procedure paints.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Palette {
    pub inner: Color,
    pub outer: Color,
    pub text: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            inner: Color::white(),
            outer: Color::rgb(0x30, 0x30, 0x30),
            text: Color::white(),
        }
    }
}

/// What a compositing step paints into its region.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Content {
    /// Solid fill.
    Fill(Color),
    /// Rendered caption text for a slot, in the given color.
    Caption { slot: Slot, color: Color },
    /// The original image layers.
    Image,
}

/// One layer of the composite: a region in canvas space and its content.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct CompositeStep {
    pub region: Rect,
    pub content: Content,
}

/// Number of layers folded into the border layer.
pub const MERGED_STEPS: usize = 2 + MERGE_ORDER.len();

/// Back-to-front compositing plan for a [`BorderLayout`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct CompositePlan {
    pub canvas: Size,
    steps: [CompositeStep; MERGED_STEPS + 1],
}

impl CompositePlan {
    pub fn new(layout: &BorderLayout, palette: Palette) -> Self {
        let fill = |region, color| CompositeStep {
            region,
            content: Content::Fill(color),
        };
        let caption = |slot| CompositeStep {
            region: layout.block_on_canvas(slot),
            content: Content::Caption {
                slot,
                color: palette.text,
            },
        };
        Self {
            canvas: layout.canvas,
            steps: [
                fill(layout.outer_fill(), palette.outer),
                fill(layout.inner_fill(), palette.inner),
                caption(MERGE_ORDER[0]),
                caption(MERGE_ORDER[1]),
                caption(MERGE_ORDER[2]),
                caption(MERGE_ORDER[3]),
                caption(MERGE_ORDER[4]),
                caption(MERGE_ORDER[5]),
                CompositeStep {
                    region: layout.image_on_canvas(),
                    content: Content::Image,
                },
            ],
        }
    }

    /// All steps, back to front.
    pub fn steps(&self) -> &[CompositeStep] {
        &self.steps
    }

    /// The steps folded into the single border layer, back to front.
    ///
    /// The first is the outer fill the rest merge down onto.
    pub fn merged(&self) -> &[CompositeStep] {
        &self.steps[..MERGED_STEPS]
    }

    /// Topmost step covering the canvas pixel `(x, y)`.
    pub fn topmost_at(&self, x: i32, y: i32) -> Option<&CompositeStep> {
        self.steps.iter().rev().find(|s| s.region.contains(x, y))
    }
}
