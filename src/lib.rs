//! Caption border layout for astrophotography images.
//!
//! Computes where an inner border, an outer border and six caption blocks
//! (left/middle/right × two lines) go beneath an image, and drives a host
//! image editor through the edit as a single procedure.
//!
//! The layout itself is pure geometry: no pixel operations, no allocations,
//! `no_std` compatible.
//!
//! # Modules
//!
//! - [`geometry`] — sizes, rectangles, offsets and colors
//! - [`caption`] — caption slots, justification, font sizes and units
//! - [`border`] — the border layout computation
//! - [`compose`] — back-to-front compositing order for a computed layout
//! - `args` — parameter schema and query-string arguments (requires `alloc`)
//! - `procedure` — plugin registration, dialog form and the run entry point (requires `alloc`)
//! - `svg` — SVG preview of a layout (feature `svg`)
//!
//! # Example
//!
//! ```
//! use infoborder::{BorderWidths, CaptionBlocks, Size};
//!
//! let blocks = CaptionBlocks::uniform(Size::new(600, 30), Size::new(400, 20));
//! let layout = BorderWidths::new(4, 20).layout(4000, 3000, &blocks).unwrap();
//!
//! assert_eq!(layout.text_top, 3024);
//! assert_eq!(layout.canvas, Size::new(4048, 3142));
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

#[cfg(feature = "alloc")]
extern crate alloc;

pub mod border;
pub mod caption;
pub mod compose;
pub mod geometry;

#[cfg(feature = "alloc")]
pub mod args;
#[cfg(feature = "alloc")]
pub mod procedure;
#[cfg(feature = "svg")]
pub mod svg;

pub use border::{BorderLayout, BorderWidths, CaptionBlocks, ColumnLayout, LayoutError};
pub use caption::{Column, FontSize, Justification, Row, Slot, Unit};
pub use compose::{CompositePlan, CompositeStep, Content};
pub use geometry::{Color, Offset, Rect, Size};

#[cfg(feature = "alloc")]
pub use args::{Arguments, ParseWarning};
#[cfg(feature = "alloc")]
pub use procedure::{Document, RunMode, Status};
