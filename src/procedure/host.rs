//! Image editing operations the host provides.

use alloc::vec::Vec;

use crate::border::CanvasResize;
use crate::caption::{FontSize, Justification};
use crate::geometry::{Color, Offset, Size};

/// An open image document in the host editor.
///
/// The procedure only calls these operations; rendering, layer storage and
/// undo history belong to the host. Errors are the host's own and are passed
/// back unchanged.
pub trait Document {
    /// Handle to a layer in this document.
    type Layer: Copy + Eq + core::fmt::Debug;
    /// Host failure.
    type Error;

    /// Current canvas size.
    fn size(&self) -> Size;

    /// All layers, top to bottom.
    fn layers(&self) -> Vec<Self::Layer>;

    /// Give a layer an alpha channel if it lacks one.
    fn add_alpha(&mut self, layer: Self::Layer) -> Result<(), Self::Error>;

    /// Render `text` into a new layer at the bottom of the stack, at offset
    /// `(0, 0)`. The layer's size is the measured caption block; it keeps the
    /// font's line height even when `text` is empty.
    fn insert_text_layer(
        &mut self,
        text: &str,
        font: Option<&str>,
        size: FontSize,
        justification: Justification,
        color: Color,
    ) -> Result<Self::Layer, Self::Error>;

    /// Delete a layer from the document.
    fn remove_layer(&mut self, layer: Self::Layer) -> Result<(), Self::Error>;

    /// Size of a layer.
    fn layer_size(&self, layer: Self::Layer) -> Size;

    /// Move a layer so its top-left corner is at `offset`.
    fn set_offsets(&mut self, layer: Self::Layer, offset: Offset) -> Result<(), Self::Error>;

    /// Resize the canvas, shifting every layer by `resize.offset`.
    fn resize(&mut self, resize: CanvasResize) -> Result<(), Self::Error>;

    /// New layer at the bottom of the stack covering the whole current
    /// canvas, filled with `color`.
    fn insert_fill_layer(&mut self, name: &str, color: Color) -> Result<Self::Layer, Self::Error>;

    /// Merge `layer` onto the layer directly below it, expanding as needed.
    /// Returns the merged layer.
    fn merge_down(&mut self, layer: Self::Layer) -> Result<Self::Layer, Self::Error>;

    /// Open an undo group; edits until [`undo_group_end`](Self::undo_group_end)
    /// undo as one step.
    fn undo_group_start(&mut self);

    fn undo_group_end(&mut self);
}
