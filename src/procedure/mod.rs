//! Host procedure: registration, invocation, and the edit itself.
//!
//! A host asks a [`PlugIn`] which procedures it provides and constructs them
//! by name. Running the procedure collects arguments (through a [`Dialog`]
//! when interactive), then edits the [`Document`] inside one undo group:
//!
//! 1. render the six captions into text layers, which measures them
//! 2. compute the [`BorderLayout`]; if it fails, remove the caption layers
//!    again and report a calling error
//! 3. give every original layer an alpha channel and move the caption layers
//!    into place
//! 4. grow the canvas by the inner width and add the inner fill
//! 5. grow it by the outer width, extend it for the captions, add the outer fill
//! 6. merge the inner fill and the captions down onto the outer fill, in
//!    [`CompositePlan`] order

pub mod form;
mod host;

pub use form::{Dialog, FormItem, Headless, Response};
pub use host::Document;

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use crate::args::{Arguments, PARAMS, ParamSpec};
use crate::border::{BorderLayout, CaptionBlocks, LayoutError};
use crate::caption::Slot;
use crate::compose::{CompositePlan, Content};
use crate::geometry::Size;

/// Registered procedure name.
pub const PROCEDURE_NAME: &str = "plug-in-porridge-astrophoto-info-border";

/// Which images the procedure can run on.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Sensitivity {
    /// Needs an open image; the number of selected drawables doesn't matter.
    ImageAnyDrawables,
}

/// Authors, copyright and date shown by the host.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Attribution {
    pub authors: &'static str,
    pub copyright: &'static str,
    pub date: &'static str,
}

/// Everything a host needs to register the procedure.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Procedure {
    pub name: &'static str,
    /// Menu label; `_` marks the mnemonic.
    pub menu_label: &'static str,
    pub menu_path: &'static str,
    pub blurb: &'static str,
    pub help: &'static str,
    pub attribution: Attribution,
    pub sensitivity: Sensitivity,
    /// Ordered, typed, defaulted parameters.
    pub params: &'static [ParamSpec],
}

impl Procedure {
    /// The info border procedure.
    pub const fn info_border() -> Self {
        Self {
            name: PROCEDURE_NAME,
            menu_label: "Image _info border",
            menu_path: "<Image>/Astrophotography",
            blurb: "Adds an information border to an image",
            help: "Adds a border around an image with six pieces of informative text at the \
                   bottom: {left, middle, right}x{1st line, 2nd line}.",
            attribution: Attribution {
                authors: "Marcin Owsiany",
                copyright: "Copyright 2026 Marcin Owsiany",
                date: "2026-02-23",
            },
            sensitivity: Sensitivity::ImageAnyDrawables,
            params: &PARAMS,
        }
    }
}

/// A plug-in: a set of procedures constructible by name.
pub trait PlugIn {
    /// Names of every procedure this plug-in provides.
    fn query_procedures(&self) -> &'static [&'static str];

    /// Build the named procedure, or `None` if this plug-in doesn't have it.
    fn create_procedure(&self, name: &str) -> Option<Procedure>;
}

/// Plug-in providing [`PROCEDURE_NAME`].
#[derive(Copy, Clone, Debug, Default)]
pub struct InfoBorderPlugIn;

impl PlugIn for InfoBorderPlugIn {
    fn query_procedures(&self) -> &'static [&'static str] {
        &[PROCEDURE_NAME]
    }

    fn create_procedure(&self, name: &str) -> Option<Procedure> {
        (name == PROCEDURE_NAME).then(Procedure::info_border)
    }
}

/// How the host invoked the procedure.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RunMode {
    /// Show the configuration form first.
    Interactive,
    /// Arguments supplied directly.
    NonInteractive,
    /// Re-run with the arguments of the previous invocation.
    WithLastVals,
}

/// Outcome reported back to the host.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Status {
    Success,
    /// The user closed the dialog; nothing was changed.
    Cancel,
    /// The procedure could not run with what it was given.
    CallingError(String),
}

/// Run the procedure.
///
/// `document` is `None` when no image is open, which is a calling error
/// raised before anything is touched; so is an image with a zero dimension.
/// A layout that overflows is only found once the captions are measured, and
/// the caption layers are removed again before the calling error. In [`RunMode::Interactive`] the
/// dialog may edit `arguments`; cancelling it returns [`Status::Cancel`].
/// Host errors abort the edit and are returned as `Err` after the undo group
/// is closed.
pub fn run<D: Document, G: Dialog>(
    mode: RunMode,
    document: Option<&mut D>,
    arguments: &mut Arguments,
    dialog: &mut G,
) -> Result<Status, D::Error> {
    let Some(document) = document else {
        let message = format!("Procedure '{PROCEDURE_NAME}' works with images only.");
        log::warn!("{message}");
        return Ok(Status::CallingError(message));
    };

    let image = document.size();
    if image.is_empty() {
        return Ok(layout_failed(LayoutError::ZeroImageDimension, image));
    }

    if mode == RunMode::Interactive
        && dialog.run(form::TITLE, form::FORM, arguments) == Response::Cancelled
    {
        log::info!("{PROCEDURE_NAME}: cancelled");
        return Ok(Status::Cancel);
    }

    document.undo_group_start();
    let result = add_border(document, arguments);
    document.undo_group_end();
    result
}

/// The edit itself. Runs inside the undo group.
fn add_border<D: Document>(document: &mut D, arguments: &Arguments) -> Result<Status, D::Error> {
    let originals = document.layers();
    let image = document.size();
    let palette = arguments.palette();
    let font = arguments.font.as_deref();

    let mut captions: Vec<D::Layer> = Vec::with_capacity(Slot::ALL.len());
    for slot in Slot::ALL {
        let field = arguments.caption(slot);
        captions.push(document.insert_text_layer(
            &field.text,
            font,
            field.size,
            slot.justification(),
            palette.text,
        )?);
    }
    let blocks = CaptionBlocks::from_fn(|slot| document.layer_size(captions[slot.index()]));

    let widths = arguments.widths();
    let layout = match BorderLayout::compute(image.width, image.height, widths, &blocks) {
        Ok(layout) => layout,
        Err(e) => {
            for &layer in &captions {
                document.remove_layer(layer)?;
            }
            return Ok(layout_failed(e, image));
        }
    };
    log::debug!(
        "{PROCEDURE_NAME}: {}x{} -> canvas {}x{}, captions {}..{}",
        image.width,
        image.height,
        layout.canvas.width,
        layout.canvas.height,
        layout.text_top,
        layout.text_bottom,
    );

    for layer in originals {
        document.add_alpha(layer)?;
    }
    for slot in Slot::ALL {
        document.set_offsets(captions[slot.index()], layout.block(slot).origin())?;
    }

    let plan = CompositePlan::new(&layout, palette);
    let [grow_inner, grow_outer] = layout.resizes();

    document.resize(grow_inner)?;
    let inner = document.insert_fill_layer("inner border", palette.inner)?;
    document.resize(grow_outer)?;
    document.insert_fill_layer("Info border", palette.outer)?;

    // The outer fill is at the bottom; fold everything else onto it.
    for step in &plan.merged()[1..] {
        let layer = match step.content {
            Content::Fill(_) => inner,
            Content::Caption { slot, .. } => captions[slot.index()],
            Content::Image => continue,
        };
        log::trace!("{PROCEDURE_NAME}: merge {:?} at {:?}", step.content, step.region);
        document.merge_down(layer)?;
    }

    Ok(Status::Success)
}

fn layout_failed(e: LayoutError, image: Size) -> Status {
    log::warn!("{PROCEDURE_NAME}: {e} ({}x{})", image.width, image.height);
    Status::CallingError(format!("Cannot lay out border: {e}."))
}
