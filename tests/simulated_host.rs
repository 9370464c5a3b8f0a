//! End-to-end runs of the procedure against a simulated host.
//!
//! The simulated document keeps real layers of pixels. Every image pixel
//! remembers its (x, y) origin and every caption pixel remembers its slot, so
//! after the host has resized, filled and merged, any geometric error in the
//! edit shows up as a mismatch against the pure [`CompositePlan`].

#![cfg(feature = "alloc")]

use infoborder::args::{self, Arguments};
use infoborder::border::CanvasResize;
use infoborder::compose::{CompositePlan, Content};
use infoborder::procedure::{self, Dialog, FormItem, PROCEDURE_NAME, Response};
use infoborder::*;

// ---- Simulated host ----

/// What a layer pixel holds.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Pixel {
    /// Original image pixel at (x, y).
    Source(u32, u32),
    Fill(Color),
    /// Rendered caption text for a slot.
    Glyph(Slot),
}

#[derive(Clone, Debug, PartialEq)]
struct Layer {
    id: u32,
    name: String,
    offset: Offset,
    size: Size,
    alpha: bool,
    /// Row-major; `None` is transparent.
    pixels: Vec<Option<Pixel>>,
}

impl Layer {
    fn solid(id: u32, name: &str, offset: Offset, size: Size, pixel: Pixel) -> Self {
        Self {
            id,
            name: name.to_string(),
            offset,
            size,
            alpha: true,
            pixels: vec![Some(pixel); (size.width * size.height) as usize],
        }
    }

    fn rect(&self) -> Rect {
        Rect::at(self.offset, self.size)
    }

    /// Pixel at absolute canvas coordinates.
    fn at(&self, x: i32, y: i32) -> Option<Pixel> {
        if !self.rect().contains(x, y) {
            return None;
        }
        let lx = (x - self.offset.x) as u32;
        let ly = (y - self.offset.y) as u32;
        self.pixels[(ly * self.size.width + lx) as usize]
    }
}

#[derive(Debug, PartialEq, Eq)]
enum HostError {
    MergeFailed,
}

#[derive(Clone, Debug, PartialEq)]
struct SimDocument {
    canvas: Size,
    /// Top to bottom.
    layers: Vec<Layer>,
    next_id: u32,
    texts: usize,
    undo_starts: u32,
    undo_ends: u32,
    /// Fail the n-th merge (0-based).
    fail_merge: Option<u32>,
    merges: u32,
}

impl SimDocument {
    fn new(w: u32, h: u32) -> Self {
        let pixels = (0..h)
            .flat_map(|y| (0..w).map(move |x| Some(Pixel::Source(x, y))))
            .collect();
        Self {
            canvas: Size::new(w, h),
            layers: vec![Layer {
                id: 0,
                name: "Background".to_string(),
                offset: Offset::default(),
                size: Size::new(w, h),
                alpha: false,
                pixels,
            }],
            next_id: 1,
            texts: 0,
            undo_starts: 0,
            undo_ends: 0,
            fail_merge: None,
            merges: 0,
        }
    }

    fn index(&self, id: u32) -> usize {
        self.layers
            .iter()
            .position(|l| l.id == id)
            .unwrap_or_else(|| panic!("no layer {id}"))
    }

    fn push_bottom(&mut self, mut layer: Layer) -> u32 {
        layer.id = self.next_id;
        self.next_id += 1;
        let id = layer.id;
        self.layers.push(layer);
        id
    }

    /// Composite all layers onto the canvas, top layer wins.
    fn flatten(&self) -> Vec<Option<Pixel>> {
        let mut out = Vec::with_capacity((self.canvas.width * self.canvas.height) as usize);
        for y in 0..self.canvas.height as i32 {
            for x in 0..self.canvas.width as i32 {
                out.push(self.layers.iter().find_map(|l| l.at(x, y)));
            }
        }
        out
    }
}

/// Text metrics: glyphs half as wide as the pixel size, line height a
/// quarter taller. Empty text still has a line height.
fn measure(text: &str, size: FontSize) -> Size {
    let px = size.to_pixels(72.0);
    let width = (text.chars().count() as u32 * px / 2).max(1);
    Size::new(width, px + px / 4)
}

impl Document for SimDocument {
    type Layer = u32;
    type Error = HostError;

    fn size(&self) -> Size {
        self.canvas
    }

    fn layers(&self) -> Vec<u32> {
        self.layers.iter().map(|l| l.id).collect()
    }

    fn add_alpha(&mut self, layer: u32) -> Result<(), HostError> {
        let i = self.index(layer);
        self.layers[i].alpha = true;
        Ok(())
    }

    fn insert_text_layer(
        &mut self,
        text: &str,
        _font: Option<&str>,
        size: FontSize,
        justification: Justification,
        _color: Color,
    ) -> Result<u32, HostError> {
        // Captions arrive in slot order; tag each layer's pixels with its slot.
        let slot = Slot::ALL[self.texts];
        assert_eq!(slot.justification(), justification);
        self.texts += 1;
        let size = measure(text, size);
        let layer = Layer::solid(0, text, Offset::default(), size, Pixel::Glyph(slot));
        Ok(self.push_bottom(layer))
    }

    fn remove_layer(&mut self, layer: u32) -> Result<(), HostError> {
        let i = self.index(layer);
        self.layers.remove(i);
        Ok(())
    }

    fn layer_size(&self, layer: u32) -> Size {
        self.layers[self.index(layer)].size
    }

    fn set_offsets(&mut self, layer: u32, offset: Offset) -> Result<(), HostError> {
        let i = self.index(layer);
        self.layers[i].offset = offset;
        Ok(())
    }

    fn resize(&mut self, resize: CanvasResize) -> Result<(), HostError> {
        self.canvas = resize.size;
        for l in &mut self.layers {
            l.offset = l.offset.translate(resize.offset.x, resize.offset.y);
        }
        Ok(())
    }

    fn insert_fill_layer(&mut self, name: &str, color: Color) -> Result<u32, HostError> {
        let layer = Layer::solid(0, name, Offset::default(), self.canvas, Pixel::Fill(color));
        Ok(self.push_bottom(layer))
    }

    fn merge_down(&mut self, layer: u32) -> Result<u32, HostError> {
        if self.fail_merge == Some(self.merges) {
            return Err(HostError::MergeFailed);
        }
        self.merges += 1;

        let i = self.index(layer);
        let upper = self.layers.remove(i);
        let lower = &self.layers[i];

        // Expand to the union of both layers.
        let (a, b) = (upper.rect(), lower.rect());
        let x0 = a.x.min(b.x);
        let y0 = a.y.min(b.y);
        let x1 = a.right().max(b.right());
        let y1 = a.bottom().max(b.bottom());
        let mut pixels = Vec::with_capacity(((x1 - x0) * (y1 - y0)) as usize);
        for y in y0..y1 {
            for x in x0..x1 {
                pixels.push(upper.at(x, y).or_else(|| lower.at(x, y)));
            }
        }
        let merged = Layer {
            id: lower.id,
            name: lower.name.clone(),
            offset: Offset::new(x0, y0),
            size: Size::new((x1 - x0) as u32, (y1 - y0) as u32),
            alpha: true,
            pixels,
        };
        self.layers[i] = merged;
        Ok(self.layers[i].id)
    }

    fn undo_group_start(&mut self) {
        self.undo_starts += 1;
    }

    fn undo_group_end(&mut self) {
        self.undo_ends += 1;
    }
}

/// Dialog that applies a query string, or cancels.
struct ScriptedDialog {
    edits: &'static str,
    response: Response,
    shown: u32,
}

impl ScriptedDialog {
    fn new(edits: &'static str, response: Response) -> Self {
        Self {
            edits,
            response,
            shown: 0,
        }
    }
}

impl Dialog for ScriptedDialog {
    fn run(&mut self, title: &str, form: &[FormItem], arguments: &mut Arguments) -> Response {
        assert_eq!(title, "AstroPhoto Info Border");
        assert_eq!(form.len(), 7);
        self.shown += 1;
        if self.response == Response::Proceed {
            assert!(arguments.apply_query(self.edits).is_empty());
        }
        self.response
    }
}

// ---- Helpers ----

fn run_batch(doc: &mut SimDocument, query: &str) -> Status {
    let parsed = args::parse(query);
    assert!(parsed.warnings.is_empty(), "{:?}", parsed.warnings);
    let mut arguments = parsed.arguments;
    procedure::run(RunMode::NonInteractive, Some(doc), &mut arguments, &mut procedure::Headless)
        .expect("host error")
}

/// The layout the procedure should have produced for `arguments` on a `w`×`h` image.
fn expected_layout(w: u32, h: u32, arguments: &Arguments) -> BorderLayout {
    let blocks = CaptionBlocks::from_fn(|slot| {
        let c = arguments.caption(slot);
        measure(&c.text, c.size)
    });
    arguments.widths().layout(w, h, &blocks).unwrap()
}

/// Every canvas pixel matches the topmost plan step covering it.
fn assert_matches_plan(doc: &SimDocument, plan: &CompositePlan, image_origin: i32) {
    assert_eq!(doc.canvas, plan.canvas);
    let flat = doc.flatten();
    for y in 0..plan.canvas.height as i32 {
        for x in 0..plan.canvas.width as i32 {
            let got = flat[(y as u32 * plan.canvas.width + x as u32) as usize];
            let want = match plan.topmost_at(x, y).map(|s| s.content) {
                Some(Content::Fill(c)) => Some(Pixel::Fill(c)),
                Some(Content::Caption { slot, .. }) => Some(Pixel::Glyph(slot)),
                Some(Content::Image) => Some(Pixel::Source(
                    (x - image_origin) as u32,
                    (y - image_origin) as u32,
                )),
                None => None,
            };
            assert_eq!(got, want, "pixel ({x}, {y})");
        }
    }
}

const QUERY: &str = "border-size-inner=2&border-size-outer=5\
    &border-color-inner=%23eeeeee&border-color-outer=%23101010&font-color=gold\
    &text-l1=Newt+80&font-size-l1=12&font-unit-l1=px\
    &text-l2=EQ6&font-size-l2=8&font-unit-l2=px\
    &text-m1=M42&font-size-m1=16&font-unit-m1=px\
    &text-m2=30x120s&font-size-m2=8&font-unit-m2=px\
    &text-r1=Jan&font-size-r1=12&font-unit-r1=px\
    &text-r2=2026-02-23&font-size-r2=6&font-unit-r2=px";

// ---- Tests ----

#[test]
fn batch_run_matches_plan_pixel_for_pixel() {
    let mut doc = SimDocument::new(80, 50);
    assert_eq!(run_batch(&mut doc, QUERY), Status::Success);

    let arguments = args::parse(QUERY).arguments;
    let layout = expected_layout(80, 50, &arguments);
    let plan = CompositePlan::new(&layout, arguments.palette());
    assert_matches_plan(&doc, &plan, 7);
}

#[test]
fn canvas_grows_by_both_borders_and_captions() {
    let mut doc = SimDocument::new(80, 50);
    run_batch(&mut doc, QUERY);
    // 12px + 8px fonts → rows 15 and 10 tall; middle 16px → 20 tall.
    // text_top = 50 + 2 + 5 = 57; middle bottom = 57 + 20 + 5 + 10 = 92.
    assert_eq!(doc.canvas, Size::new(80 + 14, 92 + 14));
}

#[test]
fn border_folds_into_one_layer_under_image() {
    let mut doc = SimDocument::new(80, 50);
    run_batch(&mut doc, QUERY);
    assert_eq!(doc.layers.len(), 2);
    assert_eq!(doc.layers[0].name, "Background");
    assert!(doc.layers[0].alpha);
    assert_eq!(doc.layers[1].name, "Info border");
    assert_eq!(doc.layers[1].rect(), Rect::new(0, 0, 94, 106));
}

#[test]
fn edit_runs_in_one_undo_group() {
    let mut doc = SimDocument::new(40, 30);
    run_batch(&mut doc, "");
    assert_eq!((doc.undo_starts, doc.undo_ends), (1, 1));
}

#[test]
fn default_arguments_at_reference_size() {
    let mut doc = SimDocument::new(400, 300);
    let mut arguments = Arguments::default();
    let status = procedure::run(
        RunMode::WithLastVals,
        Some(&mut doc),
        &mut arguments,
        &mut procedure::Headless,
    );
    assert_eq!(status, Ok(Status::Success));

    let layout = expected_layout(400, 300, &arguments);
    assert_eq!(layout.text_top, 324);
    assert_eq!(doc.canvas, layout.canvas);
    assert_eq!(doc.canvas.width, 448);
    assert_matches_plan(&doc, &CompositePlan::new(&layout, arguments.palette()), 24);
}

#[test]
fn empty_caption_keeps_row_height() {
    let mut with_text = SimDocument::new(80, 50);
    run_batch(&mut with_text, QUERY);

    let mut without = SimDocument::new(80, 50);
    let emptied = QUERY
        .replace("text-l1=Newt+80", "text-l1=")
        .replace("text-m1=M42", "text-m1=");
    run_batch(&mut without, &emptied);

    assert_eq!(with_text.canvas, without.canvas);
    let arguments = args::parse(&emptied).arguments;
    let layout = expected_layout(80, 50, &arguments);
    assert_eq!(layout.block(Slot::M1).height, 20);
    assert_eq!(layout.block(Slot::M2).y, 57 + 20 + 5);
}

#[test]
fn repeated_runs_identical() {
    let mut a = SimDocument::new(64, 48);
    let mut b = SimDocument::new(64, 48);
    run_batch(&mut a, QUERY);
    run_batch(&mut b, QUERY);
    assert_eq!(a.canvas, b.canvas);
    assert_eq!(a.flatten(), b.flatten());
}

#[test]
fn interactive_dialog_edits_apply() {
    let mut doc = SimDocument::new(80, 50);
    let mut arguments = args::parse(QUERY).arguments;
    let mut dialog = ScriptedDialog::new("border-size-outer=9", Response::Proceed);

    let status = procedure::run(RunMode::Interactive, Some(&mut doc), &mut arguments, &mut dialog);
    assert_eq!(status, Ok(Status::Success));
    assert_eq!(dialog.shown, 1);
    assert_eq!(arguments.border_size_outer, 9);

    let layout = expected_layout(80, 50, &arguments);
    assert_eq!(doc.canvas, layout.canvas);
    assert_matches_plan(&doc, &CompositePlan::new(&layout, arguments.palette()), 11);
}

#[test]
fn batch_run_skips_dialog() {
    let mut doc = SimDocument::new(20, 20);
    let mut arguments = Arguments::default();
    let mut dialog = ScriptedDialog::new("", Response::Cancelled);
    let status =
        procedure::run(RunMode::NonInteractive, Some(&mut doc), &mut arguments, &mut dialog);
    assert_eq!(status, Ok(Status::Success));
    assert_eq!(dialog.shown, 0);
}

#[test]
fn cancel_leaves_document_untouched() {
    let mut doc = SimDocument::new(32, 24);
    let before = doc.clone();
    let mut arguments = Arguments::default();
    let mut dialog = ScriptedDialog::new("", Response::Cancelled);

    let status = procedure::run(RunMode::Interactive, Some(&mut doc), &mut arguments, &mut dialog);
    assert_eq!(status, Ok(Status::Cancel));
    assert_eq!(doc, before);
    assert_eq!(arguments, Arguments::default());
}

#[test]
fn no_image_is_calling_error() {
    let mut arguments = Arguments::default();
    let status = procedure::run::<SimDocument, _>(
        RunMode::NonInteractive,
        None,
        &mut arguments,
        &mut procedure::Headless,
    );
    assert_eq!(
        status,
        Ok(Status::CallingError(format!(
            "Procedure '{PROCEDURE_NAME}' works with images only."
        )))
    );
}

#[test]
fn no_image_checked_before_dialog() {
    let mut arguments = Arguments::default();
    let mut dialog = ScriptedDialog::new("", Response::Proceed);
    let status =
        procedure::run::<SimDocument, _>(RunMode::Interactive, None, &mut arguments, &mut dialog);
    assert!(matches!(status, Ok(Status::CallingError(_))));
    assert_eq!(dialog.shown, 0);
}

#[test]
fn host_error_propagates_and_closes_undo_group() {
    let mut doc = SimDocument::new(40, 30);
    doc.fail_merge = Some(3);
    let mut arguments = Arguments::default();
    let status = procedure::run(
        RunMode::NonInteractive,
        Some(&mut doc),
        &mut arguments,
        &mut procedure::Headless,
    );
    assert_eq!(status, Err(HostError::MergeFailed));
    assert_eq!((doc.undo_starts, doc.undo_ends), (1, 1));
    assert_eq!(doc.merges, 3);
}

#[test]
fn zero_sized_image_rejected_before_any_change() {
    for (w, h) in [(0, 10), (10, 0)] {
        let mut doc = SimDocument::new(w, h);
        let before = doc.clone();
        let mut arguments = Arguments::default();
        let mut dialog = ScriptedDialog::new("", Response::Proceed);

        let status =
            procedure::run(RunMode::Interactive, Some(&mut doc), &mut arguments, &mut dialog);
        assert_eq!(
            status,
            Ok(Status::CallingError(
                "Cannot lay out border: image has zero width or height.".to_string()
            ))
        );
        assert_eq!(doc, before);
        assert_eq!(dialog.shown, 0);
    }
}

#[test]
fn overflowing_layout_removes_caption_layers() {
    let mut doc = SimDocument::new(4, 4);
    // Too tall to add any border below; the pixel data stays small.
    doc.canvas = Size::new(4, i32::MAX as u32);
    let before = doc.clone();
    let mut arguments = Arguments::default();

    let status = procedure::run(
        RunMode::NonInteractive,
        Some(&mut doc),
        &mut arguments,
        &mut procedure::Headless,
    );
    assert_eq!(
        status,
        Ok(Status::CallingError(
            "Cannot lay out border: layout exceeds the addressable canvas size.".to_string()
        ))
    );
    assert_eq!(doc.texts, 6);
    assert_eq!(doc.layers, before.layers);
    assert_eq!(doc.canvas, before.canvas);
    assert_eq!((doc.undo_starts, doc.undo_ends), (1, 1));
}
