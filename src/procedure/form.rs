//! Interactive configuration form.
//!
//! Groups the parameters into labeled rows: one per border, one for the
//! font, then a text row and a size row for each caption line.

use crate::args::Arguments;

/// Title of the configuration dialog.
pub const TITLE: &str = "AstroPhoto Info Border";

/// One element of the form.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FormItem {
    /// A parameter widget, by parameter name.
    Param(&'static str),
    /// Items laid out side by side.
    Group {
        id: &'static str,
        children: &'static [FormItem],
    },
}

const fn row(id: &'static str, children: &'static [FormItem]) -> FormItem {
    FormItem::Group { id, children }
}

use FormItem::Param;

const SIZE_ROW_1: &[FormItem] = &[
    row("size-box-l1", &[Param("font-size-l1"), Param("font-unit-l1")]),
    row("size-box-m1", &[Param("font-size-m1"), Param("font-unit-m1")]),
    row("size-box-r1", &[Param("font-size-r1"), Param("font-unit-r1")]),
];

const SIZE_ROW_2: &[FormItem] = &[
    row("size-box-l2", &[Param("font-size-l2"), Param("font-unit-l2")]),
    row("size-box-m2", &[Param("font-size-m2"), Param("font-unit-m2")]),
    row("size-box-r2", &[Param("font-size-r2"), Param("font-unit-r2")]),
];

/// Form rows, stacked vertically top to bottom.
pub const FORM: &[FormItem] = &[
    row("box-border-inner", &[Param("border-size-inner"), Param("border-color-inner")]),
    row("box-border-outer", &[Param("border-size-outer"), Param("border-color-outer")]),
    row("font-box", &[Param("font"), Param("font-color")]),
    row("text-row-1", &[Param("text-l1"), Param("text-m1"), Param("text-r1")]),
    row("size-row-1", SIZE_ROW_1),
    row("text-row-2", &[Param("text-l2"), Param("text-m2"), Param("text-r2")]),
    row("size-row-2", SIZE_ROW_2),
];

/// What the user did with the form.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Response {
    Proceed,
    Cancelled,
}

/// A modal dialog the host shows for interactive runs.
pub trait Dialog {
    /// Show `form` pre-filled from `arguments`, writing edits back on proceed.
    fn run(&mut self, title: &str, form: &[FormItem], arguments: &mut Arguments) -> Response;
}

/// Dialog for hosts without a UI: accepts the arguments as they are.
#[derive(Copy, Clone, Debug, Default)]
pub struct Headless;

impl Dialog for Headless {
    fn run(&mut self, _title: &str, _form: &[FormItem], _arguments: &mut Arguments) -> Response {
        Response::Proceed
    }
}

/// Visit every parameter name in the form, depth first.
pub fn for_each_param(items: &[FormItem], f: &mut impl FnMut(&'static str)) {
    for item in items {
        match item {
            FormItem::Param(name) => f(*name),
            FormItem::Group { children, .. } => for_each_param(children, f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::PARAMS;

    #[test]
    fn every_param_shown_once() {
        let mut names = Vec::new();
        for_each_param(FORM, &mut |n| names.push(n));
        assert_eq!(names.len(), PARAMS.len());
        for p in &PARAMS {
            assert_eq!(names.iter().filter(|&&n| n == p.name).count(), 1, "{}", p.name);
        }
    }

    #[test]
    fn seven_rows() {
        let ids: Vec<&str> = FORM
            .iter()
            .filter_map(|i| match i {
                FormItem::Group { id, .. } => Some(*id),
                FormItem::Param(_) => None,
            })
            .collect();
        assert_eq!(
            ids,
            [
                "box-border-inner",
                "box-border-outer",
                "font-box",
                "text-row-1",
                "size-row-1",
                "text-row-2",
                "size-row-2"
            ]
        );
    }

    #[test]
    fn headless_proceeds_without_edits() {
        let mut args = Arguments::default();
        assert_eq!(Headless.run(TITLE, FORM, &mut args), Response::Proceed);
        assert_eq!(args, Arguments::default());
    }
}
