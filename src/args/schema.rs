//! Parameter schema: names, labels, bounds, and defaults, in registration order.

use crate::border::{MAX_BORDER_WIDTH, MIN_BORDER_WIDTH};
use crate::caption::{Slot, Unit};
use crate::geometry::Color;

/// Smallest caption font size.
pub const MIN_FONT_SIZE: u32 = 1;
/// Largest caption font size.
pub const MAX_FONT_SIZE: u32 = 1000;

/// Which argument a parameter sets.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ParamId {
    BorderSizeInner,
    BorderColorInner,
    BorderSizeOuter,
    BorderColorOuter,
    Font,
    FontColor,
    Text(Slot),
    FontSize(Slot),
    FontUnit(Slot),
}

/// Type, bounds, and default of a parameter.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ParamKind {
    Int { min: u32, max: u32, default: u32 },
    Color { default: Color },
    /// Font name; no default means the host's default font.
    Font,
    Text { default: &'static str },
    Unit { default: Unit },
}

/// A registered parameter.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ParamSpec {
    pub id: ParamId,
    /// Stable key, e.g. `border-size-inner`.
    pub name: &'static str,
    /// Human-readable label.
    pub label: &'static str,
    pub kind: ParamKind,
}

const fn border_size(
    id: ParamId,
    name: &'static str,
    label: &'static str,
    default: u32,
) -> ParamSpec {
    ParamSpec {
        id,
        name,
        label,
        kind: ParamKind::Int {
            min: MIN_BORDER_WIDTH,
            max: MAX_BORDER_WIDTH,
            default,
        },
    }
}

const fn color(id: ParamId, name: &'static str, label: &'static str, default: Color) -> ParamSpec {
    ParamSpec {
        id,
        name,
        label,
        kind: ParamKind::Color { default },
    }
}

const fn text(
    slot: Slot,
    name: &'static str,
    label: &'static str,
    default: &'static str,
) -> ParamSpec {
    ParamSpec {
        id: ParamId::Text(slot),
        name,
        label,
        kind: ParamKind::Text { default },
    }
}

const fn font_size(slot: Slot, name: &'static str, label: &'static str, default: u32) -> ParamSpec {
    ParamSpec {
        id: ParamId::FontSize(slot),
        name,
        label,
        kind: ParamKind::Int {
            min: MIN_FONT_SIZE,
            max: MAX_FONT_SIZE,
            default,
        },
    }
}

const fn font_unit(slot: Slot, name: &'static str, label: &'static str) -> ParamSpec {
    ParamSpec {
        id: ParamId::FontUnit(slot),
        name,
        label,
        kind: ParamKind::Unit {
            default: Unit::Point,
        },
    }
}

/// Every parameter, in registration order.
pub const PARAMS: [ParamSpec; 24] = [
    border_size(ParamId::BorderSizeInner, "border-size-inner", "Inner border size (px)", 4),
    color(ParamId::BorderColorInner, "border-color-inner", "Inner border color", Color::white()),
    border_size(ParamId::BorderSizeOuter, "border-size-outer", "Outer border size (px)", 20),
    color(
        ParamId::BorderColorOuter,
        "border-color-outer",
        "Outer border color",
        Color::rgb(0x30, 0x30, 0x30),
    ),
    ParamSpec {
        id: ParamId::Font,
        name: "font",
        label: "Font",
        kind: ParamKind::Font,
    },
    color(ParamId::FontColor, "font-color", "Font color", Color::white()),
    text(Slot::L1, "text-l1", "Left 1st line text", "Telescope, camera type"),
    font_size(Slot::L1, "font-size-l1", "Left 1st line font size", 22),
    font_unit(Slot::L1, "font-unit-l1", "Left 1st line font unit"),
    text(Slot::L2, "text-l2", "Left 2nd line text", "Mount, etc"),
    font_size(Slot::L2, "font-size-l2", "Left 2nd line font size", 14),
    font_unit(Slot::L2, "font-unit-l2", "Left 2nd line font unit"),
    text(Slot::M1, "text-m1", "Middle 1st line text", "Object name"),
    font_size(Slot::M1, "font-size-m1", "Middle 1st line font size", 24),
    font_unit(Slot::M1, "font-unit-m1", "Middle 1st line font unit"),
    text(Slot::M2, "text-m2", "Middle 2nd line text", "Exposure, filters"),
    font_size(Slot::M2, "font-size-m2", "Middle 2nd line font size", 14),
    font_unit(Slot::M2, "font-unit-m2", "Middle 2nd line font unit"),
    text(Slot::R1, "text-r1", "Right 1st line text", "Author's name"),
    font_size(Slot::R1, "font-size-r1", "Right 1st line font size", 22),
    font_unit(Slot::R1, "font-unit-r1", "Right 1st line font unit"),
    text(Slot::R2, "text-r2", "Right 2nd line text", "Date, location"),
    font_size(Slot::R2, "font-size-r2", "Right 2nd line font size", 14),
    font_unit(Slot::R2, "font-unit-r2", "Right 2nd line font unit"),
];

/// Look up a parameter by name (case-insensitive).
pub fn find(name: &str) -> Option<&'static ParamSpec> {
    PARAMS.iter().find(|p| p.name.eq_ignore_ascii_case(name))
}

impl ParamId {
    /// Position in [`PARAMS`].
    pub const fn index(self) -> usize {
        match self {
            ParamId::BorderSizeInner => 0,
            ParamId::BorderColorInner => 1,
            ParamId::BorderSizeOuter => 2,
            ParamId::BorderColorOuter => 3,
            ParamId::Font => 4,
            ParamId::FontColor => 5,
            ParamId::Text(slot) => 6 + 3 * slot.index(),
            ParamId::FontSize(slot) => 7 + 3 * slot.index(),
            ParamId::FontUnit(slot) => 8 + 3 * slot.index(),
        }
    }
}

/// Look up a parameter by id.
pub fn spec(id: ParamId) -> &'static ParamSpec {
    &PARAMS[id.index()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_unique() {
        for (i, a) in PARAMS.iter().enumerate() {
            for b in &PARAMS[i + 1..] {
                assert_ne!(a.name, b.name);
                assert_ne!(a.id, b.id);
            }
        }
    }

    #[test]
    fn every_id_has_one_entry() {
        let mut ids = vec![
            ParamId::BorderSizeInner,
            ParamId::BorderColorInner,
            ParamId::BorderSizeOuter,
            ParamId::BorderColorOuter,
            ParamId::Font,
            ParamId::FontColor,
        ];
        for slot in Slot::ALL {
            ids.extend([ParamId::Text(slot), ParamId::FontSize(slot), ParamId::FontUnit(slot)]);
        }
        assert_eq!(ids.len(), PARAMS.len());
        for id in ids {
            assert_eq!(PARAMS.iter().filter(|p| p.id == id).count(), 1, "{id:?}");
            assert_eq!(spec(id).id, id);
        }
    }

    #[test]
    fn caption_names_use_slot_suffix() {
        for p in &PARAMS {
            if let ParamId::Text(slot) | ParamId::FontSize(slot) | ParamId::FontUnit(slot) = p.id {
                assert!(p.name.ends_with(slot.suffix()), "{}", p.name);
            }
        }
    }

    #[test]
    fn caption_fields_in_slot_order() {
        let order: Vec<Slot> = PARAMS
            .iter()
            .filter_map(|p| match p.id {
                ParamId::Text(slot) => Some(slot),
                _ => None,
            })
            .collect();
        assert_eq!(order, Slot::ALL);
    }

    #[test]
    fn font_size_defaults_per_column() {
        let defaults: Vec<u32> = Slot::ALL
            .iter()
            .map(|&slot| match spec(ParamId::FontSize(slot)).kind {
                ParamKind::Int { default, .. } => default,
                _ => 0,
            })
            .collect();
        assert_eq!(defaults, [22, 14, 24, 14, 22, 14]);
    }

    #[test]
    fn border_bounds() {
        assert_eq!(
            find("BORDER-SIZE-OUTER").unwrap().kind,
            ParamKind::Int {
                min: 1,
                max: 100,
                default: 20
            }
        );
        assert!(find("border-size").is_none());
    }
}
