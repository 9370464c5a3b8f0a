//! Procedure arguments: schema, defaults, and query-string parsing.
//!
//! Non-interactive callers pass arguments as a query string like
//! `border-size-outer=30&text-m1=M31+Andromeda&font-color=%23ffcc00`.
//! Keys absent from the string keep their current value, so parsing onto
//! [`Arguments::default()`] gives the registered defaults.
//!
//! # Example
//!
//! ```
//! use infoborder::args;
//! use infoborder::Slot;
//!
//! let result = args::parse("border-size-outer=30&text-m1=M31%20Andromeda");
//! assert!(result.warnings.is_empty());
//!
//! let arguments = result.arguments;
//! assert_eq!(arguments.widths().outer, 30);
//! assert_eq!(arguments.caption(Slot::M1).text, "M31 Andromeda");
//! ```

mod color;
mod parse;
pub mod schema;

pub use schema::{PARAMS, ParamId, ParamKind, ParamSpec};

use alloc::string::String;
use alloc::vec::Vec;

use crate::border::BorderWidths;
use crate::caption::{FontSize, Slot, Unit};
use crate::compose::Palette;
use crate::geometry::Color;

/// Text and size of one caption slot.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CaptionField {
    /// May be empty; the row still keeps its height.
    pub text: String,
    pub size: FontSize,
}

/// A single argument value.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Int(u32),
    Color(Color),
    /// `None` selects the host's default font.
    Font(Option<String>),
    Text(String),
    Unit(Unit),
}

/// Values of every registered parameter.
#[derive(Clone, Debug, PartialEq)]
pub struct Arguments {
    pub border_size_inner: u32,
    pub border_color_inner: Color,
    pub border_size_outer: u32,
    pub border_color_outer: Color,
    /// Shared by all six captions.
    pub font: Option<String>,
    pub font_color: Color,
    /// Indexed by [`Slot::index`].
    pub captions: [CaptionField; 6],
}

impl Default for Arguments {
    fn default() -> Self {
        let int = |id| match schema::spec(id).kind {
            ParamKind::Int { default, .. } => default,
            _ => 0,
        };
        let color = |id| match schema::spec(id).kind {
            ParamKind::Color { default } => default,
            _ => Color::default(),
        };
        let caption = |slot| CaptionField {
            text: match schema::spec(ParamId::Text(slot)).kind {
                ParamKind::Text { default } => String::from(default),
                _ => String::new(),
            },
            size: FontSize::new(
                int(ParamId::FontSize(slot)),
                match schema::spec(ParamId::FontUnit(slot)).kind {
                    ParamKind::Unit { default } => default,
                    _ => Unit::default(),
                },
            ),
        };
        Self {
            border_size_inner: int(ParamId::BorderSizeInner),
            border_color_inner: color(ParamId::BorderColorInner),
            border_size_outer: int(ParamId::BorderSizeOuter),
            border_color_outer: color(ParamId::BorderColorOuter),
            font: None,
            font_color: color(ParamId::FontColor),
            captions: Slot::ALL.map(caption),
        }
    }
}

impl Arguments {
    /// Inner and outer border widths.
    pub fn widths(&self) -> BorderWidths {
        BorderWidths::new(self.border_size_inner, self.border_size_outer)
    }

    /// Fill and text colors.
    pub fn palette(&self) -> Palette {
        Palette {
            inner: self.border_color_inner,
            outer: self.border_color_outer,
            text: self.font_color,
        }
    }

    pub fn caption(&self, slot: Slot) -> &CaptionField {
        &self.captions[slot.index()]
    }

    pub fn caption_mut(&mut self, slot: Slot) -> &mut CaptionField {
        &mut self.captions[slot.index()]
    }

    /// Current value of a parameter.
    pub fn get(&self, id: ParamId) -> Value {
        match id {
            ParamId::BorderSizeInner => Value::Int(self.border_size_inner),
            ParamId::BorderColorInner => Value::Color(self.border_color_inner),
            ParamId::BorderSizeOuter => Value::Int(self.border_size_outer),
            ParamId::BorderColorOuter => Value::Color(self.border_color_outer),
            ParamId::Font => Value::Font(self.font.clone()),
            ParamId::FontColor => Value::Color(self.font_color),
            ParamId::Text(slot) => Value::Text(self.caption(slot).text.clone()),
            ParamId::FontSize(slot) => Value::Int(self.caption(slot).size.value),
            ParamId::FontUnit(slot) => Value::Unit(self.caption(slot).size.unit),
        }
    }

    /// Set a parameter, clamping integers into the schema's bounds.
    ///
    /// Returns `false` when the value's type doesn't match the parameter.
    pub fn set(&mut self, id: ParamId, value: Value) -> bool {
        let value = match (schema::spec(id).kind, value) {
            (ParamKind::Int { min, max, .. }, Value::Int(v)) => Value::Int(v.clamp(min, max)),
            (_, v) => v,
        };
        match (id, value) {
            (ParamId::BorderSizeInner, Value::Int(v)) => self.border_size_inner = v,
            (ParamId::BorderColorInner, Value::Color(c)) => self.border_color_inner = c,
            (ParamId::BorderSizeOuter, Value::Int(v)) => self.border_size_outer = v,
            (ParamId::BorderColorOuter, Value::Color(c)) => self.border_color_outer = c,
            (ParamId::Font, Value::Font(f)) => self.font = f,
            (ParamId::FontColor, Value::Color(c)) => self.font_color = c,
            (ParamId::Text(slot), Value::Text(t)) => self.caption_mut(slot).text = t,
            (ParamId::FontSize(slot), Value::Int(v)) => self.caption_mut(slot).size.value = v,
            (ParamId::FontUnit(slot), Value::Unit(u)) => self.caption_mut(slot).size.unit = u,
            _ => return false,
        }
        true
    }

    /// Apply a query string on top of the current values.
    pub fn apply_query(&mut self, query: &str) -> Vec<ParseWarning> {
        parse::apply_query(self, query)
    }

    /// Render as a query string that [`parse`] reads back to equal arguments.
    pub fn to_query(&self) -> String {
        parse::to_query(self)
    }
}

/// Result of parsing an argument query string.
#[derive(Debug, Clone)]
pub struct ParseResult {
    /// Defaults overridden by every valid key.
    pub arguments: Arguments,
    /// Non-fatal parse warnings.
    pub warnings: Vec<ParseWarning>,
}

/// Non-fatal warning from argument parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseWarning {
    /// A key appeared more than once (last value wins).
    DuplicateKey { key: &'static str, value: String },
    /// A key is not a registered parameter.
    KeyNotRecognized { key: String, value: String },
    /// A value could not be parsed for its parameter; the old value stays.
    ValueInvalid {
        key: &'static str,
        value: String,
        reason: &'static str,
    },
    /// An integer was outside the parameter's bounds and was clamped.
    ValueClamped {
        key: &'static str,
        value: String,
        clamped: u32,
    },
}

impl core::fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::DuplicateKey { key, value } => {
                write!(f, "duplicate key '{key}', using last value '{value}'")
            }
            Self::KeyNotRecognized { key, value } => {
                write!(f, "unrecognized key '{key}' (value '{value}')")
            }
            Self::ValueInvalid { key, value, reason } => {
                write!(f, "invalid value '{value}' for '{key}': {reason}")
            }
            Self::ValueClamped {
                key,
                value,
                clamped,
            } => write!(f, "value '{value}' for '{key}' out of range, clamped to {clamped}"),
        }
    }
}

/// Parse an argument query string (with or without leading `?`) onto the defaults.
pub fn parse(query: &str) -> ParseResult {
    let mut arguments = Arguments::default();
    let warnings = arguments.apply_query(query);
    ParseResult {
        arguments,
        warnings,
    }
}
