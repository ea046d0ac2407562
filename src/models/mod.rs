//! Data models for Tickbox entries.
//!
//! This module defines the item kinds and their record schema:
//! - `ToDoItem` - A task with an optional due date
//! - `ToBuyItem` - A shopping entry with an amount
//! - `ToReadItem` - Something to read, with a URL
//!
//! A record is the on-disk form of an item: a JSON array whose first element
//! is the kind tag, followed by the kind's fields in schema order, with the
//! `done` flag last.

use crate::console::Console;
use crate::{Error, Result};
use chrono::NaiveDate;
use serde_json::Value;
use std::fmt;
use std::io::{BufRead, Write};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// The closed set of item kinds, in menu order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemKind {
    Task,
    Shopping,
    Reading,
}

impl ItemKind {
    pub const ALL: [ItemKind; 3] = [ItemKind::Task, ItemKind::Shopping, ItemKind::Reading];

    /// Discriminator written as the first element of a record.
    pub fn tag(&self) -> &'static str {
        match self {
            ItemKind::Task => "ToDoItem",
            ItemKind::Shopping => "ToBuyItem",
            ItemKind::Reading => "ToReadItem",
        }
    }

    /// Resolve a record discriminator against the registry.
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.tag() == tag)
    }

    /// Short name used when rendering an item.
    pub fn display_name(&self) -> &'static str {
        match self {
            ItemKind::Task => "ToDo",
            ItemKind::Shopping => "ToBuy",
            ItemKind::Reading => "ToRead",
        }
    }

    /// Field names in record order, excluding the tag and the `done` flag.
    pub fn fields(&self) -> &'static [&'static str] {
        match self {
            ItemKind::Task => &["heading", "due"],
            ItemKind::Shopping => &["heading", "amount"],
            ItemKind::Reading => &["heading", "url"],
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

/// Kind-specific item payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Details {
    Task {
        heading: String,
        due: Option<NaiveDate>,
    },
    Shopping {
        heading: String,
        amount: u32,
    },
    Reading {
        heading: String,
        url: String,
    },
}

impl Details {
    pub fn kind(&self) -> ItemKind {
        match self {
            Details::Task { .. } => ItemKind::Task,
            Details::Shopping { .. } => ItemKind::Shopping,
            Details::Reading { .. } => ItemKind::Reading,
        }
    }
}

/// One list entry.
///
/// The kind is fixed at construction; `done` is the only mutable state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    details: Details,
    done: bool,
}

impl Item {
    /// Create a pending item.
    pub fn new(details: Details) -> Self {
        Self {
            details,
            done: false,
        }
    }

    pub fn kind(&self) -> ItemKind {
        self.details.kind()
    }

    pub fn details(&self) -> &Details {
        &self.details
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    pub fn set_done(&mut self, done: bool) {
        self.done = done;
    }

    /// Completion marker: `+` when done, `-` otherwise.
    pub fn marker(&self) -> char {
        if self.done { '+' } else { '-' }
    }

    /// Kind and field summary without the completion marker.
    pub fn summary(&self) -> String {
        let name = self.kind().display_name();
        match &self.details {
            Details::Task { heading, due: None } => format!("{}: {}", name, heading),
            Details::Task {
                heading,
                due: Some(due),
            } => format!("{}: {} (due {})", name, heading, due.format(DATE_FORMAT)),
            Details::Shopping { heading, amount } => {
                format!("{}: {} (amount: {})", name, heading, amount)
            }
            Details::Reading { heading, url } => format!("{}: {} <{}>", name, heading, url),
        }
    }

    /// Single-line rendering used by every listing.
    pub fn render(&self) -> String {
        format!("{} {}", self.marker(), self.summary())
    }

    /// Serialize into a `[tag, fields..., done]` record.
    pub fn to_record(&self) -> Value {
        let mut record = vec![Value::from(self.kind().tag())];
        match &self.details {
            Details::Task { heading, due } => {
                record.push(Value::from(heading.as_str()));
                record.push(match due {
                    Some(due) => Value::from(due.format(DATE_FORMAT).to_string()),
                    None => Value::Null,
                });
            }
            Details::Shopping { heading, amount } => {
                record.push(Value::from(heading.as_str()));
                record.push(Value::from(*amount));
            }
            Details::Reading { heading, url } => {
                record.push(Value::from(heading.as_str()));
                record.push(Value::from(url.as_str()));
            }
        }
        record.push(Value::Bool(self.done));
        Value::Array(record)
    }

    /// Rebuild an item from a full record, tag included.
    pub fn from_record(record: &Value) -> Result<Self> {
        let Some(elements) = record.as_array() else {
            return Err(Error::Deserialization {
                kind: "unknown".to_string(),
                reason: format!("expected an array, found {}", record),
            });
        };
        let Some((tag, fields)) = elements.split_first() else {
            return Err(Error::Deserialization {
                kind: "unknown".to_string(),
                reason: "empty record".to_string(),
            });
        };
        let tag = tag.as_str().ok_or_else(|| Error::Deserialization {
            kind: "unknown".to_string(),
            reason: format!("kind tag must be a string, found {}", tag),
        })?;
        let kind = ItemKind::from_tag(tag).ok_or_else(|| Error::UnknownKind(tag.to_string()))?;
        Self::from_fields(kind, fields)
    }

    /// Rebuild an item of `kind` from the record elements after the tag.
    pub fn from_fields(kind: ItemKind, fields: &[Value]) -> Result<Self> {
        let schema = kind.fields();
        if fields.len() != schema.len() + 1 {
            return Err(bad_record(
                kind,
                format!(
                    "expected {} fields, found {}",
                    schema.len() + 1,
                    fields.len()
                ),
            ));
        }

        let heading = string_field(kind, "heading", &fields[0])?;
        let details = match kind {
            ItemKind::Task => {
                let due = match &fields[1] {
                    Value::Null => None,
                    value => {
                        let text = string_field(kind, "due", value)?;
                        let date = NaiveDate::parse_from_str(&text, DATE_FORMAT).map_err(|e| {
                            bad_record(kind, format!("invalid due date '{}': {}", text, e))
                        })?;
                        Some(date)
                    }
                };
                Details::Task { heading, due }
            }
            ItemKind::Shopping => {
                let amount = fields[1]
                    .as_u64()
                    .and_then(|n| u32::try_from(n).ok())
                    .ok_or_else(|| {
                        bad_record(kind, format!("amount must be a count, found {}", fields[1]))
                    })?;
                Details::Shopping { heading, amount }
            }
            ItemKind::Reading => Details::Reading {
                heading,
                url: string_field(kind, "url", &fields[1])?,
            },
        };

        let flag = &fields[schema.len()];
        let done = flag
            .as_bool()
            .ok_or_else(|| bad_record(kind, format!("done must be a boolean, found {}", flag)))?;

        Ok(Self { details, done })
    }

    /// Prompt for each field of `kind` and build a pending item.
    ///
    /// Malformed answers re-prompt; only I/O failures reach the caller.
    pub fn construct<R: BufRead, W: Write>(
        kind: ItemKind,
        console: &mut Console<R, W>,
    ) -> Result<Self> {
        let heading = console.ask_until("Input heading: ", "Heading can't be empty.", |s| {
            (!s.is_empty()).then(|| s.to_string())
        })?;

        let details = match kind {
            ItemKind::Task => {
                let due = console.ask_until(
                    "Input due date (YYYY-MM-DD, empty for none): ",
                    "Bad date, try again.",
                    |s| {
                        if s.is_empty() {
                            Some(None)
                        } else {
                            NaiveDate::parse_from_str(s, DATE_FORMAT).ok().map(Some)
                        }
                    },
                )?;
                Details::Task { heading, due }
            }
            ItemKind::Shopping => {
                let amount =
                    console.ask_until("Input amount: ", "Bad input, try again.", |s| {
                        s.parse::<u32>().ok()
                    })?;
                Details::Shopping { heading, amount }
            }
            ItemKind::Reading => {
                let url = console.ask_until("Input url: ", "Url can't be empty.", |s| {
                    (!s.is_empty()).then(|| s.to_string())
                })?;
                Details::Reading { heading, url }
            }
        };

        Ok(Self::new(details))
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render())
    }
}

fn bad_record(kind: ItemKind, reason: String) -> Error {
    Error::Deserialization {
        kind: kind.tag().to_string(),
        reason,
    }
}

fn string_field(kind: ItemKind, name: &str, value: &Value) -> Result<String> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| bad_record(kind, format!("{} must be a string, found {}", name, value)))
}
