use std::str::FromStr;

use serde::Deserialize;
use strum::{Display, EnumIter, IntoEnumIterator};
use thiserror::Error;

pub const DEFAULT_TEMPLATE: &str = "{input}{addon}{dropdown}";

#[derive(Display, EnumIter, Debug, Clone, Copy, PartialEq, Eq)]
#[strum(serialize_all = "lowercase")]
pub enum Slot {
    Input,
    Addon,
    Dropdown,
}

impl Slot {
    pub fn marker(self) -> &'static str {
        match self {
            Slot::Input => "{input}",
            Slot::Addon => "{addon}",
            Slot::Dropdown => "{dropdown}",
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    #[error("template `{template}` has no {slot} slot")]
    MissingSlot { template: String, slot: Slot },
    #[error("template `{template}` uses the {slot} slot more than once")]
    DuplicateSlot { template: String, slot: Slot },
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Text(String),
    Slot(Slot),
}

/// Layout of the input, addon and dropdown inside the container.
///
/// The source is split into segments once, so the substituted content is never
/// scanned for markers again: an addon containing `{input}` is emitted verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub struct Template {
    source: String,
    segments: Vec<Segment>,
}

impl Template {
    pub fn parse(source: &str) -> Result<Self, TemplateError> {
        let mut segments = Vec::new();
        let mut seen: Vec<Slot> = Vec::with_capacity(3);
        let mut rest = source;

        while !rest.is_empty() {
            let next = Slot::iter()
                .filter_map(|slot| rest.find(slot.marker()).map(|pos| (pos, slot)))
                .min_by_key(|(pos, _)| *pos);
            let Some((pos, slot)) = next else {
                segments.push(Segment::Text(rest.to_string()));
                break;
            };
            if seen.contains(&slot) {
                return Err(TemplateError::DuplicateSlot {
                    template: source.to_string(),
                    slot,
                });
            }
            if pos > 0 {
                segments.push(Segment::Text(rest[..pos].to_string()));
            }
            seen.push(slot);
            segments.push(Segment::Slot(slot));
            rest = &rest[pos + slot.marker().len()..];
        }

        if let Some(slot) = Slot::iter().find(|slot| !seen.contains(slot)) {
            return Err(TemplateError::MissingSlot {
                template: source.to_string(),
                slot,
            });
        }

        Ok(Self {
            source: source.to_string(),
            segments,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn render(&self, input: &str, addon: &str, dropdown: &str) -> String {
        let mut out = String::with_capacity(self.source.len() + input.len() + addon.len() + dropdown.len());
        for segment in &self.segments {
            match segment {
                Segment::Text(text) => out.push_str(text),
                Segment::Slot(Slot::Input) => out.push_str(input),
                Segment::Slot(Slot::Addon) => out.push_str(addon),
                Segment::Slot(Slot::Dropdown) => out.push_str(dropdown),
            }
        }
        out
    }
}

impl Default for Template {
    fn default() -> Self {
        Self {
            source: DEFAULT_TEMPLATE.to_string(),
            segments: Slot::iter().map(Segment::Slot).collect(),
        }
    }
}

impl FromStr for Template {
    type Err = TemplateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Template {
    type Error = TemplateError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_parsed() {
        assert_eq!(Template::default(), Template::parse(DEFAULT_TEMPLATE).unwrap());
        assert_eq!(Template::default().render("I", "A", "D"), "IAD");
    }

    #[test]
    fn test_custom_layout() {
        let template: Template = "{addon}<span>{input}</span>{dropdown}".parse().unwrap();
        assert_eq!(template.render("I", "A", ""), "A<span>I</span>");
    }

    #[test]
    fn test_missing_slot() {
        let err = Template::parse("{input}{addon}").unwrap_err();
        assert_eq!(
            err,
            TemplateError::MissingSlot {
                template: "{input}{addon}".into(),
                slot: Slot::Dropdown
            }
        );
        assert_eq!(
            err.to_string(),
            "template `{input}{addon}` has no dropdown slot"
        );
    }

    #[test]
    fn test_duplicate_slot() {
        let err = Template::parse("{input}{addon}{input}{dropdown}").unwrap_err();
        assert!(matches!(
            err,
            TemplateError::DuplicateSlot {
                slot: Slot::Input,
                ..
            }
        ));
    }

    #[test]
    fn test_markers_in_content_are_not_rescanned() {
        let template = Template::default();
        assert_eq!(
            template.render("<input>", "{dropdown}", "<menu>"),
            "<input>{dropdown}<menu>"
        );
    }

    #[test]
    fn test_deserialize_rejects_bad_template() {
        assert!(serde_json::from_str::<Template>(r#""{input}""#).is_err());
        let template: Template = serde_json::from_str(r#""<p>{input}{addon}{dropdown}</p>""#).unwrap();
        assert_eq!(template.as_str(), "<p>{input}{addon}{dropdown}</p>");
    }
}
