use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// Number of bullets every summary section must carry.
pub const BULLETS_PER_SECTION: usize = 2;

/// A well-formed summary section: a header and exactly two bullets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    pub header: String,
    pub bullets: [String; BULLETS_PER_SECTION],
}

impl Section {
    pub fn new(
        header: impl Into<String>,
        first: impl Into<String>,
        second: impl Into<String>,
    ) -> Self {
        Self {
            header: header.into(),
            bullets: [first.into(), second.into()],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum SectionError {
    #[error("section is not an object")]
    NotAnObject,
    #[error("missing header")]
    MissingHeader,
    #[error("bullets are missing or not a list")]
    BulletsNotList,
    #[error("expected 2 bullets, found {0}")]
    BulletCount(usize),
    #[error("bullet {0} is not text")]
    BulletNotText(usize),
}

/// One position in a summary's section list.
#[derive(Debug, Clone, PartialEq)]
pub enum SectionSlot {
    Valid(Section),
    Invalid { raw: Value, error: SectionError },
}

impl SectionSlot {
    pub fn as_section(&self) -> Option<&Section> {
        match self {
            SectionSlot::Valid(section) => Some(section),
            SectionSlot::Invalid { .. } => None,
        }
    }
}

/// Structured summary produced by the summarization endpoint.
///
/// Decoding never fails: sections that do not have the expected shape are
/// kept in place as [`SectionSlot::Invalid`] so renderers can report them
/// at their position, and a missing `sections` list is kept as `None`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SummaryDocument {
    sections: Option<Vec<SectionSlot>>,
}

impl SummaryDocument {
    pub fn from_sections(sections: impl IntoIterator<Item = Section>) -> Self {
        Self {
            sections: Some(sections.into_iter().map(SectionSlot::Valid).collect()),
        }
    }

    /// Decode a summary from the raw `summary` JSON value.
    pub fn from_value(value: &Value) -> Self {
        let sections = value
            .get("sections")
            .and_then(Value::as_array)
            .map(|items| items.iter().map(decode_section).collect());
        Self { sections }
    }

    /// The section list, or `None` when the summary carried no list.
    pub fn sections(&self) -> Option<&[SectionSlot]> {
        self.sections.as_deref()
    }

    pub fn valid_sections(&self) -> impl Iterator<Item = &Section> {
        self.sections
            .iter()
            .flatten()
            .filter_map(SectionSlot::as_section)
    }

    pub fn invalid_count(&self) -> usize {
        self.sections
            .iter()
            .flatten()
            .filter(|slot| matches!(slot, SectionSlot::Invalid { .. }))
            .count()
    }
}

fn decode_section(raw: &Value) -> SectionSlot {
    match validate_section(raw) {
        Ok(section) => SectionSlot::Valid(section),
        Err(error) => SectionSlot::Invalid {
            raw: raw.clone(),
            error,
        },
    }
}

/// Check one raw section against the header + two-bullet shape.
pub fn validate_section(raw: &Value) -> Result<Section, SectionError> {
    let object = raw.as_object().ok_or(SectionError::NotAnObject)?;

    let header = object
        .get("header")
        .and_then(Value::as_str)
        .filter(|h| !h.is_empty())
        .ok_or(SectionError::MissingHeader)?;

    let bullets = object
        .get("bullets")
        .and_then(Value::as_array)
        .ok_or(SectionError::BulletsNotList)?;
    if bullets.len() != BULLETS_PER_SECTION {
        return Err(SectionError::BulletCount(bullets.len()));
    }

    let text = |index: usize| {
        bullets[index]
            .as_str()
            .map(str::to_string)
            .ok_or(SectionError::BulletNotText(index))
    };

    Ok(Section {
        header: header.to_string(),
        bullets: [text(0)?, text(1)?],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_valid_sections_in_order() {
        let doc = SummaryDocument::from_value(&json!({
            "sections": [
                { "header": "Intro", "bullets": ["a", "b"] },
                { "header": "Outro", "bullets": ["c", "d"] }
            ]
        }));

        let headers: Vec<_> = doc.valid_sections().map(|s| s.header.as_str()).collect();
        assert_eq!(headers, vec!["Intro", "Outro"]);
        assert_eq!(doc.invalid_count(), 0);
    }

    #[test]
    fn malformed_sections_stay_in_place() {
        let doc = SummaryDocument::from_value(&json!({
            "sections": [
                { "header": "Intro", "bullets": ["a", "b"] },
                { "header": "No bullets" },
                { "header": "Three", "bullets": ["a", "b", "c"] },
                { "header": "", "bullets": ["a", "b"] },
                { "header": "Numbers", "bullets": ["a", 2] },
                "just text"
            ]
        }));

        let slots = doc.sections().expect("section list");
        assert_eq!(slots.len(), 6);
        assert!(slots[0].as_section().is_some());
        let errors: Vec<_> = slots[1..]
            .iter()
            .map(|slot| match slot {
                SectionSlot::Invalid { error, .. } => error.clone(),
                SectionSlot::Valid(_) => panic!("expected invalid slot"),
            })
            .collect();
        assert_eq!(
            errors,
            vec![
                SectionError::BulletsNotList,
                SectionError::BulletCount(3),
                SectionError::MissingHeader,
                SectionError::BulletNotText(1),
                SectionError::NotAnObject,
            ]
        );
    }

    #[test]
    fn missing_section_list_is_distinguished_from_empty() {
        let missing = SummaryDocument::from_value(&json!({ "title": "x" }));
        assert!(missing.sections().is_none());

        let not_a_list = SummaryDocument::from_value(&json!({ "sections": "oops" }));
        assert!(not_a_list.sections().is_none());

        let empty = SummaryDocument::from_value(&json!({ "sections": [] }));
        assert_eq!(empty.sections().map(<[SectionSlot]>::len), Some(0));
    }
}
