//! Positional message templates.
//!
//! A message such as `"missing %s with id %s"` carries positional
//! placeholders (`%s`, `%d`, `%v`); `%%` is a literal percent sign. The
//! k-th placeholder is resolved from the caller's named values through the
//! k-th declared context field, so the result never depends on the order in
//! which those values were collected.

use thiserror::Error;

/// Placeholder verbs every target formatter understands.
pub const PLACEHOLDER_VERBS: [char; 3] = ['s', 'd', 'v'];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    #[error("unsupported placeholder '%{verb}' at byte {offset}")]
    UnknownVerb { verb: char, offset: usize },

    #[error("dangling '%' at end of message")]
    Dangling,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Text(String),
    /// Positional placeholder; `index` counts placeholders left to right
    Placeholder { verb: char, index: usize },
}

/// A parsed message template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageTemplate {
    segments: Vec<Segment>,
}

impl MessageTemplate {
    pub fn parse(message: &str) -> Result<Self, TemplateError> {
        let mut segments = Vec::new();
        let mut text = String::new();
        let mut index = 0;
        let mut chars = message.char_indices();

        while let Some((offset, ch)) = chars.next() {
            if ch != '%' {
                text.push(ch);
                continue;
            }
            match chars.next() {
                Some((_, '%')) => text.push('%'),
                Some((_, verb)) if PLACEHOLDER_VERBS.contains(&verb) => {
                    if !text.is_empty() {
                        segments.push(Segment::Text(std::mem::take(&mut text)));
                    }
                    segments.push(Segment::Placeholder { verb, index });
                    index += 1;
                }
                Some((_, verb)) => return Err(TemplateError::UnknownVerb { verb, offset }),
                None => return Err(TemplateError::Dangling),
            }
        }
        if !text.is_empty() {
            segments.push(Segment::Text(text));
        }

        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn placeholder_count(&self) -> usize {
        self.segments
            .iter()
            .filter(|s| matches!(s, Segment::Placeholder { .. }))
            .count()
    }

    /// Substitute placeholders.
    ///
    /// `fields` are the declared context field names in order; `lookup`
    /// returns the supplied value for a field name. Placeholders without a
    /// declared field or a supplied value are kept verbatim.
    pub fn render<'a, F>(&self, fields: &[&str], lookup: F) -> String
    where
        F: Fn(&str) -> Option<&'a str>,
    {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Text(text) => out.push_str(text),
                Segment::Placeholder { verb, index } => {
                    match fields.get(*index).and_then(|&field| lookup(field)) {
                        Some(value) => out.push_str(value),
                        None => {
                            out.push('%');
                            out.push(*verb);
                        }
                    }
                }
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    #[test]
    fn test_parse_segments() {
        let t = MessageTemplate::parse("missing %s with id %d").unwrap();
        assert_eq!(
            t.segments(),
            &[
                Segment::Text("missing ".to_string()),
                Segment::Placeholder { verb: 's', index: 0 },
                Segment::Text(" with id ".to_string()),
                Segment::Placeholder { verb: 'd', index: 1 },
            ]
        );
        assert_eq!(t.placeholder_count(), 2);
    }

    #[test]
    fn test_literal_percent() {
        let t = MessageTemplate::parse("disk 100%% full").unwrap();
        assert_eq!(t.placeholder_count(), 0);
        assert_eq!(t.render(&[], |_| None), "disk 100% full");
    }

    #[test]
    fn test_malformed_placeholders() {
        assert_eq!(
            MessageTemplate::parse("50% off").unwrap_err(),
            TemplateError::UnknownVerb { verb: ' ', offset: 2 }
        );
        assert_eq!(
            MessageTemplate::parse("trailing %").unwrap_err(),
            TemplateError::Dangling
        );
    }

    #[test]
    fn test_render_by_declared_order() {
        let t = MessageTemplate::parse("missing %s with id %s").unwrap();
        let mut values = HashMap::new();
        values.insert("id", "42");
        values.insert("resource", "user");
        let rendered = t.render(&["resource", "id"], |f| values.get(f).copied());
        assert_eq!(rendered, "missing user with id 42");
    }

    #[test]
    fn test_render_missing_values_stay_verbatim() {
        let t = MessageTemplate::parse("%s then %v then %d").unwrap();
        let values: HashMap<&str, &str> = HashMap::from([("a", "1"), ("unused", "x")]);
        let rendered = t.render(&["a", "b"], |f| values.get(f).copied());
        assert_eq!(rendered, "1 then %v then %d");
    }

    #[test]
    fn test_render_unicode_text() {
        let t = MessageTemplate::parse("café %s ☕").unwrap();
        assert_eq!(t.render(&["x"], |_| Some("ok")), "café ok ☕");
    }
}
