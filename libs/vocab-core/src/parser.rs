//! Parser for vocabulary catalog files.
//!
//! # Format
//! ```text
//! # Greetings
//! ID: greet-1
//! LV: Labdien
//! NL: Goedendag
//! EN: Good day
//! Category: Greetings
//!
//! ID: greet-2
//! LV: Kā tev iet?
//! NL: Hoe gaat het?
//! Sentence: yes
//! ```
//! Every entry starts with an `ID:` line. `LV` and `NL` are required.

use crate::error::{ParseError, Result};
use crate::types::{Language, VocabularyItem};
use std::collections::HashSet;

/// Parse catalog text into vocabulary items.
pub fn parse(content: &str) -> Result<Vec<VocabularyItem>> {
    let mut parser = Parser::new();

    for (idx, line) in content.lines().enumerate() {
        parser.process_line(line, idx + 1)?;
    }

    parser.finalize()
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Key {
    Id,
    Text(Language),
    Category,
    Sentence,
}

impl Key {
    fn from_label(label: &str) -> Option<Self> {
        match label.to_ascii_lowercase().as_str() {
            "id" => Some(Self::Id),
            "lv" => Some(Self::Text(Language::Latvian)),
            "nl" => Some(Self::Text(Language::Dutch)),
            "en" => Some(Self::Text(Language::English)),
            "category" => Some(Self::Category),
            "sentence" => Some(Self::Sentence),
            _ => None,
        }
    }
}

struct EntryBuilder {
    id: String,
    latvian: Option<String>,
    dutch: Option<String>,
    english: Option<String>,
    category: Option<String>,
    is_sentence: bool,
    start_line: usize,
}

impl EntryBuilder {
    fn new(id: String, start_line: usize) -> Self {
        Self {
            id,
            latvian: None,
            dutch: None,
            english: None,
            category: None,
            is_sentence: false,
            start_line,
        }
    }

    fn set(&mut self, key: Key, value: &str) {
        let value = value.to_string();
        match key {
            Key::Text(Language::Latvian) => self.latvian = Some(value),
            Key::Text(Language::Dutch) => self.dutch = Some(value),
            Key::Text(Language::English) => self.english = Some(value),
            Key::Category => self.category = Some(value).filter(|c| !c.is_empty()),
            Key::Sentence => {
                self.is_sentence = matches!(value.to_ascii_lowercase().as_str(), "yes" | "true" | "1")
            }
            Key::Id => {}
        }
    }

    fn build(self) -> Result<VocabularyItem> {
        let line = self.start_line;
        let missing = |language: Language| ParseError::MissingField {
            field: language.code(),
            line,
        };
        let latvian = self
            .latvian
            .filter(|t| !t.is_empty())
            .ok_or_else(|| missing(Language::Latvian))?;
        let dutch = self
            .dutch
            .filter(|t| !t.is_empty())
            .ok_or_else(|| missing(Language::Dutch))?;

        Ok(VocabularyItem {
            id: self.id,
            latvian,
            dutch,
            english: self.english.filter(|t| !t.is_empty()),
            is_sentence: self.is_sentence,
            category: self.category,
        })
    }
}

struct Parser {
    current: Option<EntryBuilder>,
    items: Vec<VocabularyItem>,
    seen_ids: HashSet<String>,
}

impl Parser {
    fn new() -> Self {
        Self {
            current: None,
            items: Vec::new(),
            seen_ids: HashSet::new(),
        }
    }

    fn process_line(&mut self, line: &str, line_num: usize) -> Result<()> {
        match Self::parse_line(line) {
            LineType::Field(Key::Id, id) => self.handle_id(id, line_num)?,
            LineType::Field(key, value) => self.handle_field(key, value, line_num)?,
            LineType::Unknown(key) => {
                return Err(ParseError::UnknownKey {
                    key: key.to_string(),
                    line: line_num,
                })
            }
            LineType::Empty | LineType::Comment => {}
        }
        Ok(())
    }

    fn parse_line(line: &str) -> LineType<'_> {
        let trimmed = line.trim();

        if trimmed.is_empty() {
            return LineType::Empty;
        }
        if trimmed.starts_with('#') {
            return LineType::Comment;
        }

        match trimmed.split_once(':') {
            Some((label, value)) => match Key::from_label(label.trim()) {
                Some(key) => LineType::Field(key, value.trim()),
                None => LineType::Unknown(label.trim()),
            },
            None => LineType::Unknown(trimmed),
        }
    }

    fn handle_id(&mut self, id: &str, line_num: usize) -> Result<()> {
        self.flush()?;

        if id.is_empty() {
            return Err(ParseError::MissingId { line: line_num });
        }
        if !self.seen_ids.insert(id.to_string()) {
            return Err(ParseError::DuplicateId {
                id: id.to_string(),
                line: line_num,
            });
        }

        self.current = Some(EntryBuilder::new(id.to_string(), line_num));
        Ok(())
    }

    fn handle_field(&mut self, key: Key, value: &str, line_num: usize) -> Result<()> {
        match self.current {
            Some(ref mut entry) => {
                entry.set(key, value);
                Ok(())
            }
            None => Err(ParseError::MissingId { line: line_num }),
        }
    }

    fn flush(&mut self) -> Result<()> {
        if let Some(entry) = self.current.take() {
            self.items.push(entry.build()?);
        }
        Ok(())
    }

    fn finalize(mut self) -> Result<Vec<VocabularyItem>> {
        self.flush()?;
        Ok(self.items)
    }
}

enum LineType<'a> {
    Field(Key, &'a str),
    Unknown(&'a str),
    Comment,
    Empty,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_single_entry() {
        let input = "ID: 1\nLV: suns\nNL: hond";
        let items = parse(input).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, "1");
        assert_eq!(items[0].latvian, "suns");
        assert_eq!(items[0].dutch, "hond");
        assert_eq!(items[0].english, None);
        assert!(!items[0].is_sentence);
    }

    #[test]
    fn parse_optional_fields() {
        let input = "ID: s1\nLV: Kā tev iet?\nNL: Hoe gaat het?\nEN: How are you?\nCategory: Greetings\nSentence: yes";
        let items = parse(input).unwrap();
        assert_eq!(items[0].english.as_deref(), Some("How are you?"));
        assert_eq!(items[0].category.as_deref(), Some("Greetings"));
        assert!(items[0].is_sentence);
    }

    #[test]
    fn parse_multiple_entries_with_comments() {
        let input = "# Animals\nID: 1\nLV: suns\nNL: hond\n\nID: 2\nLV: kaķis\nNL: kat\n";
        let items = parse(input).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].id, "2");
        assert_eq!(items[1].latvian, "kaķis");
    }

    #[test]
    fn value_may_contain_colon() {
        let input = "ID: 1\nLV: Laiks: 5\nNL: Tijd: 5";
        let items = parse(input).unwrap();
        assert_eq!(items[0].latvian, "Laiks: 5");
    }

    #[test]
    fn reject_duplicate_ids() {
        let input = "ID: 1\nLV: a\nNL: b\n\nID: 1\nLV: c\nNL: d";
        let result = parse(input);
        assert!(matches!(result, Err(ParseError::DuplicateId { line: 5, .. })));
    }

    #[test]
    fn reject_missing_translation() {
        let input = "ID: 1\nLV: suns";
        let result = parse(input);
        assert!(matches!(
            result,
            Err(ParseError::MissingField { field: "NL", line: 1 })
        ));
    }

    #[test]
    fn reject_field_before_id() {
        let result = parse("LV: suns\nNL: hond");
        assert!(matches!(result, Err(ParseError::MissingId { line: 1 })));
    }

    #[test]
    fn reject_unknown_key() {
        let result = parse("ID: 1\nDE: Hund");
        assert!(matches!(result, Err(ParseError::UnknownKey { line: 2, .. })));
    }

    #[test]
    fn parse_empty_content() {
        assert!(parse("").unwrap().is_empty());
        assert!(parse("# nothing yet\n\n").unwrap().is_empty());
    }
}
