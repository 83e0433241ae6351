use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

/// Category of an AL application object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectType {
    Table,
    Page,
    Codeunit,
    Report,
    Query,
    XmlPort,
    Enum,
}

impl ObjectType {
    /// Parse a case-insensitive object category name.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "table" => Some(Self::Table),
            "page" => Some(Self::Page),
            "codeunit" => Some(Self::Codeunit),
            "report" => Some(Self::Report),
            "query" => Some(Self::Query),
            "xmlport" => Some(Self::XmlPort),
            "enum" => Some(Self::Enum),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Table => "table",
            Self::Page => "page",
            Self::Codeunit => "codeunit",
            Self::Report => "report",
            Self::Query => "query",
            Self::XmlPort => "xmlport",
            Self::Enum => "enum",
        }
    }

    /// Keyword used when declaring a variable of this object type.
    ///
    /// Tables are referenced through `record` variables; every other
    /// category declares with its own lower-case name.
    pub fn declaration_keyword(self) -> &'static str {
        match self {
            Self::Table => "record",
            other => other.as_str(),
        }
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Zero-based line/character position, columns counted the way editors
/// report them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub line: u32,
    pub character: u32,
}

impl Position {
    pub const fn new(line: u32, character: u32) -> Self {
        Self { line, character }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextRange {
    pub start: Position,
    pub end: Position,
}

impl TextRange {
    pub const fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }
}

/// Identifying metadata for one indexed object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolInfo {
    /// Declared AL identifier, as opposed to the display caption.
    pub symbol_name: String,
    pub object_type: ObjectType,
    pub object_id: u32,
}

/// A document identity plus the range of the definition inside it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolLocation {
    pub uri: Url,
    pub range: TextRange,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(ObjectType::parse("Table"), Some(ObjectType::Table));
        assert_eq!(ObjectType::parse("XMLPORT"), Some(ObjectType::XmlPort));
        assert_eq!(ObjectType::parse("widget"), None);
    }

    #[test]
    fn tables_declare_as_record() {
        assert_eq!(ObjectType::Table.declaration_keyword(), "record");
        assert_eq!(ObjectType::Page.declaration_keyword(), "page");
        assert_eq!(ObjectType::Enum.declaration_keyword(), "enum");
    }
}
