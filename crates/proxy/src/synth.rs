//! Builder for the synthesized source unit the protocol injects.

use alscope_api::{ObjectType, Position, TextRange};

/// Name of the throwaway codeunit declared in the scratch file.
const PROBE_UNIT_NAME: &str = "ALLangServerProxy";

/// A minimal compilable unit referencing one object, plus the two
/// positions the protocol needs: where to point the resolver and what to
/// delete afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesizedSource {
    pub text: String,
    /// Position inside the variable's type-argument (the quoted object
    /// name), where the resolver is asked for a definition.
    pub probe: Position,
    /// Full span of the synthesized text, for the retract step.
    pub span: TextRange,
}

/// Synthesize a unit declaring one variable whose type-argument is the
/// target object. `object_type` is normalized to its declaration keyword
/// (tables become `record` variables).
pub fn object_reference(object_type: ObjectType, object_name: &str) -> SynthesizedSource {
    let keyword = object_type.declaration_keyword();
    let quoted = quote_name(object_name);
    let text = format!(
        "codeunit 0 \"{PROBE_UNIT_NAME}\"\n{{\nvar\na : {keyword} {quoted};\n}}\n"
    );

    // "a : " plus the keyword, the separating space and the opening quote:
    // the probe lands on the first character of the name itself.
    let probe = Position::new(3, keyword.len() as u32 + 6);
    let span = TextRange::new(
        Position::new(0, 0),
        Position::new(text.matches('\n').count() as u32, 0),
    );

    SynthesizedSource { text, probe, span }
}

/// AL quoted identifier: wrap in quotes, double every embedded quote.
fn quote_name(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_quotes_are_doubled() {
        let source = object_reference(ObjectType::Page, "Sales \"Order\"");
        assert!(source.text.contains("page \"Sales \"\"Order\"\"\";"));
    }

    #[test]
    fn tables_reference_through_record_keyword() {
        let source = object_reference(ObjectType::Table, "Customer");
        assert!(source.text.contains("a : record \"Customer\";"));
        assert!(!source.text.contains("table"));
    }

    #[test]
    fn probe_lands_inside_the_quoted_name() {
        let source = object_reference(ObjectType::Table, "Customer");
        let line = source.text.lines().nth(source.probe.line as usize).unwrap();
        // record = 6 chars, "a : " + keyword + space + opening quote = 12.
        assert_eq!(source.probe.character, 12);
        assert_eq!(&line[source.probe.character as usize..][..8], "Customer");
    }

    #[test]
    fn span_covers_the_whole_text() {
        let source = object_reference(ObjectType::Codeunit, "Sales-Post");
        assert_eq!(source.span.start, Position::new(0, 0));
        assert_eq!(source.span.end, Position::new(5, 0));
    }
}
