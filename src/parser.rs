use crate::ast::DocumentNode;
use crate::error::ParseError;
use crate::utils::get_byte_offset;
use miette::{NamedSource, SourceSpan};
use serde_json::error::Category;

/// Turns JSON text into a [`DocumentNode`].
///
/// Tokenizing is left to `serde_json`; this type only keeps the source name
/// around so that failures can be reported against the original text.
#[derive(Debug)]
pub struct Parser<'a> {
    source_text: &'a str,
    name: String,
}

impl<'a> Parser<'a> {
    pub fn new(source_text: &'a str) -> Self {
        Self::new_with_name(source_text, "message.json".to_string())
    }

    pub fn new_with_name(source_text: &'a str, name: String) -> Self {
        Self { source_text, name }
    }

    pub fn parse_document(&self) -> Result<DocumentNode, ParseError> {
        serde_json::from_str(self.source_text).map_err(|err| self.convert_error(&err))
    }

    fn convert_error(&self, err: &serde_json::Error) -> ParseError {
        let src = NamedSource::new(self.name.clone(), self.source_text.to_string());
        let offset = get_byte_offset(self.source_text, err.line(), err.column());
        let span: SourceSpan = (offset, 0).into();
        let message = strip_position(&err.to_string());
        match err.classify() {
            Category::Eof => ParseError::UnexpectedEof { src, span },
            Category::Data => ParseError::InvalidData { src, span, message },
            Category::Syntax | Category::Io => ParseError::Syntax { src, span, message },
        }
    }
}

/// `serde_json` appends " at line L column C" to its messages; the span
/// already carries that information.
fn strip_position(message: &str) -> String {
    match message.rfind(" at line ") {
        Some(index) => message[..index].to_string(),
        None => message.to_string(),
    }
}
