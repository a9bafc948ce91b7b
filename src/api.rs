use crate::ast::{DocumentNode, Mode};
use crate::error::{ContextError, ParseError, TextError};
use crate::parser::Parser;
use crate::stack::ContextStack;
use crate::walk::{read_node, write_node};
use std::borrow::Cow;

/// Parses JSON text into a document.
///
/// # Arguments
///
/// * `source` - The JSON text.
/// * `name` - A name for the text (usually a file name), used for error reporting.
///
/// # Errors
///
/// Returns a `ParseError` pointing into `source` if the text is not valid JSON.
pub fn parse(source: &str, name: &str) -> Result<DocumentNode, ParseError> {
    Parser::new_with_name(source, name.to_string()).parse_document()
}

/// Prints a document as pretty JSON.
///
/// # Panics
///
/// Never in practice: every `DocumentNode` has string keys and finite
/// numbers, which is all `serde_json` needs to succeed.
#[must_use]
pub fn print(document: &DocumentNode) -> String {
    serde_json::to_string_pretty(document).expect("document nodes always serialize to JSON")
}

/// Prints a document as JSON without any whitespace.
///
/// # Panics
///
/// Never in practice, see [`print`].
#[must_use]
pub fn print_compact(document: &DocumentNode) -> String {
    serde_json::to_string(document).expect("document nodes always serialize to JSON")
}

/// Starts a read session over `root`, or a write session when `mode` is
/// [`Mode::Write`] and `root` is `None`.
///
/// # Errors
///
/// `MissingRoot` for a read session without a document, `WrongMode` for a
/// write session handed one.
pub fn begin_session(
    mode: Mode,
    root: Option<&DocumentNode>,
) -> Result<ContextStack<'_>, ContextError> {
    ContextStack::begin(mode, root)
}

/// Ends a session. Read sessions return the document they were given,
/// write sessions the document they assembled.
///
/// # Errors
///
/// `UnclosedContexts` if an aggregate is still open, `EmptyDocument` if a
/// write session never produced a top-level value.
pub fn end_session(stack: ContextStack<'_>) -> Result<Cow<'_, DocumentNode>, ContextError> {
    stack.end()
}

/// Parses `source`, rebuilds the document through a read session, replays
/// the rebuilt document through a write session, and prints the result.
///
/// The output is the canonical pretty form of the input: same values, same
/// key order.
///
/// # Errors
///
/// Returns a `TextError` if parsing fails or the two sessions disagree.
pub fn reencode(source: &str, name: &str) -> Result<String, TextError> {
    let document = parse(source, name)?;

    let mut reader = begin_session(Mode::Read, Some(&document))?;
    reader.advance()?;
    let rebuilt = read_node(&mut reader)?;
    end_session(reader)?;

    let mut writer = begin_session(Mode::Write, None)?;
    write_node(&mut writer, &rebuilt)?;
    let written = end_session(writer)?;

    Ok(print(&written))
}
