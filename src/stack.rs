use crate::ast::{AggregateKind, ContextKind, DocumentNode, KeyRef, Mode};
use crate::context::{Context, RootContext};
use crate::error::ContextError;
use crate::options::StackOptions;
use log::{debug, trace};
use std::borrow::Cow;

/// The open contexts of one read or write session, innermost last.
///
/// The root context is pushed when the session begins and popped by
/// [`ContextStack::end`]. In between, every [`enter`](ContextStack::enter)
/// pushes one context and the matching [`exit`](ContextStack::exit) pops it.
/// Cursor operations go to the innermost context.
///
/// ```rust
/// use thrift_text::{AggregateKind, ContextStack, DocumentNode};
///
/// let mut stack = ContextStack::writer();
/// stack.enter(AggregateKind::Struct).unwrap();
/// stack.append_field("name", DocumentNode::text("thrift")).unwrap();
/// stack.exit(AggregateKind::Struct).unwrap();
/// let document = stack.end().unwrap().into_owned();
///
/// let mut stack = ContextStack::reader(&document);
/// stack.advance().unwrap();
/// stack.enter(AggregateKind::Struct).unwrap();
/// stack.advance().unwrap();
/// assert_eq!(stack.current_key().unwrap().as_str(), Some("name"));
/// assert_eq!(stack.current_child().unwrap().as_str(), Some("thrift"));
/// ```
#[derive(Debug)]
pub struct ContextStack<'a> {
    mode: Mode,
    frames: Vec<Context<'a>>,
    options: StackOptions,
}

impl<'a> ContextStack<'a> {
    /// Starts a session. Reading needs the document to read; writing starts
    /// from nothing.
    pub fn begin(mode: Mode, root: Option<&'a DocumentNode>) -> Result<Self, ContextError> {
        Self::begin_with_options(mode, root, StackOptions::default())
    }

    pub fn begin_with_options(
        mode: Mode,
        root: Option<&'a DocumentNode>,
        options: StackOptions,
    ) -> Result<Self, ContextError> {
        match (mode, root) {
            (Mode::Read, Some(document)) => Ok(Self::reader_with_options(document, options)),
            (Mode::Read, None) => Err(ContextError::MissingRoot),
            (Mode::Write, None) => Ok(Self::writer_with_options(options)),
            (Mode::Write, Some(_)) => Err(ContextError::WrongMode {
                operation: "begin with a document",
                mode: Mode::Write,
            }),
        }
    }

    pub fn reader(document: &'a DocumentNode) -> Self {
        Self::reader_with_options(document, StackOptions::default())
    }

    pub fn reader_with_options(document: &'a DocumentNode, options: StackOptions) -> Self {
        debug!("begin read session over a {} document", document.shape());
        Self {
            mode: Mode::Read,
            frames: vec![Context::Root(RootContext::reader(document))],
            options,
        }
    }

    pub fn writer() -> Self {
        Self::writer_with_options(StackOptions::default())
    }

    pub fn writer_with_options(options: StackOptions) -> Self {
        debug!("begin write session");
        Self {
            mode: Mode::Write,
            frames: vec![Context::Root(RootContext::writer())],
            options,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Number of live contexts, the root included.
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn top(&self) -> Result<&Context<'a>, ContextError> {
        self.frames.last().ok_or(ContextError::EmptyStack)
    }

    pub fn top_mut(&mut self) -> Result<&mut Context<'a>, ContextError> {
        self.frames.last_mut().ok_or(ContextError::EmptyStack)
    }

    /// Pushes a context opened by the caller. It must match the session's
    /// mode, and only the first frame may be a root. When writing, the
    /// parent must be able to take the node this context will produce.
    pub fn push(&mut self, context: Context<'a>) -> Result<(), ContextError> {
        if context.mode() != self.mode {
            return Err(ContextError::WrongMode {
                operation: "push",
                mode: self.mode,
            });
        }
        let is_root = context.kind() == ContextKind::Root;
        if is_root != self.frames.is_empty() {
            let found = match self.frames.last() {
                Some(top) => top.kind(),
                None => ContextKind::Root,
            };
            return Err(ContextError::MismatchedNesting {
                expected: context.kind(),
                found,
            });
        }
        // the root does not count towards the nesting limit
        if self.frames.len() > self.options.max_depth {
            return Err(ContextError::DepthLimitExceeded {
                limit: self.options.max_depth,
            });
        }
        if self.mode == Mode::Write {
            if let Some(parent) = self.frames.last() {
                parent.check_append()?;
            }
        }
        trace!("push {} context at depth {}", context.kind(), self.frames.len());
        self.frames.push(context);
        Ok(())
    }

    /// Pops the innermost context.
    ///
    /// In write mode the context is finished and its node is appended to the
    /// parent. Popping the root instead hands the finished document back.
    /// Read mode simply discards the context and returns `None`.
    ///
    /// A write context that cannot be finished, or whose parent cannot take
    /// its node, stays on the stack.
    pub fn pop(&mut self) -> Result<Option<DocumentNode>, ContextError> {
        if self.mode == Mode::Write {
            let (top, parents) = self.frames.split_last().ok_or(ContextError::EmptyStack)?;
            top.check_finish()?;
            if let Some(parent) = parents.last() {
                parent.check_append()?;
            }
        }
        let mut context = self.frames.pop().ok_or(ContextError::EmptyStack)?;
        trace!("pop {} context at depth {}", context.kind(), self.frames.len());
        if self.mode == Mode::Read {
            return Ok(None);
        }
        let node = context.finish()?;
        match self.frames.last_mut() {
            Some(parent) => {
                parent.append_child(node)?;
                Ok(None)
            }
            None => Ok(Some(node)),
        }
    }

    /// Opens a nested aggregate.
    ///
    /// When reading, the new context covers the current child of the
    /// innermost context, which must have the matching shape.
    pub fn enter(&mut self, kind: AggregateKind) -> Result<(), ContextError> {
        let context = match self.mode {
            Mode::Read => match self.current_entry()? {
                KeyRef::Node(target) => Context::reader(kind, target)?,
                KeyRef::Name(_) => {
                    return Err(ContextError::UnexpectedNode {
                        expected: kind.into(),
                        found: "text",
                    })
                }
            },
            Mode::Write => Context::writer(kind),
        };
        self.push(context)
    }

    /// Closes the innermost aggregate, which must be an open `kind` above the root.
    pub fn exit(&mut self, kind: AggregateKind) -> Result<(), ContextError> {
        let found = self.top()?.kind();
        if found != ContextKind::from(kind) {
            return Err(ContextError::MismatchedNesting {
                expected: kind.into(),
                found,
            });
        }
        self.pop().map(|_| ())
    }

    /// Ends the session by popping the root.
    ///
    /// A read session hands back the document it was given; a write session
    /// hands back the document it assembled.
    pub fn end(mut self) -> Result<Cow<'a, DocumentNode>, ContextError> {
        if self.frames.len() > 1 {
            return Err(ContextError::UnclosedContexts {
                depth: self.frames.len() - 1,
            });
        }
        debug!("end {} session", self.mode);
        match self.mode {
            Mode::Read => match self.frames.pop() {
                Some(Context::Root(root)) => root
                    .document()
                    .map(Cow::Borrowed)
                    .ok_or(ContextError::MissingRoot),
                _ => Err(ContextError::EmptyStack),
            },
            Mode::Write => self
                .pop()?
                .map(Cow::Owned)
                .ok_or(ContextError::EmptyStack),
        }
    }

    // === Cursor operations on the innermost context ===

    pub fn has_more(&self) -> bool {
        self.frames.last().is_some_and(Context::has_more)
    }

    pub fn advance(&mut self) -> Result<(), ContextError> {
        self.top_mut()?.advance()
    }

    pub fn advance_to_value(&mut self) -> Result<(), ContextError> {
        self.top_mut()?.advance_to_value()
    }

    pub fn current_child(&self) -> Result<&'a DocumentNode, ContextError> {
        self.top()?.current_child()
    }

    /// The entry `enter` would open: a map key before `advance_to_value`,
    /// the current child everywhere else.
    pub(crate) fn current_entry(&self) -> Result<KeyRef<'a>, ContextError> {
        self.top()?.enter_target()
    }

    pub fn current_key(&self) -> Result<KeyRef<'a>, ContextError> {
        self.top()?.current_key()
    }

    pub fn current_value(&self) -> Result<&'a DocumentNode, ContextError> {
        self.top()?.current_value()
    }

    pub fn append_child(&mut self, node: DocumentNode) -> Result<(), ContextError> {
        self.top_mut()?.append_child(node)
    }

    pub fn begin_field(&mut self, key: impl Into<String>) -> Result<(), ContextError> {
        self.top_mut()?.begin_field(key)
    }

    pub fn append_field(
        &mut self,
        key: impl Into<String>,
        value: DocumentNode,
    ) -> Result<(), ContextError> {
        self.top_mut()?.append_field(key, value)
    }

    pub fn append_key(&mut self, key: DocumentNode) -> Result<(), ContextError> {
        self.top_mut()?.append_key(key)
    }

    pub fn append_pair(&mut self, key: DocumentNode, value: DocumentNode) -> Result<(), ContextError> {
        self.top_mut()?.append_pair(key, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_begin_checks_root_against_mode() {
        let document = DocumentNode::null();
        assert!(matches!(
            ContextStack::begin(Mode::Read, None),
            Err(ContextError::MissingRoot)
        ));
        assert!(matches!(
            ContextStack::begin(Mode::Write, Some(&document)),
            Err(ContextError::WrongMode { .. })
        ));
        assert_eq!(
            ContextStack::begin(Mode::Read, Some(&document)).unwrap().depth(),
            1
        );
    }

    #[test]
    fn test_exit_without_enter() {
        let mut stack = ContextStack::writer();
        assert_eq!(
            stack.exit(AggregateKind::Struct),
            Err(ContextError::MismatchedNesting {
                expected: ContextKind::Struct,
                found: ContextKind::Root
            })
        );
        assert_eq!(stack.depth(), 1);
    }

    #[test]
    fn test_exit_of_wrong_kind_pops_nothing() {
        let mut stack = ContextStack::writer();
        stack.enter(AggregateKind::Sequence).unwrap();
        assert!(matches!(
            stack.exit(AggregateKind::Map),
            Err(ContextError::MismatchedNesting { .. })
        ));
        assert_eq!(stack.depth(), 2);
        stack.exit(AggregateKind::Sequence).unwrap();
        assert_eq!(stack.depth(), 1);
    }

    #[test]
    fn test_empty_stack_after_root_pop() {
        let mut stack = ContextStack::writer();
        stack.append_child(DocumentNode::from(1)).unwrap();
        assert_eq!(stack.pop().unwrap(), Some(DocumentNode::from(1)));
        assert!(matches!(stack.top(), Err(ContextError::EmptyStack)));
        assert!(matches!(stack.advance(), Err(ContextError::EmptyStack)));
        assert!(!stack.has_more());
    }

    #[test]
    fn test_push_rejects_second_root_and_other_mode() {
        let document = DocumentNode::null();
        let mut stack = ContextStack::writer();
        assert!(matches!(
            stack.push(Context::Root(RootContext::writer())),
            Err(ContextError::MismatchedNesting { .. })
        ));
        assert!(matches!(
            stack.push(Context::Root(RootContext::reader(&document))),
            Err(ContextError::WrongMode { .. })
        ));
    }

    #[test]
    fn test_depth_limit() {
        let options = StackOptions { max_depth: 2 };
        let mut stack = ContextStack::writer_with_options(options);
        stack.enter(AggregateKind::Sequence).unwrap();
        stack.enter(AggregateKind::Sequence).unwrap();
        assert_eq!(
            stack.enter(AggregateKind::Sequence),
            Err(ContextError::DepthLimitExceeded { limit: 2 })
        );
    }

    #[test]
    fn test_end_with_open_aggregate() {
        let mut stack = ContextStack::writer();
        stack.enter(AggregateKind::Map).unwrap();
        assert!(matches!(
            stack.end(),
            Err(ContextError::UnclosedContexts { depth: 1 })
        ));
    }

    #[test]
    fn test_read_end_returns_original_document() {
        let document = DocumentNode::Sequence(vec![DocumentNode::from(1)]);
        let mut stack = ContextStack::reader(&document);
        stack.advance().unwrap();
        stack.enter(AggregateKind::Sequence).unwrap();
        stack.advance().unwrap();
        stack.exit(AggregateKind::Sequence).unwrap();
        match stack.end().unwrap() {
            Cow::Borrowed(node) => assert!(std::ptr::eq(node, &document)),
            Cow::Owned(_) => panic!("read sessions must not copy the document"),
        }
    }
}
