/// Limits applied to one read or write session.
///
/// ```rust
/// use thrift_text::{ContextStack, DocumentNode, StackOptions};
///
/// let document = DocumentNode::Sequence(vec![]);
/// let options = StackOptions { max_depth: 16 };
/// let stack = ContextStack::reader_with_options(&document, options);
/// assert_eq!(stack.depth(), 1);
/// ```
#[derive(Clone, Debug)]
pub struct StackOptions {
    /// Maximum number of aggregates open at the same time, the root excluded.
    ///
    /// Default: 512
    pub max_depth: usize,
}

impl Default for StackOptions {
    fn default() -> Self {
        Self { max_depth: 512 }
    }
}

impl StackOptions {
    /// No practical nesting limit.
    pub fn unbounded() -> Self {
        Self {
            max_depth: usize::MAX,
        }
    }
}
