//! Ancestor chain of the elements currently open in one component.
//!
//! The stack depth doubles as the nesting depth: an element whose frame
//! leaves the stack empty when popped is a root of the component.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub tag_name: String,
    pub var_name: String,
    /// Line of the start tag, for unclosed-element reports.
    pub line: u64,
}

#[derive(Debug, Default)]
pub struct ScopeStack {
    frames: Vec<Frame>,
}

impl ScopeStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, frame: Frame) {
        self.frames.push(frame);
    }

    pub fn pop(&mut self) -> Option<Frame> {
        self.frames.pop()
    }

    /// The innermost open element, i.e. the parent of whatever comes next.
    pub fn peek(&self) -> Option<&Frame> {
        self.frames.last()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}
