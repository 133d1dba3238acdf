//! Template AST types.

/// A node in a parsed template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Text copied to the output as-is.
    Literal(String),

    /// `{{ pipeline }}`
    Action(Pipeline),
}

/// Commands joined by `|`. Each command's output becomes the last argument
/// of the next one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pipeline {
    pub commands: Vec<Command>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// A bare value: `.field` or `"text"`.
    Value(Term),

    /// A function call: `name arg...`
    Call { function: String, args: Vec<Term> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Term {
    /// `.field`
    Variable(String),

    /// `"text"` or `` `text` ``
    Text(String),
}
