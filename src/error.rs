use std::{error::Error, fmt};

/// The role an operand plays in a [`Select`][crate::Select] expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Then,
    Else,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Role::Then => "then",
            Role::Else => "else",
        })
    }
}

/// An operand's shape disagrees with the shape the expression requires.
///
/// `expected` is the shape dictated by the condition operand, `found` is the shape of the operand
/// named by [`ShapeError::role`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapeError {
    role: Role,
    expected: (usize, usize),
    found: (usize, usize),
}

impl ShapeError {
    pub(crate) fn new(role: Role, expected: (usize, usize), found: (usize, usize)) -> Self {
        Self {
            role,
            expected,
            found,
        }
    }

    /// Returns which operand had the wrong shape.
    pub fn role(&self) -> Role {
        self.role
    }

    /// Returns the `(rows, cols)` the operand should have had.
    pub fn expected(&self) -> (usize, usize) {
        self.expected
    }

    /// Returns the `(rows, cols)` the operand actually has.
    pub fn found(&self) -> (usize, usize) {
        self.found
    }
}

impl fmt::Display for ShapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (er, ec) = self.expected;
        let (fr, fc) = self.found;
        write!(
            f,
            "shape mismatch: {} operand is {fr}x{fc}, expected {er}x{ec}",
            self.role
        )
    }
}

impl Error for ShapeError {}
