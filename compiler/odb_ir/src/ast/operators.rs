//! Binary and unary operators.

/// Binary operators.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum BinaryOpKind {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,

    // Bitwise
    ShiftLeft,
    ShiftRight,
    BitwiseOr,
    BitwiseAnd,
    BitwiseXor,
    /// `a .. b`, rewritten to a unary not of `a` before resolution.
    BitwiseNot,

    // Comparison
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
    Equal,
    NotEqual,

    // Logical
    LogicalOr,
    LogicalAnd,
    LogicalXor,
}

impl BinaryOpKind {
    /// Source-level spelling.
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "mod",
            Self::Pow => "^",
            Self::ShiftLeft => "<<",
            Self::ShiftRight => ">>",
            Self::BitwiseOr => "||",
            Self::BitwiseAnd => "&&",
            Self::BitwiseXor => "~~",
            Self::BitwiseNot => "..",
            Self::Less => "<",
            Self::LessEqual => "<=",
            Self::Greater => ">",
            Self::GreaterEqual => ">=",
            Self::Equal => "=",
            Self::NotEqual => "<>",
            Self::LogicalOr => "or",
            Self::LogicalAnd => "and",
            Self::LogicalXor => "xor",
        }
    }

    /// Comparisons always produce `Boolean`.
    pub const fn is_comparison(self) -> bool {
        matches!(
            self,
            Self::Less
                | Self::LessEqual
                | Self::Greater
                | Self::GreaterEqual
                | Self::Equal
                | Self::NotEqual
        )
    }
}

/// Unary operators.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum UnaryOpKind {
    Negate,
    BitwiseNot,
    LogicalNot,
}

impl UnaryOpKind {
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Negate => "-",
            Self::BitwiseNot => "..",
            Self::LogicalNot => "not",
        }
    }

    /// Name used in diagnostics ("the negate operator ...").
    pub const fn description(self) -> &'static str {
        match self {
            Self::Negate => "negate",
            Self::BitwiseNot => "bitwise-not",
            Self::LogicalNot => "logical-not",
        }
    }
}
