//! Error codes for all front-end diagnostics.
//!
//! Each error code is a unique identifier (e.g., `E2001`) whose first digit
//! names the family it belongs to.

use std::fmt;

/// Error codes for all front-end diagnostics.
///
/// Format: `E####` / `W####` where the first digit indicates the family:
/// - E2xxx: Semantic errors (declarations, types, calls, UDTs)
/// - E3xxx: Label and `select` structure errors
/// - W2xxx: Semantic warnings
/// - E9xxx: Internal errors
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Semantic Errors (E2xxx)
    /// Value cannot be converted to the required type
    E2001,
    /// Variable declared twice in the same scope
    E2002,
    /// Array used before being declared
    E2003,
    /// Wrong number of arguments
    E2004,
    /// Unknown function
    E2005,
    /// Unknown command
    E2006,
    /// No command overload matches the arguments
    E2007,
    /// Operator applied to a non-numeric operand
    E2008,
    /// Declaration without a required initializer
    E2009,
    /// Initializer list has the wrong shape
    E2010,
    /// Field access on an expression that is not a UDT
    E2011,
    /// Unknown UDT type
    E2012,
    /// Unknown UDT field
    E2013,
    /// UDT field array-ness does not match its use
    E2014,
    /// UDT expression carries a type annotation
    E2015,
    /// Command name ends in a type annotation character
    E2016,
    /// Bitwise-not operand has side effects
    E2017,

    // Label and Select Errors (E3xxx)
    /// Label defined more than once
    E3001,
    /// Jump to an undefined label
    E3002,
    /// More than one default case in a select
    E3003,

    // Internal Errors (E9xxx)
    /// Internal front-end error
    E9001,
    /// Too many errors
    E9002,

    // Warnings (W2xxx)
    /// Implicit conversion truncates the value
    W2001,
    /// Implicit conversion changes signedness
    W2002,
}

impl ErrorCode {
    /// Every error code variant, for exhaustive iteration.
    pub const ALL: &[ErrorCode] = &[
        // Semantic
        ErrorCode::E2001,
        ErrorCode::E2002,
        ErrorCode::E2003,
        ErrorCode::E2004,
        ErrorCode::E2005,
        ErrorCode::E2006,
        ErrorCode::E2007,
        ErrorCode::E2008,
        ErrorCode::E2009,
        ErrorCode::E2010,
        ErrorCode::E2011,
        ErrorCode::E2012,
        ErrorCode::E2013,
        ErrorCode::E2014,
        ErrorCode::E2015,
        ErrorCode::E2016,
        ErrorCode::E2017,
        // Labels / select
        ErrorCode::E3001,
        ErrorCode::E3002,
        ErrorCode::E3003,
        // Internal
        ErrorCode::E9001,
        ErrorCode::E9002,
        // Warnings
        ErrorCode::W2001,
        ErrorCode::W2002,
    ];

    /// Get the string representation of this error code.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E2001 => "E2001",
            ErrorCode::E2002 => "E2002",
            ErrorCode::E2003 => "E2003",
            ErrorCode::E2004 => "E2004",
            ErrorCode::E2005 => "E2005",
            ErrorCode::E2006 => "E2006",
            ErrorCode::E2007 => "E2007",
            ErrorCode::E2008 => "E2008",
            ErrorCode::E2009 => "E2009",
            ErrorCode::E2010 => "E2010",
            ErrorCode::E2011 => "E2011",
            ErrorCode::E2012 => "E2012",
            ErrorCode::E2013 => "E2013",
            ErrorCode::E2014 => "E2014",
            ErrorCode::E2015 => "E2015",
            ErrorCode::E2016 => "E2016",
            ErrorCode::E2017 => "E2017",
            ErrorCode::E3001 => "E3001",
            ErrorCode::E3002 => "E3002",
            ErrorCode::E3003 => "E3003",
            ErrorCode::E9001 => "E9001",
            ErrorCode::E9002 => "E9002",
            ErrorCode::W2001 => "W2001",
            ErrorCode::W2002 => "W2002",
        }
    }

    /// Check if this is a semantic error (E2xxx range).
    pub fn is_semantic_error(&self) -> bool {
        matches!(
            self,
            ErrorCode::E2001
                | ErrorCode::E2002
                | ErrorCode::E2003
                | ErrorCode::E2004
                | ErrorCode::E2005
                | ErrorCode::E2006
                | ErrorCode::E2007
                | ErrorCode::E2008
                | ErrorCode::E2009
                | ErrorCode::E2010
                | ErrorCode::E2011
                | ErrorCode::E2012
                | ErrorCode::E2013
                | ErrorCode::E2014
                | ErrorCode::E2015
                | ErrorCode::E2016
                | ErrorCode::E2017
        )
    }

    /// Check if this is a label or select structure error (E3xxx range).
    pub fn is_structure_error(&self) -> bool {
        matches!(self, ErrorCode::E3001 | ErrorCode::E3002 | ErrorCode::E3003)
    }

    /// Check if this is an internal error (E9xxx range).
    pub fn is_internal_error(&self) -> bool {
        matches!(self, ErrorCode::E9001 | ErrorCode::E9002)
    }

    /// Check if this is a warning code (Wxxxx range).
    pub fn is_warning(&self) -> bool {
        matches!(self, ErrorCode::W2001 | ErrorCode::W2002)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Parse an error code string like `"E2001"` or `"w2001"`.
///
/// Case-insensitive. Derived from [`ErrorCode::ALL`] and [`ErrorCode::as_str()`].
impl std::str::FromStr for ErrorCode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.to_uppercase();
        Self::ALL
            .iter()
            .find(|code| code.as_str() == upper)
            .copied()
            .ok_or(())
    }
}
