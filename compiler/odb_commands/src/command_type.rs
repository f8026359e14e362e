//! Single-character type codes used by command signatures.

use std::fmt;

use thiserror::Error;

/// Type of a command parameter or return value.
///
/// Each variant corresponds to one character of the dialect's signature
/// strings (`F(LL)` is "returns float, takes two integers").
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum CommandType {
    Void,
    DoubleInteger,
    Dword,
    Integer,
    Word,
    Byte,
    Boolean,
    Float,
    DoubleFloat,
    String,
    /// Accepts a value of any type.
    Any,
    /// Accepts any number of trailing values.
    Variadic,
}

/// Error produced when a signature string contains an unknown code.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum CommandTypeError {
    #[error("unknown command type code `{0}`")]
    UnknownCode(char),
    #[error("malformed command signature `{0}`: expected `<ret>(<params>)`")]
    MalformedSignature(String),
}

impl CommandType {
    /// Parse a signature character.
    pub fn from_code(code: char) -> Result<Self, CommandTypeError> {
        Ok(match code {
            '0' => CommandType::Void,
            'R' => CommandType::DoubleInteger,
            'D' => CommandType::Dword,
            'L' => CommandType::Integer,
            'W' => CommandType::Word,
            'Y' => CommandType::Byte,
            'B' => CommandType::Boolean,
            'F' => CommandType::Float,
            'O' => CommandType::DoubleFloat,
            'S' => CommandType::String,
            'X' => CommandType::Any,
            'A' => CommandType::Variadic,
            other => return Err(CommandTypeError::UnknownCode(other)),
        })
    }

    /// The signature character for this type.
    pub const fn code(self) -> char {
        match self {
            CommandType::Void => '0',
            CommandType::DoubleInteger => 'R',
            CommandType::Dword => 'D',
            CommandType::Integer => 'L',
            CommandType::Word => 'W',
            CommandType::Byte => 'Y',
            CommandType::Boolean => 'B',
            CommandType::Float => 'F',
            CommandType::DoubleFloat => 'O',
            CommandType::String => 'S',
            CommandType::Any => 'X',
            CommandType::Variadic => 'A',
        }
    }

    /// True for the two sentinels that do not name a concrete type.
    ///
    /// Overload filtering skips these slots entirely.
    pub const fn is_wildcard(self) -> bool {
        matches!(self, CommandType::Any | CommandType::Variadic)
    }

    pub const fn is_void(self) -> bool {
        matches!(self, CommandType::Void)
    }

    pub const fn name(self) -> &'static str {
        match self {
            CommandType::Void => "void",
            CommandType::DoubleInteger => "DoubleInteger",
            CommandType::Dword => "Dword",
            CommandType::Integer => "Integer",
            CommandType::Word => "Word",
            CommandType::Byte => "Byte",
            CommandType::Boolean => "Boolean",
            CommandType::Float => "Float",
            CommandType::DoubleFloat => "DoubleFloat",
            CommandType::String => "String",
            CommandType::Any => "any",
            CommandType::Variadic => "...",
        }
    }
}

impl fmt::Display for CommandType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_round_trip() {
        for code in "0RDLWYBFOSXA".chars() {
            let ty = CommandType::from_code(code).unwrap_or(CommandType::Void);
            assert_eq!(ty.code(), code);
        }
    }

    #[test]
    fn unknown_code_is_rejected() {
        assert_eq!(
            CommandType::from_code('Z'),
            Err(CommandTypeError::UnknownCode('Z'))
        );
        assert_eq!(
            CommandTypeError::UnknownCode('Z').to_string(),
            "unknown command type code `Z`"
        );
    }

    #[test]
    fn wildcards() {
        assert!(CommandType::Any.is_wildcard());
        assert!(CommandType::Variadic.is_wildcard());
        assert!(!CommandType::Integer.is_wildcard());
        assert!(CommandType::Void.is_void());
    }
}
