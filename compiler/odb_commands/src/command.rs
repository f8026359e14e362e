//! A single command overload.

use std::fmt;

use crate::{CommandType, CommandTypeError};

/// One parameter slot of a command signature.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct CommandParam {
    pub ty: CommandType,
    /// Out parameters are written by the command and must match exactly.
    pub is_out: bool,
}

impl CommandParam {
    pub const fn new(ty: CommandType) -> Self {
        CommandParam { ty, is_out: false }
    }

    pub const fn out(ty: CommandType) -> Self {
        CommandParam { ty, is_out: true }
    }
}

/// A command overload as registered in the index.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Command {
    /// Name as written in source (`"make object cube"`).
    symbol: String,
    /// Library the command was loaded from, for conflict reports.
    library: String,
    return_type: CommandType,
    params: Vec<CommandParam>,
}

impl Command {
    pub fn new(symbol: impl Into<String>, return_type: CommandType) -> Self {
        Command {
            symbol: symbol.into(),
            library: String::new(),
            return_type,
            params: Vec::new(),
        }
    }

    /// Build a command from a signature string such as `"F(LL)"`.
    ///
    /// The first character is the return type, the parenthesised characters
    /// are the parameters. A `*` before a parameter code marks it as an out
    /// parameter: `"0(L*F)"`.
    pub fn from_signature(
        symbol: impl Into<String>,
        signature: &str,
    ) -> Result<Self, CommandTypeError> {
        let malformed = || CommandTypeError::MalformedSignature(signature.to_owned());

        let mut chars = signature.chars();
        let ret = CommandType::from_code(chars.next().ok_or_else(malformed)?)?;
        if chars.next() != Some('(') {
            return Err(malformed());
        }

        let mut command = Command::new(symbol, ret);
        let mut out_next = false;
        loop {
            match chars.next() {
                Some(')') if !out_next => break,
                Some('*') if !out_next => out_next = true,
                Some(code) => {
                    let ty = CommandType::from_code(code)?;
                    command.params.push(CommandParam {
                        ty,
                        is_out: out_next,
                    });
                    out_next = false;
                }
                None => return Err(malformed()),
            }
        }
        if chars.next().is_some() {
            return Err(malformed());
        }
        Ok(command)
    }

    #[must_use]
    pub fn with_param(mut self, ty: CommandType) -> Self {
        self.params.push(CommandParam::new(ty));
        self
    }

    #[must_use]
    pub fn with_out_param(mut self, ty: CommandType) -> Self {
        self.params.push(CommandParam::out(ty));
        self
    }

    #[must_use]
    pub fn with_library(mut self, library: impl Into<String>) -> Self {
        self.library = library.into();
        self
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn library(&self) -> &str {
        &self.library
    }

    pub fn return_type(&self) -> CommandType {
        self.return_type
    }

    pub fn params(&self) -> &[CommandParam] {
        &self.params
    }

    /// Same return type and parameter list.
    pub fn same_signature(&self, other: &Command) -> bool {
        self.return_type == other.return_type && self.params == other.params
    }

    /// Compact signature string, the inverse of [`Command::from_signature`].
    pub fn signature(&self) -> String {
        let mut out = String::with_capacity(self.params.len() + 3);
        out.push(self.return_type.code());
        out.push('(');
        for param in &self.params {
            if param.is_out {
                out.push('*');
            }
            out.push(param.ty.code());
        }
        out.push(')');
        out
    }
}

/// Renders as `symbol Integer, Float` for overload listings.
impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.symbol)?;
        for (i, param) in self.params.iter().enumerate() {
            f.write_str(if i == 0 { " " } else { ", " })?;
            write!(f, "{}", param.ty)?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
