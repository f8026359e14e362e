//! Resolved types.

use std::fmt;

use odb_commands::CommandType;

use crate::{Annotation, BuiltinType, Name, StringInterner};

/// The type of an expression, variable, or declaration.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum Type {
    Void,
    Builtin(BuiltinType),
    /// A user-defined type, by declared name.
    Udt(Name),
    /// An array of the element type.
    Array(Box<Type>),
}

/// Information lost by an implicit conversion.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ConversionLoss {
    /// The value may not fit or loses its fractional part.
    Truncation,
    /// Same width, different signedness.
    SignChange,
}

impl Type {
    pub const BOOLEAN: Type = Type::Builtin(BuiltinType::Boolean);
    pub const INTEGER: Type = Type::Builtin(BuiltinType::Integer);
    pub const DWORD: Type = Type::Builtin(BuiltinType::Dword);
    pub const FLOAT: Type = Type::Builtin(BuiltinType::Float);
    pub const STRING: Type = Type::Builtin(BuiltinType::String);

    #[must_use]
    pub fn array_of(element: Type) -> Type {
        Type::Array(Box::new(element))
    }

    /// Type implied by a sigil on an undeclared variable.
    pub const fn from_annotation(annotation: Annotation) -> Type {
        match annotation {
            Annotation::None => Type::INTEGER,
            Annotation::String => Type::STRING,
            Annotation::Float => Type::FLOAT,
        }
    }

    /// Map a command signature type. `None` for the `Any`/`Variadic`
    /// wildcards, which stand for no particular type.
    pub const fn from_command_type(ty: CommandType) -> Option<Type> {
        if ty.is_void() {
            return Some(Type::Void);
        }
        match BuiltinType::from_command_type(ty) {
            Some(builtin) => Some(Type::Builtin(builtin)),
            None => None,
        }
    }

    pub const fn is_void(&self) -> bool {
        matches!(self, Type::Void)
    }

    pub const fn as_builtin(&self) -> Option<BuiltinType> {
        match self {
            Type::Builtin(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_udt(&self) -> Option<Name> {
        match self {
            Type::Udt(name) => Some(*name),
            _ => None,
        }
    }

    pub fn array_element(&self) -> Option<&Type> {
        match self {
            Type::Array(element) => Some(element),
            _ => None,
        }
    }

    pub fn is_numeric(&self) -> bool {
        self.as_builtin().is_some_and(BuiltinType::is_numeric)
    }

    /// Whether a value of this type may be implicitly converted to `target`.
    ///
    /// Identical types always convert. Among builtins, any numeric type
    /// converts to any other numeric type. Nothing else converts.
    pub fn is_convertible_to(&self, target: &Type) -> bool {
        if self == target {
            return true;
        }
        match (self, target) {
            (Type::Builtin(from), Type::Builtin(to)) => from.is_numeric() && to.is_numeric(),
            _ => false,
        }
    }

    /// What an implicit conversion from `self` to `target` loses, if anything.
    ///
    /// Only meaningful for convertible numeric pairs; returns `None` for
    /// everything else. Conversions to `Boolean` never report a loss.
    pub fn conversion_loss(&self, target: &Type) -> Option<ConversionLoss> {
        let (Some(from), Some(to)) = (self.as_builtin(), target.as_builtin()) else {
            return None;
        };
        if from == to
            || from == BuiltinType::Boolean
            || to == BuiltinType::Boolean
            || !from.is_numeric()
            || !to.is_numeric()
        {
            return None;
        }
        if from.is_floating() {
            let narrowing = to.is_integral() || to.numeric_width() < from.numeric_width();
            return narrowing.then_some(ConversionLoss::Truncation);
        }
        if to.is_floating() {
            return None;
        }
        let (from_width, to_width) = (from.numeric_width(), to.numeric_width());
        if to_width < from_width {
            Some(ConversionLoss::Truncation)
        } else if to_width == from_width && from.is_signed() != to.is_signed() {
            Some(ConversionLoss::SignChange)
        } else {
            None
        }
    }

    /// Render with UDT names resolved.
    pub fn display<'a>(&'a self, interner: &'a StringInterner) -> TypeDisplay<'a> {
        TypeDisplay { ty: self, interner }
    }
}

impl From<BuiltinType> for Type {
    fn from(builtin: BuiltinType) -> Self {
        Type::Builtin(builtin)
    }
}

/// [`Type`] paired with the interner needed to print UDT names.
pub struct TypeDisplay<'a> {
    ty: &'a Type,
    interner: &'a StringInterner,
}

impl fmt::Display for TypeDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.ty {
            Type::Void => f.write_str("void"),
            Type::Builtin(b) => f.write_str(b.name()),
            Type::Udt(name) => f.write_str(self.interner.lookup(*name)),
            Type::Array(element) => write!(f, "{}()", element.display(self.interner)),
        }
    }
}

#[cfg(test)]
mod tests;
