//! Builtin primitive, vector, and matrix types.
//!
//! # Categories
//!
//! - Integral: `DoubleInteger`, `Integer`, `Dword`, `Word`, `Byte`, `Boolean`
//! - Floating: `DoubleFloat`, `Float`
//! - Everything else (strings, vectors, matrices) is neither, and only
//!   converts to itself.

use odb_commands::CommandType;

/// Coarse family of a builtin, used to rank near-miss overload matches.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Archetype {
    Integral,
    Floating,
}

/// All builtin types of the dialect.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum BuiltinType {
    // Integral
    /// 64-bit signed integer
    DoubleInteger,
    /// 32-bit signed integer
    Integer,
    /// 32-bit unsigned integer
    Dword,
    /// 16-bit unsigned integer
    Word,
    /// 8-bit unsigned integer
    Byte,
    Boolean,

    // Floating
    DoubleFloat,
    Float,

    String,

    // Float aggregates
    Complex,
    Mat2x2,
    Mat2x3,
    Mat2x4,
    Mat3x2,
    Mat3x3,
    Mat3x4,
    Mat4x2,
    Mat4x3,
    Mat4x4,
    Quat,
    Vec2,
    Vec3,
    Vec4,
}

impl BuiltinType {
    pub const ALL: [BuiltinType; 23] = [
        Self::DoubleInteger,
        Self::Integer,
        Self::Dword,
        Self::Word,
        Self::Byte,
        Self::Boolean,
        Self::DoubleFloat,
        Self::Float,
        Self::String,
        Self::Complex,
        Self::Mat2x2,
        Self::Mat2x3,
        Self::Mat2x4,
        Self::Mat3x2,
        Self::Mat3x3,
        Self::Mat3x4,
        Self::Mat4x2,
        Self::Mat4x3,
        Self::Mat4x4,
        Self::Quat,
        Self::Vec2,
        Self::Vec3,
        Self::Vec4,
    ];

    /// Canonical name as written in `AS <type>` clauses.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::DoubleInteger => "DoubleInteger",
            Self::Integer => "Integer",
            Self::Dword => "Dword",
            Self::Word => "Word",
            Self::Byte => "Byte",
            Self::Boolean => "Boolean",
            Self::DoubleFloat => "DoubleFloat",
            Self::Float => "Float",
            Self::String => "String",
            Self::Complex => "Complex",
            Self::Mat2x2 => "Mat2x2",
            Self::Mat2x3 => "Mat2x3",
            Self::Mat2x4 => "Mat2x4",
            Self::Mat3x2 => "Mat3x2",
            Self::Mat3x3 => "Mat3x3",
            Self::Mat3x4 => "Mat3x4",
            Self::Mat4x2 => "Mat4x2",
            Self::Mat4x3 => "Mat4x3",
            Self::Mat4x4 => "Mat4x4",
            Self::Quat => "Quat",
            Self::Vec2 => "Vec2",
            Self::Vec3 => "Vec3",
            Self::Vec4 => "Vec4",
        }
    }

    #[must_use]
    pub const fn is_integral(self) -> bool {
        matches!(
            self,
            Self::DoubleInteger
                | Self::Integer
                | Self::Dword
                | Self::Word
                | Self::Byte
                | Self::Boolean
        )
    }

    #[must_use]
    pub const fn is_floating(self) -> bool {
        matches!(self, Self::DoubleFloat | Self::Float)
    }

    #[must_use]
    pub const fn is_numeric(self) -> bool {
        self.is_integral() || self.is_floating()
    }

    #[must_use]
    pub const fn archetype(self) -> Option<Archetype> {
        if self.is_integral() {
            Some(Archetype::Integral)
        } else if self.is_floating() {
            Some(Archetype::Floating)
        } else {
            None
        }
    }

    /// Storage width in bytes of a numeric type, `None` otherwise.
    #[must_use]
    pub const fn numeric_width(self) -> Option<u8> {
        match self {
            Self::DoubleInteger | Self::DoubleFloat => Some(8),
            Self::Integer | Self::Dword | Self::Boolean | Self::Float => Some(4),
            Self::Word => Some(2),
            Self::Byte => Some(1),
            _ => None,
        }
    }

    /// Whether an integral type can hold negative values.
    #[must_use]
    pub const fn is_signed(self) -> bool {
        matches!(
            self,
            Self::DoubleInteger | Self::Integer | Self::DoubleFloat | Self::Float
        )
    }

    /// Number of initializer expressions a declaration of this type takes,
    /// and the type each one is coerced to.
    ///
    /// Aggregates take one `Float` per component; scalars take one value of
    /// their own type.
    #[must_use]
    pub const fn initializer_shape(self) -> (usize, BuiltinType) {
        match self {
            Self::Complex | Self::Vec2 => (2, Self::Float),
            Self::Vec3 => (3, Self::Float),
            Self::Vec4 | Self::Quat | Self::Mat2x2 => (4, Self::Float),
            Self::Mat2x3 | Self::Mat3x2 => (6, Self::Float),
            Self::Mat2x4 | Self::Mat4x2 => (8, Self::Float),
            Self::Mat3x3 => (9, Self::Float),
            Self::Mat3x4 | Self::Mat4x3 => (12, Self::Float),
            Self::Mat4x4 => (16, Self::Float),
            scalar => (1, scalar),
        }
    }

    /// Map a command signature type. Wildcards and void have no builtin.
    #[must_use]
    pub const fn from_command_type(ty: CommandType) -> Option<Self> {
        Some(match ty {
            CommandType::DoubleInteger => Self::DoubleInteger,
            CommandType::Integer => Self::Integer,
            CommandType::Dword => Self::Dword,
            CommandType::Word => Self::Word,
            CommandType::Byte => Self::Byte,
            CommandType::Boolean => Self::Boolean,
            CommandType::DoubleFloat => Self::DoubleFloat,
            CommandType::Float => Self::Float,
            CommandType::String => Self::String,
            CommandType::Void | CommandType::Any | CommandType::Variadic => return None,
        })
    }
}

impl std::fmt::Display for BuiltinType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
