//! Literal values, one variant per builtin type.

use crate::{BuiltinType, Name};

/// A constant as written in source.
///
/// Matrices are boxed to keep `NodeKind` small; they are rare in practice.
#[derive(Clone, PartialEq, Debug)]
pub enum LiteralValue {
    DoubleInteger(i64),
    Integer(i32),
    Dword(u32),
    Word(u16),
    Byte(u8),
    Boolean(bool),
    DoubleFloat(f64),
    Float(f32),
    String(Name),
    Complex([f32; 2]),
    Mat2x2(Box<[f32; 4]>),
    Mat2x3(Box<[f32; 6]>),
    Mat2x4(Box<[f32; 8]>),
    Mat3x2(Box<[f32; 6]>),
    Mat3x3(Box<[f32; 9]>),
    Mat3x4(Box<[f32; 12]>),
    Mat4x2(Box<[f32; 8]>),
    Mat4x3(Box<[f32; 12]>),
    Mat4x4(Box<[f32; 16]>),
    Quat([f32; 4]),
    Vec2([f32; 2]),
    Vec3([f32; 3]),
    Vec4([f32; 4]),
}

impl LiteralValue {
    pub const fn builtin_type(&self) -> BuiltinType {
        match self {
            Self::DoubleInteger(_) => BuiltinType::DoubleInteger,
            Self::Integer(_) => BuiltinType::Integer,
            Self::Dword(_) => BuiltinType::Dword,
            Self::Word(_) => BuiltinType::Word,
            Self::Byte(_) => BuiltinType::Byte,
            Self::Boolean(_) => BuiltinType::Boolean,
            Self::DoubleFloat(_) => BuiltinType::DoubleFloat,
            Self::Float(_) => BuiltinType::Float,
            Self::String(_) => BuiltinType::String,
            Self::Complex(_) => BuiltinType::Complex,
            Self::Mat2x2(_) => BuiltinType::Mat2x2,
            Self::Mat2x3(_) => BuiltinType::Mat2x3,
            Self::Mat2x4(_) => BuiltinType::Mat2x4,
            Self::Mat3x2(_) => BuiltinType::Mat3x2,
            Self::Mat3x3(_) => BuiltinType::Mat3x3,
            Self::Mat3x4(_) => BuiltinType::Mat3x4,
            Self::Mat4x2(_) => BuiltinType::Mat4x2,
            Self::Mat4x3(_) => BuiltinType::Mat4x3,
            Self::Mat4x4(_) => BuiltinType::Mat4x4,
            Self::Quat(_) => BuiltinType::Quat,
            Self::Vec2(_) => BuiltinType::Vec2,
            Self::Vec3(_) => BuiltinType::Vec3,
            Self::Vec4(_) => BuiltinType::Vec4,
        }
    }

    /// The value `1` in the given numeric type, used for implicit loop steps.
    pub fn one(ty: BuiltinType) -> Option<Self> {
        Some(match ty {
            BuiltinType::DoubleInteger => Self::DoubleInteger(1),
            BuiltinType::Integer => Self::Integer(1),
            BuiltinType::Dword => Self::Dword(1),
            BuiltinType::Word => Self::Word(1),
            BuiltinType::Byte => Self::Byte(1),
            BuiltinType::Boolean => Self::Boolean(true),
            BuiltinType::DoubleFloat => Self::DoubleFloat(1.0),
            BuiltinType::Float => Self::Float(1.0),
            _ => return None,
        })
    }
}
