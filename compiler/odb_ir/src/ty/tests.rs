use pretty_assertions::assert_eq;

use super::*;

fn builtin(b: BuiltinType) -> Type {
    Type::Builtin(b)
}

#[test]
fn identical_types_convert() {
    let mut interner = StringInterner::new();
    let point = Type::Udt(interner.intern("Point"));
    for ty in [
        Type::Void,
        Type::STRING,
        builtin(BuiltinType::Vec3),
        point.clone(),
        Type::array_of(Type::INTEGER),
    ] {
        assert!(ty.is_convertible_to(&ty), "{ty:?}");
    }
}

#[test]
fn numeric_types_convert_between_each_other() {
    for from in BuiltinType::ALL.into_iter().filter(|b| b.is_numeric()) {
        for to in BuiltinType::ALL.into_iter().filter(|b| b.is_numeric()) {
            assert!(builtin(from).is_convertible_to(&builtin(to)), "{from} -> {to}");
        }
    }
}

#[test]
fn non_numeric_types_only_convert_to_themselves() {
    let mut interner = StringInterner::new();
    let point = Type::Udt(interner.intern("Point"));
    assert!(!Type::STRING.is_convertible_to(&Type::INTEGER));
    assert!(!Type::INTEGER.is_convertible_to(&Type::STRING));
    assert!(!builtin(BuiltinType::Vec2).is_convertible_to(&builtin(BuiltinType::Complex)));
    assert!(!point.is_convertible_to(&Type::INTEGER));
    assert!(!Type::Void.is_convertible_to(&Type::INTEGER));
    assert!(!Type::array_of(Type::INTEGER).is_convertible_to(&Type::array_of(Type::FLOAT)));
}

#[test]
fn annotation_defaults() {
    assert_eq!(Type::from_annotation(Annotation::None), Type::INTEGER);
    assert_eq!(Type::from_annotation(Annotation::String), Type::STRING);
    assert_eq!(Type::from_annotation(Annotation::Float), Type::FLOAT);
}

#[test]
fn command_types() {
    assert_eq!(Type::from_command_type(CommandType::Void), Some(Type::Void));
    assert_eq!(Type::from_command_type(CommandType::Float), Some(Type::FLOAT));
    assert_eq!(Type::from_command_type(CommandType::Any), None);
}

#[test]
fn float_to_integral_truncates() {
    assert_eq!(
        Type::FLOAT.conversion_loss(&Type::INTEGER),
        Some(ConversionLoss::Truncation)
    );
    assert_eq!(
        builtin(BuiltinType::DoubleFloat).conversion_loss(&Type::FLOAT),
        Some(ConversionLoss::Truncation)
    );
    assert_eq!(
        Type::FLOAT.conversion_loss(&builtin(BuiltinType::DoubleFloat)),
        None
    );
}

#[test]
fn integral_narrowing_and_sign_changes() {
    assert_eq!(
        Type::INTEGER.conversion_loss(&builtin(BuiltinType::Byte)),
        Some(ConversionLoss::Truncation)
    );
    assert_eq!(
        Type::INTEGER.conversion_loss(&Type::DWORD),
        Some(ConversionLoss::SignChange)
    );
    assert_eq!(
        Type::DWORD.conversion_loss(&Type::INTEGER),
        Some(ConversionLoss::SignChange)
    );
    assert_eq!(
        builtin(BuiltinType::Byte).conversion_loss(&Type::INTEGER),
        None
    );
    assert_eq!(Type::INTEGER.conversion_loss(&Type::FLOAT), None);
}

#[test]
fn conversions_to_boolean_never_warn() {
    assert_eq!(Type::FLOAT.conversion_loss(&Type::BOOLEAN), None);
    assert_eq!(
        builtin(BuiltinType::DoubleInteger).conversion_loss(&Type::BOOLEAN),
        None
    );
}

#[test]
fn display_resolves_udt_names() {
    let mut interner = StringInterner::new();
    let point = Type::Udt(interner.intern("Point"));
    assert_eq!(point.display(&interner).to_string(), "Point");
    assert_eq!(
        Type::array_of(Type::FLOAT).display(&interner).to_string(),
        "Float()"
    );
    assert_eq!(Type::Void.display(&interner).to_string(), "void");
}
