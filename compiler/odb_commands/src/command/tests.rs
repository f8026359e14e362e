use pretty_assertions::assert_eq;

use super::*;

#[test]
fn parses_signature_string() {
    let cmd = Command::from_signature("sin", "F(F)").unwrap();
    assert_eq!(cmd.symbol(), "sin");
    assert_eq!(cmd.return_type(), CommandType::Float);
    assert_eq!(cmd.params(), &[CommandParam::new(CommandType::Float)]);
}

#[test]
fn parses_out_parameters() {
    let cmd = Command::from_signature("get pos", "0(L*F*F)").unwrap();
    assert_eq!(
        cmd.params(),
        &[
            CommandParam::new(CommandType::Integer),
            CommandParam::out(CommandType::Float),
            CommandParam::out(CommandType::Float),
        ]
    );
    assert_eq!(cmd.signature(), "0(L*F*F)");
}

#[test]
fn parses_empty_parameter_list() {
    let cmd = Command::from_signature("sync", "0()").unwrap();
    assert!(cmd.params().is_empty());
    assert!(cmd.return_type().is_void());
}

#[test]
fn rejects_malformed_signatures() {
    for bad in ["", "F", "FL)", "F(L", "F(L)x", "F(*)"] {
        assert!(
            Command::from_signature("x", bad).is_err(),
            "{bad:?} should not parse"
        );
    }
    assert_eq!(
        Command::from_signature("x", "F(Q)").unwrap_err(),
        CommandTypeError::UnknownCode('Q')
    );
}

#[test]
fn builder_matches_signature() {
    let built = Command::new("print", CommandType::Void)
        .with_param(CommandType::String)
        .with_out_param(CommandType::Integer);
    let parsed = Command::from_signature("print", "0(S*L)").unwrap();
    assert_eq!(built, parsed);
    assert!(built.same_signature(&parsed));
}

#[test]
fn display_lists_parameter_types() {
    let cmd = Command::from_signature("position object", "0(LFFF)").unwrap();
    assert_eq!(
        cmd.to_string(),
        "position object Integer, Float, Float, Float"
    );
    let bare = Command::from_signature("sync", "0()").unwrap();
    assert_eq!(bare.to_string(), "sync");
}
