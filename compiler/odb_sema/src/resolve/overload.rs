//! Command overload selection.

use std::sync::Arc;

use odb_commands::{Command, CommandParam};
use odb_ir::Type;

/// Whether the call site uses the command's return value.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub(super) enum CallStyle {
    Expression,
    Statement,
}

#[derive(Clone, Debug)]
pub(super) enum OverloadError {
    NoMatch,
    /// The only candidate takes a different number of arguments.
    ArgCount(Arc<Command>),
}

/// Pick the overload of a command that best fits `args`.
///
/// `args` holds each argument's type, `None` where it is unknown. Unknown
/// arguments and wildcard slots accept anything.
pub(super) fn select_overload(
    overloads: &[Arc<Command>],
    args: &[Option<Type>],
    style: CallStyle,
) -> Result<Arc<Command>, OverloadError> {
    let chosen = match overloads {
        [] => return Err(OverloadError::NoMatch),
        [only] => Arc::clone(only),
        _ => best_candidate(overloads, args, style).ok_or(OverloadError::NoMatch)?,
    };
    if chosen.params().len() != args.len() {
        return Err(OverloadError::ArgCount(chosen));
    }
    Ok(chosen)
}

fn best_candidate(
    overloads: &[Arc<Command>],
    args: &[Option<Type>],
    style: CallStyle,
) -> Option<Arc<Command>> {
    overloads
        .iter()
        .filter(|cmd| match style {
            CallStyle::Expression => !cmd.return_type().is_void(),
            CallStyle::Statement => cmd.return_type().is_void(),
        })
        .filter(|cmd| cmd.params().len() == args.len())
        .filter(|cmd| {
            cmd.params()
                .iter()
                .zip(args)
                .all(|(param, arg)| accepts(*param, arg.as_ref()))
        })
        // `max_by_key` keeps the last of equal maxima: later overloads win ties.
        .max_by_key(|cmd| score(cmd, args))
        .map(Arc::clone)
}

fn accepts(param: CommandParam, arg: Option<&Type>) -> bool {
    if param.ty.is_wildcard() {
        return true;
    }
    let (Some(arg), Some(expected)) = (arg, Type::from_command_type(param.ty)) else {
        return true;
    };
    if param.is_out {
        *arg == expected
    } else {
        arg.is_convertible_to(&expected)
    }
}

fn score(cmd: &Command, args: &[Option<Type>]) -> u32 {
    cmd.params()
        .iter()
        .zip(args)
        .map(|(param, arg)| {
            let (Some(arg), Some(expected)) = (arg, Type::from_command_type(param.ty)) else {
                return 0;
            };
            if *arg == expected {
                return 10;
            }
            match (arg.as_builtin(), expected.as_builtin()) {
                (Some(a), Some(e)) if a.archetype().is_some() && a.archetype() == e.archetype() => 1,
                _ => 0,
            }
        })
        .sum()
}
