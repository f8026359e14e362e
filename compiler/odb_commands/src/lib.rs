//! Command index for the ODB front-end.
//!
//! Commands are the builtin library operations of the dialect (`print`,
//! `sin`, `make object cube`, ...). A single command name may carry several
//! type-overloaded signatures. The semantic pass never loads commands itself;
//! it queries a [`CommandIndex`] collaborator for the ordered list of
//! overloads registered under a name and performs overload resolution on
//! them.
//!
//! [`CommandDb`] is the in-memory implementation used by the driver once the
//! plugin loader has produced its command list, and by tests.

mod command;
mod command_type;
mod index;

pub use command::{Command, CommandParam};
pub use command_type::{CommandType, CommandTypeError};
pub use index::{CommandConflict, CommandDb, CommandIndex};
