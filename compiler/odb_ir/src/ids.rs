//! Index newtypes into the [`Ast`](crate::Ast) arena and its symbol table.
//!
//! All ids are `u32` indices. They are only meaningful for the `Ast` that
//! produced them; mixing ids across trees is a logic error that shows up as
//! an out-of-bounds panic or a wrong node.

use std::fmt;

macro_rules! arena_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
        #[repr(transparent)]
        pub struct $name(u32);

        impl $name {
            #[inline]
            pub const fn new(index: u32) -> Self {
                Self(index)
            }

            /// Position in the owning storage.
            #[inline]
            pub const fn index(self) -> usize {
                self.0 as usize
            }

            #[inline]
            pub const fn raw(self) -> u32 {
                self.0
            }

            /// Allocate the id for the next element of `storage`.
            ///
            /// # Panics
            /// Panics once more than `u32::MAX` elements exist.
            pub(crate) fn next<T>(storage: &[T]) -> Self {
                let Ok(raw) = u32::try_from(storage.len()) else {
                    panic!(concat!(stringify!($name), " space exhausted"));
                };
                Self(raw)
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!(stringify!($name), "({})"), self.0)
            }
        }
    };
}

arena_id! {
    /// A node in the AST arena.
    NodeId
}

arena_id! {
    /// A resolved variable in the [`SymbolTable`](crate::SymbolTable).
    VariableId
}

arena_id! {
    /// A variable scope in the [`SymbolTable`](crate::SymbolTable).
    ScopeId
}

#[cfg(target_pointer_width = "64")]
mod size_asserts {
    use super::{NodeId, ScopeId, VariableId};
    crate::static_assert_size!(NodeId, 4);
    crate::static_assert_size!(Option<NodeId>, 8);
    crate::static_assert_size!(VariableId, 4);
    crate::static_assert_size!(ScopeId, 4);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_names_the_id_kind() {
        assert_eq!(format!("{:?}", NodeId::new(3)), "NodeId(3)");
        assert_eq!(format!("{:?}", VariableId::new(0)), "VariableId(0)");
    }

    #[test]
    fn next_tracks_storage_length() {
        let storage = [(), (), ()];
        assert_eq!(ScopeId::next(&storage), ScopeId::new(3));
        assert_eq!(ScopeId::next(&storage).index(), 3);
    }
}
