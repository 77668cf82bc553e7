//! Compact `u32` indices into the token list, the part arena and the host
//! registry.

use std::fmt;

macro_rules! define_index {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
        #[repr(transparent)]
        pub struct $name(u32);

        impl $name {
            #[inline]
            pub const fn new(index: u32) -> Self {
                $name(index)
            }

            /// Index from a `usize` position, `None` past `u32::MAX`.
            #[inline]
            pub fn from_usize(index: usize) -> Option<Self> {
                u32::try_from(index).ok().map($name)
            }

            #[inline]
            pub const fn index(self) -> usize {
                self.0 as usize
            }

            #[inline]
            pub const fn raw(self) -> u32 {
                self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }
    };
}

define_index! {
    /// Position of a token in the token list.
    TokenIdx
}

define_index! {
    /// Index into a [`PartArena`](crate::PartArena).
    PartId
}

define_index! {
    /// Index of a variable in a [`Context`](crate::Context).
    VarId
}

define_index! {
    /// Index of a function in a [`Context`](crate::Context).
    FuncId
}
