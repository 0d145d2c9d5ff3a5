//! Spur-based ID types for type-safe interned identifiers.
//!
//! Each ID type wraps a `lasso::Spur` to prevent cross-type confusion.
//! A `TypeId` cannot be accidentally used where a `CallableId` is expected.

use lasso::Spur;
use serde::{Deserialize, Serialize};

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(pub Spur);

        impl $name {
            /// Create a new ID from a `Spur`.
            pub fn new(spur: Spur) -> Self {
                Self(spur)
            }

            /// Get the inner `Spur`.
            pub fn inner(self) -> Spur {
                self.0
            }
        }

        impl From<Spur> for $name {
            fn from(spur: Spur) -> Self {
                Self(spur)
            }
        }

        impl From<$name> for Spur {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id!(
    /// Interned class, interface, or builtin type name.
    TypeId
);

define_id!(
    /// Interned function, method, or closure identity.
    CallableId
);
