//! Tuples, compared member by member as `0`, `1`, ...

use crate::descriptor::TypeDescriptor;
use crate::inspect::Inspect;

// Tuples are composites whose members are named by position.
macro_rules! tuple {
    ($($name:ident $idx:tt),+) => {
        impl<$($name: Inspect),+> Inspect for ($($name,)+) {
            fn describe() -> TypeDescriptor {
                TypeDescriptor::composite::<Self>()
                    $(.property(stringify!($idx), |t: &Self| &t.$idx))+
                    .finish()
            }
        }
    };
}

tuple!(A 0);
tuple!(A 0, B 1);
tuple!(A 0, B 1, C 2);
tuple!(A 0, B 1, C 2, D 3);
