use std::fmt::{Debug, Display};

/// A totally ordered scalar that can be stored in an [`AvlTree`](crate::AvlTree).
///
/// Only keys for which [`is_positive`](Key::is_positive) holds are accepted by
/// [`AvlTree::insert`](crate::AvlTree::insert).
pub trait Key: Ord + Copy + Debug + Display {
    fn is_positive(&self) -> bool;
}

macro_rules! impl_key_signed {
    ($($t:ty),*) => {
        $(
            impl Key for $t {
                #[inline]
                fn is_positive(&self) -> bool {
                    *self > 0
                }
            }
        )*
    };
}

macro_rules! impl_key_unsigned {
    ($($t:ty),*) => {
        $(
            impl Key for $t {
                #[inline]
                fn is_positive(&self) -> bool {
                    *self != 0
                }
            }
        )*
    };
}

impl_key_signed!(i8, i16, i32, i64, i128, isize);
impl_key_unsigned!(u8, u16, u32, u64, u128, usize);
