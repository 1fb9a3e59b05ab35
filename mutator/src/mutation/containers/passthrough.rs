//! Leaf `Mutable` implementations: values that are never descended into.

use std::{
    borrow::Cow,
    cell::Cell,
    cmp::Ordering,
    collections::{BTreeSet, BinaryHeap, HashSet, LinkedList, VecDeque},
    marker::PhantomData,
    net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr, SocketAddrV4, SocketAddrV6},
    num::{
        NonZeroI8, NonZeroI16, NonZeroI32, NonZeroI64, NonZeroI128, NonZeroIsize, NonZeroU8,
        NonZeroU16, NonZeroU32, NonZeroU64, NonZeroU128, NonZeroUsize,
    },
    path::PathBuf,
    time::{Duration, Instant, SystemTime},
};

use super::impl_mutable_leaf;
use crate::mutation::{Mutable, Traversal};

// =============================================================================
// Scalars and strings
// =============================================================================

impl_mutable_leaf!(bool, char, String, str, ());

// Signed integers
impl_mutable_leaf!(i8, i16, i32, i64, i128, isize);

// Unsigned integers
impl_mutable_leaf!(u8, u16, u32, u64, u128, usize);

// Floating point
impl_mutable_leaf!(f32, f64);

impl_mutable_leaf!(&'static str, Cow<'static, str>);

// =============================================================================
// NonZero integers
// =============================================================================

impl_mutable_leaf!(
    NonZeroI8,
    NonZeroI16,
    NonZeroI32,
    NonZeroI64,
    NonZeroI128,
    NonZeroIsize,
    NonZeroU8,
    NonZeroU16,
    NonZeroU32,
    NonZeroU64,
    NonZeroU128,
    NonZeroUsize,
);

// =============================================================================
// Other std leaves
// =============================================================================

impl_mutable_leaf!(Duration, Instant, SystemTime, Ordering, PathBuf);
impl_mutable_leaf!(
    IpAddr,
    Ipv4Addr,
    Ipv6Addr,
    SocketAddr,
    SocketAddrV4,
    SocketAddrV6
);

impl<T> Mutable for PhantomData<T>
where
    T: ?Sized + 'static,
{
    fn mutate_with(&mut self, _traversal: &mut Traversal<'_>) {}
}

impl<T> Mutable for Cell<T>
where
    T: 'static,
{
    fn mutate_with(&mut self, _traversal: &mut Traversal<'_>) {}
}

// =============================================================================
// Sequences and sets
// =============================================================================

macro_rules! impl_mutable_sequence {
    ($($ty:ident),* $(,)?) => {
        $(
            impl<T> Mutable for $ty<T>
            where
                T: 'static,
            {
                fn mutate_with(&mut self, _traversal: &mut Traversal<'_>) {}
            }
        )*
    };
}

impl_mutable_sequence!(Vec, VecDeque, LinkedList, BinaryHeap, BTreeSet);

impl<T, S> Mutable for HashSet<T, S>
where
    T: 'static,
    S: 'static,
{
    fn mutate_with(&mut self, _traversal: &mut Traversal<'_>) {}
}

impl<T> Mutable for [T]
where
    T: 'static,
{
    fn mutate_with(&mut self, _traversal: &mut Traversal<'_>) {}
}

impl<T, const N: usize> Mutable for [T; N]
where
    T: 'static,
{
    fn mutate_with(&mut self, _traversal: &mut Traversal<'_>) {}
}

macro_rules! impl_mutable_tuple {
    ($($name:ident),+) => {
        impl<$($name: 'static),+> Mutable for ($($name,)+) {
            fn mutate_with(&mut self, _traversal: &mut Traversal<'_>) {}
        }
    };
}

impl_mutable_tuple!(A);
impl_mutable_tuple!(A, B);
impl_mutable_tuple!(A, B, C);
impl_mutable_tuple!(A, B, C, D);
impl_mutable_tuple!(A, B, C, D, E);
impl_mutable_tuple!(A, B, C, D, E, F);
