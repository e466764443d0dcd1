//! Internal implementation details.

pub(crate) mod circular;
pub(crate) mod slots;

pub(crate) use slots::SingletonSlots;
