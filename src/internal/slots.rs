//! Singleton slot storage.

use crate::error::FactoryResult;
use crate::key::Variant;
use crate::registration::AnyArc;

#[cfg(feature = "once-cell")]
use once_cell::sync::OnceCell;

/// Cached singleton together with the variant that produced it
pub(crate) type SlotValue = (Variant, AnyArc);

/// Write-once cell for one singleton.
///
/// Initialization runs under mutual exclusion: concurrent first-time callers
/// block until the winner has stored its instance, then all observe it.
pub(crate) struct SingletonSlot {
    #[cfg(feature = "once-cell")]
    cell: OnceCell<SlotValue>,
    #[cfg(not(feature = "once-cell"))]
    cell: std::sync::Mutex<Option<SlotValue>>,
}

impl SingletonSlot {
    fn new() -> Self {
        Self {
            #[cfg(feature = "once-cell")]
            cell: OnceCell::new(),
            #[cfg(not(feature = "once-cell"))]
            cell: std::sync::Mutex::new(None),
        }
    }

    /// Returns the cached value, or runs `init` and stores its result.
    ///
    /// The flag is `true` when this call constructed the value. A failing
    /// `init` leaves the slot empty.
    pub(crate) fn get_or_try_init<F>(&self, init: F) -> FactoryResult<(SlotValue, bool)>
    where
        F: FnOnce() -> FactoryResult<SlotValue>,
    {
        #[cfg(feature = "once-cell")]
        {
            if let Some(value) = self.cell.get() {
                return Ok((value.clone(), false));
            }

            let mut created = false;
            let value = self.cell.get_or_try_init(|| {
                created = true;
                init()
            })?;
            Ok((value.clone(), created))
        }

        #[cfg(not(feature = "once-cell"))]
        {
            // Slot contents are write-once, so a poisoned lock is still consistent
            let mut guard = self.cell.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
            if let Some(value) = guard.as_ref() {
                return Ok((value.clone(), false));
            }

            let value = init()?;
            *guard = Some(value.clone());
            Ok((value, true))
        }
    }

    /// Returns the cached value without initializing.
    pub(crate) fn get(&self) -> Option<SlotValue> {
        #[cfg(feature = "once-cell")]
        {
            self.cell.get().cloned()
        }

        #[cfg(not(feature = "once-cell"))]
        {
            self.cell.lock().unwrap_or_else(std::sync::PoisonError::into_inner).clone()
        }
    }
}

/// Fixed array of slots, sized when the registry is built
pub(crate) struct SingletonSlots {
    slots: Box<[SingletonSlot]>,
}

impl SingletonSlots {
    pub(crate) fn new(count: usize) -> Self {
        Self {
            slots: (0..count).map(|_| SingletonSlot::new()).collect::<Vec<_>>().into_boxed_slice(),
        }
    }

    #[inline(always)]
    pub(crate) fn get(&self, index: usize) -> Option<&SingletonSlot> {
        self.slots.get(index)
    }

    /// Number of slots holding an instance.
    pub(crate) fn filled(&self) -> usize {
        self.slots.iter().filter(|slot| slot.get().is_some()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use crate::error::FactoryError;

    const V: Variant = Variant::new("V");

    #[test]
    fn first_init_wins() {
        let slots = SingletonSlots::new(1);
        let slot = slots.get(0).unwrap();

        let ((_, first), created) = slot.get_or_try_init(|| Ok((V, Arc::new(1u8) as AnyArc))).unwrap();
        assert!(created);
        let ((_, second), created) = slot.get_or_try_init(|| Ok((V, Arc::new(2u8) as AnyArc))).unwrap();
        assert!(!created);

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(slots.filled(), 1);
    }

    #[test]
    fn failed_init_leaves_slot_empty() {
        let slots = SingletonSlots::new(1);
        let slot = slots.get(0).unwrap();

        let result = slot.get_or_try_init(|| Err(FactoryError::TypeMismatch("u8")));
        assert!(result.is_err());
        assert!(slot.get().is_none());

        let calls = AtomicUsize::new(0);
        let ok = slot.get_or_try_init(|| {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok((V, Arc::new(3u8) as AnyArc))
        });
        assert!(ok.is_ok());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn out_of_range_index() {
        let slots = SingletonSlots::new(2);
        assert!(slots.get(1).is_some());
        assert!(slots.get(2).is_none());
        assert_eq!(slots.filled(), 0);
    }
}
