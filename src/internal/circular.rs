//! Re-entrant singleton initialization detection.
//!
//! A singleton constructor runs while its slot is held. If that constructor
//! resolves a singleton mapped to the same slot on the same thread, it would
//! wait on itself. The slots being filled are tracked per thread so that case
//! becomes an error instead of a hang.

use std::cell::RefCell;

use crate::error::{FactoryError, FactoryResult};
use crate::key::CreationRequest;

// Slots this thread is currently filling, innermost last
thread_local! {
    static FILLING: RefCell<Vec<Frame>> = RefCell::new(Vec::new());
}

struct Frame {
    registry: usize,
    slot: usize,
    request: CreationRequest,
}

/// Fails with `Circular` if this thread is already filling `slot` of `registry`.
///
/// Must run before the slot is locked.
pub(crate) fn check(registry: usize, slot: usize, request: &CreationRequest) -> FactoryResult<()> {
    FILLING.with(|filling| {
        let filling = filling.borrow();
        if filling.is_empty() {
            return Ok(());
        }

        match filling.iter().position(|frame| frame.registry == registry && frame.slot == slot) {
            Some(start) => {
                let mut path: Vec<String> = filling[start..]
                    .iter()
                    .map(|frame| frame.request.to_string())
                    .collect();
                path.push(request.to_string());
                Err(FactoryError::Circular(path))
            }
            None => Ok(()),
        }
    })
}

/// Marks a slot as being filled on this thread until dropped
pub(crate) struct FillGuard {
    slot: usize,
}

impl FillGuard {
    pub(crate) fn new(registry: usize, slot: usize, request: CreationRequest) -> Self {
        FILLING.with(|filling| filling.borrow_mut().push(Frame { registry, slot, request }));
        Self { slot }
    }
}

impl Drop for FillGuard {
    fn drop(&mut self) {
        FILLING.with(|filling| {
            if let Some(last) = filling.borrow_mut().pop() {
                debug_assert_eq!(last.slot, self.slot);
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::Variant;
    use crate::traits::Product;

    trait Widget: Product {}

    const A: Variant = Variant::new("A");
    const B: Variant = Variant::new("B");

    #[test]
    fn nested_fill_of_same_slot_is_circular() {
        let outer = CreationRequest::of::<dyn Widget>(A);
        let inner = CreationRequest::of::<dyn Widget>(B);

        assert!(check(1, 0, &outer).is_ok());
        let _guard = FillGuard::new(1, 0, outer);

        assert_eq!(
            check(1, 0, &inner),
            Err(FactoryError::Circular(vec!["Widget@A".to_string(), "Widget@B".to_string()]))
        );
        // Another slot, or the same index in another registry, is fine
        assert!(check(1, 1, &inner).is_ok());
        assert!(check(2, 0, &inner).is_ok());
    }

    #[test]
    fn guard_releases_on_drop() {
        let request = CreationRequest::of::<dyn Widget>(A);
        {
            let _guard = FillGuard::new(7, 3, request);
            assert!(check(7, 3, &request).is_err());
        }
        assert!(check(7, 3, &request).is_ok());
    }
}
