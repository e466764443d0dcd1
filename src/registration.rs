//! Product registration types.

use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;
use crate::config::SlotPolicy;
use crate::key::{CreationRequest, ProductKind, Variant};

// Type-erased Arc for storage
pub(crate) type AnyArc = Arc<dyn Any + Send + Sync>;

/// Zero-argument constructor returning the erased instance and its variant tag
pub(crate) type Ctor = Arc<dyn Fn() -> (AnyArc, Variant) + Send + Sync>;

/// Constructor bound to one (kind, variant) pair
pub(crate) struct Registration {
    pub(crate) ctor: Ctor,
    /// Where the constructor came from (concrete type or creator name)
    pub(crate) source: &'static str,
    /// Singleton slot index, assigned by `Registry::finalize`
    pub(crate) slot: usize,
}

impl Registration {
    pub(crate) fn new(ctor: Ctor, source: &'static str) -> Self {
        Self { ctor, source, slot: 0 }
    }

    /// Builds the erased constructor for capability `T`.
    pub(crate) fn typed<T, F>(factory: F, source: &'static str) -> Self
    where
        T: ?Sized + crate::Product,
        F: Fn() -> Arc<T> + Send + Sync + 'static,
    {
        let ctor = move || -> (AnyArc, Variant) {
            let instance = factory();
            let variant = instance.variant();
            (Arc::new(instance) as AnyArc, variant)
        };
        Self::new(Arc::new(ctor), source)
    }
}

/// Closed table of declared variants, kinds and their constructors
pub(crate) struct Registry {
    pub(crate) entries: HashMap<CreationRequest, Registration>,
    /// Declared variants in declaration order
    pub(crate) variants: Vec<Variant>,
    /// Declared kinds in declaration order
    pub(crate) kinds: Vec<ProductKind>,
    /// Number of singleton slots after finalization
    pub(crate) slot_count: usize,
}

impl Registry {
    pub(crate) fn new() -> Self {
        Self {
            entries: HashMap::new(),
            variants: Vec::new(),
            kinds: Vec::new(),
            slot_count: 0,
        }
    }

    pub(crate) fn declare_variant(&mut self, variant: Variant) {
        if !self.variants.contains(&variant) {
            self.variants.push(variant);
        }
    }

    pub(crate) fn declare_kind(&mut self, kind: ProductKind) {
        if !self.kinds.contains(&kind) {
            self.kinds.push(kind);
        }
    }

    /// Inserts a constructor, replacing any previous one for the same pair
    pub(crate) fn insert(&mut self, request: CreationRequest, registration: Registration) {
        self.declare_kind(request.kind);
        self.declare_variant(request.variant);
        self.entries.insert(request, registration);
    }

    #[inline(always)]
    pub(crate) fn get(&self, request: &CreationRequest) -> Option<&Registration> {
        self.entries.get(request)
    }

    #[inline(always)]
    pub(crate) fn contains_key(&self, request: &CreationRequest) -> bool {
        self.entries.contains_key(request)
    }

    pub(crate) fn has_variant(&self, variant: Variant) -> bool {
        self.variants.contains(&variant)
    }

    pub(crate) fn has_kind(&self, kind: &ProductKind) -> bool {
        self.kinds.contains(kind)
    }

    /// Every declared (kind, variant) pair with no constructor, sorted
    pub(crate) fn missing_entries(&self) -> Vec<CreationRequest> {
        let mut missing: Vec<CreationRequest> = self.variants.iter()
            .flat_map(|variant| {
                self.kinds.iter().map(move |kind| CreationRequest::new(*kind, *variant))
            })
            .filter(|request| !self.entries.contains_key(request))
            .collect();
        missing.sort();
        missing
    }

    /// Iterator over all entries, sorted by kind then variant
    pub(crate) fn sorted_entries(&self) -> Vec<(&CreationRequest, &Registration)> {
        let mut entries: Vec<_> = self.entries.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries
    }

    /// Assigns singleton slot indices according to the slot policy
    pub(crate) fn finalize(&mut self, policy: SlotPolicy) {
        match policy {
            SlotPolicy::PerKind => {
                let kinds = &self.kinds;
                for (request, reg) in self.entries.iter_mut() {
                    // Every entry's kind was declared on insert
                    reg.slot = kinds.iter()
                        .position(|k| *k == request.kind)
                        .unwrap_or(0);
                }
                self.slot_count = self.kinds.len();
            }
            SlotPolicy::PerRequest => {
                let mut requests: Vec<CreationRequest> = self.entries.keys().copied().collect();
                requests.sort();
                for (index, request) in requests.iter().enumerate() {
                    if let Some(reg) = self.entries.get_mut(request) {
                        reg.slot = index;
                    }
                }
                self.slot_count = requests.len();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Product;

    const A: Variant = Variant::new("A");
    const B: Variant = Variant::new("B");

    trait Widget: Product {}
    trait Gadget: Product {}

    struct Tagged(Variant);
    impl Product for Tagged {
        fn variant(&self) -> Variant {
            self.0
        }
    }
    impl Widget for Tagged {}
    impl Gadget for Tagged {}

    fn widget(variant: Variant) -> Registration {
        Registration::typed::<dyn Widget, _>(move || Arc::new(Tagged(variant)), "Tagged")
    }

    fn gadget(variant: Variant) -> Registration {
        Registration::typed::<dyn Gadget, _>(move || Arc::new(Tagged(variant)), "Tagged")
    }

    #[test]
    fn insert_declares_kind_and_variant() {
        let mut registry = Registry::new();
        registry.insert(CreationRequest::of::<dyn Widget>(A), widget(A));

        assert!(registry.has_variant(A));
        assert!(!registry.has_variant(B));
        assert!(registry.has_kind(&ProductKind::of::<dyn Widget>()));
        assert!(!registry.has_kind(&ProductKind::of::<dyn Gadget>()));
    }

    #[test]
    fn missing_entries_reports_holes() {
        let mut registry = Registry::new();
        registry.insert(CreationRequest::of::<dyn Widget>(A), widget(A));
        registry.insert(CreationRequest::of::<dyn Gadget>(A), gadget(A));
        registry.insert(CreationRequest::of::<dyn Widget>(B), widget(B));

        let missing = registry.missing_entries();
        assert_eq!(missing, vec![CreationRequest::of::<dyn Gadget>(B)]);
    }

    #[test]
    fn finalize_per_kind_shares_slots_across_variants() {
        let mut registry = Registry::new();
        registry.insert(CreationRequest::of::<dyn Widget>(A), widget(A));
        registry.insert(CreationRequest::of::<dyn Widget>(B), widget(B));
        registry.insert(CreationRequest::of::<dyn Gadget>(A), gadget(A));
        registry.finalize(SlotPolicy::PerKind);

        assert_eq!(registry.slot_count, 2);
        let wa = registry.get(&CreationRequest::of::<dyn Widget>(A)).unwrap().slot;
        let wb = registry.get(&CreationRequest::of::<dyn Widget>(B)).unwrap().slot;
        let ga = registry.get(&CreationRequest::of::<dyn Gadget>(A)).unwrap().slot;
        assert_eq!(wa, wb);
        assert_ne!(wa, ga);
    }

    #[test]
    fn finalize_per_request_gives_each_pair_a_slot() {
        let mut registry = Registry::new();
        registry.insert(CreationRequest::of::<dyn Widget>(A), widget(A));
        registry.insert(CreationRequest::of::<dyn Widget>(B), widget(B));
        registry.finalize(SlotPolicy::PerRequest);

        assert_eq!(registry.slot_count, 2);
        let wa = registry.get(&CreationRequest::of::<dyn Widget>(A)).unwrap().slot;
        let wb = registry.get(&CreationRequest::of::<dyn Widget>(B)).unwrap().slot;
        assert_ne!(wa, wb);
    }

    #[test]
    fn typed_ctor_reports_instance_variant() {
        let reg = widget(B);
        let (any, variant) = (reg.ctor)();
        assert_eq!(variant, B);
        assert!(any.downcast::<Arc<dyn Widget>>().is_ok());
    }
}
