//! Transient add-product form state.

use crate::record::SIZE_RUN;

/// One pending product submission: shared fields plus a candidate quantity
/// string per size in the run, exactly as typed. Never persisted; a draft
/// expands into 0..N size rows and is cleared after a successful submit.
#[derive(Debug, Clone, Default)]
pub struct ProductDraft {
    pub base_id: String,
    pub name: String,
    pub color: String,
    pub price: String,
    pub brand: String,
    pub category: String,
    pub remarks: String,
    /// (size, quantity-as-typed) for every size in [`SIZE_RUN`], in order.
    pub quantities: Vec<(u16, String)>,
}

impl ProductDraft {
    /// Create an empty draft with one quantity slot per size in the run.
    pub fn new() -> Self {
        Self {
            quantities: SIZE_RUN.iter().map(|&size| (size, String::new())).collect(),
            ..Default::default()
        }
    }

    /// Mutable access to the quantity string for one size.
    pub fn quantity_mut(&mut self, size: u16) -> Option<&mut String> {
        self.quantities
            .iter_mut()
            .find(|(s, _)| *s == size)
            .map(|(_, q)| q)
    }

    /// Reset every field, keeping the size slots.
    pub fn clear(&mut self) {
        *self = Self::new();
    }
}
