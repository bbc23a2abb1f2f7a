//! Application screens and inventory input states

use stockroom_core::AdjustmentKind;

/// Which screen the app is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Username/password gate.
    Login,
    /// The inventory table with search and adjustments.
    Inventory,
    /// The add-product form with the per-size grid.
    AddProduct,
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Screen::Login => write!(f, "LOGIN"),
            Screen::Inventory => write!(f, "INVENTORY"),
            Screen::AddProduct => write!(f, "ADD PRODUCT"),
        }
    }
}

/// Where keystrokes go while on the inventory screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InventoryInput {
    /// Navigating the table.
    Browse,
    /// Editing the search query (entered with `/`).
    Search,
    /// Entering an amount for an adjustment prompt.
    Adjust(AdjustmentKind),
}
