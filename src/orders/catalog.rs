// Catalog allow-list for orderable items

/// The fixed set of purchasable threat-intel subscription tiers. Orders for
/// anything else are rejected at creation.
pub const CATALOG_ITEMS: [&str; 3] = ["intel-basic", "intel-premium", "intel-enterprise"];

/// True iff `item_id` is a member of the catalog allow-list.
pub fn is_valid_item(item_id: &str) -> bool {
    CATALOG_ITEMS.contains(&item_id)
}
