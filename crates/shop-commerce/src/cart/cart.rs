//! Cart and cart line types.

use crate::cart::{CartPricing, PricingRules};
use crate::catalog::Item;
use crate::ids::ItemId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// One item in the cart with its selected quantity.
///
/// Invariant: `1 <= quantity <= item.stock`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartLine {
    /// Item as it was when first added.
    pub item: Item,
    /// Selected quantity.
    pub quantity: u32,
}

impl CartLine {
    /// Price of this line (unit price times quantity).
    pub fn line_total(&self) -> Money {
        self.item.price.times(self.quantity)
    }
}

/// Deep copy of the cart's lines, used for checkout and persistence.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CartSnapshot {
    pub lines: Vec<CartLine>,
}

impl CartSnapshot {
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of `price * quantity` over the snapshot.
    pub fn total(&self) -> Money {
        self.lines.iter().map(CartLine::line_total).sum()
    }
}

/// A shopping cart keyed by item id, kept in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a cart from a persisted snapshot.
    ///
    /// Duplicate ids are merged, lines that cannot be bought are dropped,
    /// and quantities are clamped to stock.
    pub fn restore(snapshot: CartSnapshot) -> Self {
        let mut cart = Self::new();
        for line in snapshot.lines {
            let stock = line.item.stock;
            if stock == 0 || line.quantity == 0 {
                tracing::debug!(item_id = %line.item.id, "dropping unbuyable line on restore");
                continue;
            }
            match cart.position(&line.item.id) {
                Some(index) => {
                    let existing = &mut cart.lines[index];
                    existing.quantity = existing
                        .quantity
                        .saturating_add(line.quantity)
                        .min(existing.item.stock);
                }
                None => cart.lines.push(CartLine {
                    quantity: line.quantity.min(stock),
                    item: line.item,
                }),
            }
        }
        cart
    }

    /// Add one unit of `item`.
    ///
    /// Out-of-stock items and increments past `item.stock` are ignored. The
    /// cap comes from the item being added, so a fresher catalog copy with
    /// lower stock wins over the snapshot stored in the line. Returns whether
    /// the cart changed.
    pub fn add(&mut self, item: &Item) -> bool {
        if !item.in_stock() {
            tracing::debug!(item_id = %item.id, "ignoring add of out-of-stock item");
            return false;
        }

        match self.position(&item.id) {
            Some(index) => {
                let line = &mut self.lines[index];
                if line.quantity >= item.stock {
                    tracing::debug!(
                        item_id = %item.id,
                        quantity = line.quantity,
                        stock = item.stock,
                        "ignoring add past available stock"
                    );
                    return false;
                }
                line.quantity += 1;
                true
            }
            None => {
                self.lines.push(CartLine {
                    item: item.clone(),
                    quantity: 1,
                });
                true
            }
        }
    }

    /// Adjust a line's quantity by `delta`.
    ///
    /// The result is clamped to `[1, stock]`; a result of zero or less
    /// removes the line. Unknown ids are ignored. Returns whether the cart
    /// changed.
    pub fn set_quantity(&mut self, id: &ItemId, delta: i64) -> bool {
        let Some(index) = self.position(id) else {
            return false;
        };

        let target = i64::from(self.lines[index].quantity).saturating_add(delta);
        if target <= 0 {
            self.lines.remove(index);
            tracing::debug!(item_id = %id, "quantity reached zero, line removed");
            return true;
        }

        let line = &mut self.lines[index];
        let stock = line.item.stock;
        let clamped = match u32::try_from(target) {
            Ok(wanted) if wanted <= stock => wanted,
            _ => {
                tracing::debug!(item_id = %id, requested = target, stock, "quantity clamped to stock");
                stock
            }
        };
        let changed = clamped != line.quantity;
        line.quantity = clamped;
        changed
    }

    /// Delete a line. Absent ids are a no-op.
    pub fn remove(&mut self, id: &ItemId) -> bool {
        let before = self.lines.len();
        self.lines.retain(|line| &line.item.id != id);
        self.lines.len() < before
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Sum of `price * quantity`, read from the stored snapshots.
    pub fn total(&self) -> Money {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Sum of quantities.
    pub fn count(&self) -> u32 {
        self.lines
            .iter()
            .fold(0u32, |acc, line| acc.saturating_add(line.quantity))
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Get the line for an item.
    pub fn get(&self, id: &ItemId) -> Option<&CartLine> {
        self.lines.iter().find(|line| &line.item.id == id)
    }

    pub fn contains(&self, id: &ItemId) -> bool {
        self.get(id).is_some()
    }

    /// Deep copy of the current lines.
    pub fn snapshot(&self) -> CartSnapshot {
        CartSnapshot {
            lines: self.lines.clone(),
        }
    }

    /// Order summary breakdown under `rules`.
    pub fn pricing(&self, rules: &PricingRules) -> CartPricing {
        rules.price(self.total())
    }

    fn position(&self, id: &ItemId) -> Option<usize> {
        self.lines.iter().position(|line| &line.item.id == id)
    }
}
