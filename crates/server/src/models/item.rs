//! Item domain model and restock ranking.

use chrono::{DateTime, Utc};
use serde::Serialize;

use pantry_core::{ItemId, Name, Price, StockLevels, StockRatio, StoreId, rank_by_scarcity};

/// An inventory item tracked at one store.
#[derive(Debug, Clone, Serialize)]
pub struct Item {
    pub id: ItemId,
    pub store_id: StoreId,
    pub name: Name,
    pub description: String,
    pub price: Price,
    pub unit: String,
    pub stock: StockLevels,
    pub average_usage: f64,
    pub created_at: DateTime<Utc>,
}

impl Item {
    /// Ratio of current to minimum stock.
    #[must_use]
    pub fn ratio(&self) -> StockRatio {
        self.stock.ratio()
    }

    /// Order items by ascending stock ratio, most urgent first.
    ///
    /// Expects `items` in name order; equal ratios keep that order.
    #[must_use]
    pub fn rank(mut items: Vec<Self>) -> Vec<Self> {
        rank_by_scarcity(&mut items, |item| item.stock);
        items
    }
}

/// Validated input for creating an item.
#[derive(Debug, Clone)]
pub struct NewItem {
    pub name: Name,
    pub description: String,
    pub price: Price,
    pub unit: String,
    pub stock: StockLevels,
    pub average_usage: f64,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn item(id: i64, name: &str, current: i64, minimum: i64) -> Item {
        Item {
            id: ItemId::new(id),
            store_id: StoreId::new(1),
            name: Name::parse(name).unwrap(),
            description: String::new(),
            price: Price::ZERO,
            unit: String::new(),
            stock: StockLevels::new(current, minimum.max(current), minimum).unwrap(),
            average_usage: 0.0,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_rank_orders_by_ratio() {
        let ranked = Item::rank(vec![
            item(1, "eggs", 8, 10),
            item(2, "milk", 2, 10),
            item(3, "salt", 4, 0),
        ]);
        let names: Vec<_> = ranked.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["milk", "eggs", "salt"]);
    }

    #[test]
    fn test_rank_ties_keep_name_order() {
        let ranked = Item::rank(vec![item(7, "apples", 1, 2), item(3, "bread", 3, 6)]);
        let ids: Vec<_> = ranked.iter().map(|i| i.id.as_i64()).collect();
        assert_eq!(ids, vec![7, 3]);
    }
}
