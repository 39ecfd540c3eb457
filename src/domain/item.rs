use bigdecimal::BigDecimal;
use uuid::Uuid;

use super::errors::DomainError;

/// Subtype-specific attributes of an item. Stored single-table, keyed by
/// [`ItemKind::dtype`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemKind {
    Book {
        author: Option<String>,
        isbn: Option<String>,
    },
    Album {
        artist: Option<String>,
        etc: Option<String>,
    },
    Movie {
        director: Option<String>,
        actor: Option<String>,
    },
}

impl ItemKind {
    pub fn dtype(&self) -> &'static str {
        match self {
            ItemKind::Book { .. } => "B",
            ItemKind::Album { .. } => "A",
            ItemKind::Movie { .. } => "M",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Item {
    pub id: Uuid,
    pub name: String,
    pub price: BigDecimal,
    pub stock_quantity: i32,
    pub kind: ItemKind,
}

impl Item {
    pub fn add_stock(&mut self, quantity: i32) {
        self.stock_quantity += quantity;
    }

    /// Fails without touching the stock when fewer than `quantity` units remain.
    pub fn remove_stock(&mut self, quantity: i32) -> Result<(), DomainError> {
        let rest = self.stock_quantity - quantity;
        if rest < 0 {
            return Err(DomainError::NotEnoughStock {
                requested: quantity,
                available: self.stock_quantity,
            });
        }
        self.stock_quantity = rest;
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct NewItem {
    pub name: String,
    pub price: BigDecimal,
    pub stock_quantity: i32,
    pub kind: ItemKind,
}

#[derive(Debug, Clone)]
pub struct ItemUpdate {
    pub name: String,
    pub price: BigDecimal,
    pub stock_quantity: i32,
}

fn validate_fields(name: &str, price: &BigDecimal, stock_quantity: i32) -> Result<(), DomainError> {
    if name.trim().is_empty() {
        return Err(DomainError::InvalidInput("item name must not be blank".to_string()));
    }
    if price < &BigDecimal::from(0) {
        return Err(DomainError::InvalidInput(format!(
            "price must not be negative, got {}",
            price
        )));
    }
    if stock_quantity < 0 {
        return Err(DomainError::InvalidInput(format!(
            "stock quantity must not be negative, got {}",
            stock_quantity
        )));
    }
    Ok(())
}

impl NewItem {
    pub fn validate(&self) -> Result<(), DomainError> {
        validate_fields(&self.name, &self.price, self.stock_quantity)
    }
}

impl ItemUpdate {
    pub fn validate(&self) -> Result<(), DomainError> {
        validate_fields(&self.name, &self.price, self.stock_quantity)
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    fn book(stock: i32) -> Item {
        Item {
            id: Uuid::new_v4(),
            name: "JPA".to_string(),
            price: BigDecimal::from_str("10000").expect("valid decimal"),
            stock_quantity: stock,
            kind: ItemKind::Book {
                author: Some("kim".to_string()),
                isbn: None,
            },
        }
    }

    #[test]
    fn remove_stock_decrements() {
        let mut item = book(10);
        item.remove_stock(3).expect("enough stock");
        assert_eq!(item.stock_quantity, 7);
    }

    #[test]
    fn remove_stock_to_zero_is_allowed() {
        let mut item = book(2);
        item.remove_stock(2).expect("exact stock");
        assert_eq!(item.stock_quantity, 0);
    }

    #[test]
    fn remove_stock_beyond_available_fails_and_keeps_stock() {
        let mut item = book(2);
        let err = item.remove_stock(3).unwrap_err();
        assert!(matches!(
            err,
            DomainError::NotEnoughStock {
                requested: 3,
                available: 2
            }
        ));
        assert_eq!(item.stock_quantity, 2);
    }

    #[test]
    fn add_stock_increments() {
        let mut item = book(1);
        item.add_stock(4);
        assert_eq!(item.stock_quantity, 5);
    }

    #[test]
    fn dtype_discriminators() {
        assert_eq!(book(0).kind.dtype(), "B");
        let album = ItemKind::Album {
            artist: None,
            etc: None,
        };
        assert_eq!(album.dtype(), "A");
        let movie = ItemKind::Movie {
            director: None,
            actor: None,
        };
        assert_eq!(movie.dtype(), "M");
    }

    #[test]
    fn negative_price_is_rejected() {
        let item = NewItem {
            name: "x".to_string(),
            price: BigDecimal::from(-1),
            stock_quantity: 1,
            kind: book(0).kind,
        };
        assert!(matches!(item.validate(), Err(DomainError::InvalidInput(_))));
    }
}
