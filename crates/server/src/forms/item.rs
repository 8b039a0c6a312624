//! Item creation and stock update forms.

use serde::Deserialize;

use pantry_core::{Name, Price, StockField, StockLevels, normalize};

use super::{FieldErrors, REQUIRED};
use crate::models::NewItem;

/// Maximum description length, in characters.
pub const MAX_DESCRIPTION_LENGTH: usize = 500;

/// Maximum unit length, in characters.
pub const MAX_UNIT_LENGTH: usize = 30;

/// Item creation form data.
#[derive(Debug, Default, Deserialize)]
pub struct ItemCreateForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub current_stock: String,
    #[serde(default)]
    pub ideal_stock: String,
    #[serde(default)]
    pub minimum_stock: String,
    #[serde(default)]
    pub average_usage: String,
}

impl ItemCreateForm {
    /// Validate every field, including `minimum_stock <= ideal_stock`.
    ///
    /// # Errors
    ///
    /// Returns every field error found.
    pub fn validate(&self) -> Result<NewItem, FieldErrors> {
        let mut errors = FieldErrors::new();

        let name = Name::parse(&self.name)
            .map_err(|e| errors.push_name("name", &e))
            .ok();

        let description = self.description.trim().to_owned();
        if description.chars().count() > MAX_DESCRIPTION_LENGTH {
            errors.push(
                "description",
                format!("Must be at most {MAX_DESCRIPTION_LENGTH} characters."),
            );
        }

        let price = Price::parse(&self.price)
            .map_err(|e| errors.push("price", e.to_string()))
            .ok();

        let unit = normalize(&self.unit);
        if unit.chars().count() > MAX_UNIT_LENGTH {
            errors.push("unit", format!("Must be at most {MAX_UNIT_LENGTH} characters."));
        }

        let current = parse_quantity(&self.current_stock, StockField::Current, &mut errors);
        let ideal = parse_quantity(&self.ideal_stock, StockField::Ideal, &mut errors);
        let minimum = parse_quantity(&self.minimum_stock, StockField::Minimum, &mut errors);

        let stock = match (current, ideal, minimum) {
            (Some(current), Some(ideal), Some(minimum)) => {
                match StockLevels::new(current, ideal, minimum) {
                    Ok(stock) => Some(stock),
                    Err(stock_errors) => {
                        for err in stock_errors {
                            errors.push(err.field().as_str(), err.to_string());
                        }
                        None
                    }
                }
            }
            _ => None,
        };

        let average_usage = parse_usage(&self.average_usage, &mut errors);

        match (name, price, stock, average_usage) {
            (Some(name), Some(price), Some(stock), Some(average_usage)) if errors.is_empty() => {
                Ok(NewItem {
                    name,
                    description,
                    price,
                    unit,
                    stock,
                    average_usage,
                })
            }
            _ => Err(errors),
        }
    }
}

/// Current stock update form data.
#[derive(Debug, Default, Deserialize)]
pub struct StockUpdateForm {
    #[serde(default)]
    pub current_stock: String,
}

impl StockUpdateForm {
    /// Parse the new current stock.
    ///
    /// # Errors
    ///
    /// Returns a field error unless the input is a whole number of zero or more.
    pub fn validate(&self) -> Result<i64, FieldErrors> {
        let mut errors = FieldErrors::new();
        parse_quantity(&self.current_stock, StockField::Current, &mut errors).ok_or(errors)
    }
}

/// Parse a whole-number quantity of zero or more.
fn parse_quantity(value: &str, field: StockField, errors: &mut FieldErrors) -> Option<i64> {
    let value = value.trim();
    if value.is_empty() {
        errors.push(field.as_str(), REQUIRED);
        return None;
    }
    match value.parse::<i64>() {
        Ok(quantity) if quantity >= 0 => Some(quantity),
        Ok(_) => {
            errors.push(field.as_str(), "Must be zero or more.");
            None
        }
        Err(_) => {
            errors.push(field.as_str(), "Enter a whole number.");
            None
        }
    }
}

/// Parse average usage; blank means zero.
fn parse_usage(value: &str, errors: &mut FieldErrors) -> Option<f64> {
    let value = value.trim();
    if value.is_empty() {
        return Some(0.0);
    }
    match value.parse::<f64>() {
        Ok(usage) if usage.is_finite() && usage >= 0.0 => Some(usage),
        Ok(_) => {
            errors.push("average_usage", "Must be zero or more.");
            None
        }
        Err(_) => {
            errors.push("average_usage", "Enter a number.");
            None
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn form(current: &str, ideal: &str, minimum: &str) -> ItemCreateForm {
        ItemCreateForm {
            name: " Milk ".to_string(),
            description: "  Whole milk  ".to_string(),
            price: "3.99".to_string(),
            unit: " Carton ".to_string(),
            current_stock: current.to_string(),
            ideal_stock: ideal.to_string(),
            minimum_stock: minimum.to_string(),
            average_usage: "1.5".to_string(),
        }
    }

    #[test]
    fn test_valid_item_is_normalized() {
        let item = form("2", "12", "4").validate().unwrap();
        assert_eq!(item.name.as_str(), "milk");
        assert_eq!(item.description, "Whole milk");
        assert_eq!(item.unit, "carton");
        assert_eq!(item.price.to_cents(), Some(399));
        assert_eq!(item.stock, StockLevels::new(2, 12, 4).unwrap());
        assert!((item.average_usage - 1.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_minimum_above_ideal_is_rejected() {
        let errors = form("5", "3", "4").validate().unwrap_err();
        assert_eq!(
            errors.get("minimum_stock"),
            Some("Minimum stock cannot exceed ideal stock.")
        );
    }

    #[test]
    fn test_negative_and_malformed_numbers() {
        let mut f = form("-1", "ten", "");
        f.price = "-2".to_string();
        f.average_usage = "-0.5".to_string();
        let errors = f.validate().unwrap_err();
        assert_eq!(errors.get("current_stock"), Some("Must be zero or more."));
        assert_eq!(errors.get("ideal_stock"), Some("Enter a whole number."));
        assert_eq!(errors.get("minimum_stock"), Some(REQUIRED));
        assert_eq!(errors.get("price"), Some("Price cannot be negative."));
        assert_eq!(errors.get("average_usage"), Some("Must be zero or more."));
    }

    #[test]
    fn test_blank_average_usage_defaults_to_zero() {
        let mut f = form("1", "1", "0");
        f.average_usage = String::new();
        assert!(f.validate().unwrap().average_usage.abs() < f64::EPSILON);
    }

    #[test]
    fn test_stock_update() {
        let update = |v: &str| {
            StockUpdateForm {
                current_stock: v.to_string(),
            }
            .validate()
        };
        assert_eq!(update(" 9 ").unwrap(), 9);
        assert!(update("-1").is_err());
        assert!(update("lots").is_err());
    }
}
