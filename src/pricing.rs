//! Pricing applied when the order form is saved.
//!
//! Every line gets the same unit price whatever product it names; the total is
//! the sum of `quantity * price` over the lines. Create and edit price alike.

use thiserror::Error;

use crate::models::ProductLine;

/// Unit price in UZS stamped on every product line at save time.
pub const FIXED_UNIT_PRICE: i64 = 20_000;

pub fn price_lines(lines: Vec<ProductLine>) -> Vec<ProductLine> {
    lines
        .into_iter()
        .map(|line| ProductLine {
            price: FIXED_UNIT_PRICE,
            ..line
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Order total is too large.")]
pub struct TotalOverflow;

/// Sum of `quantity * price`. Fails instead of wrapping when it does not fit in `i64`.
pub fn order_total(lines: &[ProductLine]) -> Result<i64, TotalOverflow> {
    lines.iter().try_fold(0i64, |sum, line| {
        line.quantity
            .checked_mul(line.price)
            .and_then(|amount| sum.checked_add(amount))
            .ok_or(TotalOverflow)
    })
}

/// Description and lines after pricing, ready to be written to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricedOrder {
    pub description: String,
    pub products: Vec<ProductLine>,
    pub total: i64,
}

impl PricedOrder {
    pub fn from_draft(description: String, lines: Vec<ProductLine>) -> Result<Self, TotalOverflow> {
        let products = price_lines(lines);
        let total = order_total(&products)?;
        Ok(Self {
            description,
            products,
            total,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ProductName;

    #[test]
    fn caller_prices_are_overwritten() {
        let lines = vec![
            ProductLine {
                name: ProductName::Anor,
                quantity: 1,
                price: 999,
            },
            ProductLine::new(ProductName::Olma, 3),
        ];
        let priced = PricedOrder::from_draft("mixed".into(), lines).unwrap();
        assert!(priced.products.iter().all(|l| l.price == FIXED_UNIT_PRICE));
        assert_eq!(priced.total, 4 * FIXED_UNIT_PRICE);
    }

    #[test]
    fn empty_order_totals_zero() {
        let priced = PricedOrder::from_draft(String::new(), vec![]).unwrap();
        assert_eq!(priced.total, 0);
        assert!(priced.products.is_empty());
    }

    #[test]
    fn quantities_below_one_are_priced_as_given() {
        let priced = PricedOrder::from_draft(
            String::new(),
            vec![
                ProductLine::new(ProductName::Olma, 0),
                ProductLine::new(ProductName::Anor, -1),
                ProductLine::new(ProductName::Unselected, 2),
            ],
        )
        .unwrap();
        assert_eq!(priced.total, FIXED_UNIT_PRICE);
    }

    #[test]
    fn oversized_quantities_are_rejected_not_clamped() {
        let huge = i64::MAX / FIXED_UNIT_PRICE + 1;
        let err = PricedOrder::from_draft(
            String::new(),
            vec![ProductLine::new(ProductName::Olma, huge)],
        )
        .unwrap_err();
        assert_eq!(err, TotalOverflow);

        let near = i64::MAX / FIXED_UNIT_PRICE;
        let lines = price_lines(vec![
            ProductLine::new(ProductName::Olma, near),
            ProductLine::new(ProductName::Anor, near),
        ]);
        assert_eq!(order_total(&lines), Err(TotalOverflow));
        assert_eq!(order_total(&lines[..1]), Ok(near * FIXED_UNIT_PRICE));
    }
}
