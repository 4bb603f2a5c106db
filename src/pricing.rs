//! Pricing

use rust_decimal::{Decimal, RoundingStrategy};
use rusty_money::{Money, iso::Currency};
use thiserror::Error;

use crate::{cart::Cart, discounts::AppliedDiscount};

/// Errors that can occur while calculating totals.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PricingError {
    /// The subtotal or discount could not be represented.
    #[error("cart totals overflowed")]
    Overflow,
}

/// Cart totals, recomputed from the cart on every call.
#[derive(Debug, Clone, PartialEq)]
pub struct Totals {
    /// Sum of line totals
    pub subtotal: Money<'static, Currency>,

    /// `subtotal × rate`
    pub discount: Money<'static, Currency>,

    /// `subtotal − discount`
    pub total: Money<'static, Currency>,

    /// Sum of quantities
    pub item_count: u64,

    /// Applied discount rate, zero when none is active
    pub rate: Decimal,
}

/// One line of a cart summary footer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryLine {
    /// Line label, e.g. `Total (2 items)`
    pub label: String,

    /// Formatted amount
    pub value: String,

    /// Whether this is the discount line
    pub is_discount: bool,
}

impl Totals {
    /// Check whether a non-zero discount is being applied.
    pub fn has_discount(&self) -> bool {
        self.rate > Decimal::ZERO
    }

    /// Summary footer: subtotal, the discount when one is taking effect, then
    /// the total with its item count.
    pub fn summary_lines(&self) -> Vec<SummaryLine> {
        let mut lines = vec![SummaryLine {
            label: "Subtotal".to_string(),
            value: format_price(&self.subtotal),
            is_discount: false,
        }];

        if self.has_discount() {
            lines.push(SummaryLine {
                label: format!(
                    "Discount ({}%)",
                    (self.rate * Decimal::ONE_HUNDRED).round_dp(0)
                ),
                value: format!("-{}", format_price(&self.discount)),
                is_discount: true,
            });
        }

        let items = if self.item_count == 1 { "item" } else { "items" };

        lines.push(SummaryLine {
            label: format!("Total ({} {items})", self.item_count),
            value: format_price(&self.total),
            is_discount: false,
        });

        lines
    }
}

/// Calculate totals for a cart with an optional discount.
///
/// # Errors
///
/// Returns `PricingError::Overflow` if the subtotal can't be represented.
pub fn totals(
    cart: &Cart,
    discount: Option<&AppliedDiscount>,
    currency: &'static Currency,
) -> Result<Totals, PricingError> {
    let subtotal = cart
        .lines()
        .iter()
        .try_fold(Decimal::ZERO, |acc, line| acc.checked_add(line.total_price))
        .ok_or(PricingError::Overflow)?;

    let rate = discount.map_or(Decimal::ZERO, |applied| applied.rate);

    let discount_amount = subtotal
        .checked_mul(rate)
        .ok_or(PricingError::Overflow)?;

    let total = subtotal
        .checked_sub(discount_amount)
        .ok_or(PricingError::Overflow)?;

    Ok(Totals {
        subtotal: Money::from_decimal(subtotal, currency),
        discount: Money::from_decimal(discount_amount, currency),
        total: Money::from_decimal(total, currency),
        item_count: cart.item_count(),
        rate,
    })
}

/// Format money for display, rounded half away from zero to two places.
pub fn format_price(money: &Money<'_, Currency>) -> String {
    let amount = money
        .amount()
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);

    let sign = if amount.is_sign_negative() && !amount.is_zero() {
        "-"
    } else {
        ""
    };

    let code = money.currency().iso_alpha_code;
    let symbol = match code {
        "GBP" => "£",
        "USD" => "$",
        "EUR" => "€",
        _ => "",
    };

    let abs = amount.abs();

    if symbol.is_empty() {
        format!("{sign}{abs:.2} {code}")
    } else {
        format!("{sign}{symbol}{abs:.2}")
    }
}

/// Format a bare decimal price in the given currency.
pub fn format_amount(amount: Decimal, currency: &'static Currency) -> String {
    format_price(&Money::from_decimal(amount, currency))
}
