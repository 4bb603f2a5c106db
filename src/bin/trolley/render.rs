//! Terminal rendering

use jiff::tz::TimeZone;
use rusty_money::iso::Currency;
use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};

use trolley::{
    pricing::{PricingError, format_amount},
    products::Product,
    session::{Notice, NoticeKind, Session, format_created_at},
};

/// Storefront header with the session's creation time.
pub fn header(session: &Session, tz: &TimeZone) -> String {
    format!(
        "Trolley\nShopping cart, created {}\n",
        format_created_at(session.created_at(), tz)
    )
}

/// The cart table followed by the summary footer.
///
/// # Errors
///
/// Returns `PricingError::Overflow` if the totals can't be represented.
pub fn cart(session: &Session, currency: &'static Currency) -> Result<String, PricingError> {
    let totals = session.totals(currency)?;

    let mut out = if session.cart().is_empty() {
        "Your cart is empty.\n".to_string()
    } else {
        let mut builder = Builder::default();

        builder.push_record(["Qty", "Product", "Price", "Total", "Image", "Id"]);

        for line in session.cart().lines() {
            builder.push_record([
                line.quantity.to_string(),
                line.title.clone(),
                format_amount(line.price, currency),
                format_amount(line.total_price, currency),
                line.image.clone(),
                line.id.to_string(),
            ]);
        }

        let mut table = builder.build();
        table.with(Style::modern_rounded());
        table.modify(Columns::new(2..4), Alignment::right());

        format!("{table}\n")
    };

    for line in totals.summary_lines() {
        out.push_str(&format!("  {}: {}\n", line.label, line.value));
    }

    Ok(out)
}

/// A banner line for `notice`.
pub fn notice(notice: &Notice) -> String {
    match notice.kind {
        NoticeKind::Error => format!("!! {}\n", notice.message),
        NoticeKind::Hint => format!("** {}\n", notice.message),
    }
}

/// The recommendation panel.
pub fn recommendation(product: &Product, currency: &'static Currency) -> String {
    format!(
        "You might also like: {} ({}), type `take` to add it.\n",
        product.title,
        format_amount(product.price, currency)
    )
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use rusty_money::iso::USD;
    use testresult::TestResult;
    use trolley::{
        cart::Cart,
        discounts::DiscountCodes,
        products::ProductId,
    };

    use super::*;

    fn backpack() -> TestResult<Product> {
        Ok(Product {
            id: ProductId::new(1).ok_or("zero id")?,
            title: "Fjallraven Backpack".to_string(),
            price: Decimal::new(109_95, 2),
            image: "https://fakestoreapi.com/img/81fPKd-2AYL._AC_SL1500_.jpg".to_string(),
            category: "men's clothing".to_string(),
        })
    }

    #[test]
    fn header_shows_creation_time() -> TestResult {
        let session = Session::started_at(Cart::new(), "2024-03-07T09:05:00Z".parse()?);

        assert_eq!(
            header(&session, &TimeZone::UTC),
            "Trolley\nShopping cart, created 07/03/2024 - 09:05\n"
        );

        Ok(())
    }

    #[test]
    fn empty_cart_still_shows_summary() -> TestResult {
        let rendered = cart(&Session::default(), USD)?;

        assert_eq!(
            rendered,
            "Your cart is empty.\n  Subtotal: $0.00\n  Total (0 items): $0.00\n"
        );

        Ok(())
    }

    #[test]
    fn cart_lists_lines_and_summary() -> TestResult {
        let session = Session::new(Cart::new().with_product(&backpack()?, 2)?)
            .apply_discount(&DiscountCodes::default(), "GONCY10")?;

        let rendered = cart(&session, USD)?;

        assert!(rendered.contains("Fjallraven Backpack"), "{rendered}");
        assert!(rendered.contains("$109.95"), "{rendered}");
        assert!(rendered.contains("$219.90"), "{rendered}");
        assert!(rendered.contains("Discount (10%): -$21.99"), "{rendered}");
        assert!(rendered.contains("Total (2 items): $197.91"), "{rendered}");

        Ok(())
    }

    #[test]
    fn no_discount_line_without_code() -> TestResult {
        let session = Session::new(Cart::new().with_product(&backpack()?, 1)?);

        let rendered = cart(&session, USD)?;

        assert!(!rendered.contains("Discount"), "{rendered}");
        assert!(rendered.contains("Total (1 item): $109.95"), "{rendered}");

        Ok(())
    }

    #[test]
    fn recommendation_names_product_and_price() -> TestResult {
        let rendered = recommendation(&backpack()?, USD);

        assert_eq!(
            rendered,
            "You might also like: Fjallraven Backpack ($109.95), type `take` to add it.\n"
        );

        Ok(())
    }
}
