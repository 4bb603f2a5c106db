use leptos::prelude::*;
use rusty_money::iso::Currency;

use trolley::{
    cart::CartLine,
    pricing::{SummaryLine, format_amount},
    session::Session,
};

use crate::actions::{AppState, remove_item};

/// Summary footer rows for `session`.
pub fn summary_rows(session: &Session, currency: &'static Currency) -> Vec<SummaryLine> {
    match session.totals(currency) {
        Ok(totals) => totals.summary_lines(),
        Err(error) => vec![SummaryLine {
            label: "Total".to_string(),
            value: error.to_string(),
            is_discount: false,
        }],
    }
}

/// Cart table with remove buttons and the summary footer.
#[component]
pub fn CartPanel(state: AppState, created_at: String) -> impl IntoView {
    let currency = state.config.with_value(|config| config.currency);

    let lines = move || state.session.with(|session| session.cart().lines().to_vec());
    let rows = move || state.session.with(|session| summary_rows(session, currency));

    view! {
        <section class="card">
            <h2 class="card-caption">"Shopping cart, created " {created_at}</h2>
            <div class="table-scroll">
                <table class="cart-table">
                    <thead>
                        <tr>
                            <th>"Qty"</th>
                            <th>"Product"</th>
                            <th>"Unit price"</th>
                            <th>"Total"</th>
                            <th>"Image"</th>
                            <th></th>
                        </tr>
                    </thead>
                    <tbody>
                        <For
                            each=lines
                            key=|line| (line.id, line.quantity)
                            children=move |line| {
                                view! { <CartRow state=state line=line currency=currency /> }
                            }
                        />
                    </tbody>
                    <tfoot>
                        {move || {
                            rows()
                                .into_iter()
                                .map(|row| {
                                    let value_class = if row.is_discount {
                                        "summary-value summary-discount"
                                    } else {
                                        "summary-value"
                                    };

                                    view! {
                                        <tr class="summary-row">
                                            <td colspan="3">{row.label} ":"</td>
                                            <td colspan="3" class=value_class>{row.value}</td>
                                        </tr>
                                    }
                                })
                                .collect_view()
                        }}
                    </tfoot>
                </table>
            </div>
        </section>
    }
}

#[component]
fn CartRow(state: AppState, line: CartLine, currency: &'static Currency) -> impl IntoView {
    let id = line.id;
    let remove_label = format!("Remove {} from cart", line.title);

    view! {
        <tr>
            <td>{line.quantity}</td>
            <td>{line.title.clone()}</td>
            <td>{format_amount(line.price, currency)}</td>
            <td>{format_amount(line.total_price, currency)}</td>
            <td>
                <img class="cart-thumb" src=line.image alt=line.title width="50" height="50" />
            </td>
            <td>
                <button
                    type="button"
                    class="icon-button"
                    aria-label=remove_label
                    on:click=move |_| remove_item(state, id)
                >
                    "✕"
                </button>
            </td>
        </tr>
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use rusty_money::iso::USD;
    use testresult::TestResult;
    use trolley::{
        cart::Cart,
        discounts::DiscountCodes,
        products::{Product, ProductId},
    };

    use super::*;

    fn session_with(quantity: u32) -> TestResult<Session> {
        let product = Product {
            id: ProductId::new(5).ok_or("zero id")?,
            title: "Dragon Station Chain Bracelet".to_string(),
            price: Decimal::new(695_00, 2),
            image: String::new(),
            category: "jewelery".to_string(),
        };

        Ok(Session::new(Cart::new().with_product(&product, quantity)?))
    }

    #[test]
    fn rows_without_discount() -> TestResult {
        let rows = summary_rows(&session_with(1)?, USD);

        let labels: Vec<&str> = rows.iter().map(|row| row.label.as_str()).collect();
        assert_eq!(labels, ["Subtotal", "Total (1 item)"]);
        assert!(rows.iter().all(|row| row.value == "$695.00"));

        Ok(())
    }

    #[test]
    fn rows_with_discount() -> TestResult {
        let session = session_with(2)?.apply_discount(&DiscountCodes::default(), "AGUANTEWALLBIT")?;

        let rows = summary_rows(&session, USD);

        assert_eq!(
            rows,
            vec![
                SummaryLine {
                    label: "Subtotal".to_string(),
                    value: "$1390.00".to_string(),
                    is_discount: false,
                },
                SummaryLine {
                    label: "Discount (25%)".to_string(),
                    value: "-$347.50".to_string(),
                    is_discount: true,
                },
                SummaryLine {
                    label: "Total (2 items)".to_string(),
                    value: "$1042.50".to_string(),
                    is_discount: false,
                },
            ]
        );

        Ok(())
    }
}
