use leptos::{ev::SubmitEvent, prelude::*, task};

use crate::actions::{AppState, add_item, apply_discount};

/// Whether the add form has both fields filled in.
pub fn can_add(quantity: &str, product_id: &str) -> bool {
    !quantity.trim().is_empty() && !product_id.trim().is_empty()
}

/// Quantity and product id inputs with the add button.
#[component]
pub fn AddForm(state: AppState) -> impl IntoView {
    let quantity = RwSignal::new(String::new());
    let product_id = RwSignal::new(String::new());

    let ready = move || quantity.with(|quantity| product_id.with(|id| can_add(quantity, id)));

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();

        let entered_quantity = quantity.get_untracked();
        let entered_id = product_id.get_untracked();

        if !can_add(&entered_quantity, &entered_id) {
            return;
        }

        task::spawn_local(async move {
            if add_item(state, entered_id, entered_quantity).await.is_ok() {
                quantity.set(String::new());
                product_id.set(String::new());
            }
        });
    };

    view! {
        <form class="card add-form" on:submit=on_submit>
            <label class="field">
                <span>"Quantity"</span>
                <input
                    type="number"
                    min="1"
                    placeholder="Enter quantity"
                    prop:value=move || quantity.get()
                    on:input=move |ev| quantity.set(event_target_value(&ev))
                />
            </label>
            <label class="field">
                <span>"Product id"</span>
                <input
                    type="number"
                    min="1"
                    placeholder="Enter product id"
                    prop:value=move || product_id.get()
                    on:input=move |ev| product_id.set(event_target_value(&ev))
                />
            </label>
            <button type="submit" disabled=move || !ready()>
                "Add"
            </button>
        </form>
    }
}

/// Discount code input. Codes are upper-cased as they're typed.
#[component]
pub fn DiscountForm(state: AppState) -> impl IntoView {
    let code = RwSignal::new(String::new());

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();

        if apply_discount(state, &code.get_untracked()).is_ok() {
            code.set(String::new());
        }
    };

    view! {
        <form class="card discount-form" on:submit=on_submit>
            <h2>"Apply a discount"</h2>
            <div class="inline-fields">
                <input
                    type="text"
                    placeholder="Find the discount code somewhere on the page"
                    prop:value=move || code.get()
                    on:input=move |ev| code.set(event_target_value(&ev).to_uppercase())
                />
                <button type="submit">"Apply"</button>
            </div>
        </form>
    }
}
