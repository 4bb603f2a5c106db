//! Trolley browser storefront

use jiff::tz::TimeZone;
use leptos::{logging, prelude::*};

use trolley::{config::StorefrontConfig, hints::STARTUP_HINT, session::format_created_at};

use crate::{
    actions::{AppState, click_title},
    cart::CartPanel,
    forms::{AddForm, DiscountForm},
    panels::{NoticeBanner, RecommendationPanel},
};

mod actions;
mod cart;
mod forms;
mod panels;
mod storage;

/// Main storefront page.
#[component]
fn App() -> impl IntoView {
    logging::log!("{STARTUP_HINT}");

    let state = AppState::restore(StorefrontConfig::default());

    let created_at = state
        .session
        .with_untracked(|session| format_created_at(session.created_at(), &TimeZone::system()));

    let dark = RwSignal::new(false);

    view! {
        <main class=move || if dark.get() { "app dark" } else { "app" }>
            <header class="app-header">
                <h1 class="app-title" on:click=move |_| click_title(state)>
                    "Trolley"
                </h1>
                <button
                    type="button"
                    class="icon-button"
                    aria-label="Toggle theme"
                    on:click=move |_| dark.update(|dark| *dark = !*dark)
                >
                    {move || if dark.get() { "☀" } else { "☾" }}
                </button>
            </header>
            <AddForm state=state />
            <NoticeBanner state=state />
            <CartPanel state=state created_at=created_at />
            <DiscountForm state=state />
            <RecommendationPanel state=state />
        </main>
    }
}

fn main() {
    console_error_panic_hook::set_once();

    leptos::mount::mount_to_body(App);
}
