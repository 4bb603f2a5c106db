use leptos::{prelude::*, task};

use trolley::{pricing::format_amount, session::NoticeKind};

use crate::actions::{AppState, add_item};

/// The current notice, if any.
#[component]
pub fn NoticeBanner(state: AppState) -> impl IntoView {
    move || {
        state
            .session
            .with(|session| session.notice().cloned())
            .map(|notice| {
                let (class, role) = match notice.kind {
                    NoticeKind::Error => ("notice notice-error", "alert"),
                    NoticeKind::Hint => ("notice notice-hint", "status"),
                };

                view! {
                    <div class=class role=role>
                        {notice.message}
                    </div>
                }
            })
    }
}

/// A product from the same category as the last one added.
#[component]
pub fn RecommendationPanel(state: AppState) -> impl IntoView {
    let currency = state.config.with_value(|config| config.currency);

    move || {
        state
            .session
            .with(|session| session.recommendation().cloned())
            .map(|product| {
                let id = product.id;
                let price = format_amount(product.price, currency);

                view! {
                    <section class="card recommendation">
                        <h2>"You might also like"</h2>
                        <div class="recommendation-body">
                            <img
                                class="recommendation-image"
                                src=product.image
                                alt=product.title.clone()
                                width="100"
                                height="100"
                            />
                            <div class="recommendation-text">
                                <h3>{product.title}</h3>
                                <p>{price}</p>
                            </div>
                            <button
                                type="button"
                                on:click=move |_| {
                                    task::spawn_local(async move {
                                        _ = add_item(state, id.to_string(), "1".to_string()).await;
                                    });
                                }
                            >
                                "Add"
                            </button>
                        </div>
                    </section>
                }
            })
    }
}
