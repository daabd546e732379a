//! UI Components

use std::sync::Arc;

use leptos::prelude::*;
use storefront_core::{
    CheckoutConfig, CheckoutPhase, CheckoutResolver, HttpPaymentLinkSource, Product,
    ProductCardView, ProductCatalog,
};

use crate::api::WindowNavigator;

/// Product card with a checkout button
#[component]
pub fn ProductCard(
    product: Product,
    config: CheckoutConfig,
    catalog: Arc<ProductCatalog>,
) -> impl IntoView {
    let card = ProductCardView::from(&product);
    let (phase, set_phase) = signal(CheckoutPhase::Idle);
    let (error, set_error) = signal(None::<String>);

    let source = HttpPaymentLinkSource::from_config(&config);
    let resolver = Arc::new(
        CheckoutResolver::new(config, source, WindowNavigator)
            .with_catalog(catalog)
            .with_listener(move |p| set_phase.set(p.clone())),
    );

    let product_id = product.product_id.get();
    let is_recurring = product.is_recurring;
    let checkout = move |_| {
        let resolver = resolver.clone();
        set_error.set(None);
        leptos::task::spawn_local(async move {
            if let Err(e) = resolver.resolve(product_id, is_recurring).await {
                set_error.set(Some(e.user_message().to_string()));
            }
        });
    };

    let in_flight = move || phase.with(CheckoutPhase::is_in_flight);
    let label_card = card.clone();
    let badges = card.badges();

    view! {
        <div class={card.theme.card_class()}>
            {badges.map(|(best_value, _)| view! { <div class="badge badge-best-value">{best_value}</div> })}

            <h3 class="product-name">{card.name.clone()}</h3>

            <div class="product-price">
                {card.original_price.clone().map(|p| view! { <span class="price-original">{p}</span> })}
                <span class="price">{card.price.clone()}</span>
            </div>

            <ul class="features">
                {card.features.iter().map(|f| view! { <li>{f.clone()}</li> }).collect_view()}
            </ul>

            <button
                class={card.theme.button_class()}
                on:click=checkout
                disabled=in_flight
            >
                {move || label_card.button_label(in_flight())}
            </button>

            {move || error.get().map(|e| view! { <p class="checkout-error">{e}</p> })}

            {card.social_proof.clone().map(|s| view! { <div class="social-proof">{s}</div> })}

            {(!card.additional_features.is_empty()).then(|| view! {
                <div class="additional-features">
                    {card.additional_features.iter().map(|f| view! {
                        <div><span class="check">"✓"</span>" "{f.clone()}</div>
                    }).collect_view()}
                </div>
            })}

            {badges.map(|(_, limited)| view! { <div class="badge badge-limited">{limited}</div> })}
        </div>
    }
}
