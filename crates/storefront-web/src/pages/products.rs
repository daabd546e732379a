//! Products Page

use std::sync::Arc;

use leptos::prelude::*;
use storefront_core::ProductCatalog;

use crate::api;
use crate::components::ProductCard;

#[derive(Clone)]
enum CatalogState {
    Loading,
    Loaded(Arc<ProductCatalog>),
    Failed(String),
}

#[component]
pub fn ProductsPage() -> impl IntoView {
    let config = match api::checkout_config() {
        Ok(config) => config,
        Err(e) => {
            return view! { <p class="error">{e.to_string()}</p> }.into_any();
        }
    };

    let (state, set_state) = signal(CatalogState::Loading);

    let base_url = config.base_url.clone();
    leptos::task::spawn_local(async move {
        match api::fetch_catalog(&base_url).await {
            Ok(catalog) => set_state.set(CatalogState::Loaded(Arc::new(catalog))),
            Err(e) => set_state.set(CatalogState::Failed(e)),
        }
    });

    view! {
        <div class="products">
            <h1>"Pricing"</h1>
            <div class="product-grid">
                {move || match state.get() {
                    CatalogState::Loading => view! { <p class="loading">"Loading products..."</p> }.into_any(),
                    CatalogState::Failed(e) => view! { <p class="error">{e}</p> }.into_any(),
                    CatalogState::Loaded(catalog) => catalog
                        .products()
                        .iter()
                        .map(|product| view! {
                            <ProductCard
                                product=product.clone()
                                config=config.clone()
                                catalog=catalog.clone()
                            />
                        })
                        .collect_view()
                        .into_any(),
                }}
            </div>
        </div>
    }
    .into_any()
}
