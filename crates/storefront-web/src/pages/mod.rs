//! Page Components

mod products;

pub use products::ProductsPage;
