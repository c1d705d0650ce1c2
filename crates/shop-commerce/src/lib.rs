//! Storefront domain types and logic.
//!
//! This crate holds the state engines behind a storefront UI:
//!
//! - **Catalog**: Items, derived views (search, category, price, sort)
//! - **Search**: Query parameters and pagination
//! - **Cart**: Stock-aware cart lines, snapshots, order summary pricing
//! - **Checkout**: Confirm flow from cart snapshot to confirmed order
//! - **Admin**: Order and inquiry tables
//! - **Session**: A single task serializing cart and checkout events
//!
//! Remote services are reached only through the collaborator traits
//! [`CatalogSource`], [`OrderSubmitter`], and [`AdminSource`].
//!
//! # Example
//!
//! ```rust
//! use shop_commerce::prelude::*;
//!
//! let catalog = Catalog::new(vec![
//!     Item::new(1u64, "Keyboard", Money::from_units(80), 3, "Peripherals"),
//!     Item::new(2u64, "Mouse", Money::from_units(25), 0, "Peripherals"),
//! ]);
//!
//! let query = Query::new().with_sort(SortKey::PriceAsc);
//! let view = catalog.view(&query);
//! assert_eq!(view[0].name, "Mouse");
//!
//! let mut cart = Cart::new();
//! assert!(cart.add(view[1]));
//! assert!(!cart.add(view[0])); // out of stock
//! assert_eq!(cart.total(), Money::from_units(80));
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod admin;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod search;
pub mod session;

pub use admin::AdminSource;
pub use catalog::CatalogSource;
pub use checkout::OrderSubmitter;
pub use error::CommerceError;
pub use ids::*;
pub use money::Money;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::Money;

    // Catalog
    pub use crate::catalog::{Catalog, CatalogSource, Item};

    // Search
    pub use crate::search::{
        paginate, CategoryFilter, Page, PageRequest, Pagination, Query, SortDirection, SortKey,
    };

    // Cart
    pub use crate::cart::{Cart, CartLine, CartPricing, CartSnapshot, PricingRules};

    // Checkout
    pub use crate::checkout::{
        BuyerDetails, CheckoutFailure, CheckoutFlow, CheckoutPolicy, CheckoutState, Identity,
        OrderDraft, OrderLine, OrderResult, OrderStatus, OrderSubmitter,
    };

    // Admin
    pub use crate::admin::{
        list_page, status_counts, AdminSource, InquiryRecord, InquirySortField, ListQuery,
        OrderRecord, OrderSortField, StatusFilter,
    };

    // Session
    pub use crate::session::{SessionHandle, ShopSession};
}
