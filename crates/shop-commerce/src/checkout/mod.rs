//! Checkout module.
//!
//! Contains the checkout state machine, buyer identity, order payloads,
//! and the submission seam.

mod flow;
mod identity;
mod order;
mod submit;

pub use flow::{
    submit_with_timeout, CheckoutFailure, CheckoutFlow, CheckoutPolicy, CheckoutState,
    DEFAULT_SUBMIT_TIMEOUT,
};
pub use identity::{BuyerDetails, Identity};
pub use order::{OrderDraft, OrderLine, OrderResult, OrderStatus, UnknownOrderStatus};
pub use submit::OrderSubmitter;
