//! Checkout state machine.
//!
//! `Idle -> Submitting -> Confirmed | Failed`. Precondition failures are
//! states, not errors, so callers can render them inline.

use crate::cart::Cart;
use crate::checkout::{BuyerDetails, Identity, OrderDraft, OrderResult, OrderSubmitter};
use crate::error::CommerceError;
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Bounded wait applied to a submission when nothing else is configured.
pub const DEFAULT_SUBMIT_TIMEOUT: Duration = Duration::from_secs(30);

/// Why a checkout attempt failed.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CheckoutFailure {
    #[error("not authenticated")]
    NotAuthenticated,
    #[error("missing contact info")]
    MissingContactInfo,
    #[error("timeout")]
    Timeout,
    /// The order service refused the order or could not be reached.
    #[error("{0}")]
    Rejected(String),
}

impl From<CommerceError> for CheckoutFailure {
    fn from(e: CommerceError) -> Self {
        if e.is_timeout() {
            CheckoutFailure::Timeout
        } else {
            CheckoutFailure::Rejected(e.to_string())
        }
    }
}

/// Where a checkout attempt stands.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CheckoutState {
    #[default]
    Idle,
    Submitting,
    Confirmed(OrderResult),
    Failed(CheckoutFailure),
}

impl CheckoutState {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckoutState::Idle => "idle",
            CheckoutState::Submitting => "submitting",
            CheckoutState::Confirmed(_) => "confirmed",
            CheckoutState::Failed(_) => "failed",
        }
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self, CheckoutState::Submitting)
    }

    /// The confirmed order, if the last attempt succeeded.
    pub fn result(&self) -> Option<&OrderResult> {
        match self {
            CheckoutState::Confirmed(result) => Some(result),
            _ => None,
        }
    }

    /// The failure reason, if the last attempt failed.
    pub fn failure(&self) -> Option<&CheckoutFailure> {
        match self {
            CheckoutState::Failed(reason) => Some(reason),
            _ => None,
        }
    }
}

/// Checkout rules supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutPolicy {
    /// Refuse to submit without an authenticated identity.
    pub require_authentication: bool,
    /// Bounded wait for the order service.
    pub submit_timeout: Duration,
}

impl Default for CheckoutPolicy {
    fn default() -> Self {
        Self {
            require_authentication: true,
            submit_timeout: DEFAULT_SUBMIT_TIMEOUT,
        }
    }
}

impl CheckoutPolicy {
    /// Allow orders from anonymous buyers.
    pub fn guest_checkout() -> Self {
        Self {
            require_authentication: false,
            ..Self::default()
        }
    }

    pub fn with_submit_timeout(mut self, timeout: Duration) -> Self {
        self.submit_timeout = timeout;
        self
    }
}

/// Checkout orchestrator.
#[derive(Debug, Clone, Default)]
pub struct CheckoutFlow {
    state: CheckoutState,
    policy: CheckoutPolicy,
}

impl CheckoutFlow {
    pub fn new(policy: CheckoutPolicy) -> Self {
        Self {
            state: CheckoutState::Idle,
            policy,
        }
    }

    pub fn state(&self) -> &CheckoutState {
        &self.state
    }

    pub fn policy(&self) -> &CheckoutPolicy {
        &self.policy
    }

    /// Check preconditions and move to `Submitting`, dated today.
    pub fn begin(
        &mut self,
        cart: &Cart,
        identity: &Identity,
        buyer: &BuyerDetails,
    ) -> Option<OrderDraft> {
        self.begin_on(cart, identity, buyer, Local::now().date_naive())
    }

    /// Check preconditions and move to `Submitting`.
    ///
    /// Returns the draft to submit, or `None` when no submission should
    /// happen: a confirm while submitting, an empty cart, or a failed
    /// precondition (which moves to `Failed`). The cart is never touched.
    pub fn begin_on(
        &mut self,
        cart: &Cart,
        identity: &Identity,
        buyer: &BuyerDetails,
        date: NaiveDate,
    ) -> Option<OrderDraft> {
        if self.state.is_submitting() {
            tracing::debug!("confirm ignored while a submission is in flight");
            return None;
        }
        if cart.is_empty() {
            tracing::debug!("confirm ignored for empty cart");
            return None;
        }
        if self.policy.require_authentication && !identity.is_authenticated() {
            return self.fail(CheckoutFailure::NotAuthenticated);
        }
        if !buyer.has_contact_info() {
            return self.fail(CheckoutFailure::MissingContactInfo);
        }

        let draft = OrderDraft::new(&cart.snapshot(), buyer, date);
        tracing::info!(lines = draft.lines.len(), units = draft.unit_count(), "submitting order");
        self.state = CheckoutState::Submitting;
        Some(draft)
    }

    /// Resolve the in-flight submission.
    ///
    /// Success clears the cart; failure leaves it intact for a retry.
    /// Ignored unless `Submitting`. Returns whether the state changed.
    pub fn complete(&mut self, outcome: Result<OrderResult, CommerceError>, cart: &mut Cart) -> bool {
        if !self.state.is_submitting() {
            tracing::debug!("submission outcome ignored outside of submitting");
            return false;
        }

        match outcome {
            Ok(result) => {
                tracing::info!(order_id = %result.id, status = %result.status(), "order confirmed");
                cart.clear();
                self.state = CheckoutState::Confirmed(result);
            }
            Err(e) => {
                let reason = CheckoutFailure::from(e);
                tracing::warn!(reason = %reason, "order submission failed");
                self.state = CheckoutState::Failed(reason);
            }
        }
        true
    }

    /// Run a whole attempt against `submitter` with a bounded wait.
    pub async fn confirm(
        &mut self,
        cart: &mut Cart,
        identity: &Identity,
        buyer: &BuyerDetails,
        submitter: &dyn OrderSubmitter,
    ) -> &CheckoutState {
        let Some(draft) = self.begin(cart, identity, buyer) else {
            return &self.state;
        };

        let outcome = submit_with_timeout(submitter, &draft, self.policy.submit_timeout).await;
        self.complete(outcome, cart);
        &self.state
    }

    /// Start over, discarding a previous result or failure.
    ///
    /// Ignored while submitting.
    pub fn reset(&mut self) {
        if !self.state.is_submitting() {
            self.state = CheckoutState::Idle;
        }
    }

    fn fail(&mut self, reason: CheckoutFailure) -> Option<OrderDraft> {
        tracing::info!(reason = %reason, "checkout precondition failed");
        self.state = CheckoutState::Failed(reason);
        None
    }
}

/// Submit `draft`, mapping an expired wait to [`CommerceError::Timeout`].
pub async fn submit_with_timeout(
    submitter: &dyn OrderSubmitter,
    draft: &OrderDraft,
    timeout: Duration,
) -> Result<OrderResult, CommerceError> {
    match tokio::time::timeout(timeout, submitter.submit(draft)).await {
        Ok(outcome) => outcome,
        Err(_) => Err(CommerceError::Timeout),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Item;
    use crate::checkout::OrderStatus;
    use crate::ids::OrderId;
    use crate::money::Money;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Accepting {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl OrderSubmitter for Accepting {
        async fn submit(&self, draft: &OrderDraft) -> Result<OrderResult, CommerceError> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            Ok(OrderResult::new(OrderId::from(n as u64), OrderStatus::Pending, draft.clone()))
        }
    }

    struct Rejecting;

    #[async_trait]
    impl OrderSubmitter for Rejecting {
        async fn submit(&self, _draft: &OrderDraft) -> Result<OrderResult, CommerceError> {
            Err(CommerceError::Http {
                status: 500,
                message: "Internal Server Error".into(),
            })
        }
    }

    struct Hanging;

    #[async_trait]
    impl OrderSubmitter for Hanging {
        async fn submit(&self, _draft: &OrderDraft) -> Result<OrderResult, CommerceError> {
            std::future::pending().await
        }
    }

    fn filled_cart() -> Cart {
        let mut cart = Cart::new();
        cart.add(&Item::new(1u64, "Lamp", Money::from_units(30), 2, "Home"));
        cart.add(&Item::new(2u64, "Bulb", Money::from_units(5), 10, "Home"));
        cart
    }

    fn member() -> Identity {
        Identity::Authenticated {
            name: Some("Lin".into()),
            email: Some("lin@example.com".into()),
            phone: Some("555-0123".into()),
        }
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
    }

    #[test]
    fn test_empty_cart_stays_idle() {
        let mut flow = CheckoutFlow::default();
        let buyer = BuyerDetails::prefilled(&member());
        assert!(flow.begin_on(&Cart::new(), &member(), &buyer, date()).is_none());
        assert_eq!(flow.state(), &CheckoutState::Idle);
    }

    #[test]
    fn test_anonymous_fails_not_authenticated() {
        let mut flow = CheckoutFlow::default();
        let cart = filled_cart();
        let buyer = BuyerDetails::prefilled(&member());
        assert!(flow.begin_on(&cart, &Identity::Anonymous, &buyer, date()).is_none());
        assert_eq!(flow.state(), &CheckoutState::Failed(CheckoutFailure::NotAuthenticated));
        assert_eq!(flow.state().failure().unwrap().to_string(), "not authenticated");
        assert_eq!(cart.count(), 2);
    }

    #[test]
    fn test_guest_checkout_policy_allows_anonymous() {
        let mut flow = CheckoutFlow::new(CheckoutPolicy::guest_checkout());
        let buyer = BuyerDetails::default()
            .with_email("guest@example.com")
            .with_phone("555-0000");
        assert!(flow.begin_on(&filled_cart(), &Identity::Anonymous, &buyer, date()).is_some());
        assert!(flow.state().is_submitting());
    }

    #[test]
    fn test_missing_contact_info() {
        let mut flow = CheckoutFlow::default();
        let buyer = BuyerDetails::prefilled(&member()).with_phone("   ");
        assert!(flow.begin_on(&filled_cart(), &member(), &buyer, date()).is_none());
        assert_eq!(flow.state(), &CheckoutState::Failed(CheckoutFailure::MissingContactInfo));
    }

    #[test]
    fn test_begin_while_submitting_is_ignored() {
        let mut flow = CheckoutFlow::default();
        let cart = filled_cart();
        let buyer = BuyerDetails::prefilled(&member());
        assert!(flow.begin_on(&cart, &member(), &buyer, date()).is_some());
        assert!(flow.begin_on(&cart, &member(), &buyer, date()).is_none());
        assert!(flow.state().is_submitting());
    }

    #[test]
    fn test_complete_outside_submitting_is_ignored() {
        let mut flow = CheckoutFlow::default();
        let mut cart = filled_cart();
        assert!(!flow.complete(Err(CommerceError::Timeout), &mut cart));
        assert_eq!(flow.state(), &CheckoutState::Idle);
    }

    #[tokio::test]
    async fn test_confirm_success_clears_cart() {
        let mut flow = CheckoutFlow::default();
        let mut cart = filled_cart();
        let submitter = Accepting { calls: AtomicUsize::new(0) };
        let buyer = BuyerDetails::prefilled(&member());

        let state = flow.confirm(&mut cart, &member(), &buyer, &submitter).await;
        let result = state.result().expect("confirmed");
        assert_eq!(result.id.as_str(), "1");
        assert_eq!(result.draft.lines.len(), 2);
        assert!(cart.is_empty());
        assert_eq!(cart.count(), 0);
    }

    #[tokio::test]
    async fn test_confirm_failure_keeps_cart() {
        let mut flow = CheckoutFlow::default();
        let mut cart = filled_cart();
        let before = cart.snapshot();
        let buyer = BuyerDetails::prefilled(&member());

        flow.confirm(&mut cart, &member(), &buyer, &Rejecting).await;
        match flow.state() {
            CheckoutState::Failed(CheckoutFailure::Rejected(message)) => {
                assert!(message.contains("500"));
            }
            other => panic!("unexpected state: {other:?}"),
        }
        assert_eq!(cart.snapshot(), before);
    }

    #[tokio::test(start_paused = true)]
    async fn test_confirm_timeout() {
        let policy = CheckoutPolicy::default().with_submit_timeout(Duration::from_secs(5));
        let mut flow = CheckoutFlow::new(policy);
        let mut cart = filled_cart();
        let buyer = BuyerDetails::prefilled(&member());

        flow.confirm(&mut cart, &member(), &buyer, &Hanging).await;
        assert_eq!(flow.state(), &CheckoutState::Failed(CheckoutFailure::Timeout));
        assert!(!cart.is_empty());
    }

    #[tokio::test]
    async fn test_retry_after_failure_then_reset() {
        let mut flow = CheckoutFlow::default();
        let mut cart = filled_cart();
        let buyer = BuyerDetails::prefilled(&member());
        flow.confirm(&mut cart, &member(), &buyer, &Rejecting).await;

        let submitter = Accepting { calls: AtomicUsize::new(0) };
        flow.confirm(&mut cart, &member(), &buyer, &submitter).await;
        assert!(flow.state().result().is_some());

        flow.reset();
        assert_eq!(flow.state(), &CheckoutState::Idle);
        assert_eq!(submitter.calls.load(Ordering::SeqCst), 1);
    }
}
