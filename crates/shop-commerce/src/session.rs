//! Serialized cart and checkout session.
//!
//! One task owns the cart and the checkout flow; handles send it commands
//! over a channel, so cart edits apply one at a time in arrival order. The
//! order submission runs beside the task and its outcome re-enters the loop
//! like any other event.

use crate::cart::{Cart, CartSnapshot};
use crate::catalog::Item;
use crate::checkout::{
    submit_with_timeout, BuyerDetails, CheckoutFlow, CheckoutPolicy, CheckoutState, Identity,
    OrderResult, OrderSubmitter,
};
use crate::error::CommerceError;
use crate::ids::ItemId;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinSet;
use tracing::{debug, info};

/// Commands buffered before senders wait.
const COMMAND_BUFFER: usize = 64;

enum Command {
    Add {
        item: Item,
        reply: oneshot::Sender<bool>,
    },
    SetQuantity {
        id: ItemId,
        delta: i64,
        reply: oneshot::Sender<bool>,
    },
    Remove {
        id: ItemId,
        reply: oneshot::Sender<bool>,
    },
    Clear {
        reply: oneshot::Sender<()>,
    },
    Snapshot {
        reply: oneshot::Sender<CartSnapshot>,
    },
    Confirm {
        identity: Identity,
        buyer: BuyerDetails,
        reply: oneshot::Sender<CheckoutState>,
    },
    State {
        reply: oneshot::Sender<CheckoutState>,
    },
    Settled {
        reply: oneshot::Sender<CheckoutState>,
    },
    Reset {
        reply: oneshot::Sender<CheckoutState>,
    },
}

/// Single owner of a cart and its checkout flow.
pub struct ShopSession {
    cart: Cart,
    checkout: CheckoutFlow,
    submitter: Arc<dyn OrderSubmitter>,
    in_flight: JoinSet<Result<OrderResult, CommerceError>>,
    waiters: Vec<oneshot::Sender<CheckoutState>>,
}

impl ShopSession {
    pub fn new(cart: Cart, policy: CheckoutPolicy, submitter: Arc<dyn OrderSubmitter>) -> Self {
        Self {
            cart,
            checkout: CheckoutFlow::new(policy),
            submitter,
            in_flight: JoinSet::new(),
            waiters: Vec::new(),
        }
    }

    /// Start the session task. It runs until every handle is dropped.
    pub fn spawn(self) -> SessionHandle {
        let (tx, rx) = mpsc::channel(COMMAND_BUFFER);
        tokio::spawn(self.run(rx));
        SessionHandle { tx }
    }

    async fn run(mut self, mut rx: mpsc::Receiver<Command>) {
        debug!("session started");
        loop {
            tokio::select! {
                command = rx.recv() => match command {
                    Some(command) => self.handle(command),
                    None => break,
                },
                Some(joined) = self.in_flight.join_next(), if !self.in_flight.is_empty() => {
                    let outcome = joined.unwrap_or_else(|e| {
                        Err(CommerceError::Transport(format!("submission task failed: {e}")))
                    });
                    self.checkout.complete(outcome, &mut self.cart);
                    self.notify_settled();
                }
            }
        }
        debug!("session closed");
    }

    fn handle(&mut self, command: Command) {
        match command {
            Command::Add { item, reply } => {
                let _ = reply.send(self.cart.add(&item));
            }
            Command::SetQuantity { id, delta, reply } => {
                let _ = reply.send(self.cart.set_quantity(&id, delta));
            }
            Command::Remove { id, reply } => {
                let _ = reply.send(self.cart.remove(&id));
            }
            Command::Clear { reply } => {
                self.cart.clear();
                let _ = reply.send(());
            }
            Command::Snapshot { reply } => {
                let _ = reply.send(self.cart.snapshot());
            }
            Command::Confirm {
                identity,
                buyer,
                reply,
            } => {
                self.confirm(&identity, &buyer);
                let _ = reply.send(self.checkout.state().clone());
            }
            Command::State { reply } => {
                let _ = reply.send(self.checkout.state().clone());
            }
            Command::Settled { reply } => {
                if self.checkout.state().is_submitting() {
                    self.waiters.push(reply);
                } else {
                    let _ = reply.send(self.checkout.state().clone());
                }
            }
            Command::Reset { reply } => {
                self.checkout.reset();
                let _ = reply.send(self.checkout.state().clone());
            }
        }
    }

    fn confirm(&mut self, identity: &Identity, buyer: &BuyerDetails) {
        let Some(draft) = self.checkout.begin(&self.cart, identity, buyer) else {
            return;
        };

        let submitter = Arc::clone(&self.submitter);
        let timeout = self.checkout.policy().submit_timeout;
        info!(units = draft.unit_count(), "order submission started");
        self.in_flight
            .spawn(async move { submit_with_timeout(submitter.as_ref(), &draft, timeout).await });
    }

    fn notify_settled(&mut self) {
        let state = self.checkout.state().clone();
        for waiter in self.waiters.drain(..) {
            let _ = waiter.send(state.clone());
        }
    }
}

/// Cloneable handle to a running [`ShopSession`].
#[derive(Clone)]
pub struct SessionHandle {
    tx: mpsc::Sender<Command>,
}

impl SessionHandle {
    /// Add one unit of `item`. Returns whether the cart changed.
    pub async fn add(&self, item: Item) -> Result<bool, CommerceError> {
        self.request(|reply| Command::Add { item, reply }).await
    }

    /// Adjust a line's quantity by `delta`. Returns whether the cart changed.
    pub async fn set_quantity(&self, id: ItemId, delta: i64) -> Result<bool, CommerceError> {
        self.request(|reply| Command::SetQuantity { id, delta, reply })
            .await
    }

    pub async fn remove(&self, id: ItemId) -> Result<bool, CommerceError> {
        self.request(|reply| Command::Remove { id, reply }).await
    }

    pub async fn clear(&self) -> Result<(), CommerceError> {
        self.request(|reply| Command::Clear { reply }).await
    }

    /// Deep copy of the cart.
    pub async fn snapshot(&self) -> Result<CartSnapshot, CommerceError> {
        self.request(|reply| Command::Snapshot { reply }).await
    }

    /// Start a checkout attempt and return the state right after it.
    ///
    /// Does not wait for the order service; see [`SessionHandle::settled`].
    pub async fn confirm(
        &self,
        identity: Identity,
        buyer: BuyerDetails,
    ) -> Result<CheckoutState, CommerceError> {
        self.request(|reply| Command::Confirm {
            identity,
            buyer,
            reply,
        })
        .await
    }

    pub async fn state(&self) -> Result<CheckoutState, CommerceError> {
        self.request(|reply| Command::State { reply }).await
    }

    /// Wait until no submission is in flight.
    pub async fn settled(&self) -> Result<CheckoutState, CommerceError> {
        self.request(|reply| Command::Settled { reply }).await
    }

    /// Return the checkout to `Idle` unless a submission is in flight.
    pub async fn reset(&self) -> Result<CheckoutState, CommerceError> {
        self.request(|reply| Command::Reset { reply }).await
    }

    async fn request<T>(
        &self,
        build: impl FnOnce(oneshot::Sender<T>) -> Command,
    ) -> Result<T, CommerceError> {
        let (reply, response) = oneshot::channel();
        self.tx
            .send(build(reply))
            .await
            .map_err(|_| CommerceError::SessionClosed)?;
        response.await.map_err(|_| CommerceError::SessionClosed)
    }
}
