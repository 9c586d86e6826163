//! Payment requests.

use payguard_graph::UserId;

/// A live request for `from` to pay `to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PaymentRequest {
    /// Payer
    pub from: UserId,
    /// Payee
    pub to: UserId,
}

impl PaymentRequest {
    /// Create a new request.
    pub const fn new(from: UserId, to: UserId) -> Self {
        Self { from, to }
    }

    /// Whether payer and payee are the same user.
    pub fn is_self_payment(&self) -> bool {
        self.from == self.to
    }
}

impl From<(UserId, UserId)> for PaymentRequest {
    fn from((from, to): (UserId, UserId)) -> Self {
        Self { from, to }
    }
}
