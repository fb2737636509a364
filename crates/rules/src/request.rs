//! Transfer request - data passed to rules

use freezeguard_core::Address;

/// A transfer submitted for validation
///
/// Amounts are carried for rules that need them; the freeze rule
/// ignores them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferRequest {
    /// Token contract being transferred
    pub token: Option<Address>,

    /// Realm the token belongs to
    pub realm: Option<Address>,

    /// Sender address
    pub from: Address,

    /// Receiver address
    pub to: Address,

    /// Amount in token units
    pub amount: u128,

    /// Amount converted to the reference currency
    pub amount_in_ref_currency: u128,

    /// Treat unregistered parties as unrestricted
    pub allow_not_found: bool,

    /// Intermediaries whose registrations the token trusts, in lookup order
    pub trusted_intermediaries: Vec<Address>,
}

impl TransferRequest {
    /// Create a request between two addresses
    pub fn new(from: Address, to: Address) -> Self {
        Self {
            token: None,
            realm: None,
            from,
            to,
            amount: 0,
            amount_in_ref_currency: 0,
            allow_not_found: false,
            trusted_intermediaries: Vec::new(),
        }
    }

    /// Set token address
    pub fn with_token(mut self, token: Address) -> Self {
        self.token = Some(token);
        self
    }

    /// Set realm address
    pub fn with_realm(mut self, realm: Address) -> Self {
        self.realm = Some(realm);
        self
    }

    /// Set amounts
    pub fn with_amount(mut self, amount: u128, amount_in_ref_currency: u128) -> Self {
        self.amount = amount;
        self.amount_in_ref_currency = amount_in_ref_currency;
        self
    }

    /// Set the allow-not-found flag
    pub fn with_allow_not_found(mut self, allow: bool) -> Self {
        self.allow_not_found = allow;
        self
    }

    /// Set trusted intermediaries
    pub fn with_trusted_intermediaries(mut self, intermediaries: Vec<Address>) -> Self {
        self.trusted_intermediaries = intermediaries;
        self
    }
}
