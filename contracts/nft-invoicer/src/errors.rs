use soroban_sdk::contracterror;

/// Typed error codes surfaced to the caller layer.
///
/// Every failing entry point returns one of these; the host reverts all
/// state on error, so a failed call has no partial effect. There is no
/// `AlreadyExists` variant: invoice ids are allocated from a monotonic
/// counter, so a collision has no reachable path.
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum ContractError {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    /// Caller lacks the required owner / whitelist / ownership standing.
    Unauthorized = 3,
    InvoiceNotFound = 4,
    MarkNotFound = 5,
    InvalidAmount = 6,
    InvalidFee = 7,
    InvalidUri = 8,
    /// Operation attempted outside the required lifecycle state.
    InvalidState = 9,
    /// Signature does not recover to the expected signer for the role.
    InvalidSignature = 10,
    /// A different signature was already recorded for this role.
    AlreadySigned = 11,
    /// Tendered value does not equal the invoice amount exactly.
    InsufficientPayment = 12,
}
