//! Shared data structures for the NFT invoicer contract.
//!
//! An [`Invoice`] moves through a strict forward-only lifecycle:
//!
//! ```text
//! Created ──► Verified ──► Minted ──► Paid
//! ```
//!
//! Signature sub-progress between `Created` and `Verified` is tracked by the
//! three [`SignatureSlot`] fields rather than extra states; the
//! transition to `Verified` fires inside whichever sign call lands the third
//! valid signature, so a fully-signed invoice can never sit stuck in
//! `Created`.

use soroban_sdk::{contracttype, Address, BytesN, String};

/// Lifecycle state of an invoice. Transitions are monotonic; no state is
/// ever skipped or revisited.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum InvoiceState {
    /// Collecting signatures.
    Created,
    /// All three signatures present and individually valid.
    Verified,
    /// Certificate minted with metadata attached.
    Minted,
    /// Settled in full. Terminal.
    Paid,
}

/// The three signing roles. The role tag is bound into the signing payload
/// so a signature collected for one role cannot be replayed against another.
#[contracttype]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum SignerRole {
    Invoicer,
    Payer,
    Validator,
}

/// Uncompressed secp256k1 public keys expected to sign each role, fixed at
/// creation. Snapshotting them on the invoice keeps later configuration
/// changes from retroactively affecting verification.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SignerKeys {
    pub invoicer: BytesN<65>,
    pub payer: BytesN<65>,
    pub validator: BytesN<65>,
}

impl SignerKeys {
    pub fn for_role(&self, role: SignerRole) -> BytesN<65> {
        match role {
            SignerRole::Invoicer => self.invoicer.clone(),
            SignerRole::Payer => self.payer.clone(),
            SignerRole::Validator => self.validator.clone(),
        }
    }
}

/// A recorded attestation: the 64-byte recoverable ECDSA signature plus its
/// recovery id, exactly as submitted.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RoleSignature {
    pub signature: BytesN<64>,
    pub recovery_id: u32,
}

/// A role's signature slot on the invoice: empty until that role signs,
/// filled at most once before verification.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SignatureSlot {
    Absent,
    Signed(RoleSignature),
}

/// Full on-chain invoice record.
///
/// All fields other than the signature slots, `state`, `uri` and
/// `certificate_owner` are immutable after creation; the signing payload is
/// derived from the immutable fields only, so a stored signature remains
/// valid for the life of the invoice.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Invoice {
    /// Unique identifier, allocated from a monotonic counter. Never reused.
    pub id: u64,
    /// Amount owed, in the settlement token's smallest unit. Always > 0.
    pub amount: i128,
    /// Informational due date (ledger timestamp). Not enforced at settlement.
    pub due_date: u64,
    /// Auxiliary amount owed to the validator. Recorded, not disbursed.
    pub fee: i128,
    /// Party that created the invoice and is owed payment.
    pub invoicer: Address,
    /// Party obligated to pay.
    pub payer: Address,
    /// Third-party attestor.
    pub validator: Address,
    /// Expected signing keys, one per role.
    pub keys: SignerKeys,
    pub invoicer_signature: SignatureSlot,
    pub payer_signature: SignatureSlot,
    pub validator_signature: SignatureSlot,
    pub state: InvoiceState,
    /// Metadata reference, set only at minting.
    pub uri: Option<String>,
    /// Owner of the minted certificate; the invoicer at mint time.
    pub certificate_owner: Option<Address>,
}

impl Invoice {
    pub fn signature(&self, role: SignerRole) -> Option<RoleSignature> {
        let slot = match role {
            SignerRole::Invoicer => &self.invoicer_signature,
            SignerRole::Payer => &self.payer_signature,
            SignerRole::Validator => &self.validator_signature,
        };
        match slot {
            SignatureSlot::Absent => None,
            SignatureSlot::Signed(sig) => Some(sig.clone()),
        }
    }

    pub fn set_signature(&mut self, role: SignerRole, sig: RoleSignature) {
        let slot = SignatureSlot::Signed(sig);
        match role {
            SignerRole::Invoicer => self.invoicer_signature = slot,
            SignerRole::Payer => self.payer_signature = slot,
            SignerRole::Validator => self.validator_signature = slot,
        }
    }

    pub fn fully_signed(&self) -> bool {
        self.invoicer_signature != SignatureSlot::Absent
            && self.payer_signature != SignatureSlot::Absent
            && self.validator_signature != SignatureSlot::Absent
    }
}
