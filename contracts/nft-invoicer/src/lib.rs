#![no_std]

//! # NFT Invoicer Contract
//!
//! A Soroban contract managing the lifecycle of a financial invoice that
//! must be co-signed by three distinct parties — an invoicer, a payer and a
//! validator — before it can be minted as a transferable certificate and
//! settled by payment.
//!
//! ## Module layout
//! | Module          | Responsibility                                    |
//! |-----------------|---------------------------------------------------|
//! | `errors.rs`     | `#[contracterror]` typed error codes              |
//! | `types.rs`      | `Invoice`, lifecycle state, roles, signatures     |
//! | `storage.rs`    | `DataKey` layout, TTL helpers, id counter         |
//! | `verify.rs`     | canonical signing payload, recover-and-compare    |
//! | `access.rs`     | owner-gated whitelist, validator reference        |
//! | `reputation.rs` | derogatory marks                                  |
//! | `events.rs`     | Soroban event helpers                             |
//! | `lib.rs`        | contract entry points (this file)                 |
//!
//! ## Lifecycle
//! ```text
//! Created ──► Verified ──► Minted ──► Paid
//! ```
//! The `Created → Verified` transition fires automatically inside whichever
//! sign call lands the third valid signature; minting and payment are
//! explicit, each permitted exactly once, and `Paid` is terminal.
//!
//! ## Design decisions
//! - **Whitelist-gated creation:** only addresses the owner has whitelisted
//!   may create invoices; the owner itself is not implicitly whitelisted.
//! - **Signature submission is permissionless:** the recoverable signature
//!   itself is the authorization, so any relayer may submit it. The payload
//!   binds the invoice id, the role tag and the immutable invoice fields,
//!   ruling out cross-invoice and cross-role replay.
//! - **No overwrite:** once a role has signed, only the identical submission
//!   is accepted again (as a no-op); anything else is `AlreadySigned`.
//! - **Exact settlement:** `pay_invoice` accepts exactly the invoice amount,
//!   transferred in the configured settlement token to the invoicer.

use soroban_sdk::{contract, contractimpl, token, Address, BytesN, Env, String, Vec};

mod access;
mod errors;
mod events;
mod reputation;
mod storage;
mod types;
mod verify;

pub use errors::ContractError;
pub use types::{Invoice, InvoiceState, RoleSignature, SignatureSlot, SignerKeys, SignerRole};

#[contract]
pub struct NftInvoicer;

#[contractimpl]
impl NftInvoicer {
    // Lifecycle / configuration

    /// Initialise the contract: register the `owner` (the only principal
    /// allowed to mutate the whitelist and the validator reference) and the
    /// token contract used for settlement transfers.
    ///
    /// Must be called once right after deployment; repeat calls return
    /// [`ContractError::AlreadyInitialized`].
    pub fn initialize(
        env: Env,
        owner: Address,
        settlement_token: Address,
    ) -> Result<(), ContractError> {
        if storage::has_owner(&env) {
            return Err(ContractError::AlreadyInitialized);
        }
        storage::set_owner(&env, &owner);
        storage::set_settlement_token(&env, &settlement_token);
        Ok(())
    }

    /// Return the contract owner.
    pub fn owner(env: Env) -> Result<Address, ContractError> {
        storage::get_owner(&env)
    }

    /// Update the reference to the validation logic in force. Owner only.
    /// Existing invoices are unaffected: they snapshot their validator at
    /// creation.
    pub fn update_validator_contract(
        env: Env,
        caller: Address,
        validator: Address,
    ) -> Result<(), ContractError> {
        caller.require_auth();
        access::set_validator_contract(&env, &caller, &validator)?;
        events::emit_validator_contract_updated(&env, validator);
        Ok(())
    }

    /// Return the current validator-contract reference, if one was set.
    pub fn get_validator_contract(env: Env) -> Option<Address> {
        storage::get_validator_contract(&env)
    }

    // Whitelist

    /// Return `true` if `account` may create invoices and perform other
    /// whitelist-gated operations.
    pub fn is_whitelisted(env: Env, account: Address) -> bool {
        access::is_whitelisted(&env, &account)
    }

    /// Add `account` to the whitelist. Owner only; idempotent.
    pub fn add_address_to_whitelist(
        env: Env,
        caller: Address,
        account: Address,
    ) -> Result<(), ContractError> {
        caller.require_auth();
        access::add_address(&env, &caller, &account)
    }

    /// Add every address in `accounts` to the whitelist, all-or-nothing.
    /// Owner only.
    pub fn add_addresses_to_whitelist(
        env: Env,
        caller: Address,
        accounts: Vec<Address>,
    ) -> Result<(), ContractError> {
        caller.require_auth();
        access::add_addresses(&env, &caller, &accounts)
    }

    /// Remove `account` from the whitelist. Owner only; idempotent.
    pub fn remove_address_from_whitelist(
        env: Env,
        caller: Address,
        account: Address,
    ) -> Result<(), ContractError> {
        caller.require_auth();
        access::remove_address(&env, &caller, &account)
    }

    // Invoice creation

    /// Create a new invoice in state `Created` and return its id.
    ///
    /// - `invoicer` must authorise the call and be whitelisted.
    /// - `amount` must be > 0; `fee` must be ≥ 0.
    /// - `keys` are the secp256k1 public keys expected to sign each role,
    ///   snapshotted onto the invoice.
    ///
    /// Ids are allocated from a monotonic counter starting at 1 and are
    /// never reused.
    pub fn create_invoice(
        env: Env,
        invoicer: Address,
        amount: i128,
        due_date: u64,
        payer: Address,
        validator: Address,
        fee: i128,
        keys: SignerKeys,
    ) -> Result<u64, ContractError> {
        invoicer.require_auth();
        access::require_whitelisted(&env, &invoicer)?;
        if amount <= 0 {
            return Err(ContractError::InvalidAmount);
        }
        if fee < 0 {
            return Err(ContractError::InvalidFee);
        }

        let id = storage::next_invoice_id(&env);
        let invoice = Invoice {
            id,
            amount,
            due_date,
            fee,
            invoicer: invoicer.clone(),
            payer,
            validator,
            keys,
            invoicer_signature: SignatureSlot::Absent,
            payer_signature: SignatureSlot::Absent,
            validator_signature: SignatureSlot::Absent,
            state: InvoiceState::Created,
            uri: None,
            certificate_owner: None,
        };
        storage::set_invoice(&env, &invoice);
        events::emit_invoice_created(&env, id, invoicer, amount);
        Ok(id)
    }

    /// Return the full invoice record.
    pub fn get_invoice(env: Env, id: u64) -> Result<Invoice, ContractError> {
        storage::get_invoice(&env, id)
    }

    /// Return the number of invoices created so far.
    pub fn invoice_count(env: Env) -> u64 {
        storage::get_invoice_count(&env)
    }

    // Signature pipeline

    /// Return the canonical digest a signer of `role` must sign for invoice
    /// `id`. Off-chain signers fetch this rather than re-deriving the
    /// encoding themselves.
    pub fn signing_payload(
        env: Env,
        id: u64,
        role: SignerRole,
    ) -> Result<BytesN<32>, ContractError> {
        let invoice = storage::get_invoice(&env, id)?;
        Ok(verify::signing_digest(&env, &invoice, role).to_bytes())
    }

    /// Record the invoicer's signature for invoice `id`.
    ///
    /// See [`Self::sign_invoice_validator`] for the shared semantics.
    pub fn sign_invoice_invoicer(
        env: Env,
        id: u64,
        signature: BytesN<64>,
        recovery_id: u32,
    ) -> Result<(), ContractError> {
        Self::sign_invoice(&env, id, SignerRole::Invoicer, signature, recovery_id)
    }

    /// Record the payer's signature for invoice `id`.
    pub fn sign_invoice_payer(
        env: Env,
        id: u64,
        signature: BytesN<64>,
        recovery_id: u32,
    ) -> Result<(), ContractError> {
        Self::sign_invoice(&env, id, SignerRole::Payer, signature, recovery_id)
    }

    /// Record the validator's signature for invoice `id`.
    ///
    /// Shared semantics for all three sign entry points:
    /// - [`ContractError::InvoiceNotFound`] if the invoice does not exist.
    /// - [`ContractError::InvalidState`] once the invoice is `Verified` or
    ///   beyond (no late re-signing).
    /// - Resubmitting the identical signature is a no-op success; a
    ///   different one is rejected with [`ContractError::AlreadySigned`].
    /// - [`ContractError::InvalidSignature`] if the signature does not
    ///   recover to the role's expected key over the canonical payload.
    /// - Landing the third valid signature transitions the invoice to
    ///   `Verified` within the same call.
    pub fn sign_invoice_validator(
        env: Env,
        id: u64,
        signature: BytesN<64>,
        recovery_id: u32,
    ) -> Result<(), ContractError> {
        Self::sign_invoice(&env, id, SignerRole::Validator, signature, recovery_id)
    }

    /// Pure read: `true` iff all three signatures are present and each
    /// independently verifies against its expected key. Trivially `true`
    /// once the invoice is `Verified` or beyond.
    pub fn verify_signatures(env: Env, id: u64) -> Result<bool, ContractError> {
        let invoice = storage::get_invoice(&env, id)?;
        if invoice.state != InvoiceState::Created {
            return Ok(true);
        }
        Ok(Self::all_signatures_valid(&env, &invoice))
    }

    // Minting

    /// Mint the verified invoice into a transferable certificate.
    ///
    /// - `caller` must authorise the call and be whitelisted or be the
    ///   invoicer.
    /// - Fails `InvalidState` unless the invoice is exactly `Verified`, so
    ///   minting happens at most once.
    /// - Records `uri` and assigns certificate ownership to the invoicer.
    pub fn mint_the_invoice(
        env: Env,
        caller: Address,
        id: u64,
        uri: String,
    ) -> Result<(), ContractError> {
        caller.require_auth();
        if uri.len() == 0 {
            return Err(ContractError::InvalidUri);
        }
        let mut invoice = storage::get_invoice(&env, id)?;
        if invoice.state != InvoiceState::Verified {
            return Err(ContractError::InvalidState);
        }
        if !access::is_whitelisted(&env, &caller) && caller != invoice.invoicer {
            return Err(ContractError::Unauthorized);
        }

        invoice.uri = Some(uri.clone());
        invoice.certificate_owner = Some(invoice.invoicer.clone());
        invoice.state = InvoiceState::Minted;
        storage::set_invoice(&env, &invoice);
        events::emit_invoice_minted(&env, id, invoice.invoicer, uri);
        Ok(())
    }

    /// Transfer ownership of a minted certificate.
    ///
    /// `from` must authorise the call and currently own the certificate.
    /// Fails `InvalidState` before minting.
    pub fn transfer_certificate(
        env: Env,
        from: Address,
        to: Address,
        id: u64,
    ) -> Result<(), ContractError> {
        from.require_auth();
        let mut invoice = storage::get_invoice(&env, id)?;
        if matches!(invoice.state, InvoiceState::Created | InvoiceState::Verified) {
            return Err(ContractError::InvalidState);
        }
        match invoice.certificate_owner.clone() {
            Some(owner) if owner == from => {}
            _ => return Err(ContractError::Unauthorized),
        }
        invoice.certificate_owner = Some(to.clone());
        storage::set_invoice(&env, &invoice);
        events::emit_certificate_transferred(&env, id, from, to);
        Ok(())
    }

    // Settlement

    /// Settle invoice `id` by transferring exactly `amount` of the
    /// settlement token from `payer` to the invoicer.
    ///
    /// - Fails `InvalidState` unless the invoice is `Minted`; a second
    ///   payment attempt therefore fails here, and `Paid` is terminal.
    /// - Fails `InsufficientPayment` unless `amount` equals the invoice
    ///   amount exactly; overpayment is rejected rather than refunded.
    /// - Any address may tender payment; the obligated payer is recorded on
    ///   the invoice but not enforced at this gate.
    pub fn pay_invoice(
        env: Env,
        payer: Address,
        id: u64,
        amount: i128,
    ) -> Result<(), ContractError> {
        payer.require_auth();
        let mut invoice = storage::get_invoice(&env, id)?;
        if invoice.state != InvoiceState::Minted {
            return Err(ContractError::InvalidState);
        }
        if amount != invoice.amount {
            return Err(ContractError::InsufficientPayment);
        }

        let settlement_token = storage::get_settlement_token(&env)?;
        token::Client::new(&env, &settlement_token).transfer(&payer, &invoice.invoicer, &amount);

        invoice.state = InvoiceState::Paid;
        storage::set_invoice(&env, &invoice);
        events::emit_invoice_paid(&env, id, payer, amount);
        Ok(())
    }

    // Reputation

    /// Issue a derogatory mark against `id`. Whitelisted callers only;
    /// idempotent; independent of the invoice lifecycle.
    pub fn issue_derogatory_mark(env: Env, caller: Address, id: u64) -> Result<(), ContractError> {
        caller.require_auth();
        access::require_whitelisted(&env, &caller)?;
        reputation::issue_mark(&env, id);
        events::emit_mark_issued(&env, id, caller);
        Ok(())
    }

    /// Revoke the derogatory mark for `id`. Whitelisted callers only;
    /// fails `MarkNotFound` if no mark was ever issued.
    pub fn revoke_derogatory_mark(env: Env, caller: Address, id: u64) -> Result<(), ContractError> {
        caller.require_auth();
        access::require_whitelisted(&env, &caller)?;
        reputation::revoke_mark(&env, id)?;
        events::emit_mark_revoked(&env, id, caller);
        Ok(())
    }

    /// Return `true` if `id` currently carries an issued mark.
    pub fn has_derogatory_mark(env: Env, id: u64) -> bool {
        reputation::is_marked(&env, id)
    }

    // Internal helpers

    fn sign_invoice(
        env: &Env,
        id: u64,
        role: SignerRole,
        signature: BytesN<64>,
        recovery_id: u32,
    ) -> Result<(), ContractError> {
        let mut invoice = storage::get_invoice(env, id)?;
        if invoice.state != InvoiceState::Created {
            return Err(ContractError::InvalidState);
        }

        let submitted = RoleSignature {
            signature,
            recovery_id,
        };
        if let Some(existing) = invoice.signature(role) {
            if existing == submitted {
                // Idempotent replay of the identical attestation.
                return Ok(());
            }
            return Err(ContractError::AlreadySigned);
        }

        let digest = verify::signing_digest(env, &invoice, role);
        let expected = invoice.keys.for_role(role);
        if !verify::verify(env, &digest, &submitted.signature, submitted.recovery_id, &expected) {
            return Err(ContractError::InvalidSignature);
        }

        invoice.set_signature(role, submitted);
        let verified = invoice.fully_signed();
        if verified {
            invoice.state = InvoiceState::Verified;
        }
        storage::set_invoice(env, &invoice);
        events::emit_invoice_signed(env, id, role);
        if verified {
            events::emit_invoice_verified(env, id);
        }
        Ok(())
    }

    fn all_signatures_valid(env: &Env, invoice: &Invoice) -> bool {
        for role in [SignerRole::Invoicer, SignerRole::Payer, SignerRole::Validator] {
            let Some(sig) = invoice.signature(role) else {
                return false;
            };
            let digest = verify::signing_digest(env, invoice, role);
            let expected = invoice.keys.for_role(role);
            if !verify::verify(env, &digest, &sig.signature, sig.recovery_id, &expected) {
                return false;
            }
        }
        true
    }
}
