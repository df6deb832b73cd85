//! Storage layout and access helpers.
//!
//! All ledger access in the contract goes through this module; entry points
//! never touch raw keys. Invoices, whitelist entries and derogatory marks
//! live in **persistent** storage with TTLs extended on every read and
//! write; the owner, settlement token, validator reference and the invoice
//! id counter live in **instance** storage.

use soroban_sdk::{contracttype, Address, Env};

use crate::errors::ContractError;
use crate::types::Invoice;

// TTL budget, at ~5-second ledger close times:
//   MIN_TTL  = 17 280 ledgers ≈ 1 day  (extend when remaining TTL falls below)
//   BUMP_TTL = 518 400 ledgers ≈ 30 days (target TTL after extension)
const MIN_TTL: u32 = 17_280;
const BUMP_TTL: u32 = 518_400;

/// All keys used in this contract's instance and persistent storage.
#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    /// Contract owner [`Address`], instance storage.
    Owner,
    /// Token contract used by `pay_invoice` transfers, instance storage.
    SettlementToken,
    /// Reference to the validation logic in force, instance storage.
    ValidatorContract,
    /// Highest invoice id issued so far, instance storage.
    InvoiceCount,
    /// An [`Invoice`] keyed by id, persistent storage.
    Invoice(u64),
    /// Whitelist membership flag per principal, persistent storage.
    Whitelisted(Address),
    /// Derogatory mark issued/revoked flag per id, persistent storage.
    Mark(u64),
}

fn bump_instance(env: &Env) {
    env.storage().instance().extend_ttl(MIN_TTL, BUMP_TTL);
}

// Owner / configuration (instance storage)

pub fn has_owner(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Owner)
}

pub fn get_owner(env: &Env) -> Result<Address, ContractError> {
    env.storage()
        .instance()
        .get(&DataKey::Owner)
        .ok_or(ContractError::NotInitialized)
}

pub fn set_owner(env: &Env, owner: &Address) {
    env.storage().instance().set(&DataKey::Owner, owner);
    bump_instance(env);
}

pub fn get_settlement_token(env: &Env) -> Result<Address, ContractError> {
    env.storage()
        .instance()
        .get(&DataKey::SettlementToken)
        .ok_or(ContractError::NotInitialized)
}

pub fn set_settlement_token(env: &Env, token: &Address) {
    env.storage().instance().set(&DataKey::SettlementToken, token);
    bump_instance(env);
}

pub fn get_validator_contract(env: &Env) -> Option<Address> {
    env.storage().instance().get(&DataKey::ValidatorContract)
}

pub fn set_validator_contract(env: &Env, validator: &Address) {
    env.storage()
        .instance()
        .set(&DataKey::ValidatorContract, validator);
    bump_instance(env);
}

// Invoice id counter (instance storage)

pub fn get_invoice_count(env: &Env) -> u64 {
    env.storage()
        .instance()
        .get(&DataKey::InvoiceCount)
        .unwrap_or(0u64)
}

/// Allocate the next invoice id. Ids start at 1 and are never reused.
pub fn next_invoice_id(env: &Env) -> u64 {
    let id = get_invoice_count(env) + 1;
    env.storage().instance().set(&DataKey::InvoiceCount, &id);
    bump_instance(env);
    id
}

// Invoices (persistent storage)

pub fn get_invoice(env: &Env, id: u64) -> Result<Invoice, ContractError> {
    let key = DataKey::Invoice(id);
    let invoice: Option<Invoice> = env.storage().persistent().get(&key);
    match invoice {
        Some(inv) => {
            env.storage()
                .persistent()
                .extend_ttl(&key, MIN_TTL, BUMP_TTL);
            Ok(inv)
        }
        None => Err(ContractError::InvoiceNotFound),
    }
}

pub fn set_invoice(env: &Env, invoice: &Invoice) {
    let key = DataKey::Invoice(invoice.id);
    env.storage().persistent().set(&key, invoice);
    env.storage()
        .persistent()
        .extend_ttl(&key, MIN_TTL, BUMP_TTL);
}

// Whitelist (persistent storage)

pub fn is_whitelisted(env: &Env, account: &Address) -> bool {
    env.storage()
        .persistent()
        .get(&DataKey::Whitelisted(account.clone()))
        .unwrap_or(false)
}

pub fn set_whitelisted(env: &Env, account: &Address) {
    let key = DataKey::Whitelisted(account.clone());
    env.storage().persistent().set(&key, &true);
    env.storage()
        .persistent()
        .extend_ttl(&key, MIN_TTL, BUMP_TTL);
}

pub fn remove_whitelisted(env: &Env, account: &Address) {
    env.storage()
        .persistent()
        .remove(&DataKey::Whitelisted(account.clone()));
}

// Derogatory marks (persistent storage)

pub fn has_mark_record(env: &Env, id: u64) -> bool {
    env.storage().persistent().has(&DataKey::Mark(id))
}

pub fn get_mark(env: &Env, id: u64) -> bool {
    env.storage()
        .persistent()
        .get(&DataKey::Mark(id))
        .unwrap_or(false)
}

pub fn set_mark(env: &Env, id: u64, issued: bool) {
    let key = DataKey::Mark(id);
    env.storage().persistent().set(&key, &issued);
    env.storage()
        .persistent()
        .extend_ttl(&key, MIN_TTL, BUMP_TTL);
}
