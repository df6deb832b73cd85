//! Access registry: the owner-gated whitelist and the validator-contract
//! reference.
//!
//! The whitelist gates invoice creation, minting by non-invoicers and
//! reputation marking. There is no implicit self-whitelisting: the owner
//! must add its own address explicitly if it wants to create invoices.

use soroban_sdk::{Address, Env, Vec};

use crate::errors::ContractError;
use crate::storage;

/// Fail with `Unauthorized` unless `caller` is the contract owner.
pub fn require_owner(env: &Env, caller: &Address) -> Result<(), ContractError> {
    let owner = storage::get_owner(env)?;
    if *caller != owner {
        return Err(ContractError::Unauthorized);
    }
    Ok(())
}

/// Fail with `Unauthorized` unless `caller` is whitelisted.
pub fn require_whitelisted(env: &Env, caller: &Address) -> Result<(), ContractError> {
    if !storage::is_whitelisted(env, caller) {
        return Err(ContractError::Unauthorized);
    }
    Ok(())
}

pub fn is_whitelisted(env: &Env, account: &Address) -> bool {
    storage::is_whitelisted(env, account)
}

pub fn add_address(env: &Env, caller: &Address, account: &Address) -> Result<(), ContractError> {
    require_owner(env, caller)?;
    storage::set_whitelisted(env, account);
    Ok(())
}

/// Batched add. The owner check happens once up front and the transaction
/// is atomic, so the batch is all-or-nothing; individual adds are
/// idempotent sets and cannot fail per element.
pub fn add_addresses(
    env: &Env,
    caller: &Address,
    accounts: &Vec<Address>,
) -> Result<(), ContractError> {
    require_owner(env, caller)?;
    for account in accounts.iter() {
        storage::set_whitelisted(env, &account);
    }
    Ok(())
}

pub fn remove_address(env: &Env, caller: &Address, account: &Address) -> Result<(), ContractError> {
    require_owner(env, caller)?;
    storage::remove_whitelisted(env, account);
    Ok(())
}

/// Update the validator-contract reference. Invoices snapshot their
/// validator at creation, so existing invoices are unaffected.
pub fn set_validator_contract(
    env: &Env,
    caller: &Address,
    validator: &Address,
) -> Result<(), ContractError> {
    require_owner(env, caller)?;
    storage::set_validator_contract(env, validator);
    Ok(())
}
