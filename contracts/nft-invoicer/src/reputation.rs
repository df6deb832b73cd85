//! Reputation registry: derogatory marks against invoices/parties.
//!
//! Marks are whitelist-gated and fully independent of the invoice state
//! machine; they may be issued before, during or after settlement and are
//! the only "undo"-able entity in the contract (revocation is a state flip
//! on the mark, not a rollback of any invoice).

use soroban_sdk::Env;

use crate::errors::ContractError;
use crate::storage;

/// Issue a mark against `id`. Re-issuing an already-issued mark is a no-op.
pub fn issue_mark(env: &Env, id: u64) {
    storage::set_mark(env, id, true);
}

/// Revoke the mark for `id`. Fails with `MarkNotFound` if no mark was ever
/// issued for `id`; revoking an already-revoked mark is a no-op.
pub fn revoke_mark(env: &Env, id: u64) -> Result<(), ContractError> {
    if !storage::has_mark_record(env, id) {
        return Err(ContractError::MarkNotFound);
    }
    storage::set_mark(env, id, false);
    Ok(())
}

/// Return `true` if `id` currently carries an issued mark.
pub fn is_marked(env: &Env, id: u64) -> bool {
    storage::get_mark(env, id)
}
