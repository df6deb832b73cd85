//! Soroban event helpers, one per observable fact.
//!
//! Topics carry the event symbol plus the invoice/mark id so indexers can
//! filter without decoding the data payload.

use soroban_sdk::{Address, Env, String, Symbol};

use crate::types::SignerRole;

pub fn emit_invoice_created(env: &Env, id: u64, invoicer: Address, amount: i128) {
    let topics = (Symbol::new(env, "invoice_created"), id);
    env.events().publish(topics, (invoicer, amount));
}

pub fn emit_invoice_signed(env: &Env, id: u64, role: SignerRole) {
    let topics = (Symbol::new(env, "invoice_signed"), id);
    env.events().publish(topics, role);
}

pub fn emit_invoice_verified(env: &Env, id: u64) {
    let topics = (Symbol::new(env, "invoice_verified"), id);
    env.events().publish(topics, ());
}

pub fn emit_invoice_minted(env: &Env, id: u64, owner: Address, uri: String) {
    let topics = (Symbol::new(env, "invoice_minted"), id);
    env.events().publish(topics, (owner, uri));
}

pub fn emit_invoice_paid(env: &Env, id: u64, payer: Address, amount: i128) {
    let topics = (Symbol::new(env, "invoice_paid"), id);
    env.events().publish(topics, (payer, amount));
}

pub fn emit_certificate_transferred(env: &Env, id: u64, from: Address, to: Address) {
    let topics = (Symbol::new(env, "cert_transferred"), id);
    env.events().publish(topics, (from, to));
}

pub fn emit_validator_contract_updated(env: &Env, validator: Address) {
    let topics = (Symbol::new(env, "validator_updated"),);
    env.events().publish(topics, validator);
}

pub fn emit_mark_issued(env: &Env, id: u64, issuer: Address) {
    let topics = (Symbol::new(env, "mark_issued"), id);
    env.events().publish(topics, issuer);
}

pub fn emit_mark_revoked(env: &Env, id: u64, issuer: Address) {
    let topics = (Symbol::new(env, "mark_revoked"), id);
    env.events().publish(topics, issuer);
}
