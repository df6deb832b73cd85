//! Canonical signing payload and signature verification.
//!
//! A signer attests over the sha256 digest of the XDR encoding of
//! [`SigningPayload`]: a domain-separation tag, the invoice id, the signer's
//! role tag, and the immutable invoice fields. Binding the id and role into
//! the digest means a signature collected for one invoice or one role can
//! never be replayed against another, and any divergence between the signed
//! data and the stored invoice fails verification.
//!
//! Verification is pure recover-and-compare: the host recovers the
//! secp256k1 public key from `(digest, signature, recovery_id)` and the
//! result is compared against the role's expected key. A wrong-key or
//! wrong-payload signature recovers to a different key and is a normal
//! not-verified outcome, never a trap.

use soroban_sdk::crypto::Hash;
use soroban_sdk::xdr::ToXdr;
use soroban_sdk::{contracttype, Address, Bytes, BytesN, Env, Symbol};

use crate::types::{Invoice, SignerRole};

/// Domain-separation tag; bumping it invalidates all previously collected
/// signatures.
const PAYLOAD_TAG: &str = "nft_invoicer_sign_v1";

/// The exact structure a signer commits to. XDR-encoded, then hashed.
#[contracttype]
#[derive(Clone)]
struct SigningPayload {
    tag: Symbol,
    invoice_id: u64,
    role: SignerRole,
    amount: i128,
    due_date: u64,
    fee: i128,
    invoicer: Address,
    payer: Address,
    validator: Address,
}

/// Derive the digest a signer of `role` must sign for `invoice`.
pub fn signing_digest(env: &Env, invoice: &Invoice, role: SignerRole) -> Hash<32> {
    let payload = SigningPayload {
        tag: Symbol::new(env, PAYLOAD_TAG),
        invoice_id: invoice.id,
        role,
        amount: invoice.amount,
        due_date: invoice.due_date,
        fee: invoice.fee,
        invoicer: invoice.invoicer.clone(),
        payer: invoice.payer.clone(),
        validator: invoice.validator.clone(),
    };
    let bytes: Bytes = payload.to_xdr(env);
    env.crypto().sha256(&bytes)
}

/// The secp256k1 group order, big-endian. Both signature scalars must be
/// nonzero and below it for recovery to be defined.
const CURVE_ORDER: [u8; 32] = [
    0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
    0xfe, 0xba, 0xae, 0xdc, 0xe6, 0xaf, 0x48, 0xa0, 0x3b, 0xbf, 0xd2, 0x5e, 0x8c, 0xd0, 0x36,
    0x41, 0x41,
];

/// Big-endian range check: `0 < scalar < CURVE_ORDER`. Equal-length
/// big-endian byte slices compare numerically under lexicographic order.
fn scalar_in_range(scalar: &[u8]) -> bool {
    scalar.iter().any(|b| *b != 0) && *scalar < CURVE_ORDER[..]
}

/// Return `true` iff `signature` over `digest` recovers to `expected_signer`.
///
/// Deterministic and side-effect free. Malformed input — a recovery id
/// outside the valid secp256k1 range, or a scalar pair outside the group
/// order — is a normal not-verified outcome, screened out before the host
/// recovery call so it can never trap.
pub fn verify(
    env: &Env,
    digest: &Hash<32>,
    signature: &BytesN<64>,
    recovery_id: u32,
    expected_signer: &BytesN<65>,
) -> bool {
    if recovery_id > 3 {
        return false;
    }
    let sig = signature.to_array();
    if !scalar_in_range(&sig[..32]) || !scalar_in_range(&sig[32..]) {
        return false;
    }
    let recovered = env
        .crypto()
        .secp256k1_recover(digest, signature, recovery_id);
    recovered == *expected_signer
}
