/*
[INPUT]:  API key, secret key, passphrase, key version
[OUTPUT]: Request signers and signed KC-API-* headers
[POS]:    Auth layer - credential handling and request signing
[UPDATE]: When adding key versions or changing the signing scheme
*/

pub mod credentials;
pub mod signer;

pub use credentials::{ApiKeyVersion, Credentials};
pub use signer::{
    encrypt_passphrase, sign, signer_for, RequestSigner, SignedHeaders, SignerV1, SignerV2,
};
