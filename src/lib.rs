// Copyright 2019 Stichting Organism
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//
// Collective Schnorr signatures over Edwards25519
//

//Useful links:
//https://arxiv.org/abs/1503.08768
//https://github.com/dedis/kyber/tree/master/sign/cosi
//https://tools.ietf.org/html/rfc8032

//! A group of participants with a fixed, ordered list of public keys jointly
//! produces one compact Schnorr signature, along with a bit mask recording who
//! took part. Anyone holding the list can verify it and decide, through a
//! `Policy`, whether enough participants signed.
//!
//! ```
//! use cosi::*;
//! use rand::rngs::OsRng;
//!
//! let suite = Ed25519::default();
//! let message = b"Hello World";
//!
//! let keypairs: Vec<Keypair<Ed25519>> = (0..3).map(|_| Keypair::generate(&suite, &mut OsRng)).collect();
//! let participants = Participants::new(keypairs.iter().map(|k| k.public).collect()).unwrap();
//!
//! // stage 1: everybody commits
//! let mut nonces = Vec::new();
//! let mut commitments = Vec::new();
//! let mut masks = Vec::new();
//! for keypair in keypairs.iter() {
//!     let (nonce, commitment) = commit(&suite, &mut OsRng);
//!     nonces.push(nonce);
//!     commitments.push(commitment);
//!     masks.push(participants.own_mask(Some(&keypair.public)).unwrap());
//! }
//! let (aggregate_commitment, mask) = aggregate_commitments(&suite, &commitments, &masks).unwrap();
//!
//! // stage 2: one challenge for everybody
//! let aggregate_public = participants.aggregate_public(&suite, &mask).unwrap();
//! let c = challenge(&suite, &aggregate_commitment, &aggregate_public, message).unwrap();
//!
//! // stage 3: respond and sum
//! let responses: Vec<_> = keypairs
//!     .iter()
//!     .zip(nonces)
//!     .map(|(keypair, nonce)| response(&keypair.expanded(&suite), nonce, &c))
//!     .collect();
//! let aggregate_response = aggregate_responses(&suite, &responses).unwrap();
//!
//! let signature = sign(aggregate_commitment, aggregate_response, mask);
//! assert!(verify(&suite, &participants, message, &signature, None).is_ok());
//! ```

#[macro_use]
mod ser;

mod errors;
pub use errors::CosiError;
pub mod suite;
pub mod keys;
pub mod mask;
pub mod policy;
pub mod protocol;
pub mod signature;

// Export everything public in cosi.
pub use crate::suite::{
    Suite,
    Ed25519,
    Ed25519Suite
};

pub use crate::keys::*;

pub use crate::mask::{
    mask_len,
    Mask,
    Participants
};

pub use crate::policy::{
    Policy,
    CompletePolicy,
    ThresholdPolicy,
    MajorityPolicy,
    AnyPolicy
};

pub use crate::protocol::{
    Nonce,
    commit,
    aggregate_commitments,
    challenge,
    response,
    verify_response,
    aggregate_responses,
    Cosigner,
    SessionState
};

pub use crate::signature::{
    Signature,
    SIGNATURE_LENGTH,
    sign,
    verify,
    verify_bytes
};
