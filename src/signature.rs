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

//! Collective signature assembly and verification

use std::fmt::Debug;
use tracing::{debug, warn};

use crate::protocol::challenge;
use crate::errors::CosiError;
use crate::mask::{mask_len, Mask, Participants};
use crate::policy::{CompletePolicy, Policy};
use crate::suite::Suite;

/// The length of a full-group collective signature, in bytes.
pub const SIGNATURE_LENGTH: usize = 64;

/// A collective Schnorr signature.
///
/// # Note
///
/// These signatures are "detached", they do **not** include a copy of the
/// message which has been signed. The mask tells the verifier which subset
/// of the static participant list took part.
#[allow(non_snake_case)]
pub struct Signature<S: Suite> {
    /// `V` is the sum of the commitments of the participants in `mask`.
    pub(crate) V: S::Point,

    /// `r` is the sum of the responses `r_i = v_i + c * x_i`, where
    /// `c = HASH(V, A, message)` and `A` is the aggregate public key of `mask`.
    pub(crate) r: S::Scalar,

    /// Participants included in `V`, `r` and `A`.
    pub(crate) mask: Mask,
}

impl<S: Suite> Clone for Signature<S> {
    fn clone(&self) -> Self {
        Signature {
            V: self.V,
            r: self.r,
            mask: self.mask.clone(),
        }
    }
}

impl<S: Suite> PartialEq for Signature<S> {
    fn eq(&self, other: &Self) -> bool {
        self.V == other.V && self.r == other.r && self.mask == other.mask
    }
}

impl<S: Suite> Eq for Signature<S> {}

impl<S: Suite> Debug for Signature<S> {
    fn fmt(&self, f: &mut ::core::fmt::Formatter) -> ::core::fmt::Result {
        write!(
            f,
            "Signature( V: {:?}, r: {:?}, mask: {:?} )",
            &self.V, &self.r, &self.mask
        )
    }
}

/// Bundle the aggregate commitment, aggregate response and final mask.
pub fn sign<S: Suite>(aggregate_commitment: S::Point, aggregate_response: S::Scalar, mask: Mask) -> Signature<S> {
    Signature {
        V: aggregate_commitment,
        r: aggregate_response,
        mask,
    }
}

impl<S: Suite> Signature<S> {
    /// The aggregate commitment.
    pub fn commitment(&self) -> &S::Point {
        &self.V
    }

    /// The aggregate response.
    pub fn response(&self) -> &S::Scalar {
        &self.r
    }

    /// The participation mask.
    pub fn mask(&self) -> &Mask {
        &self.mask
    }

    /// Encode as `V || r`, followed by the mask bytes unless every
    /// participant signed.
    ///
    /// A full-group signature under the `Ed25519` suite is a standard Ed25519
    /// signature for the aggregate public key.
    pub fn to_bytes(&self, suite: &S) -> Vec<u8> {
        let mut bytes = suite.point_to_bytes(&self.V);
        bytes.extend_from_slice(&suite.scalar_to_bytes(&self.r));
        if !self.mask.is_full() {
            bytes.extend_from_slice(self.mask.as_bytes());
        }
        bytes
    }

    /// Decode a signature over a list of `participants` participants.
    ///
    /// Without trailing mask bytes every participant is taken to have signed.
    /// Any failure is reported as `MalformedSignature`.
    #[allow(non_snake_case)]
    pub fn from_bytes(suite: &S, bytes: &[u8], participants: usize) -> Result<Signature<S>, CosiError> {
        let point_len = suite.point_len();
        let scalar_len = suite.scalar_len();
        let compact = point_len + scalar_len;

        let mask = if bytes.len() == compact {
            Mask::full(participants)
        } else if bytes.len() == compact + mask_len(participants) {
            Mask::from_bytes(participants, &bytes[compact..])
                .map_err(|_| CosiError::MalformedSignature("mask"))?
        } else {
            return Err(CosiError::MalformedSignature("unexpected length"));
        };

        let V = suite
            .point_from_bytes(&bytes[..point_len])
            .map_err(|_| CosiError::MalformedSignature("commitment"))?;
        let r = suite
            .scalar_from_bytes(&bytes[point_len..compact])
            .map_err(|_| CosiError::MalformedSignature("response"))?;

        Ok(Signature { V, r, mask })
    }
}

/// Verify a collective signature against the ordered participant list.
///
/// Rebuilds the aggregate public key `A` from the signature mask, derives
/// `c = H(V || A || message)` and checks `r * B - c * A == V`. Only then is the
/// policy consulted, `None` meaning every participant must have signed.
///
/// # Return
///
/// `SignatureInvalid` when the equation fails or the masked aggregate key
/// has small order (nobody in the mask included),
/// `PolicyRejected` when the signature is authentic but the policy is not met.
pub fn verify<S: Suite>(
    suite: &S,
    participants: &Participants<S>,
    message: &[u8],
    signature: &Signature<S>,
    policy: Option<&dyn Policy>,
) -> Result<(), CosiError> {
    let mask = signature.mask();
    let aggregate_public = participants.aggregate_public(suite, mask)?;

    // with A of small order c * A takes at most 8 values, forgeable by retrying
    if suite.is_small_order(&aggregate_public) {
        warn!(
            signers = mask.count_enabled(),
            participants = participants.len(),
            "signature mask aggregates to a small order point"
        );
        return Err(CosiError::SignatureInvalid);
    }

    let c = challenge(suite, &signature.V, &aggregate_public, message)?;
    let recomputed = suite.base_mul(&signature.r) - aggregate_public * c;

    if recomputed != signature.V {
        debug!(signers = mask.count_enabled(), "recreated commitment differs from signature");
        return Err(CosiError::SignatureInvalid);
    }

    let policy = policy.unwrap_or(&CompletePolicy);
    if !policy.check(mask) {
        debug!(
            signers = mask.count_enabled(),
            participants = participants.len(),
            "participation policy not fulfilled"
        );
        return Err(CosiError::PolicyRejected {
            signed: mask.count_enabled(),
            total: participants.len(),
        });
    }

    Ok(())
}

/// Decode `bytes` with `Signature::from_bytes` and verify the result.
pub fn verify_bytes<S: Suite>(
    suite: &S,
    participants: &Participants<S>,
    message: &[u8],
    bytes: &[u8],
    policy: Option<&dyn Policy>,
) -> Result<(), CosiError> {
    let signature = Signature::from_bytes(suite, bytes, participants.len())?;
    verify(suite, participants, message, &signature, policy)
}
