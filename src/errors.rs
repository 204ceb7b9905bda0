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

//! Errors which may occur while decoding, aggregating, signing or verifying.

use thiserror::Error;
use crate::protocol::SessionState;

/// Represents an error in key handling, aggregation, signing or verification.
#[derive(Error, Clone, Debug, Eq, PartialEq)]
pub enum CosiError {
    /// A scalar, point or mask had a malformed encoding.
    #[error("Cannot decode {name}: {reason}")]
    Decode {
        /// What was being decoded
        name: &'static str,
        /// Why it was rejected
        reason: &'static str,
    },

    /// A mask does not match the size of the participant list.
    #[error("Mask length {actual} does not match the expected {expected}")]
    MaskLengthMismatch {
        /// Length required by the participant list or reference mask
        expected: usize,
        /// Length of the offending mask
        actual: usize,
    },

    /// A participant index lies outside of the participant list.
    #[error("Participant index {index} is out of range for {participants} participants")]
    InvalidIndex {
        /// The offending index
        index: usize,
        /// Size of the participant list
        participants: usize,
    },

    /// A public key is not part of the participant list.
    #[error("Public key is not part of the participant list")]
    UnknownParticipant,

    /// A public key appears more than once in the participant list.
    #[error("Participant {index} repeats an earlier public key")]
    DuplicateParticipant {
        /// Position of the repeated key
        index: usize,
    },

    /// Commitment or mask lists could not be combined.
    #[error("Aggregation failed: {0}")]
    Aggregation(&'static str),

    /// Nothing was handed to an aggregation.
    #[error("Cannot aggregate an empty list")]
    EmptyAggregation,

    /// A value could not be serialized before hashing.
    #[error("Cannot encode {0}")]
    Encoding(&'static str),

    /// The Schnorr verification equation wasn't satisfied.
    #[error("Signature verification failed")]
    SignatureInvalid,

    /// The signature is authentic but too few participants signed.
    #[error("Participation policy rejected the signature: {signed} of {total} signed")]
    PolicyRejected {
        /// Participants enabled in the signature mask
        signed: usize,
        /// Size of the participant list
        total: usize,
    },

    /// A signature component failed to decode.
    #[error("Malformed signature: {0}")]
    MalformedSignature(&'static str),

    /// A session step was attempted out of order.
    #[error("Invalid session transition from {from:?} to {to:?}")]
    InvalidTransition {
        /// State the session was in
        from: SessionState,
        /// State the caller tried to reach
        to: SessionState,
    },

    /// The session was aborted after a protocol violation.
    #[error("Session aborted after a protocol violation")]
    SessionAborted,

    /// The participant is not part of the final mask and may not respond.
    #[error("Participant {index} is not part of the final mask")]
    ExcludedSigner {
        /// Index of the excluded participant
        index: usize,
    },
}

/// Convert `CosiError` into `::serde::de::Error` aka `SerdeError`
///
/// We should do this with `From` but right now the orphan rules prohibit
/// `impl From<CosiError> for E where E: ::serde::de::Error`.
pub(crate) fn serde_error_from_cosi_error<E>(err: CosiError) -> E
where
    E: ::serde::de::Error,
{
    E::custom(err)
}
