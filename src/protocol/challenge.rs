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

//! Challenge derivation

use crate::errors::CosiError;
use crate::suite::Suite;

/// Derive the challenge `c = H(V || A || m)` reduced modulo the group order.
///
/// `V` is the aggregate commitment and `A` the aggregate public key under the
/// final mask. With the `Ed25519` suite this is exactly the Ed25519 challenge.
pub fn challenge<S: Suite>(
    suite: &S,
    aggregate_commitment: &S::Point,
    aggregate_public: &S::Point,
    message: &[u8],
) -> Result<S::Scalar, CosiError> {
    let commitment = suite.point_to_bytes(aggregate_commitment);
    if commitment.len() != suite.point_len() {
        return Err(CosiError::Encoding("aggregate commitment"));
    }

    let public = suite.point_to_bytes(aggregate_public);
    if public.len() != suite.point_len() {
        return Err(CosiError::Encoding("aggregate public key"));
    }

    Ok(suite.hash_to_scalar(&[commitment.as_slice(), public.as_slice(), message]))
}
