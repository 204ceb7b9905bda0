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

//! Responses, the third stage of CoSi

use tracing::debug;

use crate::protocol::Nonce;
use crate::errors::CosiError;
use crate::keys::{ExpandedSecretKey, PublicKey};
use crate::suite::Suite;

/// Compute the response `r = v + c * x` for expanded secret `x`.
///
/// The nonce is consumed, a second response with the same `v` cannot be made.
pub fn response<S: Suite>(
    secret: &ExpandedSecretKey<S>,
    nonce: Nonce<S>,
    challenge: &S::Scalar,
) -> S::Scalar {
    *nonce.as_scalar() + *challenge * *secret.as_scalar()
}

/// Check a single participant's response against its commitment:
/// `r * B - c * X == V`.
pub fn verify_response<S: Suite>(
    suite: &S,
    public: &PublicKey<S>,
    commitment: &S::Point,
    challenge: &S::Scalar,
    response: &S::Scalar,
) -> Result<(), CosiError> {
    let recomputed = suite.base_mul(response) - public.into_point() * *challenge;

    if recomputed != *commitment {
        return Err(CosiError::SignatureInvalid);
    }
    Ok(())
}

/// Sum the responses of the included participants.
pub fn aggregate_responses<S: Suite>(
    suite: &S,
    responses: &[S::Scalar],
) -> Result<S::Scalar, CosiError> {
    if responses.is_empty() {
        return Err(CosiError::EmptyAggregation);
    }

    debug!(responses = responses.len(), "aggregated responses");

    Ok(responses.iter().fold(suite.zero(), |acc, r| acc + *r))
}
