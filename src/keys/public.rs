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

//! Public Key generation

use crate::errors::CosiError;
use crate::keys::{ExpandedSecretKey, SecretKey};
use crate::suite::Suite;
use std::fmt::Debug;

/// A participant's public key, `expand(secret) * B`.
pub struct PublicKey<S: Suite>(pub(crate) S::Point);

impl<S: Suite> Copy for PublicKey<S> {}

impl<S: Suite> Clone for PublicKey<S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S: Suite> Debug for PublicKey<S> {
    fn fmt(&self, f: &mut ::core::fmt::Formatter) -> ::core::fmt::Result {
        write!(f, "PublicKey( {:?} )", self.0)
    }
}

impl<S: Suite> PublicKey<S> {
    const DESCRIPTION: &'static str = "A CoSi public key as a compressed curve point.";

    /// Access the point form
    pub fn as_point(&self) -> &S::Point {
        &self.0
    }

    /// Extract the point form
    pub fn into_point(self) -> S::Point {
        self.0
    }

    /// Wrap a group element.
    pub fn from_point(point: S::Point) -> PublicKey<S> {
        PublicKey(point)
    }

    /// Convert this public key to its canonical encoding.
    #[inline]
    pub fn to_bytes(&self, suite: &S) -> Vec<u8> {
        suite.point_to_bytes(&self.0)
    }

    /// Construct a `PublicKey` from a canonical point encoding.
    ///
    /// # Returns
    ///
    /// A `Result` whose okay value is a `PublicKey` or whose error value
    /// is a `CosiError::Decode` for off-curve or non-canonical bytes.
    #[inline]
    pub fn from_bytes(suite: &S, bytes: &[u8]) -> Result<PublicKey<S>, CosiError> {
        Ok(PublicKey(suite.point_from_bytes(bytes)?))
    }

    /// Derive this public key from its corresponding `SecretKey`.
    pub fn from_secret(suite: &S, secret_key: &SecretKey<S>) -> PublicKey<S> {
        Self::from_expanded(suite, &secret_key.expand(suite))
    }

    /// Derive this public key from an already expanded secret.
    pub fn from_expanded(suite: &S, expanded: &ExpandedSecretKey<S>) -> PublicKey<S> {
        PublicKey(suite.base_mul(expanded.as_scalar()))
    }
}

impl<S: Suite> From<&SecretKey<S>> for PublicKey<S> {
    fn from(source: &SecretKey<S>) -> PublicKey<S> {
        PublicKey::from_secret(&S::default(), source)
    }
}

impl<S: Suite> PartialEq for PublicKey<S> {
    fn eq(&self, other: &PublicKey<S>) -> bool {
        self.0 == other.0
    }
}

impl<S: Suite> Eq for PublicKey<S> {}

serde_boilerplate!(PublicKey);
