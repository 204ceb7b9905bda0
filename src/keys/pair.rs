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

//! Participant key pairs

use crate::errors::CosiError;
use crate::keys::{ExpandedSecretKey, PublicKey, SecretKey};
use crate::suite::Suite;
use rand::{CryptoRng, RngCore};
use zeroize::Zeroize;

/// A participant's key pair. Generated once, reused across signing sessions.
#[derive(Debug, Clone)]
pub struct Keypair<S: Suite> {
    /// The secret half of this keypair.
    pub secret: SecretKey<S>,
    /// The public half of this keypair.
    pub public: PublicKey<S>,
}

impl<S: Suite> Zeroize for Keypair<S> {
    fn zeroize(&mut self) {
        self.secret.zeroize();
    }
}

impl<S: Suite> Keypair<S> {
    /// Generate a keypair.
    ///
    /// # Example
    ///
    /// ```
    /// use cosi::{Ed25519, Keypair, PublicKey};
    /// use rand::rngs::OsRng;
    ///
    /// let suite = Ed25519::default();
    /// let keypair = Keypair::generate(&suite, &mut OsRng);
    ///
    /// assert_eq!(keypair.public, PublicKey::from_secret(&suite, &keypair.secret));
    /// ```
    pub fn generate<R>(suite: &S, csprng: &mut R) -> Keypair<S>
    where
        R: CryptoRng + RngCore,
    {
        Self::from_secret(suite, SecretKey::generate(suite, csprng))
    }

    /// Derive the `PublicKey` corresponding to `secret`.
    pub fn from_secret(suite: &S, secret: SecretKey<S>) -> Keypair<S> {
        let public = PublicKey::from_secret(suite, &secret);
        Keypair { secret, public }
    }

    /// Construct a `Keypair` from the encoding of its secret scalar.
    pub fn from_bytes(suite: &S, bytes: &[u8]) -> Result<Keypair<S>, CosiError> {
        Ok(Self::from_secret(suite, SecretKey::from_bytes(suite, bytes)?))
    }

    /// The signing scalar of this keypair.
    pub fn expanded(&self, suite: &S) -> ExpandedSecretKey<S> {
        self.secret.expand(suite)
    }
}
