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

//! Secret Key & Expanded Secret Key generation

use core::fmt::Debug;
use rand::{CryptoRng, RngCore};
use subtle::{Choice, ConstantTimeEq};
use zeroize::Zeroize;

use crate::errors::CosiError;
use crate::suite::Suite;

/// A raw private scalar.
///
/// The raw scalar is only ever hashed: every group operation works on the
/// `ExpandedSecretKey` derived from it.
pub struct SecretKey<S: Suite>(pub(crate) S::Scalar);

impl<S: Suite> Clone for SecretKey<S> {
    fn clone(&self) -> Self {
        SecretKey(self.0)
    }
}

impl<S: Suite> Debug for SecretKey<S> {
    fn fmt(&self, f: &mut ::core::fmt::Formatter) -> ::core::fmt::Result {
        write!(f, "SecretKey( .. )")
    }
}

impl<S: Suite> Eq for SecretKey<S> {}
impl<S: Suite> PartialEq for SecretKey<S> {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).unwrap_u8() == 1u8
    }
}

impl<S: Suite> ConstantTimeEq for SecretKey<S> {
    fn ct_eq(&self, other: &Self) -> Choice {
        let suite = S::default();
        let mut ours = suite.scalar_to_bytes(&self.0);
        let mut theirs = suite.scalar_to_bytes(&other.0);
        let equal = ours[..].ct_eq(&theirs[..]);
        ours.zeroize();
        theirs.zeroize();
        equal
    }
}

impl<S: Suite> Zeroize for SecretKey<S> {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

/// Overwrite secret key material with null bytes when it goes out of scope.
impl<S: Suite> Drop for SecretKey<S> {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl<S: Suite> SecretKey<S> {
    const DESCRIPTION: &'static str = "A raw CoSi private scalar in its canonical encoding.";

    /// Generate a `SecretKey` from a `csprng`, uniformly over the scalar field.
    pub fn generate<R>(suite: &S, csprng: &mut R) -> SecretKey<S>
    where
        R: CryptoRng + RngCore,
    {
        SecretKey(suite.random_scalar(csprng))
    }

    /// Convert this secret key to its canonical encoding.
    #[inline]
    pub fn to_bytes(&self, suite: &S) -> Vec<u8> {
        suite.scalar_to_bytes(&self.0)
    }

    /// Construct a `SecretKey` from a canonical scalar encoding.
    ///
    /// # Returns
    ///
    /// A `Result` whose okay value is a `SecretKey` or whose error value
    /// is a `CosiError::Decode` when the bytes are not a canonical scalar.
    #[inline]
    pub fn from_bytes(suite: &S, bytes: &[u8]) -> Result<SecretKey<S>, CosiError> {
        Ok(SecretKey(suite.scalar_from_bytes(bytes)?))
    }

    /// Wrap a raw private scalar.
    pub fn from_scalar(s: S::Scalar) -> SecretKey<S> {
        SecretKey(s)
    }

    /// Derive the signing scalar used in every group operation.
    pub fn expand(&self, suite: &S) -> ExpandedSecretKey<S> {
        ExpandedSecretKey(suite.expand(&self.0))
    }
}

serde_boilerplate!(SecretKey);

/// The signing scalar derived from a `SecretKey` by hash-and-clamp.
///
/// Public keys and responses are computed from this value only.
pub struct ExpandedSecretKey<S: Suite>(pub(crate) S::Scalar);

impl<S: Suite> Debug for ExpandedSecretKey<S> {
    fn fmt(&self, f: &mut ::core::fmt::Formatter) -> ::core::fmt::Result {
        write!(f, "ExpandedSecretKey( .. )")
    }
}

impl<S: Suite> Zeroize for ExpandedSecretKey<S> {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

impl<S: Suite> Drop for ExpandedSecretKey<S> {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl<S: Suite> ExpandedSecretKey<S> {
    /// View the signing scalar.
    pub fn as_scalar(&self) -> &S::Scalar {
        &self.0
    }
}

impl<S: Suite> From<&SecretKey<S>> for ExpandedSecretKey<S> {
    fn from(secret: &SecretKey<S>) -> ExpandedSecretKey<S> {
        secret.expand(&S::default())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::suite::Ed25519;
    use rand::SeedableRng;
    use rand_chacha::ChaChaRng;

    #[test]
    fn expansion_is_deterministic() {
        let suite = Ed25519::default();
        let mut csprng = ChaChaRng::from_seed([4u8; 32]);

        for _ in 0..8 {
            let secret = SecretKey::generate(&suite, &mut csprng);
            let again = SecretKey::<Ed25519>::from_bytes(&suite, &secret.to_bytes(&suite)).unwrap();

            assert_eq!(secret, again);
            assert_eq!(secret.expand(&suite).as_scalar(), again.expand(&suite).as_scalar());
        }
    }

    #[test]
    fn expansion_known_answer() {
        let suite = Ed25519::default();
        let one = hex::decode("0100000000000000000000000000000000000000000000000000000000000000").unwrap();
        let secret = SecretKey::<Ed25519>::from_bytes(&suite, &one).unwrap();

        assert_eq!(
            hex::encode(suite.scalar_to_bytes(secret.expand(&suite).as_scalar())),
            "27e9588d489381d4be5e809feb020347d7a0c5750df914b253a1fb7a8af66d0b"
        );
    }

    #[test]
    fn secret_key_zeroize() {
        let suite = Ed25519::default();
        let mut secret = SecretKey::generate(&suite, &mut ChaChaRng::from_seed([5u8; 32]));
        secret.zeroize();

        assert_eq!(secret.to_bytes(&suite), vec![0u8; 32]);
    }

    #[test]
    fn reject_unreduced_secret() {
        let suite = Ed25519::default();
        assert!(SecretKey::<Ed25519>::from_bytes(&suite, &[0xffu8; 32]).is_err());
    }
}
