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

//! Cipher suites
//!
//! A `Suite` bundles everything the protocol needs from the outside world:
//! scalar and point arithmetic, their canonical encodings, hashing into the
//! scalar field and the private key expansion. The protocol code never names
//! a concrete curve, it only talks to the suite value it was handed.
//!
//! The production suite is [`Ed25519`]: the Edwards25519 curve from
//! `curve25519-dalek` together with SHA-512, which keeps full-group
//! signatures verifiable as plain Ed25519 signatures.

use core::fmt::{self, Debug};
use core::marker::PhantomData;
use core::ops::{Add, Mul, Neg, Sub};

use curve25519_dalek::{
    edwards::{CompressedEdwardsY, EdwardsPoint},
    scalar::Scalar,
    traits::{Identity, IsIdentity},
};
use rand::{CryptoRng, RngCore};
use sha2::{
    digest::{consts::U64, Digest},
    Sha512,
};
use zeroize::Zeroize;

use crate::errors::CosiError;

/// The length of an Edwards25519 scalar encoding, in bytes.
pub const SCALAR_LENGTH: usize = 32;

/// The length of a compressed Edwards25519 point, in bytes.
pub const POINT_LENGTH: usize = 32;

/// Group, encoding and hash capabilities the CoSi protocol is written against.
pub trait Suite: Clone + Debug + Default + Send + Sync + 'static {
    /// Element of the prime order scalar field.
    type Scalar: Copy
        + Debug
        + Eq
        + Send
        + Sync
        + Zeroize
        + Add<Output = Self::Scalar>
        + Sub<Output = Self::Scalar>
        + Mul<Output = Self::Scalar>
        + Neg<Output = Self::Scalar>;

    /// Element of the prime order group.
    type Point: Copy
        + Debug
        + Eq
        + Send
        + Sync
        + Add<Output = Self::Point>
        + Sub<Output = Self::Point>
        + Neg<Output = Self::Point>
        + Mul<Self::Scalar, Output = Self::Point>;

    /// Human readable suite name.
    fn name(&self) -> &'static str;

    /// Length of a canonical scalar encoding.
    fn scalar_len(&self) -> usize;

    /// Length of a canonical point encoding.
    fn point_len(&self) -> usize;

    /// The additive identity of the scalar field.
    fn zero(&self) -> Self::Scalar;

    /// The identity element of the group.
    fn identity(&self) -> Self::Point;

    /// Whether `point` is the identity element.
    fn is_identity(&self, point: &Self::Point) -> bool;

    /// Whether `point` lies in the torsion subgroup, the identity included.
    fn is_small_order(&self, point: &Self::Point) -> bool;

    /// Multiply the base point by `scalar`.
    fn base_mul(&self, scalar: &Self::Scalar) -> Self::Point;

    /// Sample a scalar uniformly from the field.
    fn random_scalar<R: RngCore + CryptoRng>(&self, rng: &mut R) -> Self::Scalar;

    /// Canonical encoding of a scalar.
    fn scalar_to_bytes(&self, scalar: &Self::Scalar) -> Vec<u8>;

    /// Decode a canonical scalar encoding.
    fn scalar_from_bytes(&self, bytes: &[u8]) -> Result<Self::Scalar, CosiError>;

    /// Canonical encoding of a point.
    fn point_to_bytes(&self, point: &Self::Point) -> Vec<u8>;

    /// Decode a canonical point encoding.
    fn point_from_bytes(&self, bytes: &[u8]) -> Result<Self::Point, CosiError>;

    /// Digest of the concatenation of `inputs`, reduced into a scalar.
    fn hash_to_scalar(&self, inputs: &[&[u8]]) -> Self::Scalar;

    /// Derive the signing scalar from a raw private scalar.
    ///
    /// The private scalar is hashed and the digest clamped, so the raw
    /// scalar itself never enters a group operation.
    fn expand(&self, private: &Self::Scalar) -> Self::Scalar;
}

/// Edwards25519 with a configurable 512 bit hash.
pub struct Ed25519Suite<H = Sha512> {
    _hash: PhantomData<fn() -> H>,
}

/// Edwards25519 with SHA-512, compatible with Ed25519.
pub type Ed25519 = Ed25519Suite<Sha512>;

impl<H> Ed25519Suite<H> {
    /// Create the suite value.
    pub fn new() -> Self {
        Ed25519Suite { _hash: PhantomData }
    }
}

impl<H> Default for Ed25519Suite<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> Clone for Ed25519Suite<H> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<H> Copy for Ed25519Suite<H> {}

impl<H> Debug for Ed25519Suite<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ed25519Suite( {} )", core::any::type_name::<H>())
    }
}

impl<H> Suite for Ed25519Suite<H>
where
    H: Digest<OutputSize = U64> + 'static,
{
    type Scalar = Scalar;
    type Point = EdwardsPoint;

    fn name(&self) -> &'static str {
        "Ed25519"
    }

    fn scalar_len(&self) -> usize {
        SCALAR_LENGTH
    }

    fn point_len(&self) -> usize {
        POINT_LENGTH
    }

    fn zero(&self) -> Scalar {
        Scalar::ZERO
    }

    fn identity(&self) -> EdwardsPoint {
        EdwardsPoint::identity()
    }

    fn is_identity(&self, point: &EdwardsPoint) -> bool {
        point.is_identity()
    }

    fn is_small_order(&self, point: &EdwardsPoint) -> bool {
        point.is_small_order()
    }

    fn base_mul(&self, scalar: &Scalar) -> EdwardsPoint {
        EdwardsPoint::mul_base(scalar)
    }

    fn random_scalar<R: RngCore + CryptoRng>(&self, rng: &mut R) -> Scalar {
        Scalar::random(rng)
    }

    fn scalar_to_bytes(&self, scalar: &Scalar) -> Vec<u8> {
        scalar.to_bytes().to_vec()
    }

    fn scalar_from_bytes(&self, bytes: &[u8]) -> Result<Scalar, CosiError> {
        if bytes.len() != SCALAR_LENGTH {
            return Err(CosiError::Decode {
                name: "scalar",
                reason: "expected 32 bytes",
            });
        }

        let mut bits = [0u8; SCALAR_LENGTH];
        bits.copy_from_slice(bytes);

        let scalar: Option<Scalar> = Scalar::from_canonical_bytes(bits).into();
        bits.zeroize();

        scalar.ok_or(CosiError::Decode {
            name: "scalar",
            reason: "not reduced modulo the group order",
        })
    }

    fn point_to_bytes(&self, point: &EdwardsPoint) -> Vec<u8> {
        point.compress().to_bytes().to_vec()
    }

    fn point_from_bytes(&self, bytes: &[u8]) -> Result<EdwardsPoint, CosiError> {
        let compressed = CompressedEdwardsY::from_slice(bytes).map_err(|_| CosiError::Decode {
            name: "point",
            reason: "expected 32 bytes",
        })?;

        let point = compressed.decompress().ok_or(CosiError::Decode {
            name: "point",
            reason: "not on the curve",
        })?;

        // decompression reduces y modulo p, so reject encodings that do not round trip
        if point.compress() != compressed {
            return Err(CosiError::Decode {
                name: "point",
                reason: "non-canonical encoding",
            });
        }

        Ok(point)
    }

    fn hash_to_scalar(&self, inputs: &[&[u8]]) -> Scalar {
        let mut h = H::new();
        for input in inputs {
            h.update(input);
        }
        Scalar::from_hash(h)
    }

    fn expand(&self, private: &Scalar) -> Scalar {
        let mut digest = H::new().chain_update(private.as_bytes()).finalize();
        let scalar = clamp(&digest);
        digest.as_mut_slice().zeroize();
        scalar
    }
}

/// Ed25519 clamping of the low half of a 512 bit digest: clear the three
/// lowest bits, clear the top bit and set the second highest bit.
fn clamp(digest: &[u8]) -> Scalar {
    let mut bits = [0u8; SCALAR_LENGTH];
    bits.copy_from_slice(&digest[..SCALAR_LENGTH]);
    bits[0] &= 248;
    bits[31] &= 127;
    bits[31] |= 64;

    let scalar = Scalar::from_bytes_mod_order(bits);
    bits.zeroize();
    scalar
}

#[cfg(test)]
mod test {
    use super::*;
    use curve25519_dalek::constants::EIGHT_TORSION;
    use rand::SeedableRng;
    use rand_chacha::ChaChaRng;

    const BASEPOINT_HEX: &str = "5866666666666666666666666666666666666666666666666666666666666666";

    #[test]
    fn basepoint_encoding() {
        let suite = Ed25519::default();
        let one = suite.scalar_from_bytes(&hex::decode(
            "0100000000000000000000000000000000000000000000000000000000000000",
        ).unwrap()).unwrap();

        let encoded = suite.point_to_bytes(&suite.base_mul(&one));
        assert_eq!(hex::encode(encoded), BASEPOINT_HEX);
    }

    #[test]
    fn identity_encoding() {
        let suite = Ed25519::default();
        let mut bytes = [0u8; 32];
        bytes[0] = 1;

        let point = suite.point_from_bytes(&bytes).unwrap();
        assert!(suite.is_identity(&point));
        assert_eq!(suite.point_to_bytes(&suite.identity()), bytes.to_vec());
    }

    #[test]
    fn small_order_points() {
        let suite = Ed25519::default();
        for torsion in EIGHT_TORSION.iter() {
            assert!(suite.is_small_order(torsion));
        }
        assert!(suite.is_small_order(&suite.identity()));

        let p = suite.base_mul(&suite.random_scalar(&mut ChaChaRng::from_seed([8u8; 32])));
        assert!(!suite.is_small_order(&p));
        assert!(!suite.is_small_order(&(p + EIGHT_TORSION[1])));
    }

    #[test]
    fn scalar_and_point_round_trip() {
        let suite = Ed25519::default();
        let mut csprng = ChaChaRng::from_seed([7u8; 32]);

        for _ in 0..16 {
            let s = suite.random_scalar(&mut csprng);
            let p = suite.base_mul(&s);

            let s_bytes = suite.scalar_to_bytes(&s);
            let p_bytes = suite.point_to_bytes(&p);
            assert_eq!(s_bytes.len(), suite.scalar_len());
            assert_eq!(p_bytes.len(), suite.point_len());

            assert_eq!(suite.scalar_from_bytes(&s_bytes).unwrap(), s);
            assert_eq!(suite.point_from_bytes(&p_bytes).unwrap(), p);
        }
    }

    #[test]
    fn reject_unreduced_scalar() {
        let suite = Ed25519::default();
        // the group order l itself
        let l = hex::decode("edd3f55c1a631258d69cf7a2def9de1400000000000000000000000000000010").unwrap();

        assert!(matches!(
            suite.scalar_from_bytes(&l),
            Err(CosiError::Decode { name: "scalar", .. })
        ));
        assert!(suite.scalar_from_bytes(&[0u8; 31]).is_err());
    }

    #[test]
    fn reject_off_curve_point() {
        let suite = Ed25519::default();
        let mut bytes = [0u8; 32];
        // y = 2 has no matching x coordinate
        bytes[0] = 2;

        assert!(matches!(
            suite.point_from_bytes(&bytes),
            Err(CosiError::Decode { name: "point", .. })
        ));
    }

    #[test]
    fn reject_non_canonical_point() {
        let suite = Ed25519::default();
        // y = p, which reduces to the valid point y = 0
        let p = hex::decode("edffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff7f").unwrap();

        assert!(suite.point_from_bytes(&p).is_err());
        assert!(suite.point_from_bytes(&p[..31]).is_err());
    }

    #[test]
    fn mutated_encoding_fails_or_differs() {
        let suite = Ed25519::default();
        let mut csprng = ChaChaRng::from_seed([9u8; 32]);
        let p = suite.base_mul(&suite.random_scalar(&mut csprng));
        let mut bytes = suite.point_to_bytes(&p);
        bytes[3] ^= 0x10;

        match suite.point_from_bytes(&bytes) {
            Ok(q) => assert_ne!(p, q),
            Err(e) => assert!(matches!(e, CosiError::Decode { .. })),
        }
    }

    #[test]
    fn expand_clamps_sha512_digest() {
        let suite = Ed25519::default();
        let mut csprng = ChaChaRng::from_seed([3u8; 32]);
        let private = suite.random_scalar(&mut csprng);

        let digest = Sha512::digest(private.as_bytes());
        let mut expected = [0u8; 32];
        expected.copy_from_slice(&digest[..32]);
        expected[0] &= 248;
        expected[31] &= 127;
        expected[31] |= 64;

        assert_eq!(suite.expand(&private), Scalar::from_bytes_mod_order(expected));
        assert_eq!(suite.expand(&private), suite.expand(&private));
        assert_ne!(suite.expand(&private), private);
    }

    #[test]
    fn hash_to_scalar_concatenates() {
        let suite = Ed25519::default();
        assert_eq!(
            suite.hash_to_scalar(&[&b"ab"[..], &b"cd"[..]]),
            suite.hash_to_scalar(&[&b"abcd"[..]])
        );
        assert_ne!(
            suite.hash_to_scalar(&[&b"abcd"[..]]),
            suite.hash_to_scalar(&[&b"abce"[..]])
        );
    }
}
