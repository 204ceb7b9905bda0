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

//! Participation masks
//!
//! A `Mask` is a bit vector over the globally agreed, ordered participant
//! list. Participant `i` lives in byte `i / 8` under bit `1 << (i % 8)`;
//! padding bits past the last participant are always zero.
//!
//! `Participants` holds that ordered list and turns a mask into the
//! aggregate public key of the participants it enables.

use std::convert::TryFrom;

use serde::{Deserialize, Serialize};

use crate::errors::CosiError;
use crate::keys::PublicKey;
use crate::suite::Suite;

/// Number of bytes needed to hold a mask over `participants` participants.
pub fn mask_len(participants: usize) -> usize {
    (participants + 7) / 8
}

/// Participation bit vector over an ordered participant list.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "MaskRepr", into = "MaskRepr")]
pub struct Mask {
    participants: usize,
    bits: Vec<u8>,
}

#[derive(Serialize, Deserialize)]
struct MaskRepr {
    participants: u64,
    bits: Vec<u8>,
}

impl From<Mask> for MaskRepr {
    fn from(mask: Mask) -> MaskRepr {
        MaskRepr {
            participants: mask.participants as u64,
            bits: mask.bits,
        }
    }
}

impl TryFrom<MaskRepr> for Mask {
    type Error = CosiError;

    fn try_from(repr: MaskRepr) -> Result<Mask, CosiError> {
        let participants = usize::try_from(repr.participants).map_err(|_| CosiError::Decode {
            name: "mask",
            reason: "participant count overflows",
        })?;
        Mask::from_bytes(participants, &repr.bits)
    }
}

impl Mask {
    /// A mask with every participant disabled.
    pub fn empty(participants: usize) -> Mask {
        Mask {
            participants,
            bits: vec![0u8; mask_len(participants)],
        }
    }

    /// A mask with every participant enabled.
    pub fn full(participants: usize) -> Mask {
        let mut mask = Mask::empty(participants);
        for byte in mask.bits.iter_mut() {
            *byte = 0xff;
        }
        mask.clear_padding();
        mask
    }

    /// A mask enabling only the participant at `index`.
    pub fn single(participants: usize, index: usize) -> Result<Mask, CosiError> {
        let mut mask = Mask::empty(participants);
        mask.set(index, true)?;
        Ok(mask)
    }

    /// Decode a mask over `participants` participants.
    ///
    /// Fails with `MaskLengthMismatch` if `bytes` is not exactly
    /// `mask_len(participants)` long and with `Decode` if a padding bit is set.
    pub fn from_bytes(participants: usize, bytes: &[u8]) -> Result<Mask, CosiError> {
        let expected = mask_len(participants);
        if bytes.len() != expected {
            return Err(CosiError::MaskLengthMismatch {
                expected,
                actual: bytes.len(),
            });
        }

        let mask = Mask {
            participants,
            bits: bytes.to_vec(),
        };

        let mut padded = mask.clone();
        padded.clear_padding();
        if padded != mask {
            return Err(CosiError::Decode {
                name: "mask",
                reason: "padding bits are set",
            });
        }

        Ok(mask)
    }

    /// Byte encoding of the mask.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.bits.clone()
    }

    /// View the byte encoding of the mask.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bits
    }

    /// Size of the participant list this mask ranges over.
    pub fn participants(&self) -> usize {
        self.participants
    }

    /// Whether participant `index` is enabled. Out of range indices are not.
    pub fn is_enabled(&self, index: usize) -> bool {
        index < self.participants && self.bits[index >> 3] & (1 << (index & 7)) != 0
    }

    /// Enable or disable participant `index`.
    pub fn set(&mut self, index: usize, enabled: bool) -> Result<(), CosiError> {
        if index >= self.participants {
            return Err(CosiError::InvalidIndex {
                index,
                participants: self.participants,
            });
        }

        let bit = 1u8 << (index & 7);
        if enabled {
            self.bits[index >> 3] |= bit;
        } else {
            self.bits[index >> 3] &= !bit;
        }
        Ok(())
    }

    /// Indices of the enabled participants, in ascending order.
    pub fn enabled(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.participants).filter(move |i| self.is_enabled(*i))
    }

    /// Number of enabled participants.
    pub fn count_enabled(&self) -> usize {
        self.bits.iter().map(|b| b.count_ones() as usize).sum()
    }

    /// No participant is enabled.
    pub fn is_empty(&self) -> bool {
        self.bits.iter().all(|b| *b == 0)
    }

    /// Every participant is enabled.
    pub fn is_full(&self) -> bool {
        self.count_enabled() == self.participants
    }

    /// Bitwise OR, used to join masks of disjoint sub-aggregates.
    pub fn union(&self, other: &Mask) -> Result<Mask, CosiError> {
        self.combine(other, |a, b| a | b)
    }

    /// Bitwise AND, used when a mask is nested inside another.
    pub fn intersection(&self, other: &Mask) -> Result<Mask, CosiError> {
        self.combine(other, |a, b| a & b)
    }

    /// Fail with `MaskLengthMismatch` unless the mask ranges over `participants`.
    pub fn check_len(&self, participants: usize) -> Result<(), CosiError> {
        if self.participants != participants {
            return Err(CosiError::MaskLengthMismatch {
                expected: participants,
                actual: self.participants,
            });
        }
        Ok(())
    }

    fn combine<F>(&self, other: &Mask, op: F) -> Result<Mask, CosiError>
    where
        F: Fn(u8, u8) -> u8,
    {
        other.check_len(self.participants)?;

        Ok(Mask {
            participants: self.participants,
            bits: self
                .bits
                .iter()
                .zip(other.bits.iter())
                .map(|(a, b)| op(*a, *b))
                .collect(),
        })
    }

    fn clear_padding(&mut self) {
        let used = self.participants & 7;
        if used != 0 {
            if let Some(last) = self.bits.last_mut() {
                *last &= (1u8 << used) - 1;
            }
        }
    }
}

/// The static, ordered list of participant public keys.
#[derive(Clone, Debug)]
pub struct Participants<S: Suite> {
    keys: Vec<PublicKey<S>>,
}

impl<S: Suite> Participants<S> {
    /// Fix the participant order.
    ///
    /// An empty list cannot sign anything. Keys of small order and keys
    /// listed twice are refused, either one would let a mask stand for a
    /// different key set than it names.
    pub fn new(keys: Vec<PublicKey<S>>) -> Result<Participants<S>, CosiError> {
        if keys.is_empty() {
            return Err(CosiError::EmptyAggregation);
        }

        let suite = S::default();
        for (index, key) in keys.iter().enumerate() {
            if suite.is_small_order(key.as_point()) {
                return Err(CosiError::Decode {
                    name: "public key",
                    reason: "small order point",
                });
            }
            if keys[..index].contains(key) {
                return Err(CosiError::DuplicateParticipant { index });
            }
        }

        Ok(Participants { keys })
    }

    /// Number of participants.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// The participant keys, in order.
    pub fn keys(&self) -> &[PublicKey<S>] {
        &self.keys
    }

    /// The key of participant `index`.
    pub fn key(&self, index: usize) -> Option<&PublicKey<S>> {
        self.keys.get(index)
    }

    /// Position of `key` in the participant list.
    pub fn index_of(&self, key: &PublicKey<S>) -> Option<usize> {
        self.keys.iter().position(|k| k == key)
    }

    /// A mask enabling every participant.
    pub fn full_mask(&self) -> Mask {
        Mask::full(self.len())
    }

    /// The mask a node starts out with: only its own bit, or every bit when
    /// no key is given.
    pub fn own_mask(&self, key: Option<&PublicKey<S>>) -> Result<Mask, CosiError> {
        match key {
            None => Ok(self.full_mask()),
            Some(key) => {
                let index = self.index_of(key).ok_or(CosiError::UnknownParticipant)?;
                Mask::single(self.len(), index)
            }
        }
    }

    /// The mask enabling exactly the participants in `active`.
    pub fn mask_for(&self, active: &[PublicKey<S>]) -> Result<Mask, CosiError> {
        let mut mask = Mask::empty(self.len());
        for key in active {
            let index = self.index_of(key).ok_or(CosiError::UnknownParticipant)?;
            mask.set(index, true)?;
        }
        Ok(mask)
    }

    /// Sum of the public keys enabled in `mask`.
    ///
    /// Recomputed on every call, so callers always see the current mask. An
    /// all-zero mask yields the identity element.
    pub fn aggregate_public(&self, suite: &S, mask: &Mask) -> Result<S::Point, CosiError> {
        mask.check_len(self.len())?;

        Ok(mask
            .enabled()
            .fold(suite.identity(), |acc, i| acc + self.keys[i].into_point()))
    }
}
