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

//! Commitments used in the first stage of CoSi

use core::fmt::Debug;
use rand::{CryptoRng, RngCore};
use tracing::debug;
use zeroize::Zeroize;

use crate::errors::CosiError;
use crate::mask::Mask;
use crate::suite::Suite;

/// The ephemeral secret `v` behind a commitment `V = v * B`.
///
/// A nonce is consumed by the response it is used for and wiped when dropped,
/// it can neither be cloned nor serialized.
pub struct Nonce<S: Suite>(S::Scalar);

impl<S: Suite> Nonce<S> {
    pub(crate) fn as_scalar(&self) -> &S::Scalar {
        &self.0
    }
}

impl<S: Suite> Debug for Nonce<S> {
    fn fmt(&self, f: &mut ::core::fmt::Formatter) -> ::core::fmt::Result {
        write!(f, "Nonce( .. )")
    }
}

impl<S: Suite> Drop for Nonce<S> {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

/// Sample a fresh nonce `v` and its commitment `V = v * B`.
pub fn commit<S, R>(suite: &S, csprng: &mut R) -> (Nonce<S>, S::Point)
where
    S: Suite,
    R: CryptoRng + RngCore,
{
    let v = suite.random_scalar(csprng);
    let commitment = suite.base_mul(&v);
    (Nonce(v), commitment)
}

/// Sum the commitments whose masks enable at least one participant.
///
/// Each commitment is paired with the mask of the participants it stands for,
/// so an entry may itself be a sub-aggregate. Entries with an empty mask are
/// left out. Masks of the included entries must be disjoint, otherwise a
/// participant would be counted twice.
///
/// # Returns
///
/// The aggregate commitment and the union of the included masks, which the
/// caller must hand to every participant before the challenge is derived.
pub fn aggregate_commitments<S: Suite>(
    suite: &S,
    commitments: &[S::Point],
    masks: &[Mask],
) -> Result<(S::Point, Mask), CosiError> {
    if commitments.len() != masks.len() {
        return Err(CosiError::Aggregation(
            "mismatching lengths of commitment and mask lists",
        ));
    }

    let participants = match masks.first() {
        None => return Err(CosiError::EmptyAggregation),
        Some(first) => first.participants(),
    };

    let mut aggregate = suite.identity();
    let mut aggregate_mask = Mask::empty(participants);
    let mut excluded = 0usize;

    for (commitment, mask) in commitments.iter().zip(masks.iter()) {
        if mask.participants() != participants {
            return Err(CosiError::Aggregation("mismatching mask lengths"));
        }

        if mask.is_empty() {
            excluded += 1;
            continue;
        }

        if !aggregate_mask.intersection(mask)?.is_empty() {
            return Err(CosiError::Aggregation("participant included twice"));
        }

        aggregate = aggregate + *commitment;
        aggregate_mask = aggregate_mask.union(mask)?;
    }

    debug!(
        entries = commitments.len(),
        excluded,
        signers = aggregate_mask.count_enabled(),
        "aggregated commitments"
    );

    Ok((aggregate, aggregate_mask))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::suite::Ed25519;
    use rand::SeedableRng;
    use rand_chacha::ChaChaRng;

    fn commitments(n: usize) -> (Vec<Nonce<Ed25519>>, Vec<<Ed25519 as Suite>::Point>, Vec<Mask>) {
        let suite = Ed25519::default();
        let mut csprng = ChaChaRng::from_seed([30u8; 32]);
        let mut nonces = Vec::new();
        let mut points = Vec::new();
        let mut masks = Vec::new();

        for i in 0..n {
            let (nonce, point) = commit(&suite, &mut csprng);
            nonces.push(nonce);
            points.push(point);
            masks.push(Mask::single(n, i).unwrap());
        }
        (nonces, points, masks)
    }

    #[test]
    fn commitment_matches_nonce() {
        let suite = Ed25519::default();
        let (nonce, point) = commit(&suite, &mut ChaChaRng::from_seed([31u8; 32]));
        assert_eq!(suite.base_mul(nonce.as_scalar()), point);
    }

    #[test]
    fn fresh_nonces_differ() {
        let suite = Ed25519::default();
        let mut csprng = ChaChaRng::from_seed([32u8; 32]);
        let (_, a) = commit(&suite, &mut csprng);
        let (_, b) = commit(&suite, &mut csprng);
        assert_ne!(a, b);
    }

    #[test]
    fn aggregate_all() {
        let suite = Ed25519::default();
        let (_, points, masks) = commitments(5);

        let (aggregate, mask) = aggregate_commitments(&suite, &points, &masks).unwrap();
        let expected = points.iter().fold(suite.identity(), |acc, p| acc + *p);

        assert_eq!(aggregate, expected);
        assert!(mask.is_full());
    }

    #[test]
    fn aggregate_is_order_independent() {
        let suite = Ed25519::default();
        let (_, points, masks) = commitments(5);
        let (aggregate, mask) = aggregate_commitments(&suite, &points, &masks).unwrap();

        let order = [3usize, 0, 4, 1, 2];
        let shuffled_points: Vec<_> = order.iter().map(|i| points[*i]).collect();
        let shuffled_masks: Vec<_> = order.iter().map(|i| masks[*i].clone()).collect();

        let (shuffled, shuffled_mask) =
            aggregate_commitments(&suite, &shuffled_points, &shuffled_masks).unwrap();
        assert_eq!(aggregate, shuffled);
        assert_eq!(mask, shuffled_mask);
    }

    #[test]
    fn aggregate_as_tree() {
        let suite = Ed25519::default();
        let (_, points, masks) = commitments(5);
        let (flat, flat_mask) = aggregate_commitments(&suite, &points, &masks).unwrap();

        let left = aggregate_commitments(&suite, &points[..2], &masks[..2]).unwrap();
        let right = aggregate_commitments(&suite, &points[2..], &masks[2..]).unwrap();
        let (tree, tree_mask) =
            aggregate_commitments(&suite, &[left.0, right.0], &[left.1, right.1]).unwrap();

        assert_eq!(flat, tree);
        assert_eq!(flat_mask, tree_mask);
    }

    #[test]
    fn cleared_mask_excludes_commitment() {
        let suite = Ed25519::default();
        let (_, points, mut masks) = commitments(5);
        masks[2] = Mask::empty(5);

        let (aggregate, mask) = aggregate_commitments(&suite, &points, &masks).unwrap();

        assert_eq!(mask.enabled().collect::<Vec<_>>(), vec![0, 1, 3, 4]);
        assert_eq!(
            aggregate,
            points[0] + points[1] + points[3] + points[4]
        );
    }

    #[test]
    fn mismatched_mask_length() {
        let suite = Ed25519::default();
        let (_, points, mut masks) = commitments(5);
        masks[4] = Mask::single(9, 4).unwrap();

        assert!(matches!(
            aggregate_commitments(&suite, &points, &masks),
            Err(CosiError::Aggregation(_))
        ));
    }

    #[test]
    fn mismatched_list_length() {
        let suite = Ed25519::default();
        let (_, points, masks) = commitments(5);

        assert!(matches!(
            aggregate_commitments(&suite, &points[..4], &masks),
            Err(CosiError::Aggregation(_))
        ));
    }

    #[test]
    fn overlapping_masks() {
        let suite = Ed25519::default();
        let (_, points, mut masks) = commitments(3);
        masks[1] = masks[0].clone();

        assert_eq!(
            aggregate_commitments(&suite, &points, &masks),
            Err(CosiError::Aggregation("participant included twice"))
        );
    }

    #[test]
    fn nothing_to_aggregate() {
        let suite = Ed25519::default();
        assert_eq!(
            aggregate_commitments(&suite, &[], &[]),
            Err(CosiError::EmptyAggregation)
        );
    }
}
