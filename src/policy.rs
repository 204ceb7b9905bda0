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

//! Acceptance policies over the participation mask of a valid signature.

use crate::mask::Mask;

/// Decides whether the participants enabled in a mask are enough.
pub trait Policy {
    /// Returns `true` if the mask satisfies the policy.
    fn check(&self, mask: &Mask) -> bool;
}

/// Every participant must have signed. The default policy.
#[derive(Clone, Copy, Debug, Default)]
pub struct CompletePolicy;

impl Policy for CompletePolicy {
    fn check(&self, mask: &Mask) -> bool {
        mask.is_full()
    }
}

/// At least `k` participants must have signed.
#[derive(Clone, Copy, Debug)]
pub struct ThresholdPolicy(pub usize);

impl Policy for ThresholdPolicy {
    fn check(&self, mask: &Mask) -> bool {
        mask.count_enabled() >= self.0
    }
}

/// Strictly more than half of the participants must have signed.
#[derive(Clone, Copy, Debug, Default)]
pub struct MajorityPolicy;

impl Policy for MajorityPolicy {
    fn check(&self, mask: &Mask) -> bool {
        2 * mask.count_enabled() > mask.participants()
    }
}

/// Any non-empty set of signers is accepted.
#[derive(Clone, Copy, Debug, Default)]
pub struct AnyPolicy;

impl Policy for AnyPolicy {
    fn check(&self, mask: &Mask) -> bool {
        !mask.is_empty()
    }
}

impl<F> Policy for F
where
    F: Fn(&Mask) -> bool,
{
    fn check(&self, mask: &Mask) -> bool {
        self(mask)
    }
}
