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

//! One participant's view of a signing round

use rand::{CryptoRng, RngCore};
use tracing::{debug, trace, warn};

use crate::protocol::{challenge, commit, response, Nonce};
use crate::errors::CosiError;
use crate::keys::{ExpandedSecretKey, PublicKey, SecretKey};
use crate::mask::{Mask, Participants};
use crate::policy::Policy;
use crate::signature::{sign, verify, Signature};
use crate::suite::Suite;

/// CoSi State Machine, one participant's progress through a round
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SessionState {
    /// Holds the raw secret, nothing computed yet
    Init,
    /// Signing scalar derived, raw secret dropped
    KeysExpanded,
    /// Nonce sampled and commitment handed out, Stage 1
    Committed,
    /// Aggregate commitment and final mask received
    MaskFinalized,
    /// Challenge derived from the final mask, Stage 2
    Challenged,
    /// Response computed, nonce consumed, Stage 3
    Responded,
    /// Aggregate response bundled into a signature
    Assembled,
    /// The assembled signature verified
    Verified,
    /// The assembled signature failed verification or policy
    Rejected,
    /// A protocol violation ended the round
    Aborted,
}

/// Drives a single participant through commit, challenge and response.
///
/// The session owns its secrets. The raw secret is dropped once expanded and
/// the nonce once the response is made, so every round needs a new session.
pub struct Cosigner<S: Suite> {
    suite: S,
    participants: Participants<S>,
    /// Position of this participant in the key order
    index: usize,
    message: Vec<u8>,

    secret: Option<SecretKey<S>>,
    expanded: Option<ExpandedSecretKey<S>>,
    nonce: Option<Nonce<S>>,

    /// Only this participant's own bit
    node_mask: Mask,
    /// The mask the leader settled on after commitment aggregation
    final_mask: Option<Mask>,
    aggregate_commitment: Option<S::Point>,
    challenge: Option<S::Scalar>,

    state: SessionState,
}

impl<S: Suite> Cosigner<S> {
    /// Start a session for participant `index` signing `message`.
    ///
    /// The secret must belong to the key at `index` in the participant list.
    pub fn new(
        suite: S,
        participants: Participants<S>,
        index: usize,
        secret: SecretKey<S>,
        message: &[u8],
    ) -> Result<Cosigner<S>, CosiError> {
        let key = participants.key(index).ok_or(CosiError::InvalidIndex {
            index,
            participants: participants.len(),
        })?;

        if PublicKey::from_secret(&suite, &secret) != *key {
            return Err(CosiError::UnknownParticipant);
        }

        let node_mask = Mask::single(participants.len(), index)?;

        Ok(Cosigner {
            suite,
            participants,
            index,
            message: message.to_vec(),
            secret: Some(secret),
            expanded: None,
            nonce: None,
            node_mask,
            final_mask: None,
            aggregate_commitment: None,
            challenge: None,
            state: SessionState::Init,
        })
    }

    /// Current state of the session.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Position of this participant in the key order.
    pub fn index(&self) -> usize {
        self.index
    }

    /// The mask with only this participant enabled.
    pub fn node_mask(&self) -> &Mask {
        &self.node_mask
    }

    /// The final mask, once received.
    pub fn final_mask(&self) -> Option<&Mask> {
        self.final_mask.as_ref()
    }

    /// The challenge, once derived.
    pub fn challenge_scalar(&self) -> Option<&S::Scalar> {
        self.challenge.as_ref()
    }

    /// The ordered participant list.
    pub fn participants(&self) -> &Participants<S> {
        &self.participants
    }

    /// Derive the signing scalar and drop the raw secret.
    pub fn expand_keys(&mut self) -> Result<(), CosiError> {
        self.advance(SessionState::Init, SessionState::KeysExpanded)?;

        let secret = self.secret.take().ok_or(CosiError::SessionAborted)?;
        self.expanded = Some(secret.expand(&self.suite));
        Ok(())
    }

    /// Sample this round's nonce and hand out `(V_i, node_mask)`.
    pub fn commit<R>(&mut self, csprng: &mut R) -> Result<(S::Point, Mask), CosiError>
    where
        R: CryptoRng + RngCore,
    {
        self.advance(SessionState::KeysExpanded, SessionState::Committed)?;

        let (nonce, commitment) = commit(&self.suite, csprng);
        self.nonce = Some(nonce);
        Ok((commitment, self.node_mask.clone()))
    }

    /// Accept the aggregate commitment and the final mask.
    ///
    /// A mask arriving once the challenge has been derived aborts the
    /// session, the response would otherwise be bound to the wrong key set.
    pub fn set_mask(&mut self, aggregate_commitment: S::Point, final_mask: Mask) -> Result<(), CosiError> {
        match self.state {
            SessionState::Challenged | SessionState::Responded | SessionState::Assembled => {
                warn!(index = self.index, from = ?self.state, "mask revised after challenge, aborting");
                self.abort();
                return Err(CosiError::SessionAborted);
            }
            _ => {}
        }

        self.check(SessionState::Committed, SessionState::MaskFinalized)?;
        final_mask.check_len(self.node_mask.participants())?;

        self.aggregate_commitment = Some(aggregate_commitment);
        self.final_mask = Some(final_mask);
        self.transition(SessionState::MaskFinalized);
        Ok(())
    }

    /// Derive `c = H(V || A || m)` with `A` taken from the final mask.
    pub fn challenge(&mut self) -> Result<S::Scalar, CosiError> {
        self.check(SessionState::MaskFinalized, SessionState::Challenged)?;

        let (aggregate_commitment, mask) = match (&self.aggregate_commitment, &self.final_mask) {
            (Some(v), Some(mask)) => (*v, mask),
            _ => return Err(CosiError::InvalidTransition {
                from: self.state,
                to: SessionState::Challenged,
            }),
        };

        let aggregate_public = self.participants.aggregate_public(&self.suite, mask)?;
        let c = challenge(&self.suite, &aggregate_commitment, &aggregate_public, &self.message)?;

        self.challenge = Some(c);
        self.transition(SessionState::Challenged);
        Ok(c)
    }

    /// Compute `r_i = v_i + c * x_i`, consuming the nonce.
    ///
    /// A participant left out of the final mask must not respond, its nonce
    /// is discarded and `ExcludedSigner` returned.
    pub fn respond(&mut self) -> Result<S::Scalar, CosiError> {
        self.check(SessionState::Challenged, SessionState::Responded)?;

        let included = self
            .final_mask
            .as_ref()
            .map(|mask| mask.is_enabled(self.index))
            .unwrap_or(false);

        if !included {
            debug!(index = self.index, "left out of the final mask");
            self.nonce = None;
            return Err(CosiError::ExcludedSigner { index: self.index });
        }

        let (nonce, expanded, c) = match (self.nonce.take(), &self.expanded, &self.challenge) {
            (Some(nonce), Some(expanded), Some(c)) => (nonce, expanded, c),
            _ => return Err(CosiError::InvalidTransition {
                from: self.state,
                to: SessionState::Responded,
            }),
        };

        let r = response(expanded, nonce, c);
        self.transition(SessionState::Responded);
        Ok(r)
    }

    /// Bundle the aggregate response with this session's view of the round.
    pub fn assemble(&mut self, aggregate_response: S::Scalar) -> Result<Signature<S>, CosiError> {
        self.check(SessionState::Responded, SessionState::Assembled)?;

        let (aggregate_commitment, mask) = match (&self.aggregate_commitment, &self.final_mask) {
            (Some(v), Some(mask)) => (*v, mask.clone()),
            _ => return Err(CosiError::InvalidTransition {
                from: self.state,
                to: SessionState::Assembled,
            }),
        };

        self.transition(SessionState::Assembled);
        Ok(sign(aggregate_commitment, aggregate_response, mask))
    }

    /// Verify the assembled signature, ending the round in `Verified` or
    /// `Rejected`.
    pub fn verify(&mut self, signature: &Signature<S>, policy: Option<&dyn Policy>) -> Result<(), CosiError> {
        self.check(SessionState::Assembled, SessionState::Verified)?;

        match verify(&self.suite, &self.participants, &self.message, signature, policy) {
            Ok(()) => {
                self.transition(SessionState::Verified);
                Ok(())
            }
            Err(e) => {
                self.transition(SessionState::Rejected);
                Err(e)
            }
        }
    }

    fn check(&self, expected: SessionState, to: SessionState) -> Result<(), CosiError> {
        if self.state == SessionState::Aborted {
            return Err(CosiError::SessionAborted);
        }
        if self.state != expected {
            return Err(CosiError::InvalidTransition { from: self.state, to });
        }
        Ok(())
    }

    fn advance(&mut self, expected: SessionState, to: SessionState) -> Result<(), CosiError> {
        self.check(expected, to)?;
        self.transition(to);
        Ok(())
    }

    fn transition(&mut self, to: SessionState) {
        trace!(index = self.index, from = ?self.state, to = ?to, "session transition");
        self.state = to;
    }

    fn abort(&mut self) {
        self.secret = None;
        self.expanded = None;
        self.nonce = None;
        self.challenge = None;
        self.transition(SessionState::Aborted);
    }
}
