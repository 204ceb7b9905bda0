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

//! Collective Schnorr signing rounds.

//! Implementation of the collective signing protocol from
//! "Keeping Authorities Honest or Bust with Decentralized Witness Cosigning"
//! by Ewa Syta, Iulia Tamas, Dylan Visher, David Isaac Wolinsky, Philipp Jovanovic,
//! Linus Gasser, Nicolas Gailly, Ismail Khoffi and Bryan Ford
//! https://arxiv.org/abs/1503.08768
//!
//! A round has four stages. Every participant commits to a fresh nonce, the
//! commitments are summed (possibly along a tree) together with a mask of who
//! took part, every included participant derives the same challenge from the
//! aggregate commitment, the masked aggregate key and the message, and the
//! responses are summed into the final signature.
//!
//! The free functions below are the building blocks. `Cosigner` strings them
//! together for a single participant and refuses out of order steps.

mod commitment;
pub use commitment::{
    Nonce,
    commit,
    aggregate_commitments
};

mod challenge;
pub use challenge::challenge;

mod response;
pub use response::{
    response,
    verify_response,
    aggregate_responses
};

mod session;
pub use session::{
    Cosigner,
    SessionState
};
