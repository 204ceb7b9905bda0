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

#[macro_use]
extern crate criterion;

mod cosi_benches {
    use criterion::{BenchmarkId, Criterion};
    use cosi::*;
    use rand::rngs::OsRng;

    static GROUP_SIZES: [usize; 5] = [4, 16, 64, 128, 256];
    const MESSAGE: &[u8] = b"aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa";

    fn collective_sign(suite: &Ed25519, n: usize) -> (Participants<Ed25519>, Signature<Ed25519>) {
        let keypairs: Vec<Keypair<Ed25519>> = (0..n).map(|_| Keypair::generate(suite, &mut OsRng)).collect();
        let participants = Participants::new(keypairs.iter().map(|k| k.public).collect()).unwrap();

        let (nonces, commitments): (Vec<_>, Vec<_>) = (0..n).map(|_| commit(suite, &mut OsRng)).unzip();
        let masks: Vec<Mask> = (0..n).map(|i| Mask::single(n, i).unwrap()).collect();

        let (aggregate_commitment, mask) = aggregate_commitments(suite, &commitments, &masks).unwrap();
        let aggregate_public = participants.aggregate_public(suite, &mask).unwrap();
        let c = challenge(suite, &aggregate_commitment, &aggregate_public, MESSAGE).unwrap();

        let responses: Vec<_> = keypairs
            .iter()
            .zip(nonces)
            .map(|(keypair, nonce)| response(&keypair.expanded(suite), nonce, &c))
            .collect();
        let aggregate_response = aggregate_responses(suite, &responses).unwrap();

        (participants, sign(aggregate_commitment, aggregate_response, mask))
    }

    fn respond(c: &mut Criterion) {
        let suite = Ed25519::default();
        let keypair = Keypair::generate(&suite, &mut OsRng);
        let expanded = keypair.expanded(&suite);
        let challenge = suite.random_scalar(&mut OsRng);

        c.bench_function("CoSi commit and respond", move |b| {
            b.iter(|| {
                let (nonce, _) = commit(&suite, &mut OsRng);
                response(&expanded, nonce, &challenge)
            })
        });
    }

    fn aggregate(c: &mut Criterion) {
        let suite = Ed25519::default();
        let mut group = c.benchmark_group("CoSi commitment aggregation");

        for &n in GROUP_SIZES.iter() {
            let commitments: Vec<_> = (0..n).map(|_| commit(&suite, &mut OsRng).1).collect();
            let masks: Vec<Mask> = (0..n).map(|i| Mask::single(n, i).unwrap()).collect();

            group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
                b.iter(|| aggregate_commitments(&suite, &commitments, &masks))
            });
        }

        group.finish();
    }

    fn verify_collective(c: &mut Criterion) {
        let suite = Ed25519::default();
        let mut group = c.benchmark_group("CoSi signature verification");

        for &n in GROUP_SIZES.iter() {
            let (participants, signature) = collective_sign(&suite, n);

            group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
                b.iter(|| verify(&suite, &participants, MESSAGE, &signature, None))
            });
        }

        group.finish();
    }

    criterion_group! {
        name = cosi_benches;
        config = Criterion::default();
        targets =
            respond,
            aggregate,
            verify_collective,
    }
}

criterion_main!(cosi_benches::cosi_benches);
