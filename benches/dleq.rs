use ark_ec::CurveGroup;
use ark_secp256k1::Fr;
use ark_std::UniformRand;
use criterion::{criterion_group, criterion_main, Criterion};
use pvss::{dleq::DleqProof, params::CurveParams};

fn bench_dleq(c: &mut Criterion) {
    let mut rng = ark_std::test_rng();
    let params = CurveParams::secp256k1().unwrap();

    let secret = Fr::rand(&mut rng);
    let base = (params.g * Fr::rand(&mut rng)).into_affine();
    let proof = DleqProof::prove(secret, base, &params, &mut rng);

    c.bench_function("dleq_prove", |b| {
        b.iter(|| DleqProof::prove(secret, base, &params, &mut rng))
    });

    c.bench_function("dleq_verify", |b| b.iter(|| proof.verify(base, &params)));
}

criterion_group!(benches, bench_dleq);
criterion_main!(benches);
