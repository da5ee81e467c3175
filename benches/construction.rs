use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use doegen::construct::{
    minimal_generator, BoxBehnken, CentralComposite, CompositeOptions, Design,
    FractionalByResolution, FullFactorial, LatinHypercube, PlackettBurman, Sukharev,
};
use doegen::{DesignBuilder, DesignKind, FactorSpec};

fn bench_full_factorial(c: &mut Criterion) {
    let mut group = c.benchmark_group("FullFactorial");

    for k in [3, 5, 7] {
        group.bench_with_input(BenchmarkId::from_parameter(k), &k, |b, &k| {
            let ff = FullFactorial::new(vec![3; k]).unwrap();
            b.iter(|| ff.build().unwrap());
        });
    }
    group.finish();
}

fn bench_resolution_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("ResolutionSearch");

    // (factors, resolution)
    for (n, res) in [(7, 3), (15, 4), (26, 5)] {
        let id = format!("{n}_res{res}");
        group.bench_function(BenchmarkId::new("generator", &id), |b| {
            b.iter(|| minimal_generator(n, res).unwrap());
        });
        group.bench_function(BenchmarkId::new("build", &id), |b| {
            let design = FractionalByResolution::new(n, res);
            b.iter(|| design.build().unwrap());
        });
    }
    group.finish();
}

fn bench_plackett_burman(c: &mut Criterion) {
    let mut group = c.benchmark_group("PlackettBurman");

    // 12, 20, 44 and 64 runs
    for n in [11, 19, 43, 63] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            let pb = PlackettBurman::new(n).unwrap();
            b.iter(|| pb.build().unwrap());
        });
    }
    group.finish();
}

fn bench_response_surface(c: &mut Criterion) {
    let mut group = c.benchmark_group("ResponseSurface");

    for n in [3, 6, 10] {
        group.bench_with_input(BenchmarkId::new("BoxBehnken", n), &n, |b, &n| {
            let bb = BoxBehnken::new(n).unwrap();
            b.iter(|| bb.build().unwrap());
        });
        group.bench_with_input(BenchmarkId::new("CentralComposite", n), &n, |b, &n| {
            let ccd = CentralComposite::new(n, CompositeOptions::default()).unwrap();
            b.iter(|| ccd.build().unwrap());
        });
    }
    group.finish();
}

fn bench_sampling(c: &mut Criterion) {
    let mut group = c.benchmark_group("Sampling");

    for n in [3, 6] {
        group.bench_with_input(BenchmarkId::new("Sukharev", n), &n, |b, &n| {
            let grid = Sukharev::new(n, 3).unwrap();
            b.iter(|| grid.build().unwrap());
        });
        group.bench_with_input(BenchmarkId::new("LatinHypercube", n), &n, |b, &n| {
            let lhs = LatinHypercube::new(n, 50).unwrap().with_seed(7);
            b.iter(|| lhs.build().unwrap());
        });
        group.bench_with_input(BenchmarkId::new("MaximinLatinHypercube", n), &n, |b, &n| {
            let lhs = LatinHypercube::new(n, 50).unwrap().maximin(5).with_seed(7);
            b.iter(|| lhs.build().unwrap());
        });
    }
    group.finish();
}

fn bench_builder_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("Builder_Decode");

    // Compare builder overhead (build + decode) vs the bare engine above
    let spec = FactorSpec::new((0..6).map(|i| (format!("x{i}"), vec![10.0, 20.0, 30.0]))).unwrap();
    group.bench_function("BoxBehnken_6", |b| {
        let builder = DesignBuilder::new(DesignKind::BoxBehnken);
        b.iter(|| builder.build(&spec).unwrap());
    });
    group.bench_function("FullFactorial_3^6", |b| {
        let builder = DesignBuilder::new(DesignKind::FullFactorial);
        b.iter(|| builder.build(&spec).unwrap());
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_full_factorial,
    bench_resolution_search,
    bench_plackett_burman,
    bench_response_surface,
    bench_sampling,
    bench_builder_decode
);
criterion_main!(benches);
