use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::{rngs::StdRng, Rng, SeedableRng};

use rsms::config::PortalConfig;
use rsms::router::{Route, Router, ViewRegistry};
use rsms::Portal;

fn gen_addresses(n: usize, seed: u64) -> Vec<String> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| match rng.gen_range(0..8usize) {
            i @ 0..=5 => Route::ALL[i].address(),
            6 => "#/unknown".to_string(),
            _ => String::new(),
        })
        .collect()
}

fn bench_decide(c: &mut Criterion) {
    let router = Router::new(ViewRegistry::standard(), &PortalConfig::default());
    let addrs = gen_addresses(10_000, 0xBEEF_CAFE);
    let mut group = c.benchmark_group("router_decide");
    for session in [false, true] {
        group.bench_with_input(BenchmarkId::new("decide", session), &session, |b, &session| {
            b.iter(|| {
                for a in &addrs {
                    criterion::black_box(router.decide(Some(a.as_str()), session));
                }
            });
        });
    }
    group.finish();
}

fn bench_navigate(c: &mut Criterion) {
    let addrs = gen_addresses(1_000, 0xDEAD_BEEF);
    c.bench_function("portal_navigate_burst", |b| {
        b.iter(|| {
            let cfg = PortalConfig { rng_seed: Some(1), ..PortalConfig::default() };
            let mut p = Portal::new(cfg).expect("portal");
            p.load();
            for a in &addrs {
                p.navigate(a);
            }
            p.advance(10);
            criterion::black_box(p.current_view());
        });
    });
}

criterion_group!(benches, bench_decide, bench_navigate);
criterion_main!(benches);
