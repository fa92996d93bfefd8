//! # Offer Ledger Benchmarks
//!
//! | Path | Operation |
//! |------|-----------|
//! | ol-01 | `append_offer` on an in-memory store |
//! | ol-01 | `list_offers` over a populated log |
//! | ol-02 | authorized `POST /` through the full middleware stack |

use axum::body::Body;
use axum::http::{header, Method, Request};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use ol_01_domain_ledger::test_utils::new_offer;
use ol_01_domain_ledger::{DomainKey, DomainLedgerApi, LedgerRegistry};
use ol_02_request_router::domain::config::AuthConfig;
use ol_02_request_router::{build_router, RouterConfig};
use std::sync::Arc;
use tower::ServiceExt;

fn bench_append_offer(c: &mut Criterion) {
    let mut group = c.benchmark_group("ol-01-append-offer");

    for existing in [0usize, 100, 1_000] {
        group.throughput(Throughput::Elements(1));
        group.bench_with_input(
            BenchmarkId::new("append_after", existing),
            &existing,
            |b, &existing| {
                let registry = LedgerRegistry::in_memory();
                let key = DomainKey::parse("bench.example").unwrap();
                let handle = registry.ledger(&key);
                for i in 0..existing {
                    handle
                        .lock()
                        .append_offer(new_offer(&format!("{}@b.com", i), 1))
                        .unwrap();
                }

                b.iter(|| {
                    black_box(
                        handle
                            .lock()
                            .append_offer(new_offer("bench@b.com", 500))
                            .unwrap(),
                    )
                })
            },
        );
    }

    group.finish();
}

fn bench_list_offers(c: &mut Criterion) {
    let registry = LedgerRegistry::in_memory();
    let key = DomainKey::parse("bench.example").unwrap();
    let handle = registry.ledger(&key);
    for i in 0..500 {
        handle
            .lock()
            .append_offer(new_offer(&format!("{}@b.com", i), 1))
            .unwrap();
    }

    c.bench_function("ol-01-list-500-offers", |b| {
        b.iter(|| black_box(handle.lock().list_offers().unwrap()))
    });
}

fn bench_router_post(c: &mut Criterion) {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let config = RouterConfig {
        auth: AuthConfig::with_token("bench-token"),
        ..RouterConfig::default()
    };
    let app = build_router(&config, Arc::new(LedgerRegistry::in_memory())).unwrap();

    c.bench_function("ol-02-post-offer", |b| {
        b.iter(|| {
            let req = Request::builder()
                .method(Method::POST)
                .uri("/?domain=bench.example")
                .header(header::AUTHORIZATION, "Bearer bench-token")
                .body(Body::from(r#"{"email":"a@b.com","amount":500}"#))
                .unwrap();
            black_box(runtime.block_on(app.clone().oneshot(req)).unwrap())
        })
    });
}

criterion_group!(benches, bench_append_offer, bench_list_offers, bench_router_post);
criterion_main!(benches);
