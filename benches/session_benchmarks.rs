use blogpad::auth::{MemorySessionStore, SessionId, SessionManager, SessionRecord};
use blogpad::config::SessionConfig;
use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use std::sync::Arc;

fn identity() -> SessionRecord {
    SessionRecord {
        id: "65a1b2c3d4e5f60718293a4b".to_string(),
        email: "a@x.com".to_string(),
        name: "Alice".to_string(),
    }
}

fn bench_session_id(c: &mut Criterion) {
    c.bench_function("session_id_generate", |b| b.iter(SessionId::generate));

    let id = SessionId::generate();
    c.bench_function("session_id_parse", |b| {
        b.iter(|| SessionId::parse(black_box(id.as_str())))
    });
}

fn bench_session_lifecycle(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let manager = SessionManager::new(
        Arc::new(MemorySessionStore::new()),
        &SessionConfig::default(),
    );
    let record = identity();

    c.bench_function("session_establish", |b| {
        b.iter(|| rt.block_on(manager.establish(None, black_box(&record))))
    });

    let id = rt.block_on(manager.establish(None, &record)).unwrap();
    c.bench_function("session_resolve", |b| {
        b.iter(|| rt.block_on(manager.resolve(black_box(Some(&id)))))
    });
}

criterion_group!(benches, bench_session_id, bench_session_lifecycle);
criterion_main!(benches);
