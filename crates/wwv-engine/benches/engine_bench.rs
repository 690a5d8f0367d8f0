use criterion::{black_box, criterion_group, criterion_main, Criterion};
use time::macros::datetime;
use wwv_engine::{AnchoredClock, Engine, EngineConfig, RenderMode, SoundBank};
use wwv_ir::encode_frame;

fn bench_encode(c: &mut Criterion) {
    let instant = datetime!(2023-06-15 14:22 UTC);
    c.bench_function("encode_frame", |b| b.iter(|| encode_frame(black_box(instant))));
}

fn bench_render(c: &mut Criterion) {
    for (name, mode) in [("render_trigger_1s", RenderMode::Trigger), ("render_envelope_1s", RenderMode::Envelope)] {
        c.bench_function(name, |b| {
            let config = EngineConfig { mode, ..EngineConfig::default() };
            let clock = AnchoredClock::new(datetime!(2023-06-15 14:22 UTC));
            let mut engine = Engine::new(config, SoundBank::synthesized(48_000, 100.0), Box::new(clock), 48_000);
            engine.start();
            b.iter(|| {
                for _ in 0..48_000 {
                    black_box(engine.render_frame());
                }
            });
        });
    }
}

criterion_group!(benches, bench_encode, bench_render);
criterion_main!(benches);
