use criterion::{Criterion, black_box, criterion_group, criterion_main};
use prism_color::*;

fn bench_srgb_roundtrip(c: &mut Criterion) {
    let color = black_box(Color::new(0.25, 0.5, 0.75));
    c.bench_function("srgb_roundtrip", |bencher| {
        bencher.iter(|| black_box(srgb_to_linear(linear_to_srgb(color))))
    });
}

fn bench_blend_mix(c: &mut Criterion) {
    let dst = black_box(Linear::rgb(0.2, 0.4, 0.6));
    let src = black_box(Linear::rgb(0.9, 0.1, 0.3));
    c.bench_function("blend_mix", |bencher| {
        bencher.iter(|| black_box(BlendMode::Mix.apply(dst, src, 0.5)))
    });
}

fn bench_blend_vivid_light(c: &mut Criterion) {
    let dst = black_box(Linear::rgb(0.2, 0.4, 0.6));
    let src = black_box(Linear::rgb(0.9, 0.1, 0.3));
    c.bench_function("blend_vivid_light", |bencher| {
        bencher.iter(|| black_box(BlendMode::VividLight.apply(dst, src, 0.5)))
    });
}

fn bench_blend_hue(c: &mut Criterion) {
    let dst = black_box(Linear::rgb(0.2, 0.4, 0.6));
    let src = black_box(Linear::rgb(0.9, 0.1, 0.3));
    c.bench_function("blend_hue", |bencher| {
        bencher.iter(|| black_box(BlendMode::Hue.apply(dst, src, 1.0)))
    });
}

fn bench_all_modes_srgb_pipeline(c: &mut Criterion) {
    let dst = black_box(Srgb::rgb(0.3, 0.6, 0.9));
    let src = black_box(Linear::rgb(0.8, 0.2, 0.4));
    c.bench_function("all_modes_srgb_pipeline", |bencher| {
        bencher.iter(|| {
            for mode in BlendMode::ALL {
                black_box(mode.apply(dst.to_linear(), src, 0.75).to_srgb());
            }
        })
    });
}

criterion_group!(
    benches,
    bench_srgb_roundtrip,
    bench_blend_mix,
    bench_blend_vivid_light,
    bench_blend_hue,
    bench_all_modes_srgb_pipeline,
);
criterion_main!(benches);
