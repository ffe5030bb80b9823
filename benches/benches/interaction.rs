// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::time::Duration;

use canopy_interact::{Axes, DragTarget, EngineConfig, ViewEngine};
use canopy_view::{NodeBox, Projection, ViewportState, indicator_geometry, minimap_zoom};
use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use kurbo::{Point, Size, Vec2};

const SCREEN: Size = Size::new(1600.0, 1000.0);
const TREE: Size = Size::new(250.0, 40_000.0);

#[derive(Clone)]
struct Lcg(u64);

impl Lcg {
    fn next_unit(&mut self) -> f64 {
        // Numerical Recipes LCG parameters.
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        f64::from((self.0 >> 32) as u32) / f64::from(u32::MAX)
    }

    fn next_point(&mut self) -> Point {
        Point::new(
            self.next_unit() * SCREEN.width,
            self.next_unit() * SCREEN.height,
        )
    }
}

fn engine(projection: Projection) -> ViewEngine {
    let mut engine = ViewEngine::new(EngineConfig::default(), SCREEN, TREE, projection)
        .expect("default config fits the tree");
    engine
        .set_minimap_size(Size::new(120.0, 400.0))
        .expect("minimap size is valid");
    engine.drain_events().for_each(drop);
    engine
}

fn bench_interaction(c: &mut Criterion) {
    let mut group = c.benchmark_group("canopy_interact");
    group.sample_size(50);

    for projection in [Projection::Rectangular, Projection::Circular] {
        for &ticks in &[16_usize, 256] {
            group.bench_function(format!("wheel_burst({projection:?},ticks={ticks})"), |b| {
                b.iter_batched(
                    || (engine(projection), Lcg(0xCA90_0000_0000_0001)),
                    |(mut engine, mut rng)| {
                        for i in 0..ticks {
                            let at = Duration::from_millis(i as u64 * 10);
                            let zoom_in = i % 3 != 0;
                            engine.zoom_around(rng.next_point(), zoom_in, Axes::BOTH, at);
                        }
                        engine.poll(Duration::from_secs(60));
                        black_box(engine.drain_events().count());
                    },
                    BatchSize::SmallInput,
                );
            });
        }

        group.bench_function(format!("drag(moves=256,{projection:?})"), |b| {
            b.iter_batched(
                || engine(projection),
                |mut engine| {
                    let mut p = Point::new(800.0, 500.0);
                    engine.drag_start(p, DragTarget::MainView);
                    for i in 0..256 {
                        let movement = Vec2::new(if i % 2 == 0 { 3.0 } else { -1.0 }, 2.0);
                        p += movement;
                        engine.drag_move(p, movement);
                    }
                    engine.drag_stop();
                    black_box(engine.drain_events().count());
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.bench_function("zoom_into_box", |b| {
        b.iter_batched(
            || engine(Projection::Circular),
            |mut engine| {
                let node = NodeBox::sector(80.0, 0.3, 40.0, 0.05);
                engine.zoom_into_box(&node).expect("sector is not degenerate");
                black_box(engine.state().zoom());
            },
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

fn bench_minimap(c: &mut Criterion) {
    let mut group = c.benchmark_group("canopy_view");
    let minimap = Size::new(120.0, 400.0);
    let mz = minimap_zoom(TREE, minimap, Projection::Rectangular, 0.0)
        .expect("tree and minimap are not degenerate");
    let mut rng = Lcg(0xCA90_0000_0000_0002);
    let views: Vec<ViewportState> = (0..1024)
        .map(|_| {
            let top_left = Point::new(
                rng.next_unit() * 400.0 - 100.0,
                rng.next_unit() * 50_000.0 - 5_000.0,
            );
            let zoom = Vec2::new(0.5 + rng.next_unit() * 50.0, 0.01 + rng.next_unit() * 5.0);
            ViewportState::from_parts(SCREEN, Projection::Rectangular, top_left, zoom)
                .expect("generated views are in range")
        })
        .collect();

    group.bench_function("indicator_geometry(views=1024)", |b| {
        b.iter(|| {
            let mut area = 0.0;
            for view in &views {
                let g = indicator_geometry(view, mz, minimap, Size::new(5.0, 5.0));
                area += g.size.width * g.size.height;
            }
            black_box(area)
        });
    });

    group.finish();
}

criterion_group!(benches, bench_interaction, bench_minimap);
criterion_main!(benches);
