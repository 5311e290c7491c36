use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use railmap_layout::config::LayoutConfig;
use railmap_layout::geometry::Spacing;
use railmap_layout::layout::{
    Baseline, LineLayoutOptions, MeasuredWrapping, TextAnchor, TextBox, TextHints, layout_line,
};
use railmap_layout::model::{Direction, Station};
use std::hint::black_box;

const NAMES: [&str; 8] = [
    "Riverside",
    "Old Town Square",
    "Central Exchange",
    "Harbour Gate",
    "Museum Quarter",
    "North Junction",
    "Cathedral Green",
    "Airport Terminal",
];

fn synthetic_stations(count: usize) -> Vec<Station> {
    (0..count)
        .map(|i| Station {
            name: format!("{} {}", NAMES[i % NAMES.len()], i),
            lines: Vec::new(),
            terminus: false,
        })
        .collect()
}

fn measure(station: &Station, hints: TextHints) -> Vec<MeasuredWrapping> {
    // fixed per-character advance keeps the bench independent of fonts
    let words: Vec<&str> = station.name.split(' ').collect();
    let mut candidates = vec![words.join(" ")];
    if words.len() > 1 {
        let split = words.len() / 2;
        candidates.push(format!("{}\n{}", words[..split].join(" "), words[split..].join(" ")));
    }
    candidates
        .iter()
        .map(|text| {
            let lines: Vec<String> = text.split('\n').map(str::to_string).collect();
            let boxes = lines
                .iter()
                .map(|line| {
                    let width = line.chars().count() as f32 * 9.0;
                    let x = match hints.text_anchor {
                        TextAnchor::Start => 0.0,
                        TextAnchor::Middle => -width / 2.0,
                        TextAnchor::End => -width,
                    };
                    let y = match hints.dominant_baseline {
                        Baseline::Alphabetic => -11.0,
                        Baseline::Hanging => 0.0,
                    };
                    TextBox::new(x, y, width, 14.0)
                })
                .collect();
            MeasuredWrapping { lines, boxes }
        })
        .collect()
}

fn bench_config() -> LayoutConfig {
    let mut config = LayoutConfig::default();
    config.spacing.marker = Spacing::uniform(4.0);
    config.spacing.label = Spacing::uniform(4.0);
    config.gap.marker_label = Spacing::new(6.0, 6.0);
    config
}

fn bench_layout_line(c: &mut Criterion) {
    let config = bench_config();
    let mut group = c.benchmark_group("layout_line");
    for count in [8usize, 32, 128] {
        let stations = synthetic_stations(count);
        group.bench_with_input(BenchmarkId::new("south", count), &stations, |b, stations| {
            b.iter(|| {
                let positions = layout_line(
                    black_box(stations),
                    Direction::South,
                    &config,
                    &mut measure,
                    &LineLayoutOptions::default(),
                )
                .unwrap();
                black_box(positions)
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_layout_line);
criterion_main!(benches);
