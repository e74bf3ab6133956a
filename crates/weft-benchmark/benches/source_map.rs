use std::hint::black_box;

use codspeed_criterion_compat::{Criterion, Throughput, criterion_group, criterion_main};
use text_size::TextSize;
use weft_parse::{ParserOptions, parse};
use weft_source_map::SourceMap;
use weft_tokenizer::Dialect;

fn document() -> String {
    (0..200).map(|i| format!("Paragraph {i} mentions {{value_{i}}} inline.\n\n")).collect()
}

fn benchmark_source_map(c: &mut Criterion) {
    let text = document();
    let options = ParserOptions { dialect: Dialect::Mdx, ..ParserOptions::default() };
    let parse = parse(&text, &options);

    let mut group = c.benchmark_group("Source Map Benchmark");
    group.throughput(Throughput::Bytes(text.len() as u64));

    group.bench_function("transform", |b| {
        b.iter(|| black_box(weft_transform::transform(parse.tree(), "bench.mdx")));
    });

    let artifacts = weft_transform::transform(parse.tree(), "bench.mdx");
    let script = artifacts
        .into_iter()
        .find(|artifact| artifact.kind == weft_transform::ArtifactKind::Script)
        .unwrap();
    let offsets = (0..text.len() as u32).step_by(7).map(TextSize::new).collect::<Vec<_>>();

    group.bench_function("map_offsets_cold", |b| {
        b.iter(|| {
            let map = SourceMap::new(
                "bench.mdx",
                script.file_name.as_str(),
                script.mappings.clone(),
            );
            for &offset in &offsets {
                black_box(map.mapped_offset(offset));
            }
        });
    });

    group.finish();
}

criterion_group!(benches, benchmark_source_map);
criterion_main!(benches);
