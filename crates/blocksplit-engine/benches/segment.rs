use blocksplit_engine::Segmenter;
use criterion::{Criterion, criterion_group, criterion_main};

fn generate_reply(sections: usize) -> String {
    let mut out = String::new();
    for i in 0..sections {
        out.push_str(&format!("Step {i}: update the handler.\n\n"));
        out.push_str("```rust\nfn handle(req: Request) -> Response {\n    todo()\n}\n```\n\n");
        if i % 5 == 0 {
            out.push_str("<svg width=\"16\" height=\"16\"><circle r=\"8\"/></svg>\n\n");
        }
    }
    out
}

fn bench_segment(c: &mut Criterion) {
    let mut group = c.benchmark_group("segment");
    group.sample_size(10);

    let reply = generate_reply(100);
    let segmenter = Segmenter::new();

    group.bench_function("full_reply", |b| {
        b.iter(|| {
            let segments = segmenter.segment(std::hint::black_box(&reply));
            std::hint::black_box(segments);
        });
    });

    // A streaming caller re-segments the whole buffer after every chunk
    group.bench_function("streaming_64_byte_chunks", |b| {
        b.iter(|| {
            let mut end = 0;
            while end < reply.len() {
                end = (end + 64).min(reply.len());
                while !reply.is_char_boundary(end) {
                    end += 1;
                }
                let segments = segmenter.segment(std::hint::black_box(&reply[..end]));
                std::hint::black_box(segments);
            }
        });
    });

    group.finish();
}

criterion_group!(benches, bench_segment);
criterion_main!(benches);
