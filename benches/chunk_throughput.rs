//! Criterion benchmarks for chunking and reassembly throughput.
//!
//! Covers splitting payloads of representative sizes at the conservative
//! data-channel MTU, and folding them back in both in-order and reversed
//! arrival order.

use std::{num::NonZeroUsize, time::Duration};

use chunkwire::{ChunkFrame, Chunker, DEFAULT_MTU, Reassembler};
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

const PAYLOAD_SIZES: &[usize] = &[4 * 1024, 64 * 1024, 1024 * 1024];

fn chunker() -> Chunker {
    Chunker::new(NonZeroUsize::new(DEFAULT_MTU).expect("non-zero mtu"))
}

fn chunks_for(len: usize) -> Vec<ChunkFrame> {
    chunker()
        .chunk_bytes(vec![0xA5_u8; len])
        .expect("chunk payload")
        .into_chunks()
}

fn reassemble(chunks: &[ChunkFrame], len: usize) -> Vec<u8> {
    let mut reassembler = Reassembler::new(
        NonZeroUsize::new(len.max(1)).expect("non-zero cap"),
        Duration::from_secs(30),
    );
    let mut rebuilt = None;
    for chunk in chunks {
        if let Some(transfer) = reassembler
            .submit_frame(chunk.clone())
            .expect("chunk accepted")
        {
            rebuilt = Some(transfer.into_payload());
        }
    }
    rebuilt.expect("transfer completes")
}

fn benchmark_chunking(c: &mut Criterion) {
    let mut group = c.benchmark_group("chunk/split");

    for &len in PAYLOAD_SIZES {
        let payload = vec![0xA5_u8; len];
        group.throughput(Throughput::Bytes(len as u64));
        group.bench_function(BenchmarkId::from_parameter(len), |b| {
            let chunker = chunker();
            b.iter(|| {
                let batch = chunker
                    .chunk_bytes(black_box(&payload))
                    .expect("chunk payload");
                black_box(batch.len());
            });
        });
    }

    group.finish();
}

fn benchmark_reassembly(c: &mut Criterion) {
    let mut group = c.benchmark_group("chunk/reassemble");

    for &len in PAYLOAD_SIZES {
        let in_order = chunks_for(len);
        let mut reversed = in_order.clone();
        reversed.reverse();

        group.throughput(Throughput::Bytes(len as u64));
        group.bench_function(BenchmarkId::new("in_order", len), |b| {
            b.iter(|| black_box(reassemble(&in_order, len).len()));
        });
        group.bench_function(BenchmarkId::new("reversed", len), |b| {
            b.iter(|| black_box(reassemble(&reversed, len).len()));
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_chunking, benchmark_reassembly);
criterion_main!(benches);
