//! Benchmarks for copy versus view across the binding boundary

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use hello_bindings::prelude::*;
use ndarray::Ix1;

fn bench_holder_returns(c: &mut Criterion) {
    let mut group = c.benchmark_group("holder_returns");

    for dim in [100usize, 1000] {
        let holder = MatrixHolder::new(dim, dim);
        group.throughput(Throughput::Bytes((dim * dim * 8) as u64));

        group.bench_with_input(BenchmarkId::new("copy_matrix", dim), &holder, |b, h| {
            b.iter(|| black_box(h.copy_matrix().unwrap()))
        });
        group.bench_with_input(BenchmarkId::new("get_matrix", dim), &holder, |b, h| {
            b.iter(|| black_box(h.get_matrix().unwrap()))
        });
        group.bench_with_input(BenchmarkId::new("view_matrix", dim), &holder, |b, h| {
            b.iter(|| black_box(h.view_matrix().unwrap()))
        });
    }

    group.finish();
}

fn bench_parameter_kinds(c: &mut Criterion) {
    let mut group = c.benchmark_group("parameter_kinds");

    let n = 1_000_000;
    let host = HostArray::zeros(DType::F64, &[n]);
    let spec = ShapeSpec::dyn_vector();
    group.throughput(Throughput::Elements(n as u64));

    group.bench_function("value", |b| {
        b.iter(|| load_value::<f64, Ix1>(black_box(&host), &spec, false).map(|a| a.len()))
    });
    group.bench_function("value_converting", |b| {
        b.iter(|| load_value::<f32, Ix1>(black_box(&host), &spec, true).map(|a| a.len()))
    });
    group.bench_function("const_ref", |b| {
        b.iter(|| with_const_ref::<f64, Ix1, _>(black_box(&host), &spec, |v| v.len()))
    });
    group.bench_function("mut_ref", |b| {
        b.iter(|| with_mut_ref::<f64, Ix1, _>(black_box(&host), &spec, |v| v.len()))
    });

    group.finish();
}

fn bench_dispatch(c: &mut Criterion) {
    let m = hello_module(ModuleConfig::default());
    let mut group = c.benchmark_group("dispatch");

    group.bench_function("add_exact", |b| {
        b.iter(|| m.call("add", black_box(vec![Value::Int(1), Value::Int(2)])))
    });
    group.bench_function("mult_converting", |b| {
        b.iter(|| m.call("mult", black_box(vec![Value::Float(1.5), Value::Int(2)])))
    });

    group.finish();
}

criterion_group!(benches, bench_holder_returns, bench_parameter_kinds, bench_dispatch);

criterion_main!(benches);
