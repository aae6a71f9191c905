use balanced_tree::BalancedTree;
use criterion::{measurement::Measurement, BenchmarkGroup, BenchmarkId, Criterion, Throughput};

use crate::Lfsr;

#[derive(Debug, Clone, Copy)]
struct BenchName {
    order: &'static str,
    n_values: usize,
}

impl From<BenchName> for BenchmarkId {
    fn from(v: BenchName) -> Self {
        Self::new(format!("{}/n_values", v.order), v.n_values)
    }
}

pub(super) fn bench(c: &mut Criterion) {
    let mut g = c.benchmark_group("insert");

    for n_values in [1, 100, 1_000, 10_000] {
        bench_random(&mut g, n_values);
        bench_ascending(&mut g, n_values);
        bench_descending(&mut g, n_values);
    }
}

/// Generate a benchmark measuring the time needed to insert `n_values` keys,
/// produced by `$keys`, into an empty tree.
macro_rules! insert_bench {
    (
        $order:ident,
        $keys:expr
    ) => {
        paste::paste! {
            fn [<bench_ $order>]<M>(g: &mut BenchmarkGroup<'_, M>, n_values: usize)
            where
                M: Measurement,
            {
                let bench_name = BenchName {
                    order: stringify!($order),
                    n_values,
                };

                g.throughput(Throughput::Elements(n_values as _)); // Keys inserted per second
                g.bench_function(BenchmarkId::from(bench_name), |b| {
                    b.iter_batched(
                        || (BalancedTree::default(), Lfsr::default()),
                        |(mut t, mut rand)| {
                            for i in 0..n_values {
                                t.insert(($keys)(i, &mut rand));
                            }
                            t
                        },
                        criterion::BatchSize::PerIteration,
                    );
                });
            }
        }
    };
}

insert_bench!(random, |_i: usize, rand: &mut Lfsr| rand.next() as usize);
insert_bench!(ascending, |i: usize, _rand: &mut Lfsr| i);
insert_bench!(descending, |i: usize, _rand: &mut Lfsr| usize::MAX - i);
