use avl_index::{Aa, Avl, Balance, Map};
use compare::Natural;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

type M<B> = Map<usize, usize, Natural<usize>, B>;

fn seeded() -> StdRng { StdRng::seed_from_u64(0x5EED) }

fn insert_rand<B: Balance>(c: &mut Criterion, name: &str) {
    let mut group = c.benchmark_group(format!("insert_rand/{}", name));

    for &n in &[100, 10_000] {
        let mut rng = seeded();
        let mut map = M::<B>::with_balance(compare::natural());
        for _ in 0..n {
            let i = rng.gen::<usize>() % n;
            map.insert(i, i);
        }

        group.bench_function(BenchmarkId::from_parameter(n), |b| b.iter(|| {
            let k = rng.gen::<usize>() % n;
            map.insert(k, k);
            map.remove(&k);
        }));
    }

    group.finish();
}

fn insert_seq<B: Balance>(c: &mut Criterion, name: &str) {
    let mut group = c.benchmark_group(format!("insert_seq/{}", name));

    for &n in &[100, 10_000] {
        let mut map = M::<B>::with_balance(compare::natural());
        for i in 0..n { map.insert(i * 2, i * 2); }

        let mut i = 1;
        group.bench_function(BenchmarkId::from_parameter(n), |b| b.iter(|| {
            map.insert(i, i);
            map.remove(&i);
            i = (i + 2) % (2 * n);
        }));
    }

    group.finish();
}

fn find_rand<B: Balance>(c: &mut Criterion, name: &str) {
    let mut group = c.benchmark_group(format!("find_rand/{}", name));

    for &n in &[100, 10_000] {
        let mut rng = seeded();
        let mut keys: Vec<_> = (0..n).map(|_| rng.gen::<usize>() % n).collect();
        let map: M<B> = keys.iter().map(|&k| (k, k)).collect();
        keys.shuffle(&mut rng);

        let mut i = 0;
        group.bench_function(BenchmarkId::from_parameter(n), |b| b.iter(|| {
            let t = map.get(&keys[i]);
            i = (i + 1) % n;
            black_box(t);
        }));
    }

    group.finish();
}

fn find_seq<B: Balance>(c: &mut Criterion, name: &str) {
    let mut group = c.benchmark_group(format!("find_seq/{}", name));

    for &n in &[100, 10_000] {
        let map: M<B> = (0..n).map(|i| (i, i)).collect();

        let mut i = 0;
        group.bench_function(BenchmarkId::from_parameter(n), |b| b.iter(|| {
            let x = map.get(&i);
            i = (i + 1) % n;
            black_box(x);
        }));
    }

    group.finish();
}

fn neighbours<B: Balance>(c: &mut Criterion, name: &str) {
    let mut group = c.benchmark_group(format!("succ/{}", name));

    for &n in &[100, 10_000] {
        let mut rng = seeded();
        let map: M<B> = (0..n).map(|i| (i * 2, i)).collect();

        group.bench_function(BenchmarkId::from_parameter(n), |b| b.iter(|| {
            let k = rng.gen::<usize>() % (2 * n);
            black_box((map.succ(&k, false), map.pred(&k, false)));
        }));
    }

    group.finish();
}

fn iter<B: Balance>(c: &mut Criterion, name: &str) {
    let mut group = c.benchmark_group(format!("iter/{}", name));

    for &n in &[100, 1000, 100_000] {
        let mut rng = seeded();
        let map: M<B> = (0..n).map(|_| (rng.gen(), rng.gen())).collect();

        group.bench_function(BenchmarkId::from_parameter(n), |b| b.iter(|| {
            for entry in map.iter() {
                black_box(entry);
            }
        }));
    }

    group.finish();
}

fn bench_avl(c: &mut Criterion) {
    insert_rand::<Avl>(c, "avl");
    insert_seq::<Avl>(c, "avl");
    find_rand::<Avl>(c, "avl");
    find_seq::<Avl>(c, "avl");
    neighbours::<Avl>(c, "avl");
    iter::<Avl>(c, "avl");
}

fn bench_aa(c: &mut Criterion) {
    insert_rand::<Aa>(c, "aa");
    insert_seq::<Aa>(c, "aa");
    find_rand::<Aa>(c, "aa");
    find_seq::<Aa>(c, "aa");
    neighbours::<Aa>(c, "aa");
    iter::<Aa>(c, "aa");
}

criterion_group!(benches, bench_avl, bench_aa);
criterion_main!(benches);
