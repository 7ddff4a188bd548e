use std::{hint::black_box, time::Duration};

use book_catalog::CatalogService;
use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use rand::{SeedableRng, rngs::StdRng, seq::SliceRandom};

const BOOKS: usize = 512;

fn custom_criterion() -> Criterion {
    Criterion::default()
        .sample_size(10)
        .measurement_time(Duration::from_secs(1))
        .warm_up_time(Duration::from_secs(1))
}

fn sorted_titles() -> Vec<String> {
    (0..BOOKS).map(|n| format!("Title {n:04}")).collect()
}

fn shuffled_titles() -> Vec<String> {
    let mut titles = sorted_titles();
    titles.shuffle(&mut StdRng::seed_from_u64(42));
    titles
}

fn filled(titles: &[String]) -> CatalogService {
    let mut catalog = CatalogService::new();
    for title in titles {
        catalog.add_book(title.as_str(), "Author", 2000).expect("titles are unique");
    }
    catalog
}

fn catalog_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("CatalogService Operations");

    // Shuffled titles keep the tree shallow; sorted titles build a chain.
    for (shape, titles) in [("shuffled", shuffled_titles()), ("sorted", sorted_titles())] {
        group.bench_function(format!("add_{shape}"), |b| {
            b.iter_batched(
                CatalogService::new,
                |mut catalog| {
                    for title in &titles {
                        catalog.add_book(title.as_str(), "Author", 2000).expect("titles are unique");
                    }
                    catalog
                },
                BatchSize::SmallInput,
            );
        });

        group.bench_function(format!("remove_all_{shape}"), |b| {
            b.iter_batched(
                || filled(&titles),
                |mut catalog| {
                    for title in &titles {
                        catalog.remove_book(title).expect("title was added");
                    }
                    catalog
                },
                BatchSize::SmallInput,
            );
        });

        group.bench_function(format!("undo_all_{shape}"), |b| {
            b.iter_batched(
                || filled(&titles),
                |mut catalog| {
                    while catalog.undo().is_ok() {}
                    catalog
                },
                BatchSize::SmallInput,
            );
        });

        let catalog = filled(&titles);
        group.bench_function(format!("list_{shape}"), |b| {
            b.iter(|| black_box(catalog.list_books().count()));
        });
    }

    group.finish();
}

criterion_group! {
    name = benches;
    config = custom_criterion();
    targets = catalog_bench
}
criterion_main!(benches);
