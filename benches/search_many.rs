//! This bench searches, saves and reloads a large address book.

#![allow(missing_docs)]

use contacts::{AddressBook, Encoding, Record, Store};
use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use tempfile::TempDir;

/// Generates a book of contacts with two phones each
fn preseed_book(size: usize) -> AddressBook {
    (0..size)
        .map(|i| {
            let mut record = Record::new(&format!("Contact {i}"), Some("1990-05-17")).unwrap();
            let other = i * 7;
            record.add_phone(&format!("{i:010}")).unwrap();
            record.add_phone(&format!("{other:010}")).unwrap();
            record
        })
        .collect()
}

fn search(c: &mut Criterion) {
    let book = preseed_book(10_000);

    c.bench_function("search by name", |b| b.iter(|| book.search("contact 99")));
    c.bench_function("search by phone", |b| b.iter(|| book.search("0000999")));
}

fn round_trip(c: &mut Criterion) {
    let book = preseed_book(10_000);

    for encoding in Encoding::ALL {
        c.bench_function(&format!("save and load ({encoding})"), |b| {
            b.iter_batched(
                || {
                    let tmp_dir = TempDir::new().unwrap();
                    let store = Store::new(tmp_dir.path().join("book"), encoding);
                    (tmp_dir, store)
                },
                |(_tmp_dir, store)| {
                    store.save(&book).unwrap();
                    store.load().unwrap()
                },
                BatchSize::SmallInput,
            );
        });
    }
}

criterion_group!(benches, search, round_trip);
criterion_main!(benches);
