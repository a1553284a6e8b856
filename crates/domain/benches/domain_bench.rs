use common::{Money, UserId};
use criterion::{Criterion, criterion_group, criterion_main};
use domain::{CartService, CheckoutItem, CheckoutService, ProductSnapshot};
use store::{CustomerInfo, InMemoryStore, Product};

fn bench_add_item(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let store = InMemoryStore::new();
    let mug = Product::new("Mug", "Ceramic mug", Money::from_cents(999), true);
    rt.block_on(store.insert_product(mug.clone()));
    let service = CartService::new(store);
    let user_id = UserId::from("bench-user");

    c.bench_function("domain/add_item", |b| {
        b.iter(|| {
            rt.block_on(async {
                service.add_item(&user_id, mug.id, 1).await.unwrap();
            });
        });
    });
}

fn bench_get_cart(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let store = InMemoryStore::new();
    let mug = Product::new("Mug", "Ceramic mug", Money::from_cents(999), true);
    let service = CartService::new(store.clone());
    let user_id = UserId::from("bench-user");

    rt.block_on(async {
        store.insert_product(mug.clone()).await;
        service.add_item(&user_id, mug.id, 3).await.unwrap();
    });

    c.bench_function("domain/get_cart", |b| {
        b.iter(|| {
            rt.block_on(async {
                service.get_cart(&user_id).await.unwrap();
            });
        });
    });
}

fn bench_checkout(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let user_id = UserId::from("bench-user");

    c.bench_function("domain/checkout", |b| {
        b.iter(|| {
            rt.block_on(async {
                let store = InMemoryStore::new();
                let service = CheckoutService::new(store);
                service
                    .checkout(
                        &user_id,
                        vec![CheckoutItem {
                            product: ProductSnapshot {
                                name: "Mug".to_string(),
                                price: Money::from_cents(999),
                            },
                            quantity: 2,
                        }],
                        CustomerInfo {
                            name: "Bench".to_string(),
                            email: "bench@example.com".to_string(),
                        },
                    )
                    .await
                    .unwrap();
            });
        });
    });
}

criterion_group!(benches, bench_add_item, bench_get_cart, bench_checkout);
criterion_main!(benches);
