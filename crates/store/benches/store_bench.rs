use chrono::Utc;
use criterion::{Criterion, criterion_group, criterion_main};
use store::{
    CartItem, CartRecord, CartStore, CustomerInfo, InMemoryStore, Money, OrderId, OrderLine,
    OrderRecord, OrderStore, ProductId, UserId,
};

fn bench_put_cart(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let store = InMemoryStore::new();
    let user_id = UserId::from("bench-user");
    let product_id = ProductId::new();

    c.bench_function("store/put_cart", |b| {
        b.iter(|| {
            rt.block_on(async {
                let mut cart = match store.get_cart(&user_id).await.unwrap() {
                    Some(cart) => cart,
                    None => CartRecord::empty(user_id.clone()),
                };
                let expected = cart.version;
                cart.items = vec![CartItem::new(product_id, 1)];
                cart.total = Money::from_cents(999);
                store.put_cart(cart, Some(expected)).await.unwrap();
            });
        });
    });
}

fn bench_get_cart(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let store = InMemoryStore::new();
    let user_id = UserId::from("bench-user");

    rt.block_on(async {
        let mut cart = CartRecord::empty(user_id.clone());
        cart.items = vec![CartItem::new(ProductId::new(), 2)];
        store.put_cart(cart, None).await.unwrap();
    });

    c.bench_function("store/get_cart", |b| {
        b.iter(|| {
            rt.block_on(async {
                store.get_cart(&user_id).await.unwrap().unwrap();
            });
        });
    });
}

fn bench_append_order(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();

    c.bench_function("store/append_order", |b| {
        b.iter(|| {
            rt.block_on(async {
                let store = InMemoryStore::new();
                let order = OrderRecord {
                    order_id: OrderId::generate(),
                    customer_info: CustomerInfo {
                        name: "Bench".to_string(),
                        email: "bench@example.com".to_string(),
                    },
                    items: vec![OrderLine {
                        name: "Widget".to_string(),
                        price: Money::from_cents(1000),
                        quantity: 1,
                        subtotal: Money::from_cents(1000),
                    }],
                    total: Money::from_cents(1000),
                    timestamp: Utc::now(),
                };
                store.append(order).await.unwrap();
            });
        });
    });
}

criterion_group!(benches, bench_put_cart, bench_get_cart, bench_append_order);
criterion_main!(benches);
