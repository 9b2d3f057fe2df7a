use criterion::{black_box, criterion_group, criterion_main, Criterion};
use plan_core::{FinancialItem, Frequency, ItemKind};
use rust_decimal::Decimal;

fn build_items(n_items: usize) -> Vec<FinancialItem> {
    let mut items = Vec::with_capacity(n_items);
    for i in 0..n_items {
        let kind = if i % 3 == 0 {
            ItemKind::Revenue
        } else {
            ItemKind::Cost
        };
        let frequency = match i % 4 {
            0 => Frequency::OneTime,
            1 => Frequency::Yearly,
            _ => Frequency::Monthly,
        };
        let mut item = FinancialItem::new(
            format!("i{i}"),
            format!("Item {i}"),
            format!("C{}", i % 7),
            kind,
            Decimal::new(1_000 + i as i64 * 37, 0),
            frequency,
            (i % 24) as u32 + 1,
        );
        if i % 5 == 0 {
            item.ends_at = Some((i % 24) as u32 + 12);
        }
        items.push(item);
    }
    items
}

fn bench_cumulative(c: &mut Criterion) {
    let items = build_items(200);
    c.bench_function("timeline_series 200 items x 60 months", |b| {
        b.iter(|| black_box(plan_econ::timeline_series(&items, 60)))
    });
    c.bench_function("cumulative_analytics per column 200 items x 60 months", |b| {
        b.iter(|| {
            for p in 0..60 {
                black_box(plan_econ::cumulative_analytics(&items, p, 60));
            }
        })
    });
}

criterion_group!(benches, bench_cumulative);
criterion_main!(benches);
