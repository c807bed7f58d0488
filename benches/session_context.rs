// benches/session_context.rs
use criterion::{Criterion, black_box, criterion_group, criterion_main};

use allaround::analytics;
use allaround::config::options::default_athletes;
use allaround::model::{Event, MeetScoreRow};
use allaround::schema::normalize_table;
use allaround::store::DataSet;

/// A season's worth of synthetic sessions: 12 meets × 6 sessions × 40 athletes.
fn synthetic_rows() -> Vec<MeetScoreRow> {
    let names = ["Annabelle Sheehy", "Azalea Sheehy"];
    let mut out = Vec::new();
    for meet in 0..12 {
        for session in 0..6 {
            for kid in 0..40 {
                let name = if kid < names.len() { names[kid].to_string() } else { format!("Kid {kid}") };
                let mut r = MeetScoreRow::new(&name, &format!("Meet {meet}"));
                r.date = format!("2026-{:02}-01", meet % 12 + 1);
                r.session = session.to_string();
                r.level = (3 + session % 3).to_string();
                let base = 8.0 + ((kid * 7 + meet * 3 + session) % 20) as f64 / 10.0;
                for (i, ev) in [Event::VT, Event::UB, Event::BB, Event::FX].into_iter().enumerate() {
                    r.set(ev, base + i as f64 * 0.05, "");
                }
                r.set(Event::AA, base * 4.0 + 0.3, "");
                out.push(r);
            }
        }
    }
    out
}

fn bench_context(c: &mut Criterion) {
    let rows = synthetic_rows();
    let athletes = default_athletes();

    c.bench_function("context_tracked", |b| {
        b.iter(|| {
            let (records, _) = analytics::compute(black_box(&rows), Some("2026"), &athletes);
            black_box(records.len())
        })
    });

    c.bench_function("context_everyone", |b| {
        b.iter(|| {
            let (records, _) = analytics::compute(black_box(&rows), None, &[]);
            black_box(records.len())
        })
    });

    let table: DataSet = allaround::schema::to_table(&rows);
    c.bench_function("normalize_table", |b| {
        b.iter(|| {
            let (rows, _) = normalize_table(black_box(&table));
            black_box(rows.len())
        })
    });
}

criterion_group!(benches, bench_context);
criterion_main!(benches);
