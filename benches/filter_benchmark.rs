use criterion::{criterion_group, criterion_main, Criterion};
use fieldscope::models::{
    EmptyLayerPolicy, FieldFilter, FilterState, LayerState, MonitoringSite, Severity, SiteId,
};
use fieldscope::services::markers::specs_for;
use fieldscope::services::{compute_visible, reconcile, SiteCatalog};
use std::hint::black_box;

/// The bundled sites repeated with fresh ids until the catalog is `copies` times larger.
fn scaled_catalog(copies: usize) -> SiteCatalog {
    let base = SiteCatalog::builtin().expect("Failed to load bundled catalog");
    let sites: Vec<MonitoringSite> = (0..copies)
        .flat_map(|copy| {
            base.sites().iter().map(move |site| MonitoringSite {
                id: SiteId::new(format!("{}-{}", site.id, copy)),
                ..site.clone()
            })
        })
        .collect();
    SiteCatalog::new(sites).expect("Failed to build scaled catalog")
}

fn benchmark_visible_set(c: &mut Criterion) {
    let catalog = scaled_catalog(500);
    let everything = FilterState::default();
    let narrowed = FilterState::default()
        .with_search("county")
        .with_severity(FieldFilter::Only(Severity::High))
        .with_date_range(fieldscope::models::DateRange::new(Some("2024-01-01"), None));

    let mut group = c.benchmark_group("compute_visible");

    group.bench_function("no_filters", |b| {
        b.iter(|| {
            compute_visible(
                black_box(&catalog),
                black_box(&everything),
                &LayerState::none(),
                EmptyLayerPolicy::MatchAll,
            )
        })
    });

    group.bench_function("search_severity_dates", |b| {
        b.iter(|| {
            compute_visible(
                black_box(&catalog),
                black_box(&narrowed),
                &LayerState::none(),
                EmptyLayerPolicy::MatchAll,
            )
        })
    });

    group.finish();
}

fn benchmark_reconcile(c: &mut Criterion) {
    let catalog = scaled_catalog(500);
    let all = specs_for(catalog.sites(), None);
    let high = specs_for(
        catalog
            .sites()
            .iter()
            .filter(|s| s.severity >= Severity::High),
        all.first().map(|s| &s.site_id),
    );

    let mut group = c.benchmark_group("reconcile");

    group.bench_function("unchanged", |b| {
        b.iter(|| reconcile(black_box(&all), black_box(&all)))
    });

    group.bench_function("narrow_to_high", |b| {
        b.iter(|| reconcile(black_box(&all), black_box(&high)))
    });

    group.finish();
}

criterion_group!(benches, benchmark_visible_set, benchmark_reconcile);
criterion_main!(benches);
