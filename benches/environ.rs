// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Scopedeck-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Scopedeck and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion, Throughput};

use scopedeck::backend::search;
use scopedeck::environ::{
    Contribution, EnvFilter, EnvValue, EnvironmentModel, Provenance, ResolvedEnvironment,
};

// Group names (`environ.load`, `environ.filter`, `search.rank`) and case IDs
// stay stable so results remain comparable over time.

const LAYERS: &[&str] = &["studio", "sintel", "chars", "model"];

fn environment(vars: usize) -> (ResolvedEnvironment, Provenance) {
    let mut env = ResolvedEnvironment::new();
    let mut provenance = Provenance::new();
    for idx in 0..vars {
        let key = format!("VAR_{idx:04}");
        let contributions = LAYERS
            .iter()
            .take(1 + idx % LAYERS.len())
            .map(|layer| Contribution {
                scope: (*layer).into(),
                value: format!("/opt/{layer}/lib/{idx}"),
            })
            .collect::<Vec<_>>();
        let joined = contributions
            .iter()
            .rev()
            .map(|c| c.value.as_str())
            .collect::<Vec<_>>()
            .join(":");
        let source = contributions.last().map(|c| c.scope.clone()).unwrap_or_default();
        env.insert(key.clone(), EnvValue::new(joined, source));
        provenance.insert(key, contributions);
    }
    (env, provenance)
}

fn loaded(vars: usize) -> EnvironmentModel {
    let (env, provenance) = environment(vars);
    let mut model = EnvironmentModel::new();
    model.load(env);
    model.note(&provenance);
    model
}

fn bench_load(c: &mut Criterion) {
    let mut group = c.benchmark_group("environ.load");
    for (case, vars) in [("small", 40), ("large", 2_000)] {
        group.throughput(Throughput::Elements(vars as u64));
        group.bench_function(case, |b| {
            b.iter_batched(
                || environment(vars),
                |(env, provenance)| {
                    let mut model = EnvironmentModel::new();
                    model.load(env);
                    model.note(&provenance);
                    black_box(model.rows().len())
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("environ.filter");
    let model = loaded(2_000);
    let cases: [(&str, &str, bool); 4] = [
        ("key_literal", "VAR_01", false),
        ("key_regex", "^VAR_0[0-4]", false),
        ("value_scope", "chars", true),
        ("invalid_regex", "lib/(1", true),
    ];
    group.throughput(Throughput::Elements(model.rows().len() as u64));
    for (case, text, by_value) in cases {
        let mut filter = EnvFilter::new();
        if by_value {
            filter.filter_by_value();
        }
        filter.set_text(text);
        group.bench_function(case, |b| {
            b.iter(|| black_box(filter.visible_rows(&model, true).len()));
        });
    }
    group.finish();
}

fn bench_rank(c: &mut Criterion) {
    let mut group = c.benchmark_group("search.rank");
    let names = (0..1_000)
        .map(|idx| format!("asset_{idx:04}_{}", LAYERS[idx % LAYERS.len()]))
        .collect::<Vec<_>>();
    group.throughput(Throughput::Elements(names.len() as u64));
    for (case, needle) in [("empty", ""), ("short", "ch"), ("exact", "asset_0420_studio")] {
        group.bench_function(case, |b| {
            b.iter(|| black_box(search::rank(needle, names.iter().map(String::as_str)).len()));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_load, bench_filter, bench_rank);
criterion_main!(benches);
