use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use sd_treebank::validation::report::render_text;
use sd_treebank::{parse_document, validate_document, Tagset, TagsetRegistry, ValidateOptions};

fn sindhi() -> Tagset {
    let registry = TagsetRegistry::with_embedded().expect("embedded tagset");
    registry.get_active_tagset().expect("active tagset").clone()
}

/// Generate a corpus of `sentences` sentences for a given scenario
fn generate_corpus(sentences: usize, scenario: &str) -> String {
    let mut content = String::new();

    for i in 0..sentences {
        content.push_str(&format!("# sent_id = bench-{}\n", i));
        let broken = match scenario {
            "all_valid" => false,
            "mixed_errors" => i % 3 == 0,
            _ => true,
        };

        if !broken {
            content.push_str("# text = هو ڪتاب پڙهي ٿو۔\n");
            content.push_str("1\tهو\tهو\tPRON\tPRP\tCase=Nom|Number=Sing|Person=3\t3\tnsubj\t_\t_\n");
            content.push_str("2\tڪتاب\tڪتاب\tNOUN\tNN\tCase=Nom|Number=Sing\t3\tobj\t_\t_\n");
            content.push_str("3\tپڙهي\tپڙهڻ\tVERB\tVM\tGender=Masc|Number=Sing\t0\troot\t_\t_\n");
            content.push_str("4\tٿو\tٿيڻ\tAUX\tVAUX\tGender=Masc|Number=Sing\t3\taux\t_\tSpaceAfter=No\n");
            content.push_str("5\t۔\t۔\tPUNCT\tPUNCT\t_\t3\tpunct\t_\t_\n");
        } else {
            // a cycle, a missing head, an xpos mismatch and a NOUN without
            // features
            content.push_str("# text = هو ڪتاب پڙهي\n");
            content.push_str("1\tهو\tهو\tPRON\tVM\t_\t3\tnsubj\t_\t_\n");
            content.push_str("2\tڪتاب\tڪتاب\tNOUN\tNN\t_\t_\tobj\t_\t_\n");
            content.push_str("3\tپڙهي\tپڙهڻ\tVERB\tVM\t_\t1\tdep\t_\t_\n");
        }
        content.push('\n');
    }

    content
}

/// Benchmark validation with different error densities
fn bench_validation_error_density(c: &mut Criterion) {
    let tagset = sindhi();
    let scenarios = ["all_valid", "mixed_errors", "all_broken"];

    let mut group = c.benchmark_group("validation_error_density");

    for scenario in scenarios {
        let document = parse_document(&generate_corpus(2_000, scenario)).expect("parse corpus");

        group.throughput(Throughput::Elements(document.len() as u64));
        group.bench_with_input(
            BenchmarkId::new("scenario", scenario),
            &document,
            |b, document| {
                b.iter(|| {
                    let result = validate_document(
                        black_box(document),
                        black_box(&tagset),
                        ValidateOptions::default(),
                    );
                    black_box(result)
                })
            },
        );
    }

    group.finish();
}

/// Benchmark validation scalability with different corpus sizes
fn bench_validation_scalability(c: &mut Criterion) {
    let tagset = sindhi();
    let sizes = [100, 1_000, 10_000];

    let mut group = c.benchmark_group("validation_scalability");

    for &size in &sizes {
        let document = parse_document(&generate_corpus(size, "mixed_errors")).expect("parse corpus");

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("sentences", size), &document, |b, document| {
            b.iter(|| {
                let result = validate_document(
                    black_box(document),
                    black_box(&tagset),
                    ValidateOptions::default(),
                );
                black_box(result)
            })
        });
    }

    group.finish();
}

/// Benchmark the text report for a corpus with many violations
fn bench_report_rendering(c: &mut Criterion) {
    let tagset = sindhi();
    let document = parse_document(&generate_corpus(5_000, "all_broken")).expect("parse corpus");
    let result =
        validate_document(&document, &tagset, ValidateOptions::default()).expect("validate");

    c.bench_function("render_text", |b| {
        b.iter(|| black_box(render_text(black_box(&result), true)))
    });
}

/// Benchmark tagset loading from the embedded TOML
fn bench_tagset_loading(c: &mut Criterion) {
    c.bench_function("load_embedded_tagset", |b| {
        b.iter(|| black_box(TagsetRegistry::with_embedded()))
    });
}

criterion_group!(
    validation_benches,
    bench_validation_error_density,
    bench_validation_scalability,
    bench_report_rendering,
    bench_tagset_loading
);

criterion_main!(validation_benches);
