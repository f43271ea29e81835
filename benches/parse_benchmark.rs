//! Benchmarks for unrtf parsing performance.
//!
//! Run with: cargo bench
//!
//! These benchmarks parse synthetic multi-page listings.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

/// Creates a synthetic listing with the given number of pages and rows per page.
fn create_test_rtf(page_count: usize, rows_per_page: usize) -> String {
    let mut content = String::new();

    content.push_str("{\\rtf1\\ansi\\deff0\n{\\fonttbl\n");
    content.push_str("{\\f0\\froman\\fprq2\\fcharset0 Times New Roman;}\n");
    content.push_str("{\\f1\\fswiss\\fprq2\\fcharset0 Arial;}\n}\n");

    for page in 0..page_count {
        content.push_str("\\sectd\\linex0\\endnhere\\pgwsxn15840\\pghsxn12240\n");
        content.push_str("{\\header\\pard\\plain\\qc{\n\\trowd\\trkeep\\cellx4000\\cellx8000\n");
        content.push_str("\\pard\\plain\\intbl\\ql\\f1\\fs16{Protocol: BENCH-001\\cell}\n");
        content.push_str(
            "\\pard\\plain\\intbl\\qr\\f1\\fs16{Page {\\field{\\*\\fldinst { PAGE }}}{ of }\
             {\\field{\\*\\fldinst { NUMPAGES }}}\\cell}\n{\\row}\n}}\n",
        );

        content.push_str("\\trowd\\trkeep\\trhdr\\cellx8000\n");
        content.push_str("\\pard\\plain\\intbl\\keepn\\qc\\f1\\fs18{Listing 16.2.4 Vital Signs\\cell}\n{\\row}\n");

        content.push_str("\\trowd\\trkeep\\trhdr\\cellx2000\\cellx4000\\cellx6000\\cellx8000\n");
        for header in ["Subject", "Visit", "Parameter", "Value"] {
            content.push_str(&format!("\\pard\\plain\\intbl\\keepn\\qc\\f1\\fs18\\b{{{}\\cell}}\n", header));
        }
        content.push_str("{\\row}\n");

        for row in 0..rows_per_page {
            content.push_str("\\trowd\\trkeep\\cellx2000\\cellx4000\\cellx6000\\cellx8000\n");
            content.push_str(&format!(
                "\\pard\\plain\\intbl\\ql\\f1\\fs18{{{}\\cell}}\n\
                 \\pard\\plain\\intbl\\ql\\f1\\fs18{{Week {}\\cell}}\n\
                 \\pard\\plain\\intbl\\ql\\f1\\fs18{{Systolic BP (mmHg)\\cell}}\n\
                 \\pard\\plain\\intbl\\qr\\f1\\fs18{{{}\\cell}}\n{{\\row}}\n",
                1000 + page * rows_per_page + row,
                row % 12,
                110 + row % 40
            ));
        }

        content.push_str("\\trowd\\trkeep\\cellx8000\n");
        content.push_str(
            "\\pard\\plain\\intbl\\keepn\\ql\\f1\\fs16{Program: l_vs.sas. Source: ADVS\\cell}\n{\\row}\n",
        );
    }

    content.push_str("}\n");
    content
}

/// Benchmark schema validation.
fn bench_schema_check(c: &mut Criterion) {
    let rtf = create_test_rtf(10, 20);
    let plain = "Not an RTF listing, just random text content";

    c.bench_function("schema_valid_listing", |b| {
        b.iter(|| unrtf::conforms_to_schema(black_box(&rtf)));
    });

    c.bench_function("schema_plain_text", |b| {
        b.iter(|| unrtf::conforms_to_schema(black_box(plain)));
    });
}

/// Benchmark listing parsing at various sizes.
fn bench_listing_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("listing_parsing");

    for page_count in [1, 10, 50].iter() {
        let data = create_test_rtf(*page_count, 25);

        group.bench_function(format!("{}_pages_parallel", page_count), |b| {
            b.iter(|| unrtf::parse_str(black_box(&data)).unwrap());
        });

        group.bench_function(format!("{}_pages_sequential", page_count), |b| {
            b.iter(|| {
                let options = unrtf::ParseOptions::new().sequential();
                unrtf::parse_str_with_options(black_box(&data), options).unwrap()
            });
        });
    }

    group.finish();
}

/// Benchmark JSON rendering.
fn bench_json_rendering(c: &mut Criterion) {
    let doc = unrtf::parse_str(&create_test_rtf(10, 25)).unwrap();

    c.bench_function("to_json_pretty", |b| {
        b.iter(|| unrtf::render::to_json(black_box(&doc), unrtf::JsonFormat::Pretty).unwrap());
    });
}

criterion_group!(
    benches,
    bench_schema_check,
    bench_listing_parsing,
    bench_json_rendering,
);
criterion_main!(benches);
