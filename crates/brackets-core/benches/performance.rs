use brackets_core::{EditorConfig, EditorSession, LineIndex, line_number};
use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use std::sync::Arc;

fn large_text(line_count: usize) -> String {
    let mut out = String::with_capacity(line_count * 64);
    for i in 0..line_count {
        if i % 10 == 0 {
            out.push_str(&format!("{i:06} {{ TODO  }} water the plants [ REMINDER  ]\n"));
        } else {
            out.push_str(&format!(
                "{i:06} the quick brown fox jumps over the lazy dog (brackets benchmark line)\n"
            ));
        }
    }
    // Remove the final '\n' to avoid creating an extra trailing empty line.
    out.pop();
    out
}

fn bench_rehighlight(c: &mut Criterion) {
    let text = large_text(50_000);
    let config = EditorConfig::builtin();
    c.bench_function("rehighlight/50k_lines", |b| {
        b.iter(|| {
            let commands = config
                .highlighter()
                .highlight(black_box(&text), config.theme());
            black_box(commands.len());
        })
    });
}

fn bench_line_number(c: &mut Criterion) {
    let text = large_text(50_000);
    let index = LineIndex::from_text(&text);
    let offset = index.len_utf16() / 2;

    c.bench_function("line_number/scan_middle", |b| {
        b.iter(|| black_box(line_number(black_box(&text), offset)))
    });
    c.bench_function("line_number/rope_middle", |b| {
        b.iter(|| black_box(index.line_number(black_box(offset))))
    });
}

fn bench_typing_with_triggers(c: &mut Criterion) {
    let text = large_text(50_000);
    let config = Arc::new(EditorConfig::builtin());
    c.bench_function("typing_middle/100_keystrokes", |b| {
        b.iter_batched(
            || {
                let mut session = EditorSession::with_text(Arc::clone(&config), &text);
                session.set_cursor(session.len_utf16() / 2);
                session
            },
            |mut session| {
                for i in 0..100 {
                    let key = if i % 20 == 0 { "{" } else { "x" };
                    black_box(session.insert(key));
                    black_box(session.gutter().current_line());
                }
            },
            BatchSize::LargeInput,
        )
    });
}

criterion_group!(
    benches,
    bench_rehighlight,
    bench_line_number,
    bench_typing_with_triggers
);
criterion_main!(benches);
