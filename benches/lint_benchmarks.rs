//! Performance benchmarks for the lint pipeline.
//!
//! This suite measures full `Linter::run` passes over synthetic plugin
//! trees of different shapes:
//! - Size-based: 10 to 2000 live functions
//! - Shape-based: deep call chains and include-heavy scripts

use bumpalo::Bump;
use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use nasl_lint::{BuiltinTable, Diagnostics, IncludeMap, Linter, SyntaxNode, TreeBuilder};
use std::hint::black_box;

/// A script with `functions` definitions, each called once at top level.
fn wide_script<'a>(b: &TreeBuilder<'a>, functions: usize) -> &'a SyntaxNode<'a> {
    let mut stmts = Vec::with_capacity(functions * 2);
    for i in 0..functions {
        let name = format!("check_{i}");
        let line = (i * 4 + 1) as u32;
        let set = b.assign(b.var("status", line + 1), b.number(line + 1), line + 1);
        let body = b.sequence(&[set, b.ret(Some(b.var("status", line + 2)), line + 2)]);
        stmts.push(b.function_def(&name, None, body, line));
        stmts.push(b.call(&name, None, line + 3));
    }
    b.sequence(&stmts).unwrap()
}

/// A chain where `step_0` calls `step_1` calls ... calls `step_{depth}`.
fn chain_script<'a>(b: &TreeBuilder<'a>, depth: usize) -> &'a SyntaxNode<'a> {
    let mut stmts = Vec::with_capacity(depth + 1);
    for i in 0..depth {
        let line = (i * 3 + 1) as u32;
        let next = b.call(&format!("step_{}", i + 1), None, line + 1);
        let body = b.sequence(&[b.ret(Some(next), line + 1)]);
        stmts.push(b.function_def(&format!("step_{i}"), None, body, line));
    }
    let last_line = (depth * 3 + 1) as u32;
    stmts.push(b.function_def(
        &format!("step_{depth}"),
        None,
        b.sequence(&[b.ret(Some(b.number(last_line)), last_line)]),
        last_line,
    ));
    stmts.push(b.call("step_0", None, last_line + 2));
    b.sequence(&stmts).unwrap()
}

fn lint_tree(tree: &SyntaxNode<'_>, builtins: &BuiltinTable, includes: &IncludeMap) -> usize {
    let linter = Linter::new(builtins, includes);
    let mut sink = Diagnostics::new();
    let _ = linter.run(tree, "bench.nasl", &mut sink);
    sink.len()
}

/// Benchmark lint throughput across script sizes.
fn size_based_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("lint/script_sizes");
    let builtins = BuiltinTable::with_names(["display", "defined_func"]);
    let includes = IncludeMap::new();

    for functions in [10usize, 100, 500, 2000] {
        let arena = Bump::new();
        let b = TreeBuilder::new(&arena);
        let tree = wide_script(&b, functions);
        group.throughput(Throughput::Elements(functions as u64));
        group.bench_function(format!("{functions}_functions"), |bench| {
            bench.iter(|| black_box(lint_tree(black_box(tree), &builtins, &includes)));
        });
    }

    group.finish();
}

/// Benchmark shapes that stress individual passes.
fn shape_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("lint/shapes");
    let builtins = BuiltinTable::with_names(["display", "defined_func"]);

    // Deep caller chain: every call resolves through the whole chain.
    let arena = Bump::new();
    let b = TreeBuilder::new(&arena);
    let chain = chain_script(&b, 500);
    let includes = IncludeMap::new();
    group.bench_function("call_chain_500", |bench| {
        bench.iter(|| black_box(lint_tree(black_box(chain), &builtins, &includes)));
    });

    // Include-heavy: every function lives in its own include file.
    let inc_arena = Bump::new();
    let inc_b = TreeBuilder::new(&inc_arena);
    let inc_tree = wide_script(&inc_b, 200);
    let mut inc_map = IncludeMap::new();
    for i in 0..200 {
        inc_map.insert(format!("check_{i}"), format!("check_{i}.inc"));
    }
    group.bench_function("200_include_files", |bench| {
        bench.iter(|| black_box(lint_tree(black_box(inc_tree), &builtins, &inc_map)));
    });

    group.finish();
}

criterion_group!(benches, size_based_benchmarks, shape_benchmarks);

criterion_main!(benches);
