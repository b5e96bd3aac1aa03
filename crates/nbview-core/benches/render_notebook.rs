use criterion::Criterion;
use criterion::black_box;
use criterion::criterion_group;
use criterion::criterion_main;
use nbview_core::Capabilities;
use nbview_core::Notebook;
use nbview_core::RenderOptions;
use nbview_core::render_notebook;
use nbview_core::text::NoHighlight;
use serde_json::Value;
use serde_json::json;

fn sample_notebook(cells: usize) -> Value {
    let mut out = Vec::with_capacity(cells);
    for i in 0..cells {
        if i % 3 == 0 {
            out.push(json!({
                "cell_type": "markdown",
                "source": [format!("## Section {i}\n"), "Some *prose* here.\n"],
            }));
            continue;
        }
        out.push(json!({
            "cell_type": "code",
            "execution_count": i,
            "source": [format!("x{i} = {i} + 1\n"), format!("print(x{i})\n")],
            "outputs": [
                {"output_type": "stream", "name": "stdout", "text": [format!("{}\n", i + 1)]},
                {"output_type": "execute_result", "data": {
                    "text/plain": [format!("{i}")],
                    "text/html": [format!("<b>{i}</b>")]
                }},
                {"output_type": "display_data", "data": {"image/png": "iVBORw0KGgo="}}
            ]
        }));
    }
    json!({
        "metadata": {"kernelspec": {"language": "python", "display_name": "Python 3"}},
        "cells": out,
    })
}

fn bench_validate(c: &mut Criterion) {
    let raw = sample_notebook(300);
    c.bench_function("notebook/from_raw/300_cells", |b| {
        b.iter(|| {
            let nb = Notebook::from_raw(black_box(raw.clone())).unwrap_or_default();
            black_box(nb.cells.len());
        })
    });
}

fn bench_render(c: &mut Criterion) {
    let nb = Notebook::from_raw(sample_notebook(300)).unwrap_or_default();
    let options = RenderOptions::default();
    let hi = NoHighlight;
    c.bench_function("notebook/render/300_cells/no_highlight", |b| {
        b.iter(|| {
            let caps = Capabilities::none().with_highlighter(&hi);
            let rendered = render_notebook(black_box(&nb), caps, &options);
            black_box(rendered.nodes.len());
        })
    });
}

criterion_group!(benches, bench_validate, bench_render);
criterion_main!(benches);
