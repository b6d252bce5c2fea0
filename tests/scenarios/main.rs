mod context;
mod harness;
mod layout;
mod persistence;
mod tags;

use canvas_graph::VERSION;

#[test]
fn scenarios_binary_smoke_runs() {
    assert!(!VERSION.is_empty());
}
