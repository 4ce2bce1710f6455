mod graph_ref;

pub use graph_ref::GraphRef;
