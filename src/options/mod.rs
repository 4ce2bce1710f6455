mod graph;
mod output;
mod profile;

pub(crate) use graph::GraphOpt;
pub use output::OutputFormat;
pub(crate) use profile::ProfileOpt;
