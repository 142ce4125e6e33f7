//! shadowgym: a single-player progression engine for a gamified training
//! tracker. Training actions and gate raids mutate one player aggregate;
//! skills unlock from state predicates, quest targets perpetually re-issue,
//! and a debounced reconciler writes the snapshot to a document store.

pub mod cli;
pub mod engine;
pub mod persist;
pub mod server;
pub mod session;
