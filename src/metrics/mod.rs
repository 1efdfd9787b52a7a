pub mod prometheus;

pub use prometheus::{
    init_metrics_server, record_rejection, record_solve, record_solve_latency_us, record_utility,
};
