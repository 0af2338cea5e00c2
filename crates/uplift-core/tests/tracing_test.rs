//! Tests for tracing setup.

use uplift_core::tracing::{init_tracing, metrics};

/// T-TRC-01: initialization is idempotent and spans accept the metric fields.
#[test]
fn test_init_tracing_twice() {
    init_tracing();
    init_tracing();

    let span = tracing::info_span!(
        "project",
        files_with_actions = tracing::field::Empty,
        actions_executed = tracing::field::Empty,
    );
    span.record(metrics::FILES_WITH_ACTIONS, 3);
    span.record(metrics::ACTIONS_EXECUTED, 7);
    tracing::info!(parent: &span, "recorded");
}
