//! Subscriber installation. Lives in its own test binary so the global
//! subscriber never leaks into other tests.

use spark_folio::init_tracing;
use spark_folio::logging::DEFAULT_FILTER;

#[test]
fn second_init_is_refused() {
    assert!(init_tracing(DEFAULT_FILTER));
    assert!(!init_tracing("debug"));
}
