use prometheus::{Opts, IntCounterVec, Registry};

use lazy_static::lazy_static;
use crate::errors::Error;

pub const METRICS_NAMESPACE: &str = "ccp_cluster_controller";

lazy_static! {
    pub static ref OPERATIONS: IntCounterVec = IntCounterVec::new(
      Opts::new("operations", "ccp-cluster-controller reconcile operations")
      .namespace(METRICS_NAMESPACE),
      &["operation"]
    ).unwrap();
    pub static ref ERRORS: IntCounterVec = IntCounterVec::new(
      Opts::new("errors", "ccp-cluster-controller failed reconcile operations")
      .namespace(METRICS_NAMESPACE),
      &["operation", "kind"]
    ).unwrap();
}

pub fn custom_metrics(registry: &Registry) -> prometheus::Result<()> {
  registry.register(Box::new(OPERATIONS.clone()))?;
  registry.register(Box::new(ERRORS.clone()))?;
  Ok(())
}

pub fn operation_happened(operation: &str) {
  OPERATIONS.with_label_values(&[operation]).inc();
}

pub fn error_happened(operation: &str, err: &Error) {
  ERRORS.with_label_values(&[operation, err.kind()]).inc();
}
