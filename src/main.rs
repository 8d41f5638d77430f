use ccp_cluster_controller::{
    config::CheckConfig, decode, desired_state, errors, load_manifest, metrics, ProviderConfig,
};
use log::{debug, info, warn};
use prometheus::{Encoder, Registry, TextEncoder};
use serde_json::json;

fn main() -> Result<(), errors::Error> {
    env_logger::init();

    let registry = Registry::new();
    if let Err(err) = metrics::custom_metrics(&registry) {
        warn!("Unable to register metrics: {}", err);
    }

    let check_config = CheckConfig::from_env()?;
    debug!("Check config: {:?}", &check_config);

    let target = match ProviderConfig::from_env() {
        Ok(provider) => {
            info!("Starting with provider config: {:?}", provider);
            provider.base_url
        }
        Err(err) => {
            warn!("No provider config, payload will not name a target: {}", err);
            String::new()
        }
    };

    let tree = load_manifest(&check_config.manifest)?;
    metrics::operation_happened("check");
    let spec = match decode(&tree) {
        Ok(spec) => spec,
        Err(err) => {
            metrics::error_happened("check", &err);
            log_metrics(&registry);
            return Err(err);
        }
    };
    info!(
        "Cluster '{}' decoded: {} worker pool(s), {} worker(s), plugin {}",
        spec.name,
        spec.worker_node_pools.len(),
        spec.workers,
        spec.network_plugin.name()
    );

    let plan = json!({
        "target": target,
        "create": &spec,
        "desired_state": desired_state(&spec),
    });
    match serde_json::to_string_pretty(&plan) {
        Ok(rendered) => println!("{}", rendered),
        Err(err) => warn!("Unable to render plan: {}", err),
    }
    log_metrics(&registry);
    Ok(())
}

fn log_metrics(registry: &Registry) {
    let mut buffer = Vec::new();
    match TextEncoder::new().encode(&registry.gather(), &mut buffer) {
        Ok(()) => debug!("Metrics:\n{}", String::from_utf8_lossy(&buffer)),
        Err(err) => warn!("Unable to encode metrics: {}", err),
    }
}
