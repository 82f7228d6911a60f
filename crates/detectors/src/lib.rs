pub mod deep_call_chain;
pub mod timestamp_dependence;
pub mod tx_origin;

/// Returns all built-in detectors
pub fn all_detectors() -> Vec<Box<dyn solbench::detector::Detector>> {
    vec![
        Box::new(deep_call_chain::DeepCallChain::default()),
        Box::new(tx_origin::TxOriginAuth),
        Box::new(timestamp_dependence::TimestampDependence),
    ]
}
