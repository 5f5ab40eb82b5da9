use jose_jwa::AlgorithmRegistry;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct AlgorithmsResponse {
    pub key_encryption: Vec<String>,
    pub signature: Vec<String>,
}

/// Lists the registered algorithm names
pub fn list(registry: &AlgorithmRegistry) -> AlgorithmsResponse {
    AlgorithmsResponse {
        key_encryption: registry
            .key_encryption_names()
            .into_iter()
            .map(String::from)
            .collect(),
        signature: registry
            .signature_names()
            .into_iter()
            .map(String::from)
            .collect(),
    }
}
