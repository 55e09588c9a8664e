//! # SMS Verifier Node
//!
//! Process bootstrap for the verifier: configuration, logging, key loading
//! and the HTTP gateway. The `main.rs` binary is a thin wrapper around
//! [`NodeRuntime`].
//!
//! ## Startup Sequence
//!
//! 1. Load the node configuration and install the subscriber it describes
//! 2. Report ignored overrides and validate the configuration
//! 3. Load the public key (fatal on failure) and log its fingerprint
//! 4. Build the verification service and the gateway
//! 5. Serve until Ctrl+C, then drain in-flight requests

pub mod config;
pub mod telemetry;

use config::{ConfigError, NodeConfig};
use sms_api_gateway::{ApiGatewayService, GatewayError};
use sms_signature_verification::{
    load_public_key_pem, public_key_fingerprint, KeyLoadError, RsaSignatureVerifier,
    SmsVerificationService,
};
use std::future::Future;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Smallest modulus accepted without a warning.
pub const RECOMMENDED_KEY_BITS: usize = 2048;

/// Errors that stop the node from starting or running.
#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("failed to load verification key: {0}")]
    Key(#[from] KeyLoadError),

    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

/// The assembled verifier process.
pub struct NodeRuntime {
    config: NodeConfig,
    service: Arc<SmsVerificationService>,
    gateway: ApiGatewayService,
}

impl NodeRuntime {
    /// Validate `config`, load the key and wire the gateway.
    pub fn new(config: NodeConfig) -> Result<Self, RuntimeError> {
        for ignored in &config.invalid_overrides {
            warn!(
                variable = ignored.variable,
                value = %ignored.value,
                "Ignoring invalid configuration override"
            );
        }
        config.validate()?;

        let path = &config.keys.public_key_path;
        let key = load_public_key_pem(path)?;
        let fingerprint = public_key_fingerprint(&key)?;

        let verifier = RsaSignatureVerifier::new(key);
        info!(
            path = %path.display(),
            bits = verifier.key_bits(),
            sha256 = %fingerprint,
            "Loaded verification public key"
        );
        if verifier.key_bits() < RECOMMENDED_KEY_BITS {
            warn!(
                bits = verifier.key_bits(),
                "Public key is shorter than {RECOMMENDED_KEY_BITS} bits"
            );
        }

        let service = Arc::new(SmsVerificationService::new(verifier));
        let gateway = ApiGatewayService::new(config.gateway.clone(), service.clone())?;

        Ok(Self {
            config,
            service,
            gateway,
        })
    }

    pub fn config(&self) -> &NodeConfig {
        &self.config
    }

    /// The shared verification service.
    pub fn service(&self) -> Arc<SmsVerificationService> {
        Arc::clone(&self.service)
    }

    pub fn gateway(&self) -> &ApiGatewayService {
        &self.gateway
    }

    /// Serve until `shutdown` resolves.
    pub async fn run<F>(&self, shutdown: F) -> Result<(), RuntimeError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        info!(
            addr = %self.config.gateway.http_addr(),
            "SMS verifier ready"
        );
        self.gateway.run(shutdown).await?;
        Ok(())
    }
}
