//! Portal Service
//!
//! Entry point for embedding the declaration portal: configuration from the
//! environment, tracing bootstrap, and the [`Portal`] facade that wires the
//! chart of accounts, the storage ports and the domain engines together.
//!
//! ```rust,no_run
//! use portal_service::{init_tracing, Portal, PortalConfig};
//! use core_kernel::SystemClock;
//! use std::sync::Arc;
//!
//! let config = PortalConfig::from_env()?;
//! init_tracing(&config.log_level, config.log_json);
//! let chart = Portal::load_chart(&config)?;
//! let (portal, _backend) = Portal::in_memory(&config, chart, Vec::new(), Arc::new(SystemClock))?;
//! # Ok::<(), portal_service::PortalError>(())
//! ```

pub mod config;
pub mod error;
pub mod portal;
pub mod telemetry;

pub use config::PortalConfig;
pub use error::PortalError;
pub use portal::{BiExport, Portal, PortalPorts};
pub use telemetry::init_tracing;
