//! MCFG Common Library
//!
//! Shared building blocks for retargeting a machine configuration document
//! to a different drive/axis hardware profile.
//!
//! # Module Structure
//!
//! - [`document`] - Line-oriented parameter document with block-scoped access
//! - [`blocks`] - Block headers and machine-level parameter keys
//! - [`io`] - Logical I/O devices and `[I/O]` key parsing
//! - [`profile`] - Fixed hardware-profile catalog
//! - [`topology`] - Installed-feature inference from the document
//! - [`status`] - Optional status/diagnostic channel
//! - [`config`] - Configuration loading traits and types
//! - [`prelude`] - Common re-exports for convenience
//!
//! # Usage
//!
//! ```toml
//! [dependencies]
//! mcfg = { package = "mcfg_common", path = "../mcfg_common" }
//! ```
//!
//! ```rust
//! use mcfg_common::document::ParameterDocument;
//! use mcfg_common::blocks;
//!
//! let doc = ParameterDocument::parse("Checksum=0\r\n[Machine]\r\nSensorTHCInstalled=2\r\n")
//!     .unwrap();
//! assert_eq!(doc.get_value(blocks::MACHINE, "SensorTHCInstalled="), Some(2));
//! ```

pub mod blocks;
pub mod config;
pub mod consts;
pub mod document;
pub mod io;
pub mod prelude;
pub mod profile;
pub mod status;
pub mod topology;
