//! Logical I/O devices and `[I/O]` block key vocabulary.
//!
//! Devices are identified by fixed numeric codes; slots ("types") are
//! physical positions. The `[I/O]` block links the two in both
//! directions: `Input<slot>Type=<device>` and `Input<device>Number=<slot>`.

pub mod device;
pub mod key;
