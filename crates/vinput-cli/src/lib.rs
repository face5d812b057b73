//! Control endpoint and human-readable event output for the simulated input
//! devices.
//!
//! The binary in this crate wires both pieces to a pair of device workers;
//! the modules are exposed as a library so the command protocol and the
//! printer can be exercised by integration tests.

pub mod control;
pub mod printer;
