//! Workspace placeholder crate.
//!
//! This crate exists to expose shared feature flags that map to the individual
//! workspace crates (`engine-traits`, `core-player`). Host applications can
//! depend on `vpc-workspace` and enable the documented features without
//! needing to wire each crate individually.
