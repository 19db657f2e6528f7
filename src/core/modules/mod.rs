//! Module provisioning
//!
//! This module expands received module archives into the module repository:
//! - Naming rules for `.omod` artifacts
//! - Archive buffering and extraction

pub mod naming;
pub mod provisioner;

pub use naming::{
    is_contained_file_name, is_module_artifact, module_basename, stored_module_name, MODULE_SUFFIX,
};
pub use provisioner::{ExpansionReport, ModuleProvisioner, ProvisionOptions, ProvisionedModule};
