//! Student Enrollment Core
//!
//! Facade over the workspace crates so downstream shells can depend on a
//! single package:
//!
//! - [`core_kernel`]: identity numbers, field validators, port errors
//! - [`domain_enrollment`]: catalog, enrollment records, the enrollment engine
//!   and the person directory adapters

pub use core_kernel;
pub use domain_enrollment;
