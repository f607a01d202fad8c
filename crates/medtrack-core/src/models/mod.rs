//! Domain models for the medication tracker.

mod alert;
mod dosage;
mod medication;
mod patient;

pub use alert::*;
pub use dosage::*;
pub use medication::*;
pub use patient::*;
