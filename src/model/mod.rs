//! Alert record types as found in `eve.json` fixtures.

mod alert;

pub use alert::{AlertDetail, AlertRecord, SEVERITY_LEVELS};
