//! Reporting for physquiz: CSV export of locally saved results and the
//! Spanish feedback text shown at the end of a session.

pub mod csv;
pub mod feedback;

pub use csv::{export_csv, write_csv_report};
pub use feedback::{congratulations, render_result};
