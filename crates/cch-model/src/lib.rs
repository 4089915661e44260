#![deny(unsafe_code)]

//! Core types shared by the CCH metrics crates.
//!
//! - **cell**: tagged cell values with declared coercion rules
//! - **table**: immutable named tables and the six-table input mapping
//! - **range**: closed reporting date ranges
//! - **record**: metric records emitted by the report assembler
//! - **config**: column bindings and controlled vocabularies

pub mod cell;
pub mod config;
pub mod error;
pub mod ids;
pub mod range;
pub mod record;
pub mod table;

pub use cell::CellValue;
pub use config::{
    ClientColumns, ConnectionWindows, GoalColumns, InteractionColumns, MetricsConfig,
    ReferralColumns, ScreeningColumns, Vocabulary,
};
pub use error::{MissingColumns, ModelError, Result};
pub use ids::ClientId;
pub use range::DateRange;
pub use record::{MetricRecord, MetricValue};
pub use table::{Table, TableName, Tables};
