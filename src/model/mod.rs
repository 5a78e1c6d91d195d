//! Model layer - dashboard state
//!
//! - `DashboardStore` - filters, sort, cross-filter flag and session data
//! - `Notifier` - the single transient notification
//! - `KpiBoard` - headline figures
//! - `ModalStack` - Modal overlay management

pub mod customer;
pub mod filter;
pub mod kpi;
pub mod loan_data;
pub mod modal;
pub mod notification;
pub mod store;
