//! Corrective actions produced by generators.

use std::fmt::Debug;

/// A single migration step that reconciles a detected difference.
///
/// Concrete changes live with the generators that build them; the dispatcher only
/// moves them around.
pub trait Change: Debug + Send + Sync {
    /// Short change kind, e.g. `createTable`
    fn change_name(&self) -> &str;

    /// Human readable one-liner for logs and reports
    fn description(&self) -> String {
        self.change_name().to_string()
    }
}

/// Changes accumulated for one request, in generator order.
pub type Changes = Vec<Box<dyn Change>>;
