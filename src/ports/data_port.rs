//! Dataset source port trait.

use crate::domain::dataset::Dataset;
use crate::domain::error::DashboardError;

/// Produces the dashboard's dataset. Called once at startup; any error aborts
/// initialization.
pub trait DataPort {
    fn load(&self) -> Result<Dataset, DashboardError>;

    /// Human-readable origin of the data, used in log lines.
    fn describe(&self) -> String;
}
