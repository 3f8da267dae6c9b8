//! Data access port trait.

use crate::domain::error::TacticalError;
use crate::domain::ohlcv::PriceSeries;
use crate::domain::ranking::AssetProfile;

pub trait DataPort {
    /// Full daily history for `code`, oldest bar first.
    fn fetch_series(&self, code: &str) -> Result<PriceSeries, TacticalError>;

    /// Candidate universe in file order.
    fn list_universe(&self) -> Result<Vec<AssetProfile>, TacticalError>;
}
