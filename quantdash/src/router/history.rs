use quantdash_core::{Capability, HistoryRequest, PriceHistory, Symbol};

use crate::Dashboard;
use crate::quantdash_router_method;

impl Dashboard {
    quantdash_router_method! {
        /// Fetch daily price history with dividends and splits.
        ///
        /// The first provider that answers wins; bars arrive sorted and
        /// de-duplicated by date.
        method: history(symbol: &Symbol, req: HistoryRequest) -> PriceHistory,
        accessor: as_history_provider,
        capability: Capability::History,
        call: history(symbol, req)
    }
}
