use quantdash_core::{Capability, Holders, Symbol};

use crate::Dashboard;
use crate::quantdash_router_method;

impl Dashboard {
    quantdash_router_method! {
        /// Fetch institutional holders, the major-holders breakdown, and insider transactions.
        method: holders(symbol: &Symbol) -> Holders,
        accessor: as_holders_provider,
        capability: Capability::Holders,
        call: holders(symbol)
    }
}
