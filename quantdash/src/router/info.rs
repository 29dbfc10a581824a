use quantdash_core::{Capability, Info, Symbol};

use crate::Dashboard;
use crate::quantdash_router_method;

impl Dashboard {
    quantdash_router_method! {
        /// Fetch the flat company info record (profile and valuation fields).
        method: info(symbol: &Symbol) -> Info,
        accessor: as_info_provider,
        capability: Capability::Info,
        call: info(symbol)
    }
}
