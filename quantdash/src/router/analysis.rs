use quantdash_core::{Capability, Frame, Symbol};

use crate::Dashboard;
use crate::quantdash_router_method;

impl Dashboard {
    quantdash_router_method! {
        /// Fetch analyst recommendation counts per period.
        method: recommendations(symbol: &Symbol) -> Frame,
        accessor: as_recommendations_provider,
        capability: Capability::Recommendations,
        call: recommendations(symbol)
    }

    quantdash_router_method! {
        /// Fetch ESG scores as a metric/value table.
        method: sustainability(symbol: &Symbol) -> Frame,
        accessor: as_esg_provider,
        capability: Capability::Esg,
        call: sustainability(symbol)
    }
}
