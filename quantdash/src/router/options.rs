use quantdash_core::{Capability, OptionChain, Symbol};

use crate::Dashboard;
use crate::quantdash_router_method;

impl Dashboard {
    quantdash_router_method! {
        /// List available options expiration dates (UTC epoch seconds).
        ///
        /// An empty list means the symbol has no listed options.
        method: options_expirations(symbol: &Symbol) -> Vec<i64>,
        accessor: as_options_expirations_provider,
        capability: Capability::OptionsExpirations,
        call: options_expirations(symbol)
    }

    quantdash_router_method! {
        /// Fetch calls and puts for one expiration (nearest when `None`).
        method: option_chain(symbol: &Symbol, date: Option<i64>) -> OptionChain,
        accessor: as_option_chain_provider,
        capability: Capability::OptionChain,
        call: option_chain(symbol, date)
    }
}
