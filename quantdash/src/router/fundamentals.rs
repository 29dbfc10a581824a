use quantdash_core::{Capability, Earnings, Frame, Statements, Symbol};

use crate::Dashboard;
use crate::quantdash_router_method;

impl Dashboard {
    quantdash_router_method! {
        /// Fetch income statement, balance sheet, and cash flow tables.
        method: statements(symbol: &Symbol, quarterly: bool) -> Statements,
        accessor: as_statements_provider,
        capability: Capability::Statements,
        call: statements(symbol, quarterly)
    }

    quantdash_router_method! {
        /// Fetch annual and quarterly revenue/earnings tables.
        method: earnings(symbol: &Symbol) -> Earnings,
        accessor: as_earnings_provider,
        capability: Capability::Earnings,
        call: earnings(symbol)
    }

    quantdash_router_method! {
        /// Fetch upcoming corporate events (earnings date, dividend dates).
        method: calendar(symbol: &Symbol) -> Frame,
        accessor: as_calendar_provider,
        capability: Capability::Calendar,
        call: calendar(symbol)
    }
}
