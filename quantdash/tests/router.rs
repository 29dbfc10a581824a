mod helpers;

#[path = "router/router_errors.rs"]
mod router_errors;
#[path = "router/router_priority.rs"]
mod router_priority;
#[path = "router/router_timeouts.rs"]
mod router_timeouts;
