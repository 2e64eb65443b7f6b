//! HTTP API module for the roster engine.
//!
//! This module exposes roster generation and comp-off accounting over
//! JSON endpoints. Team rule records loaded at startup can be referenced by
//! team id; everything else is supplied per request.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    BalancesRequest, CanUseRequest, GenerateRosterRequest, MemberBalanceRequest,
    StatisticsRequest,
};
pub use response::{ApiError, GenerateRosterResponse, MemberBalanceResponse};
pub use state::AppState;
