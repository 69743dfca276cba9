//! Wire types shared by the gateway and its tests.

pub mod api;
pub mod routes;
