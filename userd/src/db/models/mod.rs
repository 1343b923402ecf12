//! Database record models matching table schemas.
//!
//! Struct definitions that directly correspond to database table rows. These
//! are distinct from the API models so the storage representation can evolve
//! without changing the public API contract; conversions live on the API side.

pub mod users;
