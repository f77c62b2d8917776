pub mod open;
pub mod routes;
pub mod upload;
