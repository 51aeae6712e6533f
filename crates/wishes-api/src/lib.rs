pub mod error;
pub mod normalize;
pub mod pipeline;
pub mod routes;
