/// GraphQL surface of the managed backend
///
/// - `documents`: the operation documents, consumed verbatim by the client
/// - `types`: explicit result and input types per operation
/// - `client`: the thin query/mutate adapter over the endpoint
pub mod client;
pub mod documents;
pub mod types;

pub use client::{ApiClient, AuthMode, GraphApi};
