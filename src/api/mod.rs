pub mod client;
pub mod model;
pub mod models;
pub mod response;
pub mod streaming;

pub use client::make_api_request;
pub use model::HttpChatModel;
pub use models::RequestBody;
pub use streaming::process_streaming_response;
