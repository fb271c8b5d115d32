// Infrastructure layer - External dependencies and adapters
pub mod backend_client;
pub mod chunked_stream;
pub mod config;
pub mod http_response;
pub mod nominatim;
pub mod open_meteo;
