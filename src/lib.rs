// Library root
// -----------
// This crate exposes the importer as a small library. The binary
// (`main.rs`) parses flags, sets up logging and calls into it.
//
// Module responsibilities:
// - `config`: Flag declarations and the immutable configuration values
//   built from them once at startup.
// - `error`: One error variant per stage of an import.
// - `api`: The import payload and the `ApiClient` that uploads a document
//   to the Apifox import endpoint.
// - `transport`: The HTTP seam. Production code goes through reqwest,
//   tests plug in a recording transport.
// - `ui`: Terminal output (spinner, verbose echo, version).
pub mod api;
pub mod config;
pub mod error;
pub mod transport;
pub mod ui;
