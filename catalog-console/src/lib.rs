//! # Catalog Console Library
//!
//! Client side of the catalog: keeps the bearer token, fetches the caller's
//! products and builds the dashboard.
//!
//! ## Modules
//!
//! - `storage`: token persistence
//! - `client`: product service HTTP client
//! - `console`: mount/logout state machine
//! - `view`: dashboard render model
//! - `config`: environment configuration
//!
//! ## Example
//!
//! ```no_run
//! use catalog_console::{client::HttpProductApi, console::Console, storage::FileTokenStore};
//!
//! # async fn example() {
//! let mut console = Console::new(
//!     FileTokenStore::new(".catalog_token"),
//!     HttpProductApi::new("http://localhost:5000"),
//! );
//! console.mount().await;
//! println!("{}", console.view(chrono::Local::now().date_naive()).render_text());
//! # }
//! ```

pub mod client;
pub mod config;
pub mod console;
pub mod storage;
pub mod view;
