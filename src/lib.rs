//! Client for the [UnbelievaBoat](https://unbelievaboat.com/api/docs)
//! economy API.
//!
//! Balance reads and writes go through a single request dispatcher that
//! tracks per-route rate-limit headers and transparently retries throttled
//! calls with server-directed backoff, up to a configured ceiling.
//!
//! ```no_run
//! use unb_api::{Client, EditBalance};
//!
//! # async fn demo() -> Result<(), unb_api::Error> {
//! let client = Client::with_defaults("your-api-token")?;
//! let balance = client
//!     .edit_user_balance(
//!         "903002607584428056",
//!         "460430461970219018",
//!         &EditBalance {
//!             cash: Some((-100).into()),
//!             reason: Some("market fees".into()),
//!             ..EditBalance::default()
//!         },
//!     )
//!     .await?;
//! println!("cash is now {}", balance.cash);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod types;

pub use client::Client;
pub use config::ClientOptions;
pub use error::Error;
pub use types::{Amount, Balance, EditBalance, SetBalance};

/// The crate version you are running.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
