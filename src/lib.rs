//! A tested and benchmarked live limit order book that projects a stream of
//! market-data events (add/update/cancel) and answers best-bid/best-ask
//! queries per instrument in sub-linear time.
//!
//! ## Architecture
//!
//! The library separates concerns into three pieces:
//!
//! 1. `MarketEvent`: an immutable, validated representation of one parsed
//!    wire line (the pipe-delimited text format)
//! 2. `OrderBook`: the engine that applies events to a multi-index store of
//!    live orders and serves the query path
//! 3. `MockDataFeed`: a synthetic event producer for tests and benchmarks
//!
//! Internally the book keeps one primary ownership store (order id to
//! record) and two secondary per-side indexes ordered by (instrument,
//! price), so best-price queries are a range-bound `BTreeMap` lookup rather
//! than a scan of the whole book.
//!
//! ## Example Usage
//!
//! ```rust
//! use market_book::{MarketEvent, OrderBook};
//! use parking_lot::RwLock;
//! use std::sync::Arc;
//!
//! // Create the book; wrap it in a lock for shared access
//! let book = Arc::new(RwLock::new(OrderBook::new()));
//!
//! // 1. Parse a wire line into an event
//! let event: MarketEvent = "1568390243|abbb11|a|AAPL|B|209.00000|100".parse().unwrap();
//!
//! // 2. Acquire the write lock briefly to apply it
//! {
//!     let mut book = book.write();
//!     book.process_event(event);
//! } // Write lock released immediately
//!
//! // 3. Query best prices (read lock on the book)
//! let (best_ask, best_bid) = book.read().best_ask_and_bid("AAPL");
//! assert!(best_ask.is_none());
//! assert_eq!(best_bid, book.read().price_for("abbb11"));
//! ```
//!
//! ## Concurrency contract
//!
//! The book is not internally thread-safe: it is a single-writer structure
//! with no internal locking. All mutations must be serialized, and reads
//! must be excluded from overlapping a mutation; wrapping the book in a
//! `RwLock` as above gives exactly that. Every operation is a finite,
//! synchronous, CPU-bound computation with no I/O, and all returned prices
//! and sizes are copies, so no caller ever holds a reference into the index
//! across a mutation.

mod event;
mod feed;
mod order_book;
mod types;

// Re-export public API
pub use event::{MarketEvent, ParseEventError, Payload};
pub use feed::MockDataFeed;
pub use order_book::OrderBook;
pub use types::{Action, OrderRecord, PriceLevelIndex, Side};

// Re-export commonly used external dependencies
pub use parking_lot::RwLock;
pub use rust_decimal::Decimal;
