use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// Represents the side of an order in the order book.
///
/// - `Bid` represents buy orders (demand side)
/// - `Ask` represents sell orders (supply side)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    /// Buy side: traders willing to purchase at a given price
    Bid,
    /// Sell side: traders willing to sell at a given price
    Ask,
}

/// The kind of mutation a market-data event requests for one order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Create a new live order
    Add,
    /// Rewrite the size of a live order
    Update,
    /// Remove a live order from the book
    Cancel,
}

/// The book's stored representation of one live order.
///
/// A record is created by an `Add` event and destroyed by a `Cancel` event.
/// Only `size` is mutable after creation; `side`, `instrument` and `price`
/// are fixed for the record's whole lifetime, so an order never moves
/// between sides or price levels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderRecord {
    /// Unique identifier across both sides of the book
    pub order_id: String,
    /// Ticker symbol of the tradable security this order rests on
    pub instrument: String,
    /// The limit price (fixed-point arithmetic, immutable after creation)
    pub price: Decimal,
    /// The live quantity, rewritten by `Update` events
    pub size: u32,
    /// Whether this is a buy (`Bid`) or sell (`Ask`) order
    pub side: Side,
}

/// Type alias for a per-side secondary price index.
///
/// Maps each live (instrument, price) level to the number of live orders
/// resting at it. The composite key keeps all of one instrument's levels
/// contiguous, so a range scan bounded by the instrument yields its best
/// price in logarithmic time.
pub type PriceLevelIndex = BTreeMap<(String, Decimal), u32>;
