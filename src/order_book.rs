use crate::event::{MarketEvent, Payload};
use crate::types::{OrderRecord, PriceLevelIndex, Side};
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashMap};

/// A live limit order book projected from a market-data event stream.
///
/// The book keeps one primary ownership store mapping each order id to its
/// `OrderRecord`, plus two secondary non-owning indexes (one per side) that
/// count live orders per (instrument, price) level. The secondary indexes
/// are maintained incrementally on every mutation and are always derivable
/// from the primary store; they exist solely so best-price queries can be
/// answered with a range-bound lookup instead of a scan of the whole book.
///
/// Since the record itself carries its side, resolving which side holds an
/// order id is a single primary-store lookup; there is no probe-one-side-
/// then-fall-back ambiguity, and an id can never appear on both sides.
///
/// ### Thread Safety
///
/// The book holds no internal locks. It is designed to be wrapped in a
/// `RwLock` for concurrent access: a single writer applies events under the
/// write lock (held only for the O(log n) mutation), while readers share
/// the read lock for queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBook {
    /// Primary store: owns every live record, keyed by unique order id
    orders: HashMap<String, OrderRecord>,
    /// Bid-side levels: (instrument, price) -> count of live orders
    bid_levels: PriceLevelIndex,
    /// Ask-side levels: (instrument, price) -> count of live orders
    ask_levels: PriceLevelIndex,
}

impl OrderBook {
    /// Creates a new empty order book.
    ///
    /// ## Examples
    ///
    /// ```
    /// use market_book::OrderBook;
    ///
    /// let book = OrderBook::new();
    /// assert!(book.is_empty());
    /// ```
    pub fn new() -> Self {
        OrderBook {
            orders: HashMap::new(),
            bid_levels: BTreeMap::new(),
            ask_levels: BTreeMap::new(),
        }
    }

    /// Applies one market-data event to the book.
    ///
    /// This is the single mutation entry point and it never fails: an event
    /// flagged unprocessable is discarded with zero state change, and
    /// semantically odd but well-formed events (update or cancel of an
    /// absent id, add of an id that is already live) are defensive no-ops.
    /// A missing id is always a guarded lookup, never an unchecked access.
    ///
    /// Complexity: O(1) expected for the primary-store access plus O(log n)
    /// for the level index update on add/cancel; updates touch only the
    /// record's size and leave the level indexes unchanged.
    ///
    /// ## Examples
    ///
    /// ```
    /// use market_book::{MarketEvent, OrderBook};
    ///
    /// let mut book = OrderBook::new();
    /// let event: MarketEvent = "1568390243|abbb11|a|AAPL|B|209.00000|100".parse().unwrap();
    /// book.process_event(event);
    /// assert_eq!(book.len(), 1);
    /// ```
    pub fn process_event(&mut self, event: MarketEvent) {
        if !event.processable {
            return; // discard corrupted event
        }
        match event.payload {
            Payload::Add {
                instrument,
                side,
                price,
                size,
            } => self.add(OrderRecord {
                order_id: event.order_id,
                instrument,
                price,
                size,
                side,
            }),
            Payload::Update { size } => self.update(&event.order_id, size),
            Payload::Cancel => self.cancel(&event.order_id),
        }
    }

    /// Inserts a new record; a no-op if the id is already live.
    fn add(&mut self, record: OrderRecord) {
        if self.orders.contains_key(&record.order_id) {
            return; // never overwrite a live record
        }
        let level_index = match record.side {
            Side::Bid => &mut self.bid_levels,
            Side::Ask => &mut self.ask_levels,
        };
        *level_index
            .entry((record.instrument.clone(), record.price))
            .or_insert(0) += 1;
        self.orders.insert(record.order_id.clone(), record);
    }

    /// Rewrites the size of a live record; a no-op if the id is absent.
    ///
    /// Price, instrument and side are immutable, so the level indexes stay
    /// untouched and no phantom record is ever created.
    fn update(&mut self, order_id: &str, size: u32) {
        if let Some(record) = self.orders.get_mut(order_id) {
            record.size = size;
        }
    }

    /// Removes a live record from whichever side holds it; a no-op if the
    /// id is absent.
    fn cancel(&mut self, order_id: &str) {
        if let Some(record) = self.orders.remove(order_id) {
            let level_index = match record.side {
                Side::Bid => &mut self.bid_levels,
                Side::Ask => &mut self.ask_levels,
            };
            let key = (record.instrument, record.price);
            if let Some(count) = level_index.get_mut(&key) {
                *count -= 1;
                if *count == 0 {
                    level_index.remove(&key);
                }
            }
        }
    }

    /// Returns the best (lowest) ask and best (highest) bid price for an
    /// instrument.
    ///
    /// Either element is `None` when that side holds no live orders for the
    /// instrument; an unknown instrument yields `(None, None)`. The lookup
    /// is a range query bounded by the instrument on the composite
    /// (instrument, price) index, so it runs in O(log n) regardless of how
    /// many orders rest on other instruments.
    ///
    /// ## Examples
    ///
    /// ```
    /// use market_book::{Decimal, MarketEvent, OrderBook};
    ///
    /// let mut book = OrderBook::new();
    /// for line in [
    ///     "1568390243|abbb11|a|AAPL|B|209.00000|100",
    ///     "1568390244|abbb12|a|AAPL|S|210.00000|10",
    /// ] {
    ///     book.process_event(line.parse::<MarketEvent>().unwrap());
    /// }
    ///
    /// let (best_ask, best_bid) = book.best_ask_and_bid("AAPL");
    /// assert_eq!(best_ask, Some(Decimal::new(21000000, 5)));
    /// assert_eq!(best_bid, Some(Decimal::new(20900000, 5)));
    /// assert_eq!(book.best_ask_and_bid("MSFT"), (None, None));
    /// ```
    pub fn best_ask_and_bid(&self, instrument: &str) -> (Option<Decimal>, Option<Decimal>) {
        (
            Self::best_price(&self.ask_levels, instrument, Side::Ask),
            Self::best_price(&self.bid_levels, instrument, Side::Bid),
        )
    }

    /// Scans one side's level index over the instrument's price range.
    ///
    /// The composite key sorts by instrument first, then price, so the
    /// instrument's levels are contiguous: the first key in range is the
    /// minimum price (best ask) and the last is the maximum (best bid).
    fn best_price(index: &PriceLevelIndex, instrument: &str, side: Side) -> Option<Decimal> {
        let mut range = index.range(
            (instrument.to_owned(), Decimal::MIN)..=(instrument.to_owned(), Decimal::MAX),
        );
        let entry = match side {
            Side::Ask => range.next(),
            Side::Bid => range.next_back(),
        };
        entry.map(|((_, price), _)| *price)
    }

    /// Returns the price of a live order, or `None` if the id has never
    /// been added or has been canceled.
    ///
    /// The `None` outcome is deliberate: queries for an absent id must
    /// never fabricate a plausible-looking value.
    pub fn price_for(&self, order_id: &str) -> Option<Decimal> {
        self.orders.get(order_id).map(|record| record.price)
    }

    /// Returns the size of a live order, or `None` if the id is absent.
    pub fn size_for(&self, order_id: &str) -> Option<u32> {
        self.orders.get(order_id).map(|record| record.size)
    }

    /// Returns `true` when no live orders rest on either side.
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Returns the number of live orders across both sides.
    pub fn len(&self) -> usize {
        self.orders.len()
    }

    /// Returns the number of distinct (instrument, price) levels on the
    /// bid side.
    pub fn bid_level_count(&self) -> usize {
        self.bid_levels.len()
    }

    /// Returns the number of distinct (instrument, price) levels on the
    /// ask side.
    pub fn ask_level_count(&self) -> usize {
        self.ask_levels.len()
    }
}

impl Default for OrderBook {
    fn default() -> Self {
        Self::new()
    }
}
