use crate::types::Side;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// The canonical scripted scenario: one add/update/cancel lifecycle, then a
/// two-order sequence that leaves only `abbb12` live (at 210.0, size 101).
const SCRIPTED_LINES: [&str; 8] = [
    "1568390243|abbb11|a|AAPL|B|209.00000|100",
    "1568390244|abbb11|u|101",
    "1568390245|abbb11|c",
    "1568390201|abbb11|a|AAPL|B|209.00000|100",
    "1568390202|abbb12|a|AAPL|S|210.00000|10",
    "1568390204|abbb11|u|10",
    "1568390203|abbb12|u|101",
    "1568390243|abbb11|c",
];

/// A synthetic market-data feed for tests and benchmarks.
///
/// Produces wire-format lines two ways: replaying a small scripted scenario
/// as a circular buffer, and generating random well-formed events. The
/// generator tracks which order ids are live per side so that updates and
/// cancels always target a live order, which keeps a growing book busy with
/// a realistic add/update/cancel mix.
///
/// All generator state, including the random source and the id counter, is
/// scoped to the feed instance; two seeded feeds produce identical streams.
pub struct MockDataFeed {
    rng: StdRng,
    scripted_index: usize,
    next_id: u64,
    bid_pool: Vec<String>,
    ask_pool: Vec<String>,
    max_bid_pool: usize,
    max_ask_pool: usize,
}

impl MockDataFeed {
    /// Creates a feed seeded from system entropy.
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_entropy())
    }

    /// Creates a deterministic feed from a seed, for reproducible runs.
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(rng: StdRng) -> Self {
        MockDataFeed {
            rng,
            scripted_index: 0,
            next_id: 0,
            bid_pool: Vec::new(),
            ask_pool: Vec::new(),
            max_bid_pool: 0,
            max_ask_pool: 0,
        }
    }

    /// Returns the next line of the scripted scenario, cycling back to the
    /// start after the last line.
    pub fn next_scripted(&mut self) -> &'static str {
        let line = SCRIPTED_LINES[self.scripted_index];
        self.scripted_index = (self.scripted_index + 1) % SCRIPTED_LINES.len();
        line
    }

    /// Number of lines in one pass of the scripted scenario.
    pub fn scripted_len(&self) -> usize {
        SCRIPTED_LINES.len()
    }

    /// Generates one random well-formed wire line stamped with `now_ms`.
    ///
    /// Adds draw a ticker from 0..=2024, a price below 10000 with five
    /// decimals and a size in 1..=10000; updates and cancels pick a random
    /// live order on the chosen side, and a cancel retires it from the
    /// pool. An empty pool forces an add.
    pub fn generate(&mut self, now_ms: u64) -> String {
        let side = if self.rng.gen_bool(0.5) {
            Side::Bid
        } else {
            Side::Ask
        };
        let pool_is_empty = match side {
            Side::Bid => self.bid_pool.is_empty(),
            Side::Ask => self.ask_pool.is_empty(),
        };
        // Action mix follows a Poisson(1) draw: P(0) = P(1) ~= 0.368 for
        // add/update, the >= 2 tail for cancel.
        let draw: f64 = self.rng.gen();
        if pool_is_empty || draw < 0.368 {
            self.generate_add(now_ms, side)
        } else if draw < 0.736 {
            self.generate_update(now_ms, side)
        } else {
            self.generate_cancel(now_ms, side)
        }
    }

    fn generate_add(&mut self, now_ms: u64, side: Side) -> String {
        let order_id = self.next_id.to_string();
        self.next_id += 1;
        let ticker = self.rng.gen_range(0..=2024);
        let price: f64 = self.rng.gen_range(0.00001..10000.0);
        let size: u32 = self.rng.gen_range(1..=10000);
        let side_char = match side {
            Side::Bid => 'B',
            Side::Ask => 'S',
        };
        match side {
            Side::Bid => {
                self.bid_pool.push(order_id.clone());
                self.max_bid_pool = self.max_bid_pool.max(self.bid_pool.len());
            }
            Side::Ask => {
                self.ask_pool.push(order_id.clone());
                self.max_ask_pool = self.max_ask_pool.max(self.ask_pool.len());
            }
        }
        format!("{now_ms}|{order_id}|a|{ticker}|{side_char}|{price:.5}|{size}")
    }

    fn generate_update(&mut self, now_ms: u64, side: Side) -> String {
        let size: u32 = self.rng.gen_range(1..=10000);
        let pool = match side {
            Side::Bid => &self.bid_pool,
            Side::Ask => &self.ask_pool,
        };
        let order_id = &pool[self.rng.gen_range(0..pool.len())];
        format!("{now_ms}|{order_id}|u|{size}")
    }

    fn generate_cancel(&mut self, now_ms: u64, side: Side) -> String {
        let pool = match side {
            Side::Bid => &mut self.bid_pool,
            Side::Ask => &mut self.ask_pool,
        };
        let index = self.rng.gen_range(0..pool.len());
        let order_id = pool.swap_remove(index);
        format!("{now_ms}|{order_id}|c")
    }

    /// High-water mark of the bid-side live pool.
    pub fn max_bid_pool(&self) -> usize {
        self.max_bid_pool
    }

    /// High-water mark of the ask-side live pool.
    pub fn max_ask_pool(&self) -> usize {
        self.max_ask_pool
    }
}

impl Default for MockDataFeed {
    fn default() -> Self {
        Self::new()
    }
}
