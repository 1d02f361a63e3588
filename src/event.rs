use crate::types::{Action, Side};
use rust_decimal::Decimal;
use std::str::FromStr;
use thiserror::Error;

/// Errors raised while constructing a `MarketEvent` from a wire line.
///
/// These cover input that cannot be represented as a typed event at all
/// (missing header fields, unknown action, numeric garbage). A line that is
/// structurally parseable but flagged as corrupt (trailing junk fields, a
/// zero size) instead yields an event with `processable == false`, which the
/// engine silently discards.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseEventError {
    #[error("empty event line")]
    Empty,

    #[error("missing field: {0}")]
    MissingField(&'static str),

    #[error("unknown action token: {0:?}")]
    UnknownAction(String),

    #[error("invalid timestamp: {0:?}")]
    InvalidTimestamp(String),

    #[error("invalid price: {0:?}")]
    InvalidPrice(String),

    #[error("invalid size: {0:?}")]
    InvalidSize(String),
}

/// Action-dependent payload of a market-data event.
///
/// Modeling the tail fields per action makes it impossible to build, say, an
/// `Update` that claims to carry a price.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    /// Create a new order
    Add {
        instrument: String,
        side: Side,
        price: Decimal,
        size: u32,
    },
    /// Rewrite the size of an existing order
    Update { size: u32 },
    /// Remove an existing order
    Cancel,
}

/// One parsed market-data message, immutable once constructed.
///
/// Events are produced by parsing a pipe-delimited wire line:
///
/// ```text
/// Add:    <timestamp>|<order_id>|a|<instrument>|<side:'B'|'S'>|<price>|<size>
/// Update: <timestamp>|<order_id>|u|<size>
/// Cancel: <timestamp>|<order_id>|c
/// ```
///
/// ## Examples
///
/// ```
/// use market_book::{MarketEvent, Side};
///
/// let event: MarketEvent = "1568390243|abbb11|a|AAPL|B|209.00000|100".parse().unwrap();
/// assert_eq!(event.timestamp, 1568390243);
/// assert_eq!(event.order_id, "abbb11");
/// assert_eq!(event.side(), Some(Side::Bid));
/// assert_eq!(event.size(), Some(100));
/// assert!(event.processable);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarketEvent {
    /// Feed-assigned timestamp; monotonic-ish by convention, not enforced
    pub timestamp: u64,
    /// Opaque unique identifier of the order this event targets
    pub order_id: String,
    /// The action and its action-dependent fields
    pub payload: Payload,
    /// False when the line carried an unexpected field count or a zero size;
    /// such events are silently discarded by the engine
    pub processable: bool,
}

impl MarketEvent {
    /// Returns the action this event requests.
    pub fn action(&self) -> Action {
        match self.payload {
            Payload::Add { .. } => Action::Add,
            Payload::Update { .. } => Action::Update,
            Payload::Cancel => Action::Cancel,
        }
    }

    /// Returns the instrument, for `Add` events.
    pub fn instrument(&self) -> Option<&str> {
        match &self.payload {
            Payload::Add { instrument, .. } => Some(instrument),
            _ => None,
        }
    }

    /// Returns the side, for `Add` events.
    pub fn side(&self) -> Option<Side> {
        match self.payload {
            Payload::Add { side, .. } => Some(side),
            _ => None,
        }
    }

    /// Returns the price, for `Add` events.
    pub fn price(&self) -> Option<Decimal> {
        match self.payload {
            Payload::Add { price, .. } => Some(price),
            _ => None,
        }
    }

    /// Returns the size, for `Add` and `Update` events.
    pub fn size(&self) -> Option<u32> {
        match self.payload {
            Payload::Add { size, .. } | Payload::Update { size } => Some(size),
            Payload::Cancel => None,
        }
    }
}

impl FromStr for MarketEvent {
    type Err = ParseEventError;

    /// Parses one wire line into a `MarketEvent`.
    ///
    /// Fields are consumed positionally: timestamp, order_id, action, then
    /// the action-specific tail. `Cancel` stops after the action and ignores
    /// any trailing fields. `Update` consumes exactly one trailing field
    /// (size) and `Add` exactly four (instrument, side, price, size); extra
    /// fields flag the event unprocessable rather than failing construction.
    ///
    /// The side field is lenient: anything not starting with `S` is a bid.
    /// Numeric failures (non-numeric timestamp/price/size, size above
    /// `u32::MAX`, negative price) are hard construction errors.
    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim_end_matches(['\r', '\n']);
        if line.is_empty() {
            return Err(ParseEventError::Empty);
        }

        let mut fields = line.split('|');

        let timestamp_field = fields
            .next()
            .ok_or(ParseEventError::MissingField("timestamp"))?;
        let timestamp: u64 = timestamp_field
            .parse()
            .map_err(|_| ParseEventError::InvalidTimestamp(timestamp_field.to_owned()))?;

        let order_id = fields
            .next()
            .ok_or(ParseEventError::MissingField("order_id"))?
            .to_owned();

        let action = fields
            .next()
            .ok_or(ParseEventError::MissingField("action"))?;

        match action {
            "a" => {
                let instrument = fields
                    .next()
                    .ok_or(ParseEventError::MissingField("instrument"))?
                    .to_owned();
                // Lenient by wire-format convention: 'S' marks an ask,
                // any other value is taken as a bid.
                let side = if fields
                    .next()
                    .ok_or(ParseEventError::MissingField("side"))?
                    .starts_with('S')
                {
                    Side::Ask
                } else {
                    Side::Bid
                };
                let price = parse_price(
                    fields.next().ok_or(ParseEventError::MissingField("price"))?,
                )?;
                let size = parse_size(
                    fields.next().ok_or(ParseEventError::MissingField("size"))?,
                )?;
                let processable = size > 0 && fields.next().is_none();
                Ok(MarketEvent {
                    timestamp,
                    order_id,
                    payload: Payload::Add {
                        instrument,
                        side,
                        price,
                        size,
                    },
                    processable,
                })
            }
            "u" => {
                let size = parse_size(
                    fields.next().ok_or(ParseEventError::MissingField("size"))?,
                )?;
                let processable = size > 0 && fields.next().is_none();
                Ok(MarketEvent {
                    timestamp,
                    order_id,
                    payload: Payload::Update { size },
                    processable,
                })
            }
            // Cancel carries no tail; trailing fields are ignored.
            "c" => Ok(MarketEvent {
                timestamp,
                order_id,
                payload: Payload::Cancel,
                processable: true,
            }),
            other => Err(ParseEventError::UnknownAction(other.to_owned())),
        }
    }
}

fn parse_price(field: &str) -> Result<Decimal, ParseEventError> {
    let price = Decimal::from_str(field)
        .map_err(|_| ParseEventError::InvalidPrice(field.to_owned()))?;
    if price.is_sign_negative() {
        return Err(ParseEventError::InvalidPrice(field.to_owned()));
    }
    Ok(price)
}

fn parse_size(field: &str) -> Result<u32, ParseEventError> {
    field
        .parse()
        .map_err(|_| ParseEventError::InvalidSize(field.to_owned()))
}
