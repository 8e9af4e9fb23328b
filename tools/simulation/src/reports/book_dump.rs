//! Plain-text book dump
//!
//! Renders every non-empty book in slot order, bids then asks, each in
//! priority order.

use crate::bots::StepRecord;
use crate::scheduler::SimObserver;
use crate::ticker::format_ticker;
use matching_engine::{OrderBook, OrderBookSet};
use std::fmt::Write as _;
use std::io;
use types::order::Order;
use types::trade::Trade;

const HEADER: &str = "----- Current Orders -----";
const FOOTER: &str = "--------------------------";

fn render_order(order: &Order) -> String {
    format!(
        "{} {} {}@{}",
        order.side,
        format_ticker(order.instrument),
        order.quantity(),
        order.price
    )
}

fn render_side<'a>(orders: impl Iterator<Item = &'a Order>) -> String {
    let rendered: Vec<String> = orders.map(render_order).collect();
    format!("[{}]", rendered.join(", "))
}

/// One book, or `None` when it holds no orders
pub fn render_book(book: &OrderBook) -> Option<String> {
    if book.is_empty() {
        return None;
    }
    Some(format!(
        "Ticker: {}\n  Buy Orders: {}\n  Sell Orders: {}\n",
        format_ticker(book.instrument()),
        render_side(book.bids().orders()),
        render_side(book.asks().orders()),
    ))
}

/// Every non-empty book between a header and a footer line
pub fn render_books(universe: &OrderBookSet) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{HEADER}");
    for rendered in universe.books().filter_map(render_book) {
        out.push_str(&rendered);
    }
    let _ = writeln!(out, "{FOOTER}");
    out
}

/// One trade as `Matched: <buy> with <sell> for N units`
pub fn render_trade(trade: &Trade) -> String {
    format!(
        "Matched: {} with {} for {} units",
        render_order(&trade.buy),
        render_order(&trade.sell),
        trade.quantity
    )
}

/// Observer that prints each order, its trades and the books after it
///
/// Write errors do not stop the run; the first one is kept and returned by
/// [`StepPrinter::finish`].
pub struct StepPrinter<W: io::Write> {
    out: W,
    error: Option<io::Error>,
}

impl<W: io::Write> StepPrinter<W> {
    pub fn new(out: W) -> Self {
        Self { out, error: None }
    }

    fn write_step(&mut self, record: &StepRecord, universe: &OrderBookSet) -> io::Result<()> {
        let ticket = &record.ticket;
        writeln!(
            self.out,
            "Trader {} order: {} {} {} {}",
            record.trader.index(),
            ticket.side,
            format_ticker(ticket.instrument),
            ticket.quantity,
            ticket.price
        )?;
        for trade in &record.trades {
            writeln!(self.out, "{}", render_trade(trade))?;
        }
        write!(self.out, "{}", render_books(universe))
    }

    /// Return the writer, or the first write error seen
    pub fn finish(self) -> io::Result<W> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.out),
        }
    }
}

impl<W: io::Write> SimObserver for StepPrinter<W> {
    fn on_step(&mut self, record: &StepRecord, universe: &OrderBookSet) {
        if self.error.is_some() {
            return;
        }
        if let Err(err) = self.write_step(record, universe) {
            tracing::warn!(error = %err, "Step output failed");
            self.error = Some(err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bots::{RandomTrader, TraderConfig};
    use crate::rng::{LcgStream, BASE_SEED};
    use crate::scheduler::RoundRobinScheduler;
    use matching_engine::create_universe;
    use types::ids::{InstrumentSlot, TraderId};
    use types::order::Side;

    #[test]
    fn test_empty_universe_renders_frame_only() {
        let universe = create_universe(8);

        assert_eq!(render_books(&universe), format!("{HEADER}\n{FOOTER}\n"));
    }

    #[test]
    fn test_render_books() {
        let mut universe = create_universe(8);
        let slot = InstrumentSlot::new(3);
        universe.submit(slot, Side::BUY, 5, 100).unwrap();
        universe.submit(slot, Side::BUY, 2, 101).unwrap();
        universe.submit(slot, Side::SELL, 4, 120).unwrap();

        let expected = format!(
            "{HEADER}\nTicker: TICKER3\n  Buy Orders: [Buy TICKER3 2@101, Buy TICKER3 5@100]\n  Sell Orders: [Sell TICKER3 4@120]\n{FOOTER}\n"
        );
        assert_eq!(render_books(&universe), expected);
    }

    #[test]
    fn test_render_trade() {
        let mut universe = create_universe(1);
        let slot = InstrumentSlot::new(0);
        universe.submit(slot, Side::BUY, 10, 100).unwrap();
        let trades = universe.submit(slot, Side::SELL, 4, 90).unwrap();

        assert_eq!(
            render_trade(&trades[0]),
            "Matched: Buy TICKER0 10@100 with Sell TICKER0 4@90 for 4 units"
        );
    }

    #[test]
    fn test_step_printer() {
        let mut universe = create_universe(1024);
        let trader = RandomTrader::new(
            TraderId::new(0),
            LcgStream::for_trader(BASE_SEED, 0),
            1,
            TraderConfig::default(),
        );
        let mut printer = StepPrinter::new(Vec::new());

        RoundRobinScheduler::new(vec![trader])
            .run(&mut universe, &mut printer)
            .unwrap();

        let out = String::from_utf8(printer.finish().unwrap()).unwrap();
        assert!(out.starts_with("Trader 0 order: Buy TICKER539 81 94\n"));
        assert!(out.contains("Ticker: TICKER539\n  Buy Orders: [Buy TICKER539 81@94]"));
    }

    struct FailingWriter;

    impl io::Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_step_printer_keeps_first_error() {
        let mut universe = create_universe(4);
        let trader = RandomTrader::new(
            TraderId::new(0),
            LcgStream::for_trader(BASE_SEED, 0),
            3,
            TraderConfig::default(),
        );
        let mut printer = StepPrinter::new(FailingWriter);

        RoundRobinScheduler::new(vec![trader])
            .run(&mut universe, &mut printer)
            .unwrap();

        assert_eq!(universe.orders_accepted(), 3);
        let err = printer.finish().err().unwrap();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }
}
