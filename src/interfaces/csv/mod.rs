//! CSV readers for stock, coin and session files, and a writer for ledger snapshots.

pub mod coin_reader;
pub mod command_reader;
pub mod ledger_writer;
pub mod stock_reader;

fn reader_builder() -> ::csv::ReaderBuilder {
    let mut builder = ::csv::ReaderBuilder::new();
    builder.trim(::csv::Trim::All).flexible(true);
    builder
}
