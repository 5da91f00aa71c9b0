//! Widget view adapters

mod terminal;

pub use terminal::TerminalView;
