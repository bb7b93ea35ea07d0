pub mod menu;
pub mod order;
pub mod saved;
pub mod tip;
pub mod total;
