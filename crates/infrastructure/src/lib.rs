pub mod dns;
pub mod output;
