pub mod apply;
pub mod db;
pub mod parse;
