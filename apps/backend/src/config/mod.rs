pub mod cycle;
pub mod db;
