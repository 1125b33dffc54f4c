pub mod errors;
pub mod db;
pub mod video;

#[cfg(test)]
mod tests;
