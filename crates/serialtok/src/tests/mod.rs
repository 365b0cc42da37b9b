mod property_chunking;
pub mod utils;
