pub mod reading;

pub use reading::{NewStoredReading, StoredReading};
