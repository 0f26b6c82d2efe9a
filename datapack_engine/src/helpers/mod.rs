pub mod amounts;
pub mod passwords;

pub use amounts::parse_amount;
pub use passwords::{generate_numeric_password, hash_password, verify_password};
