mod test_postgres;

pub use test_postgres::{TEST_DEFAULT_CREDITS, TestPostgres};
