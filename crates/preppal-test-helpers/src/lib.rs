mod pdf;
mod sqlite;

pub use pdf::*;
pub use sqlite::*;
use std::borrow::Cow;

pub trait TestDb {
    fn db_uri(&self) -> Cow<'_, str>;
}
