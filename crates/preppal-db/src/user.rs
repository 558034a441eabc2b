mod mutation;
mod query;

pub use mutation::{Debit, DebitError, Mutation};
pub use query::Query;
