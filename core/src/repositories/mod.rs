pub mod account;
pub mod company;
pub mod memory;
pub mod transaction;

pub use account::AccountRepository;
pub use company::CompanyRepository;
pub use memory::{InMemoryStore, InMemoryTransaction};
pub use transaction::{complete, Transaction, TransactionManager};
