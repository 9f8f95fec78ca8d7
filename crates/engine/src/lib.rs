//! Personal finance engine.
//!
//! Users own categories (and their sub-categories) and post income/expense
//! transactions against them. Every posting moves the owner's balance and
//! inserts the transaction row atomically; see [`Engine::post_transaction`].

pub use audit::{Audit, SYSTEM_ACTOR};
pub use categories::Category;
pub use commands::{RegisterCmd, TransactionCmd, TransactionListFilter};
pub use credentials::{Bcrypt, PasswordHasher};
pub use error::{EngineError, ErrorKind};
pub use ops::{Engine, EngineBuilder, Session, parse_transaction_date};
pub use pagination::{DEFAULT_LIMIT, DEFAULT_PAGE, MAX_LIMIT, Page, PageRequest};
pub use sub_categories::SubCategory;
pub use tokens::{Claims, DEFAULT_TOKEN_TTL_HOURS, JwtSigner, TokenIdentity, TokenSigner};
pub use transactions::{Transaction, TransactionDetail, TransactionType};
pub use users::User;

mod audit;
mod categories;
mod commands;
mod credentials;
mod error;
mod ops;
mod pagination;
mod sub_categories;
mod tokens;
mod transactions;
mod users;
mod util;

type ResultEngine<T> = Result<T, EngineError>;
