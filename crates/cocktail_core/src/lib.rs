pub mod domain;
pub mod error;
pub mod logic;
pub mod normalize;
pub mod ports;
pub mod session;
pub mod validate;

pub use domain::{Alcoholic, DrinkSummary, Ingredient, NormalizedDrink, RawCatalogRecord, UserAccount};
pub use error::{ArgumentError, CocktailError, CocktailResult, LogicError};
pub use logic::{CocktailLogic, LogicOptions};
pub use ports::{
    AccountReply, AccountService, AuthToken, CatalogReply, CatalogService, PortError, PortResult,
    RemoteUser, UserPatch,
};
pub use session::{Session, SessionStore};
