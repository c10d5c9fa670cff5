pub mod equipment;
pub mod facility;
pub mod tariff;
pub mod types;
pub mod user;

pub use equipment::*;
pub use facility::*;
pub use tariff::*;
pub use types::*;
pub use user::*;
