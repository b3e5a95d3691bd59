pub mod accounts;
pub mod orders;
pub mod users;

pub use accounts::Entity as Accounts;
pub use orders::Entity as Orders;
pub use users::Entity as Users;
