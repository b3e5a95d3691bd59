//! UI-independent view models: the order board, the order form and the auth screens.

pub mod auth;
pub mod board;
pub mod order_form;

pub use auth::{LoginForm, RegisterForm, Route, ValidationError};
pub use board::{BoardCard, BoardColumns, CardActions, OrderBoard};
pub use order_form::{OrderForm, SubmitOutcome};
