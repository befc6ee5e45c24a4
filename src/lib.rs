//! Client-side route table for the brainrefresh single-page application.

pub mod config;
pub mod observability;
pub mod routing;
pub mod views;

pub use config::schema::RouterConfig;
pub use routing::{Params, RouteMatch, RouteTable, RouterError};
pub use views::{LoadError, View, ViewLoader, ViewRef};
