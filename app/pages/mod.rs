pub mod compare;
pub mod error;
pub mod hyperparameters;
pub mod index;
pub mod model;
pub mod run;
pub mod theme;
