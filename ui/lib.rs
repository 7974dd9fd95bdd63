mod alert;
mod form;
pub mod hyperparameters;
pub mod icons;
mod navbar;
mod table;
pub mod theme;
mod util;

pub use self::alert::*;
pub use self::form::*;
pub use self::hyperparameters::{
	HyperparameterEditor, HyperparameterForm, HyperparameterRow, SaveError, SAVE_FAILED_ALERT,
};
pub use self::navbar::*;
pub use self::table::*;
pub use self::theme::{FileThemeStorage, MemoryThemeStorage, ThemeError, ThemeStorage, ThemeStore};
pub use self::util::*;
