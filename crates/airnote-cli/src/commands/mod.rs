//! Command implementations for the CLI.

mod add;
mod dashboard;
mod delete;
mod edit;
mod list;
mod ocr;
mod show;

pub use add::{AddArgs, cmd_add};
pub use dashboard::cmd_dashboard;
pub use delete::cmd_delete;
pub use edit::{EditArgs, cmd_edit};
pub use list::cmd_list;
pub use ocr::cmd_ocr;
pub use show::cmd_show;
