//! CLI argument types and command handlers

pub mod category;
pub mod expense;

pub use category::{handle_categories_command, CategoriesArgs, CategoryAction};
pub use expense::{
    handle_add_command, handle_delete_command, handle_list_command, handle_show_command,
    handle_summary_command, AddArgs, DeleteArgs, ListArgs, ShowArgs, SummaryArgs,
};
