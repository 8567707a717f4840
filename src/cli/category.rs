//! Category CLI commands

use clap::{Args, ValueEnum};
use tracing::info;

use crate::error::{ExpenseError, ExpenseResult};

/// Arguments for `categories`
#[derive(Args, Debug)]
pub struct CategoriesArgs {
    /// Action to perform
    #[arg(short, long, value_enum, ignore_case = true)]
    pub action: CategoryAction,

    /// Category name (e.g. Food, Transport)
    #[arg(short, long)]
    pub name: Option<String>,

    /// Category id (e.g. 3)
    #[arg(short, long)]
    pub id: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CategoryAction {
    /// List all categories
    List,
    /// Add a new category
    Add,
    /// Delete a category by id or name
    Delete,
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Handle `categories`: list, add, or delete categories
pub fn handle_categories_command(args: CategoriesArgs) -> ExpenseResult<()> {
    match args.action {
        CategoryAction::List => {
            info!("categories");
            info!("  1: Food");
            info!("  2: Transport");
            info!("  3: Utilities");
            Ok(())
        }
        CategoryAction::Add => {
            let name = non_blank(args.name.as_deref()).ok_or_else(|| {
                ExpenseError::validation(
                    "missing --name for 'add'. example: categories --action add --name Food",
                )
            })?;
            info!("category added: {}", name);
            Ok(())
        }
        CategoryAction::Delete => {
            let id = args.id.filter(|id| *id > 0);
            let name = non_blank(args.name.as_deref());
            match (id, name) {
                (Some(id), None) => {
                    info!("category #{} deleted successfully", id);
                    Ok(())
                }
                (None, Some(name)) => {
                    info!("category '{}' deleted successfully", name);
                    Ok(())
                }
                _ => Err(ExpenseError::validation(
                    "for 'delete', provide exactly one of --id or --name",
                )),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_succeeds() {
        handle_categories_command(CategoriesArgs {
            action: CategoryAction::List,
            name: None,
            id: None,
        })
        .unwrap();
    }

    #[test]
    fn test_add_requires_name() {
        let err = handle_categories_command(CategoriesArgs {
            action: CategoryAction::Add,
            name: Some("   ".to_string()),
            id: None,
        })
        .unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_add_with_name_succeeds() {
        handle_categories_command(CategoriesArgs {
            action: CategoryAction::Add,
            name: Some("Food".to_string()),
            id: None,
        })
        .unwrap();
    }

    #[test]
    fn test_delete_rejects_both_selectors() {
        let err = handle_categories_command(CategoriesArgs {
            action: CategoryAction::Delete,
            name: Some("Food".to_string()),
            id: Some(3),
        })
        .unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_delete_rejects_neither_selector() {
        let err = handle_categories_command(CategoriesArgs {
            action: CategoryAction::Delete,
            name: None,
            id: None,
        })
        .unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_delete_by_id_succeeds() {
        handle_categories_command(CategoriesArgs {
            action: CategoryAction::Delete,
            name: None,
            id: Some(3),
        })
        .unwrap();
    }
}
