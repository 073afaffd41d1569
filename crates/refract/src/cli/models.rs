//! The `refract models` command for inspecting the instruction catalog.

use clap::{Args, Subcommand, ValueEnum};
use refract_core::{InstructionCatalog, TaskType};
use serde::Serialize;

/// Arguments for the `models` command.
#[derive(Args, Debug)]
pub struct ModelsArgs {
    #[command(subcommand)]
    pub command: ModelsCommand,
}

/// Subcommands for catalog inspection.
#[derive(Subcommand, Debug)]
pub enum ModelsCommand {
    /// List models with dedicated instructions and the tasks they support
    List {
        /// Print as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Print the system instruction a model receives for a task
    Show {
        /// Model name (unknown names show the generic fallback)
        model: String,

        /// Task to show the instruction for
        #[arg(long, value_enum, default_value_t = TaskArg::Generation)]
        task: TaskArg,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum TaskArg {
    Generation,
    Editing,
}

impl From<TaskArg> for TaskType {
    fn from(task: TaskArg) -> Self {
        match task {
            TaskArg::Generation => TaskType::Generation,
            TaskArg::Editing => TaskType::Editing,
        }
    }
}

/// One row of `models list`.
#[derive(Debug, Serialize, PartialEq, Eq)]
struct ModelRow {
    model: &'static str,
    generation: bool,
    editing: bool,
}

fn catalog_rows(catalog: &InstructionCatalog) -> Vec<ModelRow> {
    catalog
        .known_models()
        .map(|(model, set)| ModelRow {
            model,
            generation: set.supports(TaskType::Generation),
            editing: set.supports(TaskType::Editing),
        })
        .collect()
}

/// Execute the models command.
pub async fn execute(args: ModelsArgs) -> anyhow::Result<()> {
    let catalog = InstructionCatalog::new();

    match args.command {
        ModelsCommand::List { json } => {
            let rows = catalog_rows(&catalog);
            if json {
                println!("{}", serde_json::to_string_pretty(&rows)?);
            } else {
                println!("{:<12} {:<12} {:<8}", "MODEL", "GENERATION", "EDITING");
                for row in &rows {
                    println!(
                        "{:<12} {:<12} {:<8}",
                        row.model,
                        yes_no(row.generation),
                        yes_no(row.editing)
                    );
                }
                println!("(any other model uses a generic, generation-only instruction)");
            }
        }

        ModelsCommand::Show { model, task } => {
            let task = TaskType::from(task);
            if !catalog.is_known(&model) {
                tracing::info!("'{model}' is not in the catalog; showing the generic fallback");
            }
            match catalog.instruction(&model, task) {
                Some(instruction) => println!("{instruction}"),
                None => anyhow::bail!(
                    "Model '{model}' does not support {task}; prompts pass through unchanged"
                ),
            }
        }
    }

    Ok(())
}

fn yes_no(supported: bool) -> &'static str {
    if supported {
        "yes"
    } else {
        "no"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_rows_cover_known_models() {
        let rows = catalog_rows(&InstructionCatalog::new());
        let names: Vec<_> = rows.iter().map(|r| r.model).collect();
        assert_eq!(names, ["gptimage", "kontext", "flux", "turbo"]);
        assert!(rows.iter().all(|r| r.generation));
    }

    #[test]
    fn test_catalog_rows_serialize() {
        let rows = catalog_rows(&InstructionCatalog::new());
        let json = serde_json::to_value(&rows).unwrap();
        assert_eq!(json[2]["model"], "flux");
        assert_eq!(json[2]["editing"], false);
        assert_eq!(json[1]["editing"], true);
    }
}
