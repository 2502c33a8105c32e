use std::fmt::Write as _;

use anyhow::{Context, Result, anyhow, bail};
use todosync_app::{Dispatched, OperationOutcome, TaskCommand, TaskService};
use todosync_core::{Task, TaskCounts, TaskId, TaskViews};
use todosync_store::KeyValueStore;
use tokio::runtime::Runtime;

use crate::format::{created_label, format_date};
use crate::{Command, LsFormat};

/// Execute a non-interactive command against `service`.
pub fn run<K: KeyValueStore>(command: Command, service: &TaskService<K>, runtime: &Runtime) -> Result<()> {
    match command {
        Command::Add { title } => {
            let dispatched = runtime.block_on(service.run(TaskCommand::Create(title)));
            report(dispatched)
        }
        Command::Done { task } => {
            let id = resolve_task_id(&service.tasks(), &task)?;
            report(runtime.block_on(service.run(TaskCommand::Complete(id))))
        }
        Command::Rm { task } => {
            let id = resolve_task_id(&service.tasks(), &task)?;
            report(runtime.block_on(service.run(TaskCommand::Delete(id))))
        }
        Command::Ls {
            search,
            completed,
            deleted,
            format,
        } => {
            let selection = if completed {
                ListSelection::Completed
            } else if deleted {
                ListSelection::Deleted
            } else {
                ListSelection::Active
            };
            let search = search.unwrap_or_default();
            print!("{}", render_listing(&service.tasks(), selection, &search, format)?);
            Ok(())
        }
        Command::Show { task } => {
            let tasks = service.tasks();
            let id = resolve_task_id(&tasks, &task)?;
            let task = tasks
                .iter()
                .find(|candidate| candidate.id == id)
                .ok_or_else(|| anyhow!("task not found: {id}"))?;
            println!("{}", serde_json::to_string_pretty(task)?);
            Ok(())
        }
        Command::Stats => {
            print!("{}", render_counts(TaskCounts::from_tasks(&service.tasks())));
            Ok(())
        }
        Command::Tui | Command::InitConfig { .. } => bail!("command is not handled by the task service"),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListSelection {
    Active,
    Completed,
    Deleted,
}

impl ListSelection {
    fn pick<'a>(self, views: &TaskViews<'a>) -> Vec<&'a Task> {
        match self {
            Self::Active => views.active.clone(),
            Self::Completed => views.completed.clone(),
            Self::Deleted => views.deleted.clone(),
        }
    }

    /// Message for an empty listing; `active` counts every active task, matched or not.
    const fn empty_message(self, active: usize) -> &'static str {
        match self {
            Self::Active if active == 0 => "Create a task!",
            Self::Active => "No tasks match the search",
            Self::Completed => "No completed tasks",
            Self::Deleted => "No deleted tasks",
        }
    }
}

fn render_listing(tasks: &[Task], selection: ListSelection, search: &str, format: LsFormat) -> Result<String> {
    let views = TaskViews::derive(tasks, search);
    let listed = selection.pick(&views);
    if listed.is_empty() {
        return Ok(format!("{}\n", selection.empty_message(views.counts.active)));
    }
    Ok(match format {
        LsFormat::Table => render_task_table(&listed),
        LsFormat::Json => format!("{}\n", serde_json::to_string_pretty(&listed)?),
    })
}

/// Print the outcome of a mutating command; rejections become errors.
fn report(dispatched: Dispatched) -> Result<()> {
    let Dispatched { result, notice, .. } = dispatched;
    match result {
        Ok(outcome) => {
            if let Some(line) = describe_outcome(&outcome) {
                println!("{line}");
            }
            Ok(())
        }
        Err(err) => {
            let text = notice.map_or_else(|| err.to_string(), |notice| notice.text);
            Err(anyhow::Error::new(err).context(text))
        }
    }
}

fn describe_outcome(outcome: &OperationOutcome) -> Option<String> {
    let (verb, task) = match outcome {
        OperationOutcome::Created(task) => ("created", task),
        OperationOutcome::Completed(task) => ("completed", task),
        OperationOutcome::Deleted(task) => ("deleted", task),
        OperationOutcome::Unchanged => return None,
    };
    Some(format!("{verb} task: {} ({})", task.id, task.title))
}

fn render_task_table(tasks: &[&Task]) -> String {
    let mut out = String::from("ID | Created | Title\n-- | ------- | -----\n");
    for task in tasks {
        let _ = writeln!(out, "{} | {} | {}", task.id, format_date(task.created_at), task.title);
    }
    out
}

fn render_counts(counts: TaskCounts) -> String {
    format!(
        "{}\n{} completed\n{} deleted\n{} active\n",
        created_label(counts.created),
        counts.completed,
        counts.deleted,
        counts.active
    )
}

/// Accept a full task id or an unambiguous prefix of one.
///
/// A well-formed id is returned as is, even when no task has it.
fn resolve_task_id(tasks: &[Task], raw: &str) -> Result<TaskId> {
    let needle = raw.trim().to_ascii_lowercase();
    if needle.is_empty() {
        bail!("task id must not be empty");
    }
    if let Ok(id) = needle.parse::<TaskId>() {
        return Ok(id);
    }

    let mut matches = tasks
        .iter()
        .map(|task| task.id)
        .filter(|id| id.to_string().starts_with(&needle));
    let first = matches
        .next()
        .with_context(|| format!("no task id starts with '{raw}'"))?;
    if matches.next().is_some() {
        bail!("task id prefix '{raw}' is ambiguous");
    }
    Ok(first)
}
