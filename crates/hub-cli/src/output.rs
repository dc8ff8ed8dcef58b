//! Table and JSON rendering for store state, changes and modules.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use serde_json::{Value, json};

use hub_store::{Change, ModuleRegistry, RootState, Store};

const NONE_LABEL: &str = "(none)";

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

/// Root fields as a two-column table.
pub fn state_table(state: &RootState) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Field"), header_cell("Value")]);
    apply_table_style(&mut table);
    table.add_row(vec![Cell::new("projectId"), text_cell(state.project_id())]);
    table.add_row(vec![Cell::new("previousUrl"), text_cell(state.previous_url())]);
    table.add_row(vec![
        Cell::new("minimumProjectPoints"),
        Cell::new(state.minimum_project_points()),
    ]);
    table.add_row(vec![
        Cell::new("minimumSubjectPoints"),
        Cell::new(state.minimum_subject_points()),
    ]);
    table
}

/// Observed changes, in commit order.
pub fn changes_table(changes: &[Change]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("Target"),
        header_cell("Previous"),
        header_cell("Value"),
    ]);
    apply_table_style(&mut table);
    if let Some(column) = table.column_mut(0) {
        column.set_cell_alignment(CellAlignment::Right);
    }
    for (idx, change) in changes.iter().enumerate() {
        let row = match change {
            Change::Root { mutation, previous } => vec![
                Cell::new(idx + 1),
                Cell::new(mutation.name()),
                text_cell(previous),
                text_cell(mutation.value()),
            ],
            Change::Module {
                namespace,
                operation,
            } => vec![
                Cell::new(idx + 1),
                Cell::new(format!("{namespace}/{operation}")),
                dim_cell("-"),
                dim_cell("-"),
            ],
        };
        table.add_row(row);
    }
    table
}

/// Registered namespaces with the operations each accepts.
pub fn modules_table(registry: &ModuleRegistry) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Namespace"), header_cell("Operations")]);
    apply_table_style(&mut table);
    for module in registry.iter() {
        table.add_row(vec![
            Cell::new(module.namespace()),
            Cell::new(module.operations().join(", ")),
        ]);
    }
    table
}

/// State held by each module, one row per namespace.
pub fn module_state_table(registry: &ModuleRegistry) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Namespace"), header_cell("State")]);
    apply_table_style(&mut table);
    for module in registry.iter() {
        table.add_row(vec![
            Cell::new(module.namespace()),
            Cell::new(module.state().to_string()),
        ]);
    }
    table
}

/// JSON report for `hub commit`: observed changes plus the final state tree.
pub fn commit_report(changes: &[Change], store: &Store) -> Value {
    json!({
        "changes": changes,
        "state": store.snapshot(),
    })
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn text_cell(value: &str) -> Cell {
    if value.is_empty() {
        dim_cell(NONE_LABEL)
    } else {
        Cell::new(value)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

#[cfg(test)]
mod tests {
    use hub_store::Mutation;

    use super::*;

    #[test]
    fn state_table_has_one_row_per_field() {
        let table = state_table(&RootState::default());
        assert_eq!(table.row_iter().count(), 4);
        let rendered = table.to_string();
        assert!(rendered.contains("minimumSubjectPoints"));
        assert!(rendered.contains(NONE_LABEL));
    }

    #[test]
    fn changes_table_numbers_rows() {
        let changes = vec![
            Change::Root {
                mutation: Mutation::PreviousUrl("/home".into()),
                previous: String::new(),
            },
            Change::Module {
                namespace: "auth".into(),
                operation: "reset".into(),
            },
        ];
        let rendered = changes_table(&changes).to_string();
        assert!(rendered.contains("/home"));
        assert!(rendered.contains("auth/reset"));
    }

    #[test]
    fn modules_table_lists_standard_namespaces() {
        let store = Store::standard().unwrap();
        let table = modules_table(store.modules());
        assert_eq!(table.row_iter().count(), 7);
        assert!(table.to_string().contains("libVersion"));
    }

    #[test]
    fn module_state_table_shows_module_contents() {
        let mut store = Store::standard().unwrap();
        store
            .commit_module("config", "set", json!({"key": "theme", "value": "dark"}))
            .unwrap();
        let table = module_state_table(store.modules());
        assert_eq!(table.row_iter().count(), 7);
        assert!(table.to_string().contains(r#"{"theme":"dark"}"#));
    }
}
