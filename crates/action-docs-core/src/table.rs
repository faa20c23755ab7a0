use crate::action::{Described, InputSpec, OutputSpec};
use indexmap::IndexMap;

pub const NO_DESCRIPTION: &str = "No description";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableKind {
    Inputs,
    Outputs,
}

impl TableKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TableKind::Inputs => "inputs",
            TableKind::Outputs => "outputs",
        }
    }

    fn header(&self) -> &'static str {
        match self {
            TableKind::Inputs => {
                "| Input | Description | Required | Default |\n|-------|-------------|----------|---------|"
            }
            TableKind::Outputs => "| Output | Description |\n|--------|-------------|",
        }
    }

    /// Line rendered in place of a table when there is nothing to list.
    pub fn empty_marker(&self) -> String {
        format!("*No {}*", self.as_str())
    }
}

/// One table row per entry. Implemented for `InputSpec` and `OutputSpec` so a
/// single renderer covers both tables.
pub trait TableRow: Described {
    const KIND: TableKind;

    /// Cells after the name and description columns.
    fn extra_cells(&self) -> Vec<String>;
}

impl TableRow for InputSpec {
    const KIND: TableKind = TableKind::Inputs;

    fn extra_cells(&self) -> Vec<String> {
        let required = if self.required { "Yes" } else { "No" };
        let default = match &self.default {
            Some(value) => format!("`{value}`"),
            None => "-".to_string(),
        };
        vec![required.to_string(), default]
    }
}

impl TableRow for OutputSpec {
    const KIND: TableKind = TableKind::Outputs;

    fn extra_cells(&self) -> Vec<String> {
        Vec::new()
    }
}

/// Render `fields` as a markdown table in declaration order.
pub fn render<T: TableRow>(fields: &IndexMap<String, T>) -> String {
    if fields.is_empty() {
        return T::KIND.empty_marker();
    }

    let mut lines = vec![T::KIND.header().to_string()];
    for (name, spec) in fields {
        let description = spec.description().map(single_line).unwrap_or_default();
        let description = if description.is_empty() {
            NO_DESCRIPTION.to_string()
        } else {
            description
        };

        let mut cells = vec![format!("`{name}`"), description];
        cells.extend(spec.extra_cells());
        lines.push(format!("| {} |", cells.join(" | ")));
    }
    lines.join("\n")
}

/// Collapse the line breaks of a YAML block scalar so a cell stays on one
/// table row.
fn single_line(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(description: Option<&str>, required: bool, default: Option<&str>) -> InputSpec {
        InputSpec {
            description: description.map(str::to_string),
            required,
            default: default.map(str::to_string),
        }
    }

    #[test]
    fn empty_inputs_render_marker_not_header() {
        let out = render::<InputSpec>(&IndexMap::new());
        assert_eq!(out, "*No inputs*");
        assert!(!out.contains('|'));
    }

    #[test]
    fn empty_outputs_render_marker() {
        assert_eq!(render::<OutputSpec>(&IndexMap::new()), "*No outputs*");
    }

    #[test]
    fn inputs_table_keeps_declaration_order() {
        let mut fields = IndexMap::new();
        fields.insert("zeta".to_string(), input(Some("Last letter"), true, None));
        fields.insert("alpha".to_string(), input(None, false, Some("lts/*")));

        let out = render(&fields);
        assert_eq!(
            out,
            "| Input | Description | Required | Default |\n\
             |-------|-------------|----------|---------|\n\
             | `zeta` | Last letter | Yes | - |\n\
             | `alpha` | No description | No | `lts/*` |"
        );
    }

    #[test]
    fn outputs_table_has_two_columns() {
        let mut fields = IndexMap::new();
        fields.insert(
            "url".to_string(),
            OutputSpec {
                description: Some("Preview URL".to_string()),
            },
        );
        assert_eq!(
            render(&fields),
            "| Output | Description |\n|--------|-------------|\n| `url` | Preview URL |"
        );
    }

    #[test]
    fn multiline_description_stays_on_one_row() {
        let mut fields = IndexMap::new();
        fields.insert(
            "body".to_string(),
            input(Some("First line\nsecond line\n"), false, None),
        );
        let out = render(&fields);
        assert!(out.ends_with("| `body` | First line second line | No | - |"));
    }
}
