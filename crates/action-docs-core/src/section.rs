use crate::action::ActionRecord;
use crate::{paths, table};

/// Documentation block for one action: heading, description, tables, usage.
///
/// Blocks are separated by exactly one blank line; the outputs table is
/// left out entirely when the action declares no outputs.
pub fn compose(action: &ActionRecord, example: &str, language: &str) -> String {
    let mut blocks = vec![
        format!(
            "### [{}]({})",
            action.display_name,
            paths::relative_link(&action.identifier)
        ),
        action.description.trim().to_string(),
        "**Inputs:**".to_string(),
        table::render(&action.inputs),
    ];

    if !action.outputs.is_empty() {
        blocks.push("**Outputs:**".to_string());
        blocks.push(table::render(&action.outputs));
    }

    blocks.push("**Usage:**".to_string());
    blocks.push(format!("```{language}\n{example}\n```"));

    blocks.join("\n\n")
}

/// Join composed sections into the block that goes between the root markers.
pub fn compose_all<I, S>(sections: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let joined = sections
        .into_iter()
        .map(|s| s.as_ref().trim_end().to_string())
        .collect::<Vec<_>>()
        .join("\n\n");
    joined.trim_end().to_string()
}
