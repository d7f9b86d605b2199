//! Line commands understood by the shell.

use album::features::members::{Member, MemberCandidate, MemberId, Members};
use anyhow::{Context, Result, bail};
use std::fmt::Write as _;

/// One parsed input line.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Command {
    /// `list`
    List,
    /// `search <text>`; an empty query lists everyone.
    Search(String),
    /// `show <id>`
    Show(MemberId),
    /// `add <json>`, a registration form as camelCase JSON.
    Add(Box<MemberCandidate>),
    /// `delete <id>`
    Delete(MemberId),
    Help,
    Quit,
}

impl Command {
    pub(crate) fn parse(line: &str) -> Result<Option<Self>> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }
        let (verb, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();

        let command = match verb.to_ascii_lowercase().as_str() {
            "list" | "ls" => Self::List,
            "search" | "find" => Self::Search(rest.to_owned()),
            "show" => Self::Show(rest.parse().context("show <id>")?),
            "delete" | "rm" => Self::Delete(rest.parse().context("delete <id>")?),
            "add" => {
                let form = serde_json::from_str(rest).context("add expects a JSON form")?;
                Self::Add(Box::new(form))
            },
            "help" | "?" => Self::Help,
            "quit" | "exit" => Self::Quit,
            other => bail!("Unknown command '{other}', try 'help'"),
        };
        Ok(Some(command))
    }

    /// Runs the command and returns the text to print.
    pub(crate) fn execute(self, members: &Members) -> Result<String> {
        let out = match self {
            Self::List => render_list(&members.store.list()),
            Self::Search(query) => render_list(&members.store.search(&query)),
            Self::Show(id) => match members.store.get(&id) {
                Some(member) => serde_json::to_string_pretty(&member)?,
                None => format!("No member with id {id}"),
            },
            Self::Add(form) => {
                let mut form = *form;
                members.prefill_address(&mut form.address_fields);
                match members.register(&form, None) {
                    Ok(id) => format!("Added {id}"),
                    Err(violations) => {
                        let mut out = String::from("Rejected:");
                        for v in violations.iter() {
                            write!(out, "\n  {}: {}", v.field, v.message)?;
                        }
                        out
                    },
                }
            },
            Self::Delete(id) => {
                if members.store.delete(&id) {
                    format!("Deleted {id}")
                } else {
                    format!("No member with id {id}")
                }
            },
            Self::Help => HELP.to_owned(),
            Self::Quit => String::new(),
        };
        Ok(out)
    }
}

const HELP: &str = "\
list                 show every member
search <text>        members whose name contains <text>
show <id>            member details as JSON
add <json>           register a member from a JSON form
delete <id>          remove a member
quit                 leave";

fn render_list(members: &[Member]) -> String {
    if members.is_empty() {
        return "No members".to_owned();
    }
    members
        .iter()
        .map(|m| format!("{}  {} ({}), {}", m.id, m.name, m.age, m.role))
        .collect::<Vec<_>>()
        .join("\n")
}
