//! Command handlers shared by the subcommands and the console.

use std::io::Write;

use anyhow::{bail, Context};
use hbnb_models::Entity;
use hbnb_storage::ObjectStore;
use hbnb_types::{Fields, Kind};
use serde_json::Value;

use crate::cli::OutputFormat;

pub const CLASS_MISSING: &str = "** class name missing **";
pub const CLASS_UNKNOWN: &str = "** class doesn't exist **";
pub const ID_MISSING: &str = "** instance id missing **";
pub const NOT_FOUND: &str = "** no instance found **";

/// Runs store commands and writes their output to `out`.
pub struct Session<'a, W: Write> {
    store: &'a dyn ObjectStore,
    out: W,
    format: OutputFormat,
}

impl<'a, W: Write> Session<'a, W> {
    pub fn new(store: &'a dyn ObjectStore, out: W, format: OutputFormat) -> Self {
        Self { store, out, format }
    }

    pub fn out(&mut self) -> &mut W {
        &mut self.out
    }

    /// Build an entity from `key=value` assignments, save it, and print its id.
    pub fn create<S: AsRef<str>>(&mut self, kind: Option<&str>, assignments: &[S]) -> anyhow::Result<()> {
        let Some(kind) = self.resolve_kind(kind)? else {
            return Ok(());
        };
        let mut fields = Fields::new();
        for assignment in assignments {
            let (name, value) = parse_assignment(assignment.as_ref())?;
            fields.insert(name, value);
        }
        let mut entity = self.store.create(kind, fields)?;
        self.store.save(&mut entity)?;
        tracing::debug!(key = %entity.key(), "created entity");
        writeln!(self.out, "{}", entity.id())?;
        Ok(())
    }

    /// Print the entity stored under `<kind>.<id>`.
    pub fn show(&mut self, kind: Option<&str>, id: Option<&str>) -> anyhow::Result<()> {
        let Some(kind) = self.resolve_kind(kind)? else {
            return Ok(());
        };
        let Some(id) = id else {
            writeln!(self.out, "{ID_MISSING}")?;
            return Ok(());
        };
        match self.store.get(&format!("{kind}.{id}"))? {
            Some(entity) => self.print_one(&entity),
            None => {
                writeln!(self.out, "{NOT_FOUND}")?;
                Ok(())
            }
        }
    }

    /// Print every entity, or every entity of one kind.
    pub fn all(&mut self, kind: Option<&str>) -> anyhow::Result<()> {
        let entities = match kind {
            None => self.store.all()?.into_values().collect(),
            Some(name) => {
                let Some(kind) = self.resolve_kind(Some(name))? else {
                    return Ok(());
                };
                self.store.all_of_kind(kind)?
            }
        };
        match self.format {
            OutputFormat::Text => {
                for entity in &entities {
                    writeln!(self.out, "{entity}")?;
                }
            }
            OutputFormat::Json => {
                let mappings = entities
                    .iter()
                    .map(|entity| entity.to_mapping().map(Value::Object))
                    .collect::<Result<Vec<_>, _>>()?;
                writeln!(self.out, "{}", serde_json::to_string_pretty(&mappings)?)?;
            }
        }
        Ok(())
    }

    fn print_one(&mut self, entity: &Entity) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Text => writeln!(self.out, "{entity}")?,
            OutputFormat::Json => {
                let mapping = Value::Object(entity.to_mapping()?);
                writeln!(self.out, "{}", serde_json::to_string_pretty(&mapping)?)?;
            }
        }
        Ok(())
    }

    /// Map a kind name to a [`Kind`], printing the console message and
    /// returning `None` when it is missing or unknown.
    fn resolve_kind(&mut self, name: Option<&str>) -> anyhow::Result<Option<Kind>> {
        let Some(name) = name else {
            writeln!(self.out, "{CLASS_MISSING}")?;
            return Ok(None);
        };
        match name.parse::<Kind>() {
            Ok(kind) => Ok(Some(kind)),
            Err(_) => {
                writeln!(self.out, "{CLASS_UNKNOWN}")?;
                Ok(None)
            }
        }
    }
}

/// Split `name=value`. The value is read as JSON when it parses, otherwise
/// it is taken as a plain string.
pub fn parse_assignment(assignment: &str) -> anyhow::Result<(String, Value)> {
    let (name, raw) = assignment
        .split_once('=')
        .with_context(|| format!("expected name=value, got '{assignment}'"))?;
    if name.is_empty() {
        bail!("missing field name in '{assignment}'");
    }
    let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
    Ok((name.to_string(), value))
}
