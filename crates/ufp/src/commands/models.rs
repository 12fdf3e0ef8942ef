//! `ufp models` -- list the model registry.

use serde::Serialize;
use tabled::Tabled;

use ufp_core::{EntityKind, ModelRegistry};

use super::Context;
use crate::error::CliError;
use crate::output;

#[derive(Serialize)]
struct ModelEntry {
    model: &'static str,
    entity: EntityKind,
}

#[derive(Tabled)]
struct ModelRow {
    #[tabled(rename = "Model Key")]
    model: &'static str,
    #[tabled(rename = "Entity")]
    entity: String,
}

pub fn handle(ctx: &Context) -> Result<(), CliError> {
    let entries: Vec<ModelEntry> = ModelRegistry::global()
        .entries()
        .map(|(model, entity)| ModelEntry {
            model: model.as_wire(),
            entity,
        })
        .collect();

    let out = output::render_list(
        &ctx.output,
        &entries,
        |e| ModelRow {
            model: e.model,
            entity: e.entity.to_string(),
        },
        |e| e.model.to_owned(),
    );
    output::print_output(&out, ctx.quiet);
    Ok(())
}
