//! `ufp resolve` -- report each record's entity type without decoding fields.

use serde::Serialize;
use tabled::Tabled;

use ufp_core::convert::record_from_value;
use ufp_core::{Dispatcher, EntityKind};

use super::Context;
use crate::cli::ResolveArgs;
use crate::error::CliError;
use crate::input;
use crate::output;

#[derive(Serialize)]
struct Resolution {
    source: String,
    model: &'static str,
    entity: EntityKind,
}

#[derive(Tabled)]
struct ResolutionRow {
    #[tabled(rename = "Source")]
    source: String,
    #[tabled(rename = "Model")]
    model: String,
    #[tabled(rename = "Entity")]
    entity: String,
}

pub fn handle(args: &ResolveArgs, ctx: &Context) -> Result<(), CliError> {
    let skip = args.input.skip_invalid || ctx.skip_invalid;
    let records = input::read_inputs(&args.input.files)?;

    let dispatcher = Dispatcher::default();
    let mut resolved = Vec::with_capacity(records.len());
    for record in records {
        let result = record_from_value(record.value).and_then(|raw| dispatcher.resolve_type(&raw));
        match result {
            Ok(entity) => resolved.push(Resolution {
                source: record.source,
                model: entity.model_type().as_wire(),
                entity,
            }),
            Err(err) => ctx.on_failure(skip, &record.source, err)?,
        }
    }

    let out = output::render_list(
        &ctx.output,
        &resolved,
        |r| ResolutionRow {
            source: r.source.clone(),
            model: r.model.to_owned(),
            entity: r.entity.to_string(),
        },
        |r| r.entity.to_string(),
    );
    output::print_output(&out, ctx.quiet);
    Ok(())
}
