//! `ufp decode` -- construct typed entities from raw records.

use serde::Serialize;
use tabled::Tabled;
use tracing::debug;

use ufp_core::convert::record_from_value;
use ufp_core::{Dispatcher, EntityKind, ModelType, ProtectModel};

use super::Context;
use crate::cli::DecodeArgs;
use crate::error::CliError;
use crate::input;
use crate::output;

#[derive(Serialize)]
#[serde(transparent)]
struct Decoded {
    #[serde(skip)]
    source: String,
    model: ProtectModel,
}

#[derive(Tabled)]
struct DecodedRow {
    #[tabled(rename = "Source")]
    source: String,
    #[tabled(rename = "Model")]
    model: String,
    #[tabled(rename = "Entity")]
    entity: String,
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
}

fn to_row(d: &Decoded) -> DecodedRow {
    DecodedRow {
        source: d.source.clone(),
        model: d.model.model_type().as_wire().to_owned(),
        entity: d.model.kind().to_string(),
        id: output::or_dash(d.model.id()),
        name: output::or_dash(d.model.name()),
    }
}

/// Parse a `--as` model key into the entity type registered for it.
fn pre_resolved_kind(raw: &str) -> Result<EntityKind, CliError> {
    let model: ModelType = raw.parse().map_err(|_| CliError::Validation {
        field: "--as".into(),
        reason: format!("unknown model key '{raw}' (see: ufp models)"),
    })?;
    Ok(EntityKind::for_model(model))
}

pub fn handle(args: &DecodeArgs, ctx: &Context) -> Result<(), CliError> {
    let kind = args.as_model.as_deref().map(pre_resolved_kind).transpose()?;
    let skip = args.input.skip_invalid || ctx.skip_invalid;
    let records = input::read_inputs(&args.input.files)?;

    let dispatcher = Dispatcher::default();
    let mut decoded = Vec::with_capacity(records.len());
    for record in records {
        let result = record_from_value(record.value)
            .and_then(|raw| dispatcher.construct(raw, ctx.session.clone(), kind));
        match result {
            Ok(model) => {
                debug!(source = %record.source, kind = %model.kind(), "decoded record");
                decoded.push(Decoded {
                    source: record.source,
                    model,
                });
            }
            Err(err) => ctx.on_failure(skip, &record.source, err)?,
        }
    }

    let out = output::render_list(&ctx.output, &decoded, to_row, |d| {
        output::or_dash(d.model.id())
    });
    output::print_output(&out, ctx.quiet);
    Ok(())
}
