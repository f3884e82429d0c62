use strum::IntoEnumIterator;
use table::Table;
mod table;

use crate::{
    config::Config,
    factory::CONSTRUCTIBLE_KINDS,
    schema::ModelKind,
    ListArgs, ListObject, ListingFormat,
};

#[derive(serde::Serialize)]
struct ModelRow {
    name: String,
    kind: ModelKind,
    provider: String,
    context: Option<u64>,
}

impl From<Vec<ModelRow>> for Table {
    fn from(value: Vec<ModelRow>) -> Self {
        let mut tab = Table::new();

        tab.set_header(vec!["NAME", "KIND", "PROVIDER", "CONTEXT"]);

        for model in value {
            tab.add_row(vec![
                model.name,
                model.kind.to_string(),
                model.provider,
                match model.context {
                    Some(context) => context.to_string(),
                    None => "-".to_string(),
                },
            ]);
        }

        tab
    }
}

#[derive(serde::Serialize)]
struct KindRow {
    kind: ModelKind,
    constructible: bool,
}

impl From<Vec<KindRow>> for Table {
    fn from(value: Vec<KindRow>) -> Self {
        let mut tab = Table::new();

        tab.set_header(vec!["KIND", "CONSTRUCTIBLE"]);

        for row in value {
            tab.add_row(vec![
                row.kind.to_string(),
                if row.constructible { "yes" } else { "no" }.to_string(),
            ]);
        }

        tab
    }
}

fn catalog_models(config: &Config, kind: Option<ModelKind>) -> Vec<ModelRow> {
    config
        .catalog
        .models()
        .into_iter()
        .filter(|model| kind.map_or(true, |kind| model.kind() == kind))
        .map(|model| ModelRow {
            name: model.name().to_string(),
            kind: model.kind(),
            provider: model.provider().to_string(),
            context: model.context_size(),
        })
        .collect()
}

fn model_kinds() -> Vec<KindRow> {
    ModelKind::iter()
        .map(|kind| KindRow {
            kind,
            constructible: CONSTRUCTIBLE_KINDS.contains(&kind),
        })
        .collect()
}

fn format_output<O: Into<Table> + serde::Serialize>(object: O, format: ListingFormat) {
    match format {
        ListingFormat::Json => {
            let output = serde_json::to_string_pretty(&object).expect("failed to serialize object");

            println!("{}", output);
        }
        ListingFormat::Table => {
            let tab: Table = object.into();

            print!("{}", tab);
        }
        ListingFormat::HeaderlessTable => {
            let mut tab: Table = object.into();

            tab.show_header(false);

            print!("{}", tab);
        }
    }
}

pub(crate) fn list_cmd(config: &Config, args: &ListArgs) {
    let format = args.format;

    match &args.object {
        ListObject::Models(args) => {
            let models = catalog_models(config, args.kind);
            format_output(models, format);
        }
        ListObject::Kinds => {
            let kinds = model_kinds();
            format_output(kinds, format);
        }
    }
}
