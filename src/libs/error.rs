use std::path::PathBuf;

use thiserror::Error;

use super::template::TemplateError;

#[derive(Error, Debug)]
pub enum WidgetError {
    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error("either `name` or `model` has to be set on a date picker")]
    MissingInputSource,

    #[error("input name `{name}` yields an empty element id, set `id` explicitly")]
    EmptyElementId { name: String },

    #[error("failed to read message catalog {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid message catalog {}", path.display())]
    Catalog {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}
