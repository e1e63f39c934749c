//! Intent resolution: user text in, structured intent and entities out.

mod resolver;
mod types;

pub use resolver::{flatten_parameters, DetectIntentQuery, IntentResolver, NluClient};
pub(crate) use types::{is_tagged_value, struct_fields};
pub use types::{Entity, IntentResult, ParameterValue, QueryResult};
