pub use crate::api::ApiClient;
pub use crate::config::{Config, Mergeable};
pub use crate::filter::{FilterValue, Filterable};
pub use crate::services::Services;
pub use crate::session::{Action, Principal, Role, Section, Session};
pub use crate::views::Record;

pub use human_errors::ResultExt;
pub use serde::{Deserialize, Serialize, de::DeserializeOwned};
pub use tracing_batteries::prelude::*;
