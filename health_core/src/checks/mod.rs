//! Built-in checks and their construction from configuration

pub mod http;
pub mod mongo;
pub mod sql;

pub use http::{HttpCheck, HttpCheckConfig};
pub use mongo::MongoCheck;
pub use sql::SqlCheck;

use crate::config::{CheckKind, CheckSpec};
use crate::error::Result;
use crate::health::CheckConfig;

/// Builds a registrable check from a declarative entry.
pub fn from_spec(spec: &CheckSpec) -> Result<CheckConfig> {
    let timeout = spec.timeout();

    let config = match spec.kind {
        CheckKind::Http => {
            let check = HttpCheck::new(
                HttpCheckConfig::new(spec.target.clone()).with_request_timeout(timeout),
            )?;
            CheckConfig::new(spec.name.clone(), check)
        }
        CheckKind::Sql => CheckConfig::new(spec.name.clone(), SqlCheck::new(spec.target.clone())?),
        CheckKind::Mongo => {
            CheckConfig::new(spec.name.clone(), MongoCheck::new(spec.target.clone())?)
        }
    };

    Ok(config.with_timeout(timeout).skip_on_err(spec.skip_on_err))
}
