pub use std::io::Write;

pub use anyhow::{anyhow, bail, Error, Result};
pub use log::{debug, error, info, trace, warn};
pub use tokio::sync::broadcast;

pub use crate::{catalog, config, coordinator, dashboard, decoder, domoticz, labels, xtend};

pub use crate::catalog::{Catalog, DeviceClass, FieldDefinition};
pub use crate::channels::Channels;
pub use crate::config::{Config, ConfigWrapper};
pub use crate::decoder::{Decoder, RawSample, Reading};
pub use crate::options::Options;

pub use crate::{file_error, file_error_with_source};
