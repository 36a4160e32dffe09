// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]
//! Shared primitives for the GotongChain client crates.
//!
//! Nothing in here talks to the network. Wall-clock access goes through
//! [`ClockPort`] so the formatter can be driven from a frozen clock in tests.

pub mod domain;
pub mod errors;
pub mod ports;

pub use domain::config::{parse_env_file, resolve_gotong_config_path, ConfigLayers};
pub use domain::messages::{Locale, Message, ParseLocaleError};
pub use domain::time::{remaining_time, remaining_time_with, RemainingTime};
pub use domain::units::{ether_ratio, to_ether, to_wei, UnitError, ETHER_DECIMALS, WEI_PER_ETHER};
pub use errors::{ConfigPathScope, ErrorContext, ExitCode, MachineError, ResultExt};
pub use ports::boundary::{ClockPort, FixedClock, SystemClock};

pub const CRATE_NAME: &str = "gotong-core";

pub const ENV_GOTONG_LOG_LEVEL: &str = "GOTONG_LOG_LEVEL";
pub const ENV_GOTONG_CONFIG: &str = "GOTONG_CONFIG";
pub const ENV_GOTONG_LOCALE: &str = "GOTONG_LOCALE";
