// SPDX-License-Identifier: MIT

//! The `-o/--output` global flag: plain text (the default, tables + status
//! lines) or JSON (one value per command, for scripting).

use clap::ValueEnum;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}
