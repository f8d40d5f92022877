// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod budget;
pub mod cli;
pub mod commands;
pub mod config;
pub mod db;
pub mod error;
pub mod interchange;
pub mod ledger;
pub mod models;
pub mod parser;
pub mod recurring;
pub mod registry;
pub mod session;
pub mod store;
pub mod utils;

pub use error::{Error, Result};
