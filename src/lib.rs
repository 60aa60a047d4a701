// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod cli;
pub mod commands;
pub mod errors;
pub mod fetcher;
pub mod formatters;
pub mod models;
pub mod plaid;
pub mod settings;
pub mod utils;
