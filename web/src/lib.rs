pub mod app_data;
pub mod app_error;
pub mod controller;
pub mod server;
pub mod services;
pub mod stores;

#[cfg(test)]
mod test_util;

use photoroll_mongo as mongo;
use photoroll_utils as utils;
