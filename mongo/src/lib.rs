pub mod context;
pub mod test_util;
pub mod withid;
pub use mongodb;
pub use mongodm;
use photoroll_utils as utils;
