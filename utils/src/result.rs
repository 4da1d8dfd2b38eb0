pub use anyhow;
pub type Result<T> = anyhow::Result<T>;
pub type Error = anyhow::Error;
pub use std::result::Result as StdResult;

#[macro_export]
macro_rules! simple_error {
    ($fmt:expr $(, $arg:tt)*) => {
        $crate::result::anyhow::anyhow!($fmt $(, $arg)*)
    };
}
