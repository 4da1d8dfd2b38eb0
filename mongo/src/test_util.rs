use std::{env::var, sync::Arc};

use crate::context::Context;
use crate::utils::result::Result;

/// Runs `f` against the database named by `MONGO_TEST_DATABASE` and drops it
/// afterwards, whatever `f` returned.
pub async fn with_mongo<Fut>(f: impl FnOnce(Arc<Context>) -> Fut) -> Result<()>
where
    Fut: std::future::Future<Output = Result<()>>,
{
    let ctx = {
        let uri = var("MONGO_TEST_URI")?;
        let database = var("MONGO_TEST_DATABASE")?;
        let m = Context::build_in_test(&uri, &database).await?;
        Arc::new(m)
    };
    let result = f(Arc::clone(&ctx)).await;
    ctx.database().drop(None).await?;
    result
}
