use mongodm::{
    mongo::{options::ClientOptions, Client, Database},
    Model, Repository, ToRepository,
};

use crate::utils::{config::Config, result::Result};

pub trait MongodmContext
where
    Self: Clone,
{
    fn repo<M: Model>(&self) -> Repository<M>;
}

/// Long-lived handle on one database. Cloning shares the underlying
/// connection pool.
#[derive(Clone, Debug)]
pub struct Context {
    client: Client,
    database_name: String,
}

impl Context {
    pub async fn new(config: &Config) -> Result<Self> {
        Self::connect(&config.db_uri, &config.db_database).await
    }

    pub async fn build_in_test(uri: &str, database_name: &str) -> Result<Self> {
        Self::connect(uri, database_name).await
    }

    async fn connect(uri: &str, database_name: &str) -> Result<Self> {
        let mut option = ClientOptions::parse(uri).await?;
        option.app_name.get_or_insert_with(|| String::from("photoroll"));
        let client = Client::with_options(option)?;
        Ok(Context {
            client,
            database_name: String::from(database_name),
        })
    }

    #[inline]
    pub fn database(&self) -> Database {
        self.client.database(&self.database_name)
    }
}

impl MongodmContext for Context {
    #[inline]
    fn repo<M>(&self) -> Repository<M>
    where
        M: Model,
    {
        self.database().repository::<M>()
    }
}
