use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use log::info;

use crate::{
    app_data::AppData,
    controller,
    mongo::context::Context as MongoContext,
    utils::{config::Config, result::Result},
};

pub async fn run() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env()?;
    let context = MongoContext::new(&config).await?;
    let data = web::Data::new(AppData::new(&context, &config));
    data.images.ensure().await?;
    info!(
        target: "photoroll",
        "serving images from {} on {}",
        data.images.root().display(),
        config.bind_name()
    );

    HttpServer::new(move || {
        App::new()
            .app_data(data.clone())
            .wrap(middleware::Logger::default())
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allowed_methods(vec!["GET", "POST"])
                    .allow_any_header()
                    .max_age(3600),
            )
            .configure(controller::route)
    })
    .bind(config.bind_name())?
    .run()
    .await?;
    Ok(())
}
