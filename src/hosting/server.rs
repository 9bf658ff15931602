use super::*;
use crate::admission::*;
use crate::*;
use actix_cors::Cors;
use actix_web::App;
use actix_web::HttpServer;
use actix_web::middleware::Logger;
use actix_web::web;
use std::sync::Arc;

pub struct Server;

impl Server {
    pub async fn run(config: Config) -> anyhow::Result<()> {
        let producer = web::Data::from(Arc::new(config.producer()?) as Arc<dyn Producer>);
        let buckets = Arc::new(Buckets::new(config.admission()?));
        let sweeper = Sweeper::spawn(buckets.clone(), BUCKET_SWEEP_INTERVAL);
        log::info!("[hosting] starting server on {}", config.bind);
        let result = HttpServer::new(move || {
            App::new()
                .wrap(Logger::new("%r %s %Ts"))
                .wrap(
                    Cors::default()
                        .allow_any_origin()
                        .allow_any_method()
                        .allow_any_header(),
                )
                .app_data(producer.clone())
                .configure(Self::routes(buckets.clone()))
        })
        .workers(config.workers)
        .bind(&config.bind)?
        .run()
        .await;
        sweeper.abort();
        Ok(result?)
    }
    /// The `/api` scope, gated by admission control on `buckets`.
    /// Expects a `web::Data<dyn Producer>` in app data.
    pub fn routes(buckets: Arc<Buckets>) -> impl FnOnce(&mut web::ServiceConfig) {
        move |cfg| {
            cfg.service(
                web::scope(API_PREFIX)
                    .wrap(Admission::new(buckets))
                    .route("/health", web::get().to(health))
                    .service(
                        web::resource("/stream")
                            .route(web::post().to(stream))
                            .route(web::get().to(live)),
                    ),
            );
        }
    }
}
