use super::*;
use crate::protocol::Message;
use actix_web::HttpResponse;
use actix_web::Responder;
use actix_web::web;
use bytes::Bytes;
use futures::StreamExt;
use serde_json::Value;
use std::collections::HashMap;
use std::convert::Infallible;
use std::sync::Arc;

pub async fn health() -> impl Responder {
    HttpResponse::Ok().body("ok")
}

/// Starts one round on the producer and streams its messages as SSE frames.
/// The response ends when the producer finishes. A producer failure is
/// reported as a final `error` frame.
pub async fn stream(producer: web::Data<dyn Producer>, body: web::Json<Value>) -> impl Responder {
    respond(producer.into_inner(), body.into_inner())
}

/// `GET` form of [`stream`] for EventSource-style clients. Query parameters
/// become the round request.
pub async fn live(
    producer: web::Data<dyn Producer>,
    query: web::Query<HashMap<String, String>>,
) -> impl Responder {
    let request = query
        .into_inner()
        .into_iter()
        .map(|(k, v)| (k, Value::String(v)))
        .collect::<serde_json::Map<_, _>>();
    respond(producer.into_inner(), Value::Object(request))
}

fn respond(producer: Arc<dyn Producer>, request: Value) -> HttpResponse {
    let id = uuid::Uuid::now_v7();
    let (tx, rx) = tokio::sync::mpsc::unbounded_channel::<Message>();
    log::info!("[hosting] round {} started", id);
    actix_web::rt::spawn(async move {
        match producer.play(request, tx.clone()).await {
            Ok(()) => log::debug!("[hosting] round {} finished", id),
            Err(e) => {
                log::warn!("[hosting] round {} failed: {:#}", id, e);
                let _ = tx.send(Message::error(format!("{:#}", e)));
            }
        }
    });
    let frames = futures::stream::unfold(rx, |mut rx| async move {
        rx.recv().await.map(|message| (message, rx))
    })
    .filter_map(move |message| async move {
        match message.frame() {
            Ok(frame) => Some(Ok::<_, Infallible>(Bytes::from(frame))),
            Err(e) => {
                log::warn!("[hosting] round {} dropped {}: {}", id, message.kind(), e);
                None
            }
        }
    });
    HttpResponse::Ok()
        .content_type("text/event-stream")
        .insert_header(("cache-control", "no-cache"))
        .streaming(frames)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::*;
    use actix_web::App;
    use actix_web::http::StatusCode;
    use actix_web::test::TestRequest;
    use actix_web::test::call_service;
    use actix_web::test::init_service;
    use actix_web::test::read_body;
    use tokio::sync::mpsc::UnboundedSender;

    struct Broken;

    #[async_trait::async_trait]
    impl Producer for Broken {
        async fn play(&self, _: Value, tx: UnboundedSender<Message>) -> anyhow::Result<()> {
            tx.send(Message::token("north", "thinking"))?;
            anyhow::bail!("model timed out")
        }
    }

    async fn body(producer: Arc<dyn Producer>) -> String {
        let app = init_service(
            App::new()
                .app_data(web::Data::from(producer))
                .route("/stream", web::post().to(stream)),
        )
        .await;
        let request = TestRequest::post()
            .uri("/stream")
            .set_json(serde_json::json!({ "seed": 7 }))
            .to_request();
        let response = call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get("content-type").unwrap(),
            "text/event-stream"
        );
        String::from_utf8(read_body(response).await.to_vec()).unwrap()
    }

    #[actix_web::test]
    async fn replays_every_message_as_a_frame() {
        let text = body(Arc::new(Replay::demo(std::time::Duration::ZERO))).await;
        let frames = text.split_terminator("\n\n").collect::<Vec<_>>();
        assert_eq!(frames.len(), 10);
        assert!(frames.iter().all(|f| f.starts_with(FRAME_PREFIX)));
        assert!(frames.last().unwrap().contains("\"type\":\"round_complete\""));
    }

    #[actix_web::test]
    async fn producer_failure_becomes_final_error_frame() {
        let text = body(Arc::new(Broken)).await;
        let frames = text.split_terminator("\n\n").collect::<Vec<_>>();
        assert_eq!(frames.len(), 2);
        let last = frames[1].strip_prefix(FRAME_PREFIX).unwrap();
        assert_eq!(Message::decode(last).unwrap(), Message::error("model timed out"));
    }

    #[actix_web::test]
    async fn live_takes_query_as_request() {
        struct Echo;
        #[async_trait::async_trait]
        impl Producer for Echo {
            async fn play(&self, request: Value, tx: UnboundedSender<Message>) -> anyhow::Result<()> {
                tx.send(Message::error(request["seat"].as_str().unwrap_or("none")))?;
                Ok(())
            }
        }
        let app = init_service(
            App::new()
                .app_data(web::Data::from(Arc::new(Echo) as Arc<dyn Producer>))
                .route("/stream", web::get().to(live)),
        )
        .await;
        let response = call_service(&app, TestRequest::get().uri("/stream?seat=west").to_request()).await;
        assert_eq!(read_body(response).await, "data: {\"type\":\"error\",\"message\":\"west\"}\n\n");
    }

    #[actix_web::test]
    async fn health_says_ok() {
        let app = init_service(App::new().route("/health", web::get().to(health))).await;
        let response = call_service(&app, TestRequest::get().uri("/health").to_request()).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(read_body(response).await, "ok");
    }
}
