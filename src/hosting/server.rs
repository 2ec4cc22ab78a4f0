use super::*;
use actix_cors::Cors;
use actix_web::App;
use actix_web::HttpRequest;
use actix_web::HttpResponse;
use actix_web::HttpServer;
use actix_web::Responder;
use actix_web::middleware::Logger;
use actix_web::web;

pub struct Server;

impl Server {
    pub async fn run() -> anyhow::Result<()> {
        let lobby = web::Data::new(Lobby::default());
        tokio::spawn(lobby.clone().into_inner().patrol());
        log::info!("starting hosting server");
        HttpServer::new(move || {
            App::new()
                .wrap(Logger::new("%r %s %Ts"))
                .wrap(
                    Cors::default()
                        .allow_any_origin()
                        .allow_any_method()
                        .allow_any_header(),
                )
                .app_data(lobby.clone())
                .route("/health", web::get().to(health))
                .route("/play", web::get().to(play))
        })
        .workers(4)
        .bind(std::env::var("BIND_ADDR").unwrap_or_else(|_| String::from("127.0.0.1:3001")))?
        .run()
        .await?;
        Ok(())
    }
}

async fn health(lobby: web::Data<Lobby>) -> impl Responder {
    let rooms = lobby.occupancy().await;
    HttpResponse::Ok().json(serde_json::json!({ "status": "ok", "rooms": rooms }))
}

async fn play(lobby: web::Data<Lobby>, req: HttpRequest, body: web::Payload) -> impl Responder {
    match actix_ws::handle(&req, body) {
        Ok((response, ws, stream)) => {
            let session = Session::new(lobby.connection(), lobby.clone().into_inner());
            actix_web::rt::spawn(session.run(ws, stream));
            response.map_into_left_body()
        }
        Err(e) => HttpResponse::InternalServerError()
            .body(e.to_string())
            .map_into_right_body(),
    }
}
