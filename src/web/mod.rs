use actix_web::{App, HttpServer, web};
use human_errors::ResultExt;

use crate::api::{Banner, BannerForm, CategoryForm, Comment, LongVideo, LongVideoForm, Notification, NotificationForm, User, VideoCategory};
use crate::prelude::*;

mod forms;
mod resources;
mod session;
mod ui;
mod users;

pub async fn run_web_server<S: Services + Clone + Send + Sync + 'static>(services: S) -> Result<(), human_errors::Error> {
    let config = services.config();
    if let Some((mut addr, port)) = config.web.address().split_once(':') {
        if addr.is_empty() {
            addr = "0.0.0.0";
        }

        let port = port.parse::<u16>().wrap_err_as_user(
            "The port number in the web.address field is not a valid number.",
            &[
                "Ensure that the port is a valid integer between 0 and 65535.",
            ],
        )?;

        info!("Starting the admin dashboard on {addr}:{port}.");

        let server = HttpServer::new(move || {
            App::new()
                .app_data(web::Data::new(services.clone()))
                .configure(routes::<S>)
        })
        .bind((addr, port))
        .wrap_err_as_user(
            format!("We could not listen on {addr}:{port}."),
            &[
                "Make sure that no other process is already using this port.",
                "Try a different address in the web.address field of your configuration.",
            ],
        )?;

        server.run().await.wrap_err_as_system(
            "The web server stopped unexpectedly.",
            &["Please report this issue to the development team on GitHub."],
        )?;
        Ok(())
    } else {
        Err(human_errors::user(
            "You have not provided a valid address for the web server to bind to.",
            &[
                "Ensure that the web.address field in your configuration is set to a valid address and port (e.g. `127.0.0.1:8080`).",
            ],
        ))
    }
}

pub fn routes<S: Services + 'static>(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(ui::index))
        .service(session::configure())
        .service(
            web::scope("/users")
                .route("", web::get().to(resources::list::<S, User>))
                .route("/new/{role}", web::get().to(users::new_staff))
                .route("/new/{role}", web::post().to(users::create_staff::<S>))
                .route("/{id}", web::get().to(users::detail::<S>))
                .route("/{id}/delete", web::get().to(resources::confirm_delete::<User>))
                .route("/{id}/delete", web::post().to(resources::delete::<S, User>)),
        )
        .service(
            web::scope("/comments")
                .route("", web::get().to(resources::list::<S, Comment>))
                .route("/{id}/delete", web::get().to(resources::confirm_delete::<Comment>))
                .route("/{id}/delete", web::post().to(resources::delete::<S, Comment>)),
        )
        .service(
            web::scope("/banners")
                .route("", web::get().to(resources::list::<S, Banner>))
                .route("/new", web::get().to(forms::new::<BannerForm>))
                .route("/new", web::post().to(forms::create::<S, BannerForm>))
                .route("/{id}/delete", web::get().to(resources::confirm_delete::<Banner>))
                .route("/{id}/delete", web::post().to(resources::delete::<S, Banner>)),
        )
        .service(
            web::scope("/categories")
                .route("", web::get().to(resources::list::<S, VideoCategory>))
                .route("/new", web::get().to(forms::new::<CategoryForm>))
                .route("/new", web::post().to(forms::create::<S, CategoryForm>))
                .route("/{id}/edit", web::get().to(forms::edit_category::<S>))
                .route("/{id}/edit", web::post().to(forms::update_category::<S>))
                .route("/{id}/delete", web::get().to(resources::confirm_delete::<VideoCategory>))
                .route("/{id}/delete", web::post().to(resources::delete::<S, VideoCategory>)),
        )
        .service(
            web::scope("/videos")
                .route("", web::get().to(resources::list::<S, LongVideo>))
                .route("/new", web::get().to(forms::new::<LongVideoForm>))
                .route("/new", web::post().to(forms::create::<S, LongVideoForm>))
                .route("/{id}/delete", web::get().to(resources::confirm_delete::<LongVideo>))
                .route("/{id}/delete", web::post().to(resources::delete::<S, LongVideo>)),
        )
        .service(
            web::scope("/notifications")
                .route("", web::get().to(resources::list::<S, Notification>))
                .route("/new", web::get().to(forms::new::<NotificationForm>))
                .route("/new", web::post().to(forms::create::<S, NotificationForm>)),
        )
        .default_service(web::to(ui::not_found));
}

/// Redirects after a successful mutation, carrying the outcome in the query string.
pub(crate) fn redirect_with_notice(path: &str, notice: &str) -> actix_web::HttpResponse {
    actix_web::HttpResponse::SeeOther()
        .insert_header((
            actix_web::http::header::LOCATION,
            format!("{path}?notice={}", urlencoding::encode(notice)),
        ))
        .finish()
}
