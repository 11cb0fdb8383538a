use actix_web::web;

pub mod accounts;
pub mod profiles;

use crate::services::AuthMiddlewareFactory;

pub fn configure_routes(cfg: &mut web::ServiceConfig, auth: AuthMiddlewareFactory) {
    cfg.service(
        web::scope("/users")
            .route("/signup", web::post().to(accounts::signup))
            .route("/login", web::post().to(accounts::login)),
    );

    cfg.service(
        web::resource("/insert")
            .wrap(auth.clone())
            .route(web::post().to(profiles::insert)),
    );
    cfg.route("/allData", web::get().to(profiles::all_data));
    cfg.route("/details/{user_id}", web::get().to(profiles::details));
    cfg.route("/image/{user_id}", web::get().to(profiles::image));
    cfg.service(
        web::resource("/update/{user_id}")
            .wrap(auth)
            .route(web::put().to(profiles::update)),
    );
    cfg.route("/delete/{user_id}", web::delete().to(profiles::delete));
    cfg.route("/userLogin", web::post().to(profiles::user_login));
}
