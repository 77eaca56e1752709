use crate::{
    api::attendance,
    auth::{handlers, middleware::auth_middleware},
    config::Config,
};
use actix_web::{middleware::from_fn, web};

pub fn configure(cfg: &mut web::ServiceConfig, config: &Config) {
    // Public routes
    cfg.service(
        web::scope("/auth").service(web::resource("/login").route(web::post().to(handlers::login))),
    );

    // Protected routes
    cfg.service(
        web::scope(&config.api_prefix)
            .wrap(from_fn(auth_middleware))
            .service(
                web::scope("/attendance")
                    // /attendance
                    .service(
                        web::resource("")
                            .route(web::get().to(attendance::list_attendance))
                            .route(web::post().to(attendance::submit_attendance)),
                    )
                    // /attendance/search?empid=
                    .service(
                        web::resource("/search").route(web::get().to(attendance::search_attendance)),
                    )
                    // /attendance/summary?date=
                    .service(
                        web::resource("/summary")
                            .route(web::get().to(attendance::attendance_summary)),
                    )
                    // /attendance/export
                    .service(
                        web::resource("/export").route(web::post().to(attendance::export_attendance)),
                    ),
            ),
    );
}

// LOGIN
//  └─ access_token (session, SESSION_TTL)

// API REQUEST
//  └─ Authorization: Bearer access_token

// SESSION EXPIRED
//  └─ POST /auth/login again
