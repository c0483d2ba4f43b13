use crate::{
    api::{employee, payslip, pricing},
    error::{json_error_handler, query_error_handler},
};
use actix_cors::Cors;
use actix_web::web;

/// Any origin when `origins` is empty, otherwise only the listed ones.
pub fn build_cors(origins: &[String]) -> Cors {
    let cors = if origins.is_empty() {
        Cors::permissive()
    } else {
        origins
            .iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
            .allow_any_method()
            .allow_any_header()
    };
    cors.max_age(3600)
}

pub fn configure(cfg: &mut web::ServiceConfig, api_prefix: &str) {
    // extractor failures answer with the same {error} body as handlers
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::QueryConfig::default().error_handler(query_error_handler));

    cfg.service(
        web::scope(api_prefix)
            .service(
                web::scope("/pricing")
                    // /pricing
                    .service(web::resource("").route(web::get().to(pricing::get_pricing)))
                    // /pricing/resolve
                    .service(
                        web::resource("/resolve").route(web::get().to(pricing::resolve_price)),
                    ),
            )
            .service(
                web::scope("/employees")
                    // /employees
                    .service(
                        web::resource("")
                            .route(web::post().to(employee::create_employee))
                            .route(web::get().to(employee::list_employees)),
                    )
                    // /employees/{id}
                    .service(
                        web::resource("/{id}")
                            .route(web::put().to(employee::update_employee))
                            .route(web::get().to(employee::get_employee))
                            .route(web::delete().to(employee::delete_employee)),
                    ),
            )
            .service(
                web::scope("/payslips")
                    // /payslips
                    .service(
                        web::resource("")
                            .route(web::post().to(payslip::create_payslip))
                            .route(web::get().to(payslip::list_payslips)),
                    )
                    // /payslips/preview, registered before /{id} so it is not
                    // swallowed as an id
                    .service(
                        web::resource("/preview").route(web::post().to(payslip::preview_payslip)),
                    )
                    // /payslips/{id}
                    .service(web::resource("/{id}").route(web::get().to(payslip::get_payslip))),
            ),
    );
}
