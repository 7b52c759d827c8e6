use actix_web::web;

use crate::handlers::admin;
use crate::middleware::admin::AdminMiddleware;

pub fn init_admin_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/admin")
            .wrap(AdminMiddleware)
            // Doctor verification
            .service(
                web::resource("/doctors")
                    .route(web::get().to(admin::list_doctors))
            )
            .service(
                web::resource("/doctors/pending")
                    .route(web::get().to(admin::list_pending_doctors))
            )
            .service(
                web::resource("/doctors/{id}/verify")
                    .route(web::post().to(admin::verify_doctor))
            )
            .service(
                web::resource("/doctors/{id}/appointments")
                    .route(web::get().to(admin::list_doctor_appointments))
            )
            .service(
                web::resource("/doctors/{id}/notifications")
                    .route(web::get().to(admin::list_doctor_notifications))
            )
            // Appointment review
            .service(
                web::resource("/appointments")
                    .route(web::get().to(admin::list_appointments))
            )
            .service(
                web::resource("/appointments/{id}/status")
                    .route(web::patch().to(admin::update_appointment_status))
            )
            // Community initiatives
            .service(
                web::resource("/initiatives")
                    .route(web::get().to(admin::list_initiatives))
                    .route(web::post().to(admin::create_initiative))
            )
            .service(
                web::resource("/initiatives/{id}")
                    .route(web::put().to(admin::update_initiative))
                    .route(web::delete().to(admin::delete_initiative))
            )
            // Admin membership
            .service(
                web::resource("/users")
                    .route(web::post().to(admin::grant_admin))
            )
            .service(
                web::resource("/users/{user_id}")
                    .route(web::delete().to(admin::revoke_admin))
            )
    );
}
