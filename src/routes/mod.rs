use actix_web::web;

pub mod admin;
pub mod backend_health;
pub mod community;
pub mod diet;
pub mod health;
pub mod medications;
pub mod profile;
pub mod tools;
pub mod yoga;

use crate::middleware::auth::AuthMiddleware;

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(backend_health::backend_health);

    // Calculators need no account
    cfg.service(
        web::scope("/tools")
            .service(tools::bmi)
            .service(tools::calories)
            .service(tools::water_intake)
    );
    cfg.service(
        web::scope("/health")
            .wrap(AuthMiddleware)
            .service(health::create_record)
            .service(health::list_records)
            .service(health::update_record)
            .service(health::delete_record)
            .service(health::dashboard_series)
            .service(health::dashboard)
    );
    cfg.service(
        web::scope("/diet")
            .wrap(AuthMiddleware)
            .service(diet::goals)
            .service(diet::template)
            .service(diet::calorie_target)
            .service(diet::save_plan)
            .service(diet::list_plans)
            .service(diet::delete_plan)
    );
    cfg.service(
        web::scope("/medications")
            .wrap(AuthMiddleware)
            .service(medications::expiry)
            .service(medications::list)
            .service(medications::add)
            .service(medications::update)
            .service(medications::remove)
    );
    cfg.service(
        web::scope("/yoga")
            .wrap(AuthMiddleware)
            .service(yoga::stats)
            .service(yoga::list_sessions)
            .service(yoga::log_session)
            .service(yoga::update_session)
            .service(yoga::delete_session)
    );
    cfg.service(
        web::scope("/profile")
            .wrap(AuthMiddleware)
            .service(profile::admin_status)
            .service(profile::get_profile)
            .service(profile::update_profile)
    );
    cfg.service(
        web::scope("/community")
            .wrap(AuthMiddleware)
            .service(community::list_doctors)
            .service(community::register_doctor)
            .service(community::book_appointment)
            .service(community::my_appointments)
            .service(community::initiatives)
    );

    admin::init_admin_routes(cfg);
}
