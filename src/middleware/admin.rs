use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    web, Error, HttpMessage,
};
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    rc::Rc,
};

use crate::db::SharedStore;
use crate::error::AppError;
use crate::middleware::auth::validate_jwt_from_request;

/// Authenticates like `AuthMiddleware`, then requires a row in `admin_users`.
pub struct AdminMiddleware;

impl<S, B> Transform<S, ServiceRequest> for AdminMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = AdminMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AdminMiddlewareService {
            service: Rc::new(service),
        }))
    }
}

pub struct AdminMiddlewareService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for AdminMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();

        let claims = match validate_jwt_from_request(&req) {
            Ok(claims) => claims,
            Err(e) => return Box::pin(async move { Err(e.into()) }),
        };

        let Some(store) = req.app_data::<web::Data<SharedStore>>().cloned() else {
            return Box::pin(async move {
                Err(AppError::Forbidden("Admin access could not be checked".to_string()).into())
            });
        };

        Box::pin(async move {
            // validate_jwt_from_request already rejected non-uuid subjects
            let Some(user_id) = claims.user_id() else {
                return Err(AppError::Unauthorized("Invalid token subject".to_string()).into());
            };

            let is_admin = store.is_admin(user_id).await.map_err(AppError::from)?;
            if !is_admin {
                tracing::warn!("Non-admin user attempted admin access: {}", user_id);
                return Err(AppError::Forbidden("Admin access required".to_string()).into());
            }

            req.extensions_mut().insert(claims);
            service.call(req).await
        })
    }
}
