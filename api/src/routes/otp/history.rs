//! Handler for `GET /api/v1/otp/history`

use actix_web::{web, HttpResponse};

use od_core::repositories::{AttemptRepository, BackendConfigRepository, ClientRepository};
use od_core::services::registry::ConnectorProvisioner;

use crate::dto::otp::AttemptDto;
use crate::handlers::error::to_response;
use crate::routes::AppState;

/// Return every recorded attempt, ordered by creation
///
/// All statuses are included and nothing is filtered. The listing is not
/// paginated; for an audit log of this size that is a known limitation
/// rather than a feature.
pub async fn history<A, B, C, P>(state: web::Data<AppState<A, B, C, P>>) -> HttpResponse
where
    A: AttemptRepository + 'static,
    B: BackendConfigRepository + 'static,
    C: ClientRepository + 'static,
    P: ConnectorProvisioner + 'static,
{
    match state.dispatch_service.history().await {
        Ok(attempts) => {
            let rows: Vec<AttemptDto> = attempts.into_iter().map(AttemptDto::from).collect();
            HttpResponse::Ok().json(rows)
        }
        Err(error) => to_response(&error),
    }
}
