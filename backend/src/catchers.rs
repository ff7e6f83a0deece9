use rocket::{Request, catch, serde::json::Json};
use shared::ErrorResponse;

#[catch(400)]
pub fn bad_request(_req: &Request) -> Json<ErrorResponse> {
    Json(ErrorResponse::new("Bad Request"))
}

#[catch(404)]
pub fn not_found(_req: &Request) -> Json<ErrorResponse> {
    Json(ErrorResponse::new("Not Found"))
}

#[catch(422)]
pub fn unprocessable_entity(req: &Request) -> Json<ErrorResponse> {
    let detail = match req.method() {
        rocket::http::Method::Get => "Invalid query parameters",
        _ => "Invalid request body",
    };
    Json(ErrorResponse::new(detail))
}

#[catch(500)]
pub fn internal_error(_req: &Request) -> Json<ErrorResponse> {
    Json(ErrorResponse::new("Internal Server Error"))
}
