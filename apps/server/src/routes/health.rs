use actix_web::{HttpResponse, Responder, get};

macros_utils::routes! {
    route home_route,
    route health_route,
}

const GREETING: &str = "Hello!\n\
Available methods:\n\
/service_status/get_records_by_ip/{ip}\n\
/service_status/get_records_by_ip_and_port/{ip}/{port}\n";

/// Greeting listing the query routes
#[get("/")]
pub async fn home_route() -> impl Responder {
    HttpResponse::Ok().content_type("text/plain; charset=utf-8").body(GREETING)
}

/// Health check route
/// This route returns no content, the response status is enough.
#[get("/health")]
pub async fn health_route() -> impl Responder {
    HttpResponse::Ok()
}
