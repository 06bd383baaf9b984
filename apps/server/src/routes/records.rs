use actix_web::{get, web};
use service_status::TargetStatus;

use crate::context::AppContext;
use crate::error::ApiError;

macros_utils::routes! {
    route records_by_ip_route,
    route records_by_ip_and_port_route,
}

/// All records for an ip
#[get("/service_status/get_records_by_ip/{ip}")]
pub async fn records_by_ip_route(
    context: web::Data<AppContext>,
    path: web::Path<String>,
) -> Result<web::Json<Vec<TargetStatus>>, ApiError> {
    let ip = path.into_inner();
    Ok(web::Json(context.query.get_by_ip(&ip).await?))
}

/// Records for an ip on one port. The port is taken as text so that a
/// non-numeric value is a 400 rather than a routing miss.
#[actix_web::routes]
#[get("/service_status/get_records_by_ip_and_port/{ip}/{port}")]
#[get("/service_status/get_records/{ip}/{port}")]
pub async fn records_by_ip_and_port_route(
    context: web::Data<AppContext>,
    path: web::Path<(String, String)>,
) -> Result<web::Json<Vec<TargetStatus>>, ApiError> {
    let (ip, port) = path.into_inner();
    Ok(web::Json(context.query.get_by_ip_port(&ip, &port).await?))
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use service_status::TargetStatus;

    use crate::test_support::test_context;

    fn status(ip: &str, port: u16, available: bool) -> TargetStatus {
        TargetStatus { ip: ip.into(), port, available }
    }

    const ROWS: &[(&str, u16, bool)] = &[
        ("10.0.0.5", 8080, true),
        ("10.0.0.5", 9090, false),
        ("10.0.0.6", 8080, false),
    ];

    #[actix_web::test]
    async fn test_records_by_ip_returns_both_ports() {
        let (context, _pool, _dir) = test_context(ROWS).await;
        let app = test::init_service(App::new().app_data(context).configure(crate::routes::routes)).await;

        let req = test::TestRequest::get().uri("/service_status/get_records_by_ip/10.0.0.5").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: Vec<TargetStatus> = test::read_body_json(resp).await;
        assert_eq!(body, vec![status("10.0.0.5", 8080, true), status("10.0.0.5", 9090, false)]);
    }

    #[actix_web::test]
    async fn test_records_by_ip_and_port() {
        let (context, _pool, _dir) = test_context(ROWS).await;
        let app = test::init_service(App::new().app_data(context).configure(crate::routes::routes)).await;

        for uri in [
            "/service_status/get_records_by_ip_and_port/10.0.0.5/9090",
            "/service_status/get_records/10.0.0.5/9090",
        ] {
            let resp = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
            assert_eq!(resp.status(), StatusCode::OK, "{uri}");
            let body: Vec<TargetStatus> = test::read_body_json(resp).await;
            assert_eq!(body, vec![status("10.0.0.5", 9090, false)]);
        }
    }

    #[actix_web::test]
    async fn test_invalid_input_is_bad_request() {
        let (context, _pool, _dir) = test_context(ROWS).await;
        let app = test::init_service(App::new().app_data(context).configure(crate::routes::routes)).await;

        for uri in [
            "/service_status/get_records_by_ip/999.1.1.1",
            "/service_status/get_records_by_ip/not-an-ip",
            "/service_status/get_records_by_ip_and_port/not-an-ip/8080",
            "/service_status/get_records_by_ip_and_port/10.0.0.5/http",
            "/service_status/get_records_by_ip_and_port/10.0.0.5/70000",
            "/service_status/get_records_by_ip_and_port/10.0.0.5/-1",
            "/service_status/get_records_by_ip_and_port/10.0.0.5/+80",
        ] {
            let resp = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{uri}");
        }
    }

    #[actix_web::test]
    async fn test_unknown_target_is_not_found() {
        let (context, _pool, _dir) = test_context(ROWS).await;
        let app = test::init_service(App::new().app_data(context).configure(crate::routes::routes)).await;

        for uri in [
            "/service_status/get_records_by_ip/10.0.0.9",
            "/service_status/get_records_by_ip_and_port/10.0.0.5/22",
        ] {
            let resp = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
            assert_eq!(resp.status(), StatusCode::NOT_FOUND, "{uri}");
            let body: serde_json::Value = test::read_body_json(resp).await;
            assert_eq!(body["error"], "no matching records");
        }
    }

    #[actix_web::test]
    async fn test_store_outage_is_server_error() {
        let (context, pool, _dir) = test_context(ROWS).await;
        let app = test::init_service(App::new().app_data(context).configure(crate::routes::routes)).await;
        pool.close();

        let req = test::TestRequest::get().uri("/service_status/get_records_by_ip/10.0.0.5").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body, serde_json::json!({"error": "store unavailable"}));
    }
}
