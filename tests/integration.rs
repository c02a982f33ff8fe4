use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use carga_platform::api::rest::router;
use carga_platform::state::AppState;
use serde_json::{Value, json};
use tower::ServiceExt;

fn setup() -> axum::Router {
    router(Arc::new(AppState::seeded(1024, 50)))
}

fn setup_empty() -> axum::Router {
    router(Arc::new(AppState::new(1024, 50)))
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn post_empty(uri: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_string(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn ids(list: &Value) -> Vec<String> {
    list.as_array()
        .unwrap()
        .iter()
        .map(|item| item["id"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn health_returns_ok() {
    let app = setup();
    let response = app.oneshot(get_request("/health")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["cargas"], 10);
    assert_eq!(body["envios"], 7);
    assert_eq!(body["transportistas"], 8);
}

#[tokio::test]
async fn health_on_empty_state() {
    let app = setup_empty();
    let response = app.oneshot(get_request("/health")).await.unwrap();

    let body = body_json(response).await;
    assert_eq!(body["cargas"], 0);
    assert_eq!(body["envios"], 0);
}

#[tokio::test]
async fn metrics_returns_prometheus_format() {
    let app = setup();
    let response = app.oneshot(get_request("/metrics")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let content_type = response
        .headers()
        .get("content-type")
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(content_type.starts_with("text/plain"));

    let body = body_string(response).await;
    assert!(body.contains("loads_available 10"));
    assert!(body.contains("shipments_in_progress 5"));
}

#[tokio::test]
async fn api_root_reports_version() {
    let app = setup();
    let response = app.oneshot(get_request("/api/")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Carga Platform API v2.0");
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn stats_match_demo_baseline() {
    let app = setup();
    let response = app.oneshot(get_request("/api/stats")).await.unwrap();

    let body = body_json(response).await;
    assert_eq!(body["cargas_disponibles"], 10);
    assert_eq!(body["envios_en_curso"], 5);
    assert_eq!(body["completados_mes"], 2);
    assert_eq!(body["transportistas_activos"], 7);
}

#[tokio::test]
async fn list_loads_paginates_in_listing_order() {
    let app = setup();
    let response = app
        .oneshot(get_request("/api/cargas?page=2&page_size=3"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["total"], 10);
    assert_eq!(body["page"], 2);
    assert_eq!(body["page_size"], 3);
    assert_eq!(ids(&body["cargas"]), vec!["c4", "c5", "c6"]);
}

#[tokio::test]
async fn list_loads_filters_by_tipo() {
    let app = setup();
    let response = app
        .oneshot(get_request("/api/cargas?tipo=frigorifico"))
        .await
        .unwrap();

    let body = body_json(response).await;
    assert_eq!(body["total"], 2);
    assert_eq!(ids(&body["cargas"]), vec!["c4", "c9"]);
}

#[tokio::test]
async fn list_loads_todas_means_all() {
    let app = setup();
    let response = app
        .oneshot(get_request("/api/cargas?tipo=todas"))
        .await
        .unwrap();

    let body = body_json(response).await;
    assert_eq!(body["total"], 10);
}

#[tokio::test]
async fn list_loads_page_past_usize_range_is_empty() {
    let app = setup();
    let response = app
        .oneshot(get_request("/api/cargas?page=18446744073709551615&page_size=2"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["total"], 10);
    assert_eq!(body["cargas"], json!([]));
}

#[tokio::test]
async fn list_loads_page_past_the_end_is_empty() {
    let app = setup();
    let response = app
        .oneshot(get_request("/api/cargas?page=6&page_size=2"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["cargas"], json!([]));
}

#[tokio::test]
async fn list_loads_rejects_bad_paging() {
    let app = setup();

    let response = app
        .clone()
        .oneshot(get_request("/api/cargas?page=0"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("page"));

    let response = app
        .clone()
        .oneshot(get_request("/api/cargas?page_size=101"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .oneshot(get_request("/api/cargas?tipo=mudanza"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn search_filters_by_city_and_sorts_by_price() {
    let app = setup();
    let response = app
        .oneshot(get_request("/api/cargas/search?q=MADRID"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["total"], 4);
    assert_eq!(ids(&body["cargas"]), vec!["c1", "c8", "c3", "c7"]);
}

#[tokio::test]
async fn search_combines_predicates() {
    let app = setup();
    let response = app
        .oneshot(get_request(
            "/api/cargas/search?tipo=completa&peso_min=18&distancia_max=700&sort=precioKm",
        ))
        .await
        .unwrap();

    let body = body_json(response).await;
    // c1 (18t, 621km) and c8 (22t, 603km); c5 is too far, c10 too light
    assert_eq!(ids(&body["cargas"]), vec!["c1", "c8"]);
}

#[tokio::test]
async fn search_limits_visible_page() {
    let app = setup();
    let response = app
        .oneshot(get_request("/api/cargas/search?visible=3&sort=distancia"))
        .await
        .unwrap();

    let body = body_json(response).await;
    assert_eq!(body["total"], 10);
    assert_eq!(body["visible"], 3);
    assert_eq!(ids(&body["cargas"]), vec!["c4", "c7", "c3"]);
}

#[tokio::test]
async fn search_with_no_matches_is_empty_not_error() {
    let app = setup();
    let response = app
        .oneshot(get_request("/api/cargas/search?q=lisboa"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["total"], 0);
    assert_eq!(body["cargas"], json!([]));
}

#[tokio::test]
async fn search_rejects_unknown_sort() {
    let app = setup();
    let response = app
        .oneshot(get_request("/api/cargas/search?sort=rating"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn publish_load_then_list() {
    let app = setup_empty();

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/cargas",
            json!({
                "id": "n1",
                "origen": "Toledo",
                "destino": "Cuenca",
                "origen_coords": [-4.0273, 39.8628],
                "destino_coords": [-2.1374, 40.0704],
                "peso": 9.5,
                "distancia": 185.0,
                "precio": 410.0,
                "tipo": "parcial"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["id"], "n1");
    assert_eq!(body["descripcion"], "");

    let response = app.oneshot(get_request("/api/cargas")).await.unwrap();
    let body = body_json(response).await;
    assert_eq!(ids(&body["cargas"]), vec!["n1"]);
}

#[tokio::test]
async fn publish_generates_id_when_absent() {
    let app = setup_empty();
    let response = app
        .oneshot(json_request(
            "POST",
            "/api/cargas",
            json!({
                "origen": "Toledo",
                "destino": "Cuenca",
                "peso": 9.5,
                "distancia": 185.0,
                "precio": 410.0,
                "tipo": "urgente"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["id"].as_str().unwrap().len(), 36);
}

#[tokio::test]
async fn publish_rejects_zero_distance() {
    let app = setup_empty();
    let response = app
        .oneshot(json_request(
            "POST",
            "/api/cargas",
            json!({
                "id": "z1",
                "origen": "Madrid",
                "destino": "Madrid",
                "peso": 2.0,
                "distancia": 0.0,
                "precio": 100.0,
                "tipo": "completa"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("z1"));
}

#[tokio::test]
async fn publish_rejects_duplicate_id() {
    let app = setup();
    let response = app
        .oneshot(json_request(
            "POST",
            "/api/cargas",
            json!({
                "id": "c1",
                "origen": "Madrid",
                "destino": "Barcelona",
                "peso": 18.0,
                "distancia": 621.0,
                "precio": 1250.0,
                "tipo": "completa"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn accept_load_moves_it_to_shipments() {
    let app = setup();

    let response = app
        .clone()
        .oneshot(post_empty("/api/cargas/accept/c2"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["message"], "Carga aceptada");
    assert_eq!(body["envio"]["origen"], "Valencia");
    assert_eq!(body["envio"]["destino"], "Sevilla");
    assert_eq!(body["envio"]["peso"], 12.0);
    assert_eq!(body["envio"]["precio"], 980.0);
    assert_eq!(body["envio"]["estado"], "recogida_pendiente");
    assert_eq!(body["envio"]["progreso"], 5);
    assert_eq!(body["envio"]["transportista"], "Carlos Lopez");
    let shipment_id = body["envio"]["id"].as_str().unwrap().to_string();

    let response = app
        .clone()
        .oneshot(get_request("/api/stats"))
        .await
        .unwrap();
    let stats = body_json(response).await;
    assert_eq!(stats["cargas_disponibles"], 9);
    assert_eq!(stats["envios_en_curso"], 6);

    let response = app
        .clone()
        .oneshot(get_request("/api/envios"))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["envios"].as_array().unwrap().len(), 8);
    assert_eq!(body["envios"][0]["id"], shipment_id.as_str());

    let response = app
        .clone()
        .oneshot(get_request("/api/cargas?page_size=100"))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert!(!ids(&body["cargas"]).contains(&"c2".to_string()));

    let response = app
        .oneshot(get_request("/api/notificaciones"))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body[0]["tipo"], "success");
    assert_eq!(body[0]["message"], "Carga aceptada: Valencia \u{2192} Sevilla");
}

#[tokio::test]
async fn accept_uses_named_carrier() {
    let app = setup();
    let response = app
        .oneshot(json_request(
            "POST",
            "/api/cargas/accept/c4",
            json!({ "transportista": "Pedro Ruiz" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["envio"]["transportista"], "Pedro Ruiz");
}

#[tokio::test]
async fn accept_twice_returns_not_found() {
    let app = setup();

    let response = app
        .clone()
        .oneshot(post_empty("/api/cargas/accept/c1"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(post_empty("/api/cargas/accept/c1"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert!(body["error"].is_string());

    let response = app.oneshot(get_request("/api/stats")).await.unwrap();
    let stats = body_json(response).await;
    assert_eq!(stats["cargas_disponibles"], 9);
    assert_eq!(stats["envios_en_curso"], 6);
}

#[tokio::test]
async fn accept_unknown_load_is_not_found() {
    let app = setup();
    let response = app
        .oneshot(post_empty("/api/cargas/accept/c404"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn envios_filter_by_estado() {
    let app = setup();

    let response = app
        .clone()
        .oneshot(get_request("/api/envios?estado=activos"))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["envios"].as_array().unwrap().len(), 5);

    let response = app
        .clone()
        .oneshot(get_request("/api/envios?estado=completados"))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(ids(&body["envios"]), vec!["e5", "e6"]);

    let response = app
        .clone()
        .oneshot(get_request("/api/envios?estado=recogida_pendiente"))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(ids(&body["envios"]), vec!["e3"]);

    let response = app
        .oneshot(get_request("/api/envios?estado=perdido"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn transportistas_lists_demo_fleet() {
    let app = setup();
    let response = app
        .oneshot(get_request("/api/transportistas"))
        .await
        .unwrap();

    let body = body_json(response).await;
    let carriers = body["transportistas"].as_array().unwrap();
    assert_eq!(carriers.len(), 8);
    assert_eq!(carriers[0]["nombre"], "Miguel Fernández");
    assert_eq!(carriers[0]["estado"], "en_ruta");
}

#[tokio::test]
async fn facturas_filter_and_totals() {
    let app = setup();

    let response = app
        .clone()
        .oneshot(get_request("/api/facturas"))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["facturas"].as_array().unwrap().len(), 6);
    assert_eq!(body["totales"]["pagadas"], 3240.0);
    assert_eq!(body["totales"]["pendientes"], 2430.0);
    assert_eq!(body["totales"]["vencidas"], 620.0);

    let response = app
        .clone()
        .oneshot(get_request("/api/facturas?estado=pendiente&q=transportes"))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(ids(&body["facturas"]), vec!["F-2024-005"]);
    // totals ignore the filter
    assert_eq!(body["totales"]["pagadas"], 3240.0);

    let response = app
        .oneshot(get_request("/api/facturas?estado=anulada"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn chat_answers_by_keyword_and_assigns_session() {
    let app = setup();
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/chat",
            json!({ "message": "¿Hay cargas urgentes?" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(ids(&body["cargas_encontradas"]), vec!["c3", "c6"]);
    assert_eq!(body["suggested_actions"], json!(["Ver mapa", "Filtrar cargas"]));
    let session = body["session_id"].as_str().unwrap().to_string();
    assert!(!session.is_empty());

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/chat",
            json!({ "message": "hola", "session_id": session }),
        ))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["session_id"], session.as_str());
    assert_eq!(body["cargas_encontradas"], json!([]));
}

#[tokio::test]
async fn notificaciones_start_with_demo_feed() {
    let app = setup();
    let response = app
        .oneshot(get_request("/api/notificaciones"))
        .await
        .unwrap();

    let body = body_json(response).await;
    let items = body.as_array().unwrap();
    assert_eq!(items.len(), 4);
    assert_eq!(items[0]["tipo"], "carga");
}

#[tokio::test]
async fn anonymous_chat_is_counted_not_retained() {
    let app = setup();

    for _ in 0..3 {
        let response = app
            .clone()
            .oneshot(json_request("POST", "/api/chat", json!({ "message": "hola" })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = app.clone().oneshot(get_request("/health")).await.unwrap();
    let body = body_json(response).await;
    assert!(body.get("chat_sessions").is_none());

    let response = app.oneshot(get_request("/metrics")).await.unwrap();
    let metrics = body_string(response).await;
    assert!(metrics.contains(r#"chat_requests_total{intent="greeting"} 3"#));
}
