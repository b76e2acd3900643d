#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, patch, post},
    Json, Router,
};
use cortaai_web::api::ApiClient;
use cortaai_web::config::ClientConfig;
use cortaai_web::session::SessionContext;
use serde_json::{json, Value};
use uuid::Uuid;

pub const SHOP_ID: u128 = 100;
pub const HAIRCUT: u128 = 1;
pub const BEARD: u128 = 2;
pub const BARBER: u128 = 7;
/// Every booking with this barber is rejected as a conflict.
pub const BUSY_BARBER: u128 = 8;

pub const OPEN_DAY: &str = "2025-12-01";
pub const FULL_DAY: &str = "2025-12-25";
pub const BROKEN_DAY: &str = "2025-12-31";

/// One request as the fake backend saw it.
#[derive(Debug, Clone)]
pub struct Seen {
    pub method: &'static str,
    pub path: String,
    pub query: HashMap<String, String>,
    pub bearer: Option<String>,
    pub body: Option<Value>,
}

#[derive(Debug, Clone, Default)]
pub struct Recorder(Arc<Mutex<Vec<Seen>>>);

impl Recorder {
    pub fn seen(&self) -> Vec<Seen> {
        self.0.lock().unwrap().clone()
    }

    pub fn seen_path(&self, path: &str) -> Vec<Seen> {
        self.seen().into_iter().filter(|s| s.path == path).collect()
    }

    fn push(
        &self,
        method: &'static str,
        path: String,
        query: HashMap<String, String>,
        headers: &HeaderMap,
        body: Option<Value>,
    ) {
        self.0.lock().unwrap().push(Seen {
            method,
            path,
            query,
            bearer: bearer(headers),
            body,
        });
    }
}

fn bearer(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::to_string)
}

/// A throwaway CortaAI backend listening on a random local port.
pub struct FakeBackend {
    pub base_url: String,
    pub recorder: Recorder,
}

impl FakeBackend {
    pub async fn start() -> Self {
        let recorder = Recorder::default();
        let api = Router::new()
            .route("/auth/login", post(login))
            .route("/customers", post(register))
            .route("/barbershops", get(barbershops))
            .route("/barbershops/:id/activities", get(activities))
            .route("/barbershops/:id/barbers", get(barbers))
            .route("/barbers/:id/availability", get(availability))
            .route("/appointments", post(create_appointment))
            .route("/appointments/:id/cancel", patch(cancel))
            .route("/appointments/:id/conclude", patch(conclude))
            .route("/appointments/customer/me", get(customer_appointments))
            .route("/appointments/barber/me", get(barber_appointments));
        let app = Router::new().nest("/api", api).with_state(recorder.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{addr}/api"),
            recorder,
        }
    }

    pub fn client(&self, session: SessionContext) -> ApiClient {
        let config = ClientConfig::default().with_api_base_url(&self.base_url);
        ApiClient::new(&config, session)
    }

    /// Client whose session already holds `token` and `role`.
    pub fn signed_in_client(&self, role: &str) -> ApiClient {
        let session = SessionContext::in_memory();
        session
            .sign_in(&shared_types::LoginResponse {
                token: "tok-123".to_string(),
                role: role.to_string(),
                name: "Ana".to_string(),
                id: None,
            })
            .unwrap();
        self.client(session)
    }
}

async fn login(
    State(rec): State<Recorder>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    rec.push("POST", "/auth/login".into(), HashMap::new(), &headers, Some(body.clone()));
    if body["password"] != "secret" {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"message": "Bad credentials"})),
        )
            .into_response();
    }
    Json(json!({"token": "tok-123", "role": "ROLE_CUSTOMER", "name": "Ana"})).into_response()
}

async fn register(
    State(rec): State<Recorder>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    rec.push("POST", "/customers".into(), HashMap::new(), &headers, Some(body.clone()));
    if body["email"] == "taken@example.com" {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"message": "Email já cadastrado"})),
        )
            .into_response();
    }
    (StatusCode::CREATED, Json(Uuid::from_u128(500))).into_response()
}

async fn barbershops(State(rec): State<Recorder>, headers: HeaderMap) -> Response {
    rec.push("GET", "/barbershops".into(), HashMap::new(), &headers, None);
    Json(json!([
        {"id": Uuid::from_u128(SHOP_ID), "name": "Corte Fino", "cnpj": "12345678000199", "address": "Rua Augusta, 100"},
        {"id": Uuid::from_u128(SHOP_ID + 1), "name": "Navalha de Ouro", "address": "Av. Paulista, 9"}
    ]))
    .into_response()
}

async fn activities(
    State(rec): State<Recorder>,
    Path(shop_id): Path<Uuid>,
    headers: HeaderMap,
) -> Response {
    rec.push("GET", format!("/barbershops/{shop_id}/activities"), HashMap::new(), &headers, None);
    Json(json!([
        {"id": Uuid::from_u128(HAIRCUT), "activityName": "Corte", "price": 30.0, "durationMinutes": 30, "barbershopId": shop_id},
        {"id": Uuid::from_u128(BEARD), "activityName": "Barba", "price": 45.5, "durationMinutes": 45, "barbershopId": shop_id}
    ]))
    .into_response()
}

async fn barbers(
    State(rec): State<Recorder>,
    Path(shop_id): Path<Uuid>,
    headers: HeaderMap,
) -> Response {
    rec.push("GET", format!("/barbershops/{shop_id}/barbers"), HashMap::new(), &headers, None);
    Json(json!([
        {"id": Uuid::from_u128(BARBER), "name": "João", "isOwner": true, "barbershopId": shop_id},
        {"id": Uuid::from_u128(BUSY_BARBER), "name": "Pedro", "isOwner": false, "barbershopId": shop_id}
    ]))
    .into_response()
}

async fn availability(
    State(rec): State<Recorder>,
    Path(barber_id): Path<Uuid>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Response {
    rec.push(
        "GET",
        format!("/barbers/{barber_id}/availability"),
        query.clone(),
        &headers,
        None,
    );
    if bearer(&headers).is_none() {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    match query.get("date").map(String::as_str) {
        Some(FULL_DAY) => Json(Vec::<String>::new()).into_response(),
        Some(BROKEN_DAY) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"message": "Agenda indisponível"})),
        )
            .into_response(),
        _ => Json(vec!["09:00", "09:30:00"]).into_response(),
    }
}

async fn create_appointment(
    State(rec): State<Recorder>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    rec.push("POST", "/appointments".into(), HashMap::new(), &headers, Some(body.clone()));
    if bearer(&headers).is_none() {
        return StatusCode::FORBIDDEN.into_response();
    }
    if body["barberId"] == json!(Uuid::from_u128(BUSY_BARBER)) {
        return (
            StatusCode::CONFLICT,
            Json(json!({"status": 409, "message": "Horário já ocupado"})),
        )
            .into_response();
    }
    (StatusCode::CREATED, Json(42)).into_response()
}

async fn cancel(State(rec): State<Recorder>, Path(id): Path<i64>, headers: HeaderMap) -> Response {
    rec.push("PATCH", format!("/appointments/{id}/cancel"), HashMap::new(), &headers, None);
    if id == 404 {
        return (StatusCode::NOT_FOUND, Json(json!({"error": "Appointment not found"})))
            .into_response();
    }
    StatusCode::NO_CONTENT.into_response()
}

async fn conclude(State(rec): State<Recorder>, Path(id): Path<i64>, headers: HeaderMap) -> Response {
    rec.push("PATCH", format!("/appointments/{id}/conclude"), HashMap::new(), &headers, None);
    StatusCode::NO_CONTENT.into_response()
}

fn appointment(id: i64, start: &str) -> Value {
    json!({
        "id": id,
        "startTime": start,
        "status": "SCHEDULED",
        "barbershopName": "Corte Fino",
        "barberName": "João",
        "customerName": "Ana",
        "activityNames": ["Corte"]
    })
}

async fn customer_appointments(State(rec): State<Recorder>, headers: HeaderMap) -> Response {
    rec.push("GET", "/appointments/customer/me".into(), HashMap::new(), &headers, None);
    Json(json!([
        appointment(1, "2025-11-01T12:00:00Z"),
        appointment(3, "not a date"),
        appointment(2, "2025-11-28T12:00:00Z")
    ]))
    .into_response()
}

async fn barber_appointments(State(rec): State<Recorder>, headers: HeaderMap) -> Response {
    rec.push("GET", "/appointments/barber/me".into(), HashMap::new(), &headers, None);
    Json(json!([appointment(9, "2025-11-28T15:00:00-03:00")])).into_response()
}
