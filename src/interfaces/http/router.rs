//! API Router with Swagger UI

use std::sync::Arc;
use std::time::Instant;

use axum::{
    http::{HeaderValue, StatusCode},
    middleware,
    routing::{get, post, put},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use sea_orm::DatabaseConnection;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::application::ports::NotificationSender;
use crate::application::{
    BookingService, CustomerService, InventoryService, PaymentService, ReportService,
    UserService,
};
use crate::domain::RepositoryProvider;
use crate::infrastructure::crypto::jwt::JwtConfig;
use crate::infrastructure::SeaOrmRepositoryProvider;
use crate::interfaces::http::common::{
    ApiError, ErrorBody, PaginatedResponse, PaginationParams,
};
use crate::interfaces::http::middleware::{admin_middleware, auth_middleware};
use crate::interfaces::http::modules::metrics::{
    http_metrics_middleware, prometheus_metrics, MetricsState,
};
use crate::interfaces::http::modules::request_id::request_id_middleware;
use crate::interfaces::http::modules::{
    auth, bookings, customers, health, hotels, payments, reports, rooms, staff,
};

/// Settings the HTTP layer needs from the application configuration
#[derive(Debug, Clone)]
pub struct ApiSettings {
    pub jwt: JwtConfig,
    pub otp_ttl_minutes: i64,
    pub currency: String,
    /// Adds internal error text to error envelopes
    pub debug: bool,
}

/// State shared by every handler
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub bookings: Arc<BookingService>,
    pub inventory: Arc<InventoryService>,
    pub customers: Arc<CustomerService>,
    pub payments: Arc<PaymentService>,
    pub reports: Arc<ReportService>,
    pub users: Arc<UserService>,
    pub jwt_config: JwtConfig,
    pub currency: String,
    pub debug: bool,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(
        db: DatabaseConnection,
        settings: ApiSettings,
        notifier: Arc<dyn NotificationSender>,
    ) -> Self {
        let repos: Arc<dyn RepositoryProvider> =
            Arc::new(SeaOrmRepositoryProvider::new(db.clone()));
        Self {
            db,
            bookings: Arc::new(BookingService::new(repos.clone())),
            inventory: Arc::new(InventoryService::new(repos.clone())),
            customers: Arc::new(CustomerService::new(repos.clone())),
            payments: Arc::new(PaymentService::new(repos.clone())),
            reports: Arc::new(ReportService::new(repos.clone())),
            users: Arc::new(UserService::new(
                repos,
                notifier,
                settings.jwt.clone(),
                settings.otp_ttl_minutes,
            )),
            jwt_config: settings.jwt,
            currency: settings.currency,
            debug: settings.debug,
            started_at: Instant::now(),
        }
    }
}

/// Security scheme modifier for OpenAPI
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT Bearer token from /v1/auth/login"))
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        // Auth
        auth::login,
        auth::get_current_user,
        auth::change_password,
        auth::forgot_password,
        auth::reset_password,
        // Staff
        staff::list_staff,
        staff::create_staff,
        staff::get_staff,
        staff::update_staff,
        // Hotels
        hotels::list_hotels,
        hotels::create_hotel,
        hotels::get_hotel,
        hotels::update_hotel,
        hotels::availability,
        hotels::create_room_type,
        hotels::list_room_types,
        hotels::get_room_type,
        hotels::update_room_type,
        // Rooms
        rooms::list_rooms,
        rooms::create_room,
        rooms::get_room,
        rooms::update_room,
        rooms::set_room_status,
        // Customers
        customers::list_customers,
        customers::create_customer,
        customers::get_customer,
        customers::update_customer,
        customers::customer_bookings,
        // Bookings
        bookings::list_bookings,
        bookings::create_booking,
        bookings::quote,
        bookings::get_booking,
        bookings::check_in,
        bookings::check_out,
        bookings::cancel_booking,
        // Payments
        payments::list_payments,
        payments::record_payment,
        payments::get_balance,
        // Reports
        reports::dashboard,
        reports::revenue,
    ),
    components(
        schemas(
            ErrorBody,
            PaginationParams,
            PaginatedResponse<bookings::BookingDto>,
            auth::UserDto,
            hotels::HotelDto,
            hotels::RoomTypeDto,
            rooms::RoomDto,
            customers::CustomerDto,
            bookings::BookingDto,
            bookings::BookingDetailsDto,
            payments::PaymentDto,
            payments::BalanceDto,
            reports::DashboardDto,
            reports::RevenueDto,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Liveness and database reachability"),
        (name = "Authentication", description = "Login (JWT), current user, password change and reset"),
        (name = "Staff", description = "Staff accounts (admin only)"),
        (name = "Hotels", description = "Hotels and availability search"),
        (name = "Room Types", description = "Room categories with nightly price and capacity"),
        (name = "Rooms", description = "Rooms and manual maintenance status"),
        (name = "Customers", description = "Guest records"),
        (name = "Bookings", description = "Reservations and the check-in / check-out lifecycle"),
        (name = "Payments", description = "Money received against bookings"),
        (name = "Reports", description = "Dashboard and revenue"),
    ),
    info(
        title = "Hotel Service API",
        version = "1.0.0",
        description = "REST API for hotel front-desk operations",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let cors = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if allowed_origins.is_empty() || allowed_origins.iter().any(|o| o == "*") {
        return cors.allow_origin(Any);
    }
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(v) => Some(v),
            Err(_) => {
                tracing::warn!(origin = %o, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    cors.allow_origin(AllowOrigin::list(origins))
}

async fn not_found() -> ApiError {
    ApiError::from_status(StatusCode::NOT_FOUND)
}

async fn method_not_allowed() -> ApiError {
    ApiError::from_status(StatusCode::METHOD_NOT_ALLOWED)
}

/// Create the API router with all routes
pub fn create_api_router(
    state: AppState,
    allowed_origins: &[String],
    metrics_handle: Option<PrometheusHandle>,
) -> Router {
    let auth_routes = Router::new()
        .route("/login", post(auth::login))
        .route("/forgot-password", post(auth::forgot_password))
        .route("/reset-password", post(auth::reset_password))
        .merge(
            Router::new()
                .route("/me", get(auth::get_current_user))
                .route("/change-password", put(auth::change_password))
                .route_layer(middleware::from_fn_with_state(
                    state.clone(),
                    auth_middleware,
                )),
        );

    let staff_routes = Router::new()
        .route("/staff", get(staff::list_staff).post(staff::create_staff))
        .route("/staff/{id}", get(staff::get_staff).put(staff::update_staff))
        .route_layer(middleware::from_fn(admin_middleware));

    // Every /v1/user route requires a valid token; staff routes also require admin
    let user_routes = Router::new()
        // Hotels & room types
        .route("/hotels", get(hotels::list_hotels).post(hotels::create_hotel))
        .route("/hotels/{id}", get(hotels::get_hotel).put(hotels::update_hotel))
        .route("/hotels/{id}/availability", get(hotels::availability))
        .route(
            "/hotels/{id}/room-types",
            post(hotels::create_room_type),
        )
        .route("/room-types", get(hotels::list_room_types))
        .route(
            "/room-types/{id}",
            get(hotels::get_room_type).put(hotels::update_room_type),
        )
        // Rooms
        .route("/rooms", get(rooms::list_rooms).post(rooms::create_room))
        .route("/rooms/{id}", get(rooms::get_room).put(rooms::update_room))
        .route("/rooms/{id}/status", put(rooms::set_room_status))
        // Customers
        .route(
            "/customers",
            get(customers::list_customers).post(customers::create_customer),
        )
        .route(
            "/customers/{id}",
            get(customers::get_customer).put(customers::update_customer),
        )
        .route("/customers/{id}/bookings", get(customers::customer_bookings))
        // Bookings
        .route(
            "/bookings",
            get(bookings::list_bookings).post(bookings::create_booking),
        )
        .route("/bookings/quote", get(bookings::quote))
        .route("/bookings/{id}", get(bookings::get_booking))
        .route("/bookings/{id}/check-in", post(bookings::check_in))
        .route("/bookings/{id}/check-out", post(bookings::check_out))
        .route("/bookings/{id}/cancel", post(bookings::cancel_booking))
        // Payments
        .route(
            "/bookings/{id}/payments",
            get(payments::list_payments).post(payments::record_payment),
        )
        .route("/bookings/{id}/balance", get(payments::get_balance))
        // Reports
        .route("/reports/dashboard", get(reports::dashboard))
        .route("/reports/revenue", get(reports::revenue))
        .merge(staff_routes)
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    let mut router = Router::new()
        .merge(swagger_routes)
        .route("/health", get(health::health_check))
        .nest("/v1/auth", auth_routes)
        .nest("/v1/user", user_routes);

    if let Some(handle) = metrics_handle {
        router = router.merge(
            Router::new()
                .route("/metrics", get(prometheus_metrics))
                .with_state(MetricsState { handle }),
        );
    }

    router
        .fallback(not_found)
        .method_not_allowed_fallback(method_not_allowed)
        .layer(middleware::from_fn(http_metrics_middleware))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            request_id_middleware,
        ))
        .layer(cors_layer(allowed_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{header, Request, Response};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::application::identity::CreateStaff;
    use crate::domain::customer::CustomerDetails;
    use crate::domain::hotel::{HotelDetails, RoomTypeDetails};
    use crate::domain::room::NewRoom;
    use crate::domain::UserRole;
    use crate::infrastructure::database::test_support::memory_db;
    use crate::infrastructure::notifications::LogNotificationSender;

    const ADMIN_PASSWORD: &str = "admin-password";

    async fn app_state() -> AppState {
        let settings = ApiSettings {
            jwt: JwtConfig {
                secret: "router-test-secret".into(),
                expiration_hours: 1,
                issuer: "hotel-service".into(),
            },
            otp_ttl_minutes: 15,
            currency: "USD".into(),
            debug: false,
        };
        let state = AppState::new(memory_db().await, settings, Arc::new(LogNotificationSender));
        state
            .users
            .ensure_default_admin("admin", "admin@example.com", ADMIN_PASSWORD)
            .await
            .unwrap();
        state
    }

    fn app(state: &AppState) -> Router {
        create_api_router(state.clone(), &["*".to_string()], None)
    }

    async fn body_json(resp: Response<Body>) -> Value {
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn request(method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }

    async fn login(state: &AppState, username: &str, password: &str) -> String {
        let resp = app(state)
            .oneshot(request(
                "POST",
                "/v1/auth/login",
                None,
                Some(json!({"username": username, "password": password})),
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_json(resp).await;
        assert_eq!(body["status"], "success");
        body["data"]["token"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn unauthenticated_user_routes_get_401_envelope() {
        let state = app_state().await;
        let resp = app(&state)
            .oneshot(request("GET", "/v1/user/hotels", None, None))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        let header_id = resp
            .headers()
            .get("x-request-id")
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
        let body = body_json(resp).await;
        assert_eq!(body["status"], "error");
        assert_eq!(body["code"], 401);
        assert_eq!(body["request_id"], header_id.as_str());
    }

    #[tokio::test]
    async fn unknown_route_gets_404_envelope() {
        let state = app_state().await;
        let resp = app(&state)
            .oneshot(request("GET", "/v1/nowhere", None, None))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body = body_json(resp).await;
        assert_eq!(body["code"], 404);
        assert_eq!(body["message"], "The requested resource was not found");
    }

    #[tokio::test]
    async fn request_id_is_echoed() {
        let state = app_state().await;
        let mut req = request("GET", "/v1/auth/me", None, None);
        req.headers_mut()
            .insert("x-request-id", HeaderValue::from_static("trace-abc-123"));
        let resp = app(&state).oneshot(req).await.unwrap();

        assert_eq!(resp.headers()["x-request-id"], "trace-abc-123");
        let body = body_json(resp).await;
        assert_eq!(body["request_id"], "trace-abc-123");
    }

    #[tokio::test]
    async fn health_reports_database_ok() {
        let state = app_state().await;
        let resp = app(&state)
            .oneshot(request("GET", "/health", None, None))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_json(resp).await;
        assert_eq!(body["database"]["status"], "ok");
    }

    #[tokio::test]
    async fn login_and_me() {
        let state = app_state().await;
        let token = login(&state, "admin", ADMIN_PASSWORD).await;

        let resp = app(&state)
            .oneshot(request("GET", "/v1/auth/me", Some(&token), None))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_json(resp).await;
        assert_eq!(body["data"]["username"], "admin");
        assert_eq!(body["data"]["role"], "admin");
        assert!(body["data"].get("password_hash").is_none());

        let resp = app(&state)
            .oneshot(request(
                "POST",
                "/v1/auth/login",
                None,
                Some(json!({"username": "admin", "password": "wrong-password"})),
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn staff_routes_are_admin_only() {
        let state = app_state().await;
        state
            .users
            .create_staff(CreateStaff {
                username: "desk".into(),
                email: "desk@example.com".into(),
                phone: None,
                role: UserRole::Receptionist,
                password: "desk-password".into(),
            })
            .await
            .unwrap();

        let desk = login(&state, "desk", "desk-password").await;
        let resp = app(&state)
            .oneshot(request("GET", "/v1/user/staff", Some(&desk), None))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);

        let resp = app(&state)
            .oneshot(request(
                "POST",
                "/v1/user/hotels",
                Some(&desk),
                Some(json!({"name": "Nope"})),
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);

        let admin = login(&state, "admin", ADMIN_PASSWORD).await;
        let resp = app(&state)
            .oneshot(request("GET", "/v1/user/staff", Some(&admin), None))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_json(resp).await;
        assert_eq!(body["data"]["total"], 2);
    }

    /// One hotel with a double room (10000/night) and one customer.
    async fn seed_room(state: &AppState) -> (i32, i32) {
        let hotel = state
            .inventory
            .create_hotel(HotelDetails {
                name: "HTTP Hotel".into(),
                ..Default::default()
            })
            .await
            .unwrap();
        let room_type = state
            .inventory
            .create_room_type(
                hotel.id,
                RoomTypeDetails {
                    name: "Double".into(),
                    description: None,
                    base_price: 10_000,
                    capacity: 2,
                },
            )
            .await
            .unwrap();
        let room = state
            .inventory
            .create_room(NewRoom {
                hotel_id: hotel.id,
                room_type_id: room_type.id,
                number: "101".into(),
                floor: 1,
            })
            .await
            .unwrap();
        let customer = state
            .customers
            .create(CustomerDetails {
                first_name: "Ada".into(),
                last_name: "Lovelace".into(),
                ..Default::default()
            })
            .await
            .unwrap();

        (room.id, customer.id)
    }

    #[tokio::test]
    async fn overlapping_booking_gets_409() {
        let state = app_state().await;
        let (room_id, customer_id) = seed_room(&state).await;

        let token = login(&state, "admin", ADMIN_PASSWORD).await;
        let booking = |check_in: &str, check_out: &str| {
            request(
                "POST",
                "/v1/user/bookings",
                Some(&token),
                Some(json!({
                    "customer_id": customer_id,
                    "room_id": room_id,
                    "check_in_date": check_in,
                    "check_out_date": check_out,
                    "guests": 2
                })),
            )
        };

        let resp = app(&state)
            .oneshot(booking("2024-01-01", "2024-01-03"))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body = body_json(resp).await;
        assert_eq!(body["data"]["total_amount"], 20_000);
        assert_eq!(body["data"]["status"], "booked");

        let resp = app(&state)
            .oneshot(booking("2024-01-02", "2024-01-04"))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::CONFLICT);
        let body = body_json(resp).await;
        assert_eq!(body["code"], 409);

        let resp = app(&state)
            .oneshot(booking("2024-01-03", "2024-01-05"))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::CREATED);
    }

    #[tokio::test]
    async fn malformed_path_and_query_get_400_envelope() {
        let state = app_state().await;
        let token = login(&state, "admin", ADMIN_PASSWORD).await;

        let resp = app(&state)
            .oneshot(request("GET", "/v1/user/bookings/abc", Some(&token), None))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(resp.headers()[header::CONTENT_TYPE], "application/json");
        let body = body_json(resp).await;
        assert_eq!(body["status"], "error");
        assert_eq!(body["code"], 400);
        assert!(body["request_id"].is_string());

        let resp = app(&state)
            .oneshot(request("GET", "/v1/user/bookings?page=x", Some(&token), None))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body = body_json(resp).await;
        assert_eq!(body["code"], 400);
        assert_eq!(body["message"], "Invalid query string");
    }

    #[tokio::test]
    async fn check_in_and_out_accept_an_empty_body() {
        let state = app_state().await;
        let (room_id, customer_id) = seed_room(&state).await;
        let token = login(&state, "admin", ADMIN_PASSWORD).await;

        let resp = app(&state)
            .oneshot(request(
                "POST",
                "/v1/user/bookings",
                Some(&token),
                Some(json!({
                    "customer_id": customer_id,
                    "room_id": room_id,
                    "check_in_date": "2024-03-01",
                    "check_out_date": "2024-03-03",
                    "guests": 1
                })),
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::CREATED);
        let id = body_json(resp).await["data"]["id"].as_i64().unwrap();

        let resp = app(&state)
            .oneshot(request(
                "POST",
                &format!("/v1/user/bookings/{}/check-in", id),
                Some(&token),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_json(resp).await["data"]["status"], "checked_in");

        let resp = app(&state)
            .oneshot(request(
                "POST",
                &format!("/v1/user/bookings/{}/check-out", id),
                Some(&token),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_json(resp).await;
        assert_eq!(body["data"]["status"], "checked_out");
        assert_eq!(body["data"]["total_amount"], 20_000);
    }
}
