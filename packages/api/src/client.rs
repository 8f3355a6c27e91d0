use std::cell::Cell;
use std::rc::Rc;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use store::image::{prepare_upload, UPLOAD_FIELD, UPLOAD_FILENAME, UPLOAD_MIME};
use store::models::null_as_default;
use store::{
    AuthSession, CompressedImage, ImageLimits, NewUser, RemovalAction, SelectedImage,
    SessionStore, UserRecord, VehicleIdentifier, VehicleRecord,
};
use tracing::{debug, warn};

use crate::error::ApiError;
use crate::transport::{ApiRequest, ApiResponse, Body, Method, MultipartFile, Transport};

const LOGIN_PATH: &str = "/api/user/login";

/// Invoked after a 401 clears the session.
pub type UnauthorizedHook = Rc<dyn Fn()>;

#[derive(Deserialize)]
struct VehiclesResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    vehicles: Vec<VehicleRecord>,
}

#[derive(Deserialize)]
struct UsersResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    users: Vec<UserRecord>,
}

#[derive(Deserialize)]
struct UserResponse {
    user: UserRecord,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ImageUrlResponse {
    #[serde(default)]
    image_url: Option<String>,
}

/// Typed client for the fleet REST API.
///
/// Every request except login carries `Authorization: Bearer <token>` read
/// from the session store at send time. A 401 on an authenticated request
/// clears the session and runs the unauthorized hook once; the hook is
/// re-armed by the next successful [`login`](Self::login).
#[derive(Clone)]
pub struct FleetClient<T: Transport, S: SessionStore> {
    transport: T,
    sessions: S,
    limits: ImageLimits,
    on_unauthorized: Option<UnauthorizedHook>,
    unauthorized_fired: Rc<Cell<bool>>,
}

impl<T: Transport, S: SessionStore> FleetClient<T, S> {
    pub fn new(transport: T, sessions: S) -> Self {
        Self {
            transport,
            sessions,
            limits: ImageLimits::default(),
            on_unauthorized: None,
            unauthorized_fired: Rc::new(Cell::new(false)),
        }
    }

    pub fn with_image_limits(mut self, limits: ImageLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn with_unauthorized_hook(mut self, hook: impl Fn() + 'static) -> Self {
        self.on_unauthorized = Some(Rc::new(hook));
        self
    }

    pub fn sessions(&self) -> &S {
        &self.sessions
    }

    pub fn session(&self) -> Option<AuthSession> {
        self.sessions.load()
    }

    pub fn image_limits(&self) -> ImageLimits {
        self.limits
    }

    // ── request policy ───────────────────────────────────────────────

    async fn send(&self, method: Method, path: String, body: Body) -> Result<ApiResponse, ApiError> {
        let request = ApiRequest {
            method,
            bearer: self.sessions.token(),
            path,
            body,
        };
        debug!(?method, path = %request.path, "api request");

        let response = self.transport.send(request).await?;
        if response.status == 401 {
            self.handle_unauthorized();
            return Err(ApiError::Unauthorized);
        }
        check(response)
    }

    fn handle_unauthorized(&self) {
        warn!("session rejected by server, clearing");
        self.sessions.clear();
        if self.unauthorized_fired.replace(true) {
            return;
        }
        if let Some(hook) = &self.on_unauthorized {
            hook();
        }
    }

    async fn send_json<R: DeserializeOwned>(
        &self,
        method: Method,
        path: String,
        body: Body,
    ) -> Result<R, ApiError> {
        let response = self.send(method, path, body).await?;
        decode(&response)
    }

    // ── vehicles ─────────────────────────────────────────────────────

    pub async fn list_vehicles(&self) -> Result<Vec<VehicleRecord>, ApiError> {
        let res: VehiclesResponse = self
            .send_json(Method::Get, "/api/vehicle/listall".into(), Body::Empty)
            .await?;
        Ok(res.vehicles)
    }

    pub async fn list_deleted_vehicles(&self) -> Result<Vec<VehicleRecord>, ApiError> {
        let res: VehiclesResponse = self
            .send_json(Method::Get, "/api/vehicle/deletedvehicles".into(), Body::Empty)
            .await?;
        Ok(res.vehicles)
    }

    pub async fn add_vehicle(&self, identifier: &VehicleIdentifier) -> Result<(), ApiError> {
        let body = serde_json::to_value(identifier).map_err(|e| ApiError::Decode(e.to_string()))?;
        self.send(Method::Post, "/api/vehicle/add".into(), Body::Json(body))
            .await?;
        Ok(())
    }

    pub async fn delete_vehicle(&self, id: &str, hard_delete: bool) -> Result<(), ApiError> {
        self.send(
            Method::Delete,
            format!("/api/vehicle/delete/{id}"),
            Body::Json(json!({ "hardDelete": hard_delete })),
        )
        .await?;
        Ok(())
    }

    pub async fn restore_vehicle(&self, id: &str) -> Result<(), ApiError> {
        self.send(Method::Put, format!("/api/vehicle/restore/{id}"), Body::Empty)
            .await?;
        Ok(())
    }

    /// Dispatch a confirmed card action to the matching endpoint.
    pub async fn apply_removal(&self, id: &str, action: RemovalAction) -> Result<(), ApiError> {
        match action {
            RemovalAction::SoftDelete => self.delete_vehicle(id, false).await,
            RemovalAction::HardDelete => self.delete_vehicle(id, true).await,
            RemovalAction::Restore => self.restore_vehicle(id).await,
        }
    }

    pub async fn update_note(&self, id: &str, notes: &str) -> Result<(), ApiError> {
        self.send(
            Method::Put,
            format!("/api/vehicle/updateNote/{id}"),
            Body::Json(json!({ "customNotes": notes })),
        )
        .await?;
        Ok(())
    }

    // ── images ───────────────────────────────────────────────────────

    /// `Ok(None)` when the vehicle has no image (404 or empty URL).
    pub async fn get_image(&self, id: &str) -> Result<Option<String>, ApiError> {
        match self
            .send_json::<ImageUrlResponse>(Method::Get, format!("/api/vehicle/image/{id}"), Body::Empty)
            .await
        {
            Ok(res) => Ok(res.image_url.filter(|url| !url.is_empty())),
            Err(ApiError::NotFound) => Ok(None),
            Err(e) => Err(e),
        }
    }

    pub async fn upload_image(&self, id: &str, image: &CompressedImage) -> Result<(), ApiError> {
        let file = MultipartFile {
            field: UPLOAD_FIELD.to_string(),
            filename: UPLOAD_FILENAME.to_string(),
            mime: UPLOAD_MIME.to_string(),
            bytes: image.bytes.clone(),
        };
        self.send(Method::Post, format!("/api/vehicle/image/{id}"), Body::Multipart(file))
            .await?;
        Ok(())
    }

    /// Validate, compress and upload a picked file. Nothing is sent when
    /// validation or compression fails.
    pub async fn upload_vehicle_image(
        &self,
        id: &str,
        file: &SelectedImage,
    ) -> Result<CompressedImage, ApiError> {
        let compressed = prepare_upload(file, &self.limits)?;
        debug!(
            original = file.bytes.len(),
            compressed = compressed.bytes.len(),
            width = compressed.width,
            height = compressed.height,
            "image compressed"
        );
        self.upload_image(id, &compressed).await?;
        Ok(compressed)
    }

    pub async fn delete_image(&self, id: &str) -> Result<(), ApiError> {
        self.send(Method::Delete, format!("/api/vehicle/image/{id}"), Body::Empty)
            .await?;
        Ok(())
    }

    // ── auth ─────────────────────────────────────────────────────────

    /// Log in and persist the session. A 401 here means bad credentials and
    /// does not trigger the unauthorized hook.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthSession, ApiError> {
        let request = ApiRequest {
            method: Method::Post,
            path: LOGIN_PATH.to_string(),
            bearer: None,
            body: Body::Json(json!({ "email": email.trim(), "password": password })),
        };
        let response = self.transport.send(request).await?;
        if response.status == 401 {
            return Err(ApiError::Status {
                status: 401,
                message: response
                    .message()
                    .unwrap_or_else(|| "Invalid email or password".to_string()),
            });
        }
        let response = check(response)?;
        let raw = String::from_utf8_lossy(&response.body);
        let session = AuthSession::from_json(&raw)
            .ok_or_else(|| ApiError::Decode("login response has no token".to_string()))?;

        self.sessions.save(&session);
        self.unauthorized_fired.set(false);
        Ok(session)
    }

    /// Local only; the backend keeps no session state.
    pub fn logout(&self) {
        self.sessions.clear();
    }

    // ── users ────────────────────────────────────────────────────────

    pub async fn list_users(&self) -> Result<Vec<UserRecord>, ApiError> {
        let res: UsersResponse = self
            .send_json(Method::Get, "/api/user/listall".into(), Body::Empty)
            .await?;
        Ok(res.users)
    }

    /// Sends the normalized form of `user`.
    pub async fn create_user(&self, user: &NewUser) -> Result<UserRecord, ApiError> {
        let body = serde_json::to_value(user.normalized())
            .map_err(|e| ApiError::Decode(e.to_string()))?;
        let res: UserResponse = self
            .send_json(Method::Post, "/api/user/create".into(), Body::Json(body))
            .await?;
        Ok(res.user)
    }

    pub async fn delete_user(&self, id: &str) -> Result<(), ApiError> {
        self.send(Method::Delete, format!("/api/user/{id}"), Body::Empty)
            .await?;
        Ok(())
    }

    pub async fn toggle_user_disabled(&self, id: &str) -> Result<(), ApiError> {
        self.send(Method::Put, format!("/api/user/{id}/toggle-disable"), Body::Empty)
            .await?;
        Ok(())
    }

    pub async fn change_password(&self, id: &str, password: &str) -> Result<(), ApiError> {
        self.send(
            Method::Put,
            format!("/api/user/{id}/password"),
            Body::Json(json!({ "password": password })),
        )
        .await?;
        Ok(())
    }
}

fn check(response: ApiResponse) -> Result<ApiResponse, ApiError> {
    match response.status {
        _ if response.is_success() => Ok(response),
        404 => Err(ApiError::NotFound),
        429 => Err(ApiError::RateLimited),
        status => Err(ApiError::Status {
            status,
            message: response.message().unwrap_or_default(),
        }),
    }
}

fn decode<R: DeserializeOwned>(response: &ApiResponse) -> Result<R, ApiError> {
    serde_json::from_slice(&response.body).map_err(|e| ApiError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use store::MemorySessionStore;

    /// Replays canned responses and records every request.
    #[derive(Clone, Default)]
    struct ScriptedTransport {
        responses: Rc<RefCell<VecDeque<ApiResponse>>>,
        requests: Rc<RefCell<Vec<ApiRequest>>>,
    }

    impl ScriptedTransport {
        fn respond(&self, status: u16, body: &str) -> &Self {
            self.responses.borrow_mut().push_back(ApiResponse {
                status,
                body: body.as_bytes().to_vec(),
            });
            self
        }

        fn requests(&self) -> Vec<ApiRequest> {
            self.requests.borrow().clone()
        }
    }

    impl Transport for ScriptedTransport {
        async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
            self.requests.borrow_mut().push(request);
            self.responses
                .borrow_mut()
                .pop_front()
                .ok_or_else(|| ApiError::Transport("no scripted response".into()))
        }
    }

    const SESSION: &str = r#"{"user":{"token":"tok-1","isAdmin":true,"_id":"u1"}}"#;

    fn logged_in() -> (ScriptedTransport, FleetClient<ScriptedTransport, MemorySessionStore>) {
        let transport = ScriptedTransport::default();
        let client = FleetClient::new(transport.clone(), MemorySessionStore::with_raw(SESSION));
        (transport, client)
    }

    #[tokio::test]
    async fn test_bearer_attached_to_authenticated_calls() {
        let (transport, client) = logged_in();
        transport.respond(200, r#"{"vehicles":[{"_id":"v1","make":"Ford"}]}"#);

        let vehicles = client.list_vehicles().await.unwrap();
        assert_eq!(vehicles.len(), 1);
        assert_eq!(vehicles[0].make.as_deref(), Some("Ford"));

        let requests = transport.requests();
        assert_eq!(requests[0].method, Method::Get);
        assert_eq!(requests[0].path, "/api/vehicle/listall");
        assert_eq!(requests[0].bearer.as_deref(), Some("tok-1"));
    }

    #[tokio::test]
    async fn test_null_fields_do_not_drop_the_batch() {
        let (transport, client) = logged_in();
        transport
            .respond(
                200,
                r#"{"vehicles":[
                    {"_id":"v1","make":"Ford","motTests":null},
                    {"_id":"v2","motTests":[{"defects":null},{"defects":[{"dangerous":null}]}]}
                ]}"#,
            )
            .respond(200, r#"{"vehicles":null}"#)
            .respond(200, r#"{"users":[{"_id":"u1","isAdmin":null,"displayName":null}]}"#);

        let vehicles = client.list_vehicles().await.unwrap();
        assert_eq!(vehicles.len(), 2);
        assert!(vehicles[0].mot_tests.is_empty());
        assert!(vehicles[1].mot_tests[0].defects.is_empty());
        assert!(client.list_deleted_vehicles().await.unwrap().is_empty());

        let users = client.list_users().await.unwrap();
        assert!(!users[0].is_admin);
        assert_eq!(users[0].display_name, "");
    }

    #[tokio::test]
    async fn test_login_has_no_bearer_and_persists_session() {
        let transport = ScriptedTransport::default();
        let sessions = MemorySessionStore::with_raw(SESSION);
        let client = FleetClient::new(transport.clone(), sessions.clone());
        transport.respond(200, r#"{"user":{"token":"fresh","isAdmin":false,"email":"a@b.c"}}"#);

        let session = client.login(" a@b.c ", "secret").await.unwrap();
        assert_eq!(session.token(), "fresh");
        assert_eq!(sessions.token().as_deref(), Some("fresh"));

        let request = &transport.requests()[0];
        assert_eq!(request.path, LOGIN_PATH);
        assert!(request.bearer.is_none());
        assert_eq!(
            request.body,
            Body::Json(json!({ "email": "a@b.c", "password": "secret" }))
        );
    }

    #[tokio::test]
    async fn test_login_rejection_does_not_fire_hook() {
        let transport = ScriptedTransport::default();
        let fired = Rc::new(Cell::new(0));
        let counter = fired.clone();
        let client = FleetClient::new(transport.clone(), MemorySessionStore::new())
            .with_unauthorized_hook(move || counter.set(counter.get() + 1));
        transport.respond(401, r#"{"message":"Invalid credentials"}"#);

        let err = client.login("a@b.c", "bad").await.unwrap_err();
        assert_eq!(err.user_message("Login failed"), "Invalid credentials");
        assert_eq!(fired.get(), 0);
    }

    #[tokio::test]
    async fn test_unauthorized_clears_session_and_fires_once() {
        let transport = ScriptedTransport::default();
        let sessions = MemorySessionStore::with_raw(SESSION);
        let fired = Rc::new(Cell::new(0));
        let counter = fired.clone();
        let client = FleetClient::new(transport.clone(), sessions.clone())
            .with_unauthorized_hook(move || counter.set(counter.get() + 1));

        transport.respond(401, "").respond(401, "");
        assert!(matches!(client.list_vehicles().await, Err(ApiError::Unauthorized)));
        assert!(sessions.load().is_none());
        assert!(matches!(client.list_users().await, Err(ApiError::Unauthorized)));
        assert_eq!(fired.get(), 1);

        // second request went out without a token
        assert!(transport.requests()[1].bearer.is_none());

        // a successful login re-arms the hook
        transport
            .respond(200, r#"{"user":{"token":"again"}}"#)
            .respond(401, "");
        client.login("a@b.c", "pw").await.unwrap();
        assert!(client.restore_vehicle("v1").await.is_err());
        assert_eq!(fired.get(), 2);
    }

    #[tokio::test]
    async fn test_status_mapping() {
        let (transport, client) = logged_in();
        transport
            .respond(429, "")
            .respond(500, r#"{"message":"Database unavailable"}"#)
            .respond(400, "bad")
            .respond(200, "not json");

        assert!(matches!(client.list_vehicles().await, Err(ApiError::RateLimited)));
        match client.list_vehicles().await {
            Err(ApiError::Status { status, message }) => {
                assert_eq!(status, 500);
                assert_eq!(message, "Database unavailable");
            }
            other => panic!("unexpected {other:?}"),
        }
        let err = client.add_vehicle(&VehicleIdentifier::Vin("X".into())).await.unwrap_err();
        assert_eq!(err.user_message("Failed to add vehicle"), "Failed to add vehicle");
        assert!(matches!(client.list_users().await, Err(ApiError::Decode(_))));
    }

    #[tokio::test]
    async fn test_get_image_not_found_is_none() {
        let (transport, client) = logged_in();
        transport
            .respond(404, r#"{"message":"No image"}"#)
            .respond(200, r#"{"imageUrl":"https://cdn/v1.jpg"}"#)
            .respond(200, r#"{"imageUrl":""}"#);

        assert_eq!(client.get_image("v1").await.unwrap(), None);
        assert_eq!(client.get_image("v1").await.unwrap().as_deref(), Some("https://cdn/v1.jpg"));
        assert_eq!(client.get_image("v1").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_oversized_upload_sends_nothing() {
        let (transport, client) = logged_in();
        let file = SelectedImage::from_file("car.jpg", vec![0u8; 6 * 1024 * 1024]);

        let err = client.upload_vehicle_image("v1", &file).await.unwrap_err();
        assert!(matches!(err, ApiError::Image(store::ImageError::TooLarge { .. })));
        assert!(transport.requests().is_empty());

        let png = SelectedImage::from_file("car.png", vec![0u8; 16]);
        assert!(client.upload_vehicle_image("v1", &png).await.is_err());
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn test_upload_sends_multipart_jpeg() {
        let (transport, client) = logged_in();
        transport.respond(200, "{}");
        let image = CompressedImage {
            bytes: vec![0xFF, 0xD8, 0xFF],
            width: 10,
            height: 10,
        };

        client.upload_image("v9", &image).await.unwrap();
        let request = &transport.requests()[0];
        assert_eq!(request.path, "/api/vehicle/image/v9");
        match &request.body {
            Body::Multipart(file) => {
                assert_eq!(file.field, "image");
                assert_eq!(file.filename, "vehicle-image.jpg");
                assert_eq!(file.mime, "image/jpeg");
            }
            other => panic!("expected multipart, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_vehicle_mutation_bodies() {
        let (transport, client) = logged_in();
        for _ in 0..4 {
            transport.respond(200, "{}");
        }

        client.add_vehicle(&VehicleIdentifier::Registration("AB12CDE".into())).await.unwrap();
        client.apply_removal("v1", RemovalAction::HardDelete).await.unwrap();
        client.apply_removal("v1", RemovalAction::Restore).await.unwrap();
        client.update_note("v1", "new tyres").await.unwrap();

        let requests = transport.requests();
        assert_eq!(requests[0].body, Body::Json(json!({ "registration": "AB12CDE" })));
        assert_eq!(requests[1].method, Method::Delete);
        assert_eq!(requests[1].body, Body::Json(json!({ "hardDelete": true })));
        assert_eq!(requests[2].path, "/api/vehicle/restore/v1");
        assert_eq!(requests[3].body, Body::Json(json!({ "customNotes": "new tyres" })));
    }

    #[tokio::test]
    async fn test_create_user_normalizes_payload() {
        let (transport, client) = logged_in();
        transport.respond(
            201,
            r#"{"user":{"_id":"u2","email":"jo@x.io","username":"jo","displayName":"jo smith","isActive":"enabled"}}"#,
        );
        let user = client
            .create_user(&NewUser {
                display_name: " Jo Smith ".into(),
                username: "JO".into(),
                email: "Jo@X.io".into(),
                password: " pw1234 ".into(),
                is_admin: false,
            })
            .await
            .unwrap();
        assert_eq!(user.title_name(), "Jo Smith");

        let request = &transport.requests()[0];
        assert_eq!(
            request.body,
            Body::Json(json!({
                "displayName": "jo smith",
                "username": "jo",
                "email": "jo@x.io",
                "password": "pw1234",
                "isAdmin": false,
            }))
        );
    }
}
