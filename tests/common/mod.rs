use studyplan::client::{ApiClient, Session};
use studyplan::models::NewUser;
use studyplan::server::{spawn_local, AppState};

/// Start a dev server on an ephemeral port and return an anonymous client for it
pub async fn start_server() -> ApiClient {
    let addr = spawn_local(AppState::new()).await.unwrap();
    ApiClient::new(format!("http://{}", addr), Session::anonymous()).unwrap()
}

/// Start a dev server and sign a fresh user in
pub async fn signed_in_client() -> ApiClient {
    let anonymous = start_server().await;
    sign_in(&anonymous, "pat@example.com").await
}

pub async fn sign_in(client: &ApiClient, email: &str) -> ApiClient {
    client
        .auth()
        .register(&NewUser {
            email: email.to_string(),
            full_name: "Pat Student".to_string(),
            password: "hunter2".to_string(),
        })
        .await
        .unwrap();

    let token = client.auth().login(email, "hunter2").await.unwrap();
    client.with_session(Session::bearer(token.access_token))
}
