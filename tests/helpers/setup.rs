use jsonwebtoken::{encode, EncodingKey, Header};
use sehat_saathi_api::Application;
use sehat_saathi_domain::User;
use sehat_saathi_infra::SehatContext;
use sehat_saathi_sdk::SehatSDK;
use serde::Serialize;

pub struct TestApp {
    pub ctx: SehatContext,
    pub address: String,
}

#[derive(Serialize)]
struct Claims {
    #[serde(rename = "userId")]
    user_id: String,
    exp: usize,
}

impl TestApp {
    /// Registers a user and returns an SDK authenticated as that user
    pub async fn login(&self, name: &str, email: &str) -> (User, SehatSDK) {
        let user = User::new(name, email);
        self.ctx
            .repos
            .users
            .insert(&user)
            .await
            .expect("Expected to insert user");
        let sdk = SehatSDK::new(self.address.clone(), self.token_for(&user));
        (user, sdk)
    }

    /// Signs a bearer token for `user` with the secret the app was started with
    pub fn token_for(&self, user: &User) -> String {
        let claims = Claims {
            user_id: user.id.to_string(),
            // Year 2100
            exp: 4_102_444_800,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.ctx.config.jwt_secret.as_bytes()),
        )
        .expect("Expected to sign token")
    }
}

// Launch the application as a background task
pub async fn spawn_app_with(configure: impl FnOnce(&mut SehatContext)) -> TestApp {
    let mut ctx = SehatContext::create_inmemory();
    ctx.config.port = 0; // Random port
    ctx.config.jwt_secret = "integration-test-secret".into();
    configure(&mut ctx);

    let application = Application::new(ctx.clone())
        .await
        .expect("Failed to build application.");

    let address = format!("http://localhost:{}", application.port());
    let _ = actix_web::rt::spawn(async move {
        application
            .start()
            .await
            .expect("Expected application to start");
    });

    TestApp { ctx, address }
}

pub async fn spawn_app() -> TestApp {
    spawn_app_with(|_| {}).await
}
